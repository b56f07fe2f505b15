/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */
use std::fmt;
use std::time::Instant;

use interception_core::{InterceptionType, Result};
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use crate::config::{InterceptionConfig, LogLevel};
use crate::interceptor::{InterceptorHandle, InterceptorMetadata, InvocationContext};

/// Simplified log interceptor - Focus on invocation timing
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    pub log_level: LogLevel,
    pub slow_invocation_threshold_ms: u64,
}

impl LoggingInterceptor {
    pub const INTERCEPTOR_CLASS: &'static str = "interception::LoggingInterceptor";

    pub fn new() -> Self {
        Self {
            log_level: LogLevel::Debug,
            slow_invocation_threshold_ms: 1000,
        }
    }

    pub fn from_config(config: &InterceptionConfig) -> Self {
        Self {
            log_level: config.log_level,
            slow_invocation_threshold_ms: config.slow_invocation_threshold_ms,
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_slow_invocation_threshold(mut self, threshold_ms: u64) -> Self {
        self.slow_invocation_threshold_ms = threshold_ms;
        self
    }

    pub fn into_handle(self) -> InterceptorHandle {
        InterceptorHandle::new(self)
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.log_level.should_log(level) {
            return;
        }
        match level {
            LogLevel::Trace => trace!("{}", args),
            LogLevel::Debug => debug!("{}", args),
            LogLevel::Info => info!("{}", args),
            LogLevel::Warn => warn!("{}", args),
            LogLevel::Error => error!("{}", args),
        }
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptorMetadata for LoggingInterceptor {
    fn interceptor_class(&self) -> &str {
        Self::INTERCEPTOR_CLASS
    }

    fn is_eligible(&self, _interception_type: InterceptionType) -> bool {
        true
    }

    fn intercept(&self, interception_type: InterceptionType, ctx: &mut InvocationContext<'_>) -> Result<Value> {
        let subject = ctx
            .method()
            .map(|method| method.to_string())
            .unwrap_or_else(|| "<lifecycle>".to_string());
        self.log(LogLevel::Debug, format_args!("==> {} {}", interception_type, subject));
        if !ctx.get_parameters().is_empty() {
            self.log(LogLevel::Trace, format_args!("==> Parameters: {:?}", ctx.get_parameters()));
        }

        let start = Instant::now();
        let result = ctx.proceed();
        let duration_ms = start.elapsed().as_millis();

        match &result {
            Err(err) => {
                self.log(LogLevel::Error, format_args!("<== {} {} failed: {}", interception_type, subject, err));
            }
            Ok(_) => {
                if duration_ms > self.slow_invocation_threshold_ms as u128 {
                    self.log(
                        LogLevel::Warn,
                        format_args!("<== Slow invocation! {} {} cost: {} ms", interception_type, subject, duration_ms),
                    );
                }
                self.log(LogLevel::Info, format_args!("<== {} {} cost: {} ms", interception_type, subject, duration_ms));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::interceptor::{InterceptorChain, Invocation};
    use interception_core::{InterceptionError, Method};

    #[test]
    fn test_logging_is_transparent() {
        let chain = InterceptorChain::new(vec![LoggingInterceptor::new().with_log_level(LogLevel::Trace).into_handle()]);
        let method = Method::new("Bean", "sum", ["int", "int"]);
        let result = chain
            .invoke(
                InterceptionType::AroundInvoke,
                Invocation::of(&method).with_parameters(vec![json!(1), json!(2)]),
                &|params| Ok(json!(params[0].as_i64().unwrap_or_default() + params[1].as_i64().unwrap_or_default())),
            )
            .unwrap();
        assert_eq!(result, json!(3));
    }

    #[test]
    fn test_logging_passes_errors_through() {
        let chain = InterceptorChain::new(vec![LoggingInterceptor::default().into_handle()]);
        let err = chain
            .invoke(InterceptionType::PreDestroy, Invocation::new(), &|_| {
                Err(InterceptionError::target_error("boom"))
            })
            .unwrap_err();
        assert_eq!(err, InterceptionError::Target("boom".to_string()));
    }

    #[test]
    fn test_from_config_takes_level_and_threshold() {
        let development = LoggingInterceptor::from_config(&InterceptionConfig::development());
        assert_eq!(development.log_level, LogLevel::Debug);
        assert_eq!(development.slow_invocation_threshold_ms, 200);

        let production = LoggingInterceptor::from_config(&InterceptionConfig::production());
        assert_eq!(production.log_level, LogLevel::Warn);
        assert_eq!(production.slow_invocation_threshold_ms, 1000);
        assert!(!production.log_level.should_log(LogLevel::Info));
        assert!(production.log_level.should_log(LogLevel::Error));
    }

    #[test]
    fn test_configured_logging_runs_in_chain() {
        let config = InterceptionConfig::production();
        let chain = InterceptorChain::with_config(vec![config.logging_interceptor()], config);
        let method = Method::new("Bean", "ping", Vec::<String>::new());
        let result = chain
            .invoke(InterceptionType::AroundInvoke, Invocation::of(&method), &|_| Ok(json!("pong")))
            .unwrap();
        assert_eq!(result, json!("pong"));
    }
}
