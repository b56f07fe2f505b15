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
use std::str::FromStr;

use interception_core::InterceptionError;
use serde::{Deserialize, Serialize};

use crate::interceptor::{InterceptorHandle, LoggingInterceptor};

/// Interception configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptionConfig {
    /// Emit a `trace` event for every step of a chain
    pub enable_tracing: bool,
    /// Longest chain allowed to run
    pub max_chain_depth: usize,
    /// Level used by the logging interceptor
    pub log_level: LogLevel,
    pub slow_invocation_threshold_ms: u64,
}

impl Default for InterceptionConfig {
    fn default() -> Self {
        Self {
            enable_tracing: false,
            max_chain_depth: 32,
            log_level: LogLevel::Info,
            slow_invocation_threshold_ms: 1000,
        }
    }
}

impl InterceptionConfig {
    /// Development environment configuration
    pub fn development() -> Self {
        Self {
            enable_tracing: true,
            max_chain_depth: 64,
            log_level: LogLevel::Debug,
            slow_invocation_threshold_ms: 200,
        }
    }

    /// Production environment configuration
    pub fn production() -> Self {
        Self {
            enable_tracing: false,
            max_chain_depth: 32,
            log_level: LogLevel::Warn,
            slow_invocation_threshold_ms: 1000,
        }
    }

    pub fn with_max_chain_depth(mut self, max_chain_depth: usize) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    pub fn with_tracing(mut self, enable_tracing: bool) -> Self {
        self.enable_tracing = enable_tracing;
        self
    }

    /// A logging interceptor honouring this configuration's level and slow threshold
    pub fn logging_interceptor(&self) -> InterceptorHandle {
        LoggingInterceptor::from_config(self).into_handle()
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// Tracking level (lowest priority)
    Trace = 1,
    /// Debug level
    Debug = 2,
    /// Information level
    Info = 3,
    /// Warning level
    Warn = 4,
    /// Error Level (Highest Priority)
    Error = 5,
}

impl LogLevel {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Check if a level is recorded
    pub fn should_log(&self, other: LogLevel) -> bool {
        *self <= other
    }
}

impl FromStr for LogLevel {
    type Err = InterceptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" | "ERR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(InterceptionError::illegal_argument(format!("Unknown log level: {}", s))),
        }
    }
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Error);
        assert!(LogLevel::Debug.should_log(LogLevel::Warn));
        assert!(!LogLevel::Warn.should_log(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: InterceptionConfig = serde_json::from_str(r#"{"max_chain_depth": 4, "log_level": "Debug"}"#).unwrap();
        assert_eq!(config.max_chain_depth, 4);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.enable_tracing);
        assert_eq!(config.slow_invocation_threshold_ms, 1000);
    }

    #[test]
    fn test_presets() {
        assert!(InterceptionConfig::development().enable_tracing);
        assert_eq!(InterceptionConfig::production().log_level, LogLevel::Warn);
        assert_eq!(InterceptionConfig::default().with_max_chain_depth(3).max_chain_depth, 3);

        let quiet = InterceptionConfig::development().with_tracing(false);
        assert!(!quiet.enable_tracing);
        assert_eq!(quiet.max_chain_depth, 64);
        assert!(InterceptionConfig::production().with_tracing(true).enable_tracing);
    }

    #[test]
    fn test_logging_interceptor_from_config() {
        let handle = InterceptionConfig::production().logging_interceptor();
        assert_eq!(handle.interceptor_class(), LoggingInterceptor::INTERCEPTOR_CLASS);
    }
}
