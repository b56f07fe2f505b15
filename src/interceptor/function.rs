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
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use interception_core::{InterceptionError, InterceptionType, Result};
use serde_json::Value;

use crate::interceptor::{InterceptorHandle, InterceptorMetadata, InvocationContext};

type Handler = Arc<dyn Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync>;

/// Interceptor whose interceptor methods are closures, one per interception type.
#[derive(Clone)]
pub struct FnInterceptor {
    interceptor_class: String,
    handlers: HashMap<InterceptionType, Handler>,
    target_class: bool,
}

impl FnInterceptor {
    pub fn new<S: Into<String>>(interceptor_class: S) -> Self {
        Self {
            interceptor_class: interceptor_class.into(),
            handlers: HashMap::new(),
            target_class: false,
        }
    }

    /// Register the interceptor method for `interception_type`, replacing any previous one
    pub fn on<F>(mut self, interception_type: InterceptionType, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(interception_type, Arc::new(handler));
        self
    }

    pub fn around_invoke<F>(self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.on(InterceptionType::AroundInvoke, handler)
    }

    pub fn around_timeout<F>(self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.on(InterceptionType::AroundTimeout, handler)
    }

    pub fn around_construct<F>(self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.on(InterceptionType::AroundConstruct, handler)
    }

    pub fn post_construct<F>(self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.on(InterceptionType::PostConstruct, handler)
    }

    pub fn pre_destroy<F>(self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.on(InterceptionType::PreDestroy, handler)
    }

    /// Mark the interceptor methods as declared on the intercepted class itself
    pub fn target_class(mut self) -> Self {
        self.target_class = true;
        self
    }

    pub fn into_handle(self) -> InterceptorHandle {
        InterceptorHandle::new(self)
    }
}

impl InterceptorMetadata for FnInterceptor {
    fn interceptor_class(&self) -> &str {
        &self.interceptor_class
    }

    fn is_eligible(&self, interception_type: InterceptionType) -> bool {
        self.handlers.contains_key(&interception_type)
    }

    fn intercept(&self, interception_type: InterceptionType, ctx: &mut InvocationContext<'_>) -> Result<Value> {
        match self.handlers.get(&interception_type) {
            Some(handler) => handler(ctx),
            None => Err(InterceptionError::interceptor_error(
                self.interceptor_class.as_str(),
                format!("no interceptor method for {}", interception_type),
            )),
        }
    }

    fn is_target_class(&self) -> bool {
        self.target_class
    }
}

impl fmt::Debug for FnInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().collect();
        types.sort();
        f.debug_struct("FnInterceptor")
            .field("interceptor_class", &self.interceptor_class)
            .field("types", &types)
            .field("target_class", &self.target_class)
            .finish()
    }
}
