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
use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

use interception_core::{InterceptionError, InterceptionType, Result};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::InterceptionConfig;
use crate::interceptor::{InterceptorHandle, Invocation, InvocationContext, TargetInvocation};
use crate::model::InterceptionModel;

/// An ordered interceptor list ready to run around one target.
#[derive(Clone, Debug)]
pub struct InterceptorChain {
    interceptors: Vec<InterceptorHandle>,
    config: InterceptionConfig,
}

impl InterceptorChain {
    pub fn new(interceptors: Vec<InterceptorHandle>) -> Self {
        Self::with_config(interceptors, InterceptionConfig::default())
    }

    pub fn with_config(interceptors: Vec<InterceptorHandle>, config: InterceptionConfig) -> Self {
        Self { interceptors, config }
    }

    /// Run the chain for `interception_type`, ending in `target`.
    pub fn invoke(
        &self,
        interception_type: InterceptionType,
        invocation: Invocation<'_>,
        target: &TargetInvocation<'_>,
    ) -> Result<Value> {
        // Only interceptors eligible for this type take part in the chain
        let depth = self
            .interceptors
            .iter()
            .filter(|interceptor| interceptor.is_eligible(interception_type))
            .count();
        if depth > self.config.max_chain_depth {
            return Err(InterceptionError::ChainTooDeep {
                depth,
                max: self.config.max_chain_depth,
            });
        }

        let mut ctx = InvocationContext::new(
            interception_type,
            invocation,
            &self.interceptors,
            target,
            self.config.enable_tracing,
        );
        let result = ctx.proceed();
        if let Err(err) = &result {
            if self.config.enable_tracing {
                error!("<== {} failed: {}", interception_type, err);
            }
        }
        result
    }

    pub fn interceptors(&self) -> &[InterceptorHandle] {
        &self.interceptors
    }

    /// Get the number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Check if it is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

/// Resolves chains from an interception model and runs them.
pub struct InterceptorInvoker<T> {
    model: Arc<InterceptionModel<T>>,
    config: InterceptionConfig,
}

impl<T> Clone for InterceptorInvoker<T> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> InterceptorInvoker<T> {
    pub fn new(model: Arc<InterceptionModel<T>>) -> Self {
        Self::with_config(model, InterceptionConfig::default())
    }

    pub fn with_config(model: Arc<InterceptionModel<T>>, config: InterceptionConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &Arc<InterceptionModel<T>> {
        &self.model
    }

    pub fn config(&self) -> &InterceptionConfig {
        &self.config
    }

    fn chain(&self, interceptors: Vec<InterceptorHandle>) -> InterceptorChain {
        InterceptorChain::with_config(interceptors, self.config.clone())
    }

    /// Invoke a business method through its `@AroundInvoke` chain
    pub fn invoke(&self, invocation: Invocation<'_>, target: &TargetInvocation<'_>) -> Result<Value> {
        self.invoke_method(InterceptionType::AroundInvoke, invocation, target)
    }

    /// Invoke a timeout method through its `@AroundTimeout` chain
    pub fn invoke_timeout(&self, invocation: Invocation<'_>, target: &TargetInvocation<'_>) -> Result<Value> {
        self.invoke_method(InterceptionType::AroundTimeout, invocation, target)
    }

    fn invoke_method(
        &self,
        interception_type: InterceptionType,
        invocation: Invocation<'_>,
        target: &TargetInvocation<'_>,
    ) -> Result<Value> {
        let interceptors = self.model.get_interceptors(interception_type, invocation.method())?;
        self.chain(interceptors).invoke(interception_type, invocation, target)
    }

    /// Fire a lifecycle callback (`@PostConstruct`, `@PreDestroy`, ...) for `target`.
    pub fn invoke_lifecycle(
        &self,
        interception_type: InterceptionType,
        target: Option<Arc<dyn Any + Send + Sync>>,
        callback: &dyn Fn() -> Result<()>,
    ) -> Result<()> {
        let interceptors = self.model.get_interceptors(interception_type, None)?;
        if interceptors.is_empty() {
            return callback();
        }
        let mut invocation = Invocation::new();
        if let Some(target) = target {
            invocation = invocation.with_target(target);
        }
        debug!("Firing {} with {} interceptors", interception_type, interceptors.len());
        self.chain(interceptors)
            .invoke(interception_type, invocation, &|_| callback().map(|_| Value::Null))
            .map(|_| ())
    }

    /// Construct an instance through the `@AroundConstruct` chain.
    ///
    /// When an interceptor proceeds more than once, the last constructed
    /// instance wins.
    pub fn construct<B, F>(&self, parameters: Vec<Value>, constructor: F) -> Result<B>
    where
        F: Fn(&[Value]) -> Result<B>,
    {
        let interceptors = self.model.get_constructor_invocation_interceptors();
        if interceptors.is_empty() {
            return constructor(&parameters);
        }
        let instance = RefCell::new(None);
        self.chain(interceptors).invoke(
            InterceptionType::AroundConstruct,
            Invocation::new().with_parameters(parameters),
            &|parameters| {
                *instance.borrow_mut() = Some(constructor(parameters)?);
                Ok(Value::Null)
            },
        )?;
        instance.into_inner().ok_or_else(|| {
            InterceptionError::illegal_state("An @AroundConstruct interceptor did not proceed to the constructor")
        })
    }
}
