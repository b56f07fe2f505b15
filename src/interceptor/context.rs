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
use std::collections::HashMap;
use std::sync::Arc;

use interception_core::{InterceptionError, InterceptionType, Method, Result};
use serde_json::Value;
use tracing::trace;

use crate::interceptor::InterceptorHandle;

/// Call into the intercepted target once the chain is exhausted. Receives the
/// parameters as last set by an interceptor.
pub type TargetInvocation<'a> = dyn Fn(&[Value]) -> Result<Value> + 'a;

/// What is being intercepted: the pieces of one call that are not the chain.
#[derive(Default)]
pub struct Invocation<'a> {
    method: Option<&'a Method>,
    target: Option<Arc<dyn Any + Send + Sync>>,
    parameters: Vec<Value>,
    timer: Option<Value>,
}

impl<'a> Invocation<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocation of a business method
    pub fn of(method: &'a Method) -> Self {
        Self::new().with_method(method)
    }

    pub fn with_method(mut self, method: &'a Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_target(mut self, target: Arc<dyn Any + Send + Sync>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Timer payload of an `@AroundTimeout` invocation
    pub fn with_timer(mut self, timer: Value) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn method(&self) -> Option<&'a Method> {
        self.method
    }
}

/// The context an interceptor method receives.
pub struct InvocationContext<'a> {
    interception_type: InterceptionType,
    method: Option<&'a Method>,
    target: Option<Arc<dyn Any + Send + Sync>>,
    parameters: Vec<Value>,
    timer: Option<Value>,
    context_data: HashMap<String, Value>,
    interceptors: &'a [InterceptorHandle],
    position: usize,
    invocation: &'a TargetInvocation<'a>,
    tracing: bool,
}

impl<'a> InvocationContext<'a> {
    pub(crate) fn new(
        interception_type: InterceptionType,
        invocation: Invocation<'a>,
        interceptors: &'a [InterceptorHandle],
        target_invocation: &'a TargetInvocation<'a>,
        tracing: bool,
    ) -> Self {
        Self {
            interception_type,
            method: invocation.method,
            target: invocation.target,
            parameters: invocation.parameters,
            timer: invocation.timer,
            context_data: HashMap::new(),
            interceptors,
            position: 0,
            invocation: target_invocation,
            tracing,
        }
    }

    /// Continue with the next eligible interceptor, or invoke the target when
    /// none is left.
    ///
    /// Calling `proceed` again from the same interceptor replays the rest of
    /// the chain.
    pub fn proceed(&mut self) -> Result<Value> {
        let start = self.position;
        let interceptors = self.interceptors;
        while self.position < interceptors.len() {
            let interceptor = &interceptors[self.position];
            self.position += 1;
            if !interceptor.is_eligible(self.interception_type) {
                continue;
            }
            if self.tracing {
                trace!(
                    "==> {} {} [{}/{}]",
                    self.interception_type,
                    interceptor.interceptor_class(),
                    self.position,
                    interceptors.len()
                );
            }
            let result = interceptor.intercept(self.interception_type, self);
            self.position = start;
            return result;
        }

        if self.tracing {
            match self.method {
                Some(method) => trace!("==> {} target {}", self.interception_type, method),
                None => trace!("==> {} target", self.interception_type),
            }
        }
        let result = (self.invocation)(&self.parameters);
        self.position = start;
        result
    }

    pub fn interception_type(&self) -> InterceptionType {
        self.interception_type
    }

    /// The intercepted method; `None` for lifecycle callbacks.
    pub fn method(&self) -> Option<&'a Method> {
        self.method
    }

    pub fn target(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.target.as_ref()
    }

    /// The target instance downcast to its concrete type
    pub fn target_as<T: Any>(&self) -> Option<&T> {
        self.target.as_ref().and_then(|target| target.downcast_ref::<T>())
    }

    pub fn timer(&self) -> Option<&Value> {
        self.timer.as_ref()
    }

    pub fn get_parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Replace the parameters passed on to the target.
    ///
    /// Only business methods and constructors have parameters, and the new
    /// parameters must keep the arity.
    pub fn set_parameters(&mut self, parameters: Vec<Value>) -> Result<()> {
        let expected = match (self.method, self.interception_type) {
            (Some(method), _) => method.parameter_count(),
            (None, InterceptionType::AroundConstruct) => self.parameters.len(),
            (None, interception_type) => {
                return Err(InterceptionError::illegal_state(format!(
                    "Parameters cannot be set on a {} callback",
                    interception_type
                )))
            }
        };
        if parameters.len() != expected {
            return Err(InterceptionError::illegal_argument(format!(
                "Wrong number of parameters: expected {}, got {}",
                expected,
                parameters.len()
            )));
        }
        self.parameters = parameters;
        Ok(())
    }

    /// Data shared between the interceptors of this invocation
    pub fn context_data(&self) -> &HashMap<String, Value> {
        &self.context_data
    }

    pub fn context_data_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.context_data
    }
}
