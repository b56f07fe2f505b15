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
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use interception_core::{InterceptionType, Method, Result};
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;

use crate::interceptor::{InterceptorInvoker, Invocation};

/// Concrete types known to be interception proxies
static PROXY_TYPES: Lazy<DashMap<TypeId, &'static str>> = Lazy::new(DashMap::new);

/// Proxy detection.
pub struct Proxies;

impl Proxies {
    /// Whether `instance` is an interception proxy. `None` and ordinary
    /// objects are not.
    ///
    /// The check uses the concrete type behind `instance`, so pass the proxy
    /// itself rather than a smart pointer to it.
    pub fn is_proxy(instance: Option<&dyn Any>) -> bool {
        instance.map_or(false, |instance| Self::is_proxy_type(instance.type_id()))
    }

    pub fn is_proxy_type(type_id: TypeId) -> bool {
        PROXY_TYPES.contains_key(&type_id)
    }

    /// Mark `P` as a proxy type, for proxies generated outside this crate
    pub fn register_proxy_type<P: Any>() {
        let type_id = TypeId::of::<P>();
        if !PROXY_TYPES.contains_key(&type_id) {
            debug!("Registering proxy type {}", type_name::<P>());
            PROXY_TYPES.insert(type_id, type_name::<P>());
        }
    }

    /// Names of the registered proxy types
    pub fn registered_proxy_types() -> Vec<&'static str> {
        PROXY_TYPES.iter().map(|entry| *entry.value()).collect()
    }
}

/// An intercepted instance: calls made through the proxy run the
/// interceptors resolved from its model before reaching the instance.
pub struct Proxy<T, E>
where
    T: Send + Sync + 'static,
    E: 'static,
{
    target: Arc<T>,
    invoker: InterceptorInvoker<E>,
}

impl<T, E> Proxy<T, E>
where
    T: Send + Sync + 'static,
    E: 'static,
{
    pub fn new(target: T, invoker: InterceptorInvoker<E>) -> Self {
        Proxies::register_proxy_type::<Self>();
        Self {
            target: Arc::new(target),
            invoker,
        }
    }

    /// Construct the instance through the `@AroundConstruct` interceptors,
    /// then fire `@PostConstruct`.
    pub fn instantiate<F>(invoker: InterceptorInvoker<E>, parameters: Vec<Value>, constructor: F) -> Result<Self>
    where
        F: Fn(&[Value]) -> Result<T>,
    {
        let target = invoker.construct(parameters, constructor)?;
        let proxy = Self::new(target, invoker);
        proxy.lifecycle(InterceptionType::PostConstruct, |_| Ok(()))?;
        Ok(proxy)
    }

    /// Call a business method through its `@AroundInvoke` interceptors
    pub fn call<F>(&self, method: &Method, parameters: Vec<Value>, body: F) -> Result<Value>
    where
        F: Fn(&T, &[Value]) -> Result<Value>,
    {
        let invocation = Invocation::of(method)
            .with_target(self.target.clone())
            .with_parameters(parameters);
        self.invoker
            .invoke(invocation, &|parameters| body(&*self.target, parameters))
    }

    /// Call a timeout method through its `@AroundTimeout` interceptors
    pub fn timeout<F>(&self, method: &Method, timer: Value, body: F) -> Result<Value>
    where
        F: Fn(&T, &Value) -> Result<Value>,
    {
        let invocation = Invocation::of(method)
            .with_target(self.target.clone())
            .with_timer(timer.clone());
        self.invoker
            .invoke_timeout(invocation, &|_| body(&*self.target, &timer))
    }

    /// Fire a lifecycle callback, ending in `callback` on the instance
    pub fn lifecycle<F>(&self, interception_type: InterceptionType, callback: F) -> Result<()>
    where
        F: Fn(&T) -> Result<()>,
    {
        let target: Arc<dyn Any + Send + Sync> = self.target.clone();
        self.invoker
            .invoke_lifecycle(interception_type, Some(target), &|| callback(&*self.target))
    }

    /// Fire `@PreDestroy`
    pub fn destroy(&self) -> Result<()> {
        self.lifecycle(InterceptionType::PreDestroy, |_| Ok(()))
    }

    /// The proxied instance, bypassing interception
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    pub fn invoker(&self) -> &InterceptorInvoker<E> {
        &self.invoker
    }
}
