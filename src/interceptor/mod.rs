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
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use interception_core::{InterceptionType, Result};
use serde_json::Value;

mod chain;
mod context;
mod function;
mod logging;

pub use chain::*;
pub use context::*;
pub use function::*;
pub use logging::*;

/// Descriptor of one interceptor: its identity and its invocation entry point.
///
/// Concrete variants come from whatever resolves interceptor metadata; this
/// crate only orders them and drives [`InterceptorMetadata::intercept`].
pub trait InterceptorMetadata: Send + Sync {
    /// Identity of the interceptor class. Two metadata with the same class are
    /// the same interceptor.
    fn interceptor_class(&self) -> &str;

    /// Whether this interceptor declares an interceptor method for the type
    fn is_eligible(&self, interception_type: InterceptionType) -> bool;

    /// Run the interceptor method for `interception_type`. Implementations
    /// call [`InvocationContext::proceed`] to continue the chain.
    fn intercept(&self, interception_type: InterceptionType, ctx: &mut InvocationContext<'_>) -> Result<Value>;

    /// Whether the intercepted class itself declares this interceptor method
    fn is_target_class(&self) -> bool {
        false
    }
}

/// Shared, cheaply cloned reference to an [`InterceptorMetadata`].
///
/// Equality and hashing follow [`InterceptorMetadata::interceptor_class`].
#[derive(Clone)]
pub struct InterceptorHandle(Arc<dyn InterceptorMetadata>);

impl InterceptorHandle {
    pub fn new<I>(interceptor: I) -> Self
    where
        I: InterceptorMetadata + 'static,
    {
        Self(Arc::new(interceptor))
    }

    pub fn inner(&self) -> &Arc<dyn InterceptorMetadata> {
        &self.0
    }
}

impl From<Arc<dyn InterceptorMetadata>> for InterceptorHandle {
    fn from(interceptor: Arc<dyn InterceptorMetadata>) -> Self {
        Self(interceptor)
    }
}

impl Deref for InterceptorHandle {
    type Target = dyn InterceptorMetadata;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for InterceptorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.interceptor_class() == other.interceptor_class()
    }
}

impl Eq for InterceptorHandle {}

impl Hash for InterceptorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.interceptor_class().hash(state)
    }
}

impl fmt::Debug for InterceptorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorHandle")
            .field("interceptor_class", &self.interceptor_class())
            .field("target_class", &self.is_target_class())
            .finish()
    }
}

impl fmt::Display for InterceptorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interceptor_class())
    }
}
