// Copyright (c) 2021 akita contributors
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! This crate offers:
//!
//! *   An immutable interception model per intercepted bean class: which
//!     interceptors fire, and in which order, for lifecycle callbacks and
//!     business methods;
//! *   Interceptor chains that run a resolved interceptor list around a call.
//!
//! Features:
//!
//! *   Global and method bound interceptors, with per method opt-out of the
//!     global ones;
//! *   Dedicated `@AroundConstruct` lookup;
//! *   A concurrent registry of built models and proxy detection.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! interception = "0.1.0"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use interception::prelude::*;
//! use serde_json::json;
//!
//! let audit = FnInterceptor::new("com.acme.Audit")
//!     .around_invoke(|ctx| ctx.proceed())
//!     .into_handle();
//! let greet = Method::new("com.acme.Greeter", "greet", ["java.lang.String"]);
//!
//! let model = InterceptionModelBuilder::new("com.acme.Greeter")
//!     .intercept_global(InterceptionType::AroundInvoke, vec![audit])
//!     .build();
//! assert_eq!(model.get_interceptors(InterceptionType::AroundInvoke, Some(&greet)).unwrap().len(), 1);
//!
//! let invoker = InterceptorInvoker::new(Arc::new(model));
//! let result = invoker
//!     .invoke(Invocation::of(&greet).with_parameters(vec![json!("Jack")]), &|params| {
//!         Ok(json!(format!("Hello, {}", params[0].as_str().unwrap_or_default())))
//!     })
//!     .unwrap();
//! assert_eq!(result, json!("Hello, Jack"));
//! ```
mod config;
mod interceptor;
mod model;
mod proxy;
mod registry;
pub mod prelude;
pub mod tck;

#[doc(inline)]
pub use config::{InterceptionConfig, LogLevel};
#[doc(inline)]
pub use interceptor::*;
#[doc(inline)]
pub use model::*;
#[doc(inline)]
pub use proxy::{Proxies, Proxy};
#[doc(inline)]
pub use registry::InterceptionModelRegistry;
#[doc(inline)]
pub use interception_core::{InterceptionError, InterceptionType, Method, MethodHolder, Result};
