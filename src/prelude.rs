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
pub use crate::config::{InterceptionConfig, LogLevel};
pub use crate::interceptor::{
    FnInterceptor, InterceptorChain, InterceptorHandle, InterceptorInvoker, InterceptorMetadata, Invocation,
    InvocationContext, LoggingInterceptor, TargetInvocation,
};
pub use crate::model::{InterceptionModel, InterceptionModelBuilder, ModelDescription};
pub use crate::proxy::{Proxies, Proxy};
pub use crate::registry::InterceptionModelRegistry;
pub use crate::tck::{Beans, BeansImpl};
pub use interception_core::{InterceptionError, InterceptionType, Method, MethodHolder, Result};
