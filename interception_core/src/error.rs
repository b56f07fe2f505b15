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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InterceptionError>;

/// Errors raised while resolving or running interceptors.
///
/// Lookup errors are precondition violations of the caller and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptionError {
    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Interceptor chain too deep: {depth} interceptors, at most {max} allowed")]
    ChainTooDeep { depth: usize, max: usize },

    #[error("Interceptor '{interceptor}' failed: {message}")]
    Interceptor { interceptor: String, message: String },

    #[error("Target invocation failed: {0}")]
    Target(String),

    #[error("Invalid method descriptor: {0}")]
    InvalidDescriptor(String),
}

impl InterceptionError {
    pub fn illegal_state<T: Into<String>>(message: T) -> Self {
        Self::IllegalState(message.into())
    }

    pub fn illegal_argument<T: Into<String>>(message: T) -> Self {
        Self::IllegalArgument(message.into())
    }

    pub fn interceptor_error<T: Into<String>, E: Into<String>>(interceptor: T, message: E) -> Self {
        let interceptor = interceptor.into();
        let message = message.into();
        Self::Interceptor { interceptor, message }
    }

    pub fn target_error<T: Into<String>>(message: T) -> Self {
        Self::Target(message.into())
    }

    pub fn invalid_descriptor<T: Into<String>>(descriptor: T) -> Self {
        Self::InvalidDescriptor(descriptor.into())
    }

    /// Whether this error reports a misuse of the lookup API
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::IllegalState(_) | Self::IllegalArgument(_))
    }
}
