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

use serde::{Deserialize, Serialize};

use crate::InterceptionError;

/// Interception type
///
/// Lifecycle callbacks fire once per instance event and carry no business
/// method. `AroundInvoke` and `AroundTimeout` wrap a single method call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InterceptionType {
    // Method scoped
    AroundInvoke,
    AroundTimeout,
    // Lifecycle
    AroundConstruct,
    PostConstruct,
    PreDestroy,
    PostActivate,
    PrePassivate,
}

impl InterceptionType {
    const ALL: [InterceptionType; 7] = [
        InterceptionType::AroundInvoke,
        InterceptionType::AroundTimeout,
        InterceptionType::AroundConstruct,
        InterceptionType::PostConstruct,
        InterceptionType::PreDestroy,
        InterceptionType::PostActivate,
        InterceptionType::PrePassivate,
    ];

    /// All interception types, method scoped first.
    pub fn values() -> &'static [InterceptionType] {
        &Self::ALL
    }

    /// Whether this type is a lifecycle callback, i.e. has no associated method.
    pub fn is_lifecycle_callback(&self) -> bool {
        !matches!(self, InterceptionType::AroundInvoke | InterceptionType::AroundTimeout)
    }

    /// Simple name of the annotation declaring an interceptor method of this type
    pub fn annotation_name(&self) -> &'static str {
        match self {
            InterceptionType::AroundInvoke => "AroundInvoke",
            InterceptionType::AroundTimeout => "AroundTimeout",
            InterceptionType::AroundConstruct => "AroundConstruct",
            InterceptionType::PostConstruct => "PostConstruct",
            InterceptionType::PreDestroy => "PreDestroy",
            InterceptionType::PostActivate => "PostActivate",
            InterceptionType::PrePassivate => "PrePassivate",
        }
    }
}

impl fmt::Display for InterceptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.annotation_name())
    }
}

impl FromStr for InterceptionType {
    type Err = InterceptionError;

    /// Accepts the annotation name, with or without `@`, in any case and with
    /// or without underscores (`AroundInvoke`, `@PostConstruct`, `pre_destroy`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_start_matches('@')
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .find(|t| t.annotation_name().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| InterceptionError::illegal_argument(format!("Unknown interception type: {}", s)))
    }
}
