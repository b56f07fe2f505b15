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

use indexmap::{IndexMap, IndexSet};
use interception_core::{InterceptionError, InterceptionType, Method, MethodHolder, Result};
use serde::Serialize;
use tracing::debug;

use crate::interceptor::InterceptorHandle;
use crate::model::InterceptionModelBuilder;

/// Which interceptors fire, in which order, for each lifecycle event and
/// business method of one intercepted entity.
///
/// Immutable once built: every query is a pure read, so a model can be shared
/// across threads without locking.
#[derive(Debug, Clone)]
pub struct InterceptionModel<T> {
    global_interceptors: IndexMap<InterceptionType, Vec<InterceptorHandle>>,
    method_bound_interceptors: IndexMap<InterceptionType, IndexMap<MethodHolder, Vec<InterceptorHandle>>>,
    methods_ignoring_global_interceptors: IndexSet<MethodHolder>,
    all_interceptors: IndexSet<InterceptorHandle>,
    intercepted_entity: T,
    has_target_class_interceptors: bool,
    has_external_non_constructor_interceptors: bool,
}

impl<T: Clone> InterceptionModel<T> {
    pub fn new(builder: &InterceptionModelBuilder<T>) -> Self {
        let method_bound_interceptors: IndexMap<_, IndexMap<_, _>> = builder
            .method_bound_interceptors()
            .iter()
            .filter(|(_, methods)| !methods.is_empty())
            .map(|(interception_type, methods)| (*interception_type, methods.clone()))
            .collect();
        let model = Self {
            global_interceptors: builder.global_interceptors().clone(),
            method_bound_interceptors,
            methods_ignoring_global_interceptors: builder.methods_ignoring_global_interceptors().clone(),
            all_interceptors: builder.all_interceptors().clone(),
            intercepted_entity: builder.intercepted_entity().clone(),
            has_target_class_interceptors: builder.has_target_class_interceptors(),
            has_external_non_constructor_interceptors: builder.has_external_non_constructor_interceptors(),
        };
        debug!(
            "Built interception model for {}: {} interceptors, {} global types, {} method bound types",
            std::any::type_name::<T>(),
            model.all_interceptors.len(),
            model.global_interceptors.len(),
            model.method_bound_interceptors.len()
        );
        model
    }
}

impl<T> InterceptionModel<T> {
    /// Interceptors to run for `interception_type`, outermost first.
    ///
    /// Lifecycle callbacks take no method. `@AroundInvoke` and
    /// `@AroundTimeout` require one and get the global interceptors (unless
    /// the method ignores them) followed by the ones bound to that method.
    /// `@AroundConstruct` must go through
    /// [`get_constructor_invocation_interceptors`](Self::get_constructor_invocation_interceptors).
    pub fn get_interceptors(&self, interception_type: InterceptionType, method: Option<&Method>) -> Result<Vec<InterceptorHandle>> {
        if interception_type == InterceptionType::AroundConstruct {
            return Err(InterceptionError::illegal_state(
                "Cannot use get_interceptors() for @AroundConstruct interceptor lookup. Use get_constructor_invocation_interceptors() instead.",
            ));
        }

        match (interception_type.is_lifecycle_callback(), method) {
            (true, Some(_)) => Err(InterceptionError::illegal_argument(
                "On a lifecycle callback, the associated method must be None",
            )),
            (false, None) => Err(InterceptionError::illegal_argument(
                "Around-invoke and around-timeout interceptors are defined for a given method",
            )),
            (true, None) => Ok(self.global(interception_type).to_vec()),
            (false, Some(method)) => {
                let holder = MethodHolder::of(method);
                let mut interceptors = Vec::new();
                if !self.methods_ignoring_global_interceptors.contains(&holder) {
                    interceptors.extend_from_slice(self.global(interception_type));
                }
                if let Some(bound) = self
                    .method_bound_interceptors
                    .get(&interception_type)
                    .and_then(|methods| methods.get(&holder))
                {
                    interceptors.extend_from_slice(bound);
                }
                Ok(interceptors)
            }
        }
    }

    fn global(&self, interception_type: InterceptionType) -> &[InterceptorHandle] {
        self.global_interceptors
            .get(&interception_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every interceptor referenced by this model, each once
    pub fn get_all_interceptors(&self) -> &IndexSet<InterceptorHandle> {
        &self.all_interceptors
    }

    pub fn get_intercepted_entity(&self) -> &T {
        &self.intercepted_entity
    }

    /// The `@AroundConstruct` interceptors, outermost first
    pub fn get_constructor_invocation_interceptors(&self) -> Vec<InterceptorHandle> {
        self.global(InterceptionType::AroundConstruct).to_vec()
    }

    pub fn has_external_constructor_interceptors(&self) -> bool {
        !self.global(InterceptionType::AroundConstruct).is_empty()
    }

    pub fn has_external_non_constructor_interceptors(&self) -> bool {
        self.has_external_non_constructor_interceptors
    }

    pub fn has_target_class_interceptors(&self) -> bool {
        self.has_target_class_interceptors
    }

    /// Whether no interceptor applies anywhere
    pub fn is_empty(&self) -> bool {
        self.all_interceptors.is_empty()
    }

    /// Serializable summary, for diagnostics
    pub fn describe(&self) -> ModelDescription
    where
        T: fmt::Display,
    {
        ModelDescription {
            intercepted_entity: self.intercepted_entity.to_string(),
            global_interceptors: self
                .global_interceptors
                .iter()
                .map(|(interception_type, interceptors)| (*interception_type, class_names(interceptors)))
                .collect(),
            method_bound_interceptors: self
                .method_bound_interceptors
                .iter()
                .map(|(interception_type, methods)| {
                    let methods = methods
                        .iter()
                        .map(|(method, interceptors)| (method.to_string(), class_names(interceptors)))
                        .collect();
                    (*interception_type, methods)
                })
                .collect(),
            methods_ignoring_global_interceptors: self
                .methods_ignoring_global_interceptors
                .iter()
                .map(MethodHolder::to_string)
                .collect(),
            all_interceptors: self.all_interceptors.iter().map(|i| i.interceptor_class().to_string()).collect(),
            has_target_class_interceptors: self.has_target_class_interceptors,
            has_external_constructor_interceptors: self.has_external_constructor_interceptors(),
            has_external_non_constructor_interceptors: self.has_external_non_constructor_interceptors,
        }
    }
}

fn class_names(interceptors: &[InterceptorHandle]) -> Vec<String> {
    interceptors.iter().map(|i| i.interceptor_class().to_string()).collect()
}

/// Snapshot of an [`InterceptionModel`] with interceptors named by class and
/// methods by descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescription {
    pub intercepted_entity: String,
    pub global_interceptors: IndexMap<InterceptionType, Vec<String>>,
    pub method_bound_interceptors: IndexMap<InterceptionType, IndexMap<String, Vec<String>>>,
    pub methods_ignoring_global_interceptors: Vec<String>,
    pub all_interceptors: Vec<String>,
    pub has_target_class_interceptors: bool,
    pub has_external_constructor_interceptors: bool,
    pub has_external_non_constructor_interceptors: bool,
}
