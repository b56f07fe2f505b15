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
use indexmap::{IndexMap, IndexSet};
use interception_core::{InterceptionError, InterceptionType, Method, MethodHolder, Result};

use crate::interceptor::InterceptorHandle;
use crate::model::InterceptionModel;

/// Accumulates the interceptor associations of one intercepted entity.
///
/// Lists keep the order they are handed in. No reconciliation happens here or
/// in the model: callers supply consistent, already ordered metadata.
#[derive(Debug, Clone)]
pub struct InterceptionModelBuilder<T> {
    intercepted_entity: T,
    global_interceptors: IndexMap<InterceptionType, Vec<InterceptorHandle>>,
    method_bound_interceptors: IndexMap<InterceptionType, IndexMap<MethodHolder, Vec<InterceptorHandle>>>,
    methods_ignoring_global_interceptors: IndexSet<MethodHolder>,
    all_interceptors: IndexSet<InterceptorHandle>,
    has_target_class_interceptors: bool,
    has_external_non_constructor_interceptors: bool,
}

impl<T> InterceptionModelBuilder<T> {
    pub fn new(intercepted_entity: T) -> Self {
        Self {
            intercepted_entity,
            global_interceptors: IndexMap::new(),
            method_bound_interceptors: IndexMap::new(),
            methods_ignoring_global_interceptors: IndexSet::new(),
            all_interceptors: IndexSet::new(),
            has_target_class_interceptors: false,
            has_external_non_constructor_interceptors: false,
        }
    }

    /// Append class level interceptors for `interception_type`
    pub fn intercept_global<I>(mut self, interception_type: InterceptionType, interceptors: I) -> Self
    where
        I: IntoIterator<Item = InterceptorHandle>,
    {
        let interceptors = self.track(interception_type, interceptors);
        if !interceptors.is_empty() {
            self.global_interceptors
                .entry(interception_type)
                .or_default()
                .extend(interceptors);
        }
        self
    }

    /// Append interceptors bound to one business method.
    ///
    /// Lifecycle callbacks have no method, so they are rejected.
    pub fn intercept_method<I>(mut self, interception_type: InterceptionType, method: &Method, interceptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = InterceptorHandle>,
    {
        if interception_type.is_lifecycle_callback() {
            return Err(InterceptionError::illegal_argument(format!(
                "{} interceptors cannot be bound to method {}",
                interception_type,
                MethodHolder::of(method)
            )));
        }
        let interceptors = self.track(interception_type, interceptors);
        if !interceptors.is_empty() {
            self.method_bound_interceptors
                .entry(interception_type)
                .or_default()
                .entry(MethodHolder::of(method))
                .or_default()
                .extend(interceptors);
        }
        Ok(self)
    }

    /// Suppress the global interceptors for `method`
    pub fn ignore_global_interceptors(mut self, method: &Method) -> Self {
        self.methods_ignoring_global_interceptors.insert(MethodHolder::of(method));
        self
    }

    pub fn set_has_target_class_interceptors(mut self, value: bool) -> Self {
        self.has_target_class_interceptors = value;
        self
    }

    pub fn set_has_external_non_constructor_interceptors(mut self, value: bool) -> Self {
        self.has_external_non_constructor_interceptors = value;
        self
    }

    /// Record the interceptors in the full set and update the summary flags
    fn track<I>(&mut self, interception_type: InterceptionType, interceptors: I) -> Vec<InterceptorHandle>
    where
        I: IntoIterator<Item = InterceptorHandle>,
    {
        let interceptors: Vec<InterceptorHandle> = interceptors.into_iter().collect();
        for interceptor in &interceptors {
            if interceptor.is_target_class() {
                self.has_target_class_interceptors = true;
            } else if interception_type != InterceptionType::AroundConstruct {
                self.has_external_non_constructor_interceptors = true;
            }
            self.all_interceptors.insert(interceptor.clone());
        }
        interceptors
    }

    pub fn intercepted_entity(&self) -> &T {
        &self.intercepted_entity
    }

    pub fn has_target_class_interceptors(&self) -> bool {
        self.has_target_class_interceptors
    }

    pub fn has_external_non_constructor_interceptors(&self) -> bool {
        self.has_external_non_constructor_interceptors
    }

    pub fn global_interceptors(&self) -> &IndexMap<InterceptionType, Vec<InterceptorHandle>> {
        &self.global_interceptors
    }

    pub fn method_bound_interceptors(&self) -> &IndexMap<InterceptionType, IndexMap<MethodHolder, Vec<InterceptorHandle>>> {
        &self.method_bound_interceptors
    }

    pub fn methods_ignoring_global_interceptors(&self) -> &IndexSet<MethodHolder> {
        &self.methods_ignoring_global_interceptors
    }

    pub fn all_interceptors(&self) -> &IndexSet<InterceptorHandle> {
        &self.all_interceptors
    }
}

impl<T: Clone> InterceptionModelBuilder<T> {
    /// Snapshot the builder into an immutable model. The builder stays usable
    /// and later changes to it do not reach the model.
    pub fn build(&self) -> InterceptionModel<T> {
        InterceptionModel::new(self)
    }
}
