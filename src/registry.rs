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
use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use interception_core::{InterceptionError, Result};
use tracing::debug;

use crate::model::{InterceptionModel, InterceptionModelBuilder};

/// Built interception models, one per intercepted entity.
pub struct InterceptionModelRegistry<T>
where
    T: Eq + Hash,
{
    models: DashMap<T, Arc<InterceptionModel<T>>>,
}

impl<T> Default for InterceptionModelRegistry<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InterceptionModelRegistry<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self { models: DashMap::new() }
    }

    /// Register a model under its intercepted entity, replacing any previous one
    pub fn register(&self, model: InterceptionModel<T>) -> Arc<InterceptionModel<T>> {
        let model = Arc::new(model);
        let entity = model.get_intercepted_entity().clone();
        debug!("Registering interception model for {}", std::any::type_name::<T>());
        self.models.insert(entity, model.clone());
        model
    }

    pub fn get(&self, entity: &T) -> Option<Arc<InterceptionModel<T>>> {
        self.models.get(entity).map(|model| model.value().clone())
    }

    /// Get the model of `entity`, building it on first use.
    ///
    /// `build` receives a fresh builder for `entity` and returns it populated.
    /// Concurrent callers for the same entity build it once. `build` must not
    /// call back into this registry. A builder for another entity is rejected
    /// and nothing is stored.
    pub fn get_or_build<F>(&self, entity: T, build: F) -> Result<Arc<InterceptionModel<T>>>
    where
        F: FnOnce(InterceptionModelBuilder<T>) -> InterceptionModelBuilder<T>,
    {
        if let Some(model) = self.get(&entity) {
            return Ok(model);
        }
        match self.models.entry(entity) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                debug!("Building interception model for {}", std::any::type_name::<T>());
                let builder = build(InterceptionModelBuilder::new(entry.key().clone()));
                if builder.intercepted_entity() != entry.key() {
                    return Err(InterceptionError::illegal_argument(format!(
                        "builder for a different {} handed back to the registry",
                        std::any::type_name::<T>()
                    )));
                }
                let model = Arc::new(builder.build());
                entry.insert(model.clone());
                Ok(model)
            }
        }
    }

    pub fn contains(&self, entity: &T) -> bool {
        self.models.contains_key(entity)
    }

    pub fn remove(&self, entity: &T) -> Option<Arc<InterceptionModel<T>>> {
        self.models.remove(entity).map(|(_, model)| model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn clear(&self) {
        self.models.clear()
    }
}
