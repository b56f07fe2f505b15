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
use std::hash::Hasher;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use crate::InterceptionError;

/// `Declaring#name(P1,P2)`
static DESCRIPTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^#\s()]+)#([^#\s()]+)\(([^()]*)\)\s*$").expect("valid descriptor pattern")
});

/// A business method of an intercepted entity, as seen by the invocation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    declaring_class: String,
    name: String,
    parameter_types: Vec<String>,
    return_type: String,
}

impl Method {
    pub fn new<D, N, I, P>(declaring_class: D, name: N, parameter_types: I) -> Self
    where
        D: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            declaring_class: declaring_class.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            return_type: "void".to_string(),
        }
    }

    /// Set the return type (defaults to `void`)
    pub fn returns<R: Into<String>>(mut self, return_type: R) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.return_type, MethodHolder::of(self))
    }
}

/// Value identity of a method: declaring type, name and parameter types.
///
/// Two holders built from different [`Method`] handles of the same method are
/// equal and hash alike, so a holder can key maps that outlive the handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodHolder {
    declaring_class: String,
    name: String,
    parameter_types: Vec<String>,
}

impl MethodHolder {
    pub fn of(method: &Method) -> Self {
        Self {
            declaring_class: method.declaring_class.clone(),
            name: method.name.clone(),
            parameter_types: method.parameter_types.clone(),
        }
    }

    pub fn new<D, N, I, P>(declaring_class: D, name: N, parameter_types: I) -> Self
    where
        D: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            declaring_class: declaring_class.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Whether `method` denotes the same method as this holder
    pub fn matches(&self, method: &Method) -> bool {
        self.declaring_class == method.declaring_class
            && self.name == method.name
            && self.parameter_types == method.parameter_types
    }

    /// xxHash64 of the descriptor parts, stable across processes and builds.
    ///
    /// Every part is length-prefixed (little endian), so names containing
    /// `#` or `,` cannot collide with a differently split holder.
    pub fn fingerprint(&self) -> u64 {
        fn write_part(hasher: &mut XxHash64, part: &str) {
            hasher.write(&(part.len() as u64).to_le_bytes());
            hasher.write(part.as_bytes());
        }

        let mut hasher = XxHash64::with_seed(0);
        write_part(&mut hasher, &self.declaring_class);
        write_part(&mut hasher, &self.name);
        hasher.write(&(self.parameter_types.len() as u64).to_le_bytes());
        for parameter in &self.parameter_types {
            write_part(&mut hasher, parameter);
        }
        hasher.finish()
    }
}

impl From<&Method> for MethodHolder {
    fn from(method: &Method) -> Self {
        MethodHolder::of(method)
    }
}

impl fmt::Display for MethodHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({})", self.declaring_class, self.name, self.parameter_types.join(","))
    }
}

impl FromStr for MethodHolder {
    type Err = InterceptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DESCRIPTOR_PATTERN
            .captures(s)
            .ok_or_else(|| InterceptionError::invalid_descriptor(s))?;
        let parameters = captures[3].trim();
        let parameter_types: Vec<String> = if parameters.is_empty() {
            Vec::new()
        } else {
            parameters.split(',').map(|p| p.trim().to_string()).collect()
        };
        if parameter_types.iter().any(|p| p.is_empty()) {
            return Err(InterceptionError::invalid_descriptor(s));
        }
        Ok(Self {
            declaring_class: captures[1].to_string(),
            name: captures[2].to_string(),
            parameter_types,
        })
    }
}
