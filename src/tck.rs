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
//!
//! Conformance test kit adapter.
//!
use std::any::Any;

use crate::proxy::Proxies;

/// Bean queries the conformance test kit needs from the container.
pub trait Beans {
    fn is_proxy(&self, instance: Option<&dyn Any>) -> bool;
}

/// [`Beans`] backed by this crate's proxies.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeansImpl;

impl Beans for BeansImpl {
    fn is_proxy(&self, instance: Option<&dyn Any>) -> bool {
        Proxies::is_proxy(instance)
    }
}
