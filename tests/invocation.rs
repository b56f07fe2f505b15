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
//! Interceptor chains driven by an interception model.
//!
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use interception::prelude::*;
use interception::tck::{Beans, BeansImpl};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Account {
    balance: AtomicI64,
}

impl Account {
    fn new(opening: i64) -> Self {
        Self {
            balance: AtomicI64::new(opening),
        }
    }

    fn deposit(&self, amount: i64) -> i64 {
        self.balance.fetch_add(amount, Ordering::SeqCst) + amount
    }
}

type Journal = Arc<Mutex<Vec<String>>>;

fn journaling(class: &str, journal: &Journal) -> InterceptorHandle {
    let name = class.to_string();
    let around = journal.clone();
    let post_construct = journal.clone();
    let pre_destroy = journal.clone();
    let post_name = name.clone();
    let destroy_name = name.clone();
    FnInterceptor::new(class)
        .around_invoke(move |ctx| {
            around.lock().unwrap().push(format!("{}>{}", name, ctx.method().map(|m| m.name()).unwrap_or("?")));
            let result = ctx.proceed();
            around.lock().unwrap().push(format!("{}<", name));
            result
        })
        .post_construct(move |ctx| {
            post_construct.lock().unwrap().push(format!("{}:post-construct", post_name));
            ctx.proceed()
        })
        .pre_destroy(move |ctx| {
            pre_destroy.lock().unwrap().push(format!("{}:pre-destroy", destroy_name));
            ctx.proceed()
        })
        .into_handle()
}

fn deposit_method() -> Method {
    Method::new("com.acme.Account", "deposit", ["long"]).returns("long")
}

fn invoker(builder: InterceptionModelBuilder<&'static str>) -> InterceptorInvoker<&'static str> {
    InterceptorInvoker::with_config(Arc::new(builder.build()), InterceptionConfig::development())
}

#[test]
fn business_method_runs_global_then_bound_interceptors() {
    init_tracing();
    let journal: Journal = Arc::default();
    let deposit = deposit_method();
    let logging = InterceptionConfig::development().logging_interceptor();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(
            InterceptionType::AroundInvoke,
            vec![logging, journaling("Audit", &journal), journaling("Tx", &journal)],
        )
        .intercept_method(InterceptionType::AroundInvoke, &deposit, vec![journaling("Limit", &journal)])
        .unwrap();
    let proxy = Proxy::new(Account::new(100), invoker(builder));

    let balance = proxy
        .call(&deposit, vec![json!(50)], |account, params| {
            Ok(json!(account.deposit(params[0].as_i64().unwrap_or_default())))
        })
        .unwrap();

    assert_eq!(balance, json!(150));
    assert_eq!(
        *journal.lock().unwrap(),
        vec!["Audit>deposit", "Tx>deposit", "Limit>deposit", "Limit<", "Tx<", "Audit<"]
    );
}

#[test]
fn interceptor_can_rewrite_parameters_and_result() {
    let deposit = deposit_method();
    let doubling = FnInterceptor::new("Doubling")
        .around_invoke(|ctx| {
            let amount = ctx.get_parameters()[0].as_i64().unwrap_or_default();
            ctx.set_parameters(vec![json!(amount * 2)])?;
            ctx.context_data_mut().insert("doubled".to_string(), json!(true));
            let result = ctx.proceed()?;
            Ok(json!({ "balance": result, "doubled": ctx.context_data()["doubled"] }))
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundInvoke, vec![doubling]);
    let proxy = Proxy::new(Account::new(0), invoker(builder));

    let result = proxy
        .call(&deposit, vec![json!(21)], |account, params| {
            Ok(json!(account.deposit(params[0].as_i64().unwrap_or_default())))
        })
        .unwrap();
    assert_eq!(result, json!({ "balance": 42, "doubled": true }));
}

#[test]
fn parameter_arity_is_enforced() {
    let deposit = deposit_method();
    let broken = FnInterceptor::new("Broken")
        .around_invoke(|ctx| {
            ctx.set_parameters(vec![json!(1), json!(2)])?;
            ctx.proceed()
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundInvoke, vec![broken]);
    let proxy = Proxy::new(Account::new(0), invoker(builder));

    let err = proxy
        .call(&deposit, vec![json!(1)], |_, _| Ok(Value::Null))
        .unwrap_err();
    assert!(matches!(err, InterceptionError::IllegalArgument(_)));
    assert_eq!(proxy.target().balance.load(Ordering::SeqCst), 0);
}

#[test]
fn interceptor_without_proceed_short_circuits() {
    let deposit = deposit_method();
    let security = FnInterceptor::new("Security")
        .around_invoke(|ctx| {
            let caller_is_trusted = ctx
                .target_as::<Account>()
                .map(|account| account.balance.load(Ordering::SeqCst) > 0)
                .unwrap_or(false);
            if caller_is_trusted {
                ctx.proceed()
            } else {
                Err(InterceptionError::interceptor_error("Security", "account frozen"))
            }
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundInvoke, vec![security]);
    let proxy = Proxy::new(Account::new(0), invoker(builder));

    let err = proxy
        .call(&deposit, vec![json!(10)], |account, params| {
            Ok(json!(account.deposit(params[0].as_i64().unwrap_or_default())))
        })
        .unwrap_err();
    assert_eq!(err, InterceptionError::interceptor_error("Security", "account frozen"));
    assert_eq!(proxy.target().balance.load(Ordering::SeqCst), 0);
}

#[test]
fn ignored_globals_do_not_run() {
    let journal: Journal = Arc::default();
    let deposit = deposit_method();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundInvoke, vec![journaling("Audit", &journal)])
        .ignore_global_interceptors(&deposit);
    let proxy = Proxy::new(Account::new(1), invoker(builder));

    proxy
        .call(&deposit, vec![json!(1)], |account, params| {
            Ok(json!(account.deposit(params[0].as_i64().unwrap_or_default())))
        })
        .unwrap();
    assert!(journal.lock().unwrap().is_empty());
}

#[test]
fn lifecycle_and_construction() {
    let journal: Journal = Arc::default();
    let constructed = journal.clone();
    let constructor_interceptor = FnInterceptor::new("Ctor")
        .around_construct(move |ctx| {
            constructed.lock().unwrap().push("Ctor:around-construct".to_string());
            ctx.proceed()
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundConstruct, vec![constructor_interceptor])
        .intercept_global(InterceptionType::PostConstruct, vec![journaling("Audit", &journal)])
        .intercept_global(InterceptionType::PreDestroy, vec![journaling("Audit", &journal)]);
    let invoker = invoker(builder);
    assert!(invoker.model().has_external_constructor_interceptors());

    let proxy = Proxy::instantiate(invoker, vec![json!(7)], |params| {
        Ok(Account::new(params[0].as_i64().unwrap_or_default()))
    })
    .unwrap();
    assert_eq!(proxy.target().balance.load(Ordering::SeqCst), 7);

    proxy.destroy().unwrap();
    assert_eq!(
        *journal.lock().unwrap(),
        vec!["Ctor:around-construct", "Audit:post-construct", "Audit:pre-destroy"]
    );
}

#[test]
fn lifecycle_callbacks_cannot_set_parameters() {
    let meddling = FnInterceptor::new("Meddling")
        .post_construct(|ctx| {
            ctx.set_parameters(Vec::new())?;
            ctx.proceed()
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::PostConstruct, vec![meddling]);
    let proxy = Proxy::new(Account::new(0), invoker(builder));
    let err = proxy.lifecycle(InterceptionType::PostConstruct, |_| Ok(())).unwrap_err();
    assert!(matches!(err, InterceptionError::IllegalState(_)));
}

#[test]
fn timeouts_run_their_own_chain() {
    let expire = Method::new("com.acme.Account", "expire", ["javax.ejb.Timer"]);
    let timer_seen = Arc::new(Mutex::new(None));
    let seen = timer_seen.clone();
    let watcher = FnInterceptor::new("Watcher")
        .around_timeout(move |ctx| {
            *seen.lock().unwrap() = ctx.timer().cloned();
            ctx.proceed()
        })
        .into_handle();
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_method(InterceptionType::AroundTimeout, &expire, vec![watcher])
        .unwrap();
    let proxy = Proxy::new(Account::new(0), invoker(builder));

    let result = proxy
        .timeout(&expire, json!({ "id": 3 }), |_, timer| Ok(timer["id"].clone()))
        .unwrap();
    assert_eq!(result, json!(3));
    assert_eq!(*timer_seen.lock().unwrap(), Some(json!({ "id": 3 })));

    // no around-invoke interceptors apply to the timeout method
    let plain = proxy.call(&expire, vec![json!(null)], |_, _| Ok(json!("called"))).unwrap();
    assert_eq!(plain, json!("called"));
}

#[test]
fn proceeding_twice_replays_the_rest_of_the_chain() {
    let calls = Arc::new(AtomicI64::new(0));
    let counted = calls.clone();
    let retry = FnInterceptor::new("Retry")
        .around_invoke(|ctx| match ctx.proceed() {
            Ok(value) => Ok(value),
            Err(_) => ctx.proceed(),
        })
        .into_handle();
    let method = Method::new("com.acme.Account", "flaky", Vec::<String>::new());
    let builder = InterceptionModelBuilder::new("com.acme.Account")
        .intercept_global(InterceptionType::AroundInvoke, vec![retry, LoggingInterceptor::new().into_handle()]);
    let proxy = Proxy::new(Account::new(0), invoker(builder));

    let result = proxy
        .call(&method, Vec::new(), move |_, _| {
            if counted.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(InterceptionError::target_error("first call fails"))
            } else {
                Ok(json!("ok"))
            }
        })
        .unwrap();
    assert_eq!(result, json!("ok"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn beans_adapter_detects_proxies() {
    let beans = BeansImpl;
    let proxy = Proxy::new(Account::new(0), invoker(InterceptionModelBuilder::new("com.acme.Account")));
    assert!(beans.is_proxy(Some(&proxy)));
    assert!(!beans.is_proxy(Some(proxy.target().as_ref())));
    assert!(!beans.is_proxy(Some(&"plain string")));
    assert!(!beans.is_proxy(None));
}
