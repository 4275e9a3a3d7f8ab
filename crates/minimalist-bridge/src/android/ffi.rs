// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points for `com.example.minimalist_app.NativeBridge`.
//
// The Kotlin side registers one `MethodChannel` per channel identifier and
// forwards every call as `nativeHandle(channel, method, argumentsJson)`,
// decoding the JSON reply into `result.success`, `result.error` or
// `result.notImplemented`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::BridgeConfig;

use crate::channel::{ChannelRouter, Reply};
use crate::logging;

static ROUTER: OnceLock<ChannelRouter> = OnceLock::new();

fn read_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Result<String> {
    if value.is_null() {
        return Ok(String::new());
    }
    env.get_string(value)
        .map(String::from)
        .map_err(|e| BridgeError::Platform(format!("get_string: {e}")))
}

fn init(env: &mut JNIEnv<'_>, context: &JObject<'_>, config_json: &JString<'_>) -> Result<()> {
    let json = read_string(env, config_json)?;
    let config = crate::configure(&json)?;

    super::attach_host(env, context)?;
    let router = ROUTER.get_or_init(|| crate::router(config));
    tracing::info!(platform = router.platform_name(), "bridge ready");
    Ok(())
}

fn handle(
    env: &mut JNIEnv<'_>,
    channel: &JString<'_>,
    method: &JString<'_>,
    arguments: &JString<'_>,
) -> String {
    let Some(router) = ROUTER.get() else {
        return Reply::from(BridgeError::Unavailable("bridge not initialised".into())).to_json();
    };

    let strings = read_string(env, channel).and_then(|channel| {
        Ok((channel, read_string(env, method)?, read_string(env, arguments)?))
    });
    match strings {
        Ok((channel, method, arguments)) => router.handle_json(&channel, &method, &arguments),
        Err(e) => Reply::from(e).to_json(),
    }
}

/// `static native boolean nativeInit(Context context, String configJson)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_minimalist_1app_NativeBridge_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    config_json: JString<'local>,
) -> jboolean {
    match init(&mut env, &context, &config_json) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            // No-op unless the config string itself could not be read.
            logging::init(&BridgeConfig::default().log_filter);
            tracing::error!(error = %e, "bridge initialisation failed");
            JNI_FALSE
        }
    }
}

/// `static native String nativeHandle(String channel, String method, String argumentsJson)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_minimalist_1app_NativeBridge_nativeHandle<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    channel: JString<'local>,
    method: JString<'local>,
    arguments: JString<'local>,
) -> jstring {
    let reply = panic::catch_unwind(AssertUnwindSafe(|| {
        handle(&mut env, &channel, &method, &arguments)
    }))
    .unwrap_or_else(|_| {
        tracing::error!("panic while handling channel call");
        Reply::from(BridgeError::Failed("internal bridge error".into())).to_json()
    });

    match env.new_string(reply) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            tracing::error!(error = %e, "failed to allocate reply string");
            std::ptr::null_mut()
        }
    }
}
