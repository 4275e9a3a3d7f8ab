// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Targets `aarch64-linux-android` / `armv7-linux-androideabi`. Each trait
// method invokes the corresponding Android API through JNI calls into the
// ART runtime, using the host `Context` recorded by `NativeBridge.nativeInit`
// (see `ffi`).
//
// ## Exceptions
//
// A Java exception thrown by any call is taken and cleared before the
// `jni::errors::Error::JavaException` is turned into `BridgeError::Platform`
// with the exception's `toString()`. Nothing returns to Java with an
// exception still pending.

#![cfg(target_os = "android")]

pub mod ffi;

use std::sync::OnceLock;

use jni::objects::{GlobalRef, JObject, JString, JThrowable, JValue};
use jni::{JNIEnv, JavaVM};

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{AppOpsMode, UsageInterval, UsageSample};

use crate::intent::{Intent, FLAG_ACTIVITY_NEW_TASK};
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `AppOpsManager.OPSTR_GET_USAGE_STATS`
const OPSTR_GET_USAGE_STATS: &str = "android:get_usage_stats";

/// `Build.VERSION_CODES.Q`: first release with `unsafeCheckOpNoThrow`.
const SDK_Q: i32 = 29;

/// Capacity of the local frame opened around per-record JNI work.
const LOCAL_FRAME: i32 = 16;

const NAME_NOT_FOUND: &str = "android/content/pm/PackageManager$NameNotFoundException";

/// The JavaVM and hosting `Context`, captured once at initialisation.
struct Host {
    vm: JavaVM,
    context: GlobalRef,
}

static HOST: OnceLock<Host> = OnceLock::new();

/// Record the JavaVM and a global reference to `context` for later calls,
/// and publish both through `ndk_context` for any other crate that looks
/// there. Only the first call has an effect.
pub fn attach_host(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<()> {
    if HOST.get().is_some() {
        return Ok(());
    }
    if context.is_null() {
        return Err(BridgeError::Platform("host context is null".into()));
    }

    let vm = env.get_java_vm().map_err(|e| jni_err(env, "get_java_vm", e))?;
    let context = env
        .new_global_ref(context)
        .map_err(|e| jni_err(env, "new_global_ref(context)", e))?;

    let mut fresh = false;
    let host = HOST.get_or_init(|| {
        fresh = true;
        Host { vm, context }
    });

    if fresh {
        // SAFETY: both pointers come from live JNI handles owned by `HOST`,
        // which is never dropped, so they stay valid for the process.
        unsafe {
            ndk_context::initialize_android_context(
                host.vm.get_java_vm_pointer().cast(),
                host.context.as_obj().as_raw().cast(),
            );
        }
        tracing::info!("Android: host context attached");
    }
    Ok(())
}

fn host() -> Result<&'static Host> {
    HOST.get().ok_or_else(|| {
        BridgeError::Platform("host context not attached, call NativeBridge.nativeInit first".into())
    })
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    host()?
        .vm
        .attach_current_thread_permanently()
        .map_err(|e| BridgeError::Platform(format!("failed to attach JNI thread: {e}")))
}

fn context() -> Result<&'static JObject<'static>> {
    Ok(host()?.context.as_obj())
}

/// Take and clear the pending Java exception, if any.
fn take_exception<'local>(env: &mut JNIEnv<'local>) -> Option<JThrowable<'local>> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    (!throwable.is_null()).then_some(throwable)
}

fn describe(env: &mut JNIEnv<'_>, throwable: &JThrowable<'_>) -> String {
    let text = env
        .call_method(throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .and_then(|obj| env.get_string(&JString::from(obj)).map(String::from));
    text.unwrap_or_else(|_| "unknown Java exception".into())
}

/// Map a `jni::errors::Error` into `BridgeError::Platform`, clearing any
/// pending Java exception on the way.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BridgeError {
    let detail = match &e {
        jni::errors::Error::JavaException => match take_exception(env) {
            Some(throwable) => describe(env, &throwable),
            None => e.to_string(),
        },
        _ => e.to_string(),
    };
    BridgeError::Platform(format!("{context}: {detail}"))
}

fn get_string(env: &mut JNIEnv<'_>, obj: JObject<'_>, what: &str) -> Result<String> {
    if obj.is_null() {
        return Err(BridgeError::Platform(format!("{what} returned null")));
    }
    let s = JString::from(obj);
    env.get_string(&s)
        .map(String::from)
        .map_err(|e| jni_err(env, what, e))
}

fn package_manager<'local>(env: &mut JNIEnv<'local>, context: &JObject<'_>) -> Result<JObject<'local>> {
    env.call_method(
        context,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )
    .and_then(|v| v.l())
    .map_err(|e| jni_err(env, "getPackageManager", e))
}

fn package_name(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<String> {
    let obj = env
        .call_method(context, "getPackageName", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getPackageName", e))?;
    get_string(env, obj, "getPackageName")
}

fn system_service<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
    name: &str,
) -> Result<JObject<'local>> {
    let j_name = env
        .new_string(name)
        .map_err(|e| jni_err(env, "new_string(service)", e))?;
    let service = env
        .call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_name)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getSystemService", e))?;
    if service.is_null() {
        return Err(BridgeError::Platform(format!("system service {name} unavailable")));
    }
    Ok(service)
}

/// `PackageManager.getLaunchIntentForPackage`, or `None` if the package has
/// no launcher activity (or is not installed).
fn launch_intent<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
    package: &str,
) -> Result<Option<JObject<'local>>> {
    let pm = package_manager(env, context)?;
    let j_pkg = env
        .new_string(package)
        .map_err(|e| jni_err(env, "new_string(package)", e))?;
    let intent = env
        .call_method(
            &pm,
            "getLaunchIntentForPackage",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_pkg)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getLaunchIntentForPackage", e))?;
    Ok((!intent.is_null()).then_some(intent))
}

/// Build the Java `Intent` for `intent`, flagged `FLAG_ACTIVITY_NEW_TASK`.
/// `None` only for a launch intent the package manager cannot supply.
fn build_intent<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
    intent: &Intent,
) -> Result<Option<JObject<'local>>> {
    let j_intent = match (intent, intent.action()) {
        (Intent::LaunchPackage(package), _) => match launch_intent(env, context, package)? {
            Some(obj) => obj,
            None => return Ok(None),
        },
        (_, Some(action)) => {
            let j_action = env
                .new_string(action)
                .map_err(|e| jni_err(env, "new_string(action)", e))?;
            env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&j_action)],
            )
            .map_err(|e| jni_err(env, "new Intent", e))?
        }
        (_, None) => return Err(BridgeError::Platform(format!("intent {intent} has no action"))),
    };

    if let Some(data) = intent.data_uri() {
        let j_data = env
            .new_string(&data)
            .map_err(|e| jni_err(env, "new_string(data)", e))?;
        let uri = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&j_data)],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err(env, "Uri.parse", e))?;
        env.call_method(
            &j_intent,
            "setData",
            "(Landroid/net/Uri;)Landroid/content/Intent;",
            &[JValue::Object(&uri)],
        )
        .map_err(|e| jni_err(env, "setData", e))?;
    }

    env.call_method(
        &j_intent,
        "setFlags",
        "(I)Landroid/content/Intent;",
        &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
    )
    .map_err(|e| jni_err(env, "setFlags", e))?;

    Ok(Some(j_intent))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the launcher platform bridge.
///
/// Zero-sized; all state lives on the Java side or in the process-wide
/// host handle.
pub struct AndroidBridge;

impl AndroidBridge {
    /// This does **not** touch JNI; the first JNI call happens lazily when a
    /// trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeActivity: Intent resolution and Context.startActivity
// ---------------------------------------------------------------------------

impl NativeActivity for AndroidBridge {
    /// `intent.resolveActivity(packageManager) != null`.
    fn resolves(&self, intent: &Intent) -> Result<bool> {
        let mut env = jni_env()?;
        let context = context()?;

        let Some(j_intent) = build_intent(&mut env, context, intent)? else {
            return Ok(false);
        };
        let pm = package_manager(&mut env, context)?;
        let component = env
            .call_method(
                &j_intent,
                "resolveActivity",
                "(Landroid/content/pm/PackageManager;)Landroid/content/ComponentName;",
                &[JValue::Object(&pm)],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err(&mut env, "resolveActivity", e))?;

        let resolved = !component.is_null();
        tracing::debug!(%intent, resolved, "Android: resolved intent");
        Ok(resolved)
    }

    fn start_activity(&self, intent: &Intent) -> Result<()> {
        let mut env = jni_env()?;
        let context = context()?;

        let Some(j_intent) = build_intent(&mut env, context, intent)? else {
            return Err(BridgeError::Platform(format!("no launch intent for {intent}")));
        };

        env.call_method(
            context,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&j_intent)],
        )
        .map_err(|e| jni_err(&mut env, "startActivity", e))?;

        tracing::info!(%intent, "Android: intent dispatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativePackages: android.content.pm.PackageManager
// ---------------------------------------------------------------------------

impl NativePackages for AndroidBridge {
    fn has_launch_intent(&self, package: &str) -> Result<bool> {
        let mut env = jni_env()?;
        let context = context()?;
        Ok(launch_intent(&mut env, context, package)?.is_some())
    }

    /// `getApplicationLabel(getApplicationInfo(package, 0))`. A
    /// `NameNotFoundException` means the package is unknown: `Ok(None)`.
    fn application_label(&self, package: &str) -> Result<Option<String>> {
        let mut env = jni_env()?;
        let context = context()?;
        // Called once per usage record, so the local refs must not pile up.
        env.with_local_frame(LOCAL_FRAME, |env| {
            Ok::<_, jni::errors::Error>(read_application_label(env, context, package))
        })
        .map_err(|e| jni_err(&mut env, "with_local_frame", e))?
    }
}

fn read_application_label(
    env: &mut JNIEnv<'_>,
    context: &JObject<'_>,
    package: &str,
) -> Result<Option<String>> {
    let pm = package_manager(env, context)?;
    let j_pkg = env
        .new_string(package)
        .map_err(|e| jni_err(env, "new_string(package)", e))?;

    let info = match env.call_method(
        &pm,
        "getApplicationInfo",
        "(Ljava/lang/String;I)Landroid/content/pm/ApplicationInfo;",
        &[JValue::Object(&j_pkg), JValue::Int(0)],
    ) {
        Ok(value) => value.l().map_err(|e| jni_err(env, "getApplicationInfo->l", e))?,
        Err(jni::errors::Error::JavaException) => {
            let Some(throwable) = take_exception(env) else {
                return Err(BridgeError::Platform("getApplicationInfo: exception vanished".into()));
            };
            let not_found = env
                .is_instance_of(&throwable, NAME_NOT_FOUND)
                .map_err(|e| jni_err(env, "is_instance_of", e))?;
            if not_found {
                return Ok(None);
            }
            let detail = describe(env, &throwable);
            return Err(BridgeError::Platform(format!("getApplicationInfo: {detail}")));
        }
        Err(e) => return Err(jni_err(env, "getApplicationInfo", e)),
    };

    let label = env
        .call_method(
            &pm,
            "getApplicationLabel",
            "(Landroid/content/pm/ApplicationInfo;)Ljava/lang/CharSequence;",
            &[JValue::Object(&info)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getApplicationLabel", e))?;
    if label.is_null() {
        return Ok(None);
    }
    let text = env
        .call_method(&label, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "CharSequence.toString", e))?;
    get_string(env, text, "CharSequence.toString").map(Some)
}

// ---------------------------------------------------------------------------
// NativeAppOps: android.app.AppOpsManager
// ---------------------------------------------------------------------------

impl NativeAppOps for AndroidBridge {
    /// `unsafeCheckOpNoThrow` from Android 10 on, the deprecated
    /// `checkOpNoThrow` before that. Same signature, same semantics.
    fn usage_access_mode(&self) -> Result<AppOpsMode> {
        let mut env = jni_env()?;
        let context = context()?;

        let app_ops = system_service(&mut env, context, "appops")?;

        let sdk_int = env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .and_then(|v| v.i())
            .map_err(|e| jni_err(&mut env, "Build.VERSION.SDK_INT", e))?;
        let uid = env
            .call_static_method("android/os/Process", "myUid", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|e| jni_err(&mut env, "Process.myUid", e))?;
        let package = package_name(&mut env, context)?;

        let j_op = env
            .new_string(OPSTR_GET_USAGE_STATS)
            .map_err(|e| jni_err(&mut env, "new_string(op)", e))?;
        let j_pkg = env
            .new_string(&package)
            .map_err(|e| jni_err(&mut env, "new_string(package)", e))?;

        let method = if sdk_int >= SDK_Q {
            "unsafeCheckOpNoThrow"
        } else {
            "checkOpNoThrow"
        };
        let mode = env
            .call_method(
                &app_ops,
                method,
                "(Ljava/lang/String;ILjava/lang/String;)I",
                &[JValue::Object(&j_op), JValue::Int(uid), JValue::Object(&j_pkg)],
            )
            .and_then(|v| v.i())
            .map_err(|e| jni_err(&mut env, method, e))?;

        let mode = AppOpsMode::from_raw(mode);
        tracing::debug!(sdk_int, uid, ?mode, "Android: usage access mode");
        Ok(mode)
    }
}

// ---------------------------------------------------------------------------
// NativeUsageStats: android.app.usage.UsageStatsManager
// ---------------------------------------------------------------------------

impl NativeUsageStats for AndroidBridge {
    fn query_usage_stats(
        &self,
        interval: UsageInterval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<UsageSample>> {
        let mut env = jni_env()?;
        let context = context()?;

        let manager = system_service(&mut env, context, "usagestats")?;
        let list = env
            .call_method(
                &manager,
                "queryUsageStats",
                "(IJJ)Ljava/util/List;",
                &[
                    JValue::Int(interval.as_raw()),
                    JValue::Long(start_ms),
                    JValue::Long(end_ms),
                ],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err(&mut env, "queryUsageStats", e))?;
        if list.is_null() {
            return Ok(Vec::new());
        }

        let size = env
            .call_method(&list, "size", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|e| jni_err(&mut env, "List.size", e))?;

        let mut samples = Vec::with_capacity(size.max(0) as usize);
        for i in 0..size {
            let sample = env
                .with_local_frame(LOCAL_FRAME, |env| {
                    Ok::<_, jni::errors::Error>(usage_sample(env, &list, i))
                })
                .map_err(|e| jni_err(&mut env, "with_local_frame", e))??;
            samples.extend(sample);
        }

        tracing::info!(
            samples = samples.len(),
            ?interval,
            start_ms,
            end_ms,
            "Android: usage stats queried"
        );
        Ok(samples)
    }
}

/// Read element `index` of a `List<UsageStats>`; `None` for a null entry.
fn usage_sample(env: &mut JNIEnv<'_>, list: &JObject<'_>, index: i32) -> Result<Option<UsageSample>> {
    let stats = env
        .call_method(list, "get", "(I)Ljava/lang/Object;", &[JValue::Int(index)])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "List.get", e))?;
    if stats.is_null() {
        return Ok(None);
    }

    let pkg = env
        .call_method(&stats, "getPackageName", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "UsageStats.getPackageName", e))?;
    let package_name = get_string(env, pkg, "UsageStats.getPackageName")?;
    let foreground = env
        .call_method(&stats, "getTotalTimeInForeground", "()J", &[])
        .and_then(|v| v.j())
        .map_err(|e| jni_err(env, "UsageStats.getTotalTimeInForeground", e))?;
    let last_used = env
        .call_method(&stats, "getLastTimeUsed", "()J", &[])
        .and_then(|v| v.j())
        .map_err(|e| jni_err(env, "UsageStats.getLastTimeUsed", e))?;

    Ok(Some(UsageSample {
        package_name,
        total_time_in_foreground_ms: foreground,
        last_time_used_ms: last_used,
    }))
}
