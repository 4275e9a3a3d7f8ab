// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// App-settings channel: uninstall dialog, "App info" screen and the
// payment-app shortcut.

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{BridgeConfig, ChannelId, PackageName};
use tracing::info;

use super::{Channel, MethodCall, Reply};
use crate::intent::Intent;
use crate::payment;
use crate::traits::PlatformBridge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSettingsRequest {
    UninstallApp(PackageName),
    OpenAppSettings(PackageName),
    LaunchGooglePay,
}

pub struct AppSettingsChannel;

impl Channel for AppSettingsChannel {
    const ID: ChannelId = ChannelId::AppSettings;

    type Request = AppSettingsRequest;

    fn decode(call: &MethodCall) -> Option<Result<AppSettingsRequest>> {
        let request = match call.method.as_str() {
            "uninstallApp" => call.package_name().map(AppSettingsRequest::UninstallApp),
            "openAppSettings" => call.package_name().map(AppSettingsRequest::OpenAppSettings),
            "launchGooglePay" => Ok(AppSettingsRequest::LaunchGooglePay),
            _ => return None,
        };
        Some(request)
    }

    fn handle(bridge: &dyn PlatformBridge, config: &BridgeConfig, request: AppSettingsRequest) -> Reply {
        match request {
            AppSettingsRequest::UninstallApp(package) => open_for_package(
                bridge,
                Intent::Uninstall(package),
                "No app found to handle uninstall",
                "Could not uninstall app",
            )
            .into(),
            AppSettingsRequest::OpenAppSettings(package) => open_for_package(
                bridge,
                Intent::AppDetails(package),
                "No app found to handle app settings",
                "Could not open app settings",
            )
            .into(),
            AppSettingsRequest::LaunchGooglePay => payment::launch_payment_app(bridge, &config.payment)
                .map(|_| true)
                .into(),
        }
    }
}

/// Start a package-scoped system screen, but only if something handles it.
fn open_for_package(
    bridge: &dyn PlatformBridge,
    intent: Intent,
    no_handler: &str,
    failure: &str,
) -> Result<bool> {
    let unavailable = |e: BridgeError| BridgeError::Unavailable(format!("{failure}: {}", e.reason()));

    if !bridge.resolves(&intent).map_err(unavailable)? {
        return Err(BridgeError::Unavailable(no_handler.into()));
    }
    bridge.start_activity(&intent).map_err(unavailable)?;
    info!(%intent, "started package intent");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBridge;
    use serde_json::Value;

    fn call(bridge: &FakeBridge, call: MethodCall) -> Reply {
        match AppSettingsChannel::decode(&call) {
            None => Reply::NotImplemented,
            Some(Err(e)) => Reply::from(e),
            Some(Ok(req)) => AppSettingsChannel::handle(bridge, &BridgeConfig::default(), req),
        }
    }

    fn pkg(name: &str) -> PackageName {
        PackageName::new(name).unwrap()
    }

    #[test]
    fn missing_or_empty_package_never_navigates() {
        for method in ["uninstallApp", "openAppSettings"] {
            let bridge = FakeBridge::default();
            for args in [
                MethodCall::new(method),
                MethodCall::new(method).with_arg("packageName", ""),
                MethodCall::new(method).with_arg("packageName", Value::Null),
            ] {
                let reply = call(&bridge, args);
                assert_eq!(reply.error_code(), Some("INVALID_ARGUMENT"), "{method}");
            }
            assert!(bridge.calls().is_empty());
        }
    }

    #[test]
    fn uninstall_starts_delete_intent() {
        let bridge = FakeBridge::default();
        let reply = call(
            &bridge,
            MethodCall::new("uninstallApp").with_arg("packageName", "com.example.foo"),
        );
        assert_eq!(reply, Reply::Success { value: Value::Bool(true) });
        assert_eq!(bridge.started(), vec![Intent::Uninstall(pkg("com.example.foo"))]);
    }

    #[test]
    fn uninstall_without_handler_is_unavailable() {
        let bridge = FakeBridge {
            resolvable: Some(Vec::new()),
            ..FakeBridge::default()
        };
        let reply = call(
            &bridge,
            MethodCall::new("uninstallApp").with_arg("packageName", "com.example.foo"),
        );
        assert_eq!(
            reply,
            Reply::Error {
                code: "UNAVAILABLE".into(),
                message: "No app found to handle uninstall".into(),
            }
        );
        assert!(bridge.started().is_empty());
    }

    #[test]
    fn app_settings_opens_details_screen() {
        let bridge = FakeBridge::default();
        let reply = call(
            &bridge,
            MethodCall::new("openAppSettings").with_arg("packageName", "com.example.foo"),
        );
        assert!(reply.is_success());
        assert_eq!(bridge.started(), vec![Intent::AppDetails(pkg("com.example.foo"))]);
    }

    #[test]
    fn app_settings_start_failure_carries_reason() {
        let intent = Intent::AppDetails(pkg("com.example.foo"));
        let bridge = FakeBridge {
            failing_starts: vec![intent],
            ..FakeBridge::default()
        };
        let reply = call(
            &bridge,
            MethodCall::new("openAppSettings").with_arg("packageName", "com.example.foo"),
        );
        assert_eq!(
            reply,
            Reply::Error {
                code: "UNAVAILABLE".into(),
                message: "Could not open app settings: ActivityNotFoundException".into(),
            }
        );
    }

    #[test]
    fn google_pay_reports_success_for_web_fallback() {
        let bridge = FakeBridge::default();
        let reply = call(&bridge, MethodCall::new("launchGooglePay"));
        assert_eq!(reply, Reply::Success { value: Value::Bool(true) });
    }

    #[test]
    fn google_pay_unavailable_when_everything_fails() {
        let bridge = FakeBridge {
            failing_starts: vec![Intent::View("https://pay.google.com".into())],
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("launchGooglePay"));
        assert_eq!(reply.error_code(), Some("UNAVAILABLE"));
    }
}
