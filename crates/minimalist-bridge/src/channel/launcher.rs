// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launcher channel: default home app settings.

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{BridgeConfig, ChannelId};
use tracing::info;

use super::{Channel, MethodCall, Reply};
use crate::intent::Intent;
use crate::traits::PlatformBridge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherRequest {
    OpenHomeLauncherSettings,
}

pub struct LauncherChannel;

impl Channel for LauncherChannel {
    const ID: ChannelId = ChannelId::Launcher;

    type Request = LauncherRequest;

    fn decode(call: &MethodCall) -> Option<Result<LauncherRequest>> {
        match call.method.as_str() {
            "openHomeLauncherSettings" => Some(Ok(LauncherRequest::OpenHomeLauncherSettings)),
            _ => None,
        }
    }

    fn handle(bridge: &dyn PlatformBridge, _config: &BridgeConfig, request: LauncherRequest) -> Reply {
        match request {
            LauncherRequest::OpenHomeLauncherSettings => open_home_settings(bridge).into(),
        }
    }
}

fn open_home_settings(bridge: &dyn PlatformBridge) -> Result<bool> {
    bridge.start_activity(&Intent::HomeSettings).map_err(|e| {
        BridgeError::Unavailable(format!("Could not open home settings: {}", e.reason()))
    })?;
    info!("opened home launcher settings");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBridge;

    fn call(bridge: &FakeBridge, method: &str) -> Reply {
        match LauncherChannel::decode(&MethodCall::new(method)) {
            None => Reply::NotImplemented,
            Some(req) => LauncherChannel::handle(bridge, &BridgeConfig::default(), req.unwrap()),
        }
    }

    #[test]
    fn opens_home_settings() {
        let bridge = FakeBridge::default();
        assert!(call(&bridge, "openHomeLauncherSettings").is_success());
        assert_eq!(bridge.started(), vec![Intent::HomeSettings]);
    }

    #[test]
    fn navigation_failure_is_unavailable() {
        let bridge = FakeBridge {
            failing_starts: vec![Intent::HomeSettings],
            ..FakeBridge::default()
        };
        let reply = call(&bridge, "openHomeLauncherSettings");
        assert_eq!(
            reply,
            Reply::Error {
                code: "UNAVAILABLE".into(),
                message: "Could not open home settings: ActivityNotFoundException".into(),
            }
        );
    }

    #[test]
    fn other_methods_are_unknown() {
        let bridge = FakeBridge::default();
        assert_eq!(call(&bridge, "openAppSettings"), Reply::NotImplemented);
        assert!(bridge.calls().is_empty());
    }
}
