// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where Android APIs are unavailable.
//
// Every capability returns `PlatformUnavailable`; the real implementation
// lives in the `android` module.

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{AppOpsMode, UsageInterval, UsageSample};

use crate::intent::Intent;
use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeActivity for StubBridge {
    fn resolves(&self, intent: &Intent) -> Result<bool> {
        tracing::warn!(%intent, "NativeActivity::resolves called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }

    fn start_activity(&self, intent: &Intent) -> Result<()> {
        tracing::warn!(%intent, "NativeActivity::start_activity called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativePackages for StubBridge {
    fn has_launch_intent(&self, _package: &str) -> Result<bool> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn application_label(&self, _package: &str) -> Result<Option<String>> {
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeAppOps for StubBridge {
    fn usage_access_mode(&self) -> Result<AppOpsMode> {
        tracing::warn!("NativeAppOps::usage_access_mode called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeUsageStats for StubBridge {
    fn query_usage_stats(
        &self,
        _interval: UsageInterval,
        _start_ms: i64,
        _end_ms: i64,
    ) -> Result<Vec<UsageSample>> {
        Err(BridgeError::PlatformUnavailable)
    }
}
