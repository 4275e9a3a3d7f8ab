// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS capabilities the launcher
// needs. Channel handlers only ever talk to these traits, so every policy
// (argument checks, fallbacks, filtering) can be tested without a device.

use minimalist_core::error::Result;
use minimalist_core::{AppOpsMode, UsageInterval, UsageSample};

use crate::intent::Intent;

/// Unified bridge that groups all native capabilities.
///
/// Implementations hold no per-call state and must be shareable across the
/// threads the host may call in on.
pub trait PlatformBridge:
    NativeActivity + NativePackages + NativeAppOps + NativeUsageStats + Send + Sync
{
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Resolve and start activities.
pub trait NativeActivity {
    /// Whether some installed activity can handle the intent.
    fn resolves(&self, intent: &Intent) -> Result<bool>;

    /// Start the intent in a new task. Returns once the OS accepted it; the
    /// outcome of whatever screen opens is not observed.
    fn start_activity(&self, intent: &Intent) -> Result<()>;
}

/// Queries against the package manager.
pub trait NativePackages {
    /// Whether the package exposes a launcher entry point.
    fn has_launch_intent(&self, package: &str) -> Result<bool>;

    /// User-facing label of an installed package. `Ok(None)` if the package
    /// is unknown to the package manager.
    fn application_label(&self, package: &str) -> Result<Option<String>>;
}

/// App-ops permission state for the running process.
pub trait NativeAppOps {
    /// Mode of `android:get_usage_stats` for this uid and package.
    fn usage_access_mode(&self) -> Result<AppOpsMode>;
}

/// OS usage-statistics service.
pub trait NativeUsageStats {
    /// Raw per-package records over `[start_ms, end_ms)`.
    fn query_usage_stats(
        &self,
        interval: UsageInterval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<UsageSample>>;
}
