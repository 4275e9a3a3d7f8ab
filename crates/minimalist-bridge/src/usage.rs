// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen-time collection on top of the usage-stats and app-ops capabilities.

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{PackageName, UsageInterval, UsageRecord, UsageSample, UsageWindow};
use tracing::debug;

use crate::traits::PlatformBridge;

/// Whether the user granted usage access to this app.
pub fn has_usage_permission(bridge: &dyn PlatformBridge) -> Result<bool> {
    Ok(bridge.usage_access_mode()?.is_allowed())
}

/// Foreground time per app over `window`, busiest first.
///
/// Refuses with `PermissionDenied` before touching the usage-stats service
/// when access has not been granted.
pub fn collect_usage(
    bridge: &dyn PlatformBridge,
    interval: UsageInterval,
    window: UsageWindow,
) -> Result<Vec<UsageRecord>> {
    if !has_usage_permission(bridge)? {
        return Err(BridgeError::PermissionDenied(
            "Usage stats permission not granted".into(),
        ));
    }

    let samples = bridge.query_usage_stats(interval, window.start_ms, window.end_ms)?;
    debug!(
        samples = samples.len(),
        start_ms = window.start_ms,
        end_ms = window.end_ms,
        "usage stats queried"
    );

    let mut records = samples
        .into_iter()
        .filter(|s| s.total_time_in_foreground_ms > 0)
        .map(|s| to_record(bridge, s))
        .collect::<Result<Vec<_>>>()?;

    // Stable, so ties keep the order the OS reported them in.
    records.sort_by(|a, b| b.usage_time_ms.cmp(&a.usage_time_ms));
    Ok(records)
}

fn to_record(bridge: &dyn PlatformBridge, sample: UsageSample) -> Result<UsageRecord> {
    let app_name = display_name(bridge, &sample.package_name)?;
    Ok(UsageRecord {
        package_name: sample.package_name,
        app_name,
        usage_time_ms: sample.total_time_in_foreground_ms,
        last_used_ms: sample.last_time_used_ms,
    })
}

fn display_name(bridge: &dyn PlatformBridge, package: &str) -> Result<String> {
    if let Some(label) = bridge.application_label(package)? {
        return Ok(label);
    }
    // Packages reported by the OS are never empty, but don't trust that.
    Ok(PackageName::new(package)
        .map(|p| p.fallback_label().to_string())
        .unwrap_or_default())
}
