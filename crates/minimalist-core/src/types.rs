// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the launcher bridge.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// The three message channels exposed to the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Default-launcher settings.
    Launcher,
    /// Uninstall, app details and the payment-app shortcut.
    AppSettings,
    /// Screen-time analytics backed by the OS usage-stats service.
    UsageStats,
}

impl ChannelId {
    pub const ALL: [ChannelId; 3] = [Self::Launcher, Self::AppSettings, Self::UsageStats];

    /// Fixed identifier the host registers the channel under.
    pub fn name(self) -> &'static str {
        match self {
            Self::Launcher => "com.example.minimalist_app/launcher",
            Self::AppSettings => "app_settings",
            Self::UsageStats => "com.minimalist.launcher/usage_stats",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-empty Android package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BridgeError::InvalidArgument("Package name is required".into()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `package:<name>` URI used as intent data.
    pub fn to_uri(&self) -> String {
        format!("package:{}", self.0)
    }

    /// Display name used when the package manager cannot resolve a label:
    /// the last dot-separated segment (`com.example.foo` → `foo`).
    pub fn fallback_label(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for PackageName {
    type Error = BridgeError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open query interval `[start_ms, end_ms)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl UsageWindow {
    /// Fill in missing bounds: the start defaults to the epoch and the end
    /// to `now_ms`.
    pub fn resolve(start_ms: Option<i64>, end_ms: Option<i64>, now_ms: i64) -> Self {
        Self {
            start_ms: start_ms.unwrap_or(0),
            end_ms: end_ms.unwrap_or(now_ms),
        }
    }
}

/// Aggregation bucket for usage-stats queries (`UsageStatsManager.INTERVAL_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageInterval {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Best,
}

impl UsageInterval {
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Daily => 0,
            Self::Weekly => 1,
            Self::Monthly => 2,
            Self::Yearly => 3,
            Self::Best => 4,
        }
    }
}

/// Result of an app-ops permission check (`AppOpsManager.MODE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppOpsMode {
    Allowed,
    Ignored,
    Errored,
    Default,
    Foreground,
    Unknown(i32),
}

impl AppOpsMode {
    pub fn from_raw(mode: i32) -> Self {
        match mode {
            0 => Self::Allowed,
            1 => Self::Ignored,
            2 => Self::Errored,
            3 => Self::Default,
            4 => Self::Foreground,
            other => Self::Unknown(other),
        }
    }

    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

/// One raw record as returned by the OS usage-stats service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSample {
    pub package_name: String,
    pub total_time_in_foreground_ms: i64,
    pub last_time_used_ms: i64,
}

/// Per-app screen time delivered to the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub package_name: String,
    pub app_name: String,
    #[serde(rename = "usageTime")]
    pub usage_time_ms: i64,
    #[serde(rename = "lastUsed")]
    pub last_used_ms: i64,
}
