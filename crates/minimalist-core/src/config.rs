// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration, supplied by the host as JSON at initialisation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::UsageInterval;

/// Settings for the bridge. Every field has a default so hosts may send a
/// partial document (or none at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub payment: PaymentConfig,
    pub usage: UsageConfig,
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            payment: PaymentConfig::default(),
            usage: UsageConfig::default(),
            log_filter: "info".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON configuration document. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Payment-app shortcut targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Package identifiers tried in order until one launches.
    pub candidates: Vec<String>,
    /// Opened in a browser when none of the candidates is installed.
    pub web_fallback_url: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                "com.google.android.apps.nbu.paisa.user".into(),
                "com.google.android.apps.pay".into(),
                "com.google.android.apps.walletnfchost".into(),
                "com.google.android.gms".into(),
            ],
            web_fallback_url: "https://pay.google.com".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    pub interval: UsageInterval,
}
