// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payment-app shortcut: ordered candidate probing with a web fallback.
//
// Each candidate goes through a side-effect-free probe (does the package
// have a launch intent?) before the commit step starts it. Any failure moves
// on to the next candidate; only exhausting every target is an error.

use minimalist_core::config::PaymentConfig;
use minimalist_core::error::{BridgeError, Result};
use tracing::{debug, info, warn};

use crate::intent::Intent;
use crate::traits::PlatformBridge;

/// Which target ended up being launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// An installed payment app, by package.
    App(String),
    /// The browser fallback URL.
    Web(String),
}

/// Launch the first installed candidate, else the web fallback.
pub fn launch_payment_app(
    bridge: &dyn PlatformBridge,
    config: &PaymentConfig,
) -> Result<LaunchOutcome> {
    for package in &config.candidates {
        match bridge.has_launch_intent(package) {
            Ok(true) => {}
            Ok(false) => {
                debug!(package = %package, "payment candidate not installed");
                continue;
            }
            Err(e) => {
                warn!(package = %package, error = %e, "payment candidate probe failed");
                continue;
            }
        }

        match bridge.start_activity(&Intent::LaunchPackage(package.clone())) {
            Ok(()) => {
                info!(package = %package, "launched payment app");
                return Ok(LaunchOutcome::App(package.clone()));
            }
            Err(e) => {
                warn!(package = %package, error = %e, "payment candidate failed to launch");
            }
        }
    }

    let url = &config.web_fallback_url;
    match bridge.start_activity(&Intent::View(url.clone())) {
        Ok(()) => {
            info!(url = %url, "no payment app installed, opened web fallback");
            Ok(LaunchOutcome::Web(url.clone()))
        }
        Err(e) => {
            warn!(url = %url, error = %e, "payment web fallback failed");
            Err(BridgeError::Unavailable("Google Pay app not found".into()))
        }
    }
}
