// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Minimalist launcher: native platform bridge.
//!
//! Three named channels (launcher settings, app settings, usage stats) are
//! decoded into typed requests and served against the capability traits in
//! [`traits`]. On Android those traits are backed by JNI calls into the ART
//! runtime; everywhere else a stub reports the platform as unavailable.

pub mod channel;
pub mod intent;
pub mod logging;
pub mod payment;
pub mod traits;
pub mod usage;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

#[cfg(test)]
pub(crate) mod fake;

pub use channel::{ChannelRouter, MethodCall, Reply};

use minimalist_core::BridgeConfig;
use minimalist_core::error::Result;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: Uses `jni-rs` to invoke methods on the JVM/ART.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: every capability reports `PlatformUnavailable`.
        Box::new(stub::StubBridge)
    }
}

/// Parse the host's configuration document and install logging with its
/// filter. A document that does not parse still installs logging, with the
/// default filter, so the failure can be reported.
pub fn configure(config_json: &str) -> Result<BridgeConfig> {
    match BridgeConfig::from_json(config_json) {
        Ok(config) => {
            logging::init(&config.log_filter);
            Ok(config)
        }
        Err(e) => {
            logging::init(&BridgeConfig::default().log_filter);
            Err(e)
        }
    }
}

/// Router over the platform bridge for this target.
pub fn router(config: BridgeConfig) -> ChannelRouter {
    ChannelRouter::new(platform_bridge(), config)
}
