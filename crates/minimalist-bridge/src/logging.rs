// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracing subscriber setup. Android discards stdout, so there the events go
// to logcat under `LOG_TAG`; everywhere else they go through `fmt`.

use tracing_subscriber::EnvFilter;

/// Logcat tag for every event emitted by the bridge.
pub const LOG_TAG: &str = "MinimalistBridge";

/// `RUST_LOG` wins over `default_filter`; an unparsable filter means `info`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init(default_filter: &str) {
    let filter = env_filter(default_filter);

    #[cfg(target_os = "android")]
    let installed = {
        use tracing_subscriber::prelude::*;
        tracing_subscriber::registry()
            .with(paranoid_android::layer(LOG_TAG).with_filter(filter))
            .try_init()
            .is_ok()
    };
    #[cfg(not(target_os = "android"))]
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Minimalist bridge logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init("debug");
        init("not a [valid filter");
        assert!(tracing::dispatcher::has_been_set());
    }
}
