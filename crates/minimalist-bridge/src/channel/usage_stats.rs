// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Usage-stats channel: screen-time analytics and the permission that gates it.

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{BridgeConfig, ChannelId, UsageWindow};
use tracing::info;

use super::{Channel, MethodCall, Reply};
use crate::intent::Intent;
use crate::traits::PlatformBridge;
use crate::usage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageStatsRequest {
    HasPermission,
    RequestPermission,
    /// Missing bounds are filled in when the call is served.
    GetUsageStats {
        start_ms: Option<i64>,
        end_ms: Option<i64>,
    },
}

pub struct UsageStatsChannel;

impl Channel for UsageStatsChannel {
    const ID: ChannelId = ChannelId::UsageStats;

    type Request = UsageStatsRequest;

    fn decode(call: &MethodCall) -> Option<Result<UsageStatsRequest>> {
        let request = match call.method.as_str() {
            "hasPermission" => Ok(UsageStatsRequest::HasPermission),
            "requestPermission" => Ok(UsageStatsRequest::RequestPermission),
            "getUsageStats" => call.optional_i64("startTime").and_then(|start_ms| {
                Ok(UsageStatsRequest::GetUsageStats {
                    start_ms,
                    end_ms: call.optional_i64("endTime")?,
                })
            }),
            _ => return None,
        };
        Some(request)
    }

    fn handle(bridge: &dyn PlatformBridge, config: &BridgeConfig, request: UsageStatsRequest) -> Reply {
        match request {
            UsageStatsRequest::HasPermission => usage::has_usage_permission(bridge)
                .map_err(|e| BridgeError::Failed(format!("Failed to check usage access: {}", e.reason())))
                .into(),
            UsageStatsRequest::RequestPermission => request_permission(bridge).into(),
            UsageStatsRequest::GetUsageStats { start_ms, end_ms } => {
                let now_ms = chrono::Utc::now().timestamp_millis();
                let window = UsageWindow::resolve(start_ms, end_ms, now_ms);
                usage::collect_usage(bridge, config.usage.interval, window)
                    .map_err(|e| match e {
                        BridgeError::PermissionDenied(_) => e,
                        other => BridgeError::Failed(format!(
                            "Failed to get usage stats: {}",
                            other.reason()
                        )),
                    })
                    .into()
            }
        }
    }
}

fn request_permission(bridge: &dyn PlatformBridge) -> Result<bool> {
    bridge
        .start_activity(&Intent::UsageAccessSettings)
        .map_err(|_| BridgeError::Unavailable("Could not open usage access settings".into()))?;
    info!("opened usage access settings");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{sample, Call, FakeBridge};
    use minimalist_core::{AppOpsMode, UsageInterval};
    use serde_json::{json, Value};

    fn call(bridge: &FakeBridge, call: MethodCall) -> Reply {
        match UsageStatsChannel::decode(&call) {
            None => Reply::NotImplemented,
            Some(Err(e)) => Reply::from(e),
            Some(Ok(req)) => UsageStatsChannel::handle(bridge, &BridgeConfig::default(), req),
        }
    }

    #[test]
    fn has_permission_false_unless_allowed() {
        let bridge = FakeBridge {
            mode: Ok(AppOpsMode::Default),
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("hasPermission"));
        assert_eq!(reply, Reply::Success { value: Value::Bool(false) });

        let reply = call(&FakeBridge::default(), MethodCall::new("hasPermission"));
        assert_eq!(reply, Reply::Success { value: Value::Bool(true) });
    }

    #[test]
    fn has_permission_failure_is_error() {
        let bridge = FakeBridge {
            mode: Err(BridgeError::Platform("appops missing".into())),
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("hasPermission"));
        assert_eq!(reply.error_code(), Some("ERROR"));
    }

    #[test]
    fn request_permission_opens_settings() {
        let bridge = FakeBridge::default();
        assert!(call(&bridge, MethodCall::new("requestPermission")).is_success());
        assert_eq!(bridge.started(), vec![Intent::UsageAccessSettings]);

        let bridge = FakeBridge {
            failing_starts: vec![Intent::UsageAccessSettings],
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("requestPermission"));
        assert_eq!(reply.error_code(), Some("UNAVAILABLE"));
    }

    #[test]
    fn usage_stats_sorted_busiest_first() {
        let mut bridge = FakeBridge::default();
        bridge.samples = vec![
            sample("com.example.clock", 500, 1_699_000_000_000),
            sample("com.example.reader", 100_000, 1_699_100_000_000),
        ];
        bridge.labels.insert("com.example.clock".into(), "Clock".into());

        let reply = call(
            &bridge,
            MethodCall::new("getUsageStats")
                .with_arg("startTime", 0)
                .with_arg("endTime", 1_700_000_000_000_i64),
        );
        assert_eq!(
            reply,
            Reply::Success {
                value: json!([
                    {
                        "packageName": "com.example.reader",
                        "appName": "reader",
                        "usageTime": 100_000,
                        "lastUsed": 1_699_100_000_000_i64,
                    },
                    {
                        "packageName": "com.example.clock",
                        "appName": "Clock",
                        "usageTime": 500,
                        "lastUsed": 1_699_000_000_000_i64,
                    },
                ])
            }
        );
        assert!(bridge
            .calls()
            .contains(&Call::Query(UsageInterval::Daily, 0, 1_700_000_000_000)));
    }

    #[test]
    fn usage_stats_denied_without_permission() {
        let bridge = FakeBridge {
            mode: Ok(AppOpsMode::Ignored),
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("getUsageStats"));
        assert_eq!(
            reply,
            Reply::Error {
                code: "PERMISSION_DENIED".into(),
                message: "Usage stats permission not granted".into(),
            }
        );
        assert!(!bridge.calls().iter().any(|c| matches!(c, Call::Query(..))));
    }

    #[test]
    fn missing_bounds_default_to_epoch_and_now() {
        let bridge = FakeBridge::default();
        let before = chrono::Utc::now().timestamp_millis();
        assert!(call(&bridge, MethodCall::new("getUsageStats")).is_success());
        let after = chrono::Utc::now().timestamp_millis();

        let query = bridge
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Query(_, start, end) => Some((start, end)),
                _ => None,
            })
            .unwrap();
        assert_eq!(query.0, 0);
        assert!(query.1 >= before && query.1 <= after);
    }

    #[test]
    fn query_failure_is_error() {
        let bridge = FakeBridge {
            query_error: Some("DeadObjectException".into()),
            ..FakeBridge::default()
        };
        let reply = call(&bridge, MethodCall::new("getUsageStats"));
        assert_eq!(
            reply,
            Reply::Error {
                code: "ERROR".into(),
                message: "Failed to get usage stats: DeadObjectException".into(),
            }
        );
    }

    #[test]
    fn non_integer_bounds_are_invalid() {
        let bridge = FakeBridge::default();
        let reply = call(&bridge, MethodCall::new("getUsageStats").with_arg("startTime", "yesterday"));
        assert_eq!(reply.error_code(), Some("INVALID_ARGUMENT"));
        assert!(bridge.calls().is_empty());
    }
}
