// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel boundary: decodes untyped method calls into per-channel request
// enums, routes them to the handlers and encodes the reply.
//
// Unknown method names only exist at this boundary. Once decoded, a request
// is one of a closed set of variants and every handler is total over it.

pub mod app_settings;
pub mod launcher;
#[cfg(feature = "usage-stats")]
pub mod usage_stats;

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{BridgeConfig, ChannelId, PackageName};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::traits::PlatformBridge;

/// An incoming call as the host delivers it: a method name plus an argument
/// bag of primitive values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Map<String, Value>,
    /// Why the argument document could not be read, if it could not.
    /// Only reported once the method is known to exist.
    rejected: Option<String>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }

    /// Build a call from a JSON argument document. Blank input and `null`
    /// mean "no arguments". A malformed document or anything other than an
    /// object leaves the call with no arguments and a pending rejection.
    pub fn from_json(method: impl Into<String>, arguments_json: &str) -> Self {
        let mut call = Self::new(method);
        let trimmed = arguments_json.trim();
        if trimmed.is_empty() {
            return call;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Null) => {}
            Ok(Value::Object(map)) => call.arguments = map,
            Ok(other) => call.rejected = Some(format!("arguments must be an object, got {other}")),
            Err(e) => call.rejected = Some(format!("malformed arguments: {e}")),
        }
        call
    }

    /// `Err` if the argument document was unreadable.
    pub fn check_arguments(&self) -> Result<()> {
        match &self.rejected {
            Some(reason) => Err(BridgeError::InvalidArgument(reason.clone())),
            None => Ok(()),
        }
    }

    /// Argument lookup where an explicit `null` counts as absent.
    fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key).filter(|v| !v.is_null())
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&str>> {
        match self.argument(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(BridgeError::InvalidArgument(format!(
                "{key} must be a string, got {other}"
            ))),
        }
    }

    pub fn optional_i64(&self, key: &str) -> Result<Option<i64>> {
        match self.argument(key) {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                BridgeError::InvalidArgument(format!("{key} must be an integer, got {value}"))
            }),
        }
    }

    /// The required `packageName` argument.
    pub fn package_name(&self) -> Result<PackageName> {
        match self.optional_str("packageName")? {
            Some(name) => PackageName::new(name),
            None => Err(BridgeError::InvalidArgument("Package name is required".into())),
        }
    }
}

/// Terminal response to a channel call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Success { value: Value },
    Error { code: String, message: String },
    /// The method (or channel) is unknown; distinct from a failed call.
    NotImplemented,
}

impl Reply {
    pub fn success(value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Success { value },
            Err(e) => Self::from(BridgeError::from(e)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","code":"ERROR","message":"reply encoding failed: {e}"}}"#)
        })
    }
}

impl From<BridgeError> for Reply {
    fn from(err: BridgeError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl<T: Serialize> From<Result<T>> for Reply {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => Self::from(e),
        }
    }
}

/// One of the named channels: how to decode its calls and how to serve them.
pub trait Channel {
    const ID: ChannelId;

    type Request;

    /// `None` when the method name is not part of this channel.
    fn decode(call: &MethodCall) -> Option<Result<Self::Request>>;

    fn handle(bridge: &dyn PlatformBridge, config: &BridgeConfig, request: Self::Request) -> Reply;
}

/// Routes calls from every channel to its handler. Holds no mutable state.
pub struct ChannelRouter {
    bridge: Box<dyn PlatformBridge>,
    config: BridgeConfig,
}

impl ChannelRouter {
    pub fn new(bridge: Box<dyn PlatformBridge>, config: BridgeConfig) -> Self {
        Self { bridge, config }
    }

    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    /// Serve one call on the named channel.
    pub fn handle(&self, channel: &str, call: &MethodCall) -> Reply {
        let Some(id) = ChannelId::from_name(channel) else {
            debug!(channel, method = %call.method, "call on unknown channel");
            return Reply::NotImplemented;
        };

        let reply = match id {
            ChannelId::Launcher => self.serve::<launcher::LauncherChannel>(call),
            ChannelId::AppSettings => self.serve::<app_settings::AppSettingsChannel>(call),
            #[cfg(feature = "usage-stats")]
            ChannelId::UsageStats => self.serve::<usage_stats::UsageStatsChannel>(call),
            #[cfg(not(feature = "usage-stats"))]
            ChannelId::UsageStats => Reply::NotImplemented,
        };

        match &reply {
            Reply::Error { code, message } => {
                warn!(channel = %id, method = %call.method, code = %code, message = %message, "channel call failed");
            }
            Reply::NotImplemented => {
                debug!(channel = %id, method = %call.method, "method not implemented");
            }
            Reply::Success { .. } => {
                debug!(channel = %id, method = %call.method, "channel call succeeded");
            }
        }
        reply
    }

    /// Text boundary used by the JNI shim: JSON arguments in, JSON reply out.
    pub fn handle_json(&self, channel: &str, method: &str, arguments_json: &str) -> String {
        self.handle(channel, &MethodCall::from_json(method, arguments_json))
            .to_json()
    }

    fn serve<C: Channel>(&self, call: &MethodCall) -> Reply {
        let Some(decoded) = C::decode(call) else {
            return Reply::NotImplemented;
        };
        match call.check_arguments().and(decoded) {
            Err(e) => {
                debug!(channel = %C::ID, method = %call.method, error = %e, "rejected arguments");
                Reply::from(e)
            }
            Ok(request) => C::handle(self.bridge.as_ref(), &self.config, request),
        }
    }
}
