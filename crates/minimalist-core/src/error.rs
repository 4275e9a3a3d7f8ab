// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error type for the launcher bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
///
/// Each variant maps onto one of the four error codes the application layer
/// understands (see [`BridgeError::code`]).
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Precondition failures --
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    PermissionDenied(String),

    // -- Operation failures --
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),

    /// Raw failure from the OS or the JNI layer. Channel handlers re-wrap
    /// this into the kind their operation reports.
    #[error("platform call failed: {0}")]
    Platform(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Wire code reported to the application layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Unavailable(_) | Self::PlatformUnavailable => "UNAVAILABLE",
            Self::Failed(_) | Self::Platform(_) | Self::Serialization(_) => "ERROR",
        }
    }

    /// Short description of the underlying cause, without the variant prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::Platform(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
