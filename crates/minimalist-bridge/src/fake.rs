// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scriptable in-memory bridge for unit tests. Records every OS interaction.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use minimalist_core::error::{BridgeError, Result};
use minimalist_core::{AppOpsMode, UsageInterval, UsageSample};

use crate::intent::Intent;
use crate::traits::*;

/// One observed OS interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Resolve(Intent),
    Start(Intent),
    ProbeLaunch(String),
    Label(String),
    AppOps,
    Query(UsageInterval, i64, i64),
}

pub struct FakeBridge {
    /// Intents that resolve to a handler. `None` means "everything resolves".
    pub resolvable: Option<Vec<Intent>>,
    /// Intents whose `startActivity` throws.
    pub failing_starts: Vec<Intent>,
    /// Packages that have a launch intent.
    pub launchable: HashSet<String>,
    /// Packages whose launch-intent probe throws.
    pub probe_failures: HashSet<String>,
    pub labels: HashMap<String, String>,
    pub mode: Result<AppOpsMode>,
    pub samples: Vec<UsageSample>,
    pub query_error: Option<String>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl Default for FakeBridge {
    fn default() -> Self {
        Self {
            resolvable: None,
            failing_starts: Vec::new(),
            launchable: HashSet::new(),
            probe_failures: HashSet::new(),
            labels: HashMap::new(),
            mode: Ok(AppOpsMode::Allowed),
            samples: Vec::new(),
            query_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBridge {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<Intent> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Start(intent) => Some(intent),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlatformBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl NativeActivity for FakeBridge {
    fn resolves(&self, intent: &Intent) -> Result<bool> {
        self.record(Call::Resolve(intent.clone()));
        Ok(self.resolvable.as_ref().is_none_or(|list| list.contains(intent)))
    }

    fn start_activity(&self, intent: &Intent) -> Result<()> {
        self.record(Call::Start(intent.clone()));
        if self.failing_starts.contains(intent) {
            return Err(BridgeError::Platform("ActivityNotFoundException".into()));
        }
        Ok(())
    }
}

impl NativePackages for FakeBridge {
    fn has_launch_intent(&self, package: &str) -> Result<bool> {
        self.record(Call::ProbeLaunch(package.to_string()));
        if self.probe_failures.contains(package) {
            return Err(BridgeError::Platform("SecurityException".into()));
        }
        Ok(self.launchable.contains(package))
    }

    fn application_label(&self, package: &str) -> Result<Option<String>> {
        self.record(Call::Label(package.to_string()));
        Ok(self.labels.get(package).cloned())
    }
}

impl NativeAppOps for FakeBridge {
    fn usage_access_mode(&self) -> Result<AppOpsMode> {
        self.record(Call::AppOps);
        match &self.mode {
            Ok(mode) => Ok(*mode),
            Err(e) => Err(BridgeError::Platform(e.reason())),
        }
    }
}

impl NativeUsageStats for FakeBridge {
    fn query_usage_stats(
        &self,
        interval: UsageInterval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<UsageSample>> {
        self.record(Call::Query(interval, start_ms, end_ms));
        if let Some(detail) = &self.query_error {
            return Err(BridgeError::Platform(detail.clone()));
        }
        Ok(self.samples.clone())
    }
}

/// Shorthand for building a raw usage record.
pub fn sample(package: &str, foreground_ms: i64, last_used_ms: i64) -> UsageSample {
    UsageSample {
        package_name: package.to_string(),
        total_time_in_foreground_ms: foreground_ms,
        last_time_used_ms: last_used_ms,
    }
}
