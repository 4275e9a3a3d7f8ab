// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-neutral description of the Android intents the bridge fires.

use minimalist_core::PackageName;

/// `Settings.ACTION_HOME_SETTINGS`
pub const ACTION_HOME_SETTINGS: &str = "android.settings.HOME_SETTINGS";
/// `Settings.ACTION_USAGE_ACCESS_SETTINGS`
pub const ACTION_USAGE_ACCESS_SETTINGS: &str = "android.settings.USAGE_ACCESS_SETTINGS";
/// `Settings.ACTION_APPLICATION_DETAILS_SETTINGS`
pub const ACTION_APPLICATION_DETAILS_SETTINGS: &str =
    "android.settings.APPLICATION_DETAILS_SETTINGS";
/// `Intent.ACTION_DELETE`
pub const ACTION_DELETE: &str = "android.intent.action.DELETE";
/// `Intent.ACTION_VIEW`
pub const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// `Intent.FLAG_ACTIVITY_NEW_TASK`. Every intent is started with it because
/// the host context may not be an Activity.
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// An activity the bridge can ask the OS to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Default home app chooser.
    HomeSettings,
    /// Usage-access permission screen.
    UsageAccessSettings,
    /// System uninstall confirmation for a package.
    Uninstall(PackageName),
    /// "App info" screen for a package.
    AppDetails(PackageName),
    /// Open a URL in whatever handles `ACTION_VIEW`.
    View(String),
    /// The package's own launcher entry point
    /// (`PackageManager.getLaunchIntentForPackage`).
    LaunchPackage(String),
}

impl Intent {
    /// Intent action string, or `None` for launch intents the package
    /// manager builds itself.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::HomeSettings => Some(ACTION_HOME_SETTINGS),
            Self::UsageAccessSettings => Some(ACTION_USAGE_ACCESS_SETTINGS),
            Self::Uninstall(_) => Some(ACTION_DELETE),
            Self::AppDetails(_) => Some(ACTION_APPLICATION_DETAILS_SETTINGS),
            Self::View(_) => Some(ACTION_VIEW),
            Self::LaunchPackage(_) => None,
        }
    }

    /// Data URI attached with `Intent.setData`.
    pub fn data_uri(&self) -> Option<String> {
        match self {
            Self::Uninstall(pkg) | Self::AppDetails(pkg) => Some(pkg.to_uri()),
            Self::View(url) => Some(url.clone()),
            Self::HomeSettings | Self::UsageAccessSettings | Self::LaunchPackage(_) => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self, self.action()) {
            (Self::LaunchPackage(pkg), _) => write!(f, "launch {pkg}"),
            (_, Some(action)) => match self.data_uri() {
                Some(data) => write!(f, "{action} {data}"),
                None => f.write_str(action),
            },
            (_, None) => f.write_str("intent"),
        }
    }
}
