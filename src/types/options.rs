use serde::Deserialize;
use std::path::PathBuf;

/// Key holding the marketing version in an `Info.plist`.
pub const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

/// Key holding the bundle identifier, used as the App Store lookup fallback.
pub const BUNDLE_IDENTIFIER_KEY: &str = "CFBundleIdentifier";

/// Shared identifier under which the new version is reported to the pipeline.
pub const VERSION_NUMBER: &str = "VERSION_NUMBER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    Patch,
    Minor,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum VersionSourceKind {
    /// Read the current value from the property list itself
    #[default]
    #[serde(rename = "local", alias = "plist")]
    #[value(name = "local", alias = "plist")]
    Local,

    /// Ask the App Store for the currently published version
    #[serde(rename = "appstore")]
    #[value(name = "appstore")]
    AppStore,
}

/// Fully resolved parameters of a single `bump` invocation.
#[derive(Debug, Clone)]
pub struct BumpOptions {
    pub plist_path: PathBuf,
    pub key: String,
    /// Explicit override; `None` when absent or empty.
    pub version_number: Option<String>,
    pub bump_type: BumpType,
    pub version_source: VersionSourceKind,
    pub omit_zero_patch_version: bool,
    pub app_identifier: Option<String>,
    pub country: Option<String>,
}

impl BumpOptions {
    pub fn new(plist_path: impl Into<PathBuf>) -> Self {
        BumpOptions {
            plist_path: plist_path.into(),
            key: SHORT_VERSION_KEY.to_string(),
            version_number: None,
            bump_type: BumpType::default(),
            version_source: VersionSourceKind::default(),
            omit_zero_patch_version: false,
            app_identifier: None,
            country: None,
        }
    }
}
