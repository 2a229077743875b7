use crate::types::options::{BumpOptions, BumpType, VersionSourceKind};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "plistbump.toml";

/// Defaults read from `plistbump.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub plist: Option<PathBuf>,
    pub key: Option<String>,
    pub bump_type: Option<BumpType>,
    pub version_source: Option<VersionSourceKind>,
    pub omit_zero_patch_version: Option<bool>,
    pub app_identifier: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: FileConfig,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Default)]
pub struct BumpOverrides {
    pub plist: Option<PathBuf>,
    pub key: Option<String>,
    pub version_number: Option<String>,
    pub bump_type: Option<BumpType>,
    pub version_source: Option<VersionSourceKind>,
    pub omit_zero_patch_version: Option<bool>,
    pub app_identifier: Option<String>,
    pub country: Option<String>,
}

/// Loads the config file. An explicit path must exist; the default
/// `plistbump.toml` in `cwd` is optional.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<LoadedConfig>> {
    let path = match explicit {
        Some(p) => {
            let p = cwd.join(p);
            if !p.is_file() {
                bail!("Config file not found at '{}'", p.display());
            }
            p
        }
        None => {
            let p = cwd.join(CONFIG_FILE_NAME);
            if !p.is_file() {
                return Ok(None);
            }
            p
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: FileConfig =
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(LoadedConfig { path, config }))
}

/// Merges command line, config file and built-in defaults into the options of
/// one invocation.
pub fn build_options(
    overrides: BumpOverrides,
    loaded: Option<LoadedConfig>,
    cwd: &Path,
) -> Result<BumpOptions> {
    let (base_dir, file) = match loaded {
        Some(l) => {
            let dir = l
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf());
            (dir, l.config)
        }
        None => (cwd.to_path_buf(), FileConfig::default()),
    };

    let plist_path = match (overrides.plist, file.plist) {
        (Some(p), _) => cwd.join(p),
        (None, Some(p)) => base_dir.join(p),
        (None, None) => bail!(
            "No property list given. Pass --plist or set `plist` in {}",
            CONFIG_FILE_NAME
        ),
    };

    let mut options = BumpOptions::new(plist_path);
    if let Some(key) = non_empty(overrides.key.or(file.key)) {
        options.key = key;
    }
    options.version_number = non_empty(overrides.version_number);
    options.bump_type = overrides.bump_type.or(file.bump_type).unwrap_or_default();
    options.version_source = overrides
        .version_source
        .or(file.version_source)
        .unwrap_or_default();
    options.omit_zero_patch_version = overrides
        .omit_zero_patch_version
        .or(file.omit_zero_patch_version)
        .unwrap_or(false);
    options.app_identifier = non_empty(overrides.app_identifier.or(file.app_identifier));
    options.country = non_empty(overrides.country.or(file.country));

    Ok(options)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_config() {
        let cwd = Path::new("/work");
        let options = build_options(
            BumpOverrides {
                plist: Some(PathBuf::from("App/Info.plist")),
                ..Default::default()
            },
            None,
            cwd,
        )
        .unwrap();

        assert_eq!(options.plist_path, PathBuf::from("/work/App/Info.plist"));
        assert_eq!(options.key, "CFBundleShortVersionString");
        assert_eq!(options.bump_type, BumpType::Patch);
        assert_eq!(options.version_source, VersionSourceKind::Local);
        assert!(!options.omit_zero_patch_version);
        assert_eq!(options.version_number, None);
    }

    #[test]
    fn missing_plist_is_rejected() {
        let err = build_options(BumpOverrides::default(), None, Path::new("/work")).unwrap_err();
        assert!(err.to_string().contains("No property list"));
    }

    #[test]
    fn empty_version_number_counts_as_absent() {
        let options = build_options(
            BumpOverrides {
                plist: Some(PathBuf::from("Info.plist")),
                version_number: Some(String::new()),
                ..Default::default()
            },
            None,
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(options.version_number, None);
    }

    #[test]
    fn config_file_fills_gaps_and_cli_wins() {
        let dir = TempDir::new().unwrap();
        let ios = dir.path().join("ios");
        fs::create_dir(&ios).unwrap();
        fs::write(
            ios.join(CONFIG_FILE_NAME),
            r#"
plist = "App/Info.plist"
bump_type = "minor"
version_source = "appstore"
omit_zero_patch_version = true
app_identifier = "com.example.app"
country = "de"
"#,
        )
        .unwrap();

        let loaded = load_config(Some(Path::new("ios/plistbump.toml")), dir.path())
            .unwrap()
            .unwrap();
        let options = build_options(
            BumpOverrides {
                bump_type: Some(BumpType::Major),
                ..Default::default()
            },
            Some(loaded),
            dir.path(),
        )
        .unwrap();

        assert_eq!(options.plist_path, ios.join("App/Info.plist"));
        assert_eq!(options.bump_type, BumpType::Major);
        assert_eq!(options.version_source, VersionSourceKind::AppStore);
        assert!(options.omit_zero_patch_version);
        assert_eq!(options.app_identifier.as_deref(), Some("com.example.app"));
        assert_eq!(options.country.as_deref(), Some("de"));
    }

    #[test]
    fn plist_alias_selects_local_source() {
        let config: FileConfig = toml::from_str(r#"version_source = "plist""#).unwrap();
        assert_eq!(config.version_source, Some(VersionSourceKind::Local));
    }

    #[test]
    fn unknown_bump_type_is_rejected() {
        assert!(toml::from_str::<FileConfig>(r#"bump_type = "huge""#).is_err());
    }

    #[test]
    fn default_config_is_optional() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(None, dir.path()).unwrap().is_none());
        assert!(load_config(Some(Path::new("missing.toml")), dir.path()).is_err());
    }
}
