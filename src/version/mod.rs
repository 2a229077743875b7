pub mod bumper;
pub mod source;
pub mod writer;

use crate::{
    appstore::VersionLookup,
    document::PlistDocument,
    error::BumpError,
    types::options::{BUNDLE_IDENTIFIER_KEY, BumpOptions, VersionSourceKind},
    utils::{
        logger::{LogLevel, Logger},
        spinner::run_step,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// Baseline the new version was computed from; the stored value when an
    /// explicit override skipped resolution.
    pub previous: Option<String>,
    pub version: String,
}

/// Resolves, bumps and writes the version of one property list.
///
/// Nothing is written unless resolution and computation both succeed.
pub fn increment_version_number(
    options: &BumpOptions,
    lookup: &dyn VersionLookup,
) -> Result<BumpOutcome, BumpError> {
    let logger = Logger::new();
    let mut document = PlistDocument::load(&options.plist_path)?;
    logger.log_message(
        LogLevel::Debug,
        &format!(
            "Loaded {} ({:?})",
            document.path().display(),
            document.format()
        ),
    );

    let explicit = options.version_number.as_deref().filter(|v| !v.is_empty());
    let stored = document.read_field(&options.key).map(str::to_string);

    if explicit.is_some() && options.version_source == VersionSourceKind::AppStore {
        logger.log_message(
            LogLevel::Warning,
            "Explicit version number given; skipping the App Store lookup",
        );
    }

    let previous = match explicit {
        Some(_) => stored,
        None => Some(source::resolve(
            options.version_source,
            &options.key,
            stored.as_deref(),
            || {
                let app_identifier = app_identifier_for(options, &document)?;
                run_step(
                    &format!("Looking up App Store version of {}", app_identifier),
                    |v: &String| format!("App Store version of {} is {}", app_identifier, v),
                    || lookup.latest_version(&app_identifier),
                )
            },
        )?),
    };

    let version = bumper::bump(
        previous.as_deref().unwrap_or_default(),
        explicit,
        options.bump_type,
        options.omit_zero_patch_version,
    )?;

    let version = writer::apply(&mut document, &options.key, &version)?;
    Ok(BumpOutcome { previous, version })
}

fn app_identifier_for(options: &BumpOptions, document: &PlistDocument) -> Result<String, BumpError> {
    let identifier = match options.app_identifier.as_deref() {
        Some(id) => id.to_string(),
        None => document
            .read_field(BUNDLE_IDENTIFIER_KEY)
            .map(str::to_string)
            .ok_or_else(|| {
                BumpError::Lookup(format!(
                    "No app identifier given and {} is missing from the property list",
                    BUNDLE_IDENTIFIER_KEY
                ))
            })?,
    };

    if identifier.contains("$(") {
        return Err(BumpError::Lookup(format!(
            "App identifier '{}' references an unresolved build setting; pass --app-identifier",
            identifier
        )));
    }
    Ok(identifier)
}
