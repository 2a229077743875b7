use crate::{error::BumpError, types::options::VersionSourceKind};

/// Where the baseline version of an invocation comes from.
pub trait VersionSource {
    fn current_version(self) -> Result<String, BumpError>;
}

/// Uses the value already stored in the document field.
pub struct LocalFieldSource<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl VersionSource for LocalFieldSource<'_> {
    fn current_version(self) -> Result<String, BumpError> {
        self.value
            .map(str::to_string)
            .ok_or_else(|| BumpError::MissingField {
                key: self.key.to_string(),
            })
    }
}

/// Delegates to an external lookup; its result is returned unchanged.
pub struct RemoteLookupSource<F> {
    pub lookup: F,
}

impl<F> VersionSource for RemoteLookupSource<F>
where
    F: FnOnce() -> Result<String, BumpError>,
{
    fn current_version(self) -> Result<String, BumpError> {
        let version = (self.lookup)()?;
        if version.trim().is_empty() {
            return Err(BumpError::Lookup("no version was returned".to_string()));
        }
        Ok(version)
    }
}

/// Resolves the baseline version. The lookup only runs for the remote source.
pub fn resolve<F>(
    kind: VersionSourceKind,
    key: &str,
    field_value: Option<&str>,
    lookup: F,
) -> Result<String, BumpError>
where
    F: FnOnce() -> Result<String, BumpError>,
{
    match kind {
        VersionSourceKind::Local => LocalFieldSource {
            key,
            value: field_value,
        }
        .current_version(),
        VersionSourceKind::AppStore => RemoteLookupSource { lookup }.current_version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_lookup() -> Result<String, BumpError> {
        panic!("lookup must not run for the local source")
    }

    #[test]
    fn local_returns_field_verbatim() {
        let v = resolve(
            VersionSourceKind::Local,
            "CFBundleShortVersionString",
            Some(" 0.9.14"),
            unreachable_lookup,
        )
        .unwrap();
        assert_eq!(v, " 0.9.14");
    }

    #[test]
    fn local_without_field_is_missing_field() {
        let err = resolve(
            VersionSourceKind::Local,
            "CFBundleShortVersionString",
            None,
            unreachable_lookup,
        )
        .unwrap_err();
        match err {
            BumpError::MissingField { key } => assert_eq!(key, "CFBundleShortVersionString"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remote_ignores_document_value() {
        let v = resolve(
            VersionSourceKind::AppStore,
            "CFBundleShortVersionString",
            Some("0.9.14"),
            || Ok("2.0.0".to_string()),
        )
        .unwrap();
        assert_eq!(v, "2.0.0");
    }

    #[test]
    fn remote_failures_propagate() {
        let err = resolve(VersionSourceKind::AppStore, "k", None, || {
            Err(BumpError::Lookup("HTTP 503".into()))
        })
        .unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn remote_blank_version_is_unusable() {
        let err = resolve(VersionSourceKind::AppStore, "k", None, || Ok("  ".into())).unwrap_err();
        assert!(matches!(err, BumpError::Lookup(_)));
    }
}
