use crate::{document::PlistDocument, error::BumpError};

/// Stores `new_value` under `key`, persists the document once and returns the
/// value for downstream steps.
pub fn apply(document: &mut PlistDocument, key: &str, new_value: &str) -> Result<String, BumpError> {
    document.write_field(key, new_value);
    document.save()?;
    Ok(new_value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::temp_path_for;
    use std::fs;
    use tempfile::TempDir;

    const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>Example</string>
</dict>
</plist>
"#;

    #[test]
    fn creates_missing_field_and_returns_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Info.plist");
        fs::write(&path, PLIST).unwrap();

        let mut doc = PlistDocument::load(&path).unwrap();
        let returned = apply(&mut doc, "CFBundleShortVersionString", "1.0").unwrap();
        assert_eq!(returned, "1.0");

        let reloaded = PlistDocument::load(&path).unwrap();
        assert_eq!(reloaded.read_field("CFBundleShortVersionString"), Some("1.0"));
        assert_eq!(reloaded.read_field("CFBundleName"), Some("Example"));
    }

    #[test]
    fn failed_save_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Info.plist");
        fs::write(&path, PLIST).unwrap();
        let mut doc = PlistDocument::load(&path).unwrap();

        // A directory in place of the temp file makes the save fail before the rename.
        fs::create_dir(temp_path_for(&fs::canonicalize(&path).unwrap())).unwrap();

        let err = apply(&mut doc, "CFBundleShortVersionString", "2.0.0").unwrap_err();
        assert!(matches!(err, BumpError::Io { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLIST);
    }
}
