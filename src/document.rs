use crate::error::BumpError;
use plist::{Dictionary, Value};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Xml,
    Binary,
}

/// A property list loaded from disk. Saving keeps the on-disk format.
#[derive(Debug, Clone)]
pub struct PlistDocument {
    path: PathBuf,
    format: PlistFormat,
    root: Dictionary,
}

impl PlistDocument {
    pub fn load(path: &Path) -> Result<Self, BumpError> {
        let bytes = fs::read(path).map_err(|source| BumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = if bytes.starts_with(b"bplist") {
            PlistFormat::Binary
        } else {
            PlistFormat::Xml
        };

        let value = Value::from_reader(Cursor::new(bytes)).map_err(|e| BumpError::Document {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let root = value.into_dictionary().ok_or_else(|| BumpError::Document {
            path: path.to_path_buf(),
            message: "root element is not a dictionary".to_string(),
        })?;

        Ok(PlistDocument {
            path: path.to_path_buf(),
            format,
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> PlistFormat {
        self.format
    }

    /// Returns the field as a string, or `None` when it is absent or not a string.
    pub fn read_field(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(Value::as_string)
    }

    pub fn write_field(&mut self, key: &str, value: &str) {
        self.root
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Rewrites the backing file through a sibling temp file and a rename, so a
    /// failed save leaves the original untouched. Symlinks are followed and the
    /// target keeps its permissions.
    pub fn save(&self) -> Result<(), BumpError> {
        let bytes = self.serialize()?;

        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| BumpError::Io { path, source }
        };

        let target = fs::canonicalize(&self.path).map_err(io_err(&self.path))?;
        let permissions = fs::metadata(&target)
            .map_err(io_err(&target))?
            .permissions();
        let tmp = temp_path_for(&target);

        // create_new: never clobber a file that happens to carry the temp name
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .map_err(io_err(&tmp))?;

        let written = write_and_sync(file, &bytes, permissions)
            .map_err(io_err(&tmp))
            .and_then(|_| fs::rename(&tmp, &target).map_err(io_err(&target)));

        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }

    fn serialize(&self) -> Result<Vec<u8>, BumpError> {
        let value = Value::Dictionary(self.root.clone());
        let mut out: Vec<u8> = Vec::new();
        let result = match self.format {
            PlistFormat::Xml => value.to_writer_xml(&mut out),
            PlistFormat::Binary => value.to_writer_binary(&mut out),
        };
        result.map_err(|e| BumpError::Document {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        if self.format == PlistFormat::Xml && !out.ends_with(b"\n") {
            out.push(b'\n');
        }
        Ok(out)
    }
}

fn write_and_sync(
    mut file: fs::File,
    bytes: &[u8],
    permissions: fs::Permissions,
) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.set_permissions(permissions)?;
    file.sync_all()
}

/// Hidden, process-unique sibling of `target` used while saving.
pub(crate) fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
