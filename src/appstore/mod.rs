pub mod lookup;

use crate::error::BumpError;

/// Returns the version currently published for an application identifier.
pub trait VersionLookup {
    fn latest_version(&self, app_identifier: &str) -> Result<String, BumpError>;
}
