use crate::{error::BumpError, types::options::BumpType};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` triple. Missing trailing components parse as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Returns the next version for the given bump policy.
    pub fn bumped(&self, bump: BumpType) -> Result<Version, BumpError> {
        let overflow = || {
            BumpError::invalid_version(
                &self.to_string(),
                format!("bumped component exceeds the supported range (max {})", u64::MAX),
            )
        };

        let next = match bump {
            BumpType::Major => Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpType::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpType::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };

        Ok(next)
    }

    /// Renders the version, dropping a zero patch when `omit_zero_patch` is set.
    pub fn render(&self, omit_zero_patch: bool) -> String {
        if omit_zero_patch && self.patch == 0 {
            format!("{}.{}", self.major, self.minor)
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(current: &str) -> Result<Self, Self::Err> {
        let trimmed = current.trim();
        let mut parts = [0u64; 3];

        for (i, segment) in trimmed.split('.').take(3).enumerate() {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BumpError::invalid_version(
                    current,
                    format!("segment '{}' is not a non-negative integer", segment),
                ));
            }
            // digits only, so the one possible failure is a component wider than u64
            parts[i] = segment.parse::<u64>().map_err(|_| {
                BumpError::invalid_version(
                    current,
                    format!(
                        "component '{}' exceeds the supported range (max {})",
                        segment,
                        u64::MAX
                    ),
                )
            })?;
        }

        Ok(Version::new(parts[0], parts[1], parts[2]))
    }
}

/// Computes the new version string.
///
/// A non-empty `explicit` value is returned verbatim and skips parsing, the bump
/// policy and `omit_zero_patch` formatting.
pub fn bump(
    current: &str,
    explicit: Option<&str>,
    bump_type: BumpType,
    omit_zero_patch: bool,
) -> Result<String, BumpError> {
    if let Some(explicit) = explicit.filter(|v| !v.is_empty()) {
        return Ok(explicit.to_string());
    }

    let version: Version = current.parse()?;
    Ok(version.bumped(bump_type)?.render(omit_zero_patch))
}
