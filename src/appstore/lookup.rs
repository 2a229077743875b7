use crate::{appstore::VersionLookup, error::BumpError, utils::api::get_lookup_api_base_url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(rename = "resultCount", default)]
    result_count: u64,
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    version: Option<String>,
}

/// Queries the public iTunes lookup endpoint for the live App Store version.
#[derive(Debug, Clone)]
pub struct AppStoreLookup {
    base_url: String,
    country: Option<String>,
}

impl AppStoreLookup {
    pub fn new(country: Option<String>) -> Self {
        AppStoreLookup {
            base_url: get_lookup_api_base_url(),
            country,
        }
    }

    fn lookup_url(&self) -> String {
        format!("{}/lookup", self.base_url.trim_end_matches('/'))
    }
}

impl VersionLookup for AppStoreLookup {
    fn latest_version(&self, app_identifier: &str) -> Result<String, BumpError> {
        let mut query: Vec<(&str, &str)> = vec![("bundleId", app_identifier)];
        if let Some(country) = self.country.as_deref() {
            query.push(("country", country));
        }

        let client = reqwest::blocking::Client::new();
        let response = client
            .get(self.lookup_url())
            .query(&query)
            .send()
            .map_err(|e| BumpError::Lookup(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BumpError::Lookup(format!(
                "App Store responded with HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .map_err(|e| BumpError::Lookup(format!("Failed to read response body: {}", e)))?;

        parse_lookup_response(&body, app_identifier)
    }
}

/// Extracts the published version from an iTunes lookup response body.
pub fn parse_lookup_response(body: &str, app_identifier: &str) -> Result<String, BumpError> {
    let parsed: LookupResponse = serde_json::from_str(body)
        .map_err(|e| BumpError::Lookup(format!("Malformed lookup response: {}", e)))?;

    let first = match parsed.results.into_iter().next() {
        Some(result) if parsed.result_count > 0 => result,
        _ => {
            return Err(BumpError::Lookup(format!(
                "No App Store listing found for '{}'",
                app_identifier
            )));
        }
    };

    first
        .version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            BumpError::Lookup(format!(
                "App Store listing for '{}' has no version",
                app_identifier
            ))
        })
}
