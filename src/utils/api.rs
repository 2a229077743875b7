pub fn get_lookup_api_base_url() -> String {
    std::env::var("PLISTBUMP_LOOKUP_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "https://itunes.apple.com".to_string())
}
