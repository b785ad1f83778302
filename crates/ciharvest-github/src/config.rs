//! GitHub endpoint configuration

pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Builds the API URL from a web base URL
pub fn build_api_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "https://api.github.com".to_string();
    }

    // GitHub Enterprise uses /api/v3, while GitHub.com uses api.github.com
    if trimmed.contains("api.github.com") || trimmed.ends_with("/api/v3") {
        trimmed.to_string()
    } else if trimmed.contains("github.com") {
        "https://api.github.com".to_string()
    } else {
        format!("{trimmed}/api/v3")
    }
}

/// Splits `owner/name`
pub(crate) fn parse_repo(repo: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Some((parts[0].to_string(), parts[1].to_string()))
    } else {
        None
    }
}

/// Reads the `page` parameter of a pagination link
pub(crate) fn page_from_query(query: &str) -> Option<u32> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
