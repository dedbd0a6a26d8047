//! Version checking against the latest release.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Current version of cairn.
///
/// Release pipelines may override via the `CAIRN_VERSION` build environment
/// variable; unreleased builds set it to [`DEVELOPMENT_VERSION`].
pub const VERSION: &str = match option_env!("CAIRN_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Sentinel version reported by unreleased builds.
///
/// A build carrying this version writes no version markers when vendoring
/// and bypasses module compatibility checks entirely.
pub const DEVELOPMENT_VERSION: &str = "devel";

/// GitHub API URL for releases.
const GITHUB_API_URL: &str = "https://api.github.com/repos/cairn-dev/cairn/releases/latest";

/// How often to check for updates (1 day).
const CHECK_INTERVAL_SECS: i64 = 86400;

/// Information about an available update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Current version.
    pub current: String,
    /// Latest available version.
    pub latest: String,
    /// Whether an update is available.
    pub update_available: bool,
    /// Release URL.
    pub release_url: Option<String>,
    /// When this check was performed.
    pub checked_at: DateTime<Utc>,
}

/// Cached update check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpdateCache {
    /// Last update info.
    info: UpdateInfo,
    /// When the cache was written.
    cached_at: DateTime<Utc>,
}

/// Check for available updates.
///
/// Returns cached result if within check interval.
pub fn check_for_updates() -> Option<UpdateInfo> {
    if let Some(cached) = load_cache() {
        let age = Utc::now()
            .signed_duration_since(cached.cached_at)
            .num_seconds();
        if age < CHECK_INTERVAL_SECS {
            return Some(cached.info);
        }
    }

    match fetch_latest_version() {
        Ok(info) => {
            let _ = save_cache(&info);
            Some(info)
        }
        // Return cached result even if expired.
        Err(_) => load_cache().map(|c| c.info),
    }
}

/// Check for updates without using cache.
pub fn check_for_updates_fresh() -> Result<UpdateInfo> {
    fetch_latest_version()
}

/// Fetch the latest version from GitHub.
fn fetch_latest_version() -> Result<UpdateInfo> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("cairn")
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let response: serde_json::Value = client
        .get(GITHUB_API_URL)
        .send()?
        .json()
        .context("Failed to parse GitHub API response")?;

    let tag = response["tag_name"]
        .as_str()
        .context("No tag_name in response")?
        .trim_start_matches('v');

    let release_url = response["html_url"].as_str().map(String::from);

    Ok(UpdateInfo {
        current: VERSION.to_string(),
        latest: tag.to_string(),
        update_available: is_newer_version(tag, VERSION),
        release_url,
        checked_at: Utc::now(),
    })
}

/// True when `latest` is a release strictly newer than `current`.
///
/// Development builds and unparsable tags never count as updates.
fn is_newer_version(latest: &str, current: &str) -> bool {
    match (Version::parse(latest), Version::parse(current)) {
        (Ok(latest), Ok(current)) => latest > current,
        _ => false,
    }
}

/// Get the cache file path.
fn cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("cairn").join("update_check.json"))
}

/// Load cached update info.
fn load_cache() -> Option<UpdateCache> {
    let path = cache_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save update info to cache.
fn save_cache(info: &UpdateInfo) -> Result<()> {
    let path = cache_path().context("No cache directory")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let cache = UpdateCache {
        info: info.clone(),
        cached_at: Utc::now(),
    };

    let content = serde_json::to_string_pretty(&cache)?;
    fs::write(path, content)?;

    Ok(())
}

/// Clear the update check cache.
pub fn clear_cache() -> Result<()> {
    if let Some(path) = cache_path() {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}
