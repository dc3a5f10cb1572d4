use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::timestamp;

/// Upload storage usage on the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageInfo {
    pub total_size: u64,
    pub file_count: u64,
    pub max_size: u64,
    pub used_percentage: f64,
}

/// A stored upload as listed by `GET /files`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredFile {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub modified_at: Option<DateTime<Utc>>,
    /// Server-side path; the handle for delete and move.
    pub path: String,
}

/// One page of stored files, newest first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<StoredFile>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

impl FileListing {
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}

/// Response of `POST /cleanup`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CleanupReport {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cleaned_count: u64,
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
