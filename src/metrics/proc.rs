//! # ProcMetrics: Linux metrics provider.
//!
//! Reads load average from `/proc/loadavg`, memory rows from
//! `/proc/meminfo`, and disk capacity via `statvfs`.
//!
//! ## Memory-table format
//! `/proc/meminfo` rows look like:
//! ```text
//! MemTotal:       16384516 kB
//! MemFree:         2216192 kB
//! ```
//! Matching is line-by-line, first match wins, and the identifier must
//! anchor at the start of the line ("Mem" never matches "MemTotal:", and
//! "MemFree" never matches "CmaFree:"). A row that matches the identifier
//! but is otherwise malformed is skipped, not an error.
//!
//! ## Source overrides
//! [`ProcMetrics::with_sources`] points the provider at alternative files,
//! which is how tests feed it fixtures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MetricsError;
use crate::metrics::provider::{MetricsRef, SystemMetrics};

const MEMINFO_PATH: &str = "/proc/meminfo";
const LOADAVG_PATH: &str = "/proc/loadavg";

/// Linux metrics provider backed by procfs and `statvfs`.
#[derive(Debug, Clone)]
pub struct ProcMetrics {
    meminfo: PathBuf,
    loadavg: PathBuf,
}

impl ProcMetrics {
    /// Creates a provider reading the standard procfs locations.
    pub fn new() -> Self {
        Self {
            meminfo: PathBuf::from(MEMINFO_PATH),
            loadavg: PathBuf::from(LOADAVG_PATH),
        }
    }

    /// Creates a provider reading the given meminfo/loadavg files instead of
    /// the standard procfs locations.
    pub fn with_sources(meminfo: impl Into<PathBuf>, loadavg: impl Into<PathBuf>) -> Self {
        Self {
            meminfo: meminfo.into(),
            loadavg: loadavg.into(),
        }
    }

    /// Creates the default provider as a shared handle.
    pub fn arc() -> MetricsRef {
        Arc::new(Self::new())
    }

    fn read_source(path: &Path) -> Result<String, MetricsError> {
        std::fs::read_to_string(path).map_err(|source| MetricsError::Unavailable {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for ProcMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemMetrics for ProcMetrics {
    async fn load_average(&self) -> Result<f64, MetricsError> {
        let contents = Self::read_source(&self.loadavg)?;
        parse_load_average(&contents).ok_or_else(|| MetricsError::Malformed {
            path: self.loadavg.display().to_string(),
        })
    }

    async fn free_disk_bytes(&self, path: &Path) -> Result<u64, MetricsError> {
        statvfs_bytes(path).map(|(free, _total)| free)
    }

    async fn total_disk_bytes(&self, path: &Path) -> Result<u64, MetricsError> {
        statvfs_bytes(path).map(|(_free, total)| total)
    }

    async fn memory_kb(&self, identifier: &str) -> Result<u64, MetricsError> {
        let contents = Self::read_source(&self.meminfo)?;
        Ok(parse_meminfo_kb(&contents, identifier).unwrap_or(0))
    }
}

/// Extracts the kB value for `identifier` from meminfo-formatted `contents`.
///
/// First match wins. A line matches when it starts with `identifier`,
/// followed by a colon, whitespace, an integer, whitespace, and a `kB`
/// suffix. Lines that fail any of those steps are skipped.
pub(crate) fn parse_meminfo_kb(contents: &str, identifier: &str) -> Option<u64> {
    for line in contents.lines() {
        let Some(rest) = line.strip_prefix(identifier) else {
            continue;
        };
        let Some(rest) = rest.strip_prefix(':') else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_suffix("kB") else {
            continue;
        };
        if let Ok(kb) = value.trim_end().parse::<u64>() {
            return Some(kb);
        }
    }
    None
}

/// Extracts the one-minute load average from loadavg-formatted `contents`
/// (`"0.42 0.30 0.25 1/123 4567"`).
pub(crate) fn parse_load_average(contents: &str) -> Option<f64> {
    contents.split_whitespace().next()?.parse().ok()
}

/// Returns `(free, total)` bytes for the filesystem containing `path`.
#[cfg(unix)]
fn statvfs_bytes(path: &Path) -> Result<(u64, u64), MetricsError> {
    let stat = nix::sys::statvfs::statvfs(path).map_err(|errno| MetricsError::Unavailable {
        path: path.display().to_string(),
        source: std::io::Error::from_raw_os_error(errno as i32),
    })?;
    let fragment = stat.fragment_size() as u64;
    let free = stat.blocks_available() as u64 * fragment;
    let total = stat.blocks() as u64 * fragment;
    Ok((free, total))
}

/// Returns `(free, total)` bytes for the filesystem containing `path`.
#[cfg(not(unix))]
fn statvfs_bytes(path: &Path) -> Result<(u64, u64), MetricsError> {
    Err(MetricsError::Unavailable {
        path: path.display().to_string(),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "filesystem statistics are only available on unix",
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MEMINFO: &str = "MemTotal:       16384516 kB\n\
                           MemFree:         2216192 kB\n\
                           MemAvailable:    9218040 kB\n\
                           Cached:          5612880 kB\n\
                           SwapFree:        4194300 kB\n";

    #[test]
    fn test_meminfo_basic_lookup() {
        assert_eq!(parse_meminfo_kb(MEMINFO, "MemTotal"), Some(16_384_516));
        assert_eq!(parse_meminfo_kb(MEMINFO, "MemFree"), Some(2_216_192));
    }

    #[test]
    fn test_meminfo_identifier_anchors_at_line_start() {
        // "Free" appears inside "MemFree:" and "SwapFree:", but no line
        // starts with it.
        assert_eq!(parse_meminfo_kb(MEMINFO, "Free"), None);
        // A strict prefix of a longer identifier never matches: the colon
        // check fails on "MemTotal:".
        assert_eq!(parse_meminfo_kb(MEMINFO, "Mem"), None);
    }

    #[test]
    fn test_meminfo_first_match_wins() {
        let dup = "MemFree:  100 kB\nMemFree:  200 kB\n";
        assert_eq!(parse_meminfo_kb(dup, "MemFree"), Some(100));
    }

    #[test]
    fn test_meminfo_malformed_rows_are_skipped() {
        let noisy = "MemFree:  not-a-number kB\n\
                     MemFree:  321\n\
                     MemFree:  123 kB\n";
        assert_eq!(parse_meminfo_kb(noisy, "MemFree"), Some(123));
    }

    #[test]
    fn test_meminfo_requires_kb_suffix() {
        assert_eq!(parse_meminfo_kb("HugePages_Total:       0\n", "HugePages_Total"), None);
    }

    #[test]
    fn test_loadavg_first_field() {
        assert_eq!(parse_load_average("0.42 0.30 0.25 1/123 4567\n"), Some(0.42));
        assert_eq!(parse_load_average("garbage"), None);
        assert_eq!(parse_load_average(""), None);
    }

    #[tokio::test]
    async fn test_missing_identifier_is_zero_sentinel() {
        let mut meminfo = tempfile::NamedTempFile::new().unwrap();
        meminfo.write_all(MEMINFO.as_bytes()).unwrap();
        let provider = ProcMetrics::with_sources(meminfo.path(), "/nonexistent/loadavg");

        assert_eq!(provider.memory_kb("NoSuchRow").await.unwrap(), 0);
        assert_eq!(provider.total_memory_kb().await.unwrap(), 16_384_516);
    }

    #[tokio::test]
    async fn test_unreadable_source_is_an_error() {
        let provider = ProcMetrics::with_sources("/nonexistent/meminfo", "/nonexistent/loadavg");

        let err = provider.memory_kb("MemTotal").await.unwrap_err();
        assert_eq!(err.as_label(), "metrics_unavailable");
        let err = provider.load_average().await.unwrap_err();
        assert_eq!(err.as_label(), "metrics_unavailable");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_statvfs_reports_capacity() {
        let provider = ProcMetrics::new();
        let root = Path::new("/");

        let total = provider.total_disk_bytes(root).await.unwrap();
        let free = provider.free_disk_bytes(root).await.unwrap();
        assert!(total > 0);
        assert!(free <= total);
    }
}
