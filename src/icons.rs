//! Weather condition icon cache
//!
//! Icons are keyed by the forecast condition code and stored as
//! `<images_path>/<code>.gif`. Entries never expire and are never
//! revalidated against the remote image.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::{FeedError, Result};

const ICON_EXTENSION: &str = "gif";

/// Existence check plus write, keyed by condition code
pub trait ImageCache {
    /// Whether an icon for `code` is already cached; fails for codes the
    /// cache cannot hold
    fn exists(&self, code: &str) -> Result<bool>;

    /// Store the icon bytes for `code`, verbatim
    fn store(&mut self, code: &str, bytes: &[u8]) -> Result<()>;
}

/// Remote location of the icon for `code`
#[must_use]
pub fn icon_url(base_url: &str, code: &str) -> String {
    format!("{}/{code}.{ICON_EXTENSION}", base_url.trim_end_matches('/'))
}

/// Icon cache in a local directory.
///
/// The directory has to exist already; it is never created here.
#[derive(Debug, Clone)]
pub struct FsImageCache {
    dir: PathBuf,
}

impl FsImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File an icon is cached in
    pub fn icon_path(&self, code: &str) -> Result<PathBuf> {
        validate_code(code)?;
        Ok(self.dir.join(format!("{code}.{ICON_EXTENSION}")))
    }
}

impl ImageCache for FsImageCache {
    fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.icon_path(code)?.exists())
    }

    fn store(&mut self, code: &str, bytes: &[u8]) -> Result<()> {
        let path = self.icon_path(code)?;
        fs::write(&path, bytes).map_err(|e| {
            FeedError::cache(format!("Failed to write icon {}: {e}", path.display()))
        })?;
        debug!("Cached {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }
}

/// The code becomes a file name, so it must be a single plain path component
fn validate_code(code: &str) -> Result<()> {
    let invalid = code.is_empty()
        || code == "."
        || code == ".."
        || code.contains(['/', '\\'])
        || code.contains('\0');

    if invalid {
        return Err(FeedError::cache(format!(
            "Icon code '{code}' cannot be used as a file name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("http://l.yimg.com/us.yimg.com/i/us/we/52", "34"),
            "http://l.yimg.com/us.yimg.com/i/us/we/52/34.gif"
        );
        assert_eq!(icon_url("http://icons.test/", "3"), "http://icons.test/3.gif");
    }

    #[test]
    fn test_store_then_exists() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = FsImageCache::new(temp_dir.path());

        assert!(!cache.exists("34").unwrap());
        cache.store("34", b"GIF89a").unwrap();

        assert!(cache.exists("34").unwrap());
        let stored = fs::read(temp_dir.path().join("34.gif")).unwrap();
        assert_eq!(stored, b"GIF89a");
    }

    #[test]
    fn test_existing_file_is_a_hit() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("11.gif"), b"old").unwrap();

        let cache = FsImageCache::new(temp_dir.path());
        assert!(cache.exists("11").unwrap());
        assert!(!cache.exists("12").unwrap());
    }

    #[test]
    fn test_missing_directory_is_not_created() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("images");
        let mut cache = FsImageCache::new(&dir);

        let result = cache.store("34", b"GIF89a");
        assert!(matches!(result, Err(FeedError::Cache { .. })));
        assert!(!dir.exists());
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("../34")]
    #[case("a/b")]
    #[case(r"a\b")]
    fn test_unsafe_codes_rejected(#[case] code: &str) {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = FsImageCache::new(temp_dir.path());

        assert!(matches!(cache.exists(code), Err(FeedError::Cache { .. })));
        assert!(matches!(
            cache.store(code, b"GIF89a"),
            Err(FeedError::Cache { .. })
        ));
    }
}
