use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use crate::error::OutlineError;
use crate::markdown::{ContentKeying, HeadingNode, MarkdownDocument};

#[derive(Debug)]
struct CachedOutline {
    modified: Option<SystemTime>,
    outline: Arc<[HeadingNode]>,
}

/// Outlines already parsed, keyed by source filename.
///
/// Outlines are immutable once built and handed out as shared slices. An
/// entry is reparsed when the file's modification time no longer matches.
#[derive(Debug, Default)]
pub struct OutlineCache {
    entries: RwLock<HashMap<(PathBuf, ContentKeying), CachedOutline>>,
}

impl OutlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        path: &Path,
        keying: ContentKeying,
    ) -> Result<Arc<[HeadingNode]>, OutlineError> {
        let key = (path.to_path_buf(), keying);
        let modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok();

        if let Some(cached) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            if modified.is_some() && cached.modified == modified {
                tracing::debug!(path = %path.display(), "Outline cache hit");
                return Ok(Arc::clone(&cached.outline));
            }
        }

        let outline: Arc<[HeadingNode]> =
            MarkdownDocument::open(path, keying)?.into_outline().into();
        tracing::debug!(
            path = %path.display(),
            headings = outline.len(),
            "Parsed outline"
        );

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                CachedOutline {
                    modified,
                    outline: Arc::clone(&outline),
                },
            );

        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn touch(path: &Path, offset_secs: u64) {
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
            .unwrap();
    }

    #[test]
    fn test_second_load_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.md");
        std::fs::write(&path, "# One\nbody\n").unwrap();

        let cache = OutlineCache::new();
        let first = cache.get_or_load(&path, ContentKeying::ByPath).unwrap();
        let second = cache.get_or_load(&path, ContentKeying::ByPath).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_modified_file_is_reparsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.md");
        std::fs::write(&path, "# One\nbody\n").unwrap();

        let cache = OutlineCache::new();
        let first = cache.get_or_load(&path, ContentKeying::ByPath).unwrap();
        assert_eq!(first.len(), 1);

        std::fs::write(&path, "# One\n# Two\n").unwrap();
        touch(&path, 60);

        let second = cache.get_or_load(&path, ContentKeying::ByPath).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_keying_is_part_of_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.md");
        std::fs::write(&path, "# A\n## X\nfirst\n## X\nsecond\n").unwrap();

        let cache = OutlineCache::new();
        let by_path = cache.get_or_load(&path, ContentKeying::ByPath).unwrap();
        let by_index = cache.get_or_load(&path, ContentKeying::ByIndex).unwrap();
        assert_eq!(by_path[1].content, "second");
        assert_eq!(by_index[1].content, "first");
    }

    #[test]
    fn test_load_errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.md");
        let cache = OutlineCache::new();
        assert!(cache.get_or_load(&path, ContentKeying::ByPath).is_err());

        std::fs::write(&path, "# Late\n").unwrap();
        assert_eq!(cache.get_or_load(&path, ContentKeying::ByPath).unwrap().len(), 1);
    }
}
