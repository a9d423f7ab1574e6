use log::debug;
use std::collections::HashSet;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Directories already listed during one recursive walk, keyed by
/// (device, inode) so two paths to the same directory count once.
pub struct Visited {
    seen: HashSet<(u64, u64)>,
}

impl Visited {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Records `dir`; false if it was listed before. A directory that
    /// can't be stat'ed is let through so its error gets reported.
    pub fn enter(&mut self, dir: &Path) -> bool {
        let Ok(meta) = fs::metadata(dir) else {
            return true;
        };
        if self.seen.insert((meta.dev(), meta.ino())) {
            true
        } else {
            debug!("already listed {}, skipping", dir.display());
            false
        }
    }
}
