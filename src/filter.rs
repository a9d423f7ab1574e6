use crate::entry::Entry;
use log::debug;
use std::fs;
use std::path::Path;

/// Applies the hidden-entry policy to a raw directory batch.
///
/// With `show_hidden`, `.` and `..` are synthesized in front of the
/// untouched batch; a pseudo-entry whose target can't be stat'ed is left
/// out. Without it, every dot-prefixed name is dropped.
pub fn filter(entries: Vec<Entry>, show_hidden: bool, dir: &Path) -> Vec<Entry> {
    if !show_hidden {
        return entries
            .into_iter()
            .filter(|e| !e.name().starts_with('.'))
            .collect();
    }

    // `dir/..` lets the kernel resolve the parent, so `.` maps to the
    // real parent of the working directory rather than a string parent.
    let parent = dir.join("..");
    let mut out = Vec::with_capacity(entries.len() + 2);
    for (name, target) in [(".", dir), ("..", parent.as_path())] {
        match fs::metadata(target) {
            Ok(meta) => out.push(Entry::synthetic(meta, name, target)),
            Err(err) => debug!("skipping '{}' for {}: {}", name, dir.display(), err),
        }
    }
    out.extend(entries);
    out
}
