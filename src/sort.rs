use crate::entry::Entry;
use std::cmp::Reverse;
use std::time::SystemTime;

/// Base ordering of a name.
///
/// Buckets run `.`, `..`, dot-prefixed names (compared without the dot),
/// then everything else. Inside a bucket names compare case-insensitively,
/// and the exact name breaks any remaining tie so the order is total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameKey {
    bucket: u8,
    folded: String,
    exact: String,
}

impl NameKey {
    pub fn new(name: &str) -> Self {
        let (bucket, stem) = match name {
            "." => (0, ""),
            ".." => (1, ""),
            _ => match name.strip_prefix('.') {
                Some(rest) => (2, rest),
                None => (3, name),
            },
        };
        Self {
            bucket,
            folded: stem.to_lowercase(),
            exact: name.to_string(),
        }
    }
}

/// Orders a batch by name, or newest-first by mtime with the name order
/// as tie-break, then optionally flips the whole result.
pub fn sort(entries: Vec<Entry>, time_sort: bool, reverse: bool) -> Vec<Entry> {
    order(entries, time_sort, reverse, |e| NameKey::new(&e.name()))
}

/// Same policy for path arguments, keyed on the last path component so
/// `./b` sorts next to `b` instead of among dot-names. The full path
/// breaks ties between equal components.
pub fn sort_arguments(entries: Vec<Entry>, time_sort: bool, reverse: bool) -> Vec<Entry> {
    order(entries, time_sort, reverse, |e| {
        let full = e.name();
        let base = e
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| full.clone());
        (NameKey::new(&base), NameKey::new(&full))
    })
}

fn order<K: Ord>(
    mut entries: Vec<Entry>,
    time_sort: bool,
    reverse: bool,
    key: impl Fn(&Entry) -> K,
) -> Vec<Entry> {
    if time_sort {
        entries.sort_by_cached_key(|e| (Reverse(modified(e)), key(e)));
    } else {
        entries.sort_by_cached_key(|e| key(e));
    }

    if reverse {
        entries.reverse();
    }
    entries
}

fn modified(entry: &Entry) -> SystemTime {
    entry
        .metadata()
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
