pub mod visited;

#[cfg(test)]
mod tests;

use crate::config::ListingOptions;
use crate::display::{display_entries, display_long};
use crate::entry::Entry;
use crate::filter::filter;
use crate::logger::Logger;
use crate::sort::{sort, sort_arguments};
use anyhow::Result;
use log::debug;
use self::visited::Visited;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lists every input path in `options`.
///
/// Paths that can't be stat'ed are reported through `log` and skipped.
/// Non-directories are rendered first as one batch, then each directory
/// in argument order. Only output-sink failures end the run early.
pub fn run<W: Write, E: Write>(
    options: &ListingOptions,
    out: &mut W,
    log: &mut Logger<E>,
) -> Result<()> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for path in &options.paths {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => dirs.push(path.as_path()),
            Ok(meta) => files.push(Entry::synthetic(meta, path.as_os_str(), path)),
            Err(err) => log.report(path, &err)?,
        }
    }

    let mut lister = Lister {
        options,
        out,
        headers: options.paths.len() > 1 || options.recursive,
        started: false,
    };
    lister.list_files(files)?;
    for dir in dirs {
        lister.list_tree(dir, log)?;
    }
    Ok(())
}

struct Lister<'a, W: Write> {
    options: &'a ListingOptions,
    out: &'a mut W,
    /// Print `<path>:` above each directory.
    headers: bool,
    /// Something has been written already.
    started: bool,
}

impl<W: Write> Lister<'_, W> {
    fn list_files(&mut self, files: Vec<Entry>) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        let files = sort_arguments(files, self.options.time_sort, self.options.reverse);
        if self.options.long {
            display_long(&files, &mut *self.out, self.options.plain(), false)?;
        } else {
            for file in &files {
                writeln!(self.out, "{}", file.name())?;
            }
        }
        self.started = true;
        Ok(())
    }

    /// Lists `root`, and with recursion every real subdirectory below it,
    /// depth-first in each directory's sort order.
    fn list_tree<E: Write>(&mut self, root: &Path, log: &mut Logger<E>) -> Result<()> {
        let mut visited = Visited::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            if !visited.enter(&dir) {
                continue;
            }
            let subdirs = self.list_dir(&dir, log)?;
            pending.extend(subdirs.into_iter().rev());
        }
        Ok(())
    }

    /// Lists one directory and returns the subdirectories to descend
    /// into (empty unless recursing).
    fn list_dir<E: Write>(&mut self, dir: &Path, log: &mut Logger<E>) -> Result<Vec<PathBuf>> {
        debug!("listing {}", dir.display());
        if self.headers {
            if self.started {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}:", dir.display())?;
        }
        self.started = true;

        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                log.report(dir, &err)?;
                return Ok(Vec::new());
            }
        };

        let mut entries = Vec::new();
        for item in read_dir {
            match item {
                Ok(entry) => entries.push(Entry::Listed(entry)),
                Err(err) => log.report(dir, &err)?,
            }
        }

        let entries = filter(entries, self.options.show_hidden, dir);
        let entries = sort(entries, self.options.time_sort, self.options.reverse);
        display_entries(&entries, &mut *self.out, self.options.long, self.options.plain())?;

        if !self.options.recursive {
            return Ok(Vec::new());
        }
        Ok(entries
            .iter()
            .filter(|e| !e.is_dot())
            .filter(|e| match e.metadata() {
                Ok(meta) if meta.file_type().is_symlink() => {
                    debug!("not following symlink {}", e.path().display());
                    false
                }
                Ok(meta) => meta.is_dir(),
                Err(_) => false,
            })
            .map(|e| e.path())
            .collect())
    }
}
