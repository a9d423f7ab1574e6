//! Directory entries and the metadata-derived fields of a listing row.

use std::ffi::OsString;
use std::fs::{DirEntry, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;
use uzers::{get_group_by_gid, get_user_by_uid};

pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// A named item in a listing.
///
/// Real directory entries fetch their metadata on every call; synthetic
/// entries (standalone files, `.` and `..`) carry a snapshot taken when
/// they were built. Everything downstream goes through `name`, `path`
/// and `metadata`, so it never cares which variant it got.
#[derive(Debug)]
pub enum Entry {
    Listed(DirEntry),
    Synthetic {
        name: OsString,
        path: PathBuf,
        metadata: Metadata,
    },
}

impl Entry {
    /// Wraps arbitrary metadata under an arbitrary display name.
    pub fn synthetic(
        metadata: Metadata,
        name: impl Into<OsString>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Entry::Synthetic {
            name: name.into(),
            path: path.into(),
            metadata,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Entry::Listed(entry) => entry.file_name().to_string_lossy().into_owned(),
            Entry::Synthetic { name, .. } => name.to_string_lossy().into_owned(),
        }
    }

    pub fn path(&self) -> PathBuf {
        match self {
            Entry::Listed(entry) => entry.path(),
            Entry::Synthetic { path, .. } => path.clone(),
        }
    }

    /// Metadata of the entry itself; symlinks are not followed for
    /// listed entries.
    pub fn metadata(&self) -> io::Result<Metadata> {
        match self {
            Entry::Listed(entry) => entry.metadata(),
            Entry::Synthetic { metadata, .. } => Ok(metadata.clone()),
        }
    }

    /// True for the `.` and `..` pseudo-entries.
    pub fn is_dot(&self) -> bool {
        matches!(self, Entry::Synthetic { name, .. } if name == "." || name == "..")
    }
}

/// Ten-character `ls -l` mode column for a raw `st_mode`.
pub fn mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        _ => '-',
    });

    let triads = [
        (0o400, 0o200, 0o100, S_ISUID, 's'),
        (0o040, 0o020, 0o010, S_ISGID, 's'),
        (0o004, 0o002, 0o001, S_ISVTX, 't'),
    ];
    for (read, write, exec, special, mark) in triads {
        out.push(if mode & read != 0 { 'r' } else { '-' });
        out.push(if mode & write != 0 { 'w' } else { '-' });
        out.push(match (mode & special != 0, mode & exec != 0) {
            (true, true) => mark,
            (true, false) => mark.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

pub fn permission_string(meta: &Metadata) -> String {
    mode_string(meta.mode())
}

pub fn owner_name(meta: &Metadata) -> String {
    user_name(meta.uid())
}

pub fn group_name(meta: &Metadata) -> String {
    group_name_of(meta.gid())
}

/// Resolves a uid, falling back to the number itself.
fn user_name(uid: u32) -> String {
    get_user_by_uid(uid)
        .map(|u| u.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string())
}

fn group_name_of(gid: u32) -> String {
    get_group_by_gid(gid)
        .map(|g| g.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| gid.to_string())
}

pub fn is_device(mode: u32) -> bool {
    matches!(mode & S_IFMT, S_IFCHR | S_IFBLK)
}

/// Splits a Linux `st_rdev` into (major, minor).
pub fn device_numbers(rdev: u64) -> (u64, u64) {
    let major = ((rdev >> 32) & 0xffff_f000) | ((rdev >> 8) & 0x0000_0fff);
    let minor = ((rdev >> 12) & 0xffff_ff00) | (rdev & 0x0000_00ff);
    (major, minor)
}
