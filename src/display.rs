use crate::colorize::{colorize, paint};
use crate::entry::{
    Entry, device_numbers, group_name, is_device, owner_name, permission_string,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::os::unix::fs::MetadataExt;
use std::time::{Duration, SystemTime};

/// Half of a 365-day year.
const SIX_MONTHS: Duration = Duration::from_secs(365 * 24 * 60 * 60 / 2);

/// One long-format line, fields already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub permissions: String,
    pub links: String,
    pub owner: String,
    pub group: String,
    pub size: String,
    pub modified: String,
    pub name: String,
}

/// Column widths of a batch, measured before anything is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub links: usize,
    pub owner: usize,
    pub group: usize,
    pub size: usize,
}

impl ColumnWidths {
    pub fn measure(rows: &[Row]) -> Self {
        rows.iter().fold(Self::default(), |w, row| Self {
            links: w.links.max(row.links.chars().count()),
            owner: w.owner.max(row.owner.chars().count()),
            group: w.group.max(row.group.chars().count()),
            size: w.size.max(row.size.chars().count()),
        })
    }
}

/// Renders a directory's filtered and sorted contents.
pub fn display_entries<W: Write>(
    entries: &[Entry],
    out: &mut W,
    long: bool,
    plain: bool,
) -> Result<()> {
    if long {
        display_long(entries, out, plain, true)
    } else {
        display_compact(entries, out, plain)
    }
}

/// All names on one line, two spaces apart. An empty batch writes nothing.
pub fn display_compact<W: Write>(entries: &[Entry], out: &mut W, plain: bool) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let names: Vec<String> = entries.iter().map(|e| colorize(e, plain)).collect();
    writeln!(out, "{}", names.join("  "))?;
    Ok(())
}

/// `ls -l` style listing. `print_total` is off for standalone files.
/// Entries whose metadata can't be read are skipped.
pub fn display_long<W: Write>(
    entries: &[Entry],
    out: &mut W,
    plain: bool,
    print_total: bool,
) -> Result<()> {
    let now = SystemTime::now();
    let mut rows = Vec::with_capacity(entries.len());
    let mut blocks = 0u64;

    for entry in entries {
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        blocks += meta.blocks();
        rows.push(build_row(entry, &meta, plain, now));
    }

    if print_total {
        writeln!(out, "total {}", blocks / 2)?;
    }

    let widths = ColumnWidths::measure(&rows);
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn build_row(entry: &Entry, meta: &fs::Metadata, plain: bool, now: SystemTime) -> Row {
    let mode = meta.mode();
    let mut name = paint(&entry.name(), mode, plain);
    if meta.file_type().is_symlink() {
        if let Ok(target) = fs::read_link(entry.path()) {
            name.push_str(" -> ");
            name.push_str(&target.to_string_lossy());
        }
    }

    let size = if is_device(mode) {
        let (major, minor) = device_numbers(meta.rdev());
        format!("{:>3}, {:>3}", major, minor)
    } else {
        meta.size().to_string()
    };

    Row {
        permissions: permission_string(meta),
        links: meta.nlink().to_string(),
        owner: owner_name(meta),
        group: group_name(meta),
        size,
        modified: meta
            .modified()
            .map(|t| format_mod_time(t, now))
            .unwrap_or_else(|_| format!("{:>12}", "?")),
        name,
    }
}

pub fn write_row<W: Write>(out: &mut W, row: &Row, widths: &ColumnWidths) -> Result<()> {
    writeln!(
        out,
        "{} {:>lw$} {:<ow$} {:<gw$} {:>sw$} {} {}",
        row.permissions,
        row.links,
        row.owner,
        row.group,
        row.size,
        row.modified,
        row.name,
        lw = widths.links,
        ow = widths.owner,
        gw = widths.group,
        sw = widths.size,
    )?;
    Ok(())
}

/// `Oct  3 14:05` for the last six months, `Oct  3  2019` for anything
/// older or in the future.
pub fn format_mod_time(modified: SystemTime, now: SystemTime) -> String {
    let recent = match now.duration_since(modified) {
        Ok(age) => age <= SIX_MONTHS,
        Err(_) => false,
    };

    let local: DateTime<Local> = modified.into();
    if recent {
        local.format("%b %e %H:%M").to_string()
    } else {
        local.format("%b %e  %Y").to_string()
    }
}
