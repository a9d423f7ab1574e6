use crate::entry::{
    Entry, S_IFBLK, S_IFCHR, S_IFDIR, S_IFIFO, S_IFLNK, S_IFMT, S_IFREG, S_IFSOCK,
};
use colored::{Color, Colorize, control};
use std::os::unix::fs::MetadataExt;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Display string for an entry. Falls back to the bare name when the
/// metadata can't be read or when `plain` is set.
pub fn colorize(entry: &Entry, plain: bool) -> String {
    let name = entry.name();
    match entry.metadata() {
        Ok(meta) => paint(&name, meta.mode(), plain),
        Err(_) => name,
    }
}

/// Wraps `name` in the style picked by its `st_mode`, first match wins.
/// `colored` always closes the style with a reset.
pub fn paint(name: &str, mode: u32, plain: bool) -> String {
    if plain {
        return name.to_string();
    }

    let style = match mode & S_IFMT {
        S_IFLNK => match name {
            "fd" => Some((Color::Blue, None)),
            "log" => Some((Color::Magenta, None)),
            _ => Some((Color::Cyan, None)),
        },
        S_IFDIR => match name {
            "mqueue" | "shm" => Some((Color::Black, Some(Color::Green))),
            _ => Some((Color::Blue, None)),
        },
        S_IFCHR | S_IFBLK | S_IFIFO => Some((Color::Yellow, None)),
        S_IFSOCK => Some((Color::Magenta, None)),
        _ if mode & 0o111 != 0 => Some((Color::Green, None)),
        S_IFREG if is_image(name) => Some((Color::BrightMagenta, None)),
        _ => None,
    };

    match style {
        Some((fg, Some(bg))) => name.color(fg).on_color(bg).to_string(),
        Some((fg, None)) => name.color(fg).to_string(),
        None => name.to_string(),
    }
}

/// Forces styling on or off for the whole run. Whether names are painted
/// depends on capture, not on whether stdout is a terminal.
pub fn enable(on: bool) {
    control::set_override(on);
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
