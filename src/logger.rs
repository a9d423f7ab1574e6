use env_logger::Env;
use log::debug;
use std::fmt;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

const PROGRAM: &str = "eles";

/// Sets up the `log` backend. Verbosity comes from `RUST_LOG`, warn by default.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Why a path could not be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathErrorKind {
    NotFound,
    PermissionDenied,
    NotADirectory,
    Other,
}

impl From<&io::Error> for PathErrorKind {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => PathErrorKind::NotFound,
            ErrorKind::PermissionDenied => PathErrorKind::PermissionDenied,
            ErrorKind::NotADirectory => PathErrorKind::NotADirectory,
            _ => PathErrorKind::Other,
        }
    }
}

/// One-line, path-attributed diagnostic.
pub struct Diagnostic<'a> {
    pub path: &'a Path,
    pub error: &'a io::Error,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match PathErrorKind::from(self.error) {
            PathErrorKind::NotFound => {
                write!(f, "{}: cannot access '{}': No such file or directory", PROGRAM, path)
            }
            PathErrorKind::PermissionDenied => {
                write!(f, "{}: cannot open '{}': Permission denied", PROGRAM, path)
            }
            PathErrorKind::NotADirectory => {
                write!(f, "{}: cannot access '{}': Not a directory", PROGRAM, path)
            }
            PathErrorKind::Other => write!(f, "{}: '{}': {}", PROGRAM, path, self.error),
        }
    }
}

/// Sink for per-path diagnostics, handed to whoever reports them.
pub struct Logger<E: Write = io::Stderr> {
    sink: E,
}

impl Logger {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<E: Write> Logger<E> {
    pub fn new(sink: E) -> Self {
        Self { sink }
    }

    /// Writes the diagnostic for `path` and carries on.
    pub fn report(&mut self, path: &Path, error: &io::Error) -> io::Result<()> {
        debug!("{}: {:?}", path.display(), error.kind());
        writeln!(self.sink, "{}", Diagnostic { path, error })
    }

    pub fn into_inner(self) -> E {
        self.sink
    }
}
