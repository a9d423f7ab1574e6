use crate::cli::Cli;
use std::path::PathBuf;

/// File that receives a copy of stdout when capture is on.
pub const CAPTURE_FILE: &str = "output.txt";

/// Immutable listing configuration, built once from the command line.
#[derive(Debug, Clone, Default)]
pub struct ListingOptions {
    pub long: bool,
    pub recursive: bool,
    pub show_hidden: bool,
    pub time_sort: bool,
    pub reverse: bool,
    pub capture: bool,
    pub paths: Vec<PathBuf>,
}

impl ListingOptions {
    /// Names are painted unless output is being captured.
    pub fn plain(&self) -> bool {
        self.capture
    }
}

impl From<Cli> for ListingOptions {
    fn from(cli: Cli) -> Self {
        let mut paths = cli.paths;
        if paths.is_empty() {
            paths.push(PathBuf::from("."));
        }

        Self {
            long: cli.long,
            recursive: cli.recursive,
            show_hidden: cli.all,
            time_sort: cli.time,
            reverse: cli.reverse,
            capture: cli.capture,
            paths,
        }
    }
}
