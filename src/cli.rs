use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "eles", version, about = "List directory contents")]
pub struct Cli {
    /// Use a long listing format
    #[arg(short = 'l', long = "long")]
    pub long: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    pub recursive: bool,

    /// Do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Sort by modification time, newest first
    #[arg(short = 't', long = "time")]
    pub time: bool,

    /// Reverse order while sorting
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Also write the listing to output.txt
    #[arg(short = 'c', long = "capture")]
    pub capture: bool,

    /// Files or directories to list
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Parses the process arguments. Help and version exit 0, any other
/// parse failure prints the error with usage and exits 1.
pub fn parse_or_exit() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        let code = match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => 1,
        };
        let _ = err.print();
        process::exit(code);
    })
}
