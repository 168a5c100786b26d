use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::analyzer::formatter::{OutputFormat, Report, render};
use crate::analyzer::lint::lint_path;
use crate::analyzer::types::DocumentKind;
use crate::config;
use crate::error::Result;

/// Command line shared by the three lint binaries. The binary name and the
/// positional argument's label are set per document kind.
#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check a container build or deployment artifact against best-practice rules")]
pub struct Cli {
    /// File (or chart directory) to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse the process arguments for the tool analyzing `kind`.
    ///
    /// Help and version requests exit 0. Any other argument error prints the
    /// usage line to stdout and exits 1.
    pub fn parse_for(kind: DocumentKind) -> std::result::Result<Self, ExitCode> {
        Self::try_parse_for(kind, std::env::args_os())
    }

    pub fn try_parse_for<I, T>(kind: DocumentKind, args: I) -> std::result::Result<Self, ExitCode>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let command = Self::command()
            .name(kind.tool_name())
            .bin_name(kind.tool_name())
            .mut_arg("path", |arg| arg.value_name(kind.path_label()));

        let parsed = command
            .try_get_matches_from(args)
            .and_then(|matches| Self::from_arg_matches(&matches));

        match parsed {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                let _ = e.print();
                Err(ExitCode::SUCCESS)
            }
            Err(e) => {
                log::debug!("Argument error: {}", e);
                println!("{}", usage(kind));
                Err(ExitCode::from(1))
            }
        }
    }

    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        // Ignore the error when a logger is already installed (tests).
        let _ = env_logger::Builder::from_default_env()
            .filter_level(level)
            .try_init();
    }

    /// Lint the target and render the report.
    pub fn run(&self, kind: DocumentKind) -> Result<Report> {
        let config = config::discover(&self.path, kind)?;
        log::debug!("Using configuration: {:?}", config);

        let result = lint_path(kind, &self.path, &config)?;
        Ok(render(&result, self.format, !self.no_color))
    }
}

/// One-line usage message, e.g. `Usage: chart-lint <path-to-chart>`.
pub fn usage(kind: DocumentKind) -> String {
    format!("Usage: {} <{}>", kind.tool_name(), kind.path_label())
}

/// Entry point of the `dockerfile-lint`, `compose-lint` and `chart-lint`
/// binaries.
pub fn main(kind: DocumentKind) -> ExitCode {
    let cli = match Cli::parse_for(kind) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    cli.init_logging();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.run(kind) {
        Ok(report) => {
            print!("{}", report.text);
            ExitCode::from(report.exit_code)
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_for(
            DocumentKind::Compose,
            ["compose-lint", "--format", "json", "-vv", "--no-color", "compose.yaml"],
        )
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("compose.yaml"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_wrong_arity_is_usage_error() {
        assert!(Cli::try_parse_for(DocumentKind::Dockerfile, ["dockerfile-lint"]).is_err());
        assert!(Cli::try_parse_for(DocumentKind::Dockerfile, ["dockerfile-lint", "a", "b"]).is_err());
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(usage(DocumentKind::Dockerfile), "Usage: dockerfile-lint <path_to_Dockerfile>");
        assert_eq!(usage(DocumentKind::Chart), "Usage: chart-lint <path-to-chart>");
    }
}
