#![forbid(unsafe_code)]

//! Command-line argument parsing for the typewriter demo.
//!
//! Parses args by hand and layers `TYPEWRITER_DEMO_*` environment variables
//! underneath them: defaults, then environment, then flags.

use std::env;
use std::path::PathBuf;
use std::process;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Typewriter Demo: SDUI typewriter text blocks in the terminal

USAGE:
    typewriter-demo [OPTIONS]

OPTIONS:
    --spec=PATH          Load blocks from a JSON file (one object or an array)
    --exit-after-ms=N    Quit automatically after N milliseconds
    --reduced-motion     Start with the reduced-motion preference on
    --list               Print the loaded blocks and exit
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    m               Toggle the reduced-motion preference
    r               Restart every block
    q / Esc / Ctrl+C Quit

ENVIRONMENT VARIABLES:
    TYPEWRITER_DEMO_SPEC           Override --spec
    TYPEWRITER_DEMO_EXIT_AFTER_MS  Override --exit-after-ms
    TYPEWRITER_LOG                 Write tracing output to this file (RUST_LOG filters)
    TYPEWRITER_REDUCED_MOTION      System reduced-motion preference (bool)
    NO_MOTION                      Any non-empty value also requests reduced motion
    TYPEWRITER_TYPE_SPEED_MS       Override every block's type speed
    TYPEWRITER_DELETE_SPEED_MS     Override every block's delete speed
    TYPEWRITER_PAUSE_MS            Override every block's pause duration
    TYPEWRITER_DELETE_DELAY_MS     Override every block's delete delay
    TYPEWRITER_START_DELAY_MS      Override every block's start delay
    TYPEWRITER_SPEED_SCALE         Multiply every duration by this factor";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opts {
    /// JSON spec file; the built-in showcase when absent.
    pub spec: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Force the reduced-motion preference on.
    pub reduced_motion: bool,
    /// Print the blocks and exit.
    pub list: bool,
}

/// Outcome of parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or invalid input.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("typewriter-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` over environment values read through `get_env`.
    pub fn parse_from<I, F>(args: I, get_env: F) -> Result<Action, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = get_env("TYPEWRITER_DEMO_SPEC")
            && !val.trim().is_empty()
        {
            opts.spec = Some(PathBuf::from(val));
        }
        if let Some(val) = get_env("TYPEWRITER_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--reduced-motion" => opts.reduced_motion = true,
                "--list" => opts.list = true,
                other => {
                    if let Some(val) = other.strip_prefix("--spec=") {
                        if val.is_empty() {
                            return Err("Empty --spec value".to_string());
                        }
                        opts.spec = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Action::Run(opts))
    }
}
