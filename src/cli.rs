use crate::error::{BatchError, Result};
use crate::{banner::print_banner, batch, git, orchestrator, report::ConsoleReporter};

use console::style;
use std::{env, path::Path, path::PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Options for a normal run.
#[derive(Debug, Default, PartialEq, Eq)]
struct RunOptions {
    batch: Option<PathBuf>,
    debug: bool,
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Help,
    Version,
    Run(RunOptions),
}

/// Parses arguments (without the program name).
///
/// `--help` and `--version` win over everything else, as in most CLIs.
fn parse_args(args: &[String]) -> Result<Invocation> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Invocation::Help);
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(Invocation::Version);
    }

    let mut opts = RunOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => opts.debug = true,
            "--batch" => match iter.next() {
                Some(path) => opts.batch = Some(PathBuf::from(path)),
                None => return Err(BatchError::Usage(String::from("--batch requires a file path"))),
            },
            other => {
                if let Some(path) = other.strip_prefix("--batch=") {
                    opts.batch = Some(PathBuf::from(path));
                } else {
                    return Err(BatchError::Usage(format!("unexpected argument '{}'", other)));
                }
            }
        }
    }

    Ok(Invocation::Run(opts))
}

/// Sets up logging on stderr. `RUST_LOG` is honored unless `--debug` is given.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("batch_commit=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

/// Warns when git is missing or `dir` is not a work tree.
///
/// The run still goes ahead: each group then ends up as a reported failure,
/// which is the same thing the user would see from git directly.
fn verify_environment(dir: &Path) {
    if which::which("git").is_err() {
        eprintln!(
            "{}",
            style("Warning: `git` not found in PATH; every group will fail.")
                .yellow()
                .bold()
        );
        return;
    }

    match git::rev_parse(dir, "--show-toplevel") {
        Ok(root) => tracing::debug!("Repository root: {}", root),
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Warning: not inside a git repo ({})", e))
                    .yellow()
                    .bold()
            );
        }
    }
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
batch-commit {}

Split an already-modified working tree into a series of labeled commits.

USAGE:
    batch-commit [OPTIONS]

OPTIONS:
    -h, --help          Print help information
    -V, --version       Print version information
    --batch <FILE>      Read commit groups from FILE instead of the default
    --debug             Log each step to stderr

DESCRIPTION:
    Each commit group lists files and a message. Groups run in order: the
    files that exist are staged and committed with the group's message.
    Groups with no existing files, or nothing new to commit, are skipped.
    A failing group is reported and the run moves on.

    Without --batch, ./{} is used if present, otherwise the built-in batch.",
        env!("CARGO_PKG_VERSION"),
        batch::DEFAULT_BATCH_FILE
    );
}

/// Main CLI entry point for `batch-commit`.
///
/// This function:
/// 1. Parses CLI flags.
/// 2. Sets up logging.
/// 3. Loads the batch (`--batch`, then `./batch-commit.toml`, then built-in).
/// 4. Warns if `git` or the repository is missing.
/// 5. Runs every commit group in order and prints the outcome of each.
///
/// Returns `Ok(0)` whenever the batch ran, even if some groups failed.
///
/// # Errors
///
/// Returns `Err` only before the run starts: bad arguments, or a batch
/// file that cannot be found, read, or parsed.
pub fn entry() -> Result<i32> {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = match parse_args(&args)? {
        Invocation::Help => {
            print_help();
            return Ok(0);
        }
        Invocation::Version => {
            println!("batch-commit {}", env!("CARGO_PKG_VERSION"));
            return Ok(0);
        }
        Invocation::Run(opts) => opts,
    };

    init_logging(opts.debug);

    let workdir = env::current_dir().map_err(BatchError::CurrentDir)?;

    let batch = batch::resolve(opts.batch.as_deref(), &workdir)?;
    tracing::debug!("Loaded {} groups from {}", batch.specs.len(), batch.origin);

    verify_environment(&workdir);
    print_banner(&batch.origin, batch.specs.len());

    let mut vcs = git::GitCli::new(workdir);
    let mut reporter = ConsoleReporter;
    orchestrator::run(&batch.specs, &mut vcs, &mut reporter);

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::{Invocation, RunOptions, parse_args};
    use crate::error::BatchError;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_default_batch() {
        let r = parse_args(&args(&[])).expect("parse failed");
        assert_eq!(r, Invocation::Run(RunOptions::default()));
    }

    #[test]
    fn batch_flag_accepts_both_forms() {
        let expected = Invocation::Run(RunOptions {
            batch: Some(PathBuf::from("c.toml")),
            debug: false,
        });
        assert_eq!(parse_args(&args(&["--batch", "c.toml"])).unwrap(), expected);
        assert_eq!(parse_args(&args(&["--batch=c.toml"])).unwrap(), expected);
    }

    #[test]
    fn debug_flag_is_recorded() {
        let r = parse_args(&args(&["--debug"])).unwrap();
        assert_eq!(
            r,
            Invocation::Run(RunOptions {
                batch: None,
                debug: true
            })
        );
    }

    #[test]
    fn help_and_version_take_precedence() {
        assert_eq!(
            parse_args(&args(&["--bogus", "-h"])).unwrap(),
            Invocation::Help
        );
        assert_eq!(parse_args(&args(&["-V"])).unwrap(), Invocation::Version);
    }

    #[test]
    fn batch_without_path_is_usage_error() {
        let err = parse_args(&args(&["--batch"])).unwrap_err();
        assert!(matches!(err, BatchError::Usage(_)));
    }

    #[test]
    fn unknown_argument_is_usage_error() {
        let err = parse_args(&args(&["--manual"])).unwrap_err();
        assert!(err.to_string().contains("--manual"));
    }
}
