use console::style;

/// Entry point for the `batch-commit` binary.
///
/// Delegates to the CLI entry function and exits the process with the
/// returned exit code. Startup errors are printed and exit with status 1.
fn main() {
    match batch_commit::cli::entry() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", style(format!("Error: {}", e)).red().bold());
            std::process::exit(1)
        }
    }
}
