use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of a `git commit` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The version-control operations the batch loop depends on.
///
/// Implementors must answer every call against the live working tree:
/// no call may rely on state observed by an earlier one, since each
/// commit changes what the next group sees.
pub trait VersionControl {
    /// Reports whether `path` currently exists in the working tree.
    fn exists(&mut self, path: &Path) -> bool;

    /// Stages exactly `paths`.
    ///
    /// # Returns
    /// `Ok(())` on success, or `Err(String)` with the tool's error text.
    fn stage(&mut self, paths: &[&Path]) -> Result<(), String>;

    /// Commits the staged content with `message`, capturing the tool's output.
    ///
    /// # Returns
    /// `Ok(CommitOutput)` whenever the tool ran, whatever its exit status.
    /// `Err(String)` only if the tool could not be started.
    fn commit(&mut self, message: &str) -> Result<CommitOutput, String>;
}

/// [`VersionControl`] backed by the `git` executable, run inside `workdir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: workdir.into(),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd.stdin(Stdio::null());
        cmd
    }
}

impl VersionControl for GitCli {
    fn exists(&mut self, path: &Path) -> bool {
        // Dangling symlinks still count: git can stage the link itself.
        self.workdir.join(path).symlink_metadata().is_ok()
    }

    fn stage(&mut self, paths: &[&Path]) -> Result<(), String> {
        let mut cmd = self.git();
        cmd.arg("add").arg("--").args(paths);
        run_status(cmd)
    }

    fn commit(&mut self, message: &str) -> Result<CommitOutput, String> {
        let mut cmd = self.git();
        cmd.arg("commit").arg("-m").arg(message);
        // Keep git's diagnostics in English so they can be classified.
        cmd.env("LC_ALL", "C");
        run_captured(cmd)
    }
}

/// Runs a command and returns only whether it succeeded.
///
/// Standard output is discarded. On a non-zero exit the trimmed standard
/// error is returned as `Err`, or `"non-zero exit"` if git printed nothing.
/// If the process fails to start, the I/O error message is returned.
fn run_status(mut cmd: Command) -> Result<(), String> {
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    match cmd.output() {
        Ok(out) => {
            if out.status.success() {
                Ok(())
            } else {
                let err = String::from_utf8_lossy(&out.stderr).trim().to_string();
                if err.is_empty() {
                    Err(String::from("non-zero exit"))
                } else {
                    Err(err)
                }
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and captures both of its output streams.
///
/// Unlike [`run_status`], a non-zero exit is not an error here; the caller
/// decides what it means. Only a spawn failure is returned as `Err`.
fn run_captured(mut cmd: Command) -> Result<CommitOutput, String> {
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    match cmd.output() {
        Ok(out) => Ok(CommitOutput {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        }),
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and returns its trimmed standard output on success,
/// or its trimmed standard error as an `Err` on failure.
fn run_output(mut cmd: Command) -> Result<String, String> {
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    match cmd.output() {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs `git rev-parse <flag>` in `dir` and returns its output as a trimmed string.
///
/// Typically used with `--show-toplevel` to confirm `dir` is inside a work tree.
///
/// # Examples
///
/// ```ignore
/// // Ignored because it depends on being inside a Git repository.
/// use batch_commit::git::rev_parse;
///
/// match rev_parse(std::path::Path::new("."), "--show-toplevel") {
///     Ok(path) => println!("Repository root: {}", path),
///     Err(err) => eprintln!("Git error: {}", err),
/// }
/// ```
pub fn rev_parse(dir: &Path, flag: &str) -> Result<String, String> {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.arg("rev-parse").arg(flag);
    run_output(cmd)
}

#[cfg(test)]
pub(crate) mod test_repo {
    use std::path::Path;
    use std::process::Command;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .current_dir(dir)
            .args(args)
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Creates an empty repository with a local identity in `dir`.
    pub(crate) fn init(dir: &Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Batch Tester"]);
        git(dir, &["config", "user.email", "tester@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
    }

    /// Number of commits reachable from HEAD, or 0 for an unborn branch.
    pub(crate) fn commit_count(dir: &Path) -> usize {
        let out = Command::new("git")
            .current_dir(dir)
            .args(["rev-list", "--count", "HEAD"])
            .output()
            .expect("failed to run git");
        if !out.status.success() {
            return 0;
        }
        String::from_utf8_lossy(&out.stdout)
            .trim()
            .parse()
            .expect("rev-list output is not a number")
    }
}
