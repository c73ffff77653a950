//! The batch loop: existence check, stage, commit and classify, one
//! group at a time.
//!
//! Every group is attempted exactly once and always ends in exactly one
//! [`Outcome`]. A failing group never stops the run.

use crate::batch::CommitSpec;
use crate::git::{CommitOutput, VersionControl};

use std::path::Path;

/// Diagnostic fragments git prints when a commit has nothing new in it.
const NOTHING_TO_COMMIT_MARKERS: &[&str] = &[
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
];

/// Terminal classification of a single commit group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// None of the group's files exist; nothing was staged or committed.
    NoFilesFound,
    /// The commit was refused because the tree already matches.
    NothingToCommit,
    /// A new commit was created.
    Committed,
    /// Staging or committing failed. `detail` holds the tool's error text.
    Failed { step: FailedStep, detail: String },
}

/// Which step of a group failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStep {
    Stage,
    Commit,
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One outcome per spec, in batch order.
    pub outcomes: Vec<Outcome>,
    committed: usize,
}

impl RunSummary {
    /// Number of groups that produced a new commit.
    pub fn committed(&self) -> usize {
        self.committed
    }

    fn record(&mut self, outcome: Outcome) {
        if outcome.is_committed() {
            self.committed += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Receives outcomes as they are produced.
///
/// This keeps console output out of the loop so the loop can be driven
/// and observed in tests.
pub trait Reporter {
    /// Called once per spec, immediately after its outcome is known.
    fn outcome(&mut self, spec: &CommitSpec, outcome: &Outcome);

    /// Called once after the last spec.
    fn summary(&mut self, summary: &RunSummary);
}

/// Decides whether a failed commit only means there was nothing new to commit.
///
/// This is a text heuristic over git's diagnostics; git exposes no
/// dedicated status for it. Both streams are searched.
///
/// # Examples
///
/// ```
/// use batch_commit::orchestrator::is_nothing_to_commit;
///
/// assert!(is_nothing_to_commit("nothing to commit, working tree clean\n", ""));
/// assert!(!is_nothing_to_commit("", "fatal: unable to write new index file"));
/// ```
pub fn is_nothing_to_commit(stdout: &str, stderr: &str) -> bool {
    NOTHING_TO_COMMIT_MARKERS
        .iter()
        .any(|marker| stdout.contains(marker) || stderr.contains(marker))
}

/// Classifies the captured result of a commit attempt.
fn classify_commit(output: &CommitOutput) -> Outcome {
    if output.success {
        return Outcome::Committed;
    }

    if is_nothing_to_commit(&output.stdout, &output.stderr) {
        return Outcome::NothingToCommit;
    }

    // git reports some failures (e.g. rejected hooks) only on stdout.
    let detail = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };

    Outcome::Failed {
        step: FailedStep::Commit,
        detail,
    }
}

/// Processes a single spec against the live working tree.
fn process<V: VersionControl>(vcs: &mut V, spec: &CommitSpec) -> Outcome {
    let found: Vec<&Path> = spec
        .files
        .iter()
        .map(|p| p.as_path())
        .filter(|p| vcs.exists(p))
        .collect();

    tracing::debug!(
        spec = %spec.message,
        found = found.len(),
        total = spec.files.len(),
        "existence check"
    );

    if found.is_empty() {
        return Outcome::NoFilesFound;
    }

    if let Err(detail) = vcs.stage(&found) {
        tracing::debug!(spec = %spec.message, %detail, "staging failed");
        return Outcome::Failed {
            step: FailedStep::Stage,
            detail,
        };
    }

    match vcs.commit(&spec.message) {
        Ok(output) => {
            tracing::debug!(
                spec = %spec.message,
                success = output.success,
                stdout = %output.stdout.trim(),
                stderr = %output.stderr.trim(),
                "commit attempted"
            );
            classify_commit(&output)
        }
        Err(detail) => Outcome::Failed {
            step: FailedStep::Commit,
            detail,
        },
    }
}

/// Runs every spec in order and returns the summary.
///
/// Each spec is processed exactly once: files are re-checked against the
/// tree, the existing subset is staged, and a commit is attempted. The
/// reporter sees each outcome as soon as it is decided, then the summary.
pub fn run<V, R>(specs: &[CommitSpec], vcs: &mut V, reporter: &mut R) -> RunSummary
where
    V: VersionControl,
    R: Reporter,
{
    let mut summary = RunSummary::default();

    for spec in specs {
        let outcome = process(vcs, spec);
        reporter.outcome(spec, &outcome);
        summary.record(outcome);
    }

    tracing::debug!(
        committed = summary.committed(),
        total = specs.len(),
        "batch finished"
    );
    reporter.summary(&summary);
    summary
}
