use crate::batch::CommitSpec;
use crate::orchestrator::{FailedStep, Outcome, Reporter, RunSummary};

use console::style;

/// [`Reporter`] that prints one colored line per outcome to stdout,
/// followed by the total number of commits created.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn outcome(&mut self, spec: &CommitSpec, outcome: &Outcome) {
        println!("{}", outcome_line(spec, outcome));
    }

    fn summary(&mut self, summary: &RunSummary) {
        println!();
        println!("{}", summary_line(summary));
    }
}

/// Builds the notice printed for a single spec.
///
/// The returned string may contain ANSI styling.
pub fn outcome_line(spec: &CommitSpec, outcome: &Outcome) -> String {
    let msg = &spec.message;
    match outcome {
        Outcome::NoFilesFound => style(format!("Skipping commit '{}': No files found.", msg))
            .dim()
            .to_string(),
        Outcome::NothingToCommit => style(format!("⚠️  Skipping '{}': Nothing to commit", msg))
            .yellow()
            .to_string(),
        Outcome::Committed => style(format!("✅ Committed: {}", msg)).green().to_string(),
        Outcome::Failed {
            step: FailedStep::Stage,
            detail,
        } => style(format!("Failed to add files for '{}': {}", msg, detail))
            .red()
            .bold()
            .to_string(),
        Outcome::Failed {
            step: FailedStep::Commit,
            detail,
        } => style(format!("❌ Failed to commit '{}': {}", msg, detail))
            .red()
            .bold()
            .to_string(),
    }
}

/// Builds the final line of a run.
pub fn summary_line(summary: &RunSummary) -> String {
    style(format!("Total Commits Created: {}", summary.committed()))
        .bold()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{outcome_line, summary_line};
    use crate::batch::CommitSpec;
    use crate::orchestrator::{FailedStep, Outcome, RunSummary};
    use console::strip_ansi_codes;

    fn plain(s: String) -> String {
        strip_ansi_codes(&s).to_string()
    }

    #[test]
    fn lines_name_the_message_for_every_outcome() {
        let spec = CommitSpec::new(["x.txt"], "add x");

        assert_eq!(
            plain(outcome_line(&spec, &Outcome::Committed)),
            "✅ Committed: add x"
        );
        assert_eq!(
            plain(outcome_line(&spec, &Outcome::NoFilesFound)),
            "Skipping commit 'add x': No files found."
        );
        assert_eq!(
            plain(outcome_line(&spec, &Outcome::NothingToCommit)),
            "⚠️  Skipping 'add x': Nothing to commit"
        );
    }

    #[test]
    fn failures_carry_the_error_text() {
        let spec = CommitSpec::new(["x.txt"], "add x");

        let stage = Outcome::Failed {
            step: FailedStep::Stage,
            detail: String::from("fatal: outside repository"),
        };
        assert_eq!(
            plain(outcome_line(&spec, &stage)),
            "Failed to add files for 'add x': fatal: outside repository"
        );

        let commit = Outcome::Failed {
            step: FailedStep::Commit,
            detail: String::from("hook rejected"),
        };
        assert_eq!(
            plain(outcome_line(&spec, &commit)),
            "❌ Failed to commit 'add x': hook rejected"
        );
    }

    #[test]
    fn nothing_to_commit_is_distinct_from_failure() {
        let spec = CommitSpec::new(["x.txt"], "add x");
        let skipped = plain(outcome_line(&spec, &Outcome::NothingToCommit));
        assert!(!skipped.contains("Failed"));
    }

    #[test]
    fn summary_line_reports_count() {
        assert_eq!(
            plain(summary_line(&RunSummary::default())),
            "Total Commits Created: 0"
        );
    }
}
