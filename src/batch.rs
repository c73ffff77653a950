use crate::error::{BatchError, Result};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the batch file picked up from the current directory when no
/// `--batch` argument is given.
pub const DEFAULT_BATCH_FILE: &str = "batch-commit.toml";

/// Batch compiled into the binary, used when no batch file is found.
const BUILTIN_BATCH: &str = include_str!("../batch.toml");

/// One intended commit: the files that belong to it and its message.
///
/// A spec is identified by its position in the batch. File order is kept
/// as written and is the order paths are handed to `git add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitSpec {
    pub message: String,
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl CommitSpec {
    pub fn new<P: Into<PathBuf>>(files: impl IntoIterator<Item = P>, message: &str) -> Self {
        CommitSpec {
            message: message.to_string(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// An ordered list of commit specs plus a description of where it came from.
#[derive(Debug, Clone)]
pub struct Batch {
    pub origin: String,
    pub specs: Vec<CommitSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchDocument {
    #[serde(rename = "commit", default)]
    commits: Vec<CommitSpec>,
}

/// Parses a batch from TOML text.
///
/// The document is a list of `[[commit]]` tables, each with a `message`
/// and a `files` array. `origin` is only used in error messages and in
/// the returned [`Batch`].
pub fn parse(content: &str, origin: &str) -> Result<Batch> {
    let doc: BatchDocument = toml::from_str(content).map_err(|e| BatchError::Parse {
        origin: origin.to_string(),
        message: e.message().to_string(),
    })?;

    Ok(Batch {
        origin: origin.to_string(),
        specs: doc.commits,
    })
}

/// Returns the batch shipped with the binary.
pub fn builtin() -> Result<Batch> {
    parse(BUILTIN_BATCH, "built-in batch")
}

/// Loads a batch from a TOML file.
pub fn load_from(path: &Path) -> Result<Batch> {
    tracing::debug!("Loading batch from: {:?}", path);

    if !path.exists() {
        return Err(BatchError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content, &path.display().to_string())
}

/// Picks the batch to run.
///
/// An explicit path always wins and must exist. Otherwise
/// [`DEFAULT_BATCH_FILE`] in `dir` is used if present, and the built-in
/// batch if not.
pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Batch> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    let local = dir.join(DEFAULT_BATCH_FILE);
    if local.exists() {
        return load_from(&local);
    }

    tracing::debug!("No batch file found, using built-in batch");
    builtin()
}
