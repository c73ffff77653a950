//! # batch-commit
//!
//! A CLI tool that turns an already-modified working tree into a series of
//! small, labeled commits.
//!
//! This crate provides functionality to:
//! - Load an ordered batch of commit groups (file paths plus a message)
//! - Stage only the files of each group that currently exist
//! - Commit each group and classify the outcome
//! - Report every outcome and the number of commits created
//!
//! ## Usage
//!
//! ```bash
//! # Run the built-in batch (or ./batch-commit.toml if present)
//! batch-commit
//!
//! # Run a batch from a specific file
//! batch-commit --batch commits.toml
//! ```
//!
//! ## Modules
//!
//! - [`batch`] - Commit groups and batch loading
//! - [`cli`] - Command-line interface and main entry point
//! - [`git`] - Git command wrappers
//! - [`orchestrator`] - The per-group stage/commit loop
//! - [`report`] - Console notices for outcomes
//! - [`banner`] - Decorative CLI banner
//! - [`error`] - Startup errors

pub mod banner;
pub mod batch;
pub mod cli;
pub mod error;
pub mod git;
pub mod orchestrator;
pub mod report;
