//! Validation of documentation site manifests against the docs on disk.
//!
//! The [`Checker`] loads a manifest, scans its documentation directory and runs
//! an ordered set of [`Rule`]s, collecting findings into a [`Report`].

pub mod checker;
pub mod config;
pub mod inventory;
pub mod outline;
pub mod report;
pub mod rule;
pub mod rules;
pub mod titles;

pub use checker::{CheckError, Checker};
pub use config::CheckConfig;
pub use inventory::Inventory;
pub use outline::{Outline, OutlineItem, OutlineKind};
pub use report::{Diagnostic, Report, Severity, Summary};
pub use rule::{Context, Findings, Rule};
