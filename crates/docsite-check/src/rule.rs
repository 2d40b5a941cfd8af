//! Trait definitions for validation rules.

use std::path::{Path, PathBuf};

use docsite_manifest::{Manifest, ManifestDocument};

use crate::config::CheckConfig;
use crate::inventory::Inventory;
use crate::report::{Report, Severity};

/// Everything a rule can look at.
pub struct Context<'a> {
    /// The loaded document
    pub document: &'a ManifestDocument,

    /// Files under the docs directory
    pub inventory: &'a Inventory,

    /// Checker settings
    pub config: &'a CheckConfig,
}

impl<'a> Context<'a> {
    pub fn manifest(&self) -> &'a Manifest {
        self.document.manifest()
    }

    /// Documentation directory on disk.
    pub fn docs_root(&self) -> &'a Path {
        self.inventory.root()
    }

    /// Resolve a docs-relative path on disk.
    pub fn docs_path(&self, relative: &str) -> PathBuf {
        self.docs_root().join(relative)
    }
}

/// A single validation rule.
///
/// Each rule owns one diagnostic code and reports every finding under it.
pub trait Rule: Send + Sync {
    /// Diagnostic code (e.g. `nav-missing-file`)
    fn code(&self) -> &'static str;

    /// Severity of this rule's findings
    fn severity(&self) -> Severity;

    /// One-line description for listings
    fn description(&self) -> &'static str;

    /// Inspect the manifest and record findings.
    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>);
}

/// Report handle scoped to one rule, stamping its code and severity.
pub struct Findings<'r> {
    code: &'static str,
    severity: Severity,
    report: &'r mut Report,
}

impl<'r> Findings<'r> {
    pub(crate) fn new(rule: &dyn Rule, report: &'r mut Report) -> Self {
        Self {
            code: rule.code(),
            severity: rule.severity(),
            report,
        }
    }

    pub fn emit(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.report.add(self.code, self.severity, location, message);
    }
}
