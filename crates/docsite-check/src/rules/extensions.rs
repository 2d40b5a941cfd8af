//! Markdown extension rules.

use crate::report::Severity;
use crate::rule::{Context, Findings, Rule};

/// Each extension may be enabled once.
pub struct DuplicateExtension;

impl Rule for DuplicateExtension {
    fn code(&self) -> &'static str {
        "duplicate-extension"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "markdown extension is enabled more than once"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        for (index, name) in ctx.manifest().markdown_extensions.duplicates() {
            out.emit(
                format!("markdown_extensions[{}]", index),
                format!("extension '{}' is already enabled", name),
            );
        }
    }
}
