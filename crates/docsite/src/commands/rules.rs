//! Rule listing command.

use std::process::ExitCode;

use anyhow::Result;
use docsite_check::{CheckConfig, Checker};

/// Run the rules command.
pub async fn run(config: CheckConfig) -> Result<ExitCode> {
    print!("{}", listing(&Checker::new(config)));
    Ok(ExitCode::SUCCESS)
}

/// One line per rule in reporting order, marking rules the config ignores.
fn listing(checker: &Checker) -> String {
    let mut out = String::new();

    for rule in checker.rules() {
        out.push_str(&format!(
            "{:<24} {:<8} {}",
            rule.code(),
            rule.severity().to_string(),
            rule.description()
        ));
        if checker.config().is_ignored(rule.code()) {
            out.push_str("  (ignored)");
        }
        out.push('\n');
    }

    out
}
