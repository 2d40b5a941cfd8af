//! Stylesheet, script and theme asset rules.

use std::path::Path;

use docsite_manifest::nav::is_link;

use crate::report::Severity;
use crate::rule::{Context, Findings, Rule};

/// Local `extra_css` and `extra_javascript` entries must exist.
pub struct MissingExtraCss;

impl Rule for MissingExtraCss {
    fn code(&self) -> &'static str {
        "missing-extra-css"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "extra stylesheet or script does not exist in the docs directory"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let manifest = ctx.manifest();
        let lists = [
            ("extra_css", &manifest.extra_css),
            ("extra_javascript", &manifest.extra_javascript),
        ];

        for (key, paths) in lists {
            for (i, path) in paths.iter().enumerate() {
                if !is_link(path) && !ctx.docs_path(path).is_file() {
                    out.emit(
                        format!("{}[{}]", key, i),
                        format!("'{}' does not exist in the docs directory", path),
                    );
                }
            }
        }
    }
}

/// Theme logo and favicon files must exist.
pub struct MissingThemeAsset;

impl Rule for MissingThemeAsset {
    fn code(&self) -> &'static str {
        "missing-theme-asset"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "theme logo or favicon does not exist"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let theme = &ctx.manifest().theme;
        let custom_dir = theme
            .custom_dir
            .as_deref()
            .map(|dir| ctx.document.base_dir().join(dir));

        let assets = [("theme.logo", &theme.logo), ("theme.favicon", &theme.favicon)];
        for (key, asset) in assets {
            let Some(asset) = asset.as_deref() else {
                continue;
            };
            if is_link(asset) {
                continue;
            }

            let found = ctx.docs_path(asset).is_file()
                || custom_dir
                    .as_deref()
                    .is_some_and(|dir: &Path| dir.join(asset).is_file());
            if !found {
                out.emit(key, format!("'{}' does not exist", asset));
            }
        }
    }
}
