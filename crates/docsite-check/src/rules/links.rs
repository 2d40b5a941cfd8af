//! Social link, analytics and repository link rules.

use std::sync::LazyLock;

use docsite_manifest::nav::is_link;
use regex::Regex;

use crate::report::Severity;
use crate::rule::{Context, Findings, Rule};

/// Universal Analytics (`UA-12345678-1`) or GA4 (`G-ABC123DEF4`) ids.
static TRACKING_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(UA-\d{4,10}-\d{1,4}|G-[A-Z0-9]{4,12})$").expect("valid tracking id pattern")
});

/// Social links need a type and an absolute URL.
pub struct InvalidSocialLink;

impl Rule for InvalidSocialLink {
    fn code(&self) -> &'static str {
        "invalid-social-link"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "social link is missing a type or a valid URL"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        for (i, social) in ctx.manifest().extra.social.iter().enumerate() {
            let location = format!("extra.social[{}]", i);

            if social.kind.trim().is_empty() {
                out.emit(location.clone(), "social link has no type");
            }
            if !is_absolute_url(&social.link) {
                out.emit(
                    location,
                    format!("'{}' is not an absolute URL", social.link),
                );
            }
        }
    }
}

fn is_absolute_url(link: &str) -> bool {
    link.starts_with("mailto:") || (is_link(link) && !link.starts_with('/'))
}

/// Analytics settings must carry a recognisable tracking id and a mode.
pub struct InvalidAnalytics;

impl Rule for InvalidAnalytics {
    fn code(&self) -> &'static str {
        "invalid-analytics"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "analytics tracking id or mode is invalid"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let Some(analytics) = &ctx.manifest().google_analytics else {
            return;
        };

        if !TRACKING_ID_RE.is_match(&analytics.tracking_id) {
            out.emit(
                "google_analytics[0]",
                format!("'{}' is not a tracking id", analytics.tracking_id),
            );
        }
        if analytics.mode.trim().is_empty() {
            out.emit("google_analytics[1]", "tracking mode is blank");
        }
    }
}

/// A relative `edit_uri` cannot form links without `repo_url`.
///
/// An empty `edit_uri` only turns edit links off and is never reported.
pub struct EditUriWithoutRepo;

impl Rule for EditUriWithoutRepo {
    fn code(&self) -> &'static str {
        "edit-uri-without-repo"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "edit_uri is relative but repo_url is not set"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let manifest = ctx.manifest();
        let Some(edit_uri) = manifest.edit_uri.as_deref() else {
            return;
        };

        if edit_uri.is_empty() || is_absolute_url(edit_uri) {
            return;
        }
        if manifest.repo_url.is_none() {
            out.emit(
                "edit_uri",
                format!("'{}' needs repo_url to build edit links", edit_uri),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{locations, Fixture};
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_broken_social_links() {
        let fixture = Fixture::new(
            r#"site_name: X
extra:
  social:
    - type: github-alt
      link: https://github.com/Galarzaa90
    - type: ''
      link: https://discord.gg/example
    - type: twitter
      link: twitter.com/example
"#,
            &["docs/index.md"],
        );

        assert_eq!(
            locations(&fixture.run(&InvalidSocialLink)),
            vec!["extra.social[1]", "extra.social[2]"]
        );
    }

    #[test]
    fn accepts_valid_analytics() {
        let fixture = Fixture::new(
            "site_name: X\ngoogle_analytics: ['UA-12345678-1', 'auto']\n",
            &["docs/index.md"],
        );

        assert!(fixture.run(&InvalidAnalytics).is_empty());
    }

    #[test]
    fn reports_bad_tracking_id_and_mode() {
        let fixture = Fixture::new(
            "site_name: X\ngoogle_analytics: ['12345', '']\n",
            &["docs/index.md"],
        );

        assert_eq!(
            locations(&fixture.run(&InvalidAnalytics)),
            vec!["google_analytics[0]", "google_analytics[1]"]
        );
    }

    #[test]
    fn matches_tracking_ids() {
        assert!(TRACKING_ID_RE.is_match("UA-12345678-1"));
        assert!(TRACKING_ID_RE.is_match("G-ABC123DEF4"));
        assert!(!TRACKING_ID_RE.is_match("UA-1-1"));
        assert!(!TRACKING_ID_RE.is_match("ua-12345678-1"));
    }

    #[test]
    fn empty_edit_uri_is_never_reported() {
        let fixture = Fixture::new("site_name: X\nedit_uri: ''\n", &["docs/index.md"]);

        assert!(fixture.run(&EditUriWithoutRepo).is_empty());
    }

    #[test]
    fn relative_edit_uri_needs_repo() {
        let fixture = Fixture::new(
            "site_name: X\nedit_uri: edit/master/docs/\n",
            &["docs/index.md"],
        );

        assert_eq!(locations(&fixture.run(&EditUriWithoutRepo)), vec!["edit_uri"]);
    }

    #[test]
    fn absolute_edit_uri_needs_no_repo() {
        let fixture = Fixture::new(
            "site_name: X\nedit_uri: https://example.com/edit/\n",
            &["docs/index.md"],
        );

        assert!(fixture.run(&EditUriWithoutRepo).is_empty());
    }
}
