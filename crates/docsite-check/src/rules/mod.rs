//! Built-in validation rules.

pub mod assets;
pub mod extensions;
pub mod links;
pub mod nav;
pub mod site;

use crate::rule::Rule;

/// The default rule set, in reporting order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(site::MissingSiteName),
        Box::new(site::MissingDocsDir),
        Box::new(nav::NavMissingFile),
        Box::new(nav::NavPathEscapes),
        Box::new(nav::NavEmptySection),
        Box::new(nav::NavNotMarkdown),
        Box::new(nav::NavDuplicatePage),
        Box::new(site::DeprecatedPagesKey),
        Box::new(extensions::DuplicateExtension),
        Box::new(assets::MissingExtraCss),
        Box::new(assets::MissingThemeAsset),
        Box::new(links::InvalidSocialLink),
        Box::new(links::InvalidAnalytics),
        Box::new(links::EditUriWithoutRepo),
        Box::new(site::UnknownKey),
        Box::new(nav::OrphanPage),
    ]
}
