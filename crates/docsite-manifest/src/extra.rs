//! Social links, analytics and free-form `extra` settings.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// A social link rendered in the site footer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    /// Link type (e.g. `github`, `discord`)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Target URL
    #[serde(default)]
    pub link: String,
}

/// The `extra` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extra {
    /// Social links, in display order
    pub social: Vec<SocialLink>,

    /// Remaining keys, in file order
    pub other: Mapping,
}

impl Extra {
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map,
            _ => return Err(ManifestError::invalid("extra", "expected a mapping")),
        };

        let mut extra = Self::default();
        for (key, value) in map {
            if key.as_str() == Some("social") {
                extra.social = serde_yaml::from_value(value.clone())
                    .map_err(|e| ManifestError::invalid("extra.social", e.to_string()))?;
            } else {
                extra.other.insert(key.clone(), value.clone());
            }
        }
        Ok(extra)
    }
}

/// Analytics tracking settings, written as `[tracking_id, mode]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub tracking_id: String,
    pub mode: String,
}

impl Analytics {
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        const KEY: &str = "google_analytics";

        let pair = value
            .as_sequence()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| ManifestError::invalid(KEY, "expected [tracking_id, mode]"))?;

        let field = |i: usize| {
            pair[i]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ManifestError::invalid(KEY, "values must be strings"))
        };

        Ok(Self {
            tracking_id: field(0)?,
            mode: field(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parses_social_links_in_order() {
        let extra = Extra::from_value(&value(
            r#"
social:
  - type: github-alt
    link: https://github.com/example/bot
  - type: discord
    link: https://discord.gg/example
version: 2
"#,
        ))
        .unwrap();

        assert_eq!(
            extra.social,
            vec![
                SocialLink {
                    kind: "github-alt".to_string(),
                    link: "https://github.com/example/bot".to_string(),
                },
                SocialLink {
                    kind: "discord".to_string(),
                    link: "https://discord.gg/example".to_string(),
                },
            ]
        );
        assert_eq!(extra.other.len(), 1);
    }

    #[test]
    fn missing_social_fields_default_to_empty() {
        let extra = Extra::from_value(&value("social:\n  - type: github\n")).unwrap();

        assert_eq!(extra.social[0].link, "");
    }

    #[test]
    fn rejects_non_list_social() {
        assert!(Extra::from_value(&value("social: github")).is_err());
    }

    #[test]
    fn parses_analytics_pair() {
        let analytics = Analytics::from_value(&value("['UA-12345678-1', 'auto']")).unwrap();

        assert_eq!(analytics.tracking_id, "UA-12345678-1");
        assert_eq!(analytics.mode, "auto");
    }

    #[test]
    fn rejects_analytics_without_mode() {
        assert!(Analytics::from_value(&value("['UA-12345678-1']")).is_err());
    }
}
