//! Theme settings.

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// Selected theme and its settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// Theme name (e.g. `material`)
    pub name: Option<String>,

    /// Directory with template overrides
    pub custom_dir: Option<String>,

    /// Interface language
    pub language: Option<String>,

    /// Logo image, relative to the docs directory
    pub logo: Option<String>,

    /// Favicon image, relative to the docs directory
    pub favicon: Option<String>,

    /// Palette settings (a mapping, or a list of palettes)
    pub palette: Option<Value>,

    /// Enabled feature toggles, in declaration order
    pub features: Vec<String>,

    /// Remaining theme keys, in file order
    pub options: Mapping,
}

impl Theme {
    /// Parse the short form (`theme: material`) or the mapping form.
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::String(name) => Ok(Self {
                name: Some(name.clone()),
                ..Default::default()
            }),
            Value::Mapping(map) => Self::from_mapping(map),
            _ => Err(ManifestError::invalid("theme", "expected a name or a mapping")),
        }
    }

    fn from_mapping(map: &Mapping) -> Result<Self, ManifestError> {
        let mut theme = Self::default();

        for (key, value) in map {
            let Some(key) = key.as_str() else {
                return Err(ManifestError::invalid("theme", "keys must be strings"));
            };

            match key {
                "name" => theme.name = string_field(key, value)?,
                "custom_dir" => theme.custom_dir = string_field(key, value)?,
                "language" => theme.language = string_field(key, value)?,
                "logo" if value.is_string() => theme.logo = string_field(key, value)?,
                "favicon" => theme.favicon = string_field(key, value)?,
                "palette" => theme.palette = Some(value.clone()),
                "features" => theme.features.extend(feature_list(value)?),
                // Older themes toggle features through a mapping of booleans.
                "feature" => theme.features.extend(feature_toggles(value)?),
                _ => {
                    theme.options.insert(Value::String(key.to_string()), value.clone());
                }
            }
        }

        Ok(theme)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

fn string_field(key: &str, value: &Value) -> Result<Option<String>, ManifestError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ManifestError::invalid(
            format!("theme.{}", key),
            "expected a string",
        )),
    }
}

fn feature_list(value: &Value) -> Result<Vec<String>, ManifestError> {
    let Some(items) = value.as_sequence() else {
        return Err(ManifestError::invalid("theme.features", "expected a list"));
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ManifestError::invalid("theme.features", "features must be strings"))
        })
        .collect()
}

fn feature_toggles(value: &Value) -> Result<Vec<String>, ManifestError> {
    let Some(map) = value.as_mapping() else {
        return Err(ManifestError::invalid("theme.feature", "expected a mapping"));
    };

    let mut enabled = Vec::new();
    for (key, flag) in map {
        let name = key
            .as_str()
            .ok_or_else(|| ManifestError::invalid("theme.feature", "keys must be strings"))?;
        if flag.as_bool().unwrap_or(false) {
            enabled.push(name.to_string());
        }
    }
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(yaml: &str) -> Theme {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Theme::from_value(&value).unwrap()
    }

    #[test]
    fn parses_short_form() {
        let theme = parse("material");

        assert_eq!(theme.name.as_deref(), Some("material"));
        assert!(theme.features.is_empty());
    }

    #[test]
    fn parses_mapping_form() {
        let theme = parse(
            r#"
name: material
palette:
  primary: blue grey
  accent: light blue
logo: images/logo.png
favicon: images/favicon.ico
font: false
"#,
        );

        assert_eq!(theme.name.as_deref(), Some("material"));
        let palette = theme.palette.as_ref().and_then(Value::as_mapping).unwrap();
        assert_eq!(palette.get("primary").and_then(Value::as_str), Some("blue grey"));
        assert_eq!(palette.get("accent").and_then(Value::as_str), Some("light blue"));
        assert_eq!(theme.logo.as_deref(), Some("images/logo.png"));
        assert_eq!(theme.favicon.as_deref(), Some("images/favicon.ico"));
        assert_eq!(theme.options.get("font"), Some(&Value::Bool(false)));
    }

    #[test]
    fn normalizes_legacy_feature_toggles() {
        let theme = parse("name: material\nfeature:\n  tabs: true\n  instant: false\n");

        assert_eq!(theme.features, vec!["tabs".to_string()]);
        assert!(theme.has_feature("tabs"));
        assert!(!theme.has_feature("instant"));
    }

    #[test]
    fn keeps_feature_list_order() {
        let theme = parse("features:\n  - navigation.tabs\n  - navigation.top\n");

        assert_eq!(theme.features, vec!["navigation.tabs", "navigation.top"]);
    }

    #[test]
    fn icon_logo_stays_in_options() {
        let theme = parse("logo:\n  icon: cloud\n");

        assert!(theme.logo.is_none());
        assert!(theme.options.get("logo").is_some());
    }

    #[test]
    fn rejects_non_string_name() {
        let value: Value = serde_yaml::from_str("name: [a]").unwrap();

        assert!(Theme::from_value(&value).is_err());
    }
}
