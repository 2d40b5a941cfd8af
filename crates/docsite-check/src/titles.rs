//! Display titles for pages listed without one.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Deserialize;

use crate::inventory::normalize;

/// Document metadata read from a leading YAML block.
#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    title: Option<String>,
}

/// Resolve the title of a page on disk.
///
/// Falls back through metadata `title`, the first level-1 heading and finally
/// a name derived from the file path. `meta_headers` enables `Key: value`
/// header lines, which are only read when the `meta` extension is on.
pub fn page_title(docs_root: &Path, page: &str, meta_headers: bool) -> String {
    match fs::read_to_string(docs_root.join(normalize(page))) {
        Ok(source) => {
            title_from_source(&source, meta_headers).unwrap_or_else(|| title_from_path(page))
        }
        Err(e) => {
            tracing::debug!("Could not read {} for its title: {}", page, e);
            title_from_path(page)
        }
    }
}

/// Title declared by the document itself.
pub fn title_from_source(source: &str, meta_headers: bool) -> Option<String> {
    let (meta_title, body) = split_meta(source, meta_headers);
    meta_title.or_else(|| first_heading(body))
}

/// Split leading metadata from the markdown body.
///
/// Supports a `---` delimited YAML block and, with `meta_headers`, the
/// `Key: value` header lines read by the `meta` extension.
fn split_meta(source: &str, meta_headers: bool) -> (Option<String>, &str) {
    let trimmed = source.trim_start();

    if let Some(after_open) = trimmed.strip_prefix("---") {
        if let Some(close_pos) = after_open.find("\n---") {
            let yaml = after_open[..close_pos].trim();
            let rest = &after_open[close_pos + 4..];
            let rest = rest.split_once('\n').map_or("", |(_, body)| body);
            let meta: Meta = serde_yaml::from_str(yaml).unwrap_or_default();
            return (meta.title.filter(|t| !t.trim().is_empty()), rest);
        }
        return (None, source);
    }

    if !meta_headers {
        return (None, source);
    }

    let mut title = None;
    let mut consumed = 0;
    for line in source.split_inclusive('\n') {
        let Some((key, value)) = line.split_once(':') else {
            break;
        };
        if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            break;
        }
        if key.eq_ignore_ascii_case("title") {
            title = Some(value.trim().to_string()).filter(|t| !t.is_empty());
        }
        consumed += line.len();
    }

    if consumed == 0 {
        (None, source)
    } else {
        (title, &source[consumed..])
    }
}

/// Text of the first level-1 heading.
fn first_heading(markdown: &str) -> Option<String> {
    let mut heading: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return heading.map(|h| h.trim().to_string()).filter(|h| !h.is_empty());
            }
            _ => {}
        }
    }

    None
}

/// Derive a title from the file name.
///
/// `index` pages take their directory name; the root index is `Home`.
pub fn title_from_path(page: &str) -> String {
    let page = page.replace('\\', "/");
    let path = Path::new(&page);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    let name = if stem == "index" || stem.eq_ignore_ascii_case("readme") {
        match path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
        {
            Some(dir) => dir,
            None => return "Home".to_string(),
        }
    } else {
        stem
    };

    capitalize(&name.replace(['-', '_'], " "))
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prefers_yaml_metadata_title() {
        let source = "---\ntitle: Autoroles\n---\n# Automatic roles\n";

        assert_eq!(title_from_source(source, false), Some("Autoroles".to_string()));
    }

    #[test]
    fn reads_meta_extension_headers() {
        let source = "Title: Server Log\nauthors: someone\n\n# Log\n";

        assert_eq!(title_from_source(source, true), Some("Server Log".to_string()));
    }

    #[test]
    fn ignores_header_lines_without_meta_extension() {
        let source = "Title: Server Log\n\n# Log\n";

        assert_eq!(title_from_source(source, false), Some("Log".to_string()));
    }

    #[test]
    fn falls_back_to_first_h1() {
        let source = "Some intro.\n\n## Not this\n\n# The `Title`\n\n# Later\n";

        assert_eq!(title_from_source(source, true), Some("The Title".to_string()));
    }

    #[test]
    fn metadata_without_title_uses_heading() {
        let source = "---\ndescription: x\n---\n# Heading\n";

        assert_eq!(title_from_source(source, false), Some("Heading".to_string()));
    }

    #[test]
    fn no_title_in_plain_text() {
        assert_eq!(title_from_source("just text", true), None);
    }

    #[test]
    fn derives_titles_from_paths() {
        assert_eq!(title_from_path("index.md"), "Home");
        assert_eq!(title_from_path("features/index.md"), "Features");
        assert_eq!(title_from_path("features/auto_roles.md"), "Auto roles");
        assert_eq!(title_from_path("commands/server-log.md"), "Server log");
        assert_eq!(title_from_path("guide\\README.md"), "Guide");
    }

    #[test]
    fn reads_title_from_disk() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("about.md"), "# About NabBot\n").unwrap();

        assert_eq!(page_title(temp.path(), "about.md", false), "About NabBot");
        assert_eq!(page_title(temp.path(), "missing-page.md", false), "Missing page");
    }
}
