//! Page URL calculation.

use std::path::Path;

/// Calculate the site URL of a source document.
///
/// With directory URLs, `index.md` and `README.md` map to their directory and
/// every other page gets a directory of its own:
/// - `index.md` -> `` (site root)
/// - `features/index.md` -> `features/`
/// - `features/autoroles.md` -> `features/autoroles/`
///
/// Without directory URLs the page keeps its name with an `.html` extension.
pub fn page_url(path: &str, use_directory_urls: bool) -> String {
    let path = path.replace('\\', "/");
    let source = Path::new(&path);

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let parent = match path.rfind('/') {
        Some(i) => &path[..=i],
        None => "",
    };

    let is_index = stem == "index" || stem.eq_ignore_ascii_case("readme");

    match (is_index, use_directory_urls) {
        (true, true) => parent.to_string(),
        (true, false) => format!("{}index.html", parent),
        (false, true) => format!("{}{}/", parent, stem),
        (false, false) => format!("{}{}.html", parent, stem),
    }
}
