//! Source repository links and "edit this page" URLs.

use crate::nav::has_scheme;

/// Known source repository hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoHost {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
}

impl RepoHost {
    /// Detect the host from a repository URL.
    pub fn from_url(url: &str) -> Self {
        match host(url).map(str::to_lowercase).as_deref() {
            Some("github.com") => Self::GitHub,
            Some("gitlab.com") => Self::GitLab,
            Some("bitbucket.org") => Self::Bitbucket,
            _ => Self::Other,
        }
    }

    /// Display name used when `repo_name` is unset.
    pub fn default_name(&self) -> Option<&'static str> {
        match self {
            Self::GitHub => Some("GitHub"),
            Self::GitLab => Some("GitLab"),
            Self::Bitbucket => Some("Bitbucket"),
            Self::Other => None,
        }
    }

    /// Edit path used when `edit_uri` is unset.
    pub fn default_edit_uri(&self) -> Option<&'static str> {
        match self {
            Self::GitHub | Self::GitLab => Some("edit/master/docs/"),
            Self::Bitbucket => Some("src/default/docs/"),
            Self::Other => None,
        }
    }
}

/// Host part of a URL, without port or credentials.
pub fn host(url: &str) -> Option<&str> {
    let rest = &url[url.find("://")? + 3..];
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;
    let host = authority.split(':').next()?;
    (!host.is_empty()).then_some(host)
}

/// Scheme and host of a URL (`https://github.com`).
fn origin(url: &str) -> Option<&str> {
    let start = url.find("://")? + 3;
    let end = url[start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |i| start + i);
    Some(&url[..end])
}

/// Base URL that page paths are appended to, or `None` when edit links are off.
///
/// An empty `edit_uri` disables edit links. An absolute `edit_uri` is used
/// as-is; otherwise it is resolved against `repo_url`.
pub fn edit_base(repo_url: Option<&str>, edit_uri: &str) -> Option<String> {
    if edit_uri.is_empty() {
        return None;
    }
    if has_scheme(edit_uri) {
        return Some(edit_uri.to_string());
    }

    let repo_url = repo_url?;
    if edit_uri.starts_with('?') || edit_uri.starts_with('#') {
        Some(format!("{}{}", repo_url, edit_uri))
    } else if edit_uri.starts_with('/') {
        Some(format!("{}{}", origin(repo_url)?, edit_uri))
    } else {
        Some(format!("{}/{}", repo_url.trim_end_matches('/'), edit_uri))
    }
}

/// Full edit link for a page path relative to the docs directory.
pub fn edit_url(repo_url: Option<&str>, edit_uri: &str, page: &str) -> Option<String> {
    let base = edit_base(repo_url, edit_uri)?;
    let page = page.replace('\\', "/");

    if base.ends_with(['/', '?', '#', '=']) {
        Some(format!("{}{}", base, page))
    } else {
        Some(format!("{}/{}", base, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://github.com/Galarzaa90/NabBot";

    #[test]
    fn detects_hosts() {
        assert_eq!(RepoHost::from_url(REPO), RepoHost::GitHub);
        assert_eq!(RepoHost::from_url("https://gitlab.com/a/b"), RepoHost::GitLab);
        assert_eq!(
            RepoHost::from_url("https://user@bitbucket.org/a/b"),
            RepoHost::Bitbucket
        );
        assert_eq!(RepoHost::from_url("https://git.example.com/a"), RepoHost::Other);
        assert_eq!(RepoHost::from_url("not a url"), RepoHost::Other);
    }

    #[test]
    fn extracts_host() {
        assert_eq!(host("https://github.com:443/a/b"), Some("github.com"));
        assert_eq!(host("https://github.com"), Some("github.com"));
        assert_eq!(host("github.com/a"), None);
    }

    #[test]
    fn empty_edit_uri_disables_links() {
        assert_eq!(edit_url(Some(REPO), "", "index.md"), None);
    }

    #[test]
    fn relative_edit_uri_joins_repo_url() {
        assert_eq!(
            edit_url(Some(REPO), "edit/master/docs/", "features/autoroles.md").as_deref(),
            Some("https://github.com/Galarzaa90/NabBot/edit/master/docs/features/autoroles.md")
        );
    }

    #[test]
    fn missing_trailing_slash_is_added() {
        assert_eq!(
            edit_url(Some(REPO), "blob/master/docs", "index.md").as_deref(),
            Some("https://github.com/Galarzaa90/NabBot/blob/master/docs/index.md")
        );
    }

    #[test]
    fn root_relative_edit_uri_uses_origin() {
        assert_eq!(
            edit_url(Some(REPO), "/other/repo/edit/main/", "index.md").as_deref(),
            Some("https://github.com/other/repo/edit/main/index.md")
        );
    }

    #[test]
    fn query_edit_uri_appends_directly() {
        assert_eq!(
            edit_url(Some("https://example.com/repo"), "?path=/docs/", "index.md").as_deref(),
            Some("https://example.com/repo?path=/docs/index.md")
        );
    }

    #[test]
    fn absolute_edit_uri_ignores_repo() {
        assert_eq!(
            edit_url(None, "https://example.com/edit/", "a.md").as_deref(),
            Some("https://example.com/edit/a.md")
        );
    }

    #[test]
    fn relative_edit_uri_needs_repo() {
        assert_eq!(edit_url(None, "edit/master/docs/", "a.md"), None);
    }
}
