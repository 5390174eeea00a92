//! Paginated list-repos client.

use std::time::Duration;

use serde::Deserialize;

use crate::error::GithubError;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("reposync/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// The subset of a GitHub repository object that listing needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Optional include/exclude filter on a repository's primary language.
#[derive(Debug, Clone, Default)]
pub struct RepoFilter {
    /// Keep only repositories whose primary language matches.
    pub language: Option<String>,
    /// Drop repositories whose primary language matches.
    pub language_not: Option<String>,
}

impl RepoFilter {
    pub fn matches(&self, repo: &Repo) -> bool {
        if let Some(want) = &self.language {
            if repo.language.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(skip) = &self.language_not {
            if repo.language.as_deref() == Some(skip.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Token-authenticated GitHub API client.
pub struct Client {
    agent: ureq::Agent,
    token: String,
    base: String,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Client {
        Client::with_base(token, API_BASE)
    }

    /// Point the client at a different API base URL (test servers, GHE).
    pub fn with_base(token: impl Into<String>, base: impl Into<String>) -> Client {
        Client {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
            token: token.into(),
            base: base.into(),
        }
    }

    /// Every repository name for `owner`, filtered, in API order.
    ///
    /// Tries the organization endpoint first and falls back to the user
    /// endpoint on 404, so `owner` may be either.
    pub fn list_repo_names(
        &self,
        owner: &str,
        filter: &RepoFilter,
    ) -> Result<Vec<String>, GithubError> {
        let org_url = format!("{}/orgs/{}/repos", self.base, owner);
        match self.list_all(&org_url, filter) {
            Err(GithubError::Status { status: 404, .. }) => {
                log::debug!("'{owner}' is not an organization, retrying as a user");
                let user_url = format!("{}/users/{}/repos", self.base, owner);
                self.list_all(&user_url, filter)
            }
            other => other,
        }
    }

    fn list_all(&self, url: &str, filter: &RepoFilter) -> Result<Vec<String>, GithubError> {
        let mut names = Vec::new();
        let mut page = 1;
        loop {
            let repos = self.fetch_page(url, page)?;
            let fetched = repos.len();
            names.extend(
                repos
                    .into_iter()
                    .filter(|repo| filter.matches(repo))
                    .map(|repo| repo.name),
            );
            // A short page is the last page.
            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }
        log::debug!("listed {} repos from {url}", names.len());
        Ok(names)
    }

    fn fetch_page(&self, url: &str, page: usize) -> Result<Vec<Repo>, GithubError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .query("type", "all")
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string())
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => GithubError::Status {
                    status,
                    url: url.to_string(),
                },
                ureq::Error::Transport(transport) => GithubError::Transport(transport.to_string()),
            })?;
        response.into_json().map_err(GithubError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>) -> Repo {
        Repo {
            name: name.to_string(),
            language: language.map(String::from),
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = RepoFilter::default();
        assert!(filter.matches(&repo("a", Some("Rust"))));
        assert!(filter.matches(&repo("b", None)));
    }

    #[test]
    fn language_filter_requires_a_match() {
        let filter = RepoFilter {
            language: Some("Rust".to_string()),
            language_not: None,
        };
        assert!(filter.matches(&repo("a", Some("Rust"))));
        assert!(!filter.matches(&repo("b", Some("Go"))));
        assert!(!filter.matches(&repo("c", None)));
    }

    #[test]
    fn language_not_filter_excludes_a_match() {
        let filter = RepoFilter {
            language: None,
            language_not: Some("Go".to_string()),
        };
        assert!(!filter.matches(&repo("a", Some("Go"))));
        assert!(filter.matches(&repo("b", Some("Rust"))));
        assert!(filter.matches(&repo("c", None)));
    }

    #[test]
    fn repo_deserializes_from_api_shape() {
        let body = r#"[
            {"id": 1, "name": "reposync", "language": "Go", "private": false},
            {"id": 2, "name": "dotfiles", "language": null}
        ]"#;
        let repos: Vec<Repo> = serde_json::from_str(body).expect("deserialize");
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "reposync");
        assert_eq!(repos[0].language.as_deref(), Some("Go"));
        assert_eq!(repos[1].language, None);
    }

    #[test]
    fn repo_tolerates_missing_language_field() {
        let body = r#"[{"name": "bare"}]"#;
        let repos: Vec<Repo> = serde_json::from_str(body).expect("deserialize");
        assert_eq!(repos[0].name, "bare");
        assert_eq!(repos[0].language, None);
    }
}
