//! Repository handles parsed from source repository URLs

use std::fmt;

use depdiff_core::ClientAcquisitionError;
use url::Url;

/// Hosts with published check results
const SUPPORTED_HOSTS: &[&str] = &["github.com", "gitlab.com"];

/// `host/owner/name` handle of a source repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoHandle {
    host: String,
    owner: String,
    name: String,
}

impl RepoHandle {
    /// Parse a source repository URL.
    ///
    /// Accepts `https://github.com/owner/name`, with or without a `.git`
    /// suffix or trailing slash, `git+https://` and `git://` URLs, bare
    /// `github.com/owner/name` and scp-like `git@github.com:owner/name.git`.
    pub fn parse(input: &str) -> Result<Self, ClientAcquisitionError> {
        let unsupported = || ClientAcquisitionError::unsupported_repository(input);
        let trimmed = input.trim();

        let (host, path) = if let Some(rest) = trimmed.strip_prefix("git@") {
            let (host, path) = rest.split_once(':').ok_or_else(unsupported)?;
            (host.to_string(), path.to_string())
        } else {
            let candidate = trimmed.strip_prefix("git+").unwrap_or(trimmed);
            let candidate = if candidate.contains("://") {
                candidate.to_string()
            } else {
                format!("https://{}", candidate)
            };
            let url = Url::parse(&candidate).map_err(|_| unsupported())?;
            if !matches!(url.scheme(), "https" | "http" | "git" | "ssh") {
                return Err(unsupported());
            }
            let host = url.host_str().ok_or_else(unsupported)?.to_string();
            (host, url.path().to_string())
        };

        let host = host.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
        if !SUPPORTED_HOSTS.contains(&host.as_str()) {
            return Err(unsupported());
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let [owner, name] = segments.as_slice() else {
            return Err(unsupported());
        };
        let name = name.strip_suffix(".git").unwrap_or(*name);
        if name.is_empty() {
            return Err(unsupported());
        }

        Ok(Self {
            host,
            owner: (*owner).to_string(),
            name: name.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}
