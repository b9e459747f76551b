//! Registry addressing and credentials for generic package uploads.

use std::fmt;

/// Token used to authenticate against the registry.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A CI job token, sent as `JOB-TOKEN`.
    JobToken(String),
    /// A personal or deploy token, sent as `Authorization: Bearer`.
    Bearer(String),
}

impl Credential {
    /// Picks the header style. A job token takes precedence when one is
    /// present in the environment.
    pub fn select(token: impl Into<String>, job_token_present: bool) -> Self {
        if job_token_present {
            Credential::JobToken(token.into())
        } else {
            Credential::Bearer(token.into())
        }
    }

    /// The single authentication header carried by the request.
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Credential::JobToken(token) => ("JOB-TOKEN", token.clone()),
            Credential::Bearer(token) => ("Authorization", format!("Bearer {}", token)),
        }
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::JobToken(_) => f.write_str("JobToken(***)"),
            Credential::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

/// Fully derived destination of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTarget {
    pub api_url: String,
    pub project_id: String,
    pub package_name: String,
    pub package_version: String,
    pub filename: String,
    pub credential: Credential,
}

impl RegistryTarget {
    /// `{api_url}/projects/{id}/packages/generic/{name}/{version}/{file}`
    pub fn url(&self) -> String {
        format!(
            "{}/projects/{}/packages/generic/{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.project_id,
            self.package_name,
            self.package_version,
            self.filename
        )
    }
}
