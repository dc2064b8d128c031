use crate::consts::cli_consts::DEFAULT_BASE_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Where the runtime API lives.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Runtime started locally with its default bind address.
    #[default]
    Local,
    /// Any other runtime, reached through an explicit base URL.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the base URL of the runtime API, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_BASE_URL.to_string(),
            Environment::Custom { base_url } => base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                base_url: trimmed.trim_end_matches('/').to_string(),
            });
        }
        Err(format!(
            "invalid runtime URL '{}': expected 'local' or an http(s):// URL",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { base_url } => write!(f, "{}", base_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}
