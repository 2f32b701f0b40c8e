//! Defines [`BaseUrl`], the public root URL of the generated site.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use url::{ParseError, Url};

/// The absolute URL under which the generated files are published. The value
/// is validated with [`Url::parse`] but otherwise kept as the user wrote it,
/// trailing slash included. Only [`BaseUrl::join`] drops trailing slashes so
/// that `{base}/feed.xml` never doubles one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

/// Used when neither the command line nor the project file supplies a base
/// URL.
pub const DEFAULT_BASE_URL: &str = "https://yourusername.github.io/rock-of-the-day";

impl BaseUrl {
    pub fn parse(s: &str) -> Result<BaseUrl, ParseError> {
        let trimmed = s.trim();
        Url::parse(trimmed)?;
        Ok(BaseUrl(trimmed.to_owned()))
    }

    /// Appends `path` as a child of the base URL.
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        BaseUrl(DEFAULT_BASE_URL.to_owned())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for BaseUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseUrl::parse(s)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<BaseUrl, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::parse(&s).map_err(|e| D::Error::custom(format!("Invalid base URL `{}`: {}", s, e)))
    }
}
