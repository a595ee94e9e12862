use crate::config::Config;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Which expression API the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The development server on its default port.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the expression API.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://127.0.0.1:5000".to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Pick the API endpoint.
///
/// `explicit` comes from `--api-url` or `PROTEO_DASH_API` (clap applies that
/// precedence). Then the config file, then [`Environment::Local`].
pub fn resolve_environment(
    explicit: Option<&str>,
    config: Option<&Config>,
) -> Result<Environment, String> {
    if let Some(value) = explicit {
        return value.parse();
    }
    match config {
        Some(config) => match config.environment() {
            Some(environment) => Ok(environment),
            None => {
                log::warn!(
                    "Ignoring unusable api_url '{}' in config file",
                    config.api_url
                );
                Ok(Environment::Local)
            }
        },
        None => Ok(Environment::Local),
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
                api_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "Unknown environment '{}': expected 'local' or an http(s) URL",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_and_urls() {
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        let env: Environment = "https://proteo.example.org/".parse().unwrap();
        assert_eq!(env.api_url(), "https://proteo.example.org");
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn explicit_endpoint_beats_config() {
        let config = Config::new("http://config.example.org".to_string());
        let env = resolve_environment(Some("http://flag.example.org"), Some(&config)).unwrap();
        assert_eq!(env.api_url(), "http://flag.example.org");
        assert!(resolve_environment(Some("nonsense"), Some(&config)).is_err());
    }

    #[test]
    fn config_beats_default() {
        let config = Config::new("http://config.example.org/".to_string());
        let env = resolve_environment(None, Some(&config)).unwrap();
        assert_eq!(env.api_url(), "http://config.example.org");
        assert_eq!(resolve_environment(None, None), Ok(Environment::Local));
    }

    #[test]
    fn unusable_config_url_falls_back_to_local() {
        let config = Config::new("ftp://nope".to_string());
        assert_eq!(resolve_environment(None, Some(&config)), Ok(Environment::Local));
    }
}
