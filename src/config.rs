use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("endpoint {name} is missing placeholder {placeholder}")]
    Template {
        name: &'static str,
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub ip_url: String,
    /// `{ip}` is replaced with the address to look up
    pub geo_url: String,
    /// `{lat}` and `{lon}` are replaced with the coordinates
    pub passes_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            ip_url: "https://api.ipify.org/?format=json".to_string(),
            geo_url: "http://ipwho.is/{ip}".to_string(),
            passes_url: "https://iss-flyover.herokuapp.com/json/?lat={lat}&lon={lon}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout; `None` keeps the client default
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("geo_url", &self.endpoints.geo_url, "{ip}"),
            ("passes_url", &self.endpoints.passes_url, "{lat}"),
            ("passes_url", &self.endpoints.passes_url, "{lon}"),
        ];
        for (name, url, placeholder) in required {
            if !url.contains(placeholder) {
                return Err(ConfigError::Template { name, placeholder });
            }
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| humantime::parse_duration(s.trim()))
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.endpoints.ip_url, "https://api.ipify.org/?format=json");
        assert_eq!(config.endpoints.geo_url, "http://ipwho.is/{ip}");
        assert!(config.http.timeout.is_none());
        assert!(config.http.user_agent.starts_with("iss-flyover/"));
    }

    #[test]
    fn partial_override() {
        let yaml = r#"
endpoints:
  ip_url: http://localhost:8080/ip
http:
  timeout: 1m 30s
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.endpoints.ip_url, "http://localhost:8080/ip");
        assert_eq!(
            config.endpoints.passes_url,
            EndpointsConfig::default().passes_url
        );
        assert_eq!(config.http.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let err = Config::from_str("http:\n  timeout: soon\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_placeholder_is_rejected() {
        let err = Config::from_str("endpoints:\n  passes_url: http://x/?lat={lat}\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Template {
                name: "passes_url",
                placeholder: "{lon}"
            }
        ));
    }
}
