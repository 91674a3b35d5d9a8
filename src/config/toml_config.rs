use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DemoError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub demo: DemoInfo,
    pub connection: ConnectionConfig,
    pub queries: Option<QueriesConfig>,
    pub seed: Option<SeedConfig>,
    pub report: Option<ReportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueriesConfig {
    pub page_size: Option<i64>,
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DemoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DemoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with values from the environment.
    /// Unset variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_connection_uri("connection.uri", &self.connection.uri)?;
        validation::validate_non_empty_string("connection.database", &self.connection.database)?;
        validation::validate_non_empty_string("connection.collection", &self.connection.collection)?;
        validation::validate_positive_number("queries.page_size", self.page_size(), 1)?;

        if let Some(path) = self.report_path_value() {
            validation::validate_path("report.path", path)?;
        }

        Ok(())
    }

    pub fn page_size(&self) -> i64 {
        self.queries
            .as_ref()
            .and_then(|q| q.page_size)
            .unwrap_or(5)
    }

    pub fn is_read_only(&self) -> bool {
        self.queries
            .as_ref()
            .and_then(|q| q.read_only)
            .unwrap_or(false)
    }

    pub fn seed_enabled(&self) -> bool {
        self.seed.as_ref().map(|s| s.enabled).unwrap_or(false)
    }

    pub fn report_path_value(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.path.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn connection_uri(&self) -> &str {
        &self.connection.uri
    }

    fn database(&self) -> &str {
        &self.connection.database
    }

    fn collection(&self) -> &str {
        &self.connection.collection
    }

    fn page_size(&self) -> i64 {
        self.page_size()
    }

    fn read_only(&self) -> bool {
        self.is_read_only()
    }

    fn seed(&self) -> bool {
        self.seed_enabled()
    }

    fn report_path(&self) -> Option<&str> {
        self.report_path_value()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[demo]
name = "bookstore-tour"
description = "Scripted query tour"
version = "1.0.0"

[connection]
uri = "mongodb://localhost:27017"
database = "plp_bookstore"
collection = "books"

[queries]
page_size = 3
read_only = true

[seed]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.demo.name, "bookstore-tour");
        assert_eq!(config.connection.database, "plp_bookstore");
        assert_eq!(config.page_size(), 3);
        assert!(config.is_read_only());
        assert!(config.seed_enabled());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_MONGO_URI", "mongodb://db.internal:27017");

        let toml_content = r#"
[demo]
name = "test"
description = "test"
version = "1.0"

[connection]
uri = "${TEST_MONGO_URI}"
database = "plp_bookstore"
collection = "books"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.connection.uri, "mongodb://db.internal:27017");

        std::env::remove_var("TEST_MONGO_URI");
    }

    #[test]
    fn test_config_validation_rejects_bad_uri() {
        let toml_content = r#"
[demo]
name = "test"
description = "test"
version = "1.0"

[connection]
uri = "not-a-uri"
database = "plp_bookstore"
collection = "books"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let toml_content = r#"
[demo]
name = "defaults"
description = "defaults"
version = "1.0"

[connection]
uri = "mongodb://localhost:27017"
database = "plp_bookstore"
collection = "books"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.page_size(), 5);
        assert!(!config.is_read_only());
        assert!(!config.seed_enabled());
        assert!(config.report_path_value().is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[demo]
name = "file-test"
description = "File test"
version = "1.0"

[connection]
uri = "mongodb://localhost:27017"
database = "plp_bookstore"
collection = "books"

[report]
path = "./reports"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.demo.name, "file-test");
        assert_eq!(config.report_path_value(), Some("./reports"));
    }
}
