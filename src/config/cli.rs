use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bookstore-demo")]
#[command(about = "Runs a scripted tour of queries against a MongoDB book collection")]
pub struct CliConfig {
    #[arg(long, default_value = "mongodb://localhost:27017")]
    pub connection_uri: String,

    #[arg(long, default_value = "plp_bookstore")]
    pub database: String,

    #[arg(long, default_value = "books")]
    pub collection: String,

    #[arg(long, default_value = "5")]
    pub page_size: i64,

    #[arg(long, help = "Skip steps that modify the collection or its indexes")]
    pub read_only: bool,

    #[arg(long, help = "Insert sample books when the collection is empty")]
    pub seed: bool,

    #[arg(long, help = "Directory to write the JSON run report into")]
    pub report_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn connection_uri(&self) -> &str {
        &self.connection_uri
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn page_size(&self) -> i64 {
        self.page_size
    }

    fn read_only(&self) -> bool {
        self.read_only
    }

    fn seed(&self) -> bool {
        self.seed
    }

    fn report_path(&self) -> Option<&str> {
        self.report_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_connection_uri("connection_uri", &self.connection_uri)?;
        validation::validate_non_empty_string("database", &self.database)?;
        validation::validate_non_empty_string("collection", &self.collection)?;
        validation::validate_positive_number("page_size", self.page_size, 1)?;

        if let Some(report_path) = &self.report_path {
            validation::validate_path("report_path", report_path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CliConfig::try_parse_from(["bookstore-demo"]).unwrap();

        assert_eq!(config.connection_uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "plp_bookstore");
        assert_eq!(config.collection, "books");
        assert_eq!(config.page_size, 5);
        assert!(!config.read_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::try_parse_from(["bookstore-demo"]).unwrap();
        config.connection_uri = "http://localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::try_parse_from(["bookstore-demo"]).unwrap();
        config.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::try_parse_from(["bookstore-demo"]).unwrap();
        config.collection = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flags_parse() {
        let config = CliConfig::try_parse_from([
            "bookstore-demo",
            "--read-only",
            "--seed",
            "--page-size",
            "10",
            "--report-path",
            "./reports",
        ])
        .unwrap();

        assert!(config.read_only);
        assert!(config.seed);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.report_path.as_deref(), Some("./reports"));
    }
}
