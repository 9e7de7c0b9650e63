//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory uploaded review reports are saved into
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Directory the violation report is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Filename of the violation report
    #[serde(default = "default_output_filename")]
    pub output_filename: String,

    /// Model used for shape-constrained classification calls
    #[serde(default = "default_classify_model")]
    pub classify_model: String,

    /// Model used for free-text confirmation calls
    #[serde(default = "default_complete_model")]
    pub complete_model: String,

    /// From address stamped on outbound notifications
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender display name, also used to sign take-down request bodies
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl ServerConfig {
    /// Load configuration from file, falling back to defaults.
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        Ok(config)
    }

    /// Full path of the violation report this server writes.
    pub fn output_path(&self) -> std::path::PathBuf {
        Path::new(&self.output_dir).join(&self.output_filename)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            output_filename: default_output_filename(),
            classify_model: default_classify_model(),
            complete_model: default_complete_model(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
        }
    }
}

fn default_upload_dir() -> String {
    "./upload/csv".to_string()
}

fn default_output_dir() -> String {
    "./output/csv".to_string()
}

fn default_output_filename() -> String {
    "new_output.csv".to_string()
}

fn default_classify_model() -> String {
    "gpt-4".to_string()
}

fn default_complete_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_sender_email() -> String {
    "moderation@reviewsentry.dev".to_string()
}

fn default_sender_name() -> String {
    "Trust & Safety @ ReviewSentry".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.upload_dir, "./upload/csv");
        assert_eq!(config.output_filename, "new_output.csv");
        assert_eq!(config.classify_model, "gpt-4");
        assert_eq!(
            config.output_path(),
            Path::new("./output/csv/new_output.csv")
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ServerConfig =
            serde_yaml::from_str("classify_model: gpt-4o\nsender_name: Ops\n").unwrap();
        assert_eq!(config.classify_model, "gpt-4o");
        assert_eq!(config.sender_name, "Ops");
        assert_eq!(config.complete_model, "gpt-3.5-turbo");
        assert_eq!(config.output_dir, "./output/csv");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ServerConfig::load("/nonexistent/config.yaml").unwrap();
        assert_eq!(config.upload_dir, "./upload/csv");
    }
}
