pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "subtitle")]
#[command(about = "Look up the titles of web pages", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/subtitle/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of pages fetched at once
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Retries after a failed request
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the title of each URL
    Get {
        /// URLs to look up
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Read lines from stdin and print the title of every URL they mention
    Watch,
}

impl Cli {
    /// Load the `--config` file if given, otherwise the default location.
    pub fn load_config(&self) -> crate::app::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.fetch.max_concurrency = workers;
        }
        if let Some(max_retries) = self.max_retries {
            config.fetch.max_retries = max_retries;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli =
            Cli::try_parse_from(["subtitle", "get", "http://a.example", "http://b.example"])
                .unwrap();
        match cli.command {
            Commands::Get { urls } => assert_eq!(urls.len(), 2),
            Commands::Watch => panic!("expected get"),
        }
    }

    #[test]
    fn test_get_requires_a_url() {
        assert!(Cli::try_parse_from(["subtitle", "get"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "subtitle",
            "watch",
            "--workers",
            "3",
            "--max-retries",
            "1",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.fetch.max_concurrency, 3);
        assert_eq!(config.fetch.max_retries, 1);
        assert_eq!(config.fetch.max_redirects, 10);
    }

    #[test]
    fn test_load_config_from_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch]\nmax_retries = 2\n").unwrap();

        let cli = Cli::try_parse_from(["subtitle", "--config", path.to_str().unwrap(), "watch"])
            .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.fetch.max_retries, 2);
    }

    #[test]
    fn test_missing_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let cli = Cli::try_parse_from(["subtitle", "--config", path.to_str().unwrap(), "watch"])
            .unwrap();
        let err = cli.load_config().unwrap_err();
        assert!(matches!(err, crate::app::SubtitleError::Config(_)));
    }
}
