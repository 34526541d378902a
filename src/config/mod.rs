pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_domain, validate_non_empty_string, validate_url};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "domainval")]
#[command(about = "Estimates the market value of a domain name and assembles a report")]
pub struct CliConfig {
    /// Domain to analyze, e.g. example.com
    pub domain: String,

    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub api_base_url: String,

    /// API key for the generative service; falls back to $DOMAINVAL_API_KEY
    #[arg(long, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "gpt-4o")]
    pub model: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Seed for the scoring jitter; fixed seed makes runs reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, help = "Skip the generative service and use local heuristics only")]
    pub offline: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn validate(&self) -> Result<()> {
        validate_domain(&self.domain)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}
