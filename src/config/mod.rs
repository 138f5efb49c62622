pub mod seed;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "venue-alloc")]
#[command(about = "Seller-to-slot allocation for a partitioned market venue")]
pub struct CliConfig {
    /// TOML seed file with categories and initial sellers
    #[arg(long)]
    pub seed: Option<String>,

    /// JSON request file holding one create, update or delete operation
    #[arg(long)]
    pub request: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("request", &self.request)?;
        if let Some(seed) = &self.seed {
            validation::validate_path("seed", seed)?;
        }
        Ok(())
    }
}
