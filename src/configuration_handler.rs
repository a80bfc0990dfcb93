use crate::configuration::Configuration;
use clap::Parser;

/// Command-line flags win over `.env`/environment variables; defaults are
/// suitable for local development.
#[derive(Debug, Clone, Parser)]
pub struct ConfigurationHandler {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: String,

    /// Insert an example salon, customer and working hours on startup.
    #[arg(long, env = "SEED_EXAMPLE_DATA", default_value_t = false)]
    pub seed_example_data: bool,
}

impl Configuration for ConfigurationHandler {
    fn bind_address(&self) -> String {
        self.bind_address.clone()
    }

    fn seed_example_data(&self) -> bool {
        self.seed_example_data
    }
}
