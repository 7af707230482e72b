use std::error::Error;

use clap::{Parser, Subcommand};
use trgc_app::{config::AppConfig, context::AppContext, observability::init_logging};

mod cart;
mod checkout;
mod drop;
mod navigate;

#[derive(Debug, Parser)]
#[command(name = "trgc", about = "TRGC storefront cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart(cart::CartCommand),

    /// Create a checkout session and print its URL
    Checkout,

    /// Simulate arriving on a local route
    Navigate(navigate::NavigateArgs),

    /// Drop display helpers
    Drop(drop::DropCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_logging(&self.config.logging).map_err(|error| describe(&error))?;

        match self.command {
            Commands::Cart(command) => cart::run(command, &mut open(&self.config)?),
            Commands::Checkout => checkout::run(&mut open(&self.config)?).await,
            Commands::Navigate(args) => navigate::run(args, &mut open(&self.config)?),
            Commands::Drop(command) => drop::run(command, &self.config.currency),
        }
    }
}

fn open(config: &AppConfig) -> Result<AppContext, String> {
    AppContext::from_config(config).map_err(|error| describe(&error))
}

/// Render an error with its full source chain.
pub(crate) fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
