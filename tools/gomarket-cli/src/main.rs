//! GoMarket CLI - Inspect and edit the persisted shopping cart.
//!
//! Commands:
//! - `gomarket init` - Write a default gomarket.toml
//! - `gomarket list` - Show the cart
//! - `gomarket add` - Add one unit of a product
//! - `gomarket increment` - Add one unit to an item in the cart
//! - `gomarket decrement` - Remove one unit from an item in the cart

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, InitArgs, ListArgs, QuantityArgs};

/// GoMarket CLI - Manage the persisted shopping cart
#[derive(Parser)]
#[command(name = "gomarket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init(InitArgs),

    /// Show the cart
    List(ListArgs),

    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Add one unit to an item already in the cart
    Increment(QuantityArgs),

    /// Remove one unit from an item, dropping it at zero
    Decrement(QuantityArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Increment(args) => commands::quantity::increment(args, &ctx).await,
        Commands::Decrement(args) => commands::quantity::decrement(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
