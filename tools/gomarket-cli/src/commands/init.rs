//! Write a default configuration file.

use anyhow::{bail, Result};

use super::InitArgs;
use crate::config::CliConfig;
use crate::context::{Context, CONFIG_NAMES};

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = CliConfig::default();
    config.storage.path = args.store_path;

    let Some(path_str) = path.to_str() else {
        bail!("Config path is not valid UTF-8: {}", path.display());
    };
    config.save(path_str)?;

    if ctx.output.is_json() {
        ctx.output.json(&config);
    } else {
        ctx.output
            .success(&format!("Wrote {}", path.display()));
        ctx.output
            .info(&format!("Cart key: {}", config.cart.storage_key()));
    }
    Ok(())
}
