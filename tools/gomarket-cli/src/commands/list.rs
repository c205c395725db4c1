//! Show the cart.

use anyhow::Result;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let scope = ctx.open_cart().await?;
    let cart = scope.cart()?;

    if args.count {
        if ctx.output.is_json() {
            ctx.output
                .json(&serde_json::json!({ "units": cart.item_count() }));
        } else {
            println!("{}", cart.item_count());
        }
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", cart.storage_key()));
    ctx.output.cart(&cart.products());
    Ok(())
}
