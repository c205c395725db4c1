//! Add one unit of a product.

use anyhow::{bail, Result};
use gomarket_cart::ProductDescriptor;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    if !args.price.is_finite() {
        bail!("Price must be a finite number, got {}", args.price);
    }

    let scope = ctx.open_cart().await?;
    let cart = scope.cart()?;

    let product = ProductDescriptor::new(args.id, args.title, args.image_url, args.price);
    let id = product.id.clone();
    cart.add_to_cart(product);
    cart.flush().await;

    let quantity = cart.get(&id).map(|item| item.quantity).unwrap_or_default();
    ctx.output
        .success(&format!("Added {} (quantity {})", id, quantity));
    ctx.output.cart(&cart.products());
    Ok(())
}
