//! Adjust the quantity of an item already in the cart.

use anyhow::Result;
use gomarket_cart::{CartStore, ProductId};

use super::QuantityArgs;
use crate::context::Context;

/// Run the increment command.
pub async fn increment(args: QuantityArgs, ctx: &Context) -> Result<()> {
    adjust(args, ctx, CartStore::increment).await
}

/// Run the decrement command.
pub async fn decrement(args: QuantityArgs, ctx: &Context) -> Result<()> {
    adjust(args, ctx, CartStore::decrement).await
}

async fn adjust(
    args: QuantityArgs,
    ctx: &Context,
    apply: fn(&CartStore, &ProductId),
) -> Result<()> {
    let scope = ctx.open_cart().await?;
    let cart = scope.cart()?;
    let id = ProductId::new(args.id);

    let present = cart.get(&id).is_some();
    if !present {
        ctx.output
            .warn(&format!("{} is not in the cart; nothing to change", id));
    }

    apply(cart, &id);
    cart.flush().await;

    match cart.get(&id) {
        Some(item) => ctx
            .output
            .success(&format!("{} now has quantity {}", id, item.quantity)),
        None if present => ctx.output.success(&format!("Removed {} from the cart", id)),
        None => {}
    }
    ctx.output.cart(&cart.products());
    Ok(())
}
