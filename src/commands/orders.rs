use serde_json::json;

use super::listing;
use super::{CommandOutput, Context, announce};
use crate::api::models::{NewOrder, NewOrderItem};
use crate::cli::{ListArgs, OutputOptions};
use crate::error::Result;
use crate::notice::Notice;

pub async fn cmd_orders(args: ListArgs) -> Result<()> {
    let ctx = Context::load("orders")?;
    let orders = ctx.api.orders();
    listing::run(
        orders.mine(),
        &args,
        ctx.page_size(args.page_size),
        ctx.config.price_thresholds,
        "orders",
    )
    .await
}

pub async fn cmd_order_create(
    items: &[(u64, u32)],
    address: &str,
    voucher: Option<String>,
    note: Option<String>,
    output: OutputOptions,
) -> Result<()> {
    let ctx = Context::load("checkout")?;
    let order = NewOrder {
        items: items
            .iter()
            .map(|&(food_id, quantity)| NewOrderItem { food_id, quantity })
            .collect(),
        delivery_address: address.trim().to_string(),
        voucher_code: voucher.filter(|v| !v.trim().is_empty()),
        note,
    };
    let created = ctx.api.orders().create(&order).await?;

    CommandOutput::new(json!(created))
        .with_text(
            Notice::success(format!(
                "Order #{} placed ({}, total {:.0})",
                created.id, created.status, created.total_amount
            ))
            .render(),
        )
        .print(output)
}

pub async fn cmd_order_cancel(id: u64) -> Result<()> {
    let ctx = Context::load("orders")?;
    ctx.api.orders().cancel(id).await?;
    announce(
        Notice::success(format!("Order #{id} cancelled.")),
        OutputOptions::default(),
    );
    Ok(())
}
