use super::listing;
use super::{Context, announce};
use crate::cli::{ListArgs, OutputOptions};
use crate::error::Result;
use crate::notice::Notice;

pub async fn cmd_driver_available(args: ListArgs) -> Result<()> {
    let ctx = Context::load("driver")?;
    let driver = ctx.api.driver();
    listing::run(
        driver.available(),
        &args,
        ctx.page_size(args.page_size),
        ctx.config.price_thresholds,
        "orders",
    )
    .await
}

pub async fn cmd_driver_history(args: ListArgs) -> Result<()> {
    let ctx = Context::load("driver")?;
    let driver = ctx.api.driver();
    listing::run(
        driver.history(),
        &args,
        ctx.page_size(args.page_size),
        ctx.config.price_thresholds,
        "deliveries",
    )
    .await
}

pub async fn cmd_driver_accept(id: u64) -> Result<()> {
    let ctx = Context::load("driver")?;
    ctx.api.driver().accept(id).await?;
    announce(
        Notice::success(format!("Order #{id} accepted. Drive safely!")),
        OutputOptions::default(),
    );
    Ok(())
}

pub async fn cmd_driver_complete(id: u64) -> Result<()> {
    let ctx = Context::load("driver")?;
    ctx.api.driver().complete(id).await?;
    announce(
        Notice::success(format!("Order #{id} marked delivered.")),
        OutputOptions::default(),
    );
    Ok(())
}
