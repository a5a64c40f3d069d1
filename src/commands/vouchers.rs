use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{Context, announce, print_json};
use crate::api::models::Voucher;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::notice::Notice;

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Min order")]
    min_order: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn print_vouchers(vouchers: &[Voucher], output: OutputOptions, empty: &str) -> Result<()> {
    if output.json {
        return print_json(&json!(vouchers));
    }
    if vouchers.is_empty() {
        println!("{}", empty.dimmed());
        return Ok(());
    }

    let rows: Vec<VoucherRow> = vouchers
        .iter()
        .map(|v| VoucherRow {
            code: v.code.clone(),
            // Values up to 100 are percentages, larger ones are amounts
            discount: if v.discount <= 100.0 {
                format!("{:.0}%", v.discount)
            } else {
                format!("{:.0}", v.discount)
            },
            min_order: v
                .min_order
                .map(|m| format!("{m:.0}"))
                .unwrap_or_else(|| "-".to_string()),
            expires: v.expires_at.clone().unwrap_or_else(|| "-".to_string()),
            active: if v.active { "yes" } else { "no" }.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

pub async fn cmd_vouchers(output: OutputOptions) -> Result<()> {
    let ctx = Context::load("vouchers")?;
    let vouchers = ctx.api.vouchers().available().await?;
    print_vouchers(&vouchers, output, "No vouchers on offer right now.")
}

pub async fn cmd_vouchers_mine(output: OutputOptions) -> Result<()> {
    let ctx = Context::load("vouchers")?;
    let vouchers = ctx.api.vouchers().mine().await?;
    print_vouchers(&vouchers, output, "You have no vouchers yet.")
}

pub async fn cmd_voucher_redeem(code: &str) -> Result<()> {
    let ctx = Context::load("vouchers")?;
    ctx.api.vouchers().redeem(code).await?;
    announce(
        Notice::success(format!("Voucher {} redeemed.", code.trim())),
        OutputOptions::default(),
    );
    Ok(())
}
