use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{Context, announce, print_json};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::notice::Notice;

#[derive(Tabled)]
struct MissionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Mission")]
    title: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Reward")]
    reward: u32,
    #[tabled(rename = "State")]
    state: String,
}

pub async fn cmd_missions(output: OutputOptions) -> Result<()> {
    let ctx = Context::load("missions")?;
    let missions = ctx.api.missions().progress().await?;

    if output.json {
        return print_json(&json!(missions));
    }
    if missions.is_empty() {
        println!("{}", "No missions available.".dimmed());
        return Ok(());
    }

    let rows: Vec<MissionRow> = missions
        .iter()
        .map(|m| MissionRow {
            id: m.id,
            title: m.title.clone(),
            progress: format!("{}/{}", m.progress.min(m.target), m.target),
            reward: m.reward,
            state: if m.claimed {
                "claimed".dimmed().to_string()
            } else if m.is_claimable() {
                "ready to claim".green().to_string()
            } else {
                "in progress".to_string()
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

pub async fn cmd_mission_claim(id: u64) -> Result<()> {
    let ctx = Context::load("missions")?;
    ctx.api.missions().claim(id).await?;
    announce(
        Notice::success(format!("Reward for mission #{id} claimed.")),
        OutputOptions::default(),
    );
    Ok(())
}
