//! Admin resource listing and deletion.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{Context, announce, print_json};
use crate::api::AdminResource;
use crate::cli::OutputOptions;
use crate::error::{ApiError, Result};
use crate::notice::Notice;

pub const ADMIN_RESOURCES: &[&str] = &["categories", "foods", "restaurants", "users", "orders"];

fn unknown_resource(resource: &str) -> ApiError {
    ApiError::InvalidValue {
        kind: "admin resource",
        value: format!("{resource} (expected one of: {})", ADMIN_RESOURCES.join(", ")),
    }
}

/// Refuse early when the stored session is not an admin one. The backend
/// enforces this too; a 403 from it would end the session.
fn require_admin(ctx: &Context) -> Result<()> {
    if ctx.session().is_admin()? {
        Ok(())
    } else {
        Err(ApiError::validation(
            "role",
            "admin commands need an admin account; run `bitebox login` with one",
        ))
    }
}

async fn list_json<T>(resource: AdminResource<T>) -> Result<serde_json::Value>
where
    T: Serialize + DeserializeOwned,
{
    Ok(json!(resource.list().await?))
}

pub async fn cmd_admin_list(resource: &str, output: OutputOptions) -> Result<()> {
    let ctx = Context::load("admin")?;
    require_admin(&ctx)?;
    let admin = ctx.api.admin();
    let items = match resource {
        "categories" => list_json(admin.categories()).await?,
        "foods" => list_json(admin.foods()).await?,
        "restaurants" => list_json(admin.restaurants()).await?,
        "users" => list_json(admin.users()).await?,
        "orders" => list_json(admin.orders()).await?,
        other => return Err(unknown_resource(other)),
    };

    if output.json {
        return print_json(&items);
    }
    // Admin records vary by resource; print one JSON object per line
    match items.as_array() {
        Some(list) if list.is_empty() => println!("No {resource} found."),
        Some(list) => {
            for item in list {
                println!("{}", serde_json::to_string(item)?);
            }
        }
        None => print_json(&items)?,
    }
    Ok(())
}

pub async fn cmd_admin_delete(resource: &str, id: u64) -> Result<()> {
    let ctx = Context::load("admin")?;
    require_admin(&ctx)?;
    let admin = ctx.api.admin();
    match resource {
        "categories" => admin.categories().delete(id).await?,
        "foods" => admin.foods().delete(id).await?,
        "restaurants" => admin.restaurants().delete(id).await?,
        "users" => admin.users().delete(id).await?,
        "orders" => admin.orders().delete(id).await?,
        other => return Err(unknown_resource(other)),
    }
    announce(
        Notice::success(format!("Deleted {resource} #{id}.")),
        OutputOptions::default(),
    );
    Ok(())
}
