mod admin;
mod auth;
mod browse;
mod catalog;
mod config;
mod driver;
mod listing;
mod missions;
mod orders;
mod reviews;
mod vouchers;

pub use admin::{cmd_admin_delete, cmd_admin_list};
pub use auth::{cmd_login, cmd_logout, cmd_register, cmd_whoami};
pub use browse::cmd_browse;
pub use catalog::{cmd_categories, cmd_food, cmd_foods, cmd_restaurants};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use driver::{cmd_driver_accept, cmd_driver_available, cmd_driver_complete, cmd_driver_history};
pub use listing::Listing;
pub use missions::{cmd_mission_claim, cmd_missions};
pub use orders::{cmd_order_cancel, cmd_order_create, cmd_orders};
pub use reviews::{cmd_review_add, cmd_reviews};
pub use vouchers::{cmd_voucher_redeem, cmd_vouchers, cmd_vouchers_mine};

use std::sync::Arc;

use serde_json::Value;

use crate::api::Api;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{CliNavigator, Gateway};
use crate::notice::Notice;
use crate::session::{FileStorage, SessionStore};

/// Everything a command needs to talk to the backend.
pub struct Context {
    pub config: Config,
    pub api: Api,
}

impl Context {
    /// Load configuration and the persisted session. `command` names the
    /// "screen" the navigator reports as the current location.
    pub fn load(command: &str) -> Result<Self> {
        let config = Config::load()?;
        let storage = Arc::new(FileStorage::default_location());
        let session = SessionStore::new(storage);
        let navigator = Arc::new(CliNavigator::new(command));
        let gateway = Gateway::from_config(&config, session, navigator)?;
        tracing::debug!(base_url = %gateway.base_url(), "gateway ready");
        Ok(Self {
            config,
            api: Api::new(gateway),
        })
    }

    pub fn session(&self) -> &SessionStore {
        self.api.gateway().session()
    }

    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.page_size).max(1)
    }
}

/// Output of a command in both renderings.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        if output.json {
            print_json(&self.json)
        } else {
            if let Some(text) = self.text {
                println!("{text}");
            }
            Ok(())
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a one-line outcome unless JSON output was requested.
pub(crate) fn announce(notice: Notice, output: OutputOptions) {
    if !output.json {
        println!("{}", notice.render());
    }
}
