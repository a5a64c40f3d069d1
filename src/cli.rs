use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::collection::{PriceBucket, SortKey, StatusBucket};

#[derive(Parser)]
#[command(name = "bitebox")]
#[command(about = "Browse, order and deliver from the bitebox storefront")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared `--json` switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// Local search, filter, sort and paging options for listing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only items in this category id
    #[arg(short, long)]
    pub category: Option<u64>,

    /// Price bucket: low, mid, high
    #[arg(long, value_parser = parse_price_bucket)]
    pub price: Option<PriceBucket>,

    /// Order status group: pending, in-transit, done, cancelled
    #[arg(long, value_parser = parse_status_bucket)]
    pub status: Option<StatusBucket>,

    /// Sort order: none, price-asc, price-desc, newest
    #[arg(long, default_value = "none", value_parser = parse_sort_key)]
    pub sort: SortKey,

    /// Page to show (starts at 1)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page (default: from config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn output(&self) -> OutputOptions {
        OutputOptions { json: self.json }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long, env = "BITEBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Create a customer account
    Register {
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "BITEBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        #[arg(long)]
        json: bool,
    },

    /// List food categories
    Categories {
        #[arg(long)]
        json: bool,
    },

    /// List foods
    Foods(ListArgs),

    /// Show one food with its reviews
    Food {
        id: u64,

        #[arg(long)]
        json: bool,
    },

    /// Fetch foods once, then filter interactively: one query per stdin line
    Browse {
        /// Items per page (default: from config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List restaurants
    Restaurants(ListArgs),

    /// Your orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Food reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Vouchers
    Vouchers {
        #[command(subcommand)]
        action: VoucherAction,
    },

    /// Missions and rewards
    Missions {
        #[command(subcommand)]
        action: MissionAction,
    },

    /// Delivery driver commands
    Driver {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Administration (admin accounts only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// List your orders
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Place an order
    Create {
        /// Items as FOOD_ID:QUANTITY (quantity defaults to 1)
        #[arg(required = true, value_parser = parse_order_item)]
        items: Vec<(u64, u32)>,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        #[arg(long)]
        voucher: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Cancel an order
    Cancel { id: u64 },
}

#[derive(Subcommand)]
pub enum ReviewAction {
    /// Reviews for a food
    #[command(visible_alias = "ls")]
    List {
        food_id: u64,

        /// Sort order: none, newest
        #[arg(long, default_value = "none", value_parser = parse_sort_key)]
        sort: SortKey,

        #[arg(long)]
        json: bool,
    },

    /// Review a food
    Add {
        food_id: u64,

        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: u8,

        #[arg(short, long)]
        comment: String,

        /// Order the food was part of
        #[arg(long)]
        order: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum VoucherAction {
    /// Vouchers on offer
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },

    /// Vouchers you have redeemed
    Mine {
        #[arg(long)]
        json: bool,
    },

    /// Redeem a voucher code
    Redeem { code: String },
}

#[derive(Subcommand)]
pub enum MissionAction {
    /// Mission progress
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },

    /// Claim a completed mission's reward
    Claim { id: u64 },
}

#[derive(Subcommand)]
pub enum DriverAction {
    /// Orders waiting for a driver
    Available(ListArgs),

    /// Accept an order for delivery
    Accept { id: u64 },

    /// Mark an order delivered
    Complete { id: u64 },

    /// Your past deliveries
    History(ListArgs),
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// List a resource: categories, foods, restaurants, users, orders
    #[command(visible_alias = "ls")]
    List {
        resource: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete an item from a resource
    Delete { resource: String, id: u64 },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Get a configuration value
    Get {
        key: String,

        #[arg(long)]
        json: bool,
    },

    /// Set a configuration value
    Set {
        key: String,
        value: String,

        #[arg(long)]
        json: bool,
    },
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "invalid {field_name} '{s}'. Must be one of: {}",
            valid_values.join(", ")
        )
    })
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "sort key",
        SortKey::ALL_STRINGS,
    )
}

fn parse_price_bucket(s: &str) -> Result<PriceBucket, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "price bucket",
        PriceBucket::ALL_STRINGS,
    )
}

fn parse_status_bucket(s: &str) -> Result<StatusBucket, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "status",
        StatusBucket::ALL_STRINGS,
    )
}

/// `12:2` is two of food 12; a bare `12` is one.
fn parse_order_item(s: &str) -> Result<(u64, u32), String> {
    let (id, quantity) = match s.split_once(':') {
        Some((id, quantity)) => (id, quantity),
        None => (s, "1"),
    };
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid food id in '{s}'"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in '{s}'"))?;
    Ok((id, quantity))
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "bitebox", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_order_item() {
        assert_eq!(parse_order_item("12:3").unwrap(), (12, 3));
        assert_eq!(parse_order_item("12").unwrap(), (12, 1));
        assert!(parse_order_item("x:1").is_err());
        assert!(parse_order_item("1:-2").is_err());
    }

    #[test]
    fn test_parse_sort_key_lists_valid_values() {
        let err = parse_sort_key("cheapest").unwrap_err();
        assert!(err.contains("price-asc"));
        assert_eq!(parse_sort_key("Newest").unwrap(), SortKey::Newest);
    }

    #[test]
    fn test_list_args_parse() {
        let cli = Cli::try_parse_from([
            "bitebox", "foods", "--search", "pizza", "--price", "low", "--sort", "price-desc",
            "--page", "2",
        ])
        .unwrap();
        let Commands::Foods(args) = cli.command else {
            panic!("expected foods command");
        };
        assert_eq!(args.search.as_deref(), Some("pizza"));
        assert_eq!(args.price, Some(PriceBucket::Low));
        assert_eq!(args.sort, SortKey::PriceDesc);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn test_order_create_requires_items() {
        assert!(Cli::try_parse_from(["bitebox", "orders", "create", "-a", "x"]).is_err());
    }
}
