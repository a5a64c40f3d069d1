use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bitebox::cli::{
    AdminAction, Cli, Commands, ConfigAction, DriverAction, MissionAction, OrderAction,
    OutputOptions, ReviewAction, VoucherAction, generate_completions,
};
use bitebox::commands::{
    cmd_admin_delete, cmd_admin_list, cmd_browse, cmd_categories, cmd_config_get, cmd_config_set,
    cmd_config_show, cmd_driver_accept, cmd_driver_available, cmd_driver_complete,
    cmd_driver_history, cmd_food, cmd_foods, cmd_login, cmd_logout, cmd_mission_claim,
    cmd_missions, cmd_order_cancel, cmd_order_create, cmd_orders, cmd_register, cmd_restaurants,
    cmd_review_add, cmd_reviews, cmd_voucher_redeem, cmd_vouchers, cmd_vouchers_mine, cmd_whoami,
};
use bitebox::notice::Notice;

fn json(json: bool) -> OutputOptions {
    OutputOptions { json }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login {
            username,
            password,
            json: as_json,
        } => cmd_login(&username, password, json(as_json)).await,
        Commands::Register {
            username,
            email,
            password,
            full_name,
            phone,
        } => cmd_register(&username, &email, password, full_name, phone).await,
        Commands::Logout => cmd_logout(),
        Commands::Whoami { json: as_json } => cmd_whoami(json(as_json)),

        Commands::Categories { json: as_json } => cmd_categories(json(as_json)).await,
        Commands::Foods(args) => cmd_foods(args).await,
        Commands::Food { id, json: as_json } => cmd_food(id, json(as_json)).await,
        Commands::Browse { page_size } => cmd_browse(page_size).await,
        Commands::Restaurants(args) => cmd_restaurants(args).await,

        Commands::Orders { action } => match action {
            OrderAction::List(args) => cmd_orders(args).await,
            OrderAction::Create {
                items,
                address,
                voucher,
                note,
                json: as_json,
            } => cmd_order_create(&items, &address, voucher, note, json(as_json)).await,
            OrderAction::Cancel { id } => cmd_order_cancel(id).await,
        },

        Commands::Reviews { action } => match action {
            ReviewAction::List {
                food_id,
                sort,
                json: as_json,
            } => cmd_reviews(food_id, sort, json(as_json)).await,
            ReviewAction::Add {
                food_id,
                rating,
                comment,
                order,
            } => cmd_review_add(food_id, rating, &comment, order).await,
        },

        Commands::Vouchers { action } => match action {
            VoucherAction::List { json: as_json } => cmd_vouchers(json(as_json)).await,
            VoucherAction::Mine { json: as_json } => cmd_vouchers_mine(json(as_json)).await,
            VoucherAction::Redeem { code } => cmd_voucher_redeem(&code).await,
        },

        Commands::Missions { action } => match action {
            MissionAction::List { json: as_json } => cmd_missions(json(as_json)).await,
            MissionAction::Claim { id } => cmd_mission_claim(id).await,
        },

        Commands::Driver { action } => match action {
            DriverAction::Available(args) => cmd_driver_available(args).await,
            DriverAction::Accept { id } => cmd_driver_accept(id).await,
            DriverAction::Complete { id } => cmd_driver_complete(id).await,
            DriverAction::History(args) => cmd_driver_history(args).await,
        },

        Commands::Admin { action } => match action {
            AdminAction::List {
                resource,
                json: as_json,
            } => cmd_admin_list(&resource, json(as_json)).await,
            AdminAction::Delete { resource, id } => cmd_admin_delete(&resource, id).await,
        },

        Commands::Config { action } => match action {
            ConfigAction::Show { json: as_json } => cmd_config_show(json(as_json)),
            ConfigAction::Get { key, json: as_json } => cmd_config_get(&key, json(as_json)),
            ConfigAction::Set {
                key,
                value,
                json: as_json,
            } => cmd_config_set(&key, &value, json(as_json)),
        },

        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", Notice::from_error(&e).render());
            ExitCode::FAILURE
        }
    }
}
