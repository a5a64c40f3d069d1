//! Interactive food browser.
//!
//! The food list is fetched once. Each stdin line is then a search query
//! (debounced, so only the last of a quick burst is applied) or one of the
//! commands `:next`, `:prev`, `:page N`, `:refresh`, `:quit`.

use std::sync::Arc;

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use super::Context;
use super::listing::{Listing, print_slice};
use crate::api::Api;
use crate::api::models::Food;
use crate::cli::OutputOptions;
use crate::collection::filters;
use crate::collection::{CollectionView, Debouncer, ViewStatus};
use crate::error::Result;
use crate::notice::Notice;

type SharedView = Arc<Mutex<CollectionView<Food>>>;

fn render(view: &SharedView) -> Result<()> {
    let view = view.lock();
    match view.status() {
        ViewStatus::Loading => println!("{}", "Loading...".dimmed()),
        ViewStatus::Error(message) => {
            println!("{}", Notice::error(message).render());
            if !view.raw().is_empty() {
                println!("{}", "Showing previously loaded foods.".dimmed());
                print_slice(&view.visible(), OutputOptions::default(), "foods")?;
            }
        }
        ViewStatus::Ready { empty: true } => println!("{}", "No foods match.".dimmed()),
        ViewStatus::Ready { empty: false } => {
            print_slice(&view.visible(), OutputOptions::default(), "foods")?
        }
    }
    Ok(())
}

/// Fetch the full list. A response that arrives after a newer refresh was
/// started is dropped.
async fn refresh(api: Api, view: SharedView) -> Result<()> {
    let ticket = view.lock().begin_refresh();
    let result = api.catalog().all_foods().await;
    let applied = view.lock().finish_refresh(ticket, result);
    if applied {
        render(&view)?;
    }
    Ok(())
}

fn apply_search(view: &SharedView, query: &str) {
    let mut view = view.lock();
    if query.is_empty() {
        view.clear_filter("search");
    } else {
        view.set_filter("search", filters::keyword(query, Food::search_fields));
    }
}

pub async fn cmd_browse(page_size: Option<usize>) -> Result<()> {
    let ctx = Context::load("browse")?;
    let view: SharedView = Arc::new(Mutex::new(CollectionView::new(ctx.page_size(page_size))));
    let debouncer = Debouncer::from_millis(ctx.config.search_debounce_ms);
    let mut tasks: JoinSet<Result<()>> = JoinSet::new();

    refresh(ctx.api.clone(), view.clone()).await?;
    println!(
        "{}",
        "Type to search. :next, :prev, :page N, :refresh, :quit".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        match line.as_str() {
            ":quit" | ":q" => break,
            ":refresh" | ":r" => {
                tasks.spawn(refresh(ctx.api.clone(), view.clone()));
            }
            ":next" | ":n" => {
                {
                    let mut v = view.lock();
                    let next = v.visible().page + 1;
                    v.set_page(next);
                }
                render(&view)?;
            }
            ":prev" | ":p" => {
                {
                    let mut v = view.lock();
                    let prev = v.visible().page.saturating_sub(1);
                    v.set_page(prev);
                }
                render(&view)?;
            }
            other if other.starts_with(":page") => {
                match other.trim_start_matches(":page").trim().parse::<usize>() {
                    Ok(page) => {
                        view.lock().set_page(page);
                        render(&view)?;
                    }
                    Err(_) => println!("{}", Notice::warning("Usage: :page N").render()),
                }
            }
            query => {
                let query = query.to_string();
                let view = view.clone();
                let debouncer = debouncer.clone();
                tasks.spawn(async move {
                    if debouncer.settle().await {
                        tracing::debug!(query, "search settled");
                        apply_search(&view, &query);
                        render(&view)?;
                    }
                    Ok(())
                });
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => result?,
            Err(e) => tracing::warn!("browse task failed: {e}"),
        }
    }
    Ok(())
}
