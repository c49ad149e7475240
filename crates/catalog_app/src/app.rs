use std::sync::Arc;

use anyhow::Context;
use catalog_core::{FeedIntent, FeedViewModel, ProductDetailView};
use catalog_engine::{FeedStore, ReqwestProductSearch, StateStream};
use catalog_logging::catalog_info;
use chrono::Local;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::config::{AppConfig, Cli};
use crate::ui::command::{parse_command, Command, HELP_TEXT};
use crate::ui::render;

pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli);
    catalog_info!(
        "Starting catalog_app site={} base_url={}",
        config.site_id,
        config.base_url
    );

    let search = ReqwestProductSearch::new(config.search_settings())
        .context("failed to build the search client")?;
    let store = FeedStore::spawn(Arc::new(search));
    let renderer = spawn_renderer(store.observe_state());

    println!("{HELP_TEXT}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Command::Search(keyword) => store.submit_intent(FeedIntent::FetchProducts(keyword)),
            Command::Open(position) => {
                match ProductDetailView::lookup(&store.current_state(), position) {
                    Some(detail) => print_lines(render::render_detail(&detail)),
                    None => println!("No product #{position} in the current results"),
                }
            }
            Command::Help => println!("{HELP_TEXT}"),
            Command::Quit => break,
            Command::Invalid(reason) => println!("{reason}"),
        }
    }

    store.shutdown().await;
    renderer.await.context("renderer task failed")?;
    catalog_info!("catalog_app exited");
    Ok(())
}

fn spawn_renderer(mut states: StateStream) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(state) = states.next().await {
            let view = FeedViewModel::from_state(&state);
            print_lines(render::render(&view, &Local::now()));
        }
    })
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
