mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use tasting::prelude::*;
use tasting::{config, render};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    let aggregator = Arc::new(Aggregator::from_config(&cfg).context("building catalog client")?);

    match cli.command {
        Commands::Search { query } => {
            let query = tasting::tidy_query(&query.join(" "));
            if query.is_empty() {
                anyhow::bail!("search query is empty");
            }
            let items = aggregator.search_all(&query).await;
            if cli.json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No results found for \"{query}\". Try another term!");
            } else {
                print!("{}", render::result_list(&items));
            }
        }
        Commands::Category { name } => {
            let name = name.unwrap_or_else(|| cfg.initial_category.clone());
            let items = aggregator.search_category(&name).await;
            if cli.json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No meals found in category \"{name}\".");
            } else {
                print!("{}", render::result_list(&items));
            }
        }
        Commands::Details { source, id } => {
            let item = aggregator.lookup(source, &id).await.with_context(|| format!("looking up {source} {id}"))?;
            let view = DetailView::from_item(&item);
            if cli.json {
                print_json(&view)?;
            } else {
                print!("{}", render::detail(&view));
            }
        }
        Commands::Sources => {
            let urls = [&cfg.mealdb_url, &cfg.cocktaildb_url, &cfg.openfoodfacts_url];
            for (kind, url) in SourceKind::ALL.iter().zip(urls) {
                println!("{:<14} [{}] {}", kind.id(), kind.badge(), url);
            }
            if let Some(path) = config::default_config_path() {
                println!("\nconfig file: {}", path.display());
            }
        }
        Commands::Shell => {
            let controller = Controller::new(aggregator, cfg.initial_category.clone());
            run_shell(controller, cli.json).await?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasting=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const SHELL_HELP: &str = "commands: search <query> | category [name] | open <n> | close | help | quit";

async fn run_shell(controller: Controller, json: bool) -> Result<()> {
    controller.on_event(move |event| match event {
        ViewEvent::Loading(msg) => println!("{msg}"),
        ViewEvent::Results(items) => print!("{}", render::result_list(items)),
        ViewEvent::NoResults { query } => println!("No results found for \"{query}\". Try another term!"),
        ViewEvent::CategoryLoaded { category, items } => {
            println!("{category}:");
            print!("{}", render::result_list(items));
        }
        ViewEvent::DetailOpened(view) if json => {
            if let Ok(text) = serde_json::to_string_pretty(view) { println!("{text}"); }
        }
        ViewEvent::DetailOpened(view) => print!("{}", render::detail(view)),
        ViewEvent::DetailClosed => println!("(closed)"),
        ViewEvent::Message(m) => println!("{}", m.text),
    });

    println!("{SHELL_HELP}");
    println!("featured categories: {}", FEATURED_CATEGORIES.join(", "));
    controller.load_initial_category().await;
    // Numbers typed after `open` refer to whatever list was printed last.
    let mut listing = controller.state().category_items;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').map(|(c, a)| (c, a.trim())).unwrap_or((line, ""));
        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{SHELL_HELP}"),
            "search" => {
                controller.dispatch(Command::SubmitQuery(arg.to_string())).await;
                listing = controller.state().results;
            }
            "category" => {
                if arg.is_empty() {
                    controller.load_initial_category().await;
                } else {
                    controller.dispatch(Command::SelectCategory(arg.to_string())).await;
                }
                listing = controller.state().category_items;
            }
            "open" => match arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| listing.get(i)) {
                Some(item) => controller.dispatch(Command::OpenDetail(item.clone())).await,
                None => println!("no item numbered '{arg}'"),
            },
            "close" => controller.dispatch(Command::CloseDetail).await,
            other => println!("unknown command '{other}'. {SHELL_HELP}"),
        }
    }
    Ok(())
}
