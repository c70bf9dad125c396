//! Terminal front end for the food details screen.
//!
//! Loads the configured dish, prints the screen and reads one command per
//! line from stdin. Pass `--offline` to use a built-in sample menu instead
//! of the food API.

use anyhow::Context;
use food_details::mocks::{InMemoryFoodApi, sample_menu};
use food_details::{
    DishId, ExtraId, FoodApiClient, FoodDetailsAction, FoodDetailsConfig, FoodDetailsEnvironment,
    FoodDetailsStore, food_details_store,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  + <extra id>   add one unit of an extra
  - <extra id>   remove one unit of an extra
  +              one more dish
  -              one less dish
  fav            toggle favorite
  done           finish the order
  retry          reload after a failure
  load <dish id> open another dish
  help           show this help
  quit           exit";

/// A parsed stdin line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Send(FoodDetailsAction),
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<u64, String> {
    raw.parse().map_err(|_| format!("not an id: {raw:?}"))
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let argument = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }

    let action = match (command, argument) {
        ("+", None) => FoodDetailsAction::IncrementFood,
        ("-", None) => FoodDetailsAction::DecrementFood,
        ("+", Some(id)) => FoodDetailsAction::IncrementExtra {
            extra_id: ExtraId::new(parse_id(id)?),
        },
        ("-", Some(id)) => FoodDetailsAction::DecrementExtra {
            extra_id: ExtraId::new(parse_id(id)?),
        },
        ("fav", None) => FoodDetailsAction::ToggleFavorite,
        ("done", None) => FoodDetailsAction::FinishOrder,
        ("retry", None) => FoodDetailsAction::Retry,
        ("load", Some(id)) => FoodDetailsAction::Load {
            dish_id: DishId::new(parse_id(id)?),
        },
        ("help" | "?", None) => return Ok(Command::Help),
        ("quit" | "exit" | "q", None) => return Ok(Command::Quit),
        ("", None) => return Err("empty command".to_string()),
        _ => return Err(format!("unknown command {line:?} (try `help`)")),
    };
    Ok(Command::Send(action))
}

async fn print_view(store: &FoodDetailsStore, config: &FoodDetailsConfig) {
    let view = store.state(|state| state.view(&config.currency)).await;
    println!("\n{view}");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_details=info,composer_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let offline = std::env::args().skip(1).any(|arg| arg == "--offline");
    let config = FoodDetailsConfig::from_env().context("invalid configuration")?;

    let environment = if offline {
        info!("Using the built-in sample menu");
        let api = Arc::new(InMemoryFoodApi::with_dishes(sample_menu()));
        FoodDetailsEnvironment::new(api.clone(), api)
    } else {
        info!(api_url = %config.api_url, timeout = ?config.request_timeout, "Using food API");
        let api = Arc::new(
            FoodApiClient::new(config.api_url.clone(), config.request_timeout)
                .context("failed to build HTTP client")?,
        );
        FoodDetailsEnvironment::new(api.clone(), api)
    };
    let store = food_details_store(environment.with_formatter(Arc::new(config.currency.clone())));

    store
        .send(FoodDetailsAction::Load {
            dish_id: config.dish_id,
        })
        .await?
        .wait()
        .await;
    print_view(&store, &config).await;
    println!("(type `help` for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Send(action)) => {
                store.send(action).await?.wait().await;
                print_view(&store, &config).await;
            },
            Err(message) => eprintln!("{message}"),
        }
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
