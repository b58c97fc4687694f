//! application entry point

use crate::server::lifecycle::menu::Menu;
use crate::server::lifecycle::OrderLifecycle;
use crate::server::model::config::ServerConfig;
use crate::server::model::order::OrderFilter;
use crate::server::state::AppState;
use crate::server::store::{Snapshot, Store};
use anyhow::Context;
use derive_more::Display;
use log::info;
use std::env;
use std::path::Path;
use std::str::FromStr;

mod server;

const DOTENV_LOADING_FAILED_MSG: &str = "failed to load envs from dotenv files, aborting";

#[actix_web::main()]
async fn main() -> anyhow::Result<()> {
    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    match env {
        Env::Prod | Env::Stg => {} // load in CI
        Env::Dev => {
            dotenvy::from_path(Path::new(".env.dev")).context(DOTENV_LOADING_FAILED_MSG)?;
        }
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // c. registry, restored from the data file when there is one
    let config = ServerConfig::from_env()?;
    let store = config.data_file.clone().map(Store::new);
    if let Some(store) = &store {
        info!("using data file {}", store.path().display());
    }
    let snapshot = store.as_ref().map(Store::load).transpose()?.flatten();
    let (lifecycle, menu) = match snapshot {
        Some(Snapshot { mut lifecycle, menu }) => {
            lifecycle.set_wrap_policy(config.wrap_policy);
            info!(
                "restored {} orders, revenue={}",
                lifecycle.orders(&OrderFilter::default()).len(),
                lifecycle.summary().revenue
            );
            (lifecycle, menu)
        }
        None => (
            OrderLifecycle::with_tables(config.wrap_policy, config.table_count),
            Menu::sample(),
        ),
    };
    info!(
        "{} tables and {} menu items, status wrap={}",
        lifecycle.tables().len(),
        menu.items().count(),
        lifecycle.wrap_policy()
    );
    let mut state = AppState::new(lifecycle, menu);
    if let Some(store) = store {
        state = state.with_store(store);
    }

    // d. run app
    info!("App is starting in env={} on {}", env, config.addr);
    server::run(config, state).await?;
    Ok(())
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
