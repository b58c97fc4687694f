//! main file for the server

pub mod model;
mod controller;
pub(crate) mod lifecycle;
pub(crate) mod state;
pub(crate) mod store;
mod util;

use actix_web::{middleware::Logger, web, App, HttpServer};
use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;

/// Run the server
pub(crate) async fn run(ServerConfig{ addr, .. }: ServerConfig, state: AppState) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(controller::configure)
    })
        .bind(addr)?
        .run()
        .await
}
