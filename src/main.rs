#![allow(async_fn_in_trait)]

extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate log;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

mod config;
mod core;
mod database;
mod error;
mod handlers;
mod request;
mod response;

use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use config::Config;
use database::{memory::Memory, sqlx::PgSqlxManager};
use error::Error;
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;

use crate::core::ports::repository::Manager;

async fn serve<M>(manager: M, config: &Config) -> Result<(), Error>
where
    M: Manager + Clone + Send + 'static,
{
    let prefix = config.api_prefix.clone();
    info!("listening on {}:{}{}", config.bind_address, config.port, prefix);
    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(Logger::default())
            .app_data(Data::new(manager.clone()))
            .configure(|cfg| handlers::routes::<M>(cfg, &prefix))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("actix_web=info,quizbank=info")).init();
    let config = Config::from_env()?;
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(config.max_connections).connect(url).await?;
            sqlx::migrate!().run(&pool).await?;
            info!("connected to database, migrations applied");
            serve(PgSqlxManager::new(pool), &config).await
        }
        None => {
            warn!("DATABASE_URL is not set, questions are kept in memory and lost on exit");
            serve(Memory::default(), &config).await
        }
    }
}
