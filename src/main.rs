#[macro_use]
extern crate rocket;

mod api;
mod auth;
mod config;
mod database;
mod db;
mod env;
mod error;
mod ids;
mod models;
mod recommendations;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;

use api::{
    api_create_comment, api_create_friendship, api_create_post, api_create_user,
    api_get_comment, api_get_comments, api_get_friendships, api_get_post, api_get_posts,
    api_get_recommendations, api_get_user, api_get_users, api_login, api_logout, api_me,
    api_post_friendship, api_put_friendship, api_reset, health,
};
use auth::{not_found_api, unauthorized_api, unprocessable_api};
use config::{AppConfig, TelemetryConfig};
use database::Store;
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use telemetry::{TelemetryFairing, init_tracing};
use thiserror::Error;

use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Figment(rocket::figment::Error),
    #[error("{0}")]
    Rocket(Box<rocket::Error>),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::figment::Error> for Error {
    fn from(value: rocket::figment::Error) -> Self {
        Error::Figment(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    env::load_environment()?;
    init_tracing(&TelemetryConfig::from_env())?;

    let figment = rocket::Config::figment();
    let config = AppConfig::from_figment(&figment)?;

    let _rocket = init_rocket(figment, Store::new(), config).launch().await?;

    Ok(())
}

pub fn init_rocket(figment: Figment, store: Store, config: AppConfig) -> Rocket<Build> {
    info!(api_base = %config.api_base, "Starting social graph service");

    let api_base = config.api_base.clone();

    rocket::custom(figment)
        .manage(store)
        .manage(config)
        .mount(
            api_base.as_str(),
            routes![
                api_create_user,
                api_get_users,
                api_get_user,
                api_login,
                api_logout,
                api_me,
                api_get_posts,
                api_get_post,
                api_create_post,
                api_create_comment,
                api_get_comments,
                api_get_comment,
                api_create_friendship,
                api_get_friendships,
                api_put_friendship,
                api_post_friendship,
                api_get_recommendations,
                api_reset,
                health,
            ],
        )
        .register(
            api_base.as_str(),
            catchers![unauthorized_api, not_found_api, unprocessable_api],
        )
        .attach(TelemetryFairing)
}
