#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate log;

pub mod api_error;
pub mod config;
pub mod db;
mod home;
pub mod schema;
pub mod user;

use actix_web::web;
use api_error::ApiError;
use user::UserRepository;

/// Registers every route, with handlers reading `web::Data<R>` from app data.
pub fn configure<R: UserRepository>(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::new(400, err.to_string()).into());

    cfg.app_data(json_config);
    home::init_routes(cfg);
    user::init_routes::<R>(cfg);
}
