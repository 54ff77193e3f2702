#[macro_use]
extern crate log;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use listenfd::ListenFd;
use std::io;
use user_service::config::Settings;
use user_service::db;
use user_service::user::{InMemoryUserRepository, PgUserRepository, UserRepository};

async fn serve<R: UserRepository>(settings: &Settings, repository: R) -> io::Result<()> {
    let repository = web::Data::new(repository);

    let mut listenfd = ListenFd::from_env();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repository.clone())
            .configure(user_service::configure::<R>)
    });

    server = match listenfd.take_tcp_listener(0)? {
        Some(listener) => server.listen(listener)?,
        None => {
            info!("Binding to {}", settings.bind_address());
            server.bind(settings.bind_address())?
        }
    };

    info!("Starting server 🚀");

    server.run().await
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    match settings.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::init(&settings, database_url)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            serve(&settings, PgUserRepository::new(pool)).await
        }
        None => {
            warn!("DATABASE_URL not set, users are kept in memory only");
            serve(&settings, InMemoryUserRepository::new()).await
        }
    }
}
