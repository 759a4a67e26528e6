use std::path::Path;

use actix::{Addr, SyncArbiter};
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use services::db_utils::{get_db_pool, AppState, DbActor};
use settings::Settings;
use types::InitError;

mod bootstrap;
mod schema;
mod services;
mod settings;
#[cfg(test)]
mod test;
mod types;

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn init_db(settings: &Settings) -> Result<Addr<DbActor>, InitError> {
    let parent = Path::new(&settings.database_url).parent();
    if let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let pool = get_db_pool(&settings.database_url, settings.pool_size)?;
    {
        let mut conn = pool.get()?;
        bootstrap::run_migrations(&mut conn)?;
        bootstrap::seed_defaults(&mut conn)?;
    }
    tracing::info!(
        database = %settings.database_url,
        pool_size = settings.pool_size,
        "store ready"
    );

    Ok(SyncArbiter::start(settings.db_workers, move || DbActor(pool.clone())))
}

#[actix_web::main]
async fn main() -> Result<(), InitError> {
    dotenv().ok();
    let settings = Settings::load()?;
    init_tracing(&settings.log_level);

    let db = init_db(&settings)?;

    tracing::info!(host = %settings.host, port = settings.port, "starting http server");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(Data::new(AppState { db: db.clone() }))
            .configure(services::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
