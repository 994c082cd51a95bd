use crate::config::AppConfig;
use crate::db::connection::init_db;
use crate::router::{handle, App};
use astra::Server;

mod auth;
mod cases;
mod config;
mod db;
mod domain;
mod errors;
mod map;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let db = config.database();
    if let Err(e) = init_db(&db, &config.schema_path) {
        log::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    if std::env::args().nth(1).as_deref() == Some("seed") {
        seed(&db);
        return;
    }

    let assets = match config.asset_loader() {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let addr = config.addr;
    let workers = config.max_workers;
    let app = App::new(config, assets);

    log::info!("starting server at http://{addr} with {workers} workers");
    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        match handle(req, &app) {
            Ok(resp) => {
                log::debug!("{method} {path} -> {}", resp.status());
                resp
            }
            Err(err) => {
                log::info!("{method} {path} -> {err}");
                templates::html_error_response(err)
            }
        }
    });

    if let Err(e) = result {
        log::error!("server ended with error: {e}");
    }

    log::info!("server shut down cleanly");
}

fn seed(db: &db::connection::Database) {
    let now = chrono::Utc::now().timestamp();
    match db.with_conn(|conn| db::seed::seed_demo(conn, now)) {
        Ok(summary) => {
            log::info!("seeded {} cases for user {}", summary.cases, summary.user_id);
            println!("session={}", summary.session_token);
        }
        Err(e) => {
            log::error!("seeding failed: {e}");
            std::process::exit(1);
        }
    }
}
