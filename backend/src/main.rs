mod config;
mod engine;
mod services;

use crate::config::ServerConfig;
use crate::engine::{DocxEngine, TemplateEngine};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let engine: Arc<dyn TemplateEngine> = Arc::new(DocxEngine::new());
    let engine = web::Data::from(engine);
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(engine.clone())
            .app_data(config.clone())
            .service(services::documents::configure_routes())
            .default_service(web::route().to(services::assets::serve))
    })
        .bind(bind)?
        .run()
        .await
}
