use actix_files::Files;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer, middleware};

use schoolpress::config::SiteConfig;
use schoolpress::web::middleware::SecurityHeaders;
use schoolpress::web::{AppState, configure, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SiteConfig::from_env().map_err(std::io::Error::other)?;
    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();
    let hsts = config.secure_cookies;

    let state = AppState::from_config(config)
        .await
        .map_err(std::io::Error::other)?;
    let state = Data::new(state);

    log::info!("Serving {} on {}", state.config.school_name, bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders::new(hsts))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .default_service(web::to(handlers::public::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
