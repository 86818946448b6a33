use actix_web::{App, HttpServer, middleware, web};

use irys_checker::{
    AppState, config::Config, errors::CheckerError, routes, sessions::SWEEP_INTERVAL,
};

#[actix_web::main]
async fn main() -> Result<(), CheckerError> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let server_url = config.server_url.clone();
    tracing::info!(
        "Using RPC endpoint {} and explorer {}",
        config.rpc_url,
        config.explorer_url
    );

    let state = web::Data::new(AppState::from_config(config));

    let sessions = state.sessions.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.sweep();
        }
    });

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes::config)
    })
    .bind(&server_url)?
    .run();

    tracing::info!("Listening on {server_url}");
    http_server.await?;

    Ok(())
}
