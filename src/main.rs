use actix_web::{App, HttpServer, web};
use logs_looker::config::Config;
use logs_looker::docker::DockerCli;
use logs_looker::handlers::{self, AppState};
use logs_looker::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let port = config.port;
    let docker = DockerCli::new(config.command_timeout);
    let app_state = web::Data::new(AppState { config, docker });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    // [::] accepts IPv4-mapped connections as well, so one socket covers both
    // stacks. Bind failure is the only fatal startup error.
    .bind(("::", port))?;

    log::info!("Docker Logs Looker started on port {port}");
    let result = server.run().await;
    log::info!("Docker Logs Looker stopped");
    result
}
