//! HTTP server implementation.

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

use super::routes;
use super::state::QuizState;

/// Run the quiz server until it is shut down.
///
/// The state is shared read-only by every worker.
pub async fn run(bind_addr: &str, state: QuizState) -> std::io::Result<()> {
    let state = web::Data::new(state);

    info!("Server listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
