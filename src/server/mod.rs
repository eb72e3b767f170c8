//! HTTP surface over the coordinator.
mod api;
mod handlers;

pub use api::*;
pub use handlers::routes;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;

pub struct Server;

impl Server {
    pub async fn run(bind: String, workers: usize, api: API) -> Result<(), std::io::Error> {
        let api = web::Data::new(api);
        log::info!("starting strategy server on {} with {} workers", bind, workers);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(api.clone())
                .configure(routes)
        })
        .workers(workers.max(1))
        .bind(bind)?
        .run()
        .await
    }
}
