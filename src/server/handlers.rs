use super::api::API;
use crate::Error;
use crate::cfr::Budget;
use crate::dto::BatchRequest;
use crate::dto::BudgetQuery;
use crate::dto::ErrorResponse;
use crate::dto::GameRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Mount every route on an app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/gto/strategy", web::post().to(strategy))
        .route("/api/gto/analysis", web::post().to(analysis))
        .route("/api/gto/batch", web::post().to(batch_start))
        .route("/api/gto/batch/{id}", web::get().to(batch_status))
        .route("/api/gto/cache/stats", web::get().to(cache_stats))
        .route("/api/gto/cache", web::delete().to(cache_clear));
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Cancels a solve when dropped while still armed.
///
/// actix drops a handler future when its client disconnects, which drops
/// the hangup with it and stops the solve at the next iteration boundary.
struct Hangup {
    flag: Arc<AtomicBool>,
    armed: bool,
}

impl Hangup {
    fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            armed: true,
        }
    }
    fn budget(&self, query: BudgetQuery) -> Budget {
        Budget::from(query).with_cancel(self.flag.clone())
    }
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Hangup {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("client went away, cancelling solve");
            self.flag.store(true, Ordering::Relaxed);
        }
    }
}

async fn strategy(
    api: web::Data<API>,
    query: web::Query<BudgetQuery>,
    body: web::Json<GameRequest>,
) -> impl Responder {
    let hangup = Hangup::new();
    let budget = hangup.budget(query.into_inner());
    let request = body.into_inner();
    let outcome = web::block(move || api.strategy(&request, budget)).await;
    hangup.disarm();
    respond(outcome)
}

async fn analysis(
    api: web::Data<API>,
    query: web::Query<BudgetQuery>,
    body: web::Json<GameRequest>,
) -> impl Responder {
    let hangup = Hangup::new();
    let budget = hangup.budget(query.into_inner());
    let request = body.into_inner();
    let outcome = web::block(move || api.analysis(&request, budget)).await;
    hangup.disarm();
    respond(outcome)
}

async fn batch_start(api: web::Data<API>, body: web::Json<BatchRequest>) -> impl Responder {
    let request = body.into_inner();
    match api.enqueue(&request) {
        Err(e) => failure(&e),
        Ok((accepted, games)) => {
            let api = api.into_inner();
            let id = accepted.batch_id.clone();
            let budget = request.budget();
            let worker = {
                let api = api.clone();
                let id = id.clone();
                tokio::task::spawn_blocking(move || api.run(&id, &games, &budget))
            };
            tokio::spawn(async move {
                if let Err(e) = worker.await {
                    log::error!("{} died: {}", id, e);
                    if let Some(batch) = api.batch(&id) {
                        batch.abandon();
                    }
                }
            });
            HttpResponse::Accepted().json(accepted)
        }
    }
}

async fn batch_status(api: web::Data<API>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match api.batch(&id) {
        Some(batch) => HttpResponse::Ok().json(batch.progress()),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("no batch {}", id),
            kind: "not_found".to_string(),
        }),
    }
}

async fn cache_stats(api: web::Data<API>) -> impl Responder {
    HttpResponse::Ok().json(api.stats())
}

async fn cache_clear(api: web::Data<API>) -> impl Responder {
    api.clear();
    HttpResponse::Ok().json(api.stats())
}

fn respond<T: Serialize>(
    outcome: Result<crate::Result<T>, actix_web::error::BlockingError>,
) -> HttpResponse {
    match outcome {
        Ok(Ok(body)) => HttpResponse::Ok().json(body),
        Ok(Err(e)) => failure(&e),
        Err(e) => failure(&Error::internal(e.to_string())),
    }
}

fn failure(error: &Error) -> HttpResponse {
    match error {
        Error::MalformedHand(_) => {
            log::debug!("rejected: {}", error);
            HttpResponse::BadRequest().json(ErrorResponse::from(error))
        }
        Error::InternalSolver(_) => {
            log::error!("{}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::from(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::Coordinator;
    use crate::dto::BatchProgress;
    use crate::dto::StrategyResponse;
    use crate::solver::Config;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use std::time::Duration;
    use std::time::Instant;

    fn api() -> web::Data<API> {
        let config = Config {
            worlds: 16,
            samples: 4,
            interval: 8,
            ..Config::default()
        };
        web::Data::new(API::from(Coordinator::new(16, config)))
    }

    fn river() -> serde_json::Value {
        serde_json::json!({
            "street": "river",
            "pot": 40,
            "communityCards": "2c7d9hJsQd",
            "players": [
                {"id": 0, "position": "BB", "stack": 80, "invested": 0, "holeCards": "AsAh"},
                {"id": 1, "position": "BTN", "stack": 80, "invested": 0, "holeCards": ""}
            ],
            "currentPlayer": 0
        })
    }

    #[actix_web::test]
    async fn dropped_hangup_cancels() {
        let hangup = Hangup::new();
        let budget = hangup.budget(BudgetQuery::default());
        assert!(!budget.cancelled());
        drop(hangup);
        assert!(budget.cancelled());
    }

    #[actix_web::test]
    async fn disarmed_hangup_leaves_the_solve_alone() {
        let hangup = Hangup::new();
        let budget = hangup.budget(BudgetQuery::default());
        hangup.disarm();
        assert!(!budget.cancelled());
    }

    #[actix_web::test]
    async fn disconnect_mid_solve_cancels() {
        let config = Config {
            threshold: 0.0,
            worlds: 16,
            samples: 4,
            ..Config::default()
        };
        let api = web::Data::new(API::from(Coordinator::new(16, config)));
        let request = serde_json::from_value::<GameRequest>(river()).unwrap();
        let query = BudgetQuery {
            iterations: Some(usize::MAX),
            millis: Some(600_000),
        };
        let handler = strategy(api.clone(), web::Query(query), web::Json(request));
        let abandoned = tokio::time::timeout(Duration::from_millis(100), handler).await;
        assert!(abandoned.is_err());
        let deadline = Instant::now() + Duration::from_secs(30);
        while api.stats().size == 0 && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let stats = api.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.in_flight, 0);
        assert_eq!(stats.failures, 0);
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(App::new().app_data(api()).configure(routes)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"ok"));
    }

    #[actix_web::test]
    async fn strategy_round_trip() {
        let app = test::init_service(App::new().app_data(api()).configure(routes)).await;
        let req = test::TestRequest::post()
            .uri("/api/gto/strategy?iterations=16&millis=60000")
            .set_json(river())
            .to_request();
        let response: StrategyResponse = test::call_and_read_body_json(&app, req).await;
        assert!((1..=16).contains(&response.iterations));
        let total = response.strategy.values().sum::<f32>();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(response.strategy.contains_key(&response.recommended_action));
    }

    #[actix_web::test]
    async fn malformed_is_bad_request() {
        let app = test::init_service(App::new().app_data(api()).configure(routes)).await;
        let mut body = river();
        body["street"] = serde_json::json!("preflop");
        let req = test::TestRequest::post()
            .uri("/api/gto/strategy")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_batch_is_not_found() {
        let app = test::init_service(App::new().app_data(api()).configure(routes)).await;
        let req = test::TestRequest::get().uri("/api/gto/batch/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn batch_is_tracked() {
        let api = api();
        let (accepted, games) = api
            .enqueue(&BatchRequest {
                scenarios: vec![serde_json::from_value(river()).unwrap()],
                iterations: Some(8),
                millis: Some(60_000),
            })
            .unwrap();
        assert_eq!(accepted.total_scenarios, 1);
        api.run(&accepted.batch_id, &games, &Budget::iterations(8));
        let app = test::init_service(App::new().app_data(api.clone()).configure(routes)).await;
        let req = test::TestRequest::get().uri(&accepted.check_url).to_request();
        let progress: BatchProgress = test::call_and_read_body_json(&app, req).await;
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 1);
        assert_eq!(progress.failed, 0);
    }

    #[actix_web::test]
    async fn cache_can_be_cleared() {
        let app = test::init_service(App::new().app_data(api()).configure(routes)).await;
        let req = test::TestRequest::post()
            .uri("/api/gto/strategy?iterations=8&millis=60000")
            .set_json(river())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::delete().uri("/api/gto/cache").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["size"], 0);
        assert_eq!(stats["solves"], 1);
    }
}
