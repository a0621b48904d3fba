
use actix_web::{get, web, HttpResponse, Responder};
use billsight_common::db::Database;
use billsight_module_analytics::chat::service::ChatService;

/// Wire up the full API surface: the dashboard and chat endpoints at the
/// root, ingestion under `/api`.
pub fn configure(config: &mut web::ServiceConfig, db: Database, chat: ChatService) {
    billsight_module_analytics::configure(config, db.clone(), chat);

    config.service(web::scope("/api").configure(|config| {
        billsight_module_ingestor::endpoints::configure(config, db.clone());
    }));

    config
        .app_data(web::Data::new(db))
        .service(health)
        .service(crate::openapi::openapi_json);
}

#[get("/health")]
async fn health(db: web::Data<Database>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "up" })),
        Err(err) => {
            log::warn!("health check failed: {err}");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "down" }))
        }
    }
}
