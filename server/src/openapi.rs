use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Billsight API",
    description = "Invoice analytics over extracted documents",
))]
struct ApiDoc;

/// The merged API description of all mounted modules.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(billsight_module_ingestor::endpoints::ApiDoc::openapi());
    doc.merge(billsight_module_analytics::dashboard::endpoints::ApiDoc::openapi());
    doc.merge(billsight_module_analytics::chat::endpoints::ApiDoc::openapi());
    doc
}

#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(openapi())
}
