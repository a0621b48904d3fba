use actix_web::{post, web, HttpResponse, Responder};
use billsight_common::db::Database;
use utoipa::{IntoParams, OpenApi};

use crate::graph::Graph;
use crate::model::{DatasetIngestResult, IngestMode};
use crate::service::{Error, IngestorService};

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = IngestorService::new(Graph::new(db));

    config
        .app_data(web::Data::new(service))
        .service(upload_dataset);
}

#[derive(OpenApi)]
#[openapi(
    paths(upload_dataset),
    components(schemas(DatasetIngestResult, IngestMode)),
    tags()
)]
pub struct ApiDoc;

#[derive(IntoParams, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct UploadParams {
    /// Duplicate-document handling for this run.
    #[serde(default)]
    mode: IngestMode,
}

#[utoipa::path(
    tag = "dataset",
    operation_id = "uploadDataset",
    context_path = "/api",
    request_body = Vec<u8>,
    params(UploadParams),
    responses(
        (status = 201, description = "Dataset ingested", body = DatasetIngestResult),
        (status = 400, description = "The payload could not be parsed as a dataset"),
        (status = 409, description = "A document identifier already exists (fail-fast mode)"),
    )
)]
#[post("/v1/dataset")]
/// Upload a raw extracted-document dataset
async fn upload_dataset(
    service: web::Data<IngestorService>,
    web::Query(UploadParams { mode }): web::Query<UploadParams>,
    bytes: web::Bytes,
) -> Result<impl Responder, Error> {
    let result = service.ingest_dataset(&bytes, mode).await?;
    log::info!("uploaded dataset: {} invoices", result.ingested);
    Ok(HttpResponse::Created().json(result))
}
