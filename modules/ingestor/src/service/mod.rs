use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use billsight_common::{db::Database, error::ErrorInformation};
use billsight_entity::invoice;
use sea_orm::DbErr;
use serde_json::Value;
use std::time::Instant;
use time::OffsetDateTime;
use tracing::instrument;

use crate::graph::{self, Graph};
use crate::model::{DatasetIngestResult, IngestMode};
use crate::normalize::{normalize, NormalizedInvoice};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] graph::error::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Json(err) => HttpResponse::BadRequest().json(ErrorInformation {
                error: "JsonParse".into(),
                message: err.to_string(),
                details: None,
            }),
            Self::Graph(graph::error::Error::DuplicateDocument(id)) => HttpResponse::Conflict()
                .json(ErrorInformation {
                    error: "DuplicateDocument".into(),
                    message: format!("duplicate document identifier: {id}"),
                    details: None,
                }),
            Self::Graph(err) => HttpResponse::InternalServerError().json(ErrorInformation {
                error: "Graph".into(),
                message: err.to_string(),
                details: None,
            }),
            Self::Db(err) => HttpResponse::InternalServerError().json(ErrorInformation {
                error: "Database".into(),
                message: err.to_string(),
                details: None,
            }),
        }
    }
}

#[derive(Clone)]
pub struct IngestorService {
    graph: Graph,
}

impl IngestorService {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn db(&self) -> Database {
        self.graph.db.clone()
    }

    /// Ingest a raw dataset: a JSON array of extracted-document records,
    /// read wholesale, processed sequentially in array order.
    #[instrument(skip(self, bytes), err)]
    pub async fn ingest_dataset(
        &self,
        bytes: &[u8],
        mode: IngestMode,
    ) -> Result<DatasetIngestResult, Error> {
        let start = Instant::now();

        let documents: Vec<Value> = serde_json::from_slice(bytes)?;
        let now = OffsetDateTime::now_utc();

        let mut result = DatasetIngestResult::default();

        for doc in &documents {
            let Some(normalized) = normalize(doc, now) else {
                result.skipped += 1;
                continue;
            };

            match self.ingest_normalized(normalized).await {
                Ok(invoice) => {
                    result.ingested += 1;
                    log::debug!(
                        "ingested invoice {} from document {}",
                        invoice.invoice_id,
                        invoice.document_id
                    );
                }
                Err(graph::error::Error::DuplicateDocument(id))
                    if mode == IngestMode::SkipExisting =>
                {
                    log::debug!("skipping existing document {id}");
                    result.duplicates.push(id);
                }
                Err(err) => return Err(err.into()),
            }
        }

        log::info!(
            "dataset ingest finished: {} ingested, {} skipped, {} duplicates, took {:?}",
            result.ingested,
            result.skipped,
            result.duplicates.len(),
            start.elapsed(),
        );

        Ok(result)
    }

    async fn ingest_normalized(
        &self,
        normalized: NormalizedInvoice,
    ) -> Result<invoice::Model, graph::error::Error> {
        let vendor = self
            .graph
            .ingest_vendor(normalized.vendor_name, normalized.vendor, ())
            .await?;

        let customer_id = match normalized.customer {
            Some(customer) => Some(
                self.graph
                    .ingest_customer(customer.name, customer.information, ())
                    .await?
                    .customer
                    .id,
            ),
            None => None,
        };

        self.graph
            .ingest_invoice(
                normalized.document,
                vendor.vendor.id,
                customer_id,
                normalized.invoice,
                normalized.line_items,
                (),
            )
            .await
    }
}
