//! Shared fixtures for tests that need a populated database.

use billsight_common::db::Database;
use billsight_module_ingestor::graph::Graph;
use billsight_module_ingestor::model::{DatasetIngestResult, IngestMode};
use billsight_module_ingestor::service::IngestorService;
use serde_json::{json, Value};
use test_context::AsyncTestContext;

/// A private in-memory database plus the services wired on top of it. Every
/// test gets a fresh one.
pub struct BillsightContext {
    pub db: Database,
    pub graph: Graph,
    pub ingestor: IngestorService,
}

impl BillsightContext {
    pub async fn new() -> Self {
        let db = Database::for_test()
            .await
            .expect("database should be created");
        let graph = Graph::new(db.clone());
        let ingestor = IngestorService::new(graph.clone());

        Self {
            db,
            graph,
            ingestor,
        }
    }

    /// Ingest the given documents as one dataset, failing the test on any
    /// ingestion error.
    pub async fn ingest(&self, documents: &[SampleDocument]) -> DatasetIngestResult {
        self.ingestor
            .ingest_dataset(&dataset(documents), IngestMode::FailFast)
            .await
            .expect("dataset should be ingested")
    }
}

impl AsyncTestContext for BillsightContext {
    async fn setup() -> Self {
        Self::new().await
    }

    async fn teardown(self) {
        if let Err(err) = self.db.close().await {
            log::warn!("failed to close the database: {err}");
        }
    }
}

/// Serialize documents into the raw dataset payload an upload carries.
pub fn dataset(documents: &[SampleDocument]) -> Vec<u8> {
    let records: Vec<Value> = documents.iter().map(SampleDocument::to_value).collect();
    serde_json::to_vec(&records).expect("dataset should serialize")
}

/// Builder for one extracted-document record in the source export shape:
/// every extracted field sits behind a `value` wrapper, numbers and dates may
/// carry extended-JSON tags.
#[derive(Clone, Debug)]
pub struct SampleDocument {
    id: String,
    file_name: String,
    vendor: Option<String>,
    customer: Option<String>,
    invoice_present: bool,
    invoice_id: String,
    invoice_date: Option<String>,
    due_date: Option<String>,
    document_type: Option<String>,
    currency: Option<String>,
    invoice_total: f64,
    line_items: Vec<(String, f64)>,
}

impl SampleDocument {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            file_name: format!("{id}.pdf"),
            invoice_present: true,
            invoice_id: format!("INV-{id}"),
            id,
            vendor: None,
            customer: None,
            invoice_date: None,
            due_date: None,
            document_type: None,
            currency: None,
            invoice_total: 0.0,
            line_items: Vec::new(),
        }
    }

    pub fn vendor(mut self, name: impl Into<String>) -> Self {
        self.vendor = Some(name.into());
        self
    }

    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer = Some(name.into());
        self
    }

    pub fn invoice_id(mut self, id: impl Into<String>) -> Self {
        self.invoice_id = id.into();
        self
    }

    /// Accepts `2024-01-05` or a full RFC 3339 timestamp.
    pub fn invoice_date(mut self, date: impl Into<String>) -> Self {
        self.invoice_date = Some(date.into());
        self
    }

    pub fn due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    pub fn currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = Some(symbol.into());
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.invoice_total = total;
        self
    }

    pub fn line_item(mut self, description: impl Into<String>, total: f64) -> Self {
        self.line_items.push((description.into(), total));
        self
    }

    /// Drop the invoice substructure, turning this record into one the
    /// normalizer refuses to admit.
    pub fn without_invoice(mut self) -> Self {
        self.invoice_present = false;
        self
    }

    pub fn to_value(&self) -> Value {
        let mut llm = serde_json::Map::new();

        if self.invoice_present {
            let mut invoice = serde_json::Map::new();
            invoice.insert("invoiceId".into(), wrapped(json!(self.invoice_id)));
            if let Some(date) = &self.invoice_date {
                invoice.insert("invoiceDate".into(), wrapped(json!(date)));
            }
            llm.insert("invoice".into(), wrapped(Value::Object(invoice)));
        }

        if let Some(vendor) = &self.vendor {
            llm.insert(
                "vendor".into(),
                wrapped(json!({ "vendorName": wrapped(json!(vendor)) })),
            );
        }

        if let Some(customer) = &self.customer {
            llm.insert(
                "customer".into(),
                wrapped(json!({ "customerName": wrapped(json!(customer)) })),
            );
        }

        if let Some(date) = &self.due_date {
            llm.insert(
                "payment".into(),
                wrapped(json!({ "dueDate": wrapped(json!(date)) })),
            );
        }

        let mut summary = serde_json::Map::new();
        summary.insert(
            "invoiceTotal".into(),
            wrapped(json!({ "$numberDouble": self.invoice_total.to_string() })),
        );
        if let Some(document_type) = &self.document_type {
            summary.insert("documentType".into(), wrapped(json!(document_type)));
        }
        if let Some(currency) = &self.currency {
            summary.insert("currencySymbol".into(), wrapped(json!(currency)));
        }
        llm.insert("summary".into(), wrapped(Value::Object(summary)));

        if !self.line_items.is_empty() {
            let items: Vec<Value> = self
                .line_items
                .iter()
                .map(|(description, total)| {
                    json!({
                        "value": {
                            "description": wrapped(json!(description)),
                            "totalPrice": wrapped(json!({ "$numberDouble": total.to_string() })),
                        }
                    })
                })
                .collect();
            llm.insert(
                "lineItems".into(),
                wrapped(json!({ "items": wrapped(Value::Array(items)) })),
            );
        }

        json!({
            "_id": self.id,
            "name": self.file_name,
            "fileType": "application/pdf",
            "status": "processed",
            "extractedData": { "llmData": Value::Object(llm) },
        })
    }
}

fn wrapped(value: Value) -> Value {
    json!({ "value": value })
}
