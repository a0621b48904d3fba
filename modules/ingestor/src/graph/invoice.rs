use billsight_common::db::{DatabaseErrors, Transactional};
use billsight_entity::{document, invoice, line_item};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::graph::{error::Error, Graph};

#[derive(Clone, Debug)]
pub struct DocumentInformation {
    pub id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct InvoiceInformation {
    pub invoice_id: String,
    pub invoice_date: OffsetDateTime,
    pub delivery_date: Option<OffsetDateTime>,
    pub due_date: Option<OffsetDateTime>,
    pub document_type: String,
    pub currency_symbol: String,
    pub sub_total: f64,
    pub total_tax: f64,
    pub invoice_total: f64,
}

#[derive(Clone, Debug)]
pub struct LineItemInformation {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub accounting_code: Option<String>,
    pub tax_key_code: Option<String>,
}

impl Graph {
    /// Unconditionally create the document, the invoice and its line items.
    /// The document identifier comes verbatim from the source; re-ingesting
    /// it is a [`Error::DuplicateDocument`], never a silent update.
    #[instrument(skip(self, invoice, line_items, tx), err(level = tracing::Level::INFO))]
    pub async fn ingest_invoice<TX: AsRef<Transactional>>(
        &self,
        document: DocumentInformation,
        vendor_id: Uuid,
        customer_id: Option<Uuid>,
        invoice: InvoiceInformation,
        line_items: Vec<LineItemInformation>,
        tx: TX,
    ) -> Result<invoice::Model, Error> {
        let connection = self.connection(&tx);
        let document_id = document.id.clone();

        document::ActiveModel {
            id: Set(document.id),
            file_name: Set(document.file_name),
            file_path: Set(document.file_path),
            file_size: Set(document.file_size),
            file_type: Set(document.file_type),
            status: Set(document.status),
            created_at: Set(document.created_at),
            updated_at: Set(document.updated_at),
        }
        .insert(&connection)
        .await
        .map_err(|err| duplicate_as(err, &document_id))?;

        let model = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            document_id: Set(document_id.clone()),
            vendor_id: Set(vendor_id),
            customer_id: Set(customer_id),
            invoice_id: Set(invoice.invoice_id),
            invoice_date: Set(invoice.invoice_date),
            delivery_date: Set(invoice.delivery_date),
            due_date: Set(invoice.due_date),
            document_type: Set(invoice.document_type),
            currency_symbol: Set(invoice.currency_symbol),
            sub_total: Set(invoice.sub_total),
            total_tax: Set(invoice.total_tax),
            invoice_total: Set(invoice.invoice_total),
        }
        .insert(&connection)
        .await
        .map_err(|err| duplicate_as(err, &document_id))?;

        if !line_items.is_empty() {
            line_item::Entity::insert_many(line_items.into_iter().map(|item| {
                line_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    invoice_id: Set(model.id),
                    description: Set(item.description),
                    quantity: Set(item.quantity),
                    unit_price: Set(item.unit_price),
                    total_price: Set(item.total_price),
                    accounting_code: Set(item.accounting_code),
                    tax_key_code: Set(item.tax_key_code),
                }
            }))
            .exec(&connection)
            .await?;
        }

        Ok(model)
    }
}

fn duplicate_as(err: DbErr, document_id: &str) -> Error {
    if err.is_duplicate() {
        Error::DuplicateDocument(document_id.to_string())
    } else {
        err.into()
    }
}
