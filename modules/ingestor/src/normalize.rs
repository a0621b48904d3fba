//! The Document Normalizer: one loosely-structured extracted-document record
//! in, zero or one fully-populated invoice aggregate out.

use serde_json::Value;
use time::OffsetDateTime;

use crate::extract::RawField;
use crate::graph::customer::{customer_key, CustomerInformation};
use crate::graph::invoice::{DocumentInformation, InvoiceInformation, LineItemInformation};
use crate::graph::vendor::VendorInformation;

/// Distinct unnamed vendors all collapse into this single row; see
/// DESIGN.md.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

#[derive(Clone, Debug)]
pub struct NormalizedInvoice {
    pub document: DocumentInformation,
    pub vendor_name: String,
    pub vendor: VendorInformation,
    pub customer: Option<NormalizedCustomer>,
    pub invoice: InvoiceInformation,
    pub line_items: Vec<LineItemInformation>,
}

#[derive(Clone, Debug)]
pub struct NormalizedCustomer {
    pub name: String,
    pub information: CustomerInformation,
}

/// Convert one raw record into its normalized invoice aggregate.
///
/// Returns `None` for records that do not carry a populated
/// `extractedData.llmData.invoice` substructure or lack a source document
/// identifier; that is an admission skip, not an error. `now` substitutes
/// for any required timestamp the record fails to provide.
pub fn normalize(doc: &Value, now: OffsetDateTime) -> Option<NormalizedInvoice> {
    let llm = doc.pointer("/extractedData/llmData")?;
    if !llm.get("invoice").is_some_and(|invoice| !invoice.is_null()) {
        return None;
    }

    let document_id = doc.get("_id").and_then(Value::as_str)?.to_string();

    let document = DocumentInformation {
        id: document_id.clone(),
        file_name: RawField::direct(doc.get("name")).as_str("N/A"),
        file_path: RawField::direct(doc.get("filePath")).as_str(""),
        file_size: RawField::direct(doc.get("fileSize")).as_i64(),
        file_type: RawField::direct(doc.get("fileType")).as_str("N/A"),
        status: RawField::direct(doc.get("status")).as_str("processed"),
        created_at: RawField::direct(doc.get("createdAt"))
            .as_datetime()
            .unwrap_or(now),
        updated_at: RawField::direct(doc.get("updatedAt"))
            .as_datetime()
            .unwrap_or(now),
    };

    let vendor_name = RawField::nested(llm.get("vendor"), "vendorName").as_str(UNKNOWN_VENDOR);
    let vendor = VendorInformation {
        address: RawField::nested(llm.get("vendor"), "vendorAddress").as_opt_str(),
        tax_id: RawField::nested(llm.get("vendor"), "vendorTaxId").as_opt_str(),
    };

    let customer = RawField::nested(llm.get("customer"), "customerName")
        .as_opt_str()
        .map(|name| NormalizedCustomer {
            name: customer_key(&name, &document_id),
            information: CustomerInformation {
                address: RawField::nested(llm.get("customer"), "customerAddress").as_opt_str(),
            },
        });

    let invoice = InvoiceInformation {
        invoice_id: RawField::nested(llm.get("invoice"), "invoiceId").as_str("N/A"),
        invoice_date: RawField::nested(llm.get("invoice"), "invoiceDate")
            .as_datetime()
            .unwrap_or(now),
        delivery_date: RawField::nested(llm.get("invoice"), "deliveryDate").as_datetime(),
        due_date: RawField::nested(llm.get("payment"), "dueDate").as_datetime(),
        document_type: RawField::nested(llm.get("summary"), "documentType").as_str("invoice"),
        currency_symbol: RawField::nested(llm.get("summary"), "currencySymbol").as_str("€"),
        sub_total: RawField::nested(llm.get("summary"), "subTotal").as_f64(),
        total_tax: RawField::nested(llm.get("summary"), "totalTax").as_f64(),
        invoice_total: RawField::nested(llm.get("summary"), "invoiceTotal").as_f64(),
    };

    // source array order, no reconciliation against the invoice totals
    let line_items = RawField::nested(llm.get("lineItems"), "items")
        .as_array()
        .iter()
        .map(|item| LineItemInformation {
            description: RawField::nested(Some(item), "description").as_str("N/A"),
            quantity: RawField::nested(Some(item), "quantity").as_f64(),
            unit_price: RawField::nested(Some(item), "unitPrice").as_f64(),
            total_price: RawField::nested(Some(item), "totalPrice").as_f64(),
            accounting_code: RawField::nested(Some(item), "Sachkonto").as_opt_str(),
            tax_key_code: RawField::nested(Some(item), "BUSchluessel").as_opt_str(),
        })
        .collect();

    Some(NormalizedInvoice {
        document,
        vendor_name,
        vendor,
        customer,
        invoice,
        line_items,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn wrapped(value: serde_json::Value) -> serde_json::Value {
        json!({ "value": value })
    }

    fn sample_document() -> Value {
        json!({
            "_id": "665a1b2c3d4e5f6a7b8c9d0e",
            "name": "invoice-42.pdf",
            "filePath": "/inbox/invoice-42.pdf",
            "fileSize": {"$numberLong": "20480"},
            "fileType": "application/pdf",
            "status": "processed",
            "createdAt": {"$date": "2024-02-01T09:30:00.000Z"},
            "updatedAt": {"$date": "2024-02-01T09:31:00.000Z"},
            "extractedData": {
                "llmData": {
                    "vendor": wrapped(json!({
                        "vendorName": wrapped(json!("ACME GmbH")),
                        "vendorAddress": wrapped(json!("1 Main St")),
                        "vendorTaxId": wrapped(json!("DE123456789")),
                    })),
                    "customer": wrapped(json!({
                        "customerName": wrapped(json!("Globex Corp")),
                        "customerAddress": wrapped(json!("2 Side St")),
                    })),
                    "invoice": wrapped(json!({
                        "invoiceId": wrapped(json!("INV-42")),
                        "invoiceDate": wrapped(json!("2024-01-15")),
                        "deliveryDate": wrapped(json!("2024-01-16")),
                    })),
                    "payment": wrapped(json!({
                        "dueDate": wrapped(json!("2024-02-15")),
                    })),
                    "summary": wrapped(json!({
                        "documentType": wrapped(json!("invoice")),
                        "currencySymbol": wrapped(json!("€")),
                        "subTotal": wrapped(json!({"$numberDouble": "100.0"})),
                        "totalTax": wrapped(json!({"$numberDouble": "19.0"})),
                        "invoiceTotal": wrapped(json!({"$numberDouble": "119.0"})),
                    })),
                    "lineItems": wrapped(json!({
                        "items": wrapped(json!([
                            {
                                "value": {
                                    "description": wrapped(json!("Widgets")),
                                    "quantity": wrapped(json!(10)),
                                    "unitPrice": wrapped(json!(10.0)),
                                    "totalPrice": wrapped(json!(100.0)),
                                    "Sachkonto": wrapped(json!("4400")),
                                    "BUSchluessel": wrapped(json!("9")),
                                }
                            }
                        ])),
                    })),
                }
            }
        })
    }

    #[test]
    fn full_record() {
        let now = datetime!(2024-06-01 00:00:00 UTC);
        let normalized = normalize(&sample_document(), now).expect("admitted");

        assert_eq!(normalized.document.id, "665a1b2c3d4e5f6a7b8c9d0e");
        assert_eq!(normalized.document.file_size, 20480);
        assert_eq!(normalized.vendor_name, "ACME GmbH");
        assert_eq!(normalized.vendor.tax_id.as_deref(), Some("DE123456789"));

        let customer = normalized.customer.expect("customer present");
        assert_eq!(customer.name, "Globex Corp-665a1b2c");

        assert_eq!(normalized.invoice.invoice_id, "INV-42");
        assert_eq!(
            normalized.invoice.invoice_date,
            datetime!(2024-01-15 00:00:00 UTC)
        );
        assert_eq!(
            normalized.invoice.due_date,
            Some(datetime!(2024-02-15 00:00:00 UTC))
        );
        assert_eq!(normalized.invoice.invoice_total, 119.0);

        assert_eq!(normalized.line_items.len(), 1);
        assert_eq!(normalized.line_items[0].description, "Widgets");
        assert_eq!(normalized.line_items[0].accounting_code.as_deref(), Some("4400"));
    }

    #[test]
    fn record_without_invoice_substructure_is_skipped() {
        let now = datetime!(2024-06-01 00:00:00 UTC);

        let doc = json!({"_id": "abc", "extractedData": {"llmData": {}}});
        assert!(normalize(&doc, now).is_none());

        let doc = json!({"_id": "abc"});
        assert!(normalize(&doc, now).is_none());

        let doc = json!({"_id": "abc", "extractedData": {"llmData": {"invoice": null}}});
        assert!(normalize(&doc, now).is_none());
    }

    #[test]
    fn defaults_for_sparse_record() {
        let now = datetime!(2024-06-01 00:00:00 UTC);
        let doc = json!({
            "_id": "sparse01",
            "extractedData": {"llmData": {"invoice": wrapped(json!({}))}}
        });

        let normalized = normalize(&doc, now).expect("admitted");
        assert_eq!(normalized.document.file_name, "N/A");
        assert_eq!(normalized.document.file_size, 0);
        assert_eq!(normalized.document.status, "processed");
        assert_eq!(normalized.document.created_at, now);
        assert_eq!(normalized.vendor_name, UNKNOWN_VENDOR);
        assert!(normalized.customer.is_none());
        assert_eq!(normalized.invoice.invoice_id, "N/A");
        assert_eq!(normalized.invoice.invoice_date, now);
        assert_eq!(normalized.invoice.delivery_date, None);
        assert_eq!(normalized.invoice.due_date, None);
        assert_eq!(normalized.invoice.document_type, "invoice");
        assert_eq!(normalized.invoice.currency_symbol, "€");
        assert_eq!(normalized.invoice.invoice_total, 0.0);
        assert!(normalized.line_items.is_empty());
    }

    #[test]
    fn line_items_keep_source_order() {
        let now = datetime!(2024-06-01 00:00:00 UTC);
        let doc = json!({
            "_id": "order01",
            "extractedData": {"llmData": {
                "invoice": wrapped(json!({})),
                "lineItems": wrapped(json!({
                    "items": wrapped(json!([
                        {"value": {"description": wrapped(json!("first"))}},
                        {"value": {"description": wrapped(json!("second"))}},
                        {"value": {"description": wrapped(json!("third"))}},
                    ])),
                })),
            }}
        });

        let normalized = normalize(&doc, now).expect("admitted");
        let descriptions: Vec<_> = normalized
            .line_items
            .iter()
            .map(|item| item.description.as_str())
            .collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
    }
}
