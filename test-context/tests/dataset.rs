use billsight_entity::{customer, document, invoice, line_item, vendor};
use billsight_module_ingestor::graph::error::Error as GraphError;
use billsight_module_ingestor::graph::vendor::VendorInformation;
use billsight_module_ingestor::model::IngestMode;
use billsight_module_ingestor::normalize::UNKNOWN_VENDOR;
use billsight_module_ingestor::service::Error;
use billsight_test_context::{dataset, BillsightContext, SampleDocument};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use test_context::test_context;
use test_log::test;
use time::macros::datetime;

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn admission_filter_skips_records_without_invoice(
    ctx: &BillsightContext,
) -> Result<(), anyhow::Error> {
    let result = ctx
        .ingest(&[
            SampleDocument::new("doc-0001").vendor("ACME GmbH").total(119.0),
            SampleDocument::new("doc-0002").without_invoice(),
        ])
        .await;

    assert_eq!(result.ingested, 1);
    assert_eq!(result.skipped, 1);
    assert!(result.duplicates.is_empty());

    assert_eq!(invoice::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn unnamed_vendors_collapse_into_one_row(
    ctx: &BillsightContext,
) -> Result<(), anyhow::Error> {
    let result = ctx
        .ingest(&[
            SampleDocument::new("doc-0001").total(10.0),
            SampleDocument::new("doc-0002").total(20.0),
        ])
        .await;
    assert_eq!(result.ingested, 2);

    let vendors = vendor::Entity::find().all(&ctx.db).await?;
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0].name, UNKNOWN_VENDOR);

    let invoices = invoice::Entity::find()
        .filter(invoice::Column::VendorId.eq(vendors[0].id))
        .count(&ctx.db)
        .await?;
    assert_eq!(invoices, 2);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn existing_vendor_attributes_are_kept(ctx: &BillsightContext) -> Result<(), anyhow::Error> {
    ctx.graph
        .ingest_vendor(
            "ACME GmbH",
            VendorInformation {
                address: Some("1 Main St".to_string()),
                tax_id: Some("DE123456789".to_string()),
            },
            (),
        )
        .await?;

    ctx.ingest(&[SampleDocument::new("doc-0001").vendor("ACME GmbH")])
        .await;

    let vendors = vendor::Entity::find().all(&ctx.db).await?;
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0].address.as_deref(), Some("1 Main St"));
    assert_eq!(vendors[0].tax_id.as_deref(), Some("DE123456789"));

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn customers_are_distinct_per_document(ctx: &BillsightContext) -> Result<(), anyhow::Error> {
    ctx.ingest(&[
        SampleDocument::new("doc-0001").customer("Globex Corp"),
        SampleDocument::new("doc-0002").customer("Globex Corp"),
    ])
    .await;

    let mut names: Vec<String> = customer::Entity::find()
        .all(&ctx.db)
        .await?
        .into_iter()
        .map(|customer| customer.name)
        .collect();
    names.sort();

    assert_eq!(names, ["Globex Corp-doc-0001", "Globex Corp-doc-0002"]);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn duplicate_document_fails_fast(ctx: &BillsightContext) -> Result<(), anyhow::Error> {
    ctx.ingest(&[SampleDocument::new("doc-0001")]).await;

    let result = ctx
        .ingestor
        .ingest_dataset(
            &dataset(&[SampleDocument::new("doc-0001")]),
            IngestMode::FailFast,
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::Graph(GraphError::DuplicateDocument(id))) if id == "doc-0001"
    ));

    // the failed run must not have added anything
    assert_eq!(invoice::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn duplicate_document_recorded_in_skip_existing_mode(
    ctx: &BillsightContext,
) -> Result<(), anyhow::Error> {
    ctx.ingest(&[SampleDocument::new("doc-0001")]).await;

    let result = ctx
        .ingestor
        .ingest_dataset(
            &dataset(&[
                SampleDocument::new("doc-0001"),
                SampleDocument::new("doc-0002"),
            ]),
            IngestMode::SkipExisting,
        )
        .await?;

    assert_eq!(result.ingested, 1);
    assert_eq!(result.duplicates, ["doc-0001"]);

    assert_eq!(invoice::Entity::find().count(&ctx.db).await?, 2);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn defaults_and_line_items_are_persisted(
    ctx: &BillsightContext,
) -> Result<(), anyhow::Error> {
    ctx.ingest(&[SampleDocument::new("doc-0001")
        .vendor("ACME GmbH")
        .invoice_id("INV-42")
        .invoice_date("2024-01-15")
        .total(119.0)
        .line_item("Widgets", 100.0)
        .line_item("Shipping", 19.0)])
        .await;

    let invoices = invoice::Entity::find().all(&ctx.db).await?;
    assert_eq!(invoices.len(), 1);
    let persisted = &invoices[0];
    assert_eq!(persisted.document_id, "doc-0001");
    assert_eq!(persisted.invoice_id, "INV-42");
    assert_eq!(persisted.invoice_total, 119.0);
    // unextracted fields fall back to their documented defaults
    assert_eq!(persisted.document_type, "invoice");
    assert_eq!(persisted.currency_symbol, "€");
    assert_eq!(persisted.due_date, None);

    let items = line_item::Entity::find()
        .filter(line_item::Column::InvoiceId.eq(persisted.id))
        .order_by_asc(line_item::Column::Description)
        .all(&ctx.db)
        .await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description, "Shipping");
    assert_eq!(items[0].total_price, 19.0);
    assert_eq!(items[1].description, "Widgets");
    assert_eq!(items[1].total_price, 100.0);

    Ok(())
}

#[test_context(BillsightContext)]
#[test(tokio::test)]
async fn bundled_sample_dataset_ingests_end_to_end(
    ctx: &BillsightContext,
) -> Result<(), anyhow::Error> {
    let bytes = include_bytes!("../../etc/test-data/sample-dataset.json");
    let result = ctx
        .ingestor
        .ingest_dataset(bytes, IngestMode::FailFast)
        .await?;

    // two invoices, one record the extraction failed on
    assert_eq!(result.ingested, 2);
    assert_eq!(result.skipped, 1);
    assert!(result.duplicates.is_empty());

    let doc = document::Entity::find_by_id("665a1b2c3d4e5f6a7b8c9d0e")
        .one(&ctx.db)
        .await?
        .expect("document should exist");
    assert_eq!(doc.file_name, "acme-2024-001.pdf");
    assert_eq!(doc.file_size, 20480);
    assert_eq!(doc.created_at, datetime!(2024-01-16 09:30:00 UTC));

    let acme = invoice::Entity::find()
        .filter(invoice::Column::DocumentId.eq("665a1b2c3d4e5f6a7b8c9d0e"))
        .one(&ctx.db)
        .await?
        .expect("invoice should exist");
    assert_eq!(acme.invoice_id, "INV-2024-001");
    assert_eq!(acme.invoice_date, datetime!(2024-01-15 00:00:00 UTC));
    assert_eq!(acme.delivery_date, Some(datetime!(2024-01-14 00:00:00 UTC)));
    assert_eq!(acme.due_date, Some(datetime!(2024-02-14 00:00:00 UTC)));
    assert_eq!(acme.sub_total, 100.0);
    assert_eq!(acme.total_tax, 19.0);
    assert_eq!(acme.invoice_total, 119.0);

    let items = line_item::Entity::find()
        .filter(line_item::Column::InvoiceId.eq(acme.id))
        .order_by_asc(line_item::Column::Description)
        .all(&ctx.db)
        .await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description, "Shipping");
    assert_eq!(items[0].accounting_code, None);
    assert_eq!(items[1].description, "Widget, large");
    assert_eq!(items[1].quantity, 10.0);
    assert_eq!(items[1].accounting_code.as_deref(), Some("4400"));
    assert_eq!(items[1].tax_key_code.as_deref(), Some("9"));

    let credit_note = invoice::Entity::find()
        .filter(invoice::Column::DocumentId.eq("665a1b2c3d4e5f6a7b8c9d0f"))
        .one(&ctx.db)
        .await?
        .expect("invoice should exist");
    assert_eq!(credit_note.document_type, "creditNote");
    assert_eq!(credit_note.invoice_total, -50.0);
    assert_eq!(credit_note.customer_id, None);

    let vendors: Vec<_> = vendor::Entity::find()
        .order_by_asc(vendor::Column::Name)
        .all(&ctx.db)
        .await?;
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0].name, "ACME GmbH");
    assert_eq!(vendors[0].tax_id.as_deref(), Some("DE123456789"));
    assert_eq!(vendors[1].name, "Initech AG");

    let globex = customer::Entity::find()
        .filter(customer::Column::Name.eq("Globex Corp-665a1b2c"))
        .one(&ctx.db)
        .await?
        .expect("customer should exist");
    assert_eq!(globex.address.as_deref(), Some("Hauptstr. 7, 10115 Berlin"));
    assert_eq!(acme.customer_id, Some(globex.id));

    Ok(())
}
