use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// The schema is written with the builder API so it stays portable across
// SQLite (tests, dev) and PostgreSQL (production). All ids are generated by
// the application, except `document.id`, which is the source identifier.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .col(
                        ColumnDef::new(Vendor::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vendor::Name)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vendor::Address).string())
                    .col(ColumnDef::new(Vendor::TaxId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .col(
                        ColumnDef::new(Customer::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customer::Name)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customer::Address).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .col(
                        ColumnDef::new(Document::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Document::FileName).string().not_null())
                    .col(ColumnDef::new(Document::FilePath).string().not_null())
                    .col(
                        ColumnDef::new(Document::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Document::FileType).string().not_null())
                    .col(ColumnDef::new(Document::Status).string().not_null())
                    .col(
                        ColumnDef::new(Document::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Document::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .col(
                        ColumnDef::new(Invoice::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Invoice::DocumentId)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoice::VendorId).uuid().not_null())
                    .col(ColumnDef::new(Invoice::CustomerId).uuid())
                    .col(ColumnDef::new(Invoice::InvoiceId).string().not_null())
                    .col(
                        ColumnDef::new(Invoice::InvoiceDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoice::DeliveryDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Invoice::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Invoice::DocumentType).string().not_null())
                    .col(
                        ColumnDef::new(Invoice::CurrencySymbol)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoice::SubTotal).double().not_null())
                    .col(ColumnDef::new(Invoice::TotalTax).double().not_null())
                    .col(ColumnDef::new(Invoice::InvoiceTotal).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_document")
                            .from(Invoice::Table, Invoice::DocumentId)
                            .to(Document::Table, Document::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_vendor")
                            .from(Invoice::Table, Invoice::VendorId)
                            .to(Vendor::Table, Vendor::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_customer")
                            .from(Invoice::Table, Invoice::CustomerId)
                            .to(Customer::Table, Customer::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_invoice_date")
                    .table(Invoice::Table)
                    .col(Invoice::InvoiceDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LineItem::Table)
                    .col(
                        ColumnDef::new(LineItem::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LineItem::InvoiceId).uuid().not_null())
                    .col(ColumnDef::new(LineItem::Description).string().not_null())
                    .col(ColumnDef::new(LineItem::Quantity).double().not_null())
                    .col(ColumnDef::new(LineItem::UnitPrice).double().not_null())
                    .col(ColumnDef::new(LineItem::TotalPrice).double().not_null())
                    .col(ColumnDef::new(LineItem::AccountingCode).string())
                    .col(ColumnDef::new(LineItem::TaxKeyCode).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_line_item_invoice")
                            .from(LineItem::Table, LineItem::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LineItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vendor::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Vendor {
    Table,
    Id,
    Name,
    Address,
    TaxId,
}

#[derive(DeriveIden)]
pub enum Customer {
    Table,
    Id,
    Name,
    Address,
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    FileName,
    FilePath,
    FileSize,
    FileType,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Invoice {
    Table,
    Id,
    DocumentId,
    VendorId,
    CustomerId,
    InvoiceId,
    InvoiceDate,
    DeliveryDate,
    DueDate,
    DocumentType,
    CurrencySymbol,
    SubTotal,
    TotalTax,
    InvoiceTotal,
}

#[derive(DeriveIden)]
pub enum LineItem {
    Table,
    Id,
    InvoiceId,
    Description,
    Quantity,
    UnitPrice,
    TotalPrice,
    AccountingCode,
    TaxKeyCode,
}
