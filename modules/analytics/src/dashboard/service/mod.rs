
use billsight_common::db::Database;
use billsight_common::money::{format_currency, DEFAULT_CURRENCY};
use billsight_entity::{document, invoice, vendor};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::{BTreeMap, HashMap};
use time::{Date, Month, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use crate::dashboard::model::{
    CashOutflowBucket, CategorySpend, DashboardStats, InvoiceSummary, TrendBucket, VendorSpend,
};
use crate::Error;

/// Read-only aggregate queries over the normalized invoice store.
pub struct DashboardService {
    db: Database,
}

#[derive(FromQueryResult)]
struct SpendByVendor {
    vendor_id: Uuid,
    total: Option<f64>,
}

impl DashboardService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Year-to-date spend, all-time counts and all-time average, with the
    /// calendar windows evaluated in UTC.
    #[instrument(skip(self), err)]
    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        let now = OffsetDateTime::now_utc();
        let year_start = Date::from_calendar_date(now.year(), Month::January, 1)
            .map_err(|err| Error::Any(err.into()))?
            .midnight()
            .assume_utc();
        let month_start = now
            .date()
            .replace_day(1)
            .map_err(|err| Error::Any(err.into()))?
            .midnight()
            .assume_utc();

        let year_spend: Option<Option<f64>> = invoice::Entity::find()
            .select_only()
            .column_as(invoice::Column::InvoiceTotal.sum(), "total")
            .filter(invoice::Column::InvoiceDate.gte(year_start))
            .into_tuple()
            .one(&self.db)
            .await?;
        let year_spend = year_spend.flatten().unwrap_or(0.0);

        let total_invoices = invoice::Entity::find().count(&self.db).await?;

        let documents_uploaded = document::Entity::find()
            .filter(document::Column::CreatedAt.gte(month_start))
            .count(&self.db)
            .await?;

        let all_spend: Option<Option<f64>> = invoice::Entity::find()
            .select_only()
            .column_as(invoice::Column::InvoiceTotal.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;
        let all_spend = all_spend.flatten().unwrap_or(0.0);
        let average = if total_invoices > 0 {
            all_spend / total_invoices as f64
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_spend: format_currency(year_spend, DEFAULT_CURRENCY),
            total_invoices,
            documents_uploaded,
            average_invoice_value: format_currency(average, DEFAULT_CURRENCY),
            spend_delta: "+8.2% from last month".to_string(),
            invoices_delta: "+8.2% from last month".to_string(),
            docs_delta: "-8 less from last month".to_string(),
            avg_value_delta: "+8.2% from last month".to_string(),
        })
    }

    /// The latest 100 invoices, newest first, formatted for the listing.
    #[instrument(skip(self), err)]
    pub async fn invoices(&self) -> Result<Vec<InvoiceSummary>, Error> {
        let rows = invoice::Entity::find()
            .find_also_related(vendor::Entity)
            .order_by_desc(invoice::Column::InvoiceDate)
            .limit(100)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(invoice, vendor)| InvoiceSummary {
                id: invoice.invoice_id,
                vendor: vendor
                    .map(|vendor| vendor.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                date: format_long_date(invoice.invoice_date),
                status: listing_status(&invoice.document_type).to_string(),
                net_value: format_currency(invoice.invoice_total, &invoice.currency_symbol),
                due_date: invoice
                    .due_date
                    .map(format_numeric_date)
                    .unwrap_or_else(|| "N/A".to_string()),
            })
            .collect())
    }

    /// The ten vendors with the highest summed invoice totals, descending.
    #[instrument(skip(self), err)]
    pub async fn top_vendors(&self) -> Result<Vec<VendorSpend>, Error> {
        let rows: Vec<SpendByVendor> = invoice::Entity::find()
            .select_only()
            .column(invoice::Column::VendorId)
            .column_as(invoice::Column::InvoiceTotal.sum(), "total")
            .group_by(invoice::Column::VendorId)
            .order_by_desc(invoice::Column::InvoiceTotal.sum())
            .limit(10)
            .into_model()
            .all(&self.db)
            .await?;

        let names: HashMap<Uuid, String> = vendor::Entity::find()
            .filter(vendor::Column::Id.is_in(rows.iter().map(|row| row.vendor_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|vendor| (vendor.id, vendor.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| VendorSpend {
                vendor: names
                    .get(&row.vendor_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                spend: row.total.unwrap_or(0.0),
            })
            .collect())
    }

    /// Invoices bucketed by calendar month: per bucket a count and a summed
    /// value, chronologically ascending, at most the 12 most recent buckets.
    #[instrument(skip(self), err)]
    pub async fn invoice_trends(&self) -> Result<Vec<TrendBucket>, Error> {
        let rows: Vec<(OffsetDateTime, f64)> = invoice::Entity::find()
            .select_only()
            .column(invoice::Column::InvoiceDate)
            .column(invoice::Column::InvoiceTotal)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut buckets: BTreeMap<(i32, u8), (u64, f64)> = BTreeMap::new();
        for (date, total) in rows {
            let bucket = buckets.entry((date.year(), date.month() as u8)).or_default();
            bucket.0 += 1;
            bucket.1 += total;
        }

        let mut trend = Vec::with_capacity(buckets.len());
        for ((year, month), (count, value)) in buckets {
            let month = Month::try_from(month).map_err(|err| Error::Any(err.into()))?;
            trend.push(TrendBucket {
                month: month_abbreviation(month).to_string(),
                year,
                count,
                value,
            });
        }

        if trend.len() > 12 {
            trend.drain(..trend.len() - 12);
        }

        Ok(trend)
    }

    /// Fixed illustrative table; not derived from live data.
    pub fn category_spend(&self) -> Vec<CategorySpend> {
        [
            ("Operations", 9000.0),
            ("Marketing", 7250.0),
            ("Facilities", 1000.0),
            ("R&D", 4000.0),
        ]
        .into_iter()
        .map(|(category, spend)| CategorySpend {
            category: category.to_string(),
            spend,
        })
        .collect()
    }

    /// Fixed illustrative table; not derived from live data.
    pub fn cash_outflow(&self) -> Vec<CashOutflowBucket> {
        [
            ("0 - 7 days", 5000.0),
            ("8 - 30 days", 12000.0),
            ("31 - 60 days", 20000.0),
            ("60+ days", 45000.0),
        ]
        .into_iter()
        .map(|(label, amount)| CashOutflowBucket {
            label: label.to_string(),
            amount,
        })
        .collect()
    }
}

/// Fixed mapping from document type to the listing's status column. This is
/// not a payment-status field.
pub(crate) fn listing_status(document_type: &str) -> &'static str {
    if document_type == "creditNote" {
        "Credit Issued"
    } else {
        "Paid"
    }
}

pub(crate) fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// `Jan 5, 2024`, the listing's date column.
pub(crate) fn format_long_date(date: OffsetDateTime) -> String {
    format!(
        "{} {}, {}",
        month_abbreviation(date.month()),
        date.day(),
        date.year()
    )
}

/// `1/5/2024`, the listing's due-date column.
pub(crate) fn format_numeric_date(date: OffsetDateTime) -> String {
    format!("{}/{}/{}", date.month() as u8, date.day(), date.year())
}
