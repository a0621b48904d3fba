
use actix_web::{get, web, HttpResponse, Responder};
use billsight_common::db::Database;
use utoipa::OpenApi;

use crate::dashboard::model::{
    CashOutflowBucket, CategorySpend, DashboardStats, InvoiceSummary, TrendBucket, VendorSpend,
};
use crate::dashboard::service::DashboardService;
use crate::Error;

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = DashboardService::new(db);

    config
        .app_data(web::Data::new(service))
        .service(get_stats)
        .service(list_invoices)
        .service(get_top_vendors)
        .service(get_invoice_trends)
        .service(get_category_spend)
        .service(get_cash_outflow);
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get_stats,
        list_invoices,
        get_top_vendors,
        get_invoice_trends,
        get_category_spend,
        get_cash_outflow,
    ),
    components(schemas(
        DashboardStats,
        InvoiceSummary,
        VendorSpend,
        TrendBucket,
        CategorySpend,
        CashOutflowBucket,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "dashboard",
    operation_id = "getStats",
    responses(
        (status = 200, description = "The dashboard headline numbers", body = DashboardStats),
    )
)]
#[get("/stats")]
/// Headline spend and volume numbers
async fn get_stats(service: web::Data<DashboardService>) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.stats().await?))
}

#[utoipa::path(
    tag = "dashboard",
    operation_id = "listInvoices",
    responses(
        (status = 200, description = "The latest invoices, newest first", body = Vec<InvoiceSummary>),
    )
)]
#[get("/invoices")]
/// The latest 100 invoices
async fn list_invoices(service: web::Data<DashboardService>) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.invoices().await?))
}

#[utoipa::path(
    tag = "dashboard",
    operation_id = "getTopVendors",
    responses(
        (status = 200, description = "The ten vendors with the highest spend", body = Vec<VendorSpend>),
    )
)]
#[get("/vendors/top10")]
/// Vendors ranked by total spend
async fn get_top_vendors(service: web::Data<DashboardService>) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.top_vendors().await?))
}

#[utoipa::path(
    tag = "dashboard",
    operation_id = "getInvoiceTrends",
    responses(
        (status = 200, description = "Monthly invoice volume and value", body = Vec<TrendBucket>),
    )
)]
#[get("/invoice-trends")]
/// Invoice volume and value per calendar month
async fn get_invoice_trends(
    service: web::Data<DashboardService>,
) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.invoice_trends().await?))
}

#[utoipa::path(
    tag = "dashboard",
    operation_id = "getCategorySpend",
    responses(
        (status = 200, description = "Spend per category", body = Vec<CategorySpend>),
    )
)]
#[get("/category-spend")]
/// Spend per category
async fn get_category_spend(
    service: web::Data<DashboardService>,
) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.category_spend()))
}

#[utoipa::path(
    tag = "dashboard",
    operation_id = "getCashOutflow",
    responses(
        (status = 200, description = "Upcoming cash outflow per ageing bucket", body = Vec<CashOutflowBucket>),
    )
)]
#[get("/cash-outflow")]
/// Upcoming cash outflow per ageing bucket
async fn get_cash_outflow(service: web::Data<DashboardService>) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(service.cash_outflow()))
}
