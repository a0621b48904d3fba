use utoipa::ToSchema;

/// The headline numbers of the dashboard. The monetary values arrive
/// pre-formatted; the delta strings are fixed placeholder copy carried over
/// from the dashboard design.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_spend: String,
    pub total_invoices: u64,
    pub documents_uploaded: u64,
    pub average_invoice_value: String,
    pub spend_delta: String,
    pub invoices_delta: String,
    pub docs_delta: String,
    pub avg_value_delta: String,
}

/// One row of the invoice listing, already formatted for display.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: String,
    pub vendor: String,
    pub date: String,
    pub status: String,
    pub net_value: String,
    pub due_date: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct VendorSpend {
    pub vendor: String,
    pub spend: f64,
}

/// One calendar-month bucket of the invoice trend.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct TrendBucket {
    pub month: String,
    pub year: i32,
    pub count: u64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct CategorySpend {
    pub category: String,
    pub spend: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct CashOutflowBucket {
    pub label: String,
    pub amount: f64,
}
