/// What to do when a dataset contains a document identifier that already
/// exists in the store.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum IngestMode {
    /// Abort the run on the first duplicate (the ingestion default).
    #[default]
    FailFast,
    /// Record the duplicate and keep going.
    SkipExisting,
}

/// The outcome of one dataset ingestion run.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct DatasetIngestResult {
    /// Invoices created.
    pub ingested: u64,
    /// Records without a populated invoice substructure, excluded by the
    /// admission filter.
    pub skipped: u64,
    /// Document identifiers that already existed (skip-existing mode only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<String>,
}
