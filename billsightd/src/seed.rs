use billsight_common::{config, db::Database};
use billsight_module_ingestor::graph::Graph;
use billsight_module_ingestor::model::IngestMode;
use billsight_module_ingestor::service::IngestorService;
use std::path::PathBuf;

/// Load one dataset file, a JSON array of extracted-document records, into
/// the database.
#[derive(clap::Args, Debug)]
pub struct Seed {
    /// The dataset file to load.
    #[arg(long)]
    pub file: PathBuf,

    /// Duplicate-document handling for this run.
    #[arg(long, value_enum, default_value = "fail-fast")]
    pub mode: IngestMode,

    #[command(flatten)]
    pub database: config::Database,
}

impl Seed {
    pub async fn run(self) -> anyhow::Result<()> {
        let db = Database::new(&self.database).await?;
        let service = IngestorService::new(Graph::new(db.clone()));

        let bytes = tokio::fs::read(&self.file).await?;
        let result = service.ingest_dataset(&bytes, self.mode).await?;

        println!(
            "Seeded {}: {} ingested, {} skipped, {} duplicates",
            self.file.display(),
            result.ingested,
            result.skipped,
            result.duplicates.len()
        );

        db.close().await?;
        Ok(())
    }
}
