pub mod endpoints;
pub mod openapi;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use billsight_common::config;
use billsight_common::db::Database;
use billsight_module_analytics::chat::service::ChatService;

/// Bring up the HTTP server and block until it shuts down.
#[derive(clap::Args, Debug)]
pub struct Run {
    #[command(flatten)]
    pub database: config::Database,

    #[command(flatten)]
    pub chat: config::Chat,

    /// Address to bind to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<()> {
        let db = Database::new(&self.database).await?;
        let chat = ChatService::new(&self.chat)?;

        log::info!("listening on {}:{}", self.bind_addr, self.port);

        HttpServer::new(move || {
            let db = db.clone();
            let chat = chat.clone();

            // the dashboard is served from another origin
            let cors = Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header();

            App::new()
                .wrap(Logger::default())
                .wrap(cors)
                .configure(|config| endpoints::configure(config, db, chat))
        })
        .bind((self.bind_addr, self.port))?
        .run()
        .await?;

        Ok(())
    }
}
