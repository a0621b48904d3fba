#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Database")]
#[group(id = "database")]
pub struct Database {
    /// Connection URL. SQLite (`sqlite://...`) and PostgreSQL
    /// (`postgres://...`) are supported.
    #[arg(
        id = "db-url",
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://billsight.db?mode=rwc"
    )]
    pub url: String,
}

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Chat collaborator")]
#[group(id = "chat")]
pub struct Chat {
    /// Endpoint of the natural-language-to-SQL collaborator.
    #[arg(
        id = "chat-url",
        long,
        env = "CHAT_API_URL",
        default_value = "http://localhost:8000/vanna/ask"
    )]
    pub url: String,

    /// Upper bound for one collaborator round-trip, in seconds.
    #[arg(
        id = "chat-timeout",
        long,
        env = "CHAT_TIMEOUT_SECONDS",
        default_value_t = 30
    )]
    pub timeout: u64,
}
