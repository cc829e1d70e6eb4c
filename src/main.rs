use anyhow::{Context, Result};
use std::io;
use tracing::info;

use course_manager::{config::Config, db::Database, menu::CourseMenu};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the menu.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("course_manager=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    println!("Starting Marnona Firebase Course Manager...");

    let config = Config::from_env().context("invalid configuration")?;
    let db = Database::new(&config)?;
    info!(
        "Connected to project {} collection {}",
        db.project_id(),
        db.collection()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = CourseMenu::new(&db, stdin.lock(), stdout.lock());
    menu.run().await.context("terminal I/O failed")?;

    Ok(())
}
