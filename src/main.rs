use anyhow::{Context, Result};
use tracing::{error, info};
use wardroom::app::App;
use wardroom::config::AppConfig;
use wardroom::db::Database;
use wardroom::logging;
use wardroom::tui::{self, Tui};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config)?;

    let db = Database::open(&config.database_path).with_context(|| {
        format!(
            "Failed to open database {}",
            config.database_path.display()
        )
    })?;
    if db.seed_admin(&config.admin.username, &config.admin.password)? {
        info!(username = %config.admin.username, "Seeded administrator account");
    }
    info!(database = %config.database_path.display(), "Starting Wardroom");

    let _guard = CleanupGuard;
    let mut tui = Tui::enter()?;

    let mut app = App::new(db);
    let res = app.run(&mut tui);

    tui.exit()?;

    if let Err(e) = res {
        error!(error = %e, "Application error");
        eprintln!("Application Error: {e}");
    }
    info!("Wardroom stopped");
    Ok(())
}

/// Restores the terminal even when the application panics.
struct CleanupGuard;

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = tui::restore();
    }
}
