use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// Creates the config directory and file (not in test mode), the SQLite
/// database and runs all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing worktimer…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let store = SqliteStore::open(&db_path)?;

    println!("✅ Database initialized at {}", &db_path);

    ttlog_or_warn(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 worktimer initialization completed!");
    Ok(())
}
