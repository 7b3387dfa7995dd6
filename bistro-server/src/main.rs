//! Bistro server binary
//!
//! ```text
//! bistro-server [serve]                     run the HTTP API (default)
//! bistro-server migrate up|down|status      manage the schema
//! bistro-server user create --username ..   add a back-office account
//! bistro-server check                       catalog data-quality report
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use shared::models::Role;

use bistro_server::db::{DbService, migrate};
use bistro_server::services::{accounts, quality};
use bistro_server::core::LogConfig;
use bistro_server::{Config, Server, init_logger_with_file};

#[derive(Parser, Debug)]
#[command(name = "bistro-server", about = "Restaurant catalog and reservation backend", version)]
struct Cli {
    /// SQLite database URL
    #[arg(long, global = true, env = "DATABASE_URL", default_value = "sqlite:bistro.db")]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Apply, revert or list schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage back-office accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Report catalog records that need attention; exits 1 when any are found
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateAction {
    /// Apply every pending migration
    Up,
    /// Revert migrations down to a version (default: the previous one)
    Down {
        #[arg(long)]
        target: Option<i64>,
    },
    /// List known migrations and whether they are applied
    Status,
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(long)]
        username: String,
        #[arg(long, env = "BISTRO_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "admin")]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.database_url).await,
        Command::Migrate { action } => {
            init_logger_with_file(Some("warn"), false, None);
            run_migrate(&cli.database_url, action).await
        }
        Command::User {
            action: UserAction::Create {
                username,
                password,
                role,
            },
        } => {
            init_logger_with_file(Some("warn"), false, None);
            let db = DbService::new(&cli.database_url).await?;
            let user = accounts::create_user(&db.pool, &username, &password, role).await?;
            println!("created user #{} '{}' ({})", user.id, user.username, user.role);
            Ok(())
        }
        Command::Check { json } => {
            init_logger_with_file(Some("warn"), false, None);
            run_check(&cli.database_url, json).await
        }
    }
}

async fn serve(database_url: String) -> Result<()> {
    let log = LogConfig::from_env();
    init_logger_with_file(Some(&log.level), log.json, log.dir.as_deref());

    let mut config = Config::from_env()?;
    config.database_url = database_url;

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Starting bistro-server"
    );
    Server::new(config).run().await
}

async fn run_migrate(database_url: &str, action: MigrateAction) -> Result<()> {
    let db = DbService::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            migrate::run(&db.pool).await.context("applying migrations")?;
            println!("schema at version {}", migrate::current_version(&db.pool).await?);
        }
        MigrateAction::Down { target } => {
            let statuses = migrate::status(&db.pool).await?;
            let mut applied: Vec<i64> = statuses
                .iter()
                .filter(|m| m.applied)
                .map(|m| m.version)
                .collect();
            applied.sort_unstable();

            let target = match target {
                Some(t) => t,
                None => match applied.len() {
                    0 => bail!("no migration is applied"),
                    1 => 0,
                    n => applied[n - 2],
                },
            };
            migrate::undo(&db.pool, target)
                .await
                .with_context(|| format!("reverting to version {target}"))?;
            println!("schema at version {}", migrate::current_version(&db.pool).await?);
        }
        MigrateAction::Status => {
            for m in migrate::status(&db.pool).await? {
                let mark = if m.applied { "applied" } else { "pending" };
                println!("{:>16}  {:<8} {}", m.version, mark, m.description);
            }
        }
    }
    Ok(())
}

async fn run_check(database_url: &str, json: bool) -> Result<()> {
    let db = DbService::new(database_url).await?;
    let report = quality::check_catalog(&db.pool).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("checked {} wines", report.wines_checked);
        for issue in &report.issues {
            println!("  {issue}");
        }
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
