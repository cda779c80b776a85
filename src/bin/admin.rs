//! CLI administration tool for meetup-service.
//!
//! Inspects the database and manages meetups without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show meetup and registration counts
//! cargo run --bin admin -- stats
//!
//! # List meetups
//! cargo run --bin admin -- meetup list
//!
//! # Delete a meetup and its registrations
//! cargo run --bin admin -- meetup delete 11
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*`).

use meetup_service::application::services::{MeetupService, RegistrationService};
use meetup_service::config::{self, mask_connection_string};
use meetup_service::domain::entities::Meetup;
use meetup_service::infrastructure::persistence::{PgMeetupRepository, PgRegistrationRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing meetup-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage meetups
    Meetup {
        #[command(subcommand)]
        action: MeetupAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum MeetupAction {
    /// List all meetups
    List,

    /// Delete a meetup together with its registrations
    Delete {
        /// Meetup id
        id: i32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = config::Config::from_env()?.database_url;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Meetup { action } => handle_meetup_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn meetup_service(pool: PgPool) -> MeetupService<PgMeetupRepository> {
    MeetupService::new(Arc::new(PgMeetupRepository::new(Arc::new(pool))))
}

/// Dispatches meetup management commands.
async fn handle_meetup_action(action: MeetupAction, pool: PgPool) -> Result<()> {
    let service = meetup_service(pool);

    match action {
        MeetupAction::List => list_meetups(&service).await?,
        MeetupAction::Delete { id, yes } => delete_meetup(&service, id, yes).await?,
    }

    Ok(())
}

/// Prints every meetup as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Meetups
///
///   ID    Event                          Date         Organizer
///   ────────────────────────────────────────────────────────────────────
///   11    Womakerscode Dados             10/10/2021   organizadora
/// ```
async fn list_meetups(service: &MeetupService<PgMeetupRepository>) -> Result<()> {
    println!("{}", "📋 Meetups".bright_blue().bold());
    println!();

    let meetups: Vec<Meetup> = service
        .get_all()
        .await
        .context("Failed to list meetups")?;

    if meetups.is_empty() {
        println!("{}", "  No meetups found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<12} {:<20}",
        "ID".bright_white().bold(),
        "Event".bright_white().bold(),
        "Date".bright_white().bold(),
        "Organizer".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for meetup in &meetups {
        let id = meetup.id.map(|id| id.to_string()).unwrap_or_default();
        println!(
            "  {:<5} {:<30} {:<12} {}",
            id.bright_black(),
            meetup.event.cyan(),
            meetup.meetup_date,
            meetup.organizer
        );
    }

    println!();
    println!(
        "  Total: {}",
        meetups.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a meetup after confirmation (default: No).
async fn delete_meetup(
    service: &MeetupService<PgMeetupRepository>,
    id: i32,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Meetup".bright_blue().bold());
    println!();

    let meetup = service
        .get_meetup_by_id(id)
        .await
        .context("Failed to load meetup")?
        .with_context(|| format!("Meetup {id} not found"))?;

    println!("  Event: {}", meetup.event.cyan());
    println!("  Date:  {}", meetup.meetup_date);
    println!(
        "{}",
        "  All registrations for this meetup will be deleted too.".yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this meetup?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(&meetup)
        .await
        .context("Failed to delete meetup")?;

    println!("{}", "✅ Meetup deleted".green().bold());
    println!();

    Ok(())
}

/// Displays meetup and registration counts.
async fn handle_stats(pool: PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (meetups_count, registrations_count) = load_stats(pool).await?;

    println!(
        "  Meetups:       {}",
        meetups_count.to_string().bright_green().bold()
    );
    println!(
        "  Registrations: {}",
        registrations_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Counts meetups and registrations concurrently.
async fn load_stats(pool: PgPool) -> Result<(i64, i64)> {
    let pool = Arc::new(pool);
    let meetups = MeetupService::new(Arc::new(PgMeetupRepository::new(pool.clone())));
    let registrations = RegistrationService::new(Arc::new(PgRegistrationRepository::new(pool)));

    tokio::try_join!(meetups.count(), registrations.count())
        .context("Failed to load statistics")
}

/// Number of successfully applied migrations.
async fn applied_migrations(pool: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
        .context("Failed to read migration history")
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database connection check failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Failed to read server version")?;

            let applied = applied_migrations(pool).await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_meetup_delete() {
        let cli = Cli::try_parse_from(["admin", "meetup", "delete", "11", "-y"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Meetup {
                action: MeetupAction::Delete { id: 11, yes: true }
            }
        ));
    }

    #[sqlx::test]
    async fn test_applied_migrations_counts_history(pool: PgPool) {
        assert!(applied_migrations(&pool).await.unwrap() > 0);
        assert!(handle_db_action(DbAction::Info, &pool).await.is_ok());
    }

    #[sqlx::test(migrations = false)]
    async fn test_db_info_fails_without_migration_table(pool: PgPool) {
        let err = handle_db_action(DbAction::Info, &pool).await.unwrap_err();

        assert!(err.to_string().contains("migration history"));
    }

    #[sqlx::test]
    async fn test_load_stats(pool: PgPool) {
        let meetup_id: i32 = sqlx::query_scalar(
            "INSERT INTO meetups (event, organizer, meetup_date) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind("Womakerscode Dados")
        .bind("organizadora")
        .bind("10/10/2021")
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO registrations
                (person_name, email, date_of_registration, registered, meetup_id)
            VALUES ('Ana', 'ana@gmail.com', '01/04/2022', TRUE, $1)
            "#,
        )
        .bind(meetup_id)
        .execute(&pool)
        .await
        .unwrap();

        assert_eq!(load_stats(pool).await.unwrap(), (1, 1));
    }
}
