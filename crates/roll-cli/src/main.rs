use anyhow::Context;
use clap::Parser;

use roll_config::RollConfig;
use roll_db::service::RollService;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rlc error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = RollConfig::load_with_dotenv().context("failed to load configuration")?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());
    let actor = cli
        .actor
        .clone()
        .unwrap_or_else(|| config.general.default_actor.clone());

    ensure_parent_dir(&db_path)?;
    let svc = RollService::new_local(&db_path)
        .await
        .with_context(|| format!("failed to open database at '{db_path}'"))?;
    tracing::debug!(db = %db_path, actor = %actor, "database opened");

    let format = cli.format;
    match &cli.command {
        cli::Commands::Section(command) => commands::section::handle(&svc, command, format).await,
        cli::Commands::Student(command) => commands::student::handle(&svc, command, format).await,
        cli::Commands::Enroll {
            section_id,
            student_id,
        } => commands::enroll::single(&svc, section_id, student_id, &actor, format).await,
        cli::Commands::BulkEnroll {
            section_id,
            ids,
            file,
        } => {
            commands::enroll::bulk(
                &svc,
                section_id,
                ids.as_deref(),
                file.as_deref(),
                &actor,
                format,
            )
            .await
        }
        cli::Commands::Upload { section_id, file } => {
            commands::enroll::upload(&svc, section_id, file, &actor, format).await
        }
        cli::Commands::Remove {
            section_id,
            student_id,
            reason,
        } => {
            commands::enroll::remove(
                &svc,
                section_id,
                student_id,
                reason.as_deref(),
                &actor,
                format,
            )
            .await
        }
        cli::Commands::Roster {
            section_id,
            students,
        } => commands::roster::handle(&svc, section_id, *students, format).await,
        cli::Commands::Attendance(command) => {
            commands::attendance::handle(&svc, command, format).await
        }
        cli::Commands::Audit {
            section_id,
            limit,
            offset,
        } => commands::audit::handle(&svc, section_id, *limit, *offset, format).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ROLLCALL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
    }
    Ok(())
}
