use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use fooddiary::commands::{
    AddArgs, CalendarArgs, ConfigCommand, DayArgs, DeleteArgs, EditArgs, SummaryArgs,
};
use fooddiary::config::Config;
use fooddiary::db::{init_db, SqliteFoodEntryStore};
use fooddiary_core::{DiaryController, DiaryService, UserId};

#[derive(Parser)]
#[command(name = "fooddiary")]
#[command(version)]
#[command(about = "A food diary with daily and calendar nutrition summaries", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Diary owner, overrides the configured user
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry
    Add(AddArgs),

    /// Change fields of a logged entry
    Edit(EditArgs),

    /// Delete a logged entry
    Delete(DeleteArgs),

    /// Show the daily log with totals per meal
    Day(DayArgs),

    /// Show per-day nutrition totals for a date range
    Summary(SummaryArgs),

    /// Show a month calendar annotated with daily calories
    Calendar(CalendarArgs),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fooddiary=warn,fooddiary_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let user = UserId::new(cli.user.unwrap_or_else(|| config.user.value.clone()))?;
    let pool = init_db(&config.database_path.value).await?;
    let service = DiaryService::new(Arc::new(SqliteFoodEntryStore::new(pool)));
    let mut diary = DiaryController::new(service, user, Local::now().date_naive());

    match command {
        Commands::Add(args) => args.run(&mut diary).await,
        Commands::Edit(args) => args.run(&mut diary).await,
        Commands::Delete(args) => args.run(&mut diary).await,
        Commands::Day(args) => args.run(&mut diary).await,
        Commands::Summary(args) => args.run(&mut diary).await,
        Commands::Calendar(args) => args.run(&mut diary).await,
        Commands::Config(cmd) => cmd.run(&config),
    }
}
