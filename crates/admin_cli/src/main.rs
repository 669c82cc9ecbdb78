use std::error::Error;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{CropNew, DateWindow, Engine};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "fieldbook_admin")]
#[command(about = "Admin utilities for Fieldbook (migrations, reports, catalogue)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fieldbook.db?mode=rwc"
    )]
    database_url: String,

    /// Farm name printed on reports.
    #[arg(long, env = "FIELDBOOK_FARM_NAME", default_value = "My Farm")]
    farm_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and exit.
    Migrate,
    /// Print one analytics summary as JSON.
    Summary(SummaryArgs),
    /// Print a farm report as JSON.
    Report(ReportArgs),
    Crop(Crop),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummaryKind {
    Dashboard,
    Financial,
    Budget,
    Crops,
    CropPerformance,
    Livestock,
    LivestockHealth,
    Labor,
    Profitability,
    Resources,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[arg(value_enum)]
    kind: SummaryKind,
    /// Reference date for windowed summaries (defaults to today).
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Inclusive lower bound for `financial` and `labor`.
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Inclusive upper bound for `financial` and `labor`.
    #[arg(long)]
    end_date: Option<NaiveDate>,
    /// Fiscal year for `budget` (defaults to the year of `--today`).
    #[arg(long)]
    fiscal_year: Option<i32>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// `financial` or `comprehensive`.
    #[arg(long, default_value = "comprehensive")]
    kind: String,
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct Crop {
    #[command(subcommand)]
    command: CropCommand,
}

#[derive(Subcommand, Debug)]
enum CropCommand {
    /// Register a crop in the catalogue.
    Create(CropCreateArgs),
}

#[derive(Args, Debug)]
struct CropCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    variety: Option<String>,
    #[arg(long)]
    growth_days: Option<i32>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn print_summary(
    engine: &Engine,
    args: SummaryArgs,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match args.kind {
        SummaryKind::Dashboard => print_json(&engine.dashboard(today).await?),
        SummaryKind::Financial => print_json(
            &engine
                .financial_summary(args.start_date, args.end_date)
                .await?,
        ),
        SummaryKind::Budget => {
            let year = args
                .fiscal_year
                .unwrap_or_else(|| chrono::Datelike::year(&today));
            print_json(&engine.budget_summary(year).await?)
        }
        SummaryKind::Crops => print_json(&engine.crop_summary().await?),
        SummaryKind::CropPerformance => print_json(&engine.crop_performance().await?),
        SummaryKind::Livestock => print_json(&engine.livestock_summary().await?),
        SummaryKind::LivestockHealth => print_json(&engine.livestock_health(today).await?),
        SummaryKind::Labor => {
            let window = match (args.start_date, args.end_date) {
                (Some(start), Some(end)) => Some(DateWindow::new(start, end)),
                (None, None) => None,
                _ => return Err("labor needs both --start-date and --end-date".into()),
            };
            print_json(&engine.labor_statistics(window, today).await?)
        }
        SummaryKind::Profitability => print_json(&engine.profitability().await?),
        SummaryKind::Resources => print_json(&engine.resource_utilization().await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .farm_name(cli.farm_name)
        .build()
        .await?;

    match cli.command {
        Command::Migrate => println!("database is up to date"),
        Command::Summary(args) => print_summary(&engine, args).await?,
        Command::Report(args) => {
            let today = args
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            match engine.report(&args.kind, today).await {
                Ok(report) => print_json(&report)?,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            }
        }
        Command::Crop(Crop {
            command: CropCommand::Create(args),
        }) => {
            let crop = engine
                .new_crop(CropNew {
                    name: args.name,
                    variety: args.variety,
                    description: None,
                    typical_growth_days: args.growth_days,
                })
                .await?;
            println!("created crop: {} ({})", crop.name, crop.id);
        }
    }

    Ok(())
}
