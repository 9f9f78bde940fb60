use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use enrolldesk::catalog::admin::{spec_for, CatalogAdmin, CATALOG_SPECS};
use enrolldesk::config::AppConfig;
use enrolldesk::forms::{
    AgentWorkflow, CourseWorkflow, EnrollmentWorkflow, ScheduleBoard, StudentWorkflow,
};
use enrolldesk::{telemetry, HttpApi};

use crate::tables;
use crate::ConsoleError;

#[derive(Parser, Debug)]
#[command(
    name = "Enrollment Desk",
    about = "Inspect students, agents, courses, enrollments and payment schedules",
    version
)]
struct Cli {
    /// Override the configured API base URL
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered students
    Students,
    /// List registered agents
    Agents,
    /// List courses with their institution offers
    Courses,
    /// List enrollments
    Enrollments,
    /// Show the installment schedule of one enrollment
    Schedule {
        /// Enrollment id whose schedule to show
        enrollment_id: i64,
    },
    /// List catalogs, or the items of one catalog by key
    Catalogs {
        /// Catalog key, e.g. `profession` or `documentType`
        key: Option<String>,
    },
}

pub(crate) async fn run() -> Result<(), ConsoleError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let base_url = cli.api_url.unwrap_or(config.api.base_url);
    info!(%base_url, "connecting to enrollment API");
    let client = Arc::new(HttpApi::new(base_url));

    match cli.command {
        Command::Students => {
            let students = StudentWorkflow::new(client).list().await?;
            println!("{}", tables::students(&students));
        }
        Command::Agents => {
            let agents = AgentWorkflow::new(client).list().await?;
            println!("{}", tables::agents(&agents));
        }
        Command::Courses => {
            let courses = CourseWorkflow::new(client).list().await?;
            println!("{}", tables::courses(&courses));
        }
        Command::Enrollments => {
            let enrollments = EnrollmentWorkflow::new(client).list().await?;
            println!("{}", tables::enrollments(&enrollments));
        }
        Command::Schedule { enrollment_id } => {
            let mut board = ScheduleBoard::new(client, enrollment_id);
            board.reload().await?;
            println!("{}", tables::schedule(board.items()));
        }
        Command::Catalogs { key: None } => {
            println!("{}", tables::catalog_index(CATALOG_SPECS));
        }
        Command::Catalogs { key: Some(key) } => {
            let spec = spec_for(&key).ok_or_else(|| ConsoleError::UnknownCatalog(key.clone()))?;
            let items = CatalogAdmin::new(client).list(spec).await?;
            println!("{}", tables::catalog_items(spec, &items));
        }
    }
    Ok(())
}
