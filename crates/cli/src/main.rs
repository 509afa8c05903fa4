use api_shared::HealthService;
use clap::{Parser, Subcommand};
use serde::Serialize;
use vitals_core::{repositories, AnalyticsService, CoreConfig, CoreError};
use vitals_types::{PatientId, ReportDate};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Vitals analytics CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the CLI is alive
    Health,
    /// Population headline counts
    TotalCounts,
    /// List all patients
    Patients,
    /// List all doctors
    Doctors,
    /// Appointments per doctor for one day
    Appointments {
        /// Day to report (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Appointments per doctor for the current month
    MonthlyReport,
    /// Latest vitals for a patient
    Dashboard { patientid: String },
    /// Average risk per calendar month
    Risk { patientid: String },
    /// Average vitals per calendar month
    Trend { patientid: String },
    /// Latest vitals next to healthy reference values
    AverageActual { patientid: String },
    /// Deviation from healthy range per vital
    Weightage { patientid: String },
    /// Diet, exercise and routine plans
    Recommendations { patientid: String },
    /// Every reading, newest first
    Episodes { patientid: String },
    /// Per reading, per day plans
    Prescriptions { patientid: String },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn patient(raw: &str) -> Result<PatientId, CoreError> {
    Ok(PatientId::parse(raw)?)
}

/// Open the configured store once for this invocation.
async fn open() -> anyhow::Result<AnalyticsService> {
    let cfg = CoreConfig::from_env()?;
    let store = repositories::connect(cfg.store()).await?;
    Ok(AnalyticsService::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Health) => print_json(&HealthService::check_health()),
        Some(Commands::TotalCounts) => print_json(&open().await?.total_counts().await?),
        Some(Commands::Patients) => print_json(&open().await?.patients_list().await?),
        Some(Commands::Doctors) => print_json(&open().await?.doctors_list().await?),
        Some(Commands::Appointments { date }) => {
            let date = ReportDate::parse(&date).map_err(CoreError::from)?;
            print_json(&open().await?.appointments_by_date(date).await?)
        }
        Some(Commands::MonthlyReport) => print_json(&open().await?.monthly_reports().await?),
        Some(Commands::Dashboard { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.patient_dashboard(id).await?)
        }
        Some(Commands::Risk { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.dashboard_risk(id).await?)
        }
        Some(Commands::Trend { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.health_trend(id).await?)
        }
        Some(Commands::AverageActual { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.average_actual(id).await?)
        }
        Some(Commands::Weightage { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.risk_weightage(id).await?)
        }
        Some(Commands::Recommendations { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.recommendations(id).await?)
        }
        Some(Commands::Episodes { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.episodes(id).await?)
        }
        Some(Commands::Prescriptions { patientid }) => {
            let id = patient(&patientid)?;
            print_json(&open().await?.prescription_tracking(id).await?)
        }
        None => {
            println!("Use 'vitals --help' for commands");
            Ok(())
        }
    }
}
