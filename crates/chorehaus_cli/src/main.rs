//! Operator entry point for a ChoreHaus household database.
//!
//! # Responsibility
//! - Open the household store and run one core operation per invocation.
//! - Print results as JSON on stdout and errors on stderr.

use chorehaus_core::db::open_db;
use chorehaus_core::{
    init_logging, AssignmentService, ChoreQuery, ChoreService, ChoreStatus, EngineConfig,
    HouseholdKind, HouseholdService, NewChore, RenewalService, SqliteHouseholdRepository,
    UserService,
};
use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "chorehaus")]
#[command(version)]
#[command(about = "Balanced household chore assignment")]
struct Args {
    /// SQLite household database file (created when missing)
    #[arg(long, env = "CHOREHAUS_DB")]
    db: PathBuf,

    /// Date treated as today (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Half-width of the workload window in days
    #[arg(long, default_value_t = chorehaus_core::config::DEFAULT_WORKLOAD_WINDOW_DAYS)]
    window_days: u32,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value = chorehaus_core::default_log_level())]
    log_level: String,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "CHOREHAUS_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the household name, dwelling kind and expected size
    SetHousehold {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Number of people expected to live there
        #[arg(long)]
        occupants: u32,
    },
    /// Show the household profile and how many members are registered
    Household,
    /// Register a household member
    AddUser { name: String },
    /// List household members
    Users,
    /// Create one unassigned chore
    AddChore {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "General")]
        category: String,
        /// Expected duration in minutes
        #[arg(long)]
        duration: u32,
        /// Days between repetitions; 0 for one-off
        #[arg(long, default_value_t = 0)]
        frequency: u32,
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Insert the default weekly chores, due a week from today
    Seed,
    /// List chores
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Assign every unassigned chore
    Assign,
    /// Renew completed repeating chores, then assign
    Renew,
    /// Mark an assigned chore complete today, then renew
    Complete { chore_id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Condo,
    Apt,
    House,
}

impl From<KindArg> for HouseholdKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Condo => Self::Condo,
            KindArg::Apt => Self::Apt,
            KindArg::House => Self::House,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusArg {
    Unassigned,
    Assigned,
    Completed,
    Renewed,
}

impl From<StatusArg> for ChoreStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Unassigned => Self::Unassigned,
            StatusArg::Assigned => Self::Assigned,
            StatusArg::Completed => Self::Completed,
            StatusArg::Renewed => Self::Renewed,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        init_logging(&args.log_level, log_dir)?;
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = EngineConfig {
        workload_window_days: args.window_days,
        ..EngineConfig::default()
    };

    let conn = open_db(&args.db)?;
    let repo = SqliteHouseholdRepository::try_new(&conn)?;
    info!(
        "event=cli_command module=cli status=start command={:?} today={}",
        args.command, today
    );

    match args.command {
        Command::SetHousehold {
            name,
            kind,
            occupants,
        } => print_json(&HouseholdService::new(&repo).configure_household(
            &name,
            kind.into(),
            occupants,
        )?),
        Command::Household => print_json(&HouseholdService::new(&repo).household_summary()?),
        Command::AddUser { name } => print_json(&UserService::new(&repo).register_user(&name)?),
        Command::Users => print_json(&UserService::new(&repo).list_users()?),
        Command::AddChore {
            name,
            description,
            category,
            duration,
            frequency,
            deadline,
        } => {
            let request = NewChore {
                name,
                description,
                category,
                expected_duration: duration,
                frequency,
                deadline_date: deadline,
            };
            print_json(&ChoreService::new(&repo).create_chore(&request)?)
        }
        Command::Seed => {
            let deadline = today
                .checked_add_days(Days::new(7))
                .ok_or("seed deadline out of range")?;
            print_json(&ChoreService::new(&repo).seed_default_chores(deadline)?)
        }
        Command::List { status, assignee } => {
            let query = ChoreQuery {
                status: status.map(ChoreStatus::from),
                assignee_id: assignee,
                ..ChoreQuery::default()
            };
            print_json(&ChoreService::new(&repo).list_chores(&query)?)
        }
        Command::Assign => print_json(
            &AssignmentService::with_config(&repo, config).assign_unassigned_chores(today)?,
        ),
        Command::Renew => print_json(
            &RenewalService::with_config(&repo, config).renew_repeating_chores(today)?,
        ),
        Command::Complete { chore_id } => {
            let completed = ChoreService::new(&repo).complete_chore(&chore_id, today)?;
            let renewal =
                RenewalService::with_config(&repo, config).renew_repeating_chores(today)?;
            print_json(&CompletionOutput { completed, renewal })
        }
    }
}

#[derive(Serialize)]
struct CompletionOutput {
    completed: chorehaus_core::Chore,
    renewal: chorehaus_core::RenewalReport,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
