use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use sprintdesk_core::points::Points;
use sprintdesk_core::request::{Commitment, RequestStatus, RequestType};

#[derive(Debug, Parser)]
#[command(name = "sprintdesk", about = "Sprint request tracking for the scrum desk")]
pub struct Cli {
    /// Directory holding the three CSV tables
    #[arg(long, env = "SPRINTDESK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sprint registry
    Sprint {
        #[command(subcommand)]
        command: SprintCommand,
    },
    /// Request table
    Request {
        #[command(subcommand)]
        command: RequestCommand,
    },
    /// Change ledger, newest first
    History {
        #[command(flatten)]
        filter: FilterArgs,
        /// Keep only changes on or after this date
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Keep only changes on or before this date
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Per-sprint aggregates over the change ledger
    Summary {
        /// Restrict to one sprint
        #[arg(long)]
        sprint: Option<String>,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SprintCommand {
    /// Register a sprint
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
        /// QA headcount
        #[arg(long)]
        qa: u32,
        /// Dev headcount
        #[arg(long)]
        dev: u32,
        /// Effective working days
        #[arg(long)]
        days: u32,
    },
    /// List registered sprints
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// Create a request
    Add {
        /// Request ID (non-negative integer)
        #[arg(long)]
        id: String,
        #[arg(long)]
        description: String,
        #[arg(long = "type", value_parser = parse_type)]
        tipo: RequestType,
        #[arg(long, value_parser = parse_status)]
        status: RequestStatus,
        /// Movement date
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        sprint: String,
        /// Sí/No (also accepts true/false)
        #[arg(long, value_parser = parse_si_no, default_value = "No")]
        carryover: bool,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        qa_points: Points,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        dev_points: Points,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        final_points: Points,
        #[arg(long, value_parser = parse_commitment)]
        commitment: Commitment,
        /// Related story, defects only
        #[arg(long, default_value = "")]
        related_story: String,
        /// Resolution time in hours, defects only
        #[arg(long)]
        resolution_hours: Option<f64>,
    },
    /// Overwrite every mutable field of a request (description and type
    /// are fixed at creation)
    Update {
        #[arg(long)]
        id: String,
        #[arg(long, value_parser = parse_status)]
        status: RequestStatus,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        sprint: String,
        #[arg(long, value_parser = parse_si_no, default_value = "No")]
        carryover: bool,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        qa_points: Points,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        dev_points: Points,
        #[arg(long, value_parser = parse_points, default_value = "N/A")]
        final_points: Points,
        #[arg(long, value_parser = parse_commitment)]
        commitment: Commitment,
        #[arg(long, default_value = "")]
        related_story: String,
        #[arg(long)]
        resolution_hours: Option<f64>,
    },
    /// List requests
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    /// Equality filter on sprint name
    #[arg(long)]
    pub sprint: Option<String>,
    /// Equality filter on status
    #[arg(long, value_parser = parse_status)]
    pub status: Option<RequestStatus>,
    /// Substring filter on the ID as text
    #[arg(long)]
    pub id_contains: Option<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("expected YYYY-MM-DD, got {s:?}"))
}

fn parse_type(s: &str) -> Result<RequestType, String> {
    RequestType::parse_str(s).ok_or_else(|| {
        let all: Vec<&str> = RequestType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown type {s:?}, expected one of: {}", all.join(", "))
    })
}

fn parse_status(s: &str) -> Result<RequestStatus, String> {
    RequestStatus::parse_str(s).ok_or_else(|| {
        let all: Vec<&str> = RequestStatus::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown status {s:?}, expected one of: {}", all.join(", "))
    })
}

fn parse_points(s: &str) -> Result<Points, String> {
    Points::parse_str(s).ok_or_else(|| {
        let all: Vec<&str> = Points::ALL.iter().map(|p| p.as_str()).collect();
        format!("off-scale points {s:?}, expected one of: {}", all.join(", "))
    })
}

fn parse_commitment(s: &str) -> Result<Commitment, String> {
    Commitment::parse_str(s).ok_or_else(|| {
        let all: Vec<&str> = Commitment::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown commitment {s:?}, expected one of: {}", all.join(", "))
    })
}

fn parse_si_no(s: &str) -> Result<bool, String> {
    match s {
        "Sí" | "Si" | "sí" | "si" | "true" | "yes" => Ok(true),
        "No" | "no" | "false" => Ok(false),
        other => Err(format!("expected Sí/No, got {other:?}")),
    }
}
