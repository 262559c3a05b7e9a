use std::{collections::BTreeMap, io, path::PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use time::Date;
use tracing_subscriber::EnvFilter;

use carerota_domain::{
	CaregiverId, ConflictPair, Occurrence, ResolveOptions, ScheduleRecord, time_serde,
};
use carerota_service::{ScheduleService, WorkloadSummary, snapshot};

#[derive(Debug, Parser)]
#[command(
	version = carerota_cli::VERSION,
	rename_all = "kebab",
	styles = carerota_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// JSON snapshot of schedule records, either a bare array or `{ "records": [...] }`.
	#[arg(long, short = 'r', value_name = "FILE")]
	pub records: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Occurrences on one date, today by default.
	Day {
		#[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
		date: Option<Date>,
		#[arg(long)]
		include_inactive: bool,
	},
	/// Occurrences for every date in an inclusive range.
	Range {
		#[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
		from: Date,
		#[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
		to: Date,
		#[arg(long)]
		include_inactive: bool,
	},
	/// Recurring conflicts, for one caregiver or all of them.
	Conflicts {
		#[arg(long, value_name = "ID")]
		caregiver: Option<String>,
	},
	/// Steady-state and actual weekly hours for a caregiver.
	Hours {
		#[arg(long, value_name = "ID")]
		caregiver: String,
		/// Any date inside the week to report, the current week by default.
		#[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
		week: Option<Date>,
	},
}

#[derive(Debug, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
	Day {
		#[serde(with = "time_serde::date")]
		date: Date,
		occurrences: Vec<Occurrence>,
	},
	Range {
		#[serde(with = "time_serde::date")]
		from: Date,
		#[serde(with = "time_serde::date")]
		to: Date,
		occurrences: Vec<Occurrence>,
	},
	Conflicts {
		caregivers: BTreeMap<CaregiverId, Vec<ConflictPair>>,
	},
	Hours(WorkloadSummary),
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = carerota_config::load(&args.config)?;
	let filter = EnvFilter::new(cfg.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

	let service = ScheduleService::new(cfg);
	let raw_records = snapshot::load_snapshot(&args.records)?;
	let ingested = service.ingest(raw_records)?;

	tracing::info!(
		records = ingested.records.len(),
		rejected = ingested.rejected.len(),
		path = %args.records.display(),
		"Loaded record snapshot."
	);

	let report = execute(&service, &ingested.records, &args.command)?;
	let json = serde_json::to_string_pretty(&report)?;

	println!("{json}");

	Ok(())
}

/// Runs one report command against an already ingested record set.
pub fn execute(
	service: &ScheduleService,
	records: &[ScheduleRecord],
	command: &Command,
) -> carerota_service::Result<Report> {
	let report = match command {
		Command::Day { date, include_inactive } => {
			let date = date.unwrap_or_else(|| service.today());
			let occurrences =
				service.resolve_for_date(records, date, options(service, *include_inactive));

			Report::Day { date, occurrences }
		},
		Command::Range { from, to, include_inactive } => {
			let occurrences = service.resolve_for_range(
				records,
				*from,
				*to,
				options(service, *include_inactive),
			)?;

			Report::Range { from: *from, to: *to, occurrences }
		},
		Command::Conflicts { caregiver: Some(caregiver) } => {
			let caregiver_id = CaregiverId::from(caregiver.as_str());
			let conflicts = service.find_conflicts(records, &caregiver_id);
			let mut caregivers = BTreeMap::new();

			if !conflicts.is_empty() {
				caregivers.insert(caregiver_id, conflicts);
			}

			Report::Conflicts { caregivers }
		},
		Command::Conflicts { caregiver: None } =>
			Report::Conflicts { caregivers: service.conflicts_by_caregiver(records) },
		Command::Hours { caregiver, week } => Report::Hours(service.workload_summary(
			records,
			&CaregiverId::from(caregiver.as_str()),
			*week,
		)),
	};

	Ok(report)
}

fn options(service: &ScheduleService, include_inactive: bool) -> ResolveOptions {
	if include_inactive { ResolveOptions::with_inactive() } else { service.default_options() }
}

fn parse_date(raw: &str) -> Result<Date, String> {
	time_serde::parse_date(raw).ok_or_else(|| format!("Expected a YYYY-MM-DD date, got {raw:?}."))
}
