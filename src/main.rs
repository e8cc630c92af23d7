//! Log investigator entry point.
//!
//! Loads the investigation settings, asks for the events and addresses to
//! investigate when they are not given on the command line, and prints one
//! line per (event, address) once every chunk of the scanned range has
//! settled.
//!
//! # Flow
//! 1. Loads `.env` and the settings file
//! 2. Resolves the event selection and the address list
//! 3. Probes endpoints, partitions the range and fetches logs concurrently
//! 4. Converts the summed amounts with the current ETH/USD rate
//! 5. Stops scheduling new work on Ctrl+C and reports what settled

use log_investigator::{
	bootstrap::{select_events, EventReport, Investigation, InvestigationReport},
	models::{ConfigLoader, EventSchema, InvestigationConfig, DEFAULT_CONFIG_PATH},
	services::{aggregator::Progress, blockchain::ClientPool, pricing::PriceService},
	utils::{
		logging::setup_logging,
		metrics::gather_metrics,
		parsing::parse_address_list,
		report::{format_analysis_line, format_progress, AmountUnits},
	},
};

use anyhow::Context;
use clap::{Arg, Command};
use dotenvy::dotenv;
use std::{
	env::{set_var, var},
	io::{self, BufRead, Write},
	path::PathBuf,
	sync::Arc,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Prints `message` and reads one trimmed line from stdin
fn prompt(message: &str) -> anyhow::Result<String> {
	let mut stdout = io::stdout();
	write!(stdout, "{}", message)?;
	stdout.flush()?;

	let mut line = String::new();
	io::stdin().lock().read_line(&mut line)?;
	Ok(line.trim().to_string())
}

fn event_menu(schemas: &[EventSchema]) -> String {
	let mut menu = String::from("Available events:\n");
	for schema in schemas {
		menu.push_str(&format!("{}. {}\n", schema.spec().key, schema.name()));
	}
	menu.push_str("Select events by key (comma-separated) or * for all: ");
	menu
}

fn print_event_report(report: &EventReport, units: &AmountUnits, rate: Option<f64>) {
	println!("\n--- Analyzing {} Events ---", report.event);
	for result in &report.results {
		println!(
			"{}",
			format_analysis_line(result, &report.display_name, units, rate)
		);
	}

	if !report.is_complete() {
		println!(
			"Warning: {} of {} chunks failed, the numbers above may be understated.",
			report.failures.len(),
			report.chunks_total
		);
		for failure in &report.failures {
			println!(
				"  blocks {}-{} via {} after {} retries: {}",
				failure.range.start(),
				failure.range.end(),
				failure.endpoint_url,
				failure.retries,
				failure.reason
			);
		}
	}
}

fn print_report(report: &InvestigationReport, units: &AmountUnits, rate: Option<f64>) {
	for event in &report.events {
		print_event_report(event, units, rate);
	}
	if report.cancelled {
		println!("\nInvestigation interrupted, remaining events were not processed.");
	}
}

/// Main entry point for the log investigator.
///
/// # Errors
/// Returns an error if the settings cannot be loaded, the input is invalid or
/// no endpoint is usable.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("log-investigator")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Scans a historical block range of a contract for configured events across several \
			 RPC endpoints and reports per address counts and summed amounts.",
		)
		.arg(
			Arg::new("config")
				.long("config")
				.help("Path to the investigation settings file (default: config/investigation.json)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("events")
				.long("events")
				.help("Event keys to investigate, comma-separated, or * for all")
				.value_name("KEYS"),
		)
		.arg(
			Arg::new("addresses")
				.long("addresses")
				.help("Addresses to investigate, comma-separated")
				.value_name("ADDRESSES"),
		)
		.arg(
			Arg::new("end-block")
				.long("end-block")
				.help("Last block of the scanned range (default: chain head)")
				.value_name("BLOCK_NUMBER")
				.value_parser(clap::value_parser!(u64)),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("print-metrics")
				.long("print-metrics")
				.help("Print the collected metrics after the run")
				.action(clap::ArgAction::SetTrue),
		)
		.get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	if let Some(level) = matches.get_one::<String>("log-level") {
		if var("LOG_LEVEL").is_err() {
			set_var("LOG_LEVEL", level);
		}
	}

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config_path = matches
		.get_one::<String>("config")
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
	let mut config = InvestigationConfig::load_from_path(&config_path)
		.with_context(|| format!("Failed to load {}", config_path.display()))?;

	if let Some(end_block) = matches.get_one::<u64>("end-block") {
		config.end_block = Some(*end_block);
	}

	let schemas = config
		.schemas()
		.map_err(|e| anyhow::anyhow!("Invalid event configuration: {}", e))?;

	let selection = match matches.get_one::<String>("events") {
		Some(selection) => selection.clone(),
		None => prompt(&event_menu(&schemas))?,
	};
	let events = select_events(&schemas, &selection);
	if events.is_empty() {
		anyhow::bail!("No valid events selected");
	}

	let address_input = match matches.get_one::<String>("addresses") {
		Some(addresses) => addresses.clone(),
		None => prompt("Enter addresses to investigate (comma-separated): ")?,
	};
	let addresses = parse_address_list(&address_input).map_err(|e| anyhow::anyhow!(e))?;

	let pool = ClientPool::build(
		&config.endpoints(),
		config.request_timeout(),
		config.connect_timeout(),
	);
	if !pool.rejected.is_empty() {
		warn!("{} endpoint(s) rejected before probing", pool.rejected.len());
	}

	let price_service = PriceService::new(config.pricing.clone(), config.request_timeout())
		.context("Failed to build the price client")?;
	let units = AmountUnits::from_config(&config);

	let investigation = Investigation::new(config, pool.candidates).with_progress_callback(
		Arc::new(|event: &str, progress: Progress| {
			info!(
				"{}",
				format_progress(event, progress.completed, progress.total, progress.eta())
			);
		}),
	);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	tokio::spawn(async move {
		if let Err(e) = tokio::signal::ctrl_c().await {
			error!("Failed to listen for Ctrl+C: {}", e);
			return;
		}
		info!("Shutdown signal received, settling in-flight chunks...");
		let _ = shutdown_tx.send(true);
	});

	let (report, rate) = tokio::join!(
		investigation.run(&events, &addresses, shutdown_rx),
		price_service.fetch_rate()
	);
	let report = report?;

	info!(
		"Scanned blocks {} to {} using {} healthy endpoint(s)",
		report.range.start(),
		report.range.end(),
		report.healthy_endpoints.len()
	);
	print_report(&report, &units, rate);

	if matches.get_flag("print-metrics") {
		match gather_metrics() {
			Ok(metrics) => println!("\n{}", String::from_utf8_lossy(&metrics)),
			Err(e) => error!("Failed to gather metrics: {}", e),
		}
	}

	Ok(())
}
