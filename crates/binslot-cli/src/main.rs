#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::{debug, warn};

mod args;
mod import;
mod logs;

/// Exit code when the import directory has no slot metadata.
const EXIT_MISSING_METADATA: u8 = 2;

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(report) => {
			let code = exit_code(&report);
			eprintln!("{report:?}");
			code
		}
	}
}

fn run() -> miette::Result<()> {
	let logs_on = logs::from_env().into_diagnostic()?;

	debug!("parsing arguments");
	let args = args::Args::parse();

	if logs_on {
		warn!("ignoring logging options from args");
	} else {
		logs::from_args(&args).into_diagnostic()?;
	}

	debug!(?args, "got arguments");
	import::import(args)
}

fn exit_code(report: &miette::Report) -> ExitCode {
	match report.downcast_ref::<binslot::Error>() {
		Some(binslot::Error::MissingMetadata { .. }) => ExitCode::from(EXIT_MISSING_METADATA),
		_ => ExitCode::FAILURE,
	}
}
