use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Convert decrypted PS Vita save slots into standalone .binslot containers.
///
/// Reads IMPORT_DIR/sce_sys/sdslot.dat and, for every slot flagged present whose raw file
/// (system.bin, data0001.bin .. data0016.bin) exists, writes a container next to the raw file
/// with "slot" appended to its name.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "binslot",
	bin_name = "binslot",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Decrypted save directory.
	#[arg(
		value_hint = ValueHint::DirPath,
		value_name = "IMPORT_DIR",
		default_value = ".",
	)]
	pub import_dir: PathBuf,

	/// Read attempts per slot payload before giving up.
	///
	/// A payload read that comes back short is retried straight away, up to this many attempts in
	/// total. Use 0 to retry without limit.
	#[arg(long, value_name = "N", default_value_t = binslot::RetryPolicy::DEFAULT_ATTEMPTS)]
	pub attempts: u32,

	/// Re-read every written container and check it against its sources.
	#[arg(long)]
	pub verify: bool,

	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs. Use multiple
	/// times for more detail. Ignored if RUST_LOG is set.
	#[arg(short, long, action = ArgAction::Count)]
	pub verbose: u8,

	/// Write diagnostic logs to a file.
	///
	/// Logs are written as JSON. If the path is a directory, a file is created in it with a
	/// timestamped name. Has no effect without -v.
	#[arg(long,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,
}

impl Args {
	/// Converter settings from the arguments.
	pub fn converter_config(&self) -> binslot::ConverterConfig {
		binslot::ConverterConfig {
			retry: binslot::RetryPolicy::from_attempts(self.attempts),
			verify: self.verify,
			..Default::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_is_well_formed() {
		Args::command().debug_assert();
	}

	#[test]
	fn defaults_to_current_directory() {
		let args = Args::parse_from(["binslot"]);
		assert_eq!(args.import_dir, PathBuf::from("."));
		assert_eq!(args.attempts, binslot::RetryPolicy::DEFAULT_ATTEMPTS);
		assert!(!args.verify);
	}

	#[test]
	fn zero_attempts_retries_forever() {
		let args = Args::parse_from(["binslot", "--attempts", "0", "saves"]);
		assert_eq!(args.import_dir, PathBuf::from("saves"));
		assert_eq!(
			args.converter_config().retry,
			binslot::RetryPolicy::Unbounded
		);
	}

	#[test]
	fn verbosity_counts() {
		let args = Args::parse_from(["binslot", "-vvv"]);
		assert_eq!(args.verbose, 3);
	}
}
