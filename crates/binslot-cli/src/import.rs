use std::{
	io::{stdout, Write},
	path::Path,
};

use binslot::{locator::SlotStatus, ConvertedSlot, Error, Observer, Session, SlotIndex};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::args::Args;

pub(crate) fn import(args: Args) -> miette::Result<()> {
	println!("Looking for decrypted PS Vita save data...");

	info!(path=?args.import_dir, "open slot metadata");
	let mut session = Session::open(&args.import_dir, args.converter_config())?;

	let found = count_slot_files(&args.import_dir);
	println!("Found {found} save slots (including system data)");

	let mut status = ConsoleStatus::default();
	let report = session.run(&mut status)?;
	debug!(?report, "run report");

	println!("Done");
	Ok(())
}

/// Number of `.bin` files directly inside the import directory.
pub(crate) fn count_slot_files(import_dir: &Path) -> usize {
	WalkDir::new(import_dir)
		.min_depth(1)
		.max_depth(1)
		.into_iter()
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(err) => {
				debug!(%err, "skip unreadable entry");
				None
			}
		})
		.filter(|entry| entry.file_type().is_file())
		.filter(|entry| entry.path().extension().map_or(false, |ext| ext == "bin"))
		.count()
}

/// Prints a status line per slot, the way people expect from the console tool.
#[derive(Debug, Default)]
struct ConsoleStatus {
	retried: bool,
}

impl ConsoleStatus {
	fn flush() {
		// status output is best-effort
		let _ = stdout().flush();
	}
}

impl Observer for ConsoleStatus {
	fn importing(&mut self, slot: SlotIndex) {
		self.retried = false;
		print!("Importing {slot}... ");
		Self::flush();
	}

	fn short_read(&mut self, _slot: SlotIndex, attempt: u32, _read: usize, retry: bool) {
		if retry && !self.retried {
			print!("retrying ");
			self.retried = true;
		}
		debug!(%attempt, "payload retry");
		Self::flush();
	}

	fn imported(&mut self, _converted: &ConvertedSlot) {
		println!("ok");
	}

	fn skipped(&mut self, slot: SlotIndex, _status: &SlotStatus) {
		println!("Skipping {slot}");
	}

	fn failed(&mut self, _slot: SlotIndex, _error: &Error) {
		println!("failed");
	}
}
