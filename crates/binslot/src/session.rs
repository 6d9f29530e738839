//! Run orchestration: every slot of an import directory, in order.

use std::{
	fs::File,
	io::{Read, Seek},
	path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use crate::{
	blob::MetadataBlob,
	convert::{ConvertedSlot, Converter, ConverterConfig},
	error::Result,
	format::SLOT_COUNT,
	locator::{locate, SlotStatus},
	observer::Observer,
	slot::SlotIndex,
};

/// What happened to a slot during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotOutcome {
	/// Converted to a container.
	Converted(ConvertedSlot),

	/// Not converted, for the given reason.
	Skipped {
		/// Which slot.
		slot: SlotIndex,

		/// Why it was skipped.
		status: SlotStatus,
	},
}

impl SlotOutcome {
	/// The slot this outcome is for.
	pub fn slot(&self) -> SlotIndex {
		match self {
			Self::Converted(converted) => converted.slot,
			Self::Skipped { slot, .. } => *slot,
		}
	}
}

/// Outcomes of a complete run, one per slot in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
	/// Per-slot outcomes.
	pub outcomes: Vec<SlotOutcome>,
}

impl Report {
	/// Slots that were converted.
	pub fn converted(&self) -> impl Iterator<Item = &ConvertedSlot> {
		self.outcomes.iter().filter_map(|outcome| match outcome {
			SlotOutcome::Converted(converted) => Some(converted),
			SlotOutcome::Skipped { .. } => None,
		})
	}

	/// Number of slots that were skipped.
	pub fn skipped(&self) -> usize {
		self.outcomes.len() - self.converted().count()
	}
}

/// Conversion run over one import directory.
///
/// Holds the metadata file open for as long as it lives.
#[derive(Debug)]
pub struct Session<R> {
	import_dir: PathBuf,
	blob: MetadataBlob<R>,
	converter: Converter,
}

impl Session<File> {
	/// Open the metadata file of an import directory.
	///
	/// Fails with [`MissingMetadata`][crate::error::Error::MissingMetadata] before anything else
	/// is touched if the directory has no `sce_sys/sdslot.dat`.
	#[instrument(level = "debug", skip(import_dir, config), fields(import_dir = ?import_dir.as_ref()))]
	pub fn open(import_dir: impl AsRef<Path>, config: ConverterConfig) -> Result<Self> {
		let import_dir = import_dir.as_ref().to_owned();
		let blob = MetadataBlob::open(&import_dir)?;
		Ok(Self::new(import_dir, blob, Converter::new(config)))
	}
}

impl<R: Read + Seek> Session<R> {
	/// Session over an already opened metadata file.
	pub fn new(import_dir: PathBuf, blob: MetadataBlob<R>, converter: Converter) -> Self {
		Self {
			import_dir,
			blob,
			converter,
		}
	}

	/// The import directory.
	pub fn import_dir(&self) -> &Path {
		&self.import_dir
	}

	/// Locate and convert every slot in index order.
	///
	/// The first error stops the run: the remaining slots are not looked at.
	#[instrument(level = "info", skip(self, observer), fields(import_dir = ?self.import_dir))]
	pub fn run(&mut self, observer: &mut impl Observer) -> Result<Report> {
		let mut report = Report {
			outcomes: Vec::with_capacity(SLOT_COUNT),
		};

		for slot in SlotIndex::all() {
			let status = locate(&mut self.blob, &self.import_dir, slot)?;
			let raw = match status {
				SlotStatus::Present { raw } => raw,
				status => {
					debug!(%slot, ?status, "skip slot");
					observer.skipped(slot, &status);
					report.outcomes.push(SlotOutcome::Skipped { slot, status });
					continue;
				}
			};

			observer.importing(slot);
			match self.converter.convert(&mut self.blob, slot, &raw, observer) {
				Ok(converted) => {
					observer.imported(&converted);
					report.outcomes.push(SlotOutcome::Converted(converted));
				}
				Err(err) => {
					observer.failed(slot, &err);
					return Err(err);
				}
			}
		}

		info!(
			converted = report.converted().count(),
			skipped = report.skipped(),
			"run complete"
		);
		Ok(report)
	}
}
