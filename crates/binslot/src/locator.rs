//! Slot Locator: decides which slots of an import directory get converted.

use std::{
	io::{Read, Seek},
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{blob::MetadataBlob, error::Result, format::PRESENT_FLAG, slot::SlotIndex};

/// What the locator found for a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotStatus {
	/// Flagged present and its raw file exists: convert it.
	Present {
		/// Raw slot file.
		raw: PathBuf,
	},

	/// The presence flag is not set.
	Unflagged {
		/// The flag byte found instead.
		flag: u8,
	},

	/// Flagged present, but the raw slot file doesn't exist.
	MissingRawFile {
		/// Where the raw slot file was expected.
		raw: PathBuf,
	},
}

impl SlotStatus {
	/// Whether the slot should be converted.
	pub fn should_process(&self) -> bool {
		matches!(self, Self::Present { .. })
	}
}

/// Locate a slot: read its presence flag and check for its raw file.
///
/// The raw file is only looked for if the flag is set.
#[instrument(level = "debug", skip(blob))]
pub fn locate<R: Read + Seek>(
	blob: &mut MetadataBlob<R>,
	import_dir: &Path,
	slot: SlotIndex,
) -> Result<SlotStatus> {
	let flag = blob.presence_flag(slot)?;
	let status = if flag != PRESENT_FLAG {
		SlotStatus::Unflagged { flag }
	} else {
		let raw = slot.raw_path(import_dir);
		if raw.is_file() {
			SlotStatus::Present { raw }
		} else {
			SlotStatus::MissingRawFile { raw }
		}
	};

	debug!(?status, "located slot");
	Ok(status)
}
