//! Slot metadata file access.
//!
//! The metadata file (`sce_sys/sdslot.dat`) holds a presence flag per slot and an embedded copy of
//! each slot's payload. It's opened once per run and only ever read with positioned reads.

use std::{
	fs::File,
	io::{ErrorKind, Read, Result, Seek, SeekFrom},
	path::{Path, PathBuf},
};

use tracing::{instrument, trace};

use crate::{
	error::Error,
	format::{METADATA_PATH, PAYLOAD_LEN},
	slot::SlotIndex,
};

/// Read handle on a slot metadata file.
#[derive(Debug)]
pub struct MetadataBlob<R> {
	reader: R,
}

impl MetadataBlob<File> {
	/// Path of the metadata file within an import directory.
	pub fn path_in(import_dir: &Path) -> PathBuf {
		METADATA_PATH
			.iter()
			.fold(import_dir.to_owned(), |path, part| path.join(part))
	}

	/// Open the metadata file of an import directory.
	///
	/// Fails with [`Error::MissingMetadata`] if there's no such file.
	#[instrument(level = "debug")]
	pub fn open(import_dir: &Path) -> crate::error::Result<Self> {
		let path = Self::path_in(import_dir);
		if !path.is_file() {
			return Err(Error::MissingMetadata { path });
		}

		trace!(?path, "open slot metadata");
		Ok(Self::new(File::open(path)?))
	}
}

impl<R: Read + Seek> MetadataBlob<R> {
	/// Wrap an already opened reader.
	pub fn new(reader: R) -> Self {
		Self { reader }
	}

	/// Read the presence flag byte of a slot.
	#[instrument(level = "trace", skip(self))]
	pub fn presence_flag(&mut self, slot: SlotIndex) -> Result<u8> {
		self.reader.seek(SeekFrom::Start(slot.presence_offset()))?;
		let mut flag = [0; 1];
		self.reader.read_exact(&mut flag)?;
		trace!(flag = flag[0], "read presence flag");
		Ok(flag[0])
	}

	/// Make one positioned read of a slot's payload region.
	///
	/// Returns how many bytes the read produced, which may be short. An interrupted read counts
	/// as producing nothing.
	#[instrument(level = "trace", skip(self, buf))]
	pub fn read_payload(&mut self, slot: SlotIndex, buf: &mut [u8; PAYLOAD_LEN]) -> Result<usize> {
		self.reader.seek(SeekFrom::Start(slot.payload_offset()))?;
		match self.reader.read(buf) {
			Ok(bytes) => {
				trace!(%bytes, "read payload region");
				Ok(bytes)
			}
			Err(err) if err.kind() == ErrorKind::Interrupted => Ok(0),
			Err(err) => Err(err),
		}
	}

	/// Unwrap the inner reader.
	pub fn into_inner(self) -> R {
		self.reader
	}
}
