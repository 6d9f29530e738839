//! Slot indices and the names and offsets they map to.

use std::{
	fmt,
	path::{Path, PathBuf},
};

use crate::{
	error::Error,
	format::{CONTAINER_SUFFIX, PAYLOAD_STRIDE, PRESENCE_OFFSET, SLOT_COUNT},
};

/// Index of a save slot, 0 to 16.
///
/// Slot 0 holds system data, slots 1 to 16 are the numbered save slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u8);

impl SlotIndex {
	/// The system data slot.
	pub const SYSTEM: Self = Self(0);

	/// Slot with the given index, if it is in range.
	pub const fn new(index: u8) -> Option<Self> {
		if (index as usize) < SLOT_COUNT {
			Some(Self(index))
		} else {
			None
		}
	}

	/// All slots, in increasing order.
	pub fn all() -> impl Iterator<Item = Self> {
		(0..SLOT_COUNT as u8).map(Self)
	}

	/// The numeric index.
	pub const fn get(self) -> u8 {
		self.0
	}

	/// Whether this is the system data slot.
	pub const fn is_system(self) -> bool {
		self.0 == 0
	}

	/// Offset of this slot's presence flag in the metadata file.
	pub const fn presence_offset(self) -> u64 {
		PRESENCE_OFFSET + self.0 as u64
	}

	/// Offset of this slot's payload region in the metadata file.
	pub const fn payload_offset(self) -> u64 {
		PAYLOAD_STRIDE * (self.0 as u64 + 1)
	}

	/// Name of the raw slot file: `system.bin` or `dataNNNN.bin`.
	pub fn file_name(self) -> String {
		if self.is_system() {
			"system.bin".into()
		} else {
			format!("data{:04}.bin", self.0)
		}
	}

	/// Name of the container file for this slot.
	pub fn container_name(self) -> String {
		format!("{}{CONTAINER_SUFFIX}", self.file_name())
	}

	/// Path of the raw slot file in an import directory.
	pub fn raw_path(self, import_dir: &Path) -> PathBuf {
		import_dir.join(self.file_name())
	}

	/// Path of the container file in an import directory.
	pub fn container_path(self, import_dir: &Path) -> PathBuf {
		import_dir.join(self.container_name())
	}
}

impl TryFrom<u8> for SlotIndex {
	type Error = Error;

	fn try_from(index: u8) -> Result<Self, Self::Error> {
		Self::new(index).ok_or(Error::InvalidSlot(index))
	}
}

impl From<SlotIndex> for u8 {
	fn from(slot: SlotIndex) -> Self {
		slot.0
	}
}

impl fmt::Display for SlotIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.file_name())
	}
}
