//! Error types for binslot operations.
use std::{borrow::Cow, fmt, path::PathBuf};

use deku::DekuError;
use miette::Diagnostic;
use thiserror::Error;

use crate::slot::SlotIndex;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined error type for locating, converting, and verifying slots.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// The slot metadata file is absent, so no slot can be located.
	#[error("slot metadata file is missing: {}", path.display())]
	#[diagnostic(
		code(binslot::missing_metadata),
		help("the import directory should be a decrypted save directory containing sce_sys/sdslot.dat")
	)]
	MissingMetadata {
		/// Where the metadata file was expected.
		path: PathBuf,
	},

	/// I/O error.
	#[error(transparent)]
	#[diagnostic(code(binslot::io))]
	Io(#[from] std::io::Error),

	/// The payload region could not be read in full within the retry policy.
	#[error("short read of {slot} payload: got {read} bytes at best after {attempts} attempts")]
	#[diagnostic(
		code(binslot::short_read),
		help("the slot metadata file may be truncated; use --attempts 0 to retry without limit")
	)]
	ShortRead {
		/// Slot being read.
		slot: SlotIndex,

		/// Largest byte count any attempt returned.
		read: usize,

		/// Number of attempts made.
		attempts: u32,
	},

	/// Slot index outside of 0..=16.
	#[error("slot index {0} is out of range")]
	#[diagnostic(code(binslot::invalid_slot))]
	InvalidSlot(u8),

	/// Malformed container.
	#[error("binslot container: {0}")]
	#[diagnostic(code(binslot::format))]
	Format(Cow<'static, str>),

	/// A written container does not check out against its sources.
	#[error("container {} failed verification: {field} mismatch", path.display())]
	#[diagnostic(code(binslot::verify))]
	Verify {
		/// Container file.
		path: PathBuf,

		/// Which part did not match.
		field: VerifyField,
	},
}

impl Error {
	/// New format error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::Format(orig.to_string().into())
	}
}

/// Part of a container checked during verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyField {
	/// The salted payload digest.
	MetaDigest,

	/// The raw slot file digest.
	DataDigest,
}

impl fmt::Display for VerifyField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::MetaDigest => "metadata digest",
			Self::DataDigest => "data digest",
		})
	}
}
