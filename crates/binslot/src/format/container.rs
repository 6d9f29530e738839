//! Binslot container structure
//!
//! A container is the standalone form of a single save slot. It carries the slot's payload as
//! found in the slot metadata file, a salted digest of that payload, and a digest of the raw slot
//! file that sits next to the metadata in the save directory.
//!
//! The layout is fixed:
//!
//! | offset | length | field                                |
//! |-------:|-------:|--------------------------------------|
//! |      0 |      8 | magic (`SAVE0001`)                   |
//! |      8 |     16 | MD5 of payload then salt             |
//! |     24 |     16 | MD5 of the raw slot file             |
//! |     40 |    844 | payload                              |

use std::io::{Read, Result as IoResult};

use deku::prelude::*;

use super::{
	constants::{CONTAINER_LEN, DIGEST_LEN, MAGIC_LEN, PAYLOAD_LEN},
	digest::Digest,
};
use crate::error::Error;

/// Binslot Container
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Container {
	/// Magic number. Should match the configured magic, [`CONTAINER_MAGIC`][super::constants::CONTAINER_MAGIC] by default.
	pub magic: [u8; MAGIC_LEN],

	/// Digest of the payload followed by the salt.
	pub meta_digest: [u8; DIGEST_LEN],

	/// Digest of the raw slot file.
	pub data_digest: [u8; DIGEST_LEN],

	/// Slot payload.
	pub payload: [u8; PAYLOAD_LEN],
}

impl Container {
	/// Assemble a container from its parts.
	pub fn new(
		magic: [u8; MAGIC_LEN],
		meta_digest: Digest,
		data_digest: Digest,
		payload: [u8; PAYLOAD_LEN],
	) -> Self {
		Self {
			magic,
			meta_digest: meta_digest.0,
			data_digest: data_digest.0,
			payload,
		}
	}

	/// Parse a container from exactly [`CONTAINER_LEN`] bytes, starting with the given magic.
	pub fn parse(bytes: &[u8], magic: &[u8; MAGIC_LEN]) -> crate::error::Result<Self> {
		if bytes.len() != CONTAINER_LEN {
			return Err(Error::Format(
				format!(
					"expected {CONTAINER_LEN} bytes of container, got {}",
					bytes.len()
				)
				.into(),
			));
		}

		let (_, container) = Self::from_bytes((bytes, 0)).map_err(Error::from_deku)?;
		if &container.magic != magic {
			return Err(Error::Format(
				format!(
					"bad magic: expected {:02x?}, got {:02x?}",
					magic, container.magic
				)
				.into(),
			));
		}

		Ok(container)
	}

	/// Read and parse a whole container.
	///
	/// Fails if the reader yields more or fewer bytes than a container holds.
	pub fn read_from<R: Read + ?Sized>(
		reader: &mut R,
		magic: &[u8; MAGIC_LEN],
	) -> crate::error::Result<Self> {
		let mut bytes = Vec::with_capacity(CONTAINER_LEN + 1);
		reader
			.take(CONTAINER_LEN as u64 + 1)
			.read_to_end(&mut bytes)?;
		Self::parse(&bytes, magic)
	}

	/// Serialise the container to bytes.
	pub fn serialise(&self) -> crate::error::Result<Vec<u8>> {
		let bytes = self.to_bytes().map_err(Error::from_deku)?;
		debug_assert_eq!(bytes.len(), CONTAINER_LEN);
		Ok(bytes)
	}

	/// The digest of payload and salt.
	pub fn meta_digest(&self) -> Digest {
		Digest(self.meta_digest)
	}

	/// The digest of the raw slot file.
	pub fn data_digest(&self) -> Digest {
		Digest(self.data_digest)
	}

	/// Check the metadata digest against the embedded payload.
	pub fn verify_meta(&self, salt: &[u8]) -> bool {
		Digest::of_payload(&self.payload, salt) == self.meta_digest()
	}

	/// Check the data digest against the contents of a raw slot file.
	pub fn verify_data<R: Read + ?Sized>(&self, raw: &mut R) -> IoResult<bool> {
		Ok(Digest::of_reader(raw)? == self.data_digest())
	}
}
