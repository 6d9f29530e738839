use std::{
	fmt,
	io::{self, Read},
};

use md5::{Digest as _, Md5};

use super::constants::DIGEST_LEN;

/// MD5 digest.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
	/// Digest of a slot payload, salted.
	///
	/// The payload and the salt go through a single MD5 context, payload first.
	pub fn of_payload(payload: &[u8], salt: &[u8]) -> Self {
		let mut hasher = Md5::new();
		hasher.update(payload);
		hasher.update(salt);
		Self(hasher.finalize().into())
	}

	/// Digest of everything a reader yields, until EOF.
	pub fn of_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
		let mut hasher = Md5::new();
		io::copy(reader, &mut hasher)?;
		Ok(Self(hasher.finalize().into()))
	}

	/// Borrow the raw bytes.
	pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
		&self.0
	}
}

impl From<[u8; DIGEST_LEN]> for Digest {
	fn from(bytes: [u8; DIGEST_LEN]) -> Self {
		Self(bytes)
	}
}

impl fmt::Display for Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0 {
			write!(f, "{byte:02x}")?;
		}
		Ok(())
	}
}

impl fmt::Debug for Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Digest({self})")
	}
}
