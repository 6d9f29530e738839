//! Slot Converter: turns one located slot into a container file.

use std::{
	fs::{self, File},
	io::{Read, Seek, Write},
	path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, trace, warn};

use crate::{
	blob::MetadataBlob,
	error::{Error, Result, VerifyField},
	format::{
		Container, Digest, CONTAINER_MAGIC, CONTAINER_SUFFIX, MAGIC_LEN, META_SALT, PAYLOAD_LEN,
		SALT_LEN,
	},
	observer::Observer,
	slot::SlotIndex,
};

pub use self::retry::RetryPolicy;

use self::output::PendingOutput;

mod output;
mod retry;

/// Converter settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
	/// Magic written at the start of every container.
	pub magic: [u8; MAGIC_LEN],

	/// Salt hashed after the payload for the metadata digest.
	pub salt: [u8; SALT_LEN],

	/// How persistently to retry short payload reads.
	pub retry: RetryPolicy,

	/// Re-read each container after writing it and check it against its sources.
	pub verify: bool,
}

impl Default for ConverterConfig {
	fn default() -> Self {
		Self {
			magic: CONTAINER_MAGIC,
			salt: META_SALT,
			retry: RetryPolicy::default(),
			verify: false,
		}
	}
}

/// A slot that was converted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedSlot {
	/// Which slot.
	pub slot: SlotIndex,

	/// Raw slot file that was hashed.
	pub raw: PathBuf,

	/// Container file that was written.
	pub output: PathBuf,

	/// Digest of payload and salt.
	pub meta_digest: Digest,

	/// Digest of the raw slot file.
	pub data_digest: Digest,

	/// How many reads it took to get the full payload.
	pub attempts: u32,
}

/// Converter context.
#[derive(Clone, Debug, Default)]
pub struct Converter {
	config: ConverterConfig,
}

impl Converter {
	/// New converter with the given settings.
	pub fn new(config: ConverterConfig) -> Self {
		Self { config }
	}

	/// The converter's settings.
	pub fn config(&self) -> &ConverterConfig {
		&self.config
	}

	/// Container path for a raw slot file: the raw file name with `slot` appended.
	pub fn output_path(raw: &Path) -> PathBuf {
		let mut name = raw.as_os_str().to_owned();
		name.push(CONTAINER_SUFFIX);
		name.into()
	}

	/// Convert a slot.
	///
	/// Reads the payload from the metadata file, hashes it with the salt, hashes the raw slot file,
	/// and writes the container next to the raw file, replacing any previous one.
	#[instrument(level = "debug", skip(self, blob, observer))]
	pub fn convert<R: Read + Seek>(
		&self,
		blob: &mut MetadataBlob<R>,
		slot: SlotIndex,
		raw: &Path,
		observer: &mut impl Observer,
	) -> Result<ConvertedSlot> {
		let (payload, attempts) = self.read_payload(blob, slot, observer)?;

		let meta_digest = Digest::of_payload(&payload, &self.config.salt);
		debug!(%meta_digest, "hashed payload");

		let data_digest = {
			let mut file = File::open(raw)?;
			Digest::of_reader(&mut file)?
		};
		debug!(%data_digest, "hashed raw slot file");

		let output = Self::output_path(raw);
		let container = Container::new(self.config.magic, meta_digest, data_digest, payload);
		Self::write_container(&output, &container)?;
		info!(?output, "wrote container");

		let converted = ConvertedSlot {
			slot,
			raw: raw.to_owned(),
			output,
			meta_digest,
			data_digest,
			attempts,
		};

		if self.config.verify {
			self.verify_or_discard(&converted)?;
		}

		Ok(converted)
	}

	/// Read a full payload region, retrying short reads as the policy allows.
	///
	/// Returns the payload and the number of attempts it took.
	fn read_payload<R: Read + Seek>(
		&self,
		blob: &mut MetadataBlob<R>,
		slot: SlotIndex,
		observer: &mut impl Observer,
	) -> Result<([u8; PAYLOAD_LEN], u32)> {
		let mut payload = [0; PAYLOAD_LEN];
		let mut best = 0;
		let mut attempt: u32 = 0;

		loop {
			attempt = attempt.saturating_add(1);
			let read = blob.read_payload(slot, &mut payload)?;
			if read == PAYLOAD_LEN {
				trace!(%attempt, "read full payload");
				return Ok((payload, attempt));
			}

			best = best.max(read);
			let retry = self.config.retry.allows_after(attempt);
			warn!(%slot, %attempt, %read, %retry, "short read of slot payload");
			observer.short_read(slot, attempt, read, retry);

			if !retry {
				return Err(Error::ShortRead {
					slot,
					read: best,
					attempts: attempt,
				});
			}
		}
	}

	#[instrument(level = "trace", skip(container))]
	fn write_container(path: &Path, container: &Container) -> Result<()> {
		let bytes = container.serialise()?;
		let mut output = PendingOutput::create(path)?;
		output.write_all(&bytes)?;
		output.commit()?;
		Ok(())
	}

	/// Re-read a written container and check it against its raw file and this converter's
	/// settings.
	#[instrument(level = "debug", skip(self))]
	pub fn verify(&self, converted: &ConvertedSlot) -> Result<Container> {
		let fail = |field| Error::Verify {
			path: converted.output.clone(),
			field,
		};

		let container =
			Container::read_from(&mut File::open(&converted.output)?, &self.config.magic)?;
		if !container.verify_meta(&self.config.salt) {
			return Err(fail(VerifyField::MetaDigest));
		}

		if !container.verify_data(&mut File::open(&converted.raw)?)? {
			return Err(fail(VerifyField::DataDigest));
		}

		debug!("container verified");
		Ok(container)
	}

	/// [Verify](Self::verify) a written container, removing it if it fails.
	fn verify_or_discard(&self, converted: &ConvertedSlot) -> Result<Container> {
		self.verify(converted).map_err(|err| {
			warn!(output=?converted.output, %err, "remove container that failed verification");
			if let Err(rm) = fs::remove_file(&converted.output) {
				warn!(output=?converted.output, err=%rm, "could not remove container");
			}
			err
		})
	}
}
