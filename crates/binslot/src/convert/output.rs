use std::{
	fs::{self, File},
	io::{Result, Write},
	path::Path,
};

use tracing::{debug, warn};

/// A container file being written.
///
/// Unless [committed](PendingOutput::commit), the file is removed when this is dropped, so a
/// failed write never leaves a partial container behind.
#[derive(Debug)]
pub(crate) struct PendingOutput<'p> {
	path: &'p Path,
	file: File,
	committed: bool,
}

impl<'p> PendingOutput<'p> {
	/// Create (or truncate) the output file.
	pub fn create(path: &'p Path) -> Result<Self> {
		Ok(Self {
			path,
			file: File::create(path)?,
			committed: false,
		})
	}

	/// Flush and keep the file.
	pub fn commit(mut self) -> Result<()> {
		self.file.flush()?;
		self.committed = true;
		Ok(())
	}
}

impl Write for PendingOutput<'_> {
	fn write(&mut self, buf: &[u8]) -> Result<usize> {
		self.file.write(buf)
	}

	fn flush(&mut self) -> Result<()> {
		self.file.flush()
	}
}

impl Drop for PendingOutput<'_> {
	fn drop(&mut self) {
		if self.committed {
			return;
		}

		debug!(path=?self.path, "remove partial output");
		if let Err(err) = fs::remove_file(self.path) {
			warn!(path=?self.path, %err, "could not remove partial output");
		}
	}
}
