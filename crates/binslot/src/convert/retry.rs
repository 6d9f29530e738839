use std::num::NonZeroU32;

/// How many times a short payload read is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetryPolicy {
	/// At most this many attempts, then fail with [`ShortRead`][crate::error::Error::ShortRead].
	Limited(NonZeroU32),

	/// Retry until a full read succeeds.
	///
	/// A source that never yields a full payload blocks the run forever.
	Unbounded,
}

impl RetryPolicy {
	/// Attempts made by the default policy.
	pub const DEFAULT_ATTEMPTS: u32 = 8;

	/// Policy from an attempt count, where zero means unbounded.
	pub fn from_attempts(attempts: u32) -> Self {
		NonZeroU32::new(attempts).map_or(Self::Unbounded, Self::Limited)
	}

	/// Maximum number of attempts, if there is one.
	pub fn max_attempts(self) -> Option<u32> {
		match self {
			Self::Limited(max) => Some(max.get()),
			Self::Unbounded => None,
		}
	}

	/// Whether another attempt may follow the given (1-based) attempt.
	pub fn allows_after(self, attempt: u32) -> bool {
		match self {
			Self::Limited(max) => attempt < max.get(),
			Self::Unbounded => true,
		}
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::from_attempts(Self::DEFAULT_ATTEMPTS)
	}
}
