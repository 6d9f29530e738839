//! Progress observation for a conversion run.

use crate::{convert::ConvertedSlot, error::Error, locator::SlotStatus, slot::SlotIndex};

/// Receives notifications as a run goes through the slots.
///
/// All methods default to doing nothing. `()` is the observer that ignores everything.
pub trait Observer {
	/// A located slot is about to be converted.
	fn importing(&mut self, _slot: SlotIndex) {}

	/// A payload read came back short. `retry` says whether another attempt follows.
	fn short_read(&mut self, _slot: SlotIndex, _attempt: u32, _read: usize, _retry: bool) {}

	/// A slot was converted.
	fn imported(&mut self, _converted: &ConvertedSlot) {}

	/// A slot was skipped.
	fn skipped(&mut self, _slot: SlotIndex, _status: &SlotStatus) {}

	/// Converting a slot failed; the run stops after this.
	fn failed(&mut self, _slot: SlotIndex, _error: &Error) {}
}

impl Observer for () {}
