//! Binslot: standalone containers for decrypted PS Vita save slots.
//!
//! A decrypted save directory holds a slot metadata file (`sce_sys/sdslot.dat`) next to one raw
//! file per populated slot (`system.bin`, `data0001.bin` through `data0016.bin`). This crate
//! locates the populated slots and writes each one out as a `.binslot` container: a magic header,
//! a salted digest of the slot's embedded payload, a digest of the raw file, and the payload.
//!
//! ```no_run
//! use binslot::{ConverterConfig, Session};
//!
//! let mut session = Session::open("saves", ConverterConfig::default())?;
//! let report = session.run(&mut ())?;
//! println!("{} slots converted", report.converted().count());
//! # Ok::<(), binslot::Error>(())
//! ```

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]

pub mod blob;
pub mod convert;
pub mod error;
pub mod format;
pub mod locator;
pub mod observer;
pub mod session;
pub mod slot;

#[doc(inline)]
pub use self::{
	convert::{ConvertedSlot, Converter, ConverterConfig, RetryPolicy},
	error::{Error, Result},
	observer::Observer,
	session::{Report, Session, SlotOutcome},
	slot::SlotIndex,
};
