//! Common types defining the binary format structures.

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::container::*;
#[doc(inline)]
pub use self::digest::*;

mod constants;
mod container;
mod digest;
