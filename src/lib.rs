//! Encoding/decoding and hashing primitives behind the `codec` CLI.
//!
//! Every algorithm except Base58 dispatches into an ecosystem crate; the
//! Base58 codec in [`base58`] is the only hand-written conversion.

pub mod base58;
pub mod encode;
pub mod hash;
pub mod logger;
pub mod util;
