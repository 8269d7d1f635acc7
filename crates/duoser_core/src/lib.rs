//! Type-directed encoding of in-memory values to Borsh-style bytes and JSON text.
//!
//! One set of [Encode]/[Decode] impls drives both formats. Which handler runs
//! is decided by the compiler from the static type, so neither format embeds
//! type tags, and decoding relies on the caller asking for the type that was
//! written.
//!
//! Records join in through the [Record] bridge, usually derived with
//! `#[derive(Record)]` from the `duoser` crate.

pub mod borsh;
pub mod consts;
mod dispatch;
mod err;
pub mod json;

#[cfg(test)]
mod proptest_tests;

pub use dispatch::{Decode, Decoder, Encode, Encoder, Record};
pub use err::{Error, SerDeResult};

/// Raw byte payloads, written as base64 in text form.
pub use serde_bytes::{ByteBuf, Bytes};
