//! Record encoding to Borsh-style bytes and JSON text.
//!
//! ```ignore
//! use duoser::{borsh, json, Record};
//!
//! #[derive(Record, Debug, PartialEq)]
//! struct Arrays {
//!     #[duoser(rename = "u32Arr")]
//!     u32_arr: Vec<u32>,
//!     #[duoser(rename = "i32Arr")]
//!     i32_arr: Vec<i32>,
//! }
//!
//! let value = Arrays { u32_arr: vec![42, 11], i32_arr: vec![] };
//!
//! assert_eq!(json::to_string(&value)?, r#"{"u32Arr":[42,11],"i32Arr":[]}"#);
//! assert_eq!(borsh::from_slice::<Arrays>(&borsh::to_vec(&value)?)?, value);
//! ```

pub use duoser_core::{
    borsh, consts, json, ByteBuf, Bytes, Decode, Decoder, Encode, Encoder, Error, SerDeResult,
};

/// Trait and derive macro share a name, like serde's `Serialize`.
pub use duoser_core::Record;
pub use duoser_macros::Record;
