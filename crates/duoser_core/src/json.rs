//! JSON text codec.
//!
//! - bool: `true` / `false`
//! - 8/16/32-bit integers: bare numbers
//! - 64/128-bit integers: quoted decimal strings, `"4294967297"`
//! - floats: numbers that always keep a fraction, `0.0`
//! - strings: escaped JSON strings
//! - byte payloads: standard base64 with padding, quoted
//! - nullable: `null` or the payload itself
//! - arrays and sets: JSON arrays, sets in ascending order
//! - maps: `[{"key":K,"value":V},...]` in ascending key order
//! - records: objects with fields in declared order

mod de;
mod ser;

pub use de::JsonDecoder;
pub use ser::JsonEncoder;

use crate::dispatch::{Decode, Encode, Encoder};
use crate::err::SerDeResult;

/// Encode a value to JSON text
pub fn to_string<T: Encode + ?Sized>(value: &T) -> SerDeResult<String> {
    let mut encoder = JsonEncoder::new();
    value.encode(&mut encoder)?;

    let text = encoder.finish();
    log::trace!("json: encoded {} chars", text.len());

    Ok(text)
}

/// Decode a value from JSON text
pub fn from_str<T: Decode>(s: &str) -> SerDeResult<T> {
    let mut decoder = JsonDecoder::parse(s)?;
    let value = T::decode(&mut decoder)?;

    log::trace!("json: decoded {} chars", s.len());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap, HashSet};
    use std::fmt::Debug;

    use super::*;

    /// Performs an encode-decode loop through text
    fn ser_de_loop<T: Debug + PartialEq + Encode + Decode>(input: T) {
        let _ = pretty_env_logger::try_init();

        let text = to_string(&input).unwrap();
        log::debug!("text: {}", text);

        let des: T = from_str(&text).unwrap();
        assert_eq!(des, input);
    }

    #[test]
    fn test_ser_de_scalars() {
        ser_de_loop(true);
        ser_de_loop(i32::MIN);
        ser_de_loop(u64::MAX);
        ser_de_loop(i64::MIN);
        ser_de_loop(u128::MAX);
        ser_de_loop(0.0_f32);
        ser_de_loop(-1.5e-7_f64);
        ser_de_loop(String::new());
        ser_de_loop("tab\tquote\"".to_string());
    }

    #[test]
    fn test_ser_de_collections() {
        ser_de_loop(vec![vec!["Hello".to_string()], vec!["World".to_string()]]);
        ser_de_loop(Vec::<i32>::new());
        ser_de_loop(HashSet::from(["b".to_string(), "a".to_string()]));
        ser_de_loop(HashMap::from([(3_u64, vec![1_u8]), (1, vec![])]));
        ser_de_loop(vec![Some(10_000_000_000_u64), None]);
    }

    #[test]
    fn test_set_text_is_sorted() {
        let set = BTreeSet::from([10_000_000_000_u64, 100_000_000_000]);
        assert_eq!(
            to_string(&set).unwrap(),
            r#"["10000000000","100000000000"]"#
        );
    }

    #[test]
    fn test_unsorted_text_set_rejected() {
        assert!(from_str::<BTreeSet<u8>>("[2,1]").is_err());
    }
}
