//! Implementation of [Decoder] for [JsonDecoder]

use base64::Engine;
use serde_json::{Map, Value};

use crate::consts;
use crate::dispatch::{Decode, Decoder, Record};
use crate::err::{Error, SerDeResult};

/// Walks a parsed JSON tree under the static type being decoded.
///
/// Every rule of [JsonEncoder](super::JsonEncoder) is reversed: quoted
/// decimals are read back as 64/128-bit integers, base64 strings as byte
/// payloads, entry arrays as maps. Record fields are looked up by name and
/// unknown fields are ignored.
pub struct JsonDecoder {
    current: Value,
    // open records, innermost last
    records: Vec<Map<String, Value>>,
}

impl JsonDecoder {
    pub fn from_value(value: Value) -> Self {
        Self {
            current: value,
            records: Vec::new(),
        }
    }

    /// Parse JSON text. Fails on malformed input before any decoding starts.
    pub fn parse(s: &str) -> SerDeResult<Self> {
        let value = serde_json::from_str(s).map_err(|e| {
            log::debug!("json: parse failure: {}", e);
            Error::from(e)
        })?;

        Ok(Self::from_value(value))
    }

    /// Takes the value under the cursor, leaving `null` behind.
    fn take(&mut self) -> Value {
        std::mem::take(&mut self.current)
    }

    fn take_string(&mut self, expected: &'static str) -> SerDeResult<String> {
        match self.take() {
            Value::String(s) => Ok(s),
            other => Err(unexpected(expected, &other)),
        }
    }

    fn take_number(&mut self, expected: &'static str) -> SerDeResult<serde_json::Number> {
        match self.take() {
            Value::Number(n) => Ok(n),
            other => Err(unexpected(expected, &other)),
        }
    }

    fn take_array(&mut self) -> SerDeResult<Vec<Value>> {
        match self.take() {
            Value::Array(items) => Ok(items),
            other => Err(unexpected("array", &other)),
        }
    }
}

/// Short description of a JSON value for error messages
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn unexpected(expected: &'static str, found: &Value) -> Error {
    let found = describe(found);
    log::debug!("json: expected {}, found {}", expected, found);
    Error::UnexpectedToken { expected, found }
}

/// Impl decode for integers written as bare JSON numbers
macro_rules! decode_bare_integer {
    ($($fn_name: ident: $num_type: ty => $as_fn: ident),*) => {
        $(
            fn $fn_name(&mut self) -> SerDeResult<$num_type> {
                let n = self.take_number("integer")?;

                n.$as_fn()
                    .and_then(|v| <$num_type>::try_from(v).ok())
                    .ok_or_else(|| Error::IntegerOutOfRange {
                        ty: stringify!($num_type),
                        value: n.to_string(),
                    })
            }
        )*
    };
}

/// Impl decode for integers written as quoted decimal strings
macro_rules! decode_quoted_integer {
    ($($fn_name: ident: $num_type: ty),*) => {
        $(
            fn $fn_name(&mut self) -> SerDeResult<$num_type> {
                let s = self.take_string("quoted integer")?;

                s.parse::<$num_type>().map_err(|_| {
                    log::debug!("json: {:?} is not a {}", s, stringify!($num_type));
                    Error::InvalidNumber(s)
                })
            }
        )*
    };
}

impl Decoder for JsonDecoder {
    fn decode_bool(&mut self) -> SerDeResult<bool> {
        match self.take() {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected("boolean", &other)),
        }
    }

    decode_bare_integer! {
        decode_u8: u8 => as_u64, decode_u16: u16 => as_u64, decode_u32: u32 => as_u64,
        decode_i8: i8 => as_i64, decode_i16: i16 => as_i64, decode_i32: i32 => as_i64
    }

    decode_quoted_integer! {
        decode_u64: u64, decode_u128: u128,
        decode_i64: i64, decode_i128: i128
    }

    fn decode_f32(&mut self) -> SerDeResult<f32> {
        self.decode_f64().map(|v| v as f32)
    }

    fn decode_f64(&mut self) -> SerDeResult<f64> {
        let n = self.take_number("number")?;

        // every parsed number has an f64 view unless arbitrary precision is enabled
        n.as_f64().ok_or_else(|| Error::InvalidNumber(n.to_string()))
    }

    fn decode_string(&mut self) -> SerDeResult<String> {
        self.take_string("string")
    }

    fn decode_bytes(&mut self) -> SerDeResult<Vec<u8>> {
        let s = self.take_string("base64 string")?;

        base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(Error::from)
    }

    // nested nullables are ambiguous in text form: `Some(None)` reads back as `None`
    fn decode_option<T: Decode>(&mut self) -> SerDeResult<Option<T>> {
        match self.take() {
            Value::Null => Ok(None),
            present => {
                self.current = present;
                T::decode(self).map(Some)
            }
        }
    }

    fn decode_seq<T: Decode>(&mut self) -> SerDeResult<Vec<T>> {
        self.take_array()?
            .into_iter()
            .map(|item| {
                self.current = item;
                T::decode(self)
            })
            .collect()
    }

    fn decode_map<K: Decode, V: Decode>(&mut self) -> SerDeResult<Vec<(K, V)>> {
        self.take_array()?
            .into_iter()
            .map(|entry| {
                let mut entry = match entry {
                    Value::Object(obj) => obj,
                    other => return Err(unexpected("map entry object", &other)),
                };

                self.current = entry
                    .remove(consts::MAP_ENTRY_KEY)
                    .ok_or(Error::MissingField(consts::MAP_ENTRY_KEY))?;
                let key = K::decode(self)?;

                self.current = entry
                    .remove(consts::MAP_ENTRY_VALUE)
                    .ok_or(Error::MissingField(consts::MAP_ENTRY_VALUE))?;
                let value = V::decode(self)?;

                Ok((key, value))
            })
            .collect()
    }

    fn decode_record<R: Record>(&mut self) -> SerDeResult<R> {
        let fields = match self.take() {
            Value::Object(obj) => obj,
            other => return Err(unexpected("object", &other)),
        };

        self.records.push(fields);
        let res = R::decode_fields(self);
        self.records.pop();

        res
    }

    fn decode_field<T: Decode>(&mut self, name: &'static str) -> SerDeResult<T> {
        let value = self
            .records
            .last_mut()
            .and_then(|fields| fields.remove(name))
            .ok_or_else(|| {
                log::debug!("json: missing field `{}`", name);
                Error::MissingField(name)
            })?;

        self.current = value;
        T::decode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: Decode>(s: &str) -> SerDeResult<T> {
        let mut decoder = JsonDecoder::parse(s)?;
        T::decode(&mut decoder)
    }

    #[test]
    fn test_quoted_wide_integers() {
        assert_eq!(decode::<u64>("\"4294967297\"").unwrap(), 4294967297);
        assert_eq!(decode::<i64>("\"-64\"").unwrap(), -64);
        assert_eq!(decode::<u128>("\"128\"").unwrap(), 128);

        // bare numbers are not accepted for wide integers
        assert!(matches!(
            decode::<u64>("5"),
            Err(Error::UnexpectedToken { .. })
        ));
        assert!(matches!(
            decode::<u64>("\"12a\""),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_narrow_integer_range() {
        assert_eq!(decode::<i8>("-128").unwrap(), i8::MIN);
        assert!(matches!(
            decode::<u8>("256"),
            Err(Error::IntegerOutOfRange { ty: "u8", .. })
        ));
        assert!(matches!(
            decode::<u16>("-1"),
            Err(Error::IntegerOutOfRange { .. })
        ));
    }

    #[test]
    fn test_base64_payload() {
        assert_eq!(
            decode::<serde_bytes::ByteBuf>("\"aGVsbG8sIHdvcmxkIQ==\"")
                .unwrap()
                .into_vec(),
            b"hello, world!"
        );
        assert!(matches!(
            decode::<serde_bytes::ByteBuf>("\"not base64!\""),
            Err(Error::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(decode::<Vec<u8>>("[1,2"), Err(Error::Json(_))));
        assert!(matches!(
            decode::<Vec<u8>>("{\"a\":1}"),
            Err(Error::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_nullables() {
        assert_eq!(decode::<Option<u32>>("null").unwrap(), None);
        assert_eq!(decode::<Option<u32>>("3").unwrap(), Some(3));
        assert_eq!(
            decode::<Vec<Option<bool>>>("[true,null]").unwrap(),
            vec![Some(true), None]
        );
    }

    #[test]
    fn test_nested_nullable_collapses() {
        // Some(None) and None share the rendering `null`
        let text = crate::json::to_string(&Some(None::<u8>)).unwrap();
        assert_eq!(text, "null");
        assert_eq!(decode::<Option<Option<u8>>>(&text).unwrap(), None);
        assert_eq!(decode::<Option<Option<u8>>>("4").unwrap(), Some(Some(4)));
    }

    #[test]
    fn test_map_entries() {
        let map = decode::<std::collections::BTreeMap<String, f32>>(
            r#"[{"key":"a","value":0.5},{"key":"b","value":1}]"#,
        )
        .unwrap();

        assert_eq!(map.get("a"), Some(&0.5));
        assert_eq!(map.get("b"), Some(&1.0));

        assert!(matches!(
            decode::<std::collections::BTreeMap<u8, u8>>(r#"[{"key":1}]"#),
            Err(Error::MissingField("value"))
        ));
    }
}
