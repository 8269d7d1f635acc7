//! [Encode] and [Decode] for the supported std shapes.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use serde_bytes::{ByteBuf, Bytes};

use super::{Decode, Decoder, Encode, Encoder};
use crate::err::{Error, SerDeResult};

/// Impl encode and decode for scalars that map 1:1 onto a leaf method
macro_rules! scalar_dispatch {
    ($($ty: ty => $enc_fn: ident, $dec_fn: ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
                    encoder.$enc_fn(*self)
                }
            }

            impl Decode for $ty {
                fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
                    decoder.$dec_fn()
                }
            }
        )*
    };
}

scalar_dispatch! {
    bool => encode_bool, decode_bool;

    u8 => encode_u8, decode_u8;
    u16 => encode_u16, decode_u16;
    u32 => encode_u32, decode_u32;
    u64 => encode_u64, decode_u64;
    u128 => encode_u128, decode_u128;

    i8 => encode_i8, decode_i8;
    i16 => encode_i16, decode_i16;
    i32 => encode_i32, decode_i32;
    i64 => encode_i64, decode_i64;
    i128 => encode_i128, decode_i128;

    f32 => encode_f32, decode_f32;
    f64 => encode_f64, decode_f64;
}

impl Encode for str {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_str(self)
    }
}

impl Encode for String {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_str(self)
    }
}

impl Decode for String {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        decoder.decode_string()
    }
}

// byte payloads are distinct from `Vec<u8>`, which stays an array of numbers

impl Encode for ByteBuf {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_bytes(self)
    }
}

impl Encode for Bytes {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_bytes(self)
    }
}

impl Decode for ByteBuf {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        decoder.decode_bytes().map(ByteBuf::from)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        (**self).encode(encoder)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        match self {
            Some(value) => encoder.encode_some(value),
            None => encoder.encode_none(),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        decoder.decode_option()
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_seq(self.iter())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_seq(self.iter())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        decoder.decode_seq()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_seq(self.iter())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        let items = decoder.decode_seq::<T>()?;
        let found = items.len();

        items
            .try_into()
            .map_err(|_| Error::LengthMismatch { expected: N, found })
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_seq(self.iter())
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        decoder.decode_seq().map(VecDeque::from)
    }
}

// sets and maps are written in ascending order regardless of how they were built,
// and only accepted back in that order.

/// Checks that a decoded run is strictly ascending under `key`.
fn ensure_ascending<T, K: Ord + ?Sized>(
    items: &[T],
    key: impl Fn(&T) -> &K,
    what: &'static str,
) -> SerDeResult<()> {
    match items.windows(2).all(|pair| key(&pair[0]) < key(&pair[1])) {
        true => Ok(()),
        false => {
            log::debug!("rejecting {}: not strictly ascending", what);
            Err(Error::NonCanonical(what))
        }
    }
}

impl<T: Encode + Ord, S> Encode for HashSet<T, S> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_unstable();

        encoder.encode_seq(sorted.into_iter())
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Ord + Hash,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        let items = decoder.decode_seq::<T>()?;
        ensure_ascending(&items, |item| item, "set elements")?;

        Ok(items.into_iter().collect())
    }
}

impl<T: Encode + Ord> Encode for BTreeSet<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_seq(self.iter())
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        let items = decoder.decode_seq::<T>()?;
        ensure_ascending(&items, |item| item, "set elements")?;

        Ok(items.into_iter().collect())
    }
}

impl<K: Encode + Ord, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));

        encoder.encode_map(sorted.into_iter())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Ord + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        let entries = decoder.decode_map::<K, V>()?;
        ensure_ascending(&entries, |(key, _)| key, "map keys")?;

        Ok(entries.into_iter().collect())
    }
}

impl<K: Encode + Ord, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()> {
        encoder.encode_map(self.iter())
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self> {
        let entries = decoder.decode_map::<K, V>()?;
        ensure_ascending(&entries, |(key, _)| key, "map keys")?;

        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{borsh, json};

    #[test]
    fn test_set_order_is_insertion_independent() {
        let forward: HashSet<i32> = (0..50).collect();
        let backward: HashSet<i32> = (0..50).rev().collect();

        assert_eq!(
            borsh::to_vec(&forward).unwrap(),
            borsh::to_vec(&backward).unwrap()
        );

        let as_tree: BTreeSet<i32> = (0..50).collect();
        assert_eq!(
            borsh::to_vec(&forward).unwrap(),
            borsh::to_vec(&as_tree).unwrap()
        );
    }

    #[test]
    fn test_set_sorted_numerically_not_bytewise() {
        let set = HashSet::from([256_u16, 1, 255]);

        assert_eq!(json::to_string(&set).unwrap(), "[1,255,256]");
    }

    #[test]
    fn test_map_sorted_by_key() {
        let map = HashMap::from([
            ("pear".to_string(), 3_u8),
            ("apple".to_string(), 1),
            ("fig".to_string(), 2),
        ]);

        let bytes = borsh::to_vec(&map).unwrap();
        let tree: BTreeMap<String, u8> = map.clone().into_iter().collect();

        assert_eq!(bytes, borsh::to_vec(&tree).unwrap());
        assert_eq!(borsh::from_slice::<HashMap<String, u8>>(&bytes).unwrap(), map);
    }

    #[test]
    fn test_unsorted_set_rejected() {
        // count = 2, elements 5 then 3
        let bytes = [2, 0, 0, 0, 5, 3];

        match borsh::from_slice::<BTreeSet<u8>>(&bytes) {
            Err(Error::NonCanonical(_)) => (),
            other => panic!("expected NonCanonical, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_map_key_rejected() {
        let bytes = [2, 0, 0, 0, 7, 1, 7, 2];

        assert!(matches!(
            borsh::from_slice::<HashMap<u8, u8>>(&bytes),
            Err(Error::NonCanonical(_))
        ));
    }

    #[test]
    fn test_fixed_array_length_checked() {
        let bytes = borsh::to_vec(&vec![1_u8, 2, 3]).unwrap();

        assert_eq!(borsh::from_slice::<[u8; 3]>(&bytes).unwrap(), [1, 2, 3]);
        assert!(matches!(
            borsh::from_slice::<[u8; 4]>(&bytes),
            Err(Error::LengthMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_byte_payload_differs_from_number_array() {
        let raw = b"hello, world!".to_vec();

        assert_eq!(
            borsh::to_vec(&ByteBuf::from(raw.clone())).unwrap(),
            borsh::to_vec(&raw).unwrap()
        );
        assert_eq!(
            json::to_string(&ByteBuf::from(raw.clone())).unwrap(),
            "\"aGVsbG8sIHdvcmxkIQ==\""
        );
        assert!(json::to_string(&raw).unwrap().starts_with("[104,101,"));
    }
}
