mod record;

/// Derives the record bridge for a struct with named fields.
///
/// Generates `Record`, `Encode` and `Decode` from the `duoser` crate. Fields
/// are written and read in declaration order.
///
/// ```ignore
/// use duoser::Record;
///
/// #[derive(Record)]
/// struct Base {
///     #[duoser(rename = "u32Arr")]
///     u32_arr: Vec<u32>,
/// }
///
/// /// A composed record. Fields of `base` are always emitted first,
/// /// then `x`, wherever the `base` field is declared.
/// #[derive(Record)]
/// struct Extends {
///     x: Vec<bool>,
///     #[duoser(base)]
///     base: Base,
/// }
/// ```
///
/// Field attributes:
/// - `#[duoser(rename = "name")]`: the field name used in the text format
/// - `#[duoser(base)]`: the field holds the base record of a composed record.
///   At most one per struct.
#[proc_macro_derive(Record, attributes(duoser))]
pub fn derive_record(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(item as syn::DeriveInput);

    record::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
