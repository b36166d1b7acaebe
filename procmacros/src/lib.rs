#![recursion_limit = "128"]

extern crate proc_macro;

mod paths;
mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Implements `Record` and `Model` for a struct with named fields.
///
/// Every field becomes a readable attribute under its own name, converted with
/// `ToValue`. Relations are held as `Arc<T>` or `Option<Arc<T>>` and marked so
/// the model descriptor knows which fields can be joined.
///
/// # Attributes
///
/// - `#[record(model = "Banquet")]` on the struct: model name (defaults to the struct name)
/// - `#[record(display = "name")]` on the struct: field rendered when the object is a cell value
/// - `#[record(relation = "Event")]`: many-to-one relation
/// - `#[record(one_to_one = "Profile")]`: one-to-one relation
/// - `#[record(one_to_many = "Post")]`, `#[record(many_to_many = "Tag")]`: collections
/// - `#[record(skip)]`: not readable and not described
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Record)]
/// #[record(display = "name")]
/// struct Room {
///     name: String,
/// }
///
/// #[derive(Debug, Record)]
/// struct Event {
///     date: String,
///     #[record(relation = "Room")]
///     room: Option<Arc<Room>>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match record::generate_record_impl(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
