// model-forms Procedural Macros
// Compile-time schema registration for dynamic forms

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod enumeration;
mod model;

/// Derive macro for the `Model` trait
///
/// Generates the property list, a getter and a setter keyed by property name,
/// so a form can read and rebuild the struct without any per-type form code.
///
/// # Example
///
/// ```ignore
/// use model_forms::{Enumeration, Model, RelatedId};
/// use chrono::{DateTime, Utc};
///
/// #[derive(Default, Model)]
/// struct WorkoutRecord {
///     id: String,
///     date: DateTime<Utc>,
///     workout_type: WorkoutType,
///     start_weight_kg: Option<f64>,
///     plan: Option<RelatedId>,
///
///     #[model(text)]
///     source_ip: std::net::Ipv4Addr,
///
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Attributes
///
/// **Struct:**
/// - `#[model(name = "Workout")]` - Override the model name (defaults to the struct name)
///
/// **Field:**
/// - `#[model(skip)]` - Leave the field out of the schema
/// - `#[model(text)]` - Store a type without a `FieldCodec` through `Display` / `FromStr`
///
/// Every other field type must implement `FieldCodec`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::impl_model(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for fieldless enums used as property types
///
/// Implements `CaseSet` (case names in declaration order) and `FieldCodec`,
/// so the property is classified as an enumeration.
///
/// # Example
///
/// ```ignore
/// #[derive(Enumeration)]
/// #[enumeration(name = "WorkoutKind")]
/// enum WorkoutType {
///     Cycling,
///     Strength,
///     Flexibility,
/// }
/// ```
#[proc_macro_derive(Enumeration, attributes(enumeration))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enumeration::impl_enumeration(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
