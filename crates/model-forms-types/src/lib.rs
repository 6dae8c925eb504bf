//! # model-forms-types
//!
//! The vocabulary shared by every model-forms crate:
//!
//! - [`FieldValue`] - the tagged value stored for one property while a form is open
//! - [`DeclaredType`] / [`TypeFacts`] - raw type facts a model reports about its fields
//! - [`Model`] / [`FieldCodec`] / [`CaseSet`] - compile-time schema registration traits,
//!   normally implemented by `#[derive(Model)]` and `#[derive(Enumeration)]`
//!
//! Nothing in this crate classifies types or validates values; that happens in
//! the analyzer and rule library built on top of it.

pub mod codec;
pub mod facts;
pub mod model;
pub mod value;

pub use codec::{CodecError, FieldCodec};
pub use facts::{DeclaredType, RawProperty, TypeFacts};
pub use model::{AssignError, CaseSet, Model, RelatedId};
pub use value::FieldValue;
