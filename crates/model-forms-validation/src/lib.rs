//! Model-Forms-Validation Core
//!
//! Pure validation functions and the rule type built on them. Every rule is a
//! pure function of one optional [`FieldValue`]: it never mutates state, never
//! panics, and passes values outside its domain (a length rule on a number).
//!
//! ```rust
//! use model_forms_validation::{validate_all, ValidationRule};
//! use model_forms_types::FieldValue;
//!
//! let rules = [ValidationRule::Required, ValidationRule::MaxLength(5)];
//! let result = validate_all(&rules, Some(&FieldValue::from("too long")));
//! assert_eq!(result.message(), Some("Maximum length is 5"));
//! ```

pub mod custom;
pub mod date;
pub mod numeric;
pub mod result;
pub mod rule;
pub mod string;

pub use custom::{FnValidator, Validator};
pub use date::{distant_future, distant_past};
pub use result::{combine, ValidationResult};
pub use rule::{validate_all, ValidationRule};

pub use model_forms_types::FieldValue;
