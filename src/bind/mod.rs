//! Conversion between documents and statically-typed application objects.
//!
//! Rust has no runtime reflection, so the capability query - "enumerate
//! bindable members with their declared classification and target key" -
//! is answered by the types themselves: a [`Bindable`] type returns its
//! [`FieldBinding`] records, each carrying the JSON key, the declared
//! classification (where [`JsonType::Any`](crate::value::JsonType::Any)
//! means "infer from the declared shape"), a [`FieldKind`] describing the
//! field's native shape including container element descriptors, and a
//! pair of mechanical accessors that lift the field to or store it from a
//! [`FieldValue`].
//!
//! The accessors do no conversion work. Classification, inference, numeric
//! narrowing, lenient fallbacks, null propagation, and container assembly
//! all live in [`marshal`] and [`Unmarshaller`], so every bindable type
//! gets identical semantics.
//!
//! "Automatic binding" is the style in which every field is declared with
//! [`FieldBinding::auto`]: classification inferred, JSON key equal to the
//! field name. Explicit classifications and key overrides use
//! [`FieldBinding::classified`].

mod field;
mod marshal;
mod unmarshal;

pub use field::{Bindable, FieldBinding, FieldKind, FieldValue, Getter, NumberKind, Setter};
pub use marshal::marshal;
pub use unmarshal::{unmarshal, Unmarshaller};
