//! Argument schemas and the binder that resolves them.
//!
//! A command declares an [`ArgumentSchema`]; [`bind`] turns raw tokens plus
//! defaults into [`Arguments`] before the command runs.

mod binder;
mod schema;
mod value;

pub use binder::{Binding, ExplicitValues, bind, build_parser, resolve};
pub use schema::{ArgumentSchema, DefaultFn, DefaultRule, FieldKind, FieldSpec};
pub use value::{Arguments, Value};
