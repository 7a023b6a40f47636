//! paramshim core: the data a wrapped record is made of
//!
//! This layer holds the plain data model shared by both record kinds:
//! - `Value`: dynamically typed field value (strings, arrays, maps...)
//! - `UnderlyingRecord`: caller-owned keyed record with a stable `RecordId`
//! - `PropertyKey`: a string field name or an engine-internal `Symbol`
//! - `describe_*`: render a property access back into source-like text
//!
//! Use this layer when you only need to build records or format access
//! expressions. The wrapping machinery lives in the `paramshim` package.
//!
//! # Example
//!
//! ```rust
//! use paramshim_core::{describe_string_property_access, UnderlyingRecord};
//!
//! let record = UnderlyingRecord::from_pairs([("slug", "hello-world")]);
//! assert_eq!(record.len(), 1);
//! assert_eq!(
//!     describe_string_property_access("params", "slug"),
//!     "`params.slug`"
//! );
//! ```

mod describe;
mod error;
mod key;
mod record;
mod value;

pub use describe::{
    describe_has_checking_string_property, describe_string_property_access,
    is_definitely_a_valid_identifier,
};
pub use error::Error;
pub use key::{PropertyKey, Symbol};
pub use record::{RecordId, UnderlyingRecord};
pub use value::Value;
