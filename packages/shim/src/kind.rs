//! The two record kinds the shim wraps.

use std::fmt;

/// Which record a future was built from.
///
/// The kind decides the reserved-name rule, which interceptor is installed
/// in development mode, and how the record is named in messages.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum RecordKind {
    /// Route (dynamic segment) parameters.
    Params,
    /// Query string parameters.
    SearchParams,
}

impl RecordKind {
    /// The name call sites use for the record (`params`, `searchParams`).
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Params => "params",
            RecordKind::SearchParams => "searchParams",
        }
    }

    /// Singular noun for one field of the record (`param`, `searchParam`).
    pub fn field_noun(self) -> &'static str {
        match self {
            RecordKind::Params => "param",
            RecordKind::SearchParams => "searchParam",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
