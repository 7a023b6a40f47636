//! Error types for the core layer.

/// Errors raised while building records.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A record can only be built from a keyed object.
    #[error("expected an object to build a record from, found {found}")]
    NotAnObject { found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_an_object_display() {
        let e = Error::NotAnObject { found: "array" };
        assert_eq!(
            e.to_string(),
            "expected an object to build a record from, found array"
        );
    }
}
