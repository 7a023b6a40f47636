//! Deprecation diagnostics and the sinks they are written to.
//!
//! Every diagnostic is advisory: emitting one never changes what the access
//! returns. Each access is reported every time it happens so that every call
//! site shows up on its own.

use std::fmt;
use std::sync::Mutex;

use crate::names::describe_list_of_property_names;
use crate::{Error, RecordKind};

/// Log target used by [`LogSink`].
pub const DEPRECATION_TARGET: &str = "paramshim::deprecation";

/// A legacy access that should be migrated to awaiting the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A single field was read, or its existence checked, synchronously.
    SyncAccess {
        kind: RecordKind,
        /// Source-like rendering of the access, e.g. `` `params.slug` ``.
        expression: String,
    },
    /// The record was enumerated and some fields could not be carried onto
    /// the future.
    IncompleteEnumeration {
        kind: RecordKind,
        /// Fields that are only reachable by awaiting, in record order.
        missing: Vec<String>,
        /// `missing` rendered as a phrase.
        described: String,
    },
    /// The record was enumerated and every field was carried over.
    Enumeration { kind: RecordKind },
    /// The keys of a query record were enumerated or spread.
    SyncSpread { kind: RecordKind },
}

impl Diagnostic {
    /// Pick the enumeration template for a record whose `missing` fields
    /// could not be projected.
    pub fn enumeration(kind: RecordKind, missing: &[String]) -> Result<Self, Error> {
        if missing.is_empty() {
            return Ok(Diagnostic::Enumeration { kind });
        }
        let quoted: Vec<String> = missing.iter().map(|name| format!("`{}`", name)).collect();
        Ok(Diagnostic::IncompleteEnumeration {
            kind,
            missing: missing.to_vec(),
            described: describe_list_of_property_names(&quoted)?,
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Diagnostic::SyncAccess { kind, .. }
            | Diagnostic::IncompleteEnumeration { kind, .. }
            | Diagnostic::Enumeration { kind }
            | Diagnostic::SyncSpread { kind } => *kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SyncAccess { kind, expression } => write!(
                f,
                "A {noun} property was accessed directly with {expression}. `{name}` is now a \
                 future and should be awaited before accessing properties of the underlying \
                 {name} object. Direct access to {noun} properties is still supported to ease \
                 migration, but a later release will require awaiting `{name}`. If this use is \
                 inside an async function, await it. If it is inside a synchronous function, \
                 make the function async or await `{name}` outside of it and pass the result in.",
                noun = kind.field_noun(),
                name = kind.name(),
                expression = expression,
            ),
            Diagnostic::IncompleteEnumeration {
                kind, described, ..
            } => write!(
                f,
                "{name} are being enumerated incompletely with `{{...{name}}}`, \
                 `Object.keys({name})`, or similar. The following properties were not copied: \
                 {described}. `{name}` is now a future, however direct access to the underlying \
                 {name} object is still supported to ease migration. {noun} names that conflict \
                 with future properties cannot be accessed directly and must be read by first \
                 awaiting `{name}`.",
                noun = kind.field_noun(),
                name = kind.name(),
                described = described,
            ),
            Diagnostic::Enumeration { kind } => write!(
                f,
                "{name} are being enumerated with `{{...{name}}}`, `Object.keys({name})`, or \
                 similar. `{name}` is now a future, however direct access to the underlying \
                 {name} object is still supported to ease migration. Update your code to await \
                 `{name}` before accessing its properties.",
                name = kind.name(),
            ),
            Diagnostic::SyncSpread { kind } => write!(
                f,
                "the keys of `{name}` were accessed through something like \
                 `Object.keys({name})` or `{{...{name}}}`. `{name}` is now a future and should \
                 be awaited before accessing properties of the underlying {name} object. Direct \
                 access to {noun} properties is still supported to ease migration, but a later \
                 release will require awaiting `{name}`. If this use is inside an async \
                 function, await it. If it is inside a synchronous function, make the function \
                 async or await `{name}` outside of it and pass the result in.",
                noun = kind.field_noun(),
                name = kind.name(),
            ),
        }
    }
}

/// Line-oriented channel diagnostics are written to.
///
/// Implementations must not panic; a sink that cannot record a diagnostic
/// drops it.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Writes each diagnostic as one `error` record through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::error!(target: DEPRECATION_TARGET, "{}", diagnostic);
    }
}

/// Drops every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps diagnostics in memory, in emission order.
///
/// Useful for migration tooling that wants to collect every legacy call site
/// of a request, and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Rendered messages of everything emitted so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Remove and return everything emitted so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A poisoned list is still a valid list of diagnostics.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_access_names_the_expression() {
        let d = Diagnostic::SyncAccess {
            kind: RecordKind::Params,
            expression: "`params.slug`".to_string(),
        };
        let text = d.to_string();
        assert!(text.starts_with("A param property was accessed directly with `params.slug`."));
        assert!(text.contains("await"));
    }

    #[test]
    fn search_params_wording() {
        let d = Diagnostic::SyncAccess {
            kind: RecordKind::SearchParams,
            expression: "`searchParams.page`".to_string(),
        };
        assert!(d
            .to_string()
            .starts_with("A searchParam property was accessed directly with `searchParams.page`."));
    }

    #[test]
    fn enumeration_without_omissions_is_generic() {
        let d = Diagnostic::enumeration(RecordKind::Params, &[]).unwrap();
        assert_eq!(d, Diagnostic::Enumeration { kind: RecordKind::Params });
        let text = d.to_string();
        assert!(text.contains("`{...params}`"));
        assert!(!text.contains("not copied"));
    }

    #[test]
    fn enumeration_with_omissions_lists_them() {
        let missing = vec!["then".to_string(), "value".to_string()];
        let d = Diagnostic::enumeration(RecordKind::Params, &missing).unwrap();
        let text = d.to_string();
        assert!(text.contains("incompletely"));
        assert!(text.contains("The following properties were not copied: `then` and `value`."));
    }

    #[test]
    fn spread_message() {
        let d = Diagnostic::SyncSpread {
            kind: RecordKind::SearchParams,
        };
        assert!(d
            .to_string()
            .starts_with("the keys of `searchParams` were accessed through something like"));
        assert_eq!(d.kind(), RecordKind::SearchParams);
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(&Diagnostic::Enumeration {
            kind: RecordKind::Params,
        });
        sink.emit(&Diagnostic::SyncSpread {
            kind: RecordKind::SearchParams,
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages().len(), 2);
        let taken = sink.take();
        assert_eq!(taken[0].kind(), RecordKind::Params);
        assert_eq!(taken[1].kind(), RecordKind::SearchParams);
        assert!(sink.is_empty());
    }
}
