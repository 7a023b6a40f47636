//! Development-mode interceptors.
//!
//! An interceptor sits between callers and the projected future. It answers
//! every read, existence check and enumeration from the same target the
//! plain future uses, and reports the legacy ones through the sink.
//!
//! Only string-keyed accesses a user could have written are reported.
//! Symbol probes and reads of the future's own members (`then` while
//! awaiting, `status`/`value` while inspecting) stay silent.

use std::sync::Arc;

use paramshim_core::{
    describe_has_checking_string_property, describe_string_property_access, PropertyKey,
};

use crate::future::{FutureTarget, Slot};
use crate::project::AccessClassification;
use crate::{Diagnostic, DiagnosticSink, Error, RecordKind};

/// Trapped view over a projected future.
pub(crate) trait Interceptor: Send + Sync {
    fn read_field<'a>(&self, target: &'a FutureTarget, key: &PropertyKey) -> Option<Slot<'a>>;

    fn has_field(&self, target: &FutureTarget, key: &PropertyKey) -> bool;

    fn list_fields(&self, target: &FutureTarget) -> Vec<String>;
}

/// Interceptor for route parameters.
pub(crate) struct RouteInterceptor {
    classification: AccessClassification,
    enumeration: Diagnostic,
    sink: Arc<dyn DiagnosticSink>,
}

impl RouteInterceptor {
    /// The enumeration message is decided here, once, from what projection
    /// had to leave out.
    pub(crate) fn new(
        classification: AccessClassification,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, Error> {
        let enumeration = Diagnostic::enumeration(RecordKind::Params, &classification.unproxied)?;
        Ok(Self {
            classification,
            enumeration,
            sink,
        })
    }
}

impl Interceptor for RouteInterceptor {
    fn read_field<'a>(&self, target: &'a FutureTarget, key: &PropertyKey) -> Option<Slot<'a>> {
        if let PropertyKey::String(prop) = key {
            if self.classification.is_proxied(prop) || !target.has(key) {
                self.sink.emit(&Diagnostic::SyncAccess {
                    kind: RecordKind::Params,
                    expression: describe_string_property_access(RecordKind::Params.name(), prop),
                });
            }
        }
        target.get(key)
    }

    fn has_field(&self, target: &FutureTarget, key: &PropertyKey) -> bool {
        target.has(key)
    }

    fn list_fields(&self, target: &FutureTarget) -> Vec<String> {
        self.sink.emit(&self.enumeration);
        target.own_keys()
    }
}

/// Interceptor for query parameters.
pub(crate) struct QueryInterceptor {
    classification: AccessClassification,
    sink: Arc<dyn DiagnosticSink>,
}

impl QueryInterceptor {
    pub(crate) fn new(classification: AccessClassification, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            classification,
            sink,
        }
    }

    fn warn_sync_access(&self, expression: String) {
        self.sink.emit(&Diagnostic::SyncAccess {
            kind: RecordKind::SearchParams,
            expression,
        });
    }
}

impl Interceptor for QueryInterceptor {
    fn read_field<'a>(&self, target: &'a FutureTarget, key: &PropertyKey) -> Option<Slot<'a>> {
        let name = RecordKind::SearchParams.name();
        match key {
            PropertyKey::String(prop) if self.classification.is_proxied(prop) => {
                self.warn_sync_access(describe_string_property_access(name, prop));
                target.get(key)
            }
            _ if target.has(key) => target.get(key),
            PropertyKey::Symbol(_) => None,
            PropertyKey::String(prop) => {
                self.warn_sync_access(describe_string_property_access(name, prop));
                target.record().get(prop).map(Slot::Field)
            }
        }
    }

    fn has_field(&self, target: &FutureTarget, key: &PropertyKey) -> bool {
        if target.has(key) {
            return true;
        }
        match key {
            // Query records never hold symbol-keyed data.
            PropertyKey::Symbol(_) => false,
            PropertyKey::String(prop) => {
                self.warn_sync_access(describe_has_checking_string_property(
                    RecordKind::SearchParams.name(),
                    prop,
                ));
                target.record().contains_key(prop)
            }
        }
    }

    fn list_fields(&self, target: &FutureTarget) -> Vec<String> {
        self.sink.emit(&Diagnostic::SyncSpread {
            kind: RecordKind::SearchParams,
        });
        target.own_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramshim_core::{Symbol, UnderlyingRecord};

    use crate::project::project;
    use crate::MemorySink;

    fn setup(kind: RecordKind, pairs: &[(&str, &str)]) -> (FutureTarget, AccessClassification) {
        let record = UnderlyingRecord::from_pairs(pairs.iter().copied()).into_shared();
        let mut target = FutureTarget::resolved(kind, record);
        let classification = project(&mut target);
        (target, classification)
    }

    #[test]
    fn route_reads_of_projected_fields_are_reported() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::Params, &[("slug", "abc")]);
        let interceptor = RouteInterceptor::new(classification, sink.clone()).unwrap();

        let slot = interceptor.read_field(&target, &PropertyKey::from("slug"));
        assert_eq!(slot.unwrap().as_str(), Some("abc"));
        assert_eq!(
            sink.take(),
            vec![Diagnostic::SyncAccess {
                kind: RecordKind::Params,
                expression: "`params.slug`".to_string(),
            }]
        );
    }

    #[test]
    fn route_reads_of_future_members_are_silent() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::Params, &[("then", "x")]);
        let interceptor = RouteInterceptor::new(classification, sink.clone()).unwrap();

        assert!(interceptor
            .read_field(&target, &PropertyKey::from("then"))
            .is_some());
        assert!(interceptor
            .read_field(&target, &PropertyKey::from("status"))
            .is_some());
        assert!(interceptor
            .read_field(&target, &PropertyKey::from(Symbol::Iterator))
            .is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn route_reads_of_missing_fields_are_reported() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::Params, &[]);
        let interceptor = RouteInterceptor::new(classification, sink.clone()).unwrap();

        assert!(interceptor
            .read_field(&target, &PropertyKey::from("foo-bar"))
            .is_none());
        assert_eq!(
            sink.take(),
            vec![Diagnostic::SyncAccess {
                kind: RecordKind::Params,
                expression: "`params[\"foo-bar\"]`".to_string(),
            }]
        );
    }

    #[test]
    fn query_reads_of_missing_fields_fall_back_to_nothing() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::SearchParams, &[("page", "1")]);
        let interceptor = QueryInterceptor::new(classification, sink.clone());

        assert!(interceptor
            .read_field(&target, &PropertyKey::from("q"))
            .is_none());
        assert_eq!(sink.len(), 1);
        assert!(interceptor
            .read_field(&target, &PropertyKey::from(Symbol::Iterator))
            .is_none());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn query_reads_of_shadowed_fields_recover_nothing_synchronously() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::SearchParams, &[("then", "x")]);
        let interceptor = QueryInterceptor::new(classification, sink.clone());

        assert!(matches!(
            interceptor.read_field(&target, &PropertyKey::from("then")),
            Some(Slot::Intrinsic(_))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn query_existence_checks() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::SearchParams, &[("slug", "abc")]);
        let interceptor = QueryInterceptor::new(classification, sink.clone());

        assert!(interceptor.has_field(&target, &PropertyKey::from("slug")));
        assert!(interceptor.has_field(&target, &PropertyKey::from("then")));
        assert!(!interceptor.has_field(&target, &PropertyKey::from(Symbol::Iterator)));
        assert!(sink.is_empty());

        assert!(!interceptor.has_field(&target, &PropertyKey::from("missingKey")));
        assert_eq!(
            sink.take(),
            vec![Diagnostic::SyncAccess {
                kind: RecordKind::SearchParams,
                expression: "`Reflect.has(searchParams, \"missingKey\")`".to_string(),
            }]
        );
    }

    #[test]
    fn enumeration_is_reported_every_time() {
        let sink = Arc::new(MemorySink::new());
        let (target, classification) = setup(RecordKind::SearchParams, &[("a", "1")]);
        let interceptor = QueryInterceptor::new(classification, sink.clone());

        interceptor.list_fields(&target);
        interceptor.list_fields(&target);
        assert_eq!(
            sink.take(),
            vec![
                Diagnostic::SyncSpread {
                    kind: RecordKind::SearchParams
                };
                2
            ]
        );
    }
}
