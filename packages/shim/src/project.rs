//! Copy a record's fields onto its future.
//!
//! Route parameters skip the names the future needs for itself (`then`,
//! `status`, `value`); everything else becomes an own field of the future and
//! shadows any inherited member of the same name. Query parameters leave any
//! name the plain future already answers to alone.
//!
//! A skipped field is not lost: awaiting the future yields the record with
//! every field intact.

use std::collections::HashSet;

use crate::future::FutureTarget;
use crate::RecordKind;

/// Route parameter names that can never be shadowed by a record field.
pub const RESERVED_NAMES: [&str; 3] = ["then", "status", "value"];

/// How a record's keys fared during projection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessClassification {
    /// Keys copied onto the future.
    pub proxied: HashSet<String>,
    /// Keys left off the future, in record order.
    pub unproxied: Vec<String>,
}

impl AccessClassification {
    pub fn is_proxied(&self, key: &str) -> bool {
        self.proxied.contains(key)
    }
}

/// Project every field of the target's record onto the target.
pub(crate) fn project(target: &mut FutureTarget) -> AccessClassification {
    let record = std::sync::Arc::clone(target.record());
    let mut classification = AccessClassification::default();

    for (key, value) in record.iter() {
        let blocked = match target.kind() {
            RecordKind::Params => RESERVED_NAMES.contains(&key),
            RecordKind::SearchParams => target.has(&key.into()),
        };

        if blocked {
            classification.unproxied.push(key.to_string());
        } else {
            target.define_field(key, value.clone());
            classification.proxied.insert(key.to_string());
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramshim_core::{PropertyKey, UnderlyingRecord};

    use crate::future::Slot;

    fn projected(kind: RecordKind, pairs: &[(&str, &str)]) -> (FutureTarget, AccessClassification) {
        let record = UnderlyingRecord::from_pairs(pairs.iter().copied()).into_shared();
        let mut target = FutureTarget::resolved(kind, record);
        let classification = project(&mut target);
        (target, classification)
    }

    #[test]
    fn route_params_skip_reserved_names() {
        let (target, classification) = projected(
            RecordKind::Params,
            &[("then", "x"), ("slug", "y"), ("value", "z"), ("status", "draft")],
        );

        assert_eq!(classification.unproxied, vec!["then", "value", "status"]);
        assert!(classification.is_proxied("slug"));
        assert_eq!(target.own_keys(), vec!["status", "value", "slug"]);
        assert!(matches!(
            target.get(&PropertyKey::from("status")),
            Some(Slot::Status(_))
        ));
    }

    #[test]
    fn route_params_shadow_other_future_members() {
        let (target, classification) = projected(RecordKind::Params, &[("catch", "all")]);

        assert!(classification.is_proxied("catch"));
        assert_eq!(
            target.get(&PropertyKey::from("catch")).unwrap().as_str(),
            Some("all")
        );
    }

    #[test]
    fn query_params_leave_existing_members_alone() {
        let (target, classification) = projected(
            RecordKind::SearchParams,
            &[("catch", "all"), ("page", "2"), ("status", "open")],
        );

        assert_eq!(classification.unproxied, vec!["catch", "status"]);
        assert!(classification.is_proxied("page"));
        assert!(matches!(
            target.get(&PropertyKey::from("catch")),
            Some(Slot::Intrinsic(_))
        ));
        assert_eq!(target.own_keys(), vec!["status", "value", "page"]);
    }

    #[test]
    fn empty_record_projects_nothing() {
        let (target, classification) = projected(RecordKind::Params, &[]);
        assert!(classification.proxied.is_empty());
        assert!(classification.unproxied.is_empty());
        assert_eq!(target.own_keys(), vec!["status", "value"]);
    }
}
