use std::collections::BTreeMap;

use proptest::prelude::*;

use paramshim::{FutureRecord, ParamsScope, ShimConfig, UnderlyingRecord, Value};

fn config(dev: bool) -> ShimConfig {
    if dev {
        ShimConfig::development().with_sink(std::sync::Arc::new(paramshim::NullSink))
    } else {
        ShimConfig::production()
    }
}

proptest! {
    #[test]
    fn same_record_same_future(
        fields in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6),
        dev in any::<bool>(),
        rewraps in 1usize..5,
    ) {
        let mut scope = ParamsScope::new(config(dev));
        let map: BTreeMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        let record = UnderlyingRecord::from_map(map).into_shared();

        let first = scope.wrap_route_params(&record).unwrap();
        for _ in 0..rewraps {
            let again = scope.wrap_route_params(&record).unwrap();
            prop_assert!(FutureRecord::ptr_eq(&first, &again));
        }
    }

    #[test]
    fn duplicated_records_never_share(
        fields in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6),
        dev in any::<bool>(),
    ) {
        let mut scope = ParamsScope::new(config(dev));
        let map: BTreeMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        let original = UnderlyingRecord::from_map(map).into_shared();
        let copy = original.duplicate().into_shared();

        let a = scope.wrap_query_params(&original).unwrap();
        let b = scope.wrap_query_params(&copy).unwrap();
        prop_assert!(!FutureRecord::ptr_eq(&a, &b));
        prop_assert_eq!(a.value().to_map(), b.value().to_map());
    }

    #[test]
    fn projected_fields_match_the_record(
        fields in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6),
    ) {
        let mut scope = ParamsScope::new(ShimConfig::production());
        let record = UnderlyingRecord::from_map(
            fields.iter().map(|(k, v)| (k.clone(), Value::from(v.as_str()))).collect(),
        )
        .into_shared();
        let future = scope.wrap_route_params(&record).unwrap();

        for (key, value) in &fields {
            if ["then", "status", "value"].contains(&key.as_str()) {
                continue;
            }
            let slot = future.get(key);
            prop_assert_eq!(slot.and_then(|s| s.as_str()), Some(value.as_str()));
        }
    }
}
