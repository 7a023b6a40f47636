//! The resolved future a record is wrapped in.
//!
//! A [`FutureRecord`] is born fulfilled: its value is the wrapped record and
//! both `status` and `value` can be inspected without awaiting. Awaiting it
//! hands back the record with no scheduling point in between.
//!
//! On top of that control surface the future carries the record's fields as
//! its own (see [`crate::project`]), so legacy code can keep reading
//! `params.slug` while new code awaits `params`.

use std::collections::BTreeMap;
use std::fmt;
use std::future::{ready, IntoFuture, Ready};
use std::sync::Arc;

use paramshim_core::{PropertyKey, Symbol, UnderlyingRecord, Value};

use crate::intercept::Interceptor;
use crate::RecordKind;

/// Settlement state of a future. Wrapped records are always fulfilled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FutureStatus {
    Fulfilled,
}

impl FutureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FutureStatus::Fulfilled => "fulfilled",
        }
    }
}

impl fmt::Display for FutureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Members every plain future answers to before any field is projected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    Then,
    Catch,
    Finally,
    Constructor,
    ToString,
    ToLocaleString,
    ValueOf,
    HasOwnProperty,
    IsPrototypeOf,
    PropertyIsEnumerable,
    ToStringTag,
}

impl Intrinsic {
    const NAMED: [Intrinsic; 10] = [
        Intrinsic::Then,
        Intrinsic::Catch,
        Intrinsic::Finally,
        Intrinsic::Constructor,
        Intrinsic::ToString,
        Intrinsic::ToLocaleString,
        Intrinsic::ValueOf,
        Intrinsic::HasOwnProperty,
        Intrinsic::IsPrototypeOf,
        Intrinsic::PropertyIsEnumerable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Then => "then",
            Intrinsic::Catch => "catch",
            Intrinsic::Finally => "finally",
            Intrinsic::Constructor => "constructor",
            Intrinsic::ToString => "toString",
            Intrinsic::ToLocaleString => "toLocaleString",
            Intrinsic::ValueOf => "valueOf",
            Intrinsic::HasOwnProperty => "hasOwnProperty",
            Intrinsic::IsPrototypeOf => "isPrototypeOf",
            Intrinsic::PropertyIsEnumerable => "propertyIsEnumerable",
            Intrinsic::ToStringTag => "[Symbol.toStringTag]",
        }
    }

    fn lookup(key: &PropertyKey) -> Option<Intrinsic> {
        match key {
            PropertyKey::String(name) => {
                Self::NAMED.into_iter().find(|i| i.name() == name.as_str())
            }
            PropertyKey::Symbol(Symbol::ToStringTag) => Some(Intrinsic::ToStringTag),
            PropertyKey::Symbol(_) => None,
        }
    }
}

/// What reading a key off a future yields.
#[derive(Clone, Debug)]
pub enum Slot<'a> {
    /// A record field (projected, or recovered from the record).
    Field(&'a Value),
    /// The `status` marker.
    Status(FutureStatus),
    /// The `value` of the future: the wrapped record.
    Resolved(&'a Arc<UnderlyingRecord>),
    /// An inherited member of the future itself.
    Intrinsic(Intrinsic),
}

impl<'a> Slot<'a> {
    /// The field value, if this slot holds one.
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Slot::Field(v) => Some(*v),
            _ => None,
        }
    }

    /// The field's string contents, if this slot holds a string field.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_str)
    }
}

/// Reads, existence checks and enumeration on a wrapped record.
///
/// The plain future answers these directly. In development mode an
/// interceptor answers instead and reports legacy access on the way.
pub trait FieldAccess {
    /// Read `key` the way `object[key]` would.
    fn read_field(&self, key: &PropertyKey) -> Option<Slot<'_>>;

    /// Check `key` the way `key in object` would.
    fn has_field(&self, key: &PropertyKey) -> bool;

    /// Own keys, the way `Reflect.ownKeys(object)` would list them.
    fn list_fields(&self) -> Vec<String>;
}

const OWN_STATUS: &str = "status";
const OWN_VALUE: &str = "value";

/// The plain projected future, before any interception.
pub(crate) struct FutureTarget {
    kind: RecordKind,
    record: Arc<UnderlyingRecord>,
    fields: Vec<(String, Value)>,
}

impl FutureTarget {
    /// Build an already-fulfilled future for `record` with no fields yet.
    pub(crate) fn resolved(kind: RecordKind, record: Arc<UnderlyingRecord>) -> Self {
        Self {
            kind,
            record,
            fields: Vec::new(),
        }
    }

    pub(crate) fn kind(&self) -> RecordKind {
        self.kind
    }

    pub(crate) fn record(&self) -> &Arc<UnderlyingRecord> {
        &self.record
    }

    /// Add an own field. Own fields shadow inherited members.
    pub(crate) fn define_field(&mut self, key: &str, value: Value) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    fn own_field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is one of the enumerable own fields.
    pub(crate) fn is_enumerable(&self, key: &str) -> bool {
        self.own_field(key).is_some()
    }

    pub(crate) fn get(&self, key: &PropertyKey) -> Option<Slot<'_>> {
        if let PropertyKey::String(name) = key {
            match name.as_str() {
                OWN_STATUS => return Some(Slot::Status(FutureStatus::Fulfilled)),
                OWN_VALUE => return Some(Slot::Resolved(&self.record)),
                _ => {}
            }
            if let Some(value) = self.own_field(name) {
                return Some(Slot::Field(value));
            }
        }
        Intrinsic::lookup(key).map(Slot::Intrinsic)
    }

    pub(crate) fn has(&self, key: &PropertyKey) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn own_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.fields.len() + 2);
        keys.push(OWN_STATUS.to_string());
        keys.push(OWN_VALUE.to_string());
        keys.extend(self.fields.iter().map(|(k, _)| k.clone()));
        keys
    }
}

impl FieldAccess for FutureTarget {
    fn read_field(&self, key: &PropertyKey) -> Option<Slot<'_>> {
        self.get(key)
    }

    fn has_field(&self, key: &PropertyKey) -> bool {
        self.has(key)
    }

    fn list_fields(&self) -> Vec<String> {
        self.own_keys()
    }
}

struct FutureInner {
    target: FutureTarget,
    interceptor: Option<Box<dyn Interceptor>>,
}

/// A resolved future over an [`UnderlyingRecord`] that also exposes the
/// record's fields synchronously.
///
/// Cloning shares the same instance; compare instances with
/// [`FutureRecord::ptr_eq`].
#[derive(Clone)]
pub struct FutureRecord {
    inner: Arc<FutureInner>,
}

impl FutureRecord {
    pub(crate) fn new(target: FutureTarget, interceptor: Option<Box<dyn Interceptor>>) -> Self {
        Self {
            inner: Arc::new(FutureInner {
                target,
                interceptor,
            }),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.inner.target.kind()
    }

    /// Always [`FutureStatus::Fulfilled`].
    pub fn status(&self) -> FutureStatus {
        FutureStatus::Fulfilled
    }

    /// The record this future resolved to.
    pub fn value(&self) -> &Arc<UnderlyingRecord> {
        self.inner.target.record()
    }

    /// Whether legacy access on this future is reported.
    pub fn is_instrumented(&self) -> bool {
        self.inner.interceptor.is_some()
    }

    /// Whether two handles are the same future instance.
    pub fn ptr_eq(a: &FutureRecord, b: &FutureRecord) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Read a string-named field (`future.name`).
    pub fn get(&self, name: &str) -> Option<Slot<'_>> {
        self.read_field(&PropertyKey::from(name))
    }

    /// Check a string-named field (`name in future`).
    pub fn has(&self, name: &str) -> bool {
        self.has_field(&PropertyKey::from(name))
    }

    /// Copy the enumerable fields out, like `{...future}`.
    ///
    /// This lists the keys and then reads each enumerable one, so in
    /// development mode it reports the enumeration and every field read.
    pub fn spread(&self) -> BTreeMap<String, Value> {
        let mut copy = BTreeMap::new();
        for key in self.list_fields() {
            if !self.inner.target.is_enumerable(&key) {
                continue;
            }
            let read = self.read_field(&PropertyKey::from(key.as_str()));
            if let Some(value) = read.and_then(|slot| slot.as_value()) {
                copy.insert(key, value.clone());
            }
        }
        copy
    }

    /// Live handles to this instance, including the one in the cache.
    pub(crate) fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl FieldAccess for FutureRecord {
    fn read_field(&self, key: &PropertyKey) -> Option<Slot<'_>> {
        let target = &self.inner.target;
        match &self.inner.interceptor {
            Some(interceptor) => interceptor.read_field(target, key),
            None => target.read_field(key),
        }
    }

    fn has_field(&self, key: &PropertyKey) -> bool {
        let target = &self.inner.target;
        match &self.inner.interceptor {
            Some(interceptor) => interceptor.has_field(target, key),
            None => target.has_field(key),
        }
    }

    fn list_fields(&self) -> Vec<String> {
        let target = &self.inner.target;
        match &self.inner.interceptor {
            Some(interceptor) => interceptor.list_fields(target),
            None => target.list_fields(),
        }
    }
}

impl IntoFuture for FutureRecord {
    type Output = Arc<UnderlyingRecord>;
    type IntoFuture = Ready<Arc<UnderlyingRecord>>;

    fn into_future(self) -> Self::IntoFuture {
        ready(Arc::clone(self.value()))
    }
}

impl IntoFuture for &FutureRecord {
    type Output = Arc<UnderlyingRecord>;
    type IntoFuture = Ready<Arc<UnderlyingRecord>>;

    fn into_future(self) -> Self::IntoFuture {
        ready(Arc::clone(self.value()))
    }
}

impl fmt::Debug for FutureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureRecord")
            .field("kind", &self.kind())
            .field("status", &self.status())
            .field("value", self.value())
            .field("instrumented", &self.is_instrumented())
            .finish()
    }
}
