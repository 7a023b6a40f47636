//! paramshim: route and query parameters as resolved futures
//!
//! During a migration from synchronous to awaited parameter access, the same
//! record has to work both ways:
//! - new code awaits it: `let params = future.await;`
//! - legacy code still reads fields off it: `future.get("slug")`
//!
//! [`ParamsScope::wrap_route_params`] and [`ParamsScope::wrap_query_params`]
//! build a [`FutureRecord`] that is already fulfilled with the record and also
//! carries the record's fields as its own. In [`Mode::Development`] every
//! legacy read, existence check and enumeration is reported as a
//! [`Diagnostic`] through the configured [`DiagnosticSink`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use paramshim::{MemorySink, ParamsScope, ShimConfig};
//! use paramshim_core::UnderlyingRecord;
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut scope = ParamsScope::new(ShimConfig::development().with_sink(sink.clone()));
//!
//! let record = UnderlyingRecord::from_pairs([("slug", "hello")]).into_shared();
//! let params = scope.wrap_route_params(&record)?;
//!
//! assert_eq!(params.get("slug").and_then(|slot| slot.as_str()), Some("hello"));
//! assert_eq!(sink.len(), 1);
//! # Ok::<(), paramshim::Error>(())
//! ```

pub mod cache;
mod config;
mod diagnostic;
mod error;
mod future;
mod intercept;
mod kind;
mod names;
pub mod project;
mod scope;

pub use config::{Mode, ShimConfig, MODE_ENV_VAR};
pub use diagnostic::{
    Diagnostic, DiagnosticSink, LogSink, MemorySink, NullSink, DEPRECATION_TARGET,
};
pub use error::Error;
pub use future::{FieldAccess, FutureRecord, FutureStatus, Intrinsic, Slot};
pub use kind::RecordKind;
pub use names::describe_list_of_property_names;
pub use scope::ParamsScope;

// Re-export core types for convenience
pub use paramshim_core::{PropertyKey, Symbol, UnderlyingRecord, Value};
