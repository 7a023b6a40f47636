//! Request scope: the entry points for wrapping records.
//!
//! A [`ParamsScope`] lives as long as one request. It owns one identity
//! cache per record kind, so futures are shared within the request and
//! never leak into another. Ending the scope drops every cached future.

use std::collections::HashMap;
use std::sync::Arc;

use paramshim_core::{RecordId, UnderlyingRecord};

use crate::cache::IdentityCache;
use crate::future::FutureTarget;
use crate::intercept::{Interceptor, QueryInterceptor, RouteInterceptor};
use crate::project::project;
use crate::{Error, FutureRecord, RecordKind, ShimConfig};

/// Per-request wrapping context.
#[derive(Debug)]
pub struct ParamsScope {
    config: ShimConfig,
    route: IdentityCache,
    query: IdentityCache,
}

impl ParamsScope {
    pub fn new(config: ShimConfig) -> Self {
        Self {
            config,
            route: IdentityCache::new(RecordKind::Params),
            query: IdentityCache::new(RecordKind::SearchParams),
        }
    }

    /// Scope configured from the environment (see [`ShimConfig::from_env`]).
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(ShimConfig::from_env()?))
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// Wrap route parameters.
    ///
    /// Returns the same instance for every call with the same record.
    /// `then`, `status` and `value` are never copied onto the future.
    ///
    /// # Errors
    ///
    /// Only on a broken internal invariant.
    pub fn wrap_route_params(
        &mut self,
        record: &Arc<UnderlyingRecord>,
    ) -> Result<FutureRecord, Error> {
        wrap(&self.config, &mut self.route, record)
    }

    /// Wrap query parameters.
    ///
    /// Returns the same instance for every call with the same record.
    /// Fields named like a member of the future are not copied onto it.
    ///
    /// # Errors
    ///
    /// Only on a broken internal invariant.
    pub fn wrap_query_params(
        &mut self,
        record: &Arc<UnderlyingRecord>,
    ) -> Result<FutureRecord, Error> {
        wrap(&self.config, &mut self.query, record)
    }

    /// Forget futures nobody outside the scope can reach any more.
    ///
    /// A record wrapped as both kinds is held once by each cached future, so
    /// both are discounted before deciding whether anyone else holds it.
    pub fn sweep(&mut self) -> usize {
        let mut cached_refs: HashMap<RecordId, usize> = HashMap::new();
        for id in self.route.ids().chain(self.query.ids()) {
            *cached_refs.entry(id).or_default() += 1;
        }
        let refs = |id: RecordId| cached_refs.get(&id).copied().unwrap_or(1);
        self.route.sweep_shared(refs) + self.query.sweep_shared(refs)
    }

    /// Number of cached futures for `kind`.
    pub fn cached(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Params => self.route.len(),
            RecordKind::SearchParams => self.query.len(),
        }
    }

    /// End the request, dropping every cached future.
    pub fn end(mut self) {
        log::debug!(
            "ending params scope with {} route and {} query futures cached",
            self.route.len(),
            self.query.len()
        );
        self.route.clear();
        self.query.clear();
    }
}

impl Default for ParamsScope {
    fn default() -> Self {
        Self::new(ShimConfig::default())
    }
}

fn wrap(
    config: &ShimConfig,
    cache: &mut IdentityCache,
    record: &Arc<UnderlyingRecord>,
) -> Result<FutureRecord, Error> {
    if let Some(future) = cache.get(record) {
        return Ok(future);
    }

    let kind = cache.kind();
    let mut target = FutureTarget::resolved(kind, Arc::clone(record));
    let classification = project(&mut target);

    let interceptor = if config.mode().is_development() {
        let sink = Arc::clone(config.sink());
        let interceptor: Box<dyn Interceptor> = match kind {
            RecordKind::Params => Box::new(RouteInterceptor::new(classification, sink)?),
            RecordKind::SearchParams => Box::new(QueryInterceptor::new(classification, sink)),
        };
        Some(interceptor)
    } else {
        None
    };

    let future = FutureRecord::new(target, interceptor);
    cache.insert(record, future.clone());
    Ok(future)
}
