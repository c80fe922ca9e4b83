//! MentorPoolCache - TTL cache in front of the mentor source.
//!
//! The live source is consulted at most once per TTL window. When it fails
//! or returns nothing, the static fallback pool is served instead and the
//! next request retries the source.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::foundation::{MentorId, Timestamp};
use crate::domain::matching::Mentor;
use crate::ports::{Clock, MentorSource};

/// Default time a loaded pool stays fresh.
pub const DEFAULT_POOL_TTL: Duration = Duration::from_secs(3600);

/// Where a served pool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolOrigin {
    Live,
    Fallback,
}

/// A mentor pool as served to one request.
#[derive(Debug, Clone)]
pub struct MentorPool {
    pub mentors: Arc<Vec<Mentor>>,
    pub origin: PoolOrigin,
    /// True when served from the cache without touching the source.
    pub cached: bool,
    /// Seconds since the live pool was loaded. Zero for fallback pools.
    pub age_secs: u64,
}

impl MentorPool {
    pub fn find(&self, id: &MentorId) -> Option<&Mentor> {
        self.mentors.iter().find(|m| &m.id == id)
    }
}

#[derive(Debug)]
struct CachedPool {
    mentors: Arc<Vec<Mentor>>,
    loaded_at: Timestamp,
}

impl CachedPool {
    fn age(&self, now: Timestamp) -> Duration {
        now.duration_since(&self.loaded_at)
            .to_std()
            .unwrap_or_default()
    }
}

/// Caches the live mentor pool for a fixed TTL.
pub struct MentorPoolCache {
    source: Arc<dyn MentorSource>,
    fallback: Arc<Vec<Mentor>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: RwLock<Option<CachedPool>>,
}

impl MentorPoolCache {
    pub fn new(
        source: Arc<dyn MentorSource>,
        fallback: Vec<Mentor>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            fallback: Arc::new(fallback),
            clock,
            ttl,
            state: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached pool, reloading it from the source once stale.
    ///
    /// Concurrent callers that find the cache stale queue on the write lock;
    /// only the first one reloads.
    pub async fn get_or_refresh(&self) -> MentorPool {
        let now = self.clock.now();

        if let Some(pool) = self.fresh(now).await {
            return pool;
        }

        let mut state = self.state.write().await;
        if let Some(cached) = state.as_ref() {
            let age = cached.age(now);
            if age < self.ttl {
                return Self::live(cached, age, true);
            }
        }

        match self.source.load_mentors().await {
            Ok(mentors) if !mentors.is_empty() => {
                info!(
                    source = self.source.name(),
                    count = mentors.len(),
                    "Mentor pool refreshed"
                );
                let cached = CachedPool {
                    mentors: Arc::new(mentors),
                    loaded_at: now,
                };
                let pool = Self::live(&cached, Duration::ZERO, false);
                *state = Some(cached);
                pool
            }
            Ok(_) => {
                warn!(
                    source = self.source.name(),
                    "Mentor source returned no mentors, serving fallback pool"
                );
                self.fallback_pool()
            }
            Err(err) => {
                warn!(
                    source = self.source.name(),
                    error = %err,
                    "Mentor source failed, serving fallback pool"
                );
                self.fallback_pool()
            }
        }
    }

    /// Drops the cached pool so the next request reloads it.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        if state.take().is_some() {
            debug!("Mentor pool cache invalidated");
        }
    }

    /// Age of the cached live pool, if one is loaded.
    pub async fn age(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.state.read().await.as_ref().map(|c| c.age(now))
    }

    async fn fresh(&self, now: Timestamp) -> Option<MentorPool> {
        let state = self.state.read().await;
        let cached = state.as_ref()?;
        let age = cached.age(now);
        (age < self.ttl).then(|| Self::live(cached, age, true))
    }

    fn live(cached: &CachedPool, age: Duration, from_cache: bool) -> MentorPool {
        MentorPool {
            mentors: Arc::clone(&cached.mentors),
            origin: PoolOrigin::Live,
            cached: from_cache,
            age_secs: age.as_secs(),
        }
    }

    fn fallback_pool(&self) -> MentorPool {
        MentorPool {
            mentors: Arc::clone(&self.fallback),
            origin: PoolOrigin::Fallback,
            cached: false,
            age_secs: 0,
        }
    }
}
