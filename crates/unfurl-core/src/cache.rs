//! Response cache seam.
//!
//! The orchestrator only consults [`ResponseCache`]; the server wires in
//! [`MemoryCache`], one-shot CLI lookups use [`NoCache`].

use anyhow::Result;
use http::{HeaderMap, Response, StatusCode};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Identity of a cacheable request. Responses echo the caller's origin, so the
/// origin is part of the key alongside the full request URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub uri: String,
    pub origin: String,
}

/// Owned copy of a response, cheap to clone out of a cache.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl StoredResponse {
    pub fn from_response(response: &Response<String>) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            body: response.body().clone(),
        }
    }

    pub fn into_response(self) -> Response<String> {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

pub trait ResponseCache: Send + Sync {
    fn lookup(&self, key: &CacheKey) -> Option<StoredResponse>;
    fn store(&self, key: CacheKey, response: StoredResponse) -> Result<()>;
}

/// Never hits; discards stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    fn lookup(&self, _key: &CacheKey) -> Option<StoredResponse> {
        None
    }

    fn store(&self, _key: CacheKey, _response: StoredResponse) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    expires: Instant,
    response: StoredResponse,
}

/// Map plus insertion order. Every live map entry has exactly one queue
/// record carrying its `seq`; older records for a re-stored key are stale.
#[derive(Debug, Default)]
struct Inner {
    map: HashMap<CacheKey, Entry>,
    order: VecDeque<(CacheKey, u64)>,
    next_seq: u64,
}

impl Inner {
    fn pop_oldest(&mut self) {
        if let Some((key, seq)) = self.order.pop_front() {
            if self.map.get(&key).is_some_and(|e| e.seq == seq) {
                self.map.remove(&key);
            }
        }
    }

    fn front_expired(&self, now: Instant) -> bool {
        match self.order.front() {
            Some((key, seq)) => match self.map.get(key) {
                Some(entry) if entry.seq == *seq => entry.expires <= now,
                _ => true,
            },
            None => false,
        }
    }
}

/// In-process cache with a fixed per-entry lifetime and an entry cap.
///
/// All entries share one TTL, so insertion order is expiry order: eviction
/// only ever looks at the front of the queue.
#[derive(Debug)]
pub struct MemoryCache {
    ttl: Duration,
    max_entries: usize,
    inner: Mutex<Inner>,
}

impl MemoryCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ResponseCache for MemoryCache {
    fn lookup(&self, key: &CacheKey) -> Option<StoredResponse> {
        let mut inner = self.lock();
        match inner.map.get(key) {
            Some(entry) if entry.expires > Instant::now() => Some(entry.response.clone()),
            Some(_) => {
                inner.map.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: CacheKey, response: StoredResponse) -> Result<()> {
        if self.max_entries == 0 {
            return Ok(());
        }
        let now = Instant::now();
        let mut inner = self.lock();
        while inner.front_expired(now) {
            inner.pop_oldest();
        }
        while inner.order.len() >= self.max_entries {
            inner.pop_oldest();
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.order.push_back((key.clone(), seq));
        inner.map.insert(
            key,
            Entry {
                seq,
                expires: now + self.ttl,
                response,
            },
        );
        Ok(())
    }
}
