use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use crate::{AcquireError, ConfigError, Lifecycle, Pooled, ReleaseError};

/// Distinguishes pools from one another so a handle cannot be released
/// into a pool that never issued it.
static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(0);

/// A bounded pool of reusable resources.
///
/// The pool tracks two disjoint sets: idle resources ready to be handed
/// out, and checked-out resources identified by the [`Pooled`] handles
/// holding them. The lifecycle `L` is consulted at every transition:
/// `create` when the pool grows, `validate` and `on_acquire` on the way
/// out, `on_release` on the way back in, and `destroy` when a resource
/// leaves the pool for good.
///
/// Resources are created lazily, one per [`acquire`](Pool::acquire) that
/// finds no usable idle resource, and never beyond `capacity` live at
/// once. The pool is single-owner and never blocks; an exhausted pool
/// reports backpressure through [`AcquireError::Exhausted`].
pub struct Pool<L: Lifecycle<R>, R> {
    lifecycle: L,
    available: Vec<R>,
    in_use: HashSet<u64>,
    live: usize,
    capacity: usize,
    closed: bool,
    id: u64,
    next_key: u64,
    stats: PoolStats,
}

impl<L: Lifecycle<R>, R> Pool<L, R> {
    /// Creates a new pool with a given capacity and lifecycle.
    ///
    /// No resources are created up front; the pool fills on demand.
    /// Rejects a capacity of zero.
    pub fn new(capacity: usize, lifecycle: L) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Pool {
            lifecycle,
            available: Vec::with_capacity(capacity),
            in_use: HashSet::with_capacity(capacity),
            live: 0,
            capacity,
            closed: false,
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            next_key: 0,
            stats: PoolStats::default(),
        })
    }

    /// Checks out a resource.
    ///
    /// Idle resources are considered most-recently-returned first. Each
    /// candidate is run through `validate`; failures are destroyed on
    /// the spot, freeing their slot, so an exhausted-looking pool can
    /// still succeed when stale idle entries are reclaimed. When no
    /// usable idle resource remains and the pool is below capacity, a
    /// new resource is created. `on_acquire` runs on every resource
    /// handed out, reused or fresh.
    ///
    /// A panic escaping a hook propagates to the caller; the resource
    /// in flight is dropped during unwinding and its slot may stay
    /// counted against capacity until [`shutdown`](Pool::shutdown).
    pub fn acquire(&mut self) -> Result<Pooled<R>, AcquireError> {
        if self.closed {
            return Err(AcquireError::Closed);
        }
        while let Some(mut value) = self.available.pop() {
            if self.lifecycle.validate(&value) {
                self.lifecycle.on_acquire(&mut value);
                self.stats.reused += 1;
                return Ok(self.check_out(value));
            }
            self.live -= 1;
            self.stats.invalidated += 1;
            self.stats.destroyed += 1;
            trace!(live = self.live, "destroying idle resource that failed validation");
            self.lifecycle.destroy(value);
        }
        if self.live >= self.capacity {
            return Err(AcquireError::Exhausted {
                capacity: self.capacity,
            });
        }
        let mut value = self.lifecycle.create();
        self.live += 1;
        self.stats.created += 1;
        debug!(live = self.live, capacity = self.capacity, "created new resource");
        self.lifecycle.on_acquire(&mut value);
        Ok(self.check_out(value))
    }

    /// Returns a checked-out resource to the pool.
    ///
    /// Fails without touching pool state if the handle was issued by a
    /// different pool or the pool has shut down since; the rejected
    /// handle rides back inside the error. On success `on_release` runs
    /// and the resource rejoins the idle set, ready for reuse. A release
    /// never creates or destroys a resource and never blocks.
    pub fn release(&mut self, resource: Pooled<R>) -> Result<(), ReleaseError<R>> {
        if resource.pool_id() != self.id || !self.in_use.remove(&resource.key()) {
            return Err(ReleaseError::new(resource));
        }
        let mut value = resource.into_value();
        self.lifecycle.on_release(&mut value);
        self.available.push(value);
        trace!(available = self.available.len(), "resource returned to pool");
        Ok(())
    }

    /// Permanently removes a checked-out resource from the pool and
    /// hands back the bare value.
    ///
    /// The resource stops counting against capacity and the `destroy`
    /// hook does not run; from here on the value is entirely the
    /// caller's. Fails like [`release`](Pool::release) for a handle the
    /// pool did not issue.
    pub fn detach(&mut self, resource: Pooled<R>) -> Result<R, ReleaseError<R>> {
        if resource.pool_id() != self.id || !self.in_use.remove(&resource.key()) {
            return Err(ReleaseError::new(resource));
        }
        self.live -= 1;
        Ok(resource.into_value())
    }

    /// Shuts the pool down, destroying every idle resource.
    ///
    /// Resources still checked out cannot be reached from here; their
    /// holders own them. They are disowned instead: a warning is logged
    /// and any later `release` or `detach` of their handles fails.
    /// After shutdown the pool holds nothing, counts nothing live, and
    /// every `acquire` fails with [`AcquireError::Closed`]. Calling
    /// `shutdown` again is a no-op.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if !self.in_use.is_empty() {
            warn!(
                outstanding = self.in_use.len(),
                "pool shut down with resources still checked out"
            );
            self.in_use.clear();
        }
        let idle = mem::take(&mut self.available);
        self.stats.destroyed += idle.len() as u64;
        for value in idle {
            self.lifecycle.destroy(value);
        }
        self.live = 0;
        debug!("pool shut down");
    }

    /// Gets the number of idle resources ready to be handed out.
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Gets the number of resources currently checked out.
    pub fn in_use(&self) -> usize {
        self.in_use.len()
    }

    /// Gets the number of live resources, idle and checked out together.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Gets the maximum number of live resources the pool will allow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks whether the pool has no idle resources.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Checks whether the pool has been shut down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Gets a snapshot of the pool's cumulative counters.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    fn check_out(&mut self, value: R) -> Pooled<R> {
        let key = self.next_key;
        self.next_key += 1;
        self.in_use.insert(key);
        Pooled::new(value, key, self.id)
    }
}

/// Shuts the pool down on drop, so idle resources always get their
/// `destroy` hook.
impl<L: Lifecycle<R>, R> Drop for Pool<L, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<L: Lifecycle<R>, R> fmt::Debug for Pool<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("available", &self.available.len())
            .field("in_use", &self.in_use.len())
            .field("live", &self.live)
            .field("capacity", &self.capacity)
            .field("closed", &self.closed)
            .finish()
    }
}

/// Cumulative counters for a pool's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Resources created.
    pub created: u64,
    /// Resources destroyed, whether by failed validation or shutdown.
    pub destroyed: u64,
    /// Acquisitions served from the idle set instead of a fresh create.
    pub reused: u64,
    /// Idle resources destroyed because they failed validation.
    pub invalidated: u64,
}
