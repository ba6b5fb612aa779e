use std::fmt::{self, Debug, Display, Formatter};

use thiserror::Error;

use crate::Pooled;

/// A configuration rejected at pool construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool must be allowed to hold at least one resource.
    #[error("pool capacity must be at least 1")]
    ZeroCapacity,
}

/// An error during resource acquisition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    /// Every slot is checked out. This is ordinary backpressure, not a
    /// fault: retry after a release, queue, or fail the request.
    #[error("all {capacity} resources are checked out")]
    Exhausted {
        /// The pool's configured capacity.
        capacity: usize,
    },
    /// The pool has been shut down and will never hand out a resource
    /// again.
    #[error("pool has been shut down")]
    Closed,
}

/// A resource handed to [`Pool::release`] or [`Pool::detach`] that the
/// pool did not issue.
///
/// Carries the rejected handle so the resource is not torn down by a
/// pool it never belonged to; recover it with
/// [`into_resource`](ReleaseError::into_resource).
///
/// [`Pool::release`]: crate::Pool::release
/// [`Pool::detach`]: crate::Pool::detach
pub struct ReleaseError<R> {
    resource: Pooled<R>,
}

impl<R> ReleaseError<R> {
    pub(crate) fn new(resource: Pooled<R>) -> Self {
        ReleaseError { resource }
    }

    /// Recovers the rejected handle.
    pub fn into_resource(self) -> Pooled<R> {
        self.resource
    }
}

impl<R> Debug for ReleaseError<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ReleaseError")
    }
}

impl<R> Display for ReleaseError<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "resource was not issued by this pool or the pool has shut down")
    }
}

impl<R> std::error::Error for ReleaseError<R> {}
