//! Mount-point resolution
//!
//! A configuration may carry its render target directly or defer to a
//! provider that yields one, possibly asynchronously (e.g. waiting on a
//! readiness signal). Target creation semantics live outside this crate;
//! here a mount point is an opaque descriptor.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

/// Errors from mount-point resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("mount target unavailable: {0}")]
    Unavailable(String),
}

/// An opaque render-target descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountPoint {
    /// A fresh, empty container owned by the host.
    Detached,
    /// A lookup key the surrounding system resolves at render time.
    Selector(String),
}

/// Producer of a mount point, awaited during resolution.
pub type MountProvider =
    Arc<dyn Fn() -> BoxFuture<'static, Result<MountPoint, MountError>> + Send + Sync>;

/// A mount target in either its resolved or deferred form.
#[derive(Clone)]
pub enum MountSource {
    /// An already-resolved target.
    Target(MountPoint),
    /// A provider awaited during resolution.
    Provider(MountProvider),
}

impl MountSource {
    /// A provider yielding a fresh detached container.
    pub fn detached() -> Self {
        MountSource::Provider(Arc::new(|| Box::pin(async { Ok(MountPoint::Detached) })))
    }

    /// An already-resolved selector target.
    pub fn selector(selector: impl Into<String>) -> Self {
        MountSource::Target(MountPoint::Selector(selector.into()))
    }

    /// Resolve to a concrete mount point, awaiting the provider if needed.
    ///
    /// A provider failure propagates unmodified. No retry and no timeout;
    /// the caller owns timeout policy.
    pub async fn resolve(&self) -> Result<MountPoint, MountError> {
        match self {
            MountSource::Target(point) => Ok(point.clone()),
            MountSource::Provider(provider) => provider().await,
        }
    }
}

impl fmt::Debug for MountSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountSource::Target(point) => f.debug_tuple("Target").field(point).finish(),
            MountSource::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}
