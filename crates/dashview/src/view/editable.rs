//! Lazily loaded editing capability.
//!
//! The editing support for views is heavy and only needed in edit mode, so
//! it is loaded on demand the first time a view updates while editing. A
//! load succeeds at most once; failures are logged and retried on a later
//! update.

use std::fmt;

use parking_lot::Mutex;

use dashview_core::logging::targets;

/// Error returned by a [`CapabilityLoader`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load {capability}: {message}")]
pub struct LoadError {
    pub capability: String,
    pub message: String,
}

impl LoadError {
    /// Create a load error.
    pub fn new(capability: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            message: message.into(),
        }
    }
}

/// Loads a capability on demand.
pub trait CapabilityLoader: Send + Sync {
    /// Load the capability.
    fn load(&self) -> Result<(), LoadError>;
}

impl<F> CapabilityLoader for F
where
    F: Fn() -> Result<(), LoadError> + Send + Sync,
{
    fn load(&self) -> Result<(), LoadError> {
        self()
    }
}

/// Loader for capabilities that are always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoader;

impl CapabilityLoader for NoopLoader {
    fn load(&self) -> Result<(), LoadError> {
        Ok(())
    }
}

/// Load progress of a [`LazyCapability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
    /// Every attempt so far failed.
    Failed { attempts: u32 },
}

/// A capability loaded at most once, on first use.
pub struct LazyCapability {
    name: &'static str,
    loader: Box<dyn CapabilityLoader>,
    state: Mutex<LoadState>,
}

impl LazyCapability {
    /// Name of the editable-view capability.
    pub const EDITABLE_VIEW: &'static str = "editable-view";

    /// Create an unloaded capability.
    pub fn new(name: &'static str, loader: impl CapabilityLoader + 'static) -> Self {
        Self {
            name,
            loader: Box::new(loader),
            state: Mutex::new(LoadState::NotLoaded),
        }
    }

    /// The editable-view capability backed by `loader`.
    pub fn editable_view(loader: impl CapabilityLoader + 'static) -> Self {
        Self::new(Self::EDITABLE_VIEW, loader)
    }

    /// Capability name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        *self.state.lock()
    }

    /// Whether a load succeeded.
    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Load the capability unless already loaded.
    ///
    /// Never fails; a failed load is logged and leaves the capability
    /// unloaded so the next call tries again.
    pub fn ensure_loaded(&self) {
        if self.is_loaded() {
            return;
        }

        // The loader runs without the lock held.
        let result = self.loader.load();
        let mut state = self.state.lock();
        match result {
            Ok(()) => {
                *state = LoadState::Loaded;
                tracing::debug!(
                    target: targets::VIEW,
                    capability = self.name,
                    "capability loaded"
                );
            }
            Err(err) => {
                let attempts = match *state {
                    LoadState::Failed { attempts } => attempts + 1,
                    _ => 1,
                };
                *state = LoadState::Failed { attempts };
                tracing::debug!(
                    target: targets::VIEW,
                    capability = self.name,
                    attempts,
                    %err,
                    "capability load failed"
                );
            }
        }
    }
}

impl fmt::Debug for LazyCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCapability")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
