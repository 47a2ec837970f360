//! Session lifecycle for the camlink camera bridge.
//!
//! This crate owns the request/response correlation core: it derives an
//! engine configuration from validated settings, launches the external
//! capture surface, and routes the surface's eventual termination signal
//! back onto the host's single pending call, exactly once.

mod config;
mod correlator;
mod dispatcher;
mod error;
mod launcher;
mod surface;

pub use config::{CaptureMode, CaptureRequest, EngineConfiguration};
pub use correlator::{SessionCorrelator, SessionOutcome};
pub use dispatcher::{CompletionDispatcher, ResultTransform};
pub use error::{CorrelatorError, LaunchError, SessionError};
pub use launcher::CaptureLauncher;
pub use surface::{CompletionHandle, SurfaceBuilder, Termination};
