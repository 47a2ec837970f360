//! Maps surface termination signals onto the host's pending call.

use std::sync::Arc;

use camlink_ipc::{CameraResult, MetadataMap};
use tracing::{debug, warn};

use crate::correlator::SessionCorrelator;
use crate::error::SessionError;
use crate::surface::Termination;

/// Hook applied to each decoded result before delivery.
///
/// The hook may replace or augment the result; returning `None`
/// downgrades the call to cancel semantics.
pub type ResultTransform = dyn Fn(Option<CameraResult>) -> Option<CameraResult> + Send + Sync;

/// The asynchronous boundary between the capture surface and the host.
///
/// Every outcome is delivered through the correlator, never by invoking
/// the host channel directly, so at-most-once resolution holds no matter
/// how many signals the platform emits.
pub struct CompletionDispatcher {
    correlator: Arc<SessionCorrelator>,
    transform: Option<Arc<ResultTransform>>,
}

impl CompletionDispatcher {
    /// Creates a dispatcher delivering through `correlator`, with an
    /// optional result-transform hook.
    pub fn new(correlator: Arc<SessionCorrelator>, transform: Option<Arc<ResultTransform>>) -> Self {
        Self {
            correlator,
            transform,
        }
    }

    /// Converts a termination signal into a session outcome and delivers
    /// it, attaching the originating request's metadata on success.
    pub fn dispatch(&self, termination: Termination, metadata: MetadataMap) {
        let outcome = match termination {
            Termination::Finished(output) => {
                let result = CameraResult { output, metadata };
                let result = match &self.transform {
                    Some(transform) => transform(Some(result)),
                    None => Some(result),
                };
                Ok(result)
            }
            Termination::Cancelled => {
                debug!("capture cancelled by the user");
                Ok(None)
            }
            Termination::Aborted => {
                debug!("capture surface went away without a result");
                Ok(None)
            }
            Termination::ExportFailed(cause) => {
                warn!(error = %cause, "capture artifact export failed");
                Err(SessionError::ExportFailed(cause))
            }
        };
        if !self.correlator.resolve(outcome) {
            debug!("duplicate termination signal ignored");
        }
    }
}
