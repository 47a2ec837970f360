//! The seam between the session core and the platform capture surface.

use std::fmt;
use std::sync::Arc;

use camlink_ipc::{CaptureOutput, MetadataMap};

use crate::config::CaptureRequest;
use crate::dispatcher::CompletionDispatcher;

/// Terminal signal reported by a capture surface.
#[derive(Debug)]
pub enum Termination {
    /// Capture finished and the artifact was exported.
    Finished(CaptureOutput),

    /// The user dismissed the camera without keeping a recording.
    Cancelled,

    /// The surface went away without reporting, e.g. the hosting
    /// activity was destroyed.
    Aborted,

    /// Capture succeeded but the artifact could not be finalized.
    ExportFailed(anyhow::Error),
}

/// Take-once handle through which a capture surface reports its terminal
/// state.
///
/// Dropping the handle without terminating it counts as [`Termination::Aborted`],
/// so a torn-down surface still settles the host's pending call.
pub struct CompletionHandle {
    dispatcher: Arc<CompletionDispatcher>,
    metadata: MetadataMap,
    terminated: bool,
}

impl CompletionHandle {
    pub(crate) fn new(dispatcher: Arc<CompletionDispatcher>, metadata: MetadataMap) -> Self {
        Self {
            dispatcher,
            metadata,
            terminated: false,
        }
    }

    /// Reports the terminal state of the session.
    pub fn terminate(mut self, termination: Termination) {
        self.terminated = true;
        let metadata = std::mem::take(&mut self.metadata);
        self.dispatcher.dispatch(termination, metadata);
    }

    /// Shorthand for a successful capture.
    pub fn finish(self, output: CaptureOutput) {
        self.terminate(Termination::Finished(output));
    }

    /// Shorthand for an explicit user cancellation.
    pub fn cancel(self) {
        self.terminate(Termination::Cancelled);
    }

    /// Shorthand for an export failure with an underlying cause.
    pub fn fail(self, cause: impl Into<anyhow::Error>) {
        self.terminate(Termination::ExportFailed(cause.into()));
    }
}

impl Drop for CompletionHandle {
    fn drop(&mut self) {
        if !self.terminated {
            let metadata = std::mem::take(&mut self.metadata);
            self.dispatcher.dispatch(Termination::Aborted, metadata);
        }
    }
}

impl fmt::Debug for CompletionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandle")
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

/// Builds and presents a capture surface for one request.
///
/// This is the seam through which the excluded platform UI is invoked:
/// an implementation presents its screen, lets the user record, and
/// eventually terminates the handle. Implemented for plain closures.
pub trait SurfaceBuilder: Send + Sync {
    /// Presents the capture surface for `request`.
    fn present(&self, request: CaptureRequest, completion: CompletionHandle);
}

impl<F> SurfaceBuilder for F
where
    F: Fn(CaptureRequest, CompletionHandle) + Send + Sync,
{
    fn present(&self, request: CaptureRequest, completion: CompletionHandle) {
        self(request, completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlator::SessionCorrelator;

    fn wired() -> (Arc<SessionCorrelator>, Arc<CompletionDispatcher>) {
        let correlator = Arc::new(SessionCorrelator::new());
        let dispatcher = Arc::new(CompletionDispatcher::new(Arc::clone(&correlator), None));
        (correlator, dispatcher)
    }

    #[test]
    fn test_dropped_handle_reports_abort() {
        let (correlator, dispatcher) = wired();
        let mut receiver = correlator.register().unwrap();

        drop(CompletionHandle::new(dispatcher, MetadataMap::new()));

        assert!(matches!(receiver.try_recv(), Ok(Ok(None))));
        assert!(correlator.is_idle());
    }

    #[test]
    fn test_terminated_handle_does_not_abort_on_drop() {
        let (correlator, dispatcher) = wired();
        let mut receiver = correlator.register().unwrap();

        CompletionHandle::new(dispatcher, MetadataMap::new())
            .finish(CaptureOutput::Recording { recordings: vec![] });

        assert!(matches!(receiver.try_recv(), Ok(Ok(Some(_)))));
        // Exactly one value arrived on the channel.
        assert!(receiver.try_recv().is_err());
        assert!(correlator.is_idle());
    }
}
