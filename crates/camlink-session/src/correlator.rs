//! Single-slot correlation between a capture request and its resolution.

use camlink_ipc::CameraResult;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{CorrelatorError, SessionError};

/// Outcome of one capture session.
///
/// `Ok(Some(_))` is a delivered result, `Ok(None)` a cancellation of any
/// kind, `Err(_)` an export failure.
pub type SessionOutcome = Result<Option<CameraResult>, SessionError>;

/// Binds the single in-flight capture session to the channel that must
/// eventually receive its outcome.
///
/// The termination signal arrives from an external surface, decoupled in
/// time and call stack from the request that started the session. The
/// correlator is the only component allowed to bridge that gap: the
/// host's pending call is settled exactly once, and a duplicate or late
/// signal is swallowed instead of delivered twice.
#[derive(Debug, Default)]
pub struct SessionCorrelator {
    slot: Mutex<Option<oneshot::Sender<SessionOutcome>>>,
}

impl SessionCorrelator {
    /// Creates an idle correlator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the next session and returns the receiver the host
    /// awaits.
    ///
    /// Errors while another session is pending; the previous caller's
    /// channel is never silently overwritten.
    pub fn register(&self) -> Result<oneshot::Receiver<SessionOutcome>, CorrelatorError> {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(CorrelatorError::AlreadyPending);
        }
        let (sender, receiver) = oneshot::channel();
        *slot = Some(sender);
        debug!("session registered");
        Ok(receiver)
    }

    /// Delivers the outcome of the pending session and returns the
    /// correlator to idle.
    ///
    /// Returns `false` when no session is pending; redundant platform
    /// lifecycle signals end up here and are dropped.
    pub fn resolve(&self, outcome: SessionOutcome) -> bool {
        let Some(sender) = self.slot.lock().take() else {
            debug!("no session pending, dropping termination signal");
            return false;
        };
        // Send only fails if the host stopped awaiting; the slot is
        // cleared either way.
        let delivered = sender.send(outcome).is_ok();
        debug!(delivered, "session resolved");
        delivered
    }

    /// True when no session is pending.
    pub fn is_idle(&self) -> bool {
        self.slot.lock().is_none()
    }
}
