//! Starts capture sessions against the platform surface.

use std::sync::Arc;

use camlink_ipc::{CameraSettings, MetadataMap};
use tokio::sync::oneshot;
use tracing::{debug, info};
use url::Url;

use crate::config::{CaptureMode, CaptureRequest, EngineConfiguration};
use crate::correlator::{SessionCorrelator, SessionOutcome};
use crate::dispatcher::CompletionDispatcher;
use crate::error::LaunchError;
use crate::surface::{CompletionHandle, SurfaceBuilder};

/// Starts a capture surface for each host request and wires its eventual
/// termination back to the pending call.
pub struct CaptureLauncher {
    correlator: Arc<SessionCorrelator>,
    dispatcher: Arc<CompletionDispatcher>,
    surface: Arc<dyn SurfaceBuilder>,
    override_builder: Option<Arc<dyn SurfaceBuilder>>,
}

impl CaptureLauncher {
    /// Creates a launcher presenting sessions on `surface`.
    pub fn new(
        correlator: Arc<SessionCorrelator>,
        dispatcher: Arc<CompletionDispatcher>,
        surface: Arc<dyn SurfaceBuilder>,
    ) -> Self {
        Self {
            correlator,
            dispatcher,
            surface,
            override_builder: None,
        }
    }

    /// Replaces surface construction wholesale.
    ///
    /// The override receives the full request and takes precedence over
    /// the default surface for every session.
    pub fn with_override(mut self, builder: Arc<dyn SurfaceBuilder>) -> Self {
        self.override_builder = Some(builder);
        self
    }

    /// Starts a session and returns the receiver carrying its outcome.
    ///
    /// The completion channel is registered before control passes to the
    /// surface, so a surface that terminates synchronously still resolves
    /// the right session. A malformed reaction source never reaches the
    /// surface: the call degenerates to a no-op cancel.
    pub fn launch(
        &self,
        settings: &CameraSettings,
        reaction_source: Option<&str>,
        metadata: MetadataMap,
    ) -> Result<oneshot::Receiver<SessionOutcome>, LaunchError> {
        let mode = match reaction_source {
            None => CaptureMode::Standard,
            Some(source) => match Url::parse(source) {
                Ok(url) => CaptureMode::Reaction { source: url },
                Err(err) => {
                    debug!(source, %err, "invalid reaction source, resolving with no result");
                    return Ok(resolved_empty());
                }
            },
        };

        let receiver = self.correlator.register()?;
        debug!(?mode, "launching capture session");

        let request = CaptureRequest {
            engine: EngineConfiguration::from_settings(settings),
            mode,
            metadata: metadata.clone(),
        };
        let completion = CompletionHandle::new(Arc::clone(&self.dispatcher), metadata);

        let builder = self.override_builder.as_ref().unwrap_or(&self.surface);
        info!("presenting capture surface");
        builder.present(request, completion);

        Ok(receiver)
    }
}

/// A channel already carrying "no result".
fn resolved_empty() -> oneshot::Receiver<SessionOutcome> {
    let (sender, receiver) = oneshot::channel();
    // The receiver is still alive, the send cannot fail.
    let _ = sender.send(Ok(None));
    receiver
}
