//! Host-facing module for the camlink camera bridge.
//!
//! Exposes the native capture SDK to a JavaScript host through a single
//! asynchronous call. The host passes untyped settings and metadata; the
//! bridge validates them, launches a capture session, and suspends the
//! call until the external capture surface reports a terminal state.

mod error;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use camlink_ipc::{map_from_json, CameraResult, CameraSettings, MetadataMap};
use camlink_session::{
    CaptureLauncher, CompletionDispatcher, SessionCorrelator, SessionError, SurfaceBuilder,
};

pub use error::BridgeError;

/// The name under which the host registers the bridge.
pub const MODULE_NAME: &str = "CamlinkCamera";

/// Initialize logging.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camlink_bridge=debug,camlink_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// The camera bridge.
///
/// One instance serves one host module and allows a single capture
/// session in flight at a time.
pub struct CameraBridge {
    correlator: Arc<SessionCorrelator>,
    launcher: CaptureLauncher,
}

/// Builder for [`CameraBridge`].
///
/// The surface builder is the platform UI collaborator and is required.
/// The override and result-transform hooks are optional and fixed for
/// the bridge's lifetime; there is no ambient global configuration.
pub struct CameraBridgeBuilder {
    surface: Arc<dyn SurfaceBuilder>,
    override_builder: Option<Arc<dyn SurfaceBuilder>>,
    result_transform: Option<Arc<camlink_session::ResultTransform>>,
}

impl CameraBridge {
    /// Starts building a bridge over the given capture surface.
    pub fn builder(surface: impl SurfaceBuilder + 'static) -> CameraBridgeBuilder {
        CameraBridgeBuilder {
            surface: Arc::new(surface),
            override_builder: None,
            result_transform: None,
        }
    }

    /// Opens the camera.
    ///
    /// Resolves with the encoded result, or `None` when the user (or the
    /// platform) dismissed the camera without a recording. `video`, when
    /// given, is the source of the video to react to. `metadata` is
    /// carried through the session and attached to the result.
    #[instrument(skip_all)]
    pub async fn open_camera(
        &self,
        settings: Option<Value>,
        video: Option<String>,
        metadata: Option<Value>,
    ) -> Result<Option<Value>, BridgeError> {
        let settings = CameraSettings::from_value(settings.as_ref())?;
        let metadata = decode_metadata(metadata.as_ref())?;

        let receiver = self.launcher.launch(&settings, video.as_deref(), metadata)?;

        match receiver.await {
            Ok(Ok(Some(result))) => {
                let encoded = result
                    .to_value()
                    .map_err(|err| BridgeError::ExportFailed(err.to_string()))?;
                Ok(Some(encoded))
            }
            Ok(Ok(None)) => Ok(None),
            Ok(Err(SessionError::ExportFailed(cause))) => {
                Err(BridgeError::ExportFailed(format!("{cause:#}")))
            }
            // The session core went away mid-flight; treat it like any
            // other teardown and report no result.
            Err(_) => {
                debug!("completion channel closed before resolution");
                Ok(None)
            }
        }
    }

    /// True when no session is in flight.
    pub fn is_idle(&self) -> bool {
        self.correlator.is_idle()
    }
}

impl CameraBridgeBuilder {
    /// Fully replaces surface construction for every session.
    pub fn surface_override(mut self, builder: impl SurfaceBuilder + 'static) -> Self {
        self.override_builder = Some(Arc::new(builder));
        self
    }

    /// Installs a hook that may replace or drop each decoded result
    /// before delivery.
    pub fn result_transform(
        mut self,
        transform: impl Fn(Option<CameraResult>) -> Option<CameraResult> + Send + Sync + 'static,
    ) -> Self {
        self.result_transform = Some(Arc::new(transform));
        self
    }

    /// Builds the bridge.
    pub fn build(self) -> CameraBridge {
        let correlator = Arc::new(SessionCorrelator::new());
        let dispatcher = Arc::new(CompletionDispatcher::new(
            Arc::clone(&correlator),
            self.result_transform,
        ));
        let mut launcher =
            CaptureLauncher::new(Arc::clone(&correlator), dispatcher, self.surface);
        if let Some(builder) = self.override_builder {
            launcher = launcher.with_override(builder);
        }
        CameraBridge {
            correlator,
            launcher,
        }
    }
}

fn decode_metadata(raw: Option<&Value>) -> Result<MetadataMap, BridgeError> {
    match raw {
        None | Some(Value::Null) => Ok(MetadataMap::new()),
        Some(value) => map_from_json(value).map_err(|err| BridgeError::Parsing(err.to_string())),
    }
}
