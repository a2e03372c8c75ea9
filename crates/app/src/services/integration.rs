//! Integration lifecycle: setup, background polling, host readiness, teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use vcontrol_domain::error::{SetupStage, VControlError};
use vcontrol_domain::sensor::SensorDescriptor;

use super::coordinator::RefreshCoordinator;
use super::poller::Poller;
use super::sensor_catalogue::SensorCatalogueLoader;
use super::sensor_view::SensorView;
use crate::ports::{CatalogueStore, EventPublisher, HeatPumpApi};

/// One configured heat pump, from setup to teardown.
///
/// `setup` must succeed before sensors are exposed: a device that cannot be
/// reached at that point yields no sensors at all.
pub struct VControlIntegration<H, S, P> {
    loader: SensorCatalogueLoader<Arc<H>>,
    coordinator: Arc<RefreshCoordinator<Arc<H>, S, P>>,
    descriptors: Option<Arc<[SensorDescriptor]>>,
    poll_interval: Duration,
    shutdown: watch::Sender<bool>,
    poll_handle: Option<JoinHandle<()>>,
}

impl<H, S, P> VControlIntegration<H, S, P>
where
    H: HeatPumpApi + Send + Sync + 'static,
    S: CatalogueStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    pub fn new(api: H, store: S, publisher: P, poll_interval: Duration) -> Self {
        let api = Arc::new(api);
        let (shutdown, _) = watch::channel(false);
        Self {
            loader: SensorCatalogueLoader::new(Arc::clone(&api)),
            coordinator: Arc::new(RefreshCoordinator::new(api, store, publisher)),
            descriptors: None,
            poll_interval,
            shutdown,
            poll_handle: None,
        }
    }

    /// Load the declared sensors, then run the first refresh.
    ///
    /// # Errors
    ///
    /// Fails with [`VControlError::Setup`] naming the stage that failed.
    /// Nothing is exposed in that case and the host may retry later.
    pub async fn setup(&mut self) -> Result<SensorView, VControlError> {
        let descriptors = self
            .loader
            .load()
            .await
            .map_err(|err| err.during_setup(SetupStage::LoadSensors))?;

        self.coordinator
            .refresh()
            .await
            .map_err(|err| err.during_setup(SetupStage::FirstRefresh))?;

        tracing::info!(sensors = descriptors.len(), "integration set up");
        let descriptors: Arc<[SensorDescriptor]> = descriptors.into();
        self.descriptors = Some(Arc::clone(&descriptors));
        Ok(SensorView::new(descriptors, self.coordinator.subscribe()))
    }

    /// Start the fixed-interval poller. Calling it twice is a no-op.
    pub fn start_background(&mut self) {
        if self.poll_handle.is_some() {
            tracing::debug!("poller already running");
            return;
        }
        self.shutdown.send_replace(false);
        self.poll_handle = Some(Poller::start(
            Arc::clone(&self.coordinator),
            self.poll_interval,
            self.shutdown.subscribe(),
        ));
    }

    /// The host finished starting: refresh once more so consumers see values
    /// and drift right away.
    ///
    /// # Errors
    ///
    /// Returns the refresh error; the snapshot is already marked stale.
    pub async fn on_host_ready(&self) -> Result<(), VControlError> {
        self.coordinator.refresh().await.map(|_| ())
    }

    /// Sensors exposed after a successful setup.
    #[must_use]
    pub fn sensors(&self) -> Option<SensorView> {
        self.descriptors.as_ref().map(|descriptors| {
            SensorView::new(Arc::clone(descriptors), self.coordinator.subscribe())
        })
    }

    /// Stop the poller and wait for an in-flight refresh to finish.
    pub async fn teardown(&mut self) {
        self.shutdown.send_replace(true);
        if let Some(handle) = self.poll_handle.take()
            && let Err(err) = handle.await
        {
            tracing::error!(%err, "poller task ended abnormally");
        }
        tracing::info!("integration torn down");
    }
}
