//! In-memory port implementations shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use vcontrol_domain::catalogue::Catalogue;
use vcontrol_domain::error::{DeviceError, VControlError};
use vcontrol_domain::event::{Event, EventType};
use vcontrol_domain::reading::{RawValue, Reading};

use crate::ports::{CatalogueStore, DeclaredField, EventPublisher, HeatPumpApi};

/// How a fake endpoint fails.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unreachable,
    Timeout,
    Http(u16),
}

impl Failure {
    fn into_error(self, endpoint: &str) -> VControlError {
        let endpoint = endpoint.to_string();
        match self {
            Self::Unreachable => DeviceError::Unreachable {
                endpoint,
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            },
            Self::Timeout => DeviceError::Timeout {
                endpoint,
                timeout_secs: 15,
            },
            Self::Http(status) => DeviceError::Protocol { endpoint, status },
        }
        .into()
    }
}

pub fn reading(name: &str, raw: RawValue) -> Reading {
    Reading {
        name: name.to_string(),
        raw,
    }
}

pub fn readings(values: &[(&str, f64)]) -> BTreeMap<String, Reading> {
    values
        .iter()
        .map(|(name, val)| ((*name).to_string(), reading(name, RawValue::Float(*val))))
        .collect()
}

pub fn declared(name: &str) -> DeclaredField {
    DeclaredField {
        name: name.to_string(),
        unit: None,
        measurement: None,
    }
}

/// Scriptable heat pump that counts calls per endpoint.
pub struct FakeHeatPump {
    status: Mutex<Option<Failure>>,
    readings: Mutex<Result<BTreeMap<String, Reading>, Failure>>,
    fields: Mutex<Result<Vec<DeclaredField>, Failure>>,
    pub status_calls: AtomicUsize,
    pub readings_calls: AtomicUsize,
    pub fields_calls: AtomicUsize,
}

impl FakeHeatPump {
    pub fn new(readings: BTreeMap<String, Reading>, fields: Vec<DeclaredField>) -> Self {
        Self {
            status: Mutex::new(None),
            readings: Mutex::new(Ok(readings)),
            fields: Mutex::new(Ok(fields)),
            status_calls: AtomicUsize::new(0),
            readings_calls: AtomicUsize::new(0),
            fields_calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        let fake = Self::new(BTreeMap::new(), Vec::new());
        fake.fail_status(Some(Failure::Unreachable));
        *fake.fields.lock().unwrap() = Err(Failure::Unreachable);
        fake
    }

    pub fn fail_status(&self, failure: Option<Failure>) {
        *self.status.lock().unwrap() = failure;
    }

    pub fn set_readings(&self, readings: BTreeMap<String, Reading>) {
        *self.readings.lock().unwrap() = Ok(readings);
    }

    pub fn fail_readings(&self, failure: Failure) {
        *self.readings.lock().unwrap() = Err(failure);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl HeatPumpApi for FakeHeatPump {
    fn fetch_status(&self) -> impl Future<Output = Result<(), VControlError>> + Send {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let result = match *self.status.lock().unwrap() {
            Some(failure) => Err(failure.into_error("/status")),
            None => Ok(()),
        };
        async { result }
    }

    fn fetch_all_readings(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, Reading>, VControlError>> + Send {
        self.readings_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .readings
            .lock()
            .unwrap()
            .clone()
            .map_err(|failure| failure.into_error("/commands/all"));
        async { result }
    }

    fn fetch_available_fields(
        &self,
    ) -> impl Future<Output = Result<Vec<DeclaredField>, VControlError>> + Send {
        self.fields_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .fields
            .lock()
            .unwrap()
            .clone()
            .map_err(|failure| failure.into_error("/commands"));
        async { result }
    }
}

/// Catalogue store kept in memory, with optional failing `load` and `save`.
#[derive(Default)]
pub struct InMemoryCatalogueStore {
    stored: Mutex<Catalogue>,
    fail_loads: Mutex<bool>,
    fail_saves: Mutex<bool>,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
}

impl InMemoryCatalogueStore {
    pub fn with(catalogue: Catalogue) -> Self {
        Self {
            stored: Mutex::new(catalogue),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Catalogue {
        self.stored.lock().unwrap().clone()
    }

    pub fn fail_loads(&self, fail: bool) {
        *self.fail_loads.lock().unwrap() = fail;
    }

    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }
}

impl CatalogueStore for InMemoryCatalogueStore {
    fn load(&self) -> impl Future<Output = Result<Catalogue, VControlError>> + Send {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let result = if *self.fail_loads.lock().unwrap() {
            Err(VControlError::Storage(Box::new(std::io::Error::other(
                "unsupported catalogue version 2",
            ))))
        } else {
            Ok(self.stored.lock().unwrap().clone())
        };
        async { result }
    }

    fn save(
        &self,
        catalogue: &Catalogue,
    ) -> impl Future<Output = Result<(), VControlError>> + Send {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let result = if *self.fail_saves.lock().unwrap() {
            Err(VControlError::Storage(Box::new(std::io::Error::other(
                "disk full",
            ))))
        } else {
            *self.stored.lock().unwrap() = catalogue.clone();
            Ok(())
        };
        async { result }
    }
}

/// Publisher that records every event.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<Event>>,
}

impl RecordingPublisher {
    pub fn of_type(&self, event_type: EventType) -> Vec<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.event_type == event_type)
            .cloned()
            .collect()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), VControlError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
