#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lootspin_core::{CredentialTriple, SpinSettings};
use lootspin_engine::{
    ProgressSink, SessionEvent, Sleeper, SpinRequest, SpinTransport, TransportError,
};
use serde_json::{json, Value};

/// Events and sleeps of one session, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Event(SessionEvent),
    Slept(Duration),
}

#[derive(Default, Clone)]
pub struct Timeline {
    steps: Arc<Mutex<Vec<Step>>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Step> {
        self.steps.lock().unwrap().drain(..).collect()
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push(step);
    }
}

pub struct TestSink {
    timeline: Timeline,
}

impl TestSink {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: SessionEvent) {
        self.timeline.push(Step::Event(event));
    }
}

/// Records requested waits instead of sleeping.
pub struct RecordingSleeper {
    timeline: Timeline,
}

impl RecordingSleeper {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.timeline.push(Step::Slept(duration));
    }
}

/// Replays scripted responses; an empty item list once the script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<SpinRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<SpinRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpinTransport for ScriptedTransport {
    async fn open_box(&self, request: &SpinRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!([])))
    }
}

pub struct PanickingTransport;

#[async_trait::async_trait]
impl SpinTransport for PanickingTransport {
    async fn open_box(&self, _request: &SpinRequest) -> Result<Value, TransportError> {
        panic!("transport exploded");
    }
}

pub fn credentials(wallet: &str) -> CredentialTriple {
    CredentialTriple {
        wallet: wallet.to_string(),
        token: format!("{wallet}-token"),
        proxy: "user:pass@127.0.0.1:3128".parse().unwrap(),
    }
}

pub fn settings(max_spins: u32) -> SpinSettings {
    SpinSettings {
        spin_interval: Duration::from_millis(10),
        max_spins,
        quantity: 5,
        price: 5,
        log_results: true,
    }
}

pub fn progress(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Event(SessionEvent::Progress(text)) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub fn sleeps(steps: &[Step]) -> Vec<Duration> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Slept(d) => Some(*d),
            _ => None,
        })
        .collect()
}
