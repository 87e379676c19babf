use std::any::Any;
use std::sync::{mpsc, Arc};
use std::thread;

use futures_util::future::join_all;
use lootspin_core::{CredentialTriple, SpinSettings};
use lootspin_logging::{engine_info, engine_warn};

use crate::client::SpinTransport;
use crate::interpret::ResponseInterpreter;
use crate::session::SessionRunner;
use crate::sink::ChannelProgressSink;
use crate::sleep::Sleeper;
use crate::{DispatchEvent, SessionEvent};

/// One session to launch: its credentials and the transport bound to its
/// proxy.
pub struct SessionSpec {
    pub credentials: CredentialTriple,
    pub transport: Arc<dyn SpinTransport>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Runs every session concurrently on a background runtime and relays their
/// events.
///
/// The event stream ends once every session has completed or crashed.
pub struct EngineHandle {
    event_rx: mpsc::Receiver<DispatchEvent>,
}

impl EngineHandle {
    pub fn launch(
        sessions: Vec<SessionSpec>,
        settings: SpinSettings,
        interpreter: Arc<ResponseInterpreter>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            runtime.block_on(dispatch_all(sessions, settings, interpreter, sleeper, event_tx));
        });

        Ok(Self { event_rx })
    }

    /// Blocks until the next event; `None` once all sessions are done.
    pub fn recv(&self) -> Option<DispatchEvent> {
        self.event_rx.recv().ok()
    }
}

async fn dispatch_all(
    sessions: Vec<SessionSpec>,
    settings: SpinSettings,
    interpreter: Arc<ResponseInterpreter>,
    sleeper: Arc<dyn Sleeper>,
    event_tx: mpsc::Sender<DispatchEvent>,
) {
    engine_info!("launching {} sessions", sessions.len());

    let watchers = sessions.into_iter().map(|spec| {
        let wallet = spec.credentials.wallet.clone();
        let sink = ChannelProgressSink::new(wallet.clone(), event_tx.clone());
        let runner = SessionRunner::new(spec.transport, interpreter.clone(), sleeper.clone());
        let settings = settings.clone();
        let credentials = spec.credentials;

        let handle = tokio::spawn(async move {
            runner.run(&credentials, settings, &sink).await;
        });

        let event_tx = event_tx.clone();
        async move {
            let event = match handle.await {
                Ok(()) => SessionEvent::Completed,
                Err(err) => {
                    let reason = if err.is_panic() {
                        panic_message(err.into_panic())
                    } else {
                        err.to_string()
                    };
                    engine_warn!("session for {} crashed: {}", wallet, reason);
                    SessionEvent::Crashed(reason)
                }
            };
            let _ = event_tx.send(DispatchEvent { wallet, event });
        }
    });

    join_all(watchers).await;
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "session panicked".to_string()
    }
}
