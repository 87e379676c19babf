use std::sync::Arc;

use lootspin_core::{
    update, CredentialTriple, Effect, Msg, SessionReport, SpinOutcome, SpinSession, SpinSettings,
};
use lootspin_logging::{engine_debug, engine_trace};

use crate::client::{SpinRequest, SpinTransport};
use crate::interpret::ResponseInterpreter;
use crate::sleep::Sleeper;
use crate::{ProgressSink, SessionEvent};

/// Drives one [`SpinSession`] to completion by executing its effects.
#[derive(Clone)]
pub struct SessionRunner {
    transport: Arc<dyn SpinTransport>,
    interpreter: Arc<ResponseInterpreter>,
    sleeper: Arc<dyn Sleeper>,
}

impl SessionRunner {
    pub fn new(
        transport: Arc<dyn SpinTransport>,
        interpreter: Arc<ResponseInterpreter>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            transport,
            interpreter,
            sleeper,
        }
    }

    /// Runs attempts strictly one after another until the spin limit or a
    /// balance stop, then returns the final report. The report is also
    /// emitted on `sink`, exactly once.
    pub async fn run(
        &self,
        credentials: &CredentialTriple,
        settings: SpinSettings,
        sink: &dyn ProgressSink,
    ) -> SessionReport {
        let request = SpinRequest::new(credentials, &settings);
        let mut session = SpinSession::new(credentials.wallet.clone(), settings);
        let mut msg = Msg::NextAttempt;

        loop {
            let (next, effects) = update(session, msg);
            session = next;

            let mut reply = None;
            let mut finished = None;
            for effect in effects {
                match effect {
                    Effect::Notify(notice) => sink.emit(SessionEvent::Progress(notice.to_string())),
                    Effect::Spin { attempt } => {
                        let outcome = self.spin(credentials, &request, sink).await;
                        engine_trace!(
                            "[{}] attempt {} -> {:?}",
                            credentials.wallet,
                            attempt,
                            outcome
                        );
                        reply = Some(Msg::SpinCompleted(outcome));
                    }
                    Effect::Wait(duration) => self.sleeper.sleep(duration).await,
                    Effect::Finish(report) => {
                        sink.emit(SessionEvent::Report(report.clone()));
                        finished = Some(report);
                    }
                }
            }

            if !session.is_running() {
                return finished.unwrap_or_else(|| session.report());
            }
            msg = reply.unwrap_or(Msg::NextAttempt);
        }
    }

    async fn spin(
        &self,
        credentials: &CredentialTriple,
        request: &SpinRequest,
        sink: &dyn ProgressSink,
    ) -> SpinOutcome {
        let response = self.transport.open_box(request).await;
        let outcome = self
            .interpreter
            .interpret(&credentials.wallet, response, sink)
            .await;
        if let SpinOutcome::Success { items } = &outcome {
            for item in items {
                engine_debug!("[{}] received {}", credentials.wallet, item);
            }
        }
        outcome
    }
}
