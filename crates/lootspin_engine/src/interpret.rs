use std::sync::Arc;

use lootspin_core::{interpret_body, SpinOutcome};
use lootspin_logging::wallet_warn;
use serde_json::Value;

use crate::raw_log::ResultLogger;
use crate::{ProgressSink, SessionEvent, TransportError};

/// Turns one transport result into a [`SpinOutcome`], feeding raw
/// successful bodies to the configured loggers on the way.
#[derive(Default)]
pub struct ResponseInterpreter {
    loggers: Vec<Arc<dyn ResultLogger>>,
}

impl ResponseInterpreter {
    pub fn new(loggers: Vec<Arc<dyn ResultLogger>>) -> Self {
        Self { loggers }
    }

    pub async fn interpret(
        &self,
        wallet: &str,
        response: Result<Value, TransportError>,
        sink: &dyn ProgressSink,
    ) -> SpinOutcome {
        match response {
            Ok(body) => {
                let outcome = interpret_body(&body);
                if outcome.is_success() {
                    self.log_raw(wallet, &body, sink).await;
                }
                outcome
            }
            Err(err) => {
                wallet_warn!(wallet, "spin request failed: {}", err);
                sink.emit(SessionEvent::Progress(format!("Error spinning box: {err}")));
                SpinOutcome::transport_failure(err.payload.as_ref(), &err.to_string())
            }
        }
    }

    // Logging failures are reported and otherwise ignored. File appends run
    // on the blocking pool.
    async fn log_raw(&self, wallet: &str, body: &Value, sink: &dyn ProgressSink) {
        for logger in &self.loggers {
            let logger = Arc::clone(logger);
            let record = body.clone();
            let result = tokio::task::spawn_blocking(move || logger.append(&record))
                .await
                .map_err(|err| err.to_string())
                .and_then(|appended| appended.map_err(|err| err.to_string()));
            if let Err(err) = result {
                wallet_warn!(wallet, "raw result logging failed: {}", err);
                sink.emit(SessionEvent::Progress(format!(
                    "Error logging to file: {err}"
                )));
            }
        }
    }
}
