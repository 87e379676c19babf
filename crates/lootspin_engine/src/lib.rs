//! Lootspin engine: HTTP transport, raw-result logging and concurrent
//! session execution.
mod client;
mod engine;
mod input;
mod interpret;
mod raw_log;
mod session;
mod sink;
mod sleep;
mod types;

pub use client::{ClientSettings, ReqwestSpinClient, SpinRequest, SpinTransport, DEFAULT_ENDPOINT};
pub use engine::{EngineError, EngineHandle, SessionSpec};
pub use input::{load_credentials, read_lines, InputError, InputPaths, LoadedInputs};
pub use interpret::ResponseInterpreter;
pub use raw_log::{ensure_parent_dir, PersistError, RawResultLog, ResultLogger, DEFAULT_RAW_LOG};
pub use session::SessionRunner;
pub use sink::{ChannelProgressSink, ProgressSink};
pub use sleep::{Sleeper, TokioSleeper};
pub use types::{DispatchEvent, SessionEvent, TransportError, TransportFailure};
