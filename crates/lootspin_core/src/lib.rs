//! Lootspin core: item classification, spin statistics and the pure
//! per-session state machine.
mod credentials;
mod item;
mod outcome;
mod session;
mod settings;
mod stats;

pub use credentials::{
    assemble_credentials, parse_lines, CredentialError, CredentialTriple, ProxyDescriptor,
    ProxyParseError,
};
pub use item::{classify_item, Item, Rarity, RawItem, UNKNOWN_ITEM_NAME};
pub use outcome::{
    interpret_body, FailureKind, SpinOutcome, TRANSPORT_FAILURE_MARKER, UNKNOWN_ERROR_FORMAT,
};
pub use session::{update, Effect, Msg, Notice, SessionState, SpinSession};
pub use settings::SpinSettings;
pub use stats::{RarityBreakdown, SessionReport, SessionStats};
