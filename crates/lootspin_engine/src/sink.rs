use std::sync::mpsc;

use crate::{DispatchEvent, SessionEvent};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// Forwards one session's events to the dispatcher, tagged with its wallet.
pub struct ChannelProgressSink {
    wallet: String,
    tx: mpsc::Sender<DispatchEvent>,
}

impl ChannelProgressSink {
    pub fn new(wallet: impl Into<String>, tx: mpsc::Sender<DispatchEvent>) -> Self {
        Self {
            wallet: wallet.into(),
            tx,
        }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: SessionEvent) {
        let _ = self.tx.send(DispatchEvent {
            wallet: self.wallet.clone(),
            event,
        });
    }
}
