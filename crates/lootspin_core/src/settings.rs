use std::time::Duration;

/// Fixed per-run spin configuration, cloned into every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinSettings {
    /// Pause between two attempts.
    pub spin_interval: Duration,
    pub max_spins: u32,
    /// Items requested per spin (`qnt`).
    pub quantity: u32,
    /// Cost of one item, also sent as `price`.
    pub price: u32,
    /// Append raw successful bodies to the raw-result log.
    pub log_results: bool,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            spin_interval: Duration::from_millis(5_000),
            max_spins: 100,
            quantity: 5,
            price: 5,
            log_results: true,
        }
    }
}

impl SpinSettings {
    /// Extra wait after a transport failure, on top of `spin_interval`.
    pub fn transport_backoff(&self) -> Duration {
        self.spin_interval * 2
    }
}
