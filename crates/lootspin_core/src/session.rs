use std::fmt;
use std::time::Duration;

use crate::outcome::{FailureKind, SpinOutcome};
use crate::settings::SpinSettings;
use crate::stats::{SessionReport, SessionStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Running,
    StoppedByLimit,
    StoppedByBalance,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Running)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The previous attempt is fully processed and its waits have elapsed.
    NextAttempt,
    /// Result of the attempt requested by the last `Effect::Spin`.
    SpinCompleted(SpinOutcome),
}

/// Work requested by [`update`], to be carried out in order by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notice),
    Spin { attempt: u32 },
    Wait(Duration),
    /// Emitted exactly once, when the session reaches a terminal state.
    Finish(SessionReport),
}

/// Human-readable progress for one session.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    AttemptStarted { attempt: u32 },
    SpinSucceeded { item_count: usize },
    SpinFailed { message: String },
    BalanceStop,
    Waiting { interval: Duration },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AttemptStarted { attempt } => {
                write!(f, "[Spin #{attempt}] Attempting to spin box...")
            }
            Notice::SpinSucceeded { item_count } => {
                write!(f, "Spin successful! Received {item_count} items.")
            }
            Notice::SpinFailed { message } => write!(f, "Spin failed: {message}"),
            Notice::BalanceStop => write!(f, "Insufficient balance detected. Stopping bot."),
            Notice::Waiting { interval } => write!(
                f,
                "Waiting {} seconds before next spin...",
                interval.as_secs_f64()
            ),
        }
    }
}

/// State of one spin session: its wallet, settings and running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    wallet: String,
    settings: SpinSettings,
    stats: SessionStats,
    state: SessionState,
    in_flight: Option<u32>,
}

impl SpinSession {
    pub fn new(wallet: impl Into<String>, settings: SpinSettings) -> Self {
        Self {
            wallet: wallet.into(),
            settings,
            stats: SessionStats::new(),
            state: SessionState::Running,
            in_flight: None,
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn report(&self) -> SessionReport {
        self.stats.report(&self.wallet)
    }

    fn stop(&mut self, state: SessionState) -> Effect {
        self.state = state;
        Effect::Finish(self.report())
    }

    fn apply_outcome(&mut self, outcome: SpinOutcome) -> Vec<Effect> {
        let interval = self.settings.spin_interval;
        let mut effects = Vec::with_capacity(4);

        match outcome {
            SpinOutcome::Success { items } => {
                self.stats.record_success(&items, self.settings.price);
                effects.push(Effect::Notify(Notice::SpinSucceeded {
                    item_count: items.len(),
                }));
            }
            SpinOutcome::Failure { kind, message } => {
                effects.push(Effect::Notify(Notice::SpinFailed { message }));
                match kind {
                    FailureKind::Transport => {
                        effects.push(Effect::Wait(self.settings.transport_backoff()));
                    }
                    FailureKind::BalanceExhausted => {
                        effects.push(Effect::Notify(Notice::BalanceStop));
                        effects.push(self.stop(SessionState::StoppedByBalance));
                        return effects;
                    }
                    FailureKind::Other => {}
                }
            }
        }

        effects.push(Effect::Notify(Notice::Waiting { interval }));
        effects.push(Effect::Wait(interval));
        effects
    }
}

/// Pure update function: applies a message to a session and returns the
/// effects the driver must execute.
///
/// Messages that arrive after the session stopped, or a `SpinCompleted`
/// without a pending attempt, are ignored.
pub fn update(mut session: SpinSession, msg: Msg) -> (SpinSession, Vec<Effect>) {
    if session.state.is_terminal() {
        return (session, Vec::new());
    }

    let effects = match msg {
        Msg::NextAttempt => {
            if session.in_flight.is_some() {
                Vec::new()
            } else if session.stats.spin_count() >= session.settings.max_spins {
                vec![session.stop(SessionState::StoppedByLimit)]
            } else {
                let attempt = session.stats.begin_attempt();
                session.in_flight = Some(attempt);
                vec![
                    Effect::Notify(Notice::AttemptStarted { attempt }),
                    Effect::Spin { attempt },
                ]
            }
        }
        Msg::SpinCompleted(outcome) => match session.in_flight.take() {
            Some(_) => session.apply_outcome(outcome),
            None => Vec::new(),
        },
    };

    (session, effects)
}
