mod support;

use std::collections::HashMap;
use std::sync::Arc;

use lootspin_engine::{
    DispatchEvent, EngineHandle, ResponseInterpreter, SessionEvent, SessionSpec, SpinTransport,
};
use serde_json::json;
use support::{
    credentials, settings, PanickingTransport, RecordingSleeper, ScriptedTransport, Timeline,
};

fn launch(sessions: Vec<SessionSpec>, max_spins: u32) -> Vec<DispatchEvent> {
    lootspin_logging::initialize_for_tests();
    let engine = EngineHandle::launch(
        sessions,
        settings(max_spins),
        Arc::new(ResponseInterpreter::default()),
        Arc::new(RecordingSleeper::new(Timeline::new())),
    )
    .unwrap();

    let mut events = Vec::new();
    while let Some(event) = engine.recv() {
        events.push(event);
    }
    events
}

fn spec(wallet: &str, transport: Arc<dyn SpinTransport>) -> SessionSpec {
    SessionSpec {
        credentials: credentials(wallet),
        transport,
    }
}

fn by_wallet(events: Vec<DispatchEvent>) -> HashMap<String, Vec<SessionEvent>> {
    let mut grouped: HashMap<String, Vec<SessionEvent>> = HashMap::new();
    for event in events {
        grouped.entry(event.wallet).or_default().push(event.event);
    }
    grouped
}

#[test]
fn every_session_reports_and_completes() {
    let events = launch(
        vec![
            spec("w1", Arc::new(ScriptedTransport::new(Vec::new()))),
            spec(
                "w2",
                Arc::new(ScriptedTransport::new(vec![Ok(json!([{ "highlight": true }]))])),
            ),
        ],
        2,
    );
    let grouped = by_wallet(events);
    assert_eq!(grouped.len(), 2);

    for (wallet, events) in &grouped {
        assert_eq!(events.last(), Some(&SessionEvent::Completed), "{wallet}");
        let reports: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Report(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(reports.len(), 1, "{wallet}");
        assert_eq!(reports[0].wallet, *wallet);
        assert_eq!(reports[0].spin_count, 2);
    }

    let w2_report = grouped["w2"]
        .iter()
        .find_map(|e| match e {
            SessionEvent::Report(r) => Some(r.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(w2_report.total_items, 1);
}

#[test]
fn crashed_session_does_not_affect_others() {
    let events = launch(
        vec![
            spec("boom", Arc::new(PanickingTransport)),
            spec("calm", Arc::new(ScriptedTransport::new(Vec::new()))),
        ],
        3,
    );
    let grouped = by_wallet(events);

    assert_eq!(
        grouped["boom"].last(),
        Some(&SessionEvent::Crashed("transport exploded".to_string()))
    );
    assert!(!grouped["boom"]
        .iter()
        .any(|e| matches!(e, SessionEvent::Report(_))));

    let calm = &grouped["calm"];
    assert_eq!(calm.last(), Some(&SessionEvent::Completed));
    assert!(calm
        .iter()
        .any(|e| matches!(e, SessionEvent::Report(r) if r.spin_count == 3)));
}

#[test]
fn no_sessions_ends_stream_immediately() {
    assert!(launch(Vec::new(), 3).is_empty());
}
