//! Integration tests for tessel-telemetry.

use tessel_telemetry::bus::EventBus;
use tessel_telemetry::events::{EventKind, SimulationEvent};
use tessel_telemetry::sinks::{EventSink, TracingSink, VecSink};
use tessel_types::InstanceId;

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(SimulationEvent::new(0, EventKind::TimestepBegin { sim_time: 0.0 }));
    bus.emit_at(0, EventKind::TimestepEnd { wall_time: 0.001 });
    assert!(sink.is_empty());

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0].kind, EventKind::TimestepBegin { .. }));
    assert!(matches!(events[1].kind, EventKind::TimestepEnd { .. }));
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit_at(0, EventKind::TimestepBegin { sim_time: 0.0 });
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);

    for step in 0..4 {
        bus.emit_at(step, EventKind::TimestepBegin { sim_time: step as f64 * 0.01 });
    }
    bus.finish();
    assert_eq!(a.len(), 4);
    assert_eq!(a.events(), b.events());
}

#[test]
fn flush_preserves_order() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    for step in [3, 1, 2] {
        bus.emit_at(step, EventKind::TimestepEnd { wall_time: 0.0 });
    }
    bus.flush();
    let steps: Vec<u32> = sink.events().iter().map(|e| e.timestep).collect();
    assert_eq!(steps, vec![3, 1, 2]);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::PassiveForce {
            instance: InstanceId(2),
            elastic_energy: 0.5,
            max_nodal_force: 12.0,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn skipped_instance_event() {
    let event = SimulationEvent::new(
        0,
        EventKind::InstanceSkipped {
            instance: InstanceId(1),
            reason: "Missing required option 'young'".into(),
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("InstanceSkipped"));
    assert!(json.contains("young"));
}

#[test]
fn tracing_sink_handles_all_levels() {
    let event = SimulationEvent::new(1, EventKind::Energy { kinetic: 1.0, elastic: 2.0 });
    for level in [
        tracing::Level::ERROR,
        tracing::Level::WARN,
        tracing::Level::INFO,
        tracing::Level::DEBUG,
        tracing::Level::TRACE,
    ] {
        let mut sink = TracingSink::new(level);
        sink.handle(&event);
        assert_eq!(sink.name(), "tracing_sink");
    }
}
