//! Tick-rule tests: harvest rates, guards, and application order.

use cascade_core::{
    config::{GameConfig, UnitConfig},
    ledger::UnitLedger,
    snapshot::SaveMapping,
    unit::{ClickRule, TickRule},
};

const EPS: f64 = 1e-9;

fn ledger_with(values: &[(&str, f64)]) -> UnitLedger {
    let mut ledger = UnitLedger::from_catalog(&GameConfig::default().units).unwrap();
    let mapping: SaveMapping = values
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();
    ledger.restore(&mapping);
    ledger
}

fn assert_value(ledger: &UnitLedger, name: &str, expected: f64) {
    let actual = ledger.value_of(name).unwrap();
    assert!(
        (actual - expected).abs() < EPS,
        "{name} = {actual}, expected {expected}"
    );
}

#[test]
fn a_harvests_half_of_b() {
    let mut ledger = ledger_with(&[("B", 10.0)]);
    ledger.tick_all(1);
    assert_value(&ledger, "A", 5.0);
    // B's own rule saw C at 0 and did nothing.
    assert_value(&ledger, "B", 10.0);
}

#[test]
fn b_harvests_quarter_of_c() {
    let mut ledger = ledger_with(&[("C", 8.0)]);
    ledger.tick_all(1);
    assert_value(&ledger, "B", 2.0);
    assert_value(&ledger, "C", 8.0);
}

#[test]
fn c_harvests_tenth_of_d() {
    let mut ledger = ledger_with(&[("D", 10.0)]);
    ledger.tick_all(1);
    assert_value(&ledger, "C", 1.0);
}

#[test]
fn d_harvests_twentieth_of_e() {
    let mut ledger = ledger_with(&[("E", 100.0)]);
    ledger.tick_all(1);
    assert_value(&ledger, "D", 5.0);
}

#[test]
fn e_has_no_automatic_production() {
    let mut ledger = ledger_with(&[("A", 50.0), ("E", 7.0)]);
    ledger.tick_all(1);
    assert_value(&ledger, "E", 7.0);
}

#[test]
fn zero_upstream_produces_nothing() {
    let mut ledger = ledger_with(&[]);
    let events = ledger.tick_all(1);
    assert!(events.is_empty(), "all-zero chain should emit no events");
    for name in ["A", "B", "C", "D", "E"] {
        assert_value(&ledger, name, 0.0);
    }
}

#[test]
fn full_chain_ripples_once_per_tick() {
    let mut ledger = ledger_with(&[
        ("A", 1.0),
        ("B", 1.0),
        ("C", 1.0),
        ("D", 1.0),
        ("E", 1.0),
    ]);
    ledger.tick_all(1);
    // Tick order is A, B, C, D, E; every source here sits later in the
    // order, so each unit harvests its source's pre-tick value.
    assert_value(&ledger, "A", 1.5);
    assert_value(&ledger, "B", 1.25);
    assert_value(&ledger, "C", 1.1);
    assert_value(&ledger, "D", 1.05);
    assert_value(&ledger, "E", 1.0);
}

#[test]
fn deltas_apply_immediately_not_batched() {
    // Two units harvesting each other: Q sits after P, so Q must see
    // P's already-ticked value from this same cycle.
    let catalog = vec![
        UnitConfig {
            name: "P".into(),
            description: "first".into(),
            tick: TickRule::Harvest {
                source: "Q".into(),
                rate: 1.0,
            },
            click: ClickRule::Gain { amount: 1.0 },
        },
        UnitConfig {
            name: "Q".into(),
            description: "second".into(),
            tick: TickRule::Harvest {
                source: "P".into(),
                rate: 1.0,
            },
            click: ClickRule::Gain { amount: 1.0 },
        },
    ];
    let mut ledger = UnitLedger::from_catalog(&catalog).unwrap();
    let mapping: SaveMapping = [("P".to_string(), 1.0), ("Q".to_string(), 1.0)].into();
    ledger.restore(&mapping);

    ledger.tick_all(1);

    // P: 1 + 1×Q(1) = 2. Q: 1 + 1×P(2, already ticked) = 3.
    // A batched snapshot pass would leave Q at 2.
    assert_value(&ledger, "P", 2.0);
    assert_value(&ledger, "Q", 3.0);
}

#[test]
fn missing_collaborator_is_a_noop() {
    let catalog = vec![UnitConfig {
        name: "X".into(),
        description: "orphan".into(),
        tick: TickRule::Harvest {
            source: "ghost".into(),
            rate: 2.0,
        },
        click: ClickRule::Gain { amount: 1.0 },
    }];
    let mut ledger = UnitLedger::from_catalog(&catalog).unwrap();
    let mapping: SaveMapping = [("X".to_string(), 4.0)].into();
    ledger.restore(&mapping);

    let events = ledger.tick_all(1);

    assert!(events.is_empty());
    assert_value(&ledger, "X", 4.0);
}

#[test]
fn tick_emits_produced_events_with_deltas() {
    let mut ledger = ledger_with(&[("B", 10.0)]);
    let events = ledger.tick_all(3);

    assert_eq!(events.len(), 1, "only A's rule should fire");
    match &events[0] {
        cascade_core::event::GameEvent::UnitProduced {
            tick,
            unit,
            delta,
            value,
        } => {
            assert_eq!(*tick, 3);
            assert_eq!(unit, "A");
            assert!((delta - 5.0).abs() < EPS);
            assert!((value - 5.0).abs() < EPS);
        }
        other => panic!("expected UnitProduced, got {other:?}"),
    }
}

#[test]
fn duplicate_names_rejected_at_build() {
    let mut catalog = GameConfig::default().units;
    catalog.push(catalog[0].clone());
    let err = UnitLedger::from_catalog(&catalog);
    assert!(err.is_err(), "duplicate unit name must fail ledger build");
}
