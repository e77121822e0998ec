//! Unit and property tests for brigade-sim.

use std::cell::RefCell;
use std::rc::Rc;

use brigade_control::{PassiveFactory, PebbleSlowdownFactory};
use brigade_core::{CoreError, PebbleId, Rational, RobotId};
use brigade_robot::{BoundaryPolicy, Pebble, Robot, RobotError};
use num_bigint::BigInt;

use crate::{
    CallbackObserver, LineSimulator, LineSimulatorBuilder, ScenarioConfig, SimError, SimObserver,
    SimSnapshot, SimView, meeting_time, wall_time,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(BigInt::from(n), BigInt::from(d))
}

fn sim_with_epsilon(epsilon: &str) -> LineSimulator {
    LineSimulatorBuilder::new()
        .controller_factory(PebbleSlowdownFactory::new(epsilon).unwrap())
        .build()
}

/// Robots at 0 (→) and 1 (←).
fn scenario_one(epsilon: &str) -> (LineSimulator, RobotId, RobotId) {
    let mut sim = sim_with_epsilon(epsilon);
    let left = sim.create_robot(0.0, 1.0, None, None).unwrap();
    let right = sim.create_robot(1.0, -1.0, None, None).unwrap();
    (sim, left, right)
}

/// Scenario one plus a pebble at 0.25.
fn scenario_two(epsilon: &str) -> (LineSimulator, RobotId, RobotId, PebbleId) {
    let (mut sim, left, right) = scenario_one(epsilon);
    let pebble = sim.create_pebble("0.25", None).unwrap();
    (sim, left, right, pebble)
}

/// Snapshot with robots in id order, for comparing simulators whose
/// robot lists may be sorted differently among exact ties.
fn canonical(mut snapshot: SimSnapshot) -> SimSnapshot {
    snapshot.robots.sort_by_key(|r| r.id);
    snapshot
}

fn robot<'a>(sim: &'a LineSimulator, id: RobotId) -> &'a Robot {
    sim.robot(id).unwrap()
}

// ── Event-time rules ──────────────────────────────────────────────────────────

#[cfg(test)]
mod event_time_tests {
    use super::*;

    #[test]
    fn approaching_points_meet() {
        let t = meeting_time(&frac(0, 1), &frac(1, 1), &frac(1, 1), &frac(-1, 1));
        assert_eq!(t, Some(frac(1, 2)));
    }

    #[test]
    fn meeting_time_is_symmetric_in_argument_order() {
        let a = meeting_time(&frac(1, 4), &frac(1, 2), &frac(3, 4), &frac(-1, 1));
        let b = meeting_time(&frac(3, 4), &frac(-1, 1), &frac(1, 4), &frac(1, 2));
        assert_eq!(a, Some(frac(1, 3)));
        assert_eq!(a, b);
    }

    #[test]
    fn separating_or_equal_speed_points_never_meet() {
        assert_eq!(meeting_time(&frac(0, 1), &frac(-1, 1), &frac(1, 2), &frac(1, 1)), None);
        assert_eq!(meeting_time(&frac(0, 1), &frac(1, 1), &frac(1, 2), &frac(1, 1)), None);
    }

    #[test]
    fn colocated_points_have_already_met() {
        assert_eq!(meeting_time(&frac(1, 2), &frac(1, 1), &frac(1, 2), &frac(-1, 1)), None);
    }

    #[test]
    fn chasing_a_stationary_point() {
        let t = meeting_time(&frac(0, 1), &frac(1, 2), &frac(1, 4), &frac(0, 1));
        assert_eq!(t, Some(frac(1, 2)));
    }

    #[test]
    fn wall_time_by_direction() {
        assert_eq!(wall_time(&frac(1, 4), &frac(-1, 2)), Some(frac(1, 2)));
        assert_eq!(wall_time(&frac(1, 4), &frac(1, 1)), Some(frac(3, 4)));
    }

    #[test]
    fn wall_time_on_the_wall_scales_with_speed() {
        assert_eq!(wall_time(&frac(0, 1), &frac(1, 4)), Some(frac(4, 1)));
        assert_eq!(wall_time(&frac(1, 1), &frac(-2, 1)), Some(frac(1, 2)));
    }

    #[test]
    fn stationary_point_never_hits_a_wall() {
        assert_eq!(wall_time(&frac(1, 2), &frac(0, 1)), None);
        assert_eq!(wall_time(&frac(0, 1), &frac(0, 1)), None);
    }

    #[test]
    fn empty_simulator_has_no_event() {
        assert_eq!(LineSimulator::new().next_event_in(), None);
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn two_robots_meet_in_the_middle() {
        let (mut sim, _, _) = scenario_one("1");
        assert_eq!(sim.next_event_in(), Some(frac(1, 2)));
    }

    #[test]
    fn left_robot_reaches_the_pebble_first() {
        let (mut sim, left, _, pebble) = scenario_two("1");
        assert_eq!(sim.next_event_in(), Some(frac(1, 4)));

        assert_eq!(sim.step(None).unwrap(), frac(1, 4));
        assert_eq!(robot(&sim, left).position(), &frac(1, 4));
        assert!(robot(&sim, left).has_pebble(Some(pebble)));
        assert!(robot(&sim, left).has_pebble(None));
        assert_eq!(sim.pebble(pebble).unwrap().holder(), Some(left));
    }

    #[test]
    fn carrier_turns_and_drops_at_robot_collision() {
        let (mut sim, left, right, pebble) = scenario_two("1");
        assert_eq!(sim.step(None).unwrap(), frac(1, 4));
        assert_eq!(sim.step(None).unwrap(), frac(1, 4));

        // Head-on at 1/2: both turn, the carrier lets go.
        assert_eq!(robot(&sim, left).position(), &frac(1, 2));
        assert_eq!(robot(&sim, left).base_speed(), &frac(-1, 1));
        assert_eq!(robot(&sim, right).base_speed(), &frac(1, 1));
        assert!(!robot(&sim, left).has_pebble(None));
        assert_eq!(sim.pebble(pebble).unwrap().position(), &frac(1, 2));

        assert_eq!(sim.step(None).unwrap(), frac(1, 2));
        assert_eq!(sim.time(), &frac(1, 1));
    }

    #[test]
    fn slowdown_while_carrying_delays_the_meeting() {
        let (mut sim, left, right, pebble) = scenario_two("1/2");
        assert_eq!(sim.step(None).unwrap(), frac(1, 4));

        // Carrier at 1/4 moves at 1/2; the other at 3/4 moves at -1.
        assert_eq!(robot(&sim, left).effective_speed(), frac(1, 2));
        assert_eq!(sim.step(None).unwrap(), frac(1, 3));
        assert_eq!(robot(&sim, left).position(), &frac(5, 12));
        assert_eq!(robot(&sim, right).position(), &frac(5, 12));
        assert!(!robot(&sim, left).has_pebble(None));
        assert_eq!(sim.pebble(pebble).unwrap().position(), &frac(5, 12));

        // Back at full speed, the carrier reaches the left wall first.
        assert_eq!(sim.step(None).unwrap(), frac(5, 12));
        assert_eq!(robot(&sim, left).position(), &frac(0, 1));
        assert_eq!(robot(&sim, left).base_speed(), &frac(1, 1));
    }

    #[test]
    fn simulate_consumes_the_exact_budget() {
        let (mut sim, left, right) = scenario_one("1");
        assert_eq!(sim.simulate(5, None).unwrap(), frac(5, 1));
        assert_eq!(sim.time(), &frac(5, 1));

        // Ten half-unit legs: both robots are back on their starting walls.
        assert_eq!(robot(&sim, left).position(), &frac(0, 1));
        assert_eq!(robot(&sim, right).position(), &frac(1, 1));
    }

    #[test]
    fn simulate_stops_mid_leg_when_the_budget_does() {
        let (mut sim, left, _) = scenario_one("1");
        sim.simulate("0.3", None).unwrap();
        assert_eq!(sim.time(), &frac(3, 10));
        assert_eq!(robot(&sim, left).position(), &frac(3, 10));
        sim.simulate("0.2", None).unwrap();
        assert_eq!(robot(&sim, left).position(), &frac(1, 2));
        assert_eq!(robot(&sim, left).base_speed(), &frac(-1, 1));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn capped_step_stops_short_without_resolving() {
        let (mut sim, left, _, pebble) = scenario_two("1");
        assert_eq!(sim.step(Some(&frac(1, 8))).unwrap(), frac(1, 8));
        assert_eq!(robot(&sim, left).position(), &frac(1, 8));
        assert!(!sim.pebble(pebble).unwrap().is_taken());

        // The event is still pending and is now closer.
        assert_eq!(sim.next_event_in(), Some(frac(1, 8)));
        assert_eq!(sim.step(Some(&frac(1, 2))).unwrap(), frac(1, 8));
        assert!(robot(&sim, left).has_pebble(Some(pebble)));
    }

    #[test]
    fn cap_equal_to_the_event_still_resolves() {
        let (mut sim, left, _, pebble) = scenario_two("1");
        sim.step(Some(&frac(1, 4))).unwrap();
        assert!(robot(&sim, left).has_pebble(Some(pebble)));
    }

    #[test]
    fn non_positive_cap_rejected() {
        let (mut sim, _, _) = scenario_one("1");
        let err = sim.step(Some(&frac(0, 1))).unwrap_err();
        assert!(matches!(err, SimError::Core(CoreError::InvalidTimeDelta(_))));
        assert!(sim.step(Some(&frac(-1, 2))).is_err());
        assert_eq!(sim.time(), &frac(0, 1));
    }

    #[test]
    fn non_positive_budget_rejected() {
        let (mut sim, _, _) = scenario_one("1");
        assert!(matches!(
            sim.simulate(0, None).unwrap_err(),
            SimError::Core(CoreError::InvalidTimeDelta(_)),
        ));
        assert!(sim.simulate("-1/2", None).is_err());
    }

    #[test]
    fn motionless_line_has_no_pending_event() {
        let mut sim = LineSimulatorBuilder::new().controller_factory(PassiveFactory).build();
        sim.create_robot("0.5", 0, None, None).unwrap();
        assert_eq!(sim.next_event_in(), None);
        assert!(matches!(sim.step(None).unwrap_err(), SimError::NoPendingEvent));
        assert!(matches!(sim.step(Some(&frac(1, 10))).unwrap_err(), SimError::NoPendingEvent));
    }

    #[test]
    fn max_step_samples_evenly_and_resolves_only_at_events() {
        let mut counter = StepCounter::default();
        {
            let mut sim = LineSimulatorBuilder::new()
                .controller_factory(PebbleSlowdownFactory::default())
                .observer(&mut counter)
                .build();
            sim.create_robot(0, 1, None, None).unwrap();
            sim.create_robot(1, -1, None, None).unwrap();
            sim.simulate(1, Some(&frac(1, 10))).unwrap();
            assert_eq!(sim.time(), &frac(1, 1));
        }

        assert_eq!(counter.steps, 10);
        // The meeting at 1/2 and the wall hits at 1.
        assert_eq!(counter.resolved, 2);
    }

    #[test]
    fn robots_never_cross_between_events() {
        let mut sim = sim_with_epsilon("1/2");
        sim.create_robot(0, 1, None, None).unwrap();
        sim.create_robot("2/5", "1/3", None, None).unwrap();
        sim.create_robot(1, -1, None, None).unwrap();
        sim.create_pebble("1/5", None).unwrap();

        for _ in 0..25 {
            sim.step(None).unwrap();
            // Robots keep the order they were sorted in before the move.
            for pair in sim.robots().windows(2) {
                assert!(pair[0].position() <= pair[1].position());
            }
        }
    }

    #[test]
    fn passive_robots_pass_through_each_other() {
        let mut sim = LineSimulatorBuilder::new().controller_factory(PassiveFactory).build();
        let a = sim.create_robot("0.25", 1, None, None).unwrap();
        let b = sim.create_robot("0.75", -1, None, None).unwrap();
        assert_eq!(sim.step(None).unwrap(), frac(1, 4));
        assert_eq!(sim.step(None).unwrap(), frac(1, 2));
        assert_eq!(robot(&sim, a).position(), &frac(1, 1));
        assert_eq!(robot(&sim, b).position(), &frac(0, 1));
    }

    #[derive(Default)]
    pub(super) struct StepCounter {
        pub(super) robots:   usize,
        pub(super) pebbles:  usize,
        pub(super) steps:    usize,
        pub(super) resolved: usize,
    }

    impl SimObserver for StepCounter {
        fn on_robot_created(&mut self, _robot: &Robot, _time: &Rational) {
            self.robots += 1;
        }

        fn on_pebble_created(&mut self, _pebble: &Pebble, _time: &Rational) {
            self.pebbles += 1;
        }

        fn on_step(&mut self, view: &SimView<'_>) {
            self.steps += 1;
            if view.resolved {
                self.resolved += 1;
            }
        }
    }
}

// ── Creation and external take/drop ───────────────────────────────────────────

#[cfg(test)]
mod creation_tests {
    use brigade_robot::ControllerFactory;

    use super::*;

    #[test]
    fn robot_needs_a_controller_or_a_factory() {
        let mut sim = LineSimulator::new();
        assert!(matches!(
            sim.create_robot(0, 1, None, None).unwrap_err(),
            SimError::NoControllerFactory,
        ));

        let explicit = PassiveFactory.create();
        assert_eq!(sim.create_robot(0, 1, Some(explicit), None).unwrap(), RobotId(0));
        assert!(!sim.has_controller_factory());
    }

    #[test]
    fn positions_outside_the_interval_rejected() {
        let mut sim = sim_with_epsilon("1");
        assert!(matches!(
            sim.create_robot("1.5", 1, None, None).unwrap_err(),
            SimError::Core(CoreError::PositionOutOfRange(_)),
        ));
        assert!(sim.create_pebble(-0.25, None).is_err());
        assert!(sim.robots().is_empty());
        assert!(sim.pebbles().is_empty());
    }

    #[test]
    fn malformed_numbers_rejected() {
        let mut sim = sim_with_epsilon("1");
        assert!(matches!(
            sim.create_robot("zero", 1, None, None).unwrap_err(),
            SimError::Core(CoreError::Parse { .. }),
        ));
        assert!(sim.create_robot(0.5, f64::NAN, None, None).is_err());
    }

    #[test]
    fn ids_and_default_names_are_per_simulator() {
        let mut first = sim_with_epsilon("1");
        let mut second = sim_with_epsilon("1");
        assert_eq!(first.create_robot(0, 1, None, None).unwrap(), RobotId(0));
        assert_eq!(first.create_robot(1, -1, None, Some("right")).unwrap(), RobotId(1));
        assert_eq!(second.create_robot(0, 1, None, None).unwrap(), RobotId(0));

        assert_eq!(robot(&first, RobotId(0)).name(), "robot_0");
        assert_eq!(robot(&first, RobotId(1)).name(), "right");

        let p = first.create_pebble("1/2", None).unwrap();
        assert_eq!(first.pebble(p).unwrap().name(), "p0");
    }

    #[test]
    fn outward_speed_on_a_wall_is_inverted() {
        let mut sim = sim_with_epsilon("1");
        let id = sim.create_robot(1, 1, None, None).unwrap();
        assert_eq!(robot(&sim, id).base_speed(), &frac(-1, 1));
    }

    #[test]
    fn take_and_drop_by_robot_id() {
        let (mut sim, left, right, pebble) = scenario_two("1");
        sim.take_pebble(right, pebble).unwrap();
        assert_eq!(sim.pebble(pebble).unwrap().position(), &frac(1, 1));

        assert!(matches!(
            sim.take_pebble(left, pebble).unwrap_err(),
            SimError::Robot(RobotError::AlreadyHeld { .. }),
        ));
        assert!(matches!(
            sim.drop_pebble(left, None).unwrap_err(),
            SimError::Robot(RobotError::NothingToHold(_)),
        ));
        assert_eq!(sim.drop_pebble(right, None).unwrap(), pebble);
        assert!(matches!(
            sim.take_pebble(RobotId(9), pebble).unwrap_err(),
            SimError::UnknownRobot(RobotId(9)),
        ));
    }

    #[test]
    fn builder_sets_policy() {
        let sim = LineSimulatorBuilder::new().boundary_policy(BoundaryPolicy::Strict).build();
        assert_eq!(sim.boundary_policy(), BoundaryPolicy::Strict);
        assert_eq!(LineSimulator::new().boundary_policy(), BoundaryPolicy::ClampAndWarn);
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::step_tests::StepCounter;
    use super::*;

    #[test]
    fn callbacks_fire_for_creation_and_steps() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let (robots, pebbles, steps) = (log.clone(), log.clone(), log.clone());
        let observer = CallbackObserver::new()
            .with_robot_created(move |r, t| robots.borrow_mut().push(format!("robot {} at t={t}", r.name())))
            .with_pebble_created(move |p, _| pebbles.borrow_mut().push(format!("pebble {}", p.name())))
            .with_step(move |view| {
                steps.borrow_mut().push(format!("step Δ={} t={} resolved={}", view.elapsed, view.time, view.resolved))
            });

        let mut sim = LineSimulatorBuilder::new()
            .controller_factory(PebbleSlowdownFactory::default())
            .observer(observer)
            .build();
        sim.create_robot(0, 1, None, None).unwrap();
        sim.create_pebble("1/2", None).unwrap();
        sim.step(Some(&frac(1, 4))).unwrap();
        sim.step(None).unwrap();

        assert_eq!(*log.borrow(), vec![
            "robot robot_0 at t=0".to_owned(),
            "pebble p0".to_owned(),
            "step Δ=1/4 t=1/4 resolved=false".to_owned(),
            "step Δ=1/4 t=1/2 resolved=true".to_owned(),
        ]);
    }

    #[test]
    fn view_snapshot_reflects_post_step_state() {
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        let mut sim = LineSimulatorBuilder::new()
            .controller_factory(PebbleSlowdownFactory::new("1/2").unwrap())
            .observer(CallbackObserver::new().with_step(move |view| *sink.borrow_mut() = Some(view.snapshot())))
            .build();
        let left = sim.create_robot(0, 1, None, None).unwrap();
        sim.create_pebble("1/4", None).unwrap();
        sim.step(None).unwrap();

        let snapshot = last.borrow().clone().unwrap();
        assert_eq!(snapshot.time, "1/4");
        assert_eq!(snapshot.robot(left).unwrap().carried, vec![0]);
        assert_eq!(snapshot, sim.snapshot());
    }

    #[test]
    fn borrowed_observer_is_returned_intact() {
        let mut counter = StepCounter::default();
        {
            let mut sim = LineSimulatorBuilder::new()
                .controller_factory(PebbleSlowdownFactory::default())
                .observer(&mut counter)
                .build();
            sim.create_robot(0, 1, None, None).unwrap();
            sim.create_robot(1, -1, None, None).unwrap();
            sim.create_pebble("0.25", None).unwrap();
            sim.simulate(1, None).unwrap();
            assert_eq!(sim.observer().robots, 2);
        }
        assert_eq!(counter.robots, 2);
        assert_eq!(counter.pebbles, 1);
        // Pebble at 1/4, meeting at 1/2, walls at 1.
        assert_eq!(counter.steps, 3);
        assert_eq!(counter.resolved, 3);
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn snapshot_renders_exact_values() {
        let (mut sim, left, _, pebble) = scenario_two("1/2");
        sim.step(None).unwrap();
        let snapshot = sim.snapshot();

        assert_eq!(snapshot.time, "1/4");
        let r = snapshot.robot(left).unwrap();
        assert_eq!(r.name, "robot_0");
        assert_eq!(r.position, "1/4");
        assert_eq!(r.speed, "1/2");
        assert_eq!(r.base_speed, "1");
        assert_eq!(r.carried, vec![0]);

        let p = snapshot.pebble(pebble).unwrap();
        assert_eq!(p.position, "1/4");
        assert_eq!(p.taken_by, Some(left.0));
    }

    #[test]
    fn snapshot_survives_json() {
        let (mut sim, _, _, _) = scenario_two("1/2");
        sim.step(None).unwrap();
        let snapshot = sim.snapshot();
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"taken_by\": 0"));
        assert_eq!(SimSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn reloaded_simulator_follows_the_same_trajectory() {
        let (mut original, _, _, _) = scenario_two("1/2");
        original.create_robot("0.6", "-1/3", None, Some("third")).unwrap();
        original.step(None).unwrap();

        let json = original.snapshot().to_json().unwrap();
        let mut reloaded = sim_with_epsilon("1/2");
        reloaded.load_snapshot(&SimSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(canonical(reloaded.snapshot()), canonical(original.snapshot()));

        for _ in 0..12 {
            assert_eq!(reloaded.step(None).unwrap(), original.step(None).unwrap());
            assert_eq!(canonical(reloaded.snapshot()), canonical(original.snapshot()));
        }
    }

    #[test]
    fn load_requires_an_empty_simulator() {
        let (mut sim, _, _) = scenario_one("1");
        let snapshot = sim.snapshot();
        assert!(matches!(sim.load_snapshot(&snapshot).unwrap_err(), SimError::Snapshot(_)));
    }

    #[test]
    fn load_rejects_malformed_snapshots() {
        let (sim, _, _, _) = scenario_two("1");
        let good = sim.snapshot();

        let mut bad_number = good.clone();
        bad_number.robots[0].position = "left".to_owned();
        assert!(matches!(
            sim_with_epsilon("1").load_snapshot(&bad_number).unwrap_err(),
            SimError::Snapshot(_),
        ));

        let mut bad_reference = good.clone();
        bad_reference.robots[0].carried = vec![7];
        assert!(matches!(
            sim_with_epsilon("1").load_snapshot(&bad_reference).unwrap_err(),
            SimError::Snapshot(_),
        ));

        assert!(matches!(
            LineSimulator::new().load_snapshot(&good).unwrap_err(),
            SimError::NoControllerFactory,
        ));
    }
}

// ── Scenario files ────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_config_tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "epsilon": "1/2",
        "duration": 5,
        "robots": [
            { "position": 0, "speed": 1 },
            { "position": "1", "speed": "-1", "name": "right" }
        ],
        "pebbles": [{ "position": "0.25" }]
    }"#;

    #[test]
    fn parses_numbers_and_strings() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        assert_eq!(config.epsilon().unwrap(), Some(frac(1, 2)));
        assert_eq!(config.duration().unwrap(), Some(frac(5, 1)));
        assert_eq!(config.max_step().unwrap(), None);
        assert_eq!(config.robots.len(), 2);
        assert_eq!(config.robots[1].name.as_deref(), Some("right"));
    }

    #[test]
    fn populate_creates_entities_in_file_order() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        let mut sim = sim_with_epsilon("1/2");
        config.populate(&mut sim).unwrap();

        assert_eq!(robot(&sim, RobotId(0)).position(), &frac(0, 1));
        assert_eq!(robot(&sim, RobotId(1)).name(), "right");
        assert_eq!(sim.pebble(PebbleId(0)).unwrap().position(), &frac(1, 4));
        assert_eq!(sim.next_event_in(), Some(frac(1, 4)));
    }

    #[test]
    fn round_trips_through_json() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        let again = ScenarioConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn bad_input_reported() {
        assert!(matches!(ScenarioConfig::from_json("{ robots: }").unwrap_err(), SimError::Scenario(_)));

        let config = ScenarioConfig::from_json(r#"{ "epsilon": "half" }"#).unwrap();
        assert!(matches!(config.epsilon().unwrap_err(), SimError::Core(CoreError::Parse { .. })));
    }
}

// ── Properties over random lines ──────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    type Line = (Vec<(i64, i64)>, Vec<i64>);

    /// Up to four robots at distinct 1/64 grid points with non-zero speeds in
    /// quarter units, plus up to three pebbles.
    fn arb_line() -> impl Strategy<Value = Line> {
        (
            prop::collection::btree_set(1i64..64, 1..5),
            prop::collection::vec(prop::sample::select(vec![-4i64, -3, -2, -1, 1, 2, 3, 4]), 4),
            prop::collection::vec(0i64..=64, 0..4),
        )
            .prop_map(|(positions, speeds, pebbles)| {
                (positions.into_iter().zip(speeds).collect(), pebbles)
            })
    }

    fn build(line: &Line, epsilon: Rational, policy: BoundaryPolicy) -> LineSimulator {
        let mut sim = LineSimulatorBuilder::new()
            .controller_factory(PebbleSlowdownFactory::new(epsilon).unwrap())
            .boundary_policy(policy)
            .build();
        for &(p, s) in &line.0 {
            sim.create_robot(frac(p, 64), frac(s, 4), None, None).unwrap();
        }
        for &p in &line.1 {
            sim.create_pebble(frac(p, 64), None).unwrap();
        }
        sim
    }

    fn in_unit_interval(x: &Rational) -> bool {
        *x >= frac(0, 1) && *x <= frac(1, 1)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn runs_are_deterministic(line in arb_line(), eps in 1i64..=4) {
            let mut a = build(&line, frac(eps, 4), BoundaryPolicy::ClampAndWarn);
            let mut b = build(&line, frac(eps, 4), BoundaryPolicy::ClampAndWarn);
            for _ in 0..30 {
                prop_assert_eq!(a.step(None).unwrap(), b.step(None).unwrap());
                prop_assert_eq!(a.snapshot(), b.snapshot());
            }
        }

        #[test]
        fn clock_strictly_increases(line in arb_line(), eps in 1i64..=4) {
            let mut sim = build(&line, frac(eps, 4), BoundaryPolicy::ClampAndWarn);
            for _ in 0..30 {
                let before = sim.time().clone();
                let dt = sim.step(None).unwrap();
                prop_assert!(dt > frac(0, 1));
                prop_assert_eq!(sim.time(), &(before + dt));
            }
        }

        #[test]
        fn carried_pebbles_stay_with_their_robot(line in arb_line(), eps in 1i64..=4) {
            let mut sim = build(&line, frac(eps, 4), BoundaryPolicy::ClampAndWarn);
            for _ in 0..30 {
                sim.step(Some(&frac(1, 7))).unwrap();
                for pebble in sim.pebbles() {
                    if let Some(holder) = pebble.holder() {
                        let robot = sim.robot(holder).unwrap();
                        prop_assert_eq!(pebble.position(), robot.position());
                        prop_assert!(robot.has_pebble(Some(pebble.id())));
                    }
                }
            }
        }

        /// Without slowdown, event timing alone keeps every robot inside the
        /// interval and in order: the strict policy never trips.
        #[test]
        fn exact_timing_respects_walls_and_order(line in arb_line()) {
            let mut sim = build(&line, frac(1, 1), BoundaryPolicy::Strict);
            for _ in 0..30 {
                sim.step(None).unwrap();
                for robot in sim.robots() {
                    prop_assert!(in_unit_interval(robot.position()));
                }
                for pebble in sim.pebbles() {
                    prop_assert!(in_unit_interval(pebble.position()));
                }
                for pair in sim.robots().windows(2) {
                    prop_assert!(pair[0].position() <= pair[1].position());
                }
            }
        }
    }
}
