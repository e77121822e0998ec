//! The `LineSimulator` struct and its event loop.

use brigade_core::{CoreError, IntoExact, PebbleId, Rational, RobotId, SimClock};
use brigade_robot::{
    BoundaryPolicy, ControllerFactory, Pebble, Robot, RobotBody, RobotController,
};
use num_traits::{One, Signed, Zero};
use tracing::{debug, info, trace};

use crate::snapshot::exact_field;
use crate::{NoopObserver, SimError, SimObserver, SimResult, SimSnapshot, SimView};

// ── Event-time rules ──────────────────────────────────────────────────────────

/// Time until two points on the line meet, or `None` if they never do.
///
/// Points already at the same position have met; that meeting is not
/// reported again.
pub fn meeting_time(
    pos_a:   &Rational,
    speed_a: &Rational,
    pos_b:   &Rational,
    speed_b: &Rational,
) -> Option<Rational> {
    let ((left, left_speed), (right, right_speed)) = if pos_a <= pos_b {
        ((pos_a, speed_a), (pos_b, speed_b))
    } else {
        ((pos_b, speed_b), (pos_a, speed_a))
    };
    if left == right || left_speed <= right_speed {
        return None;
    }
    Some((right - left) / (left_speed - right_speed))
}

/// Time until a point moving at `speed` reaches a wall.
///
/// A point already on or past a wall reports `1 / |speed|`.  A stationary
/// point never reaches one.
pub fn wall_time(position: &Rational, speed: &Rational) -> Option<Rational> {
    if speed.is_zero() {
        return None;
    }
    let magnitude = speed.abs();
    if !is_interior(position) {
        return Some(magnitude.recip());
    }
    if speed.is_negative() {
        Some(position / magnitude)
    } else {
        Some((Rational::one() - position) / magnitude)
    }
}

/// Minimum of two optional times; an absent time loses to a present one.
fn earliest(a: Option<Rational>, b: Option<Rational>) -> Option<Rational> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b < a { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// `0 < position < 1`.
fn is_interior(position: &Rational) -> bool {
    position.is_positive() && *position < Rational::one()
}

// ── LineSimulator ─────────────────────────────────────────────────────────────

/// The event-driven simulator.
///
/// `LineSimulator<O>` owns every robot, every pebble, and the clock.  Each
/// [`step`][Self::step]:
///
/// 1. **Next event**: sorts robots by `(position, base_speed)` and computes
///    the earliest robot–robot meeting (adjacent pairs only), robot–pebble
///    meeting, or wall hit (outermost robots only).
/// 2. **Advance**: every robot moves by its effective speed × Δ; carried
///    pebbles follow.  The clock advances by Δ.
/// 3. **Resolve** (skipped for a capped step that stops short of the event):
///    begin-event hooks, pebble and wall collisions per robot, then mutual
///    robot–robot collisions with pre-resolution speeds, then end-event
///    hooks.
/// 4. **Observe**: [`SimObserver::on_step`] receives a [`SimView`].
///
/// Create via [`LineSimulator::new`] or [`LineSimulatorBuilder`][crate::LineSimulatorBuilder].
pub struct LineSimulator<O: SimObserver = NoopObserver> {
    /// Sorted by `(position, base_speed)` before each event computation.
    robots:     Vec<Robot>,
    /// Indexed by `PebbleId`.
    pebbles:    Vec<Pebble>,
    clock:      SimClock,
    next_robot: RobotId,
    factory:    Option<Box<dyn ControllerFactory>>,
    policy:     BoundaryPolicy,
    observer:   O,
}

impl LineSimulator<NoopObserver> {
    /// An empty simulator with no default controller factory, the
    /// clamp-and-warn boundary policy, and no observer.
    pub fn new() -> Self {
        Self::from_parts(None, BoundaryPolicy::default(), NoopObserver)
    }
}

impl Default for LineSimulator<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SimObserver> LineSimulator<O> {
    pub(crate) fn from_parts(
        factory:  Option<Box<dyn ControllerFactory>>,
        policy:   BoundaryPolicy,
        observer: O,
    ) -> Self {
        Self {
            robots: Vec::new(),
            pebbles: Vec::new(),
            clock: SimClock::new(),
            next_robot: RobotId(0),
            factory,
            policy,
            observer,
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Factory used by [`create_robot`][Self::create_robot] when no
    /// controller is passed.
    pub fn set_controller_factory(&mut self, factory: impl ControllerFactory + 'static) {
        self.factory = Some(Box::new(factory));
    }

    pub fn has_controller_factory(&self) -> bool {
        self.factory.is_some()
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create a robot at `position` with signed `speed`.
    ///
    /// Without an explicit `controller` the default factory supplies one;
    /// with neither, creation fails with [`SimError::NoControllerFactory`].
    pub fn create_robot(
        &mut self,
        position:   impl IntoExact,
        speed:      impl IntoExact,
        controller: Option<Box<dyn RobotController>>,
        name:       Option<&str>,
    ) -> SimResult<RobotId> {
        let position = position.into_exact()?;
        let speed = speed.into_exact()?;
        let controller = match controller {
            Some(c) => c,
            None => self.factory.as_ref().ok_or(SimError::NoControllerFactory)?.create(),
        };

        let id = self.next_robot;
        let body = RobotBody::new(id, name.map(str::to_owned), position, speed)?;
        self.next_robot = id.next();
        self.robots.push(Robot::new(body, Some(controller)));

        if let Some(robot) = self.robots.last() {
            debug!(robot = %id, name = robot.name(), position = %robot.position(), speed = %robot.base_speed(), "robot created");
            self.observer.on_robot_created(robot, self.clock.now());
        }
        Ok(id)
    }

    /// Create a free pebble at `position`.
    pub fn create_pebble(
        &mut self,
        position: impl IntoExact,
        name:     Option<&str>,
    ) -> SimResult<PebbleId> {
        let position = position.into_exact()?;
        let id = PebbleId(self.pebbles.len() as u32);
        self.pebbles.push(Pebble::new(id, position, name.map(str::to_owned))?);

        if let Some(pebble) = self.pebbles.last() {
            debug!(pebble = %id, name = pebble.name(), position = %pebble.position(), "pebble created");
            self.observer.on_pebble_created(pebble, self.clock.now());
        }
        Ok(id)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Robots in their current sort order.
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id() == id)
    }

    /// Pebbles in id order.
    pub fn pebbles(&self) -> &[Pebble] {
        &self.pebbles
    }

    pub fn pebble(&self, id: PebbleId) -> Option<&Pebble> {
        self.pebbles.get(id.index())
    }

    pub fn time(&self) -> &Rational {
        self.clock.now()
    }

    /// Time until the next event, or `None` if nothing will ever meet.
    ///
    /// Takes `&mut self` because robots are re-sorted first.
    pub fn next_event_in(&mut self) -> Option<Rational> {
        self.sort_robots();
        self.compute_next_event()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(self.clock.now(), &self.robots, &self.pebbles)
    }

    // ── Externally driven take/drop ───────────────────────────────────────

    /// Have `robot` pick up `pebble`, firing its controller's take hook.
    pub fn take_pebble(&mut self, robot: RobotId, pebble: PebbleId) -> SimResult<()> {
        let index = self.robot_index(robot)?;
        self.robots[index].take(&mut self.pebbles, pebble)?;
        Ok(())
    }

    /// Have `robot` drop `pebble` (its most recent pickup when `None`).
    pub fn drop_pebble(&mut self, robot: RobotId, pebble: Option<PebbleId>) -> SimResult<PebbleId> {
        let index = self.robot_index(robot)?;
        Ok(self.robots[index].drop_pebble(&mut self.pebbles, pebble)?)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance to the next event, or by `max_step` if that comes first.
    ///
    /// Returns the Δ actually advanced.  Collisions are resolved only when
    /// the step reaches the event.
    pub fn step(&mut self, max_step: Option<&Rational>) -> SimResult<Rational> {
        if let Some(cap) = max_step {
            if !cap.is_positive() {
                return Err(CoreError::InvalidTimeDelta(cap.clone()).into());
            }
        }

        let event_in = self.next_event_in().ok_or(SimError::NoPendingEvent)?;
        let (dt, resolved) = match max_step {
            Some(cap) if *cap < event_in => (cap.clone(), false),
            _ => (event_in, true),
        };

        for robot in &mut self.robots {
            robot.advance(&dt, &mut self.pebbles, self.policy)?;
        }
        self.clock.advance(&dt)?;
        if resolved {
            self.resolve_collisions()?;
        }
        debug!(time = %self.clock.now(), dt = %dt, resolved, "step");

        let view = SimView {
            time:     self.clock.now(),
            elapsed:  &dt,
            resolved,
            robots:   &self.robots,
            pebbles:  &self.pebbles,
        };
        self.observer.on_step(&view);
        Ok(dt)
    }

    /// Step until exactly `budget` has elapsed.
    ///
    /// Every step is capped at the remaining budget (and at `max_step`, if
    /// given), so the final step may stop short of an event.  Returns the
    /// elapsed time, which always equals `budget`.
    pub fn simulate(
        &mut self,
        budget:   impl IntoExact,
        max_step: Option<&Rational>,
    ) -> SimResult<Rational> {
        let budget = budget.into_exact()?;
        if !budget.is_positive() {
            return Err(CoreError::InvalidTimeDelta(budget).into());
        }
        info!(start = %self.clock.now(), budget = %budget, "simulating");

        let mut remaining = budget.clone();
        let mut steps = 0usize;
        while remaining.is_positive() {
            let cap = match max_step {
                Some(m) if *m < remaining => m.clone(),
                _ => remaining.clone(),
            };
            let dt = self.step(Some(&cap))?;
            remaining = &remaining - &dt;
            steps += 1;
        }

        info!(end = %self.clock.now(), steps, "simulation complete");
        Ok(budget)
    }

    // ── Snapshot import ───────────────────────────────────────────────────

    /// Recreate the state captured in `snapshot` in this (empty) simulator.
    ///
    /// Robots are created in id order through the default controller
    /// factory, pebbles in id order, then every robot re-takes its carried
    /// pebbles in pickup order.  The clock is set to the snapshot time.
    pub fn load_snapshot(&mut self, snapshot: &SimSnapshot) -> SimResult<()> {
        if !self.robots.is_empty() || !self.pebbles.is_empty() || !self.clock.now().is_zero() {
            return Err(SimError::Snapshot("target simulator is not empty".to_owned()));
        }

        let mut robots: Vec<_> = snapshot.robots.iter().collect();
        robots.sort_by_key(|r| r.id);
        let mut pebbles: Vec<_> = snapshot.pebbles.iter().collect();
        pebbles.sort_by_key(|p| p.id);

        let mut robot_ids = Vec::with_capacity(robots.len());
        for r in &robots {
            let position = exact_field("robot position", &r.position)?;
            let speed = exact_field("robot base_speed", &r.base_speed)?;
            let id = self.create_robot(position, speed, None, Some(r.name.as_str()))?;
            robot_ids.push((r.id, id));
        }

        let mut pebble_ids = Vec::with_capacity(pebbles.len());
        for p in &pebbles {
            let position = exact_field("pebble position", &p.position)?;
            let id = self.create_pebble(position, Some(p.name.as_str()))?;
            pebble_ids.push((p.id, id));
        }

        for r in &robots {
            let robot = lookup(&robot_ids, r.id, "robot")?;
            for &carried in &r.carried {
                let pebble = lookup(&pebble_ids, carried, "pebble")?;
                self.take_pebble(robot, pebble)?;
            }
        }

        let time = exact_field("time", &snapshot.time)?;
        if time.is_negative() {
            return Err(SimError::Snapshot(format!("negative time {time}")));
        }
        if time.is_positive() {
            self.clock.advance(&time)?;
        }
        info!(robots = robots.len(), pebbles = pebbles.len(), time = %time, "snapshot loaded");
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn robot_index(&self, id: RobotId) -> SimResult<usize> {
        self.robots
            .iter()
            .position(|r| r.id() == id)
            .ok_or(SimError::UnknownRobot(id))
    }

    /// Stable sort by `(position, base_speed)`.
    fn sort_robots(&mut self) {
        self.robots.sort_by(|a, b| {
            a.position()
                .cmp(b.position())
                .then_with(|| a.base_speed().cmp(b.base_speed()))
        });
    }

    /// Requires robots to be sorted.
    fn compute_next_event(&self) -> Option<Rational> {
        let speeds: Vec<Rational> = self.robots.iter().map(Robot::effective_speed).collect();
        let zero = Rational::zero();
        let mut next = None;

        for (i, pair) in self.robots.windows(2).enumerate() {
            let candidate = meeting_time(pair[0].position(), &speeds[i], pair[1].position(), &speeds[i + 1]);
            if let Some(t) = &candidate {
                trace!(left = %pair[0].id(), right = %pair[1].id(), t = %t, "robot meeting candidate");
            }
            next = earliest(next, candidate);
        }

        for (robot, speed) in self.robots.iter().zip(&speeds) {
            for pebble in self.pebbles.iter().filter(|p| !p.is_taken()) {
                let candidate = meeting_time(robot.position(), speed, pebble.position(), &zero);
                if let Some(t) = &candidate {
                    trace!(robot = %robot.id(), pebble = %pebble.id(), t = %t, "pebble candidate");
                }
                next = earliest(next, candidate);
            }
        }

        let last = self.robots.len().checked_sub(1);
        for i in [Some(0), last].into_iter().flatten() {
            if let Some(robot) = self.robots.get(i) {
                let candidate = wall_time(robot.position(), &speeds[i]);
                if let Some(t) = &candidate {
                    trace!(robot = %robot.id(), t = %t, "wall candidate");
                }
                next = earliest(next, candidate);
            }
        }
        next
    }

    fn resolve_collisions(&mut self) -> SimResult<()> {
        for robot in &mut self.robots {
            robot.on_begin_event();
        }

        let speeds: Vec<Rational> = self.robots.iter().map(Robot::effective_speed).collect();
        let free: Vec<PebbleId> = self
            .pebbles
            .iter()
            .filter(|p| !p.is_taken())
            .map(Pebble::id)
            .collect();

        for robot in &mut self.robots {
            for &id in &free {
                let touching = self
                    .pebbles
                    .get(id.index())
                    .is_some_and(|p| !p.is_taken() && p.position() == robot.position());
                if touching {
                    robot.on_collision_with_pebble(id, &mut self.pebbles)?;
                }
            }
            if !is_interior(robot.position()) {
                robot.on_collision_with_wall(&mut self.pebbles)?;
            }
        }

        for i in 1..self.robots.len() {
            let (head, tail) = self.robots.split_at_mut(i);
            let (left, right) = (&mut head[i - 1], &mut tail[0]);
            if left.position() != right.position() {
                continue;
            }
            left.on_collision_with_robot(&speeds[i - 1], right.body(), &speeds[i], &mut self.pebbles)?;
            right.on_collision_with_robot(&speeds[i], left.body(), &speeds[i - 1], &mut self.pebbles)?;
        }

        for robot in &mut self.robots {
            robot.on_end_event();
        }
        Ok(())
    }
}

/// Map a snapshot id to the id assigned on import.
fn lookup<T: Copy>(ids: &[(u32, T)], old: u32, what: &str) -> SimResult<T> {
    ids.iter()
        .find(|(from, _)| *from == old)
        .map(|&(_, to)| to)
        .ok_or_else(|| SimError::Snapshot(format!("{what} id {old} is not in the snapshot")))
}
