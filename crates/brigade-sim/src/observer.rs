//! Simulation observer trait for frame sampling and data collection.

use brigade_core::Rational;
use brigade_robot::{Pebble, Robot};

use crate::SimSnapshot;

/// Read-only view of the simulator handed to [`SimObserver::on_step`].
#[derive(Debug, Clone, Copy)]
pub struct SimView<'a> {
    /// Simulation time after the step.
    pub time:     &'a Rational,
    /// Δ the step advanced by.
    pub elapsed:  &'a Rational,
    /// `false` for a capped step that stopped short of the next event.
    pub resolved: bool,
    /// Robots in sort order as of the step's event computation.
    pub robots:   &'a [Robot],
    pub pebbles:  &'a [Pebble],
}

impl SimView<'_> {
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(self.time, self.robots, self.pebbles)
    }
}

/// Callbacks invoked synchronously by [`LineSimulator`][crate::LineSimulator].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: frame counter
///
/// ```rust,ignore
/// struct Frames(usize);
///
/// impl SimObserver for Frames {
///     fn on_step(&mut self, _view: &SimView<'_>) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per robot right after it is created.
    fn on_robot_created(&mut self, _robot: &Robot, _time: &Rational) {}

    /// Called once per pebble right after it is created.
    fn on_pebble_created(&mut self, _pebble: &Pebble, _time: &Rational) {}

    /// Called at the end of every step, after collision resolution.
    fn on_step(&mut self, _view: &SimView<'_>) {}
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_robot_created(&mut self, robot: &Robot, time: &Rational) {
        (**self).on_robot_created(robot, time);
    }

    fn on_pebble_created(&mut self, pebble: &Pebble, time: &Rational) {
        (**self).on_pebble_created(pebble, time);
    }

    fn on_step(&mut self, view: &SimView<'_>) {
        (**self).on_step(view);
    }
}

impl<O: SimObserver + ?Sized> SimObserver for Box<O> {
    fn on_robot_created(&mut self, robot: &Robot, time: &Rational) {
        (**self).on_robot_created(robot, time);
    }

    fn on_pebble_created(&mut self, pebble: &Pebble, time: &Rational) {
        (**self).on_pebble_created(pebble, time);
    }

    fn on_step(&mut self, view: &SimView<'_>) {
        (**self).on_step(view);
    }
}

/// A [`SimObserver`] that does nothing.  The simulator's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

type RobotCallback = Box<dyn FnMut(&Robot, &Rational)>;
type PebbleCallback = Box<dyn FnMut(&Pebble, &Rational)>;
type StepCallback = Box<dyn FnMut(&SimView<'_>)>;

/// A [`SimObserver`] built from closures, one per hook.  Unset hooks do
/// nothing.
///
/// ```rust,ignore
/// let observer = CallbackObserver::new()
///     .with_step(|view| println!("t={} Δ={}", view.time, view.elapsed));
/// ```
#[derive(Default)]
pub struct CallbackObserver {
    robot_created:  Option<RobotCallback>,
    pebble_created: Option<PebbleCallback>,
    step:           Option<StepCallback>,
}

impl CallbackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_robot_created(mut self, f: impl FnMut(&Robot, &Rational) + 'static) -> Self {
        self.robot_created = Some(Box::new(f));
        self
    }

    pub fn with_pebble_created(mut self, f: impl FnMut(&Pebble, &Rational) + 'static) -> Self {
        self.pebble_created = Some(Box::new(f));
        self
    }

    pub fn with_step(mut self, f: impl FnMut(&SimView<'_>) + 'static) -> Self {
        self.step = Some(Box::new(f));
        self
    }
}

impl SimObserver for CallbackObserver {
    fn on_robot_created(&mut self, robot: &Robot, time: &Rational) {
        if let Some(f) = self.robot_created.as_mut() {
            f(robot, time);
        }
    }

    fn on_pebble_created(&mut self, pebble: &Pebble, time: &Rational) {
        if let Some(f) = self.pebble_created.as_mut() {
            f(pebble, time);
        }
    }

    fn on_step(&mut self, view: &SimView<'_>) {
        if let Some(f) = self.step.as_mut() {
            f(view);
        }
    }
}
