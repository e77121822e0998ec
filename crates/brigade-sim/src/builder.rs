//! Fluent builder for constructing a [`LineSimulator`].

use brigade_robot::{BoundaryPolicy, ControllerFactory};

use crate::{LineSimulator, NoopObserver, SimObserver};

/// Fluent builder for [`LineSimulator<O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                  |
/// |--------------------------|------------------------------------------|
/// | `.controller_factory(f)` | None: every robot needs an explicit controller |
/// | `.boundary_policy(p)`    | [`BoundaryPolicy::ClampAndWarn`]         |
/// | `.observer(o)`           | [`NoopObserver`]                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = LineSimulatorBuilder::new()
///     .controller_factory(PebbleSlowdownFactory::new("1/2")?)
///     .boundary_policy(BoundaryPolicy::Strict)
///     .build();
/// sim.create_robot(0, 1, None, None)?;
/// ```
pub struct LineSimulatorBuilder<O: SimObserver = NoopObserver> {
    factory:  Option<Box<dyn ControllerFactory>>,
    policy:   BoundaryPolicy,
    observer: O,
}

impl LineSimulatorBuilder<NoopObserver> {
    pub fn new() -> Self {
        Self {
            factory:  None,
            policy:   BoundaryPolicy::default(),
            observer: NoopObserver,
        }
    }
}

impl Default for LineSimulatorBuilder<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SimObserver> LineSimulatorBuilder<O> {
    /// Supply the factory that builds a controller for every robot created
    /// without an explicit one.
    pub fn controller_factory(mut self, factory: impl ControllerFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Choose what happens when a move would leave `[0, 1]`.
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the observer.  Changes the simulator's observer type.
    pub fn observer<P: SimObserver>(self, observer: P) -> LineSimulatorBuilder<P> {
        LineSimulatorBuilder {
            factory:  self.factory,
            policy:   self.policy,
            observer,
        }
    }

    pub fn build(self) -> LineSimulator<O> {
        LineSimulator::from_parts(self.factory, self.policy, self.observer)
    }
}
