//! Run-to-convergence driver for a [`PhysicsEngine`].
//!
//! [`OfflineSimulation::run`] steps the engine with a fixed time step in a
//! tight loop until one of these holds:
//! - the iteration cap is reached,
//! - a stop was requested (through a [`StopHandle`] or the update hook),
//! - more than `min_iterations` steps have run and the system is stable.
//!
//! The loop never yields. Callers that need responsiveness run it on a
//! worker thread and stop it through a [`StopHandle`]; the request is
//! seen at the top of the next iteration.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::config::SimulationConfig;
use crate::geometry::Shape;
use crate::physics::{Force, Particle, PhysicsEngine};
use crate::tolerance::KINETIC_ENERGY_THRESHOLD;

/// Called with the fixed time step before or after every engine update.
pub type StepHook = Box<dyn FnMut(f64) + Send>;

/// Called after every step with the engine and the 1-based iteration
/// number. Returning [`ControlFlow::Break`] stops the run.
pub type UpdateHook<S> = Box<dyn FnMut(&PhysicsEngine<S>, usize) -> ControlFlow<()> + Send>;

/// Lifecycle of an [`OfflineSimulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Idle,
    Running,
    Stable,
    IterationCapReached,
    Stopped,
}

/// Why [`OfflineSimulation::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// The stability predicate held after the minimum iteration count.
    Stable,
    /// `max_iterations` steps ran without the system becoming stable.
    IterationCapReached,
    /// A stop was requested.
    Stopped,
}

impl From<SimulationOutcome> for SimulationState {
    fn from(outcome: SimulationOutcome) -> Self {
        match outcome {
            SimulationOutcome::Stable => SimulationState::Stable,
            SimulationOutcome::IterationCapReached => SimulationState::IterationCapReached,
            SimulationOutcome::Stopped => SimulationState::Stopped,
        }
    }
}

/// Cloneable, thread-safe handle that asks a running simulation to stop.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests a stop; observed before the next step.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn start(&self) {
        self.running.store(true, Ordering::Release);
    }
}

/// Owns one engine and steps it until it settles.
pub struct OfflineSimulation<S: Shape> {
    engine: PhysicsEngine<S>,
    config: SimulationConfig,
    state: SimulationState,
    stop: StopHandle,
    iteration_count: usize,
    total_simulated_time: f64,
    on_pre_step: Option<StepHook>,
    on_post_step: Option<StepHook>,
    on_update: Option<UpdateHook<S>>,
}

impl<S: Shape> OfflineSimulation<S> {
    pub fn new(engine: PhysicsEngine<S>, config: &SimulationConfig) -> Self {
        Self {
            engine,
            config: *config,
            state: SimulationState::Idle,
            stop: StopHandle::default(),
            iteration_count: 0,
            total_simulated_time: 0.0,
            on_pre_step: None,
            on_post_step: None,
            on_update: None,
        }
    }

    pub fn engine(&self) -> &PhysicsEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PhysicsEngine<S> {
        &mut self.engine
    }

    pub fn into_engine(self) -> PhysicsEngine<S> {
        self.engine
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    pub fn total_simulated_time(&self) -> f64 {
        self.total_simulated_time
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    pub fn set_on_pre_step(&mut self, hook: impl FnMut(f64) + Send + 'static) {
        self.on_pre_step = Some(Box::new(hook));
    }

    pub fn set_on_post_step(&mut self, hook: impl FnMut(f64) + Send + 'static) {
        self.on_post_step = Some(Box::new(hook));
    }

    pub fn set_on_update(
        &mut self,
        hook: impl FnMut(&PhysicsEngine<S>, usize) -> ControlFlow<()> + Send + 'static,
    ) {
        self.on_update = Some(Box::new(hook));
    }

    pub fn add_particle(&mut self, particle: Particle<S>) {
        self.engine.add_particle(particle);
    }

    pub fn add_force(&mut self, force: impl Into<Force>) {
        self.engine.add_force(force);
    }

    /// Steps the engine until it is stable, stopped or capped.
    ///
    /// The iteration counter restarts at zero; the simulated time keeps
    /// accumulating across runs until [`OfflineSimulation::reset`].
    pub fn run(&mut self) -> SimulationOutcome {
        self.stop.start();
        self.iteration_count = 0;
        self.state = SimulationState::Running;

        debug!(
            "simulation: run started ({} particles, dt={:.4}, min={}, max={})",
            self.engine.particle_count(),
            self.config.fixed_delta_time_seconds,
            self.config.min_iterations,
            self.config.max_iterations
        );

        let outcome = loop {
            if !self.stop.is_running() {
                break SimulationOutcome::Stopped;
            }
            if self.iteration_count >= self.config.max_iterations {
                break SimulationOutcome::IterationCapReached;
            }

            self.step();
            self.iteration_count += 1;

            if let Some(hook) = self.on_update.as_mut()
                && hook(&self.engine, self.iteration_count).is_break()
            {
                break SimulationOutcome::Stopped;
            }

            if self.iteration_count > self.config.min_iterations && self.is_stable() {
                break SimulationOutcome::Stable;
            }
        };

        self.stop.stop();
        self.state = outcome.into();

        match outcome {
            SimulationOutcome::IterationCapReached => warn!(
                "simulation: hit the iteration cap ({}) before settling, ke={:.5}",
                self.config.max_iterations,
                self.engine.total_kinetic_energy()
            ),
            _ => debug!(
                "simulation: finished as {:?} after {} iterations",
                outcome, self.iteration_count
            ),
        }
        outcome
    }

    /// One fixed step: pre-step hook, engine update, post-step hook.
    pub fn step(&mut self) {
        let dt = self.config.fixed_delta_time_seconds;
        if let Some(hook) = self.on_pre_step.as_mut() {
            hook(dt);
        }
        self.engine.update(dt);
        if let Some(hook) = self.on_post_step.as_mut() {
            hook(dt);
        }
        self.total_simulated_time += dt;
    }

    /// Clears the engine's particles and forces and zeroes the counters.
    /// The caller has to seed the engine again before the next run.
    pub fn reset(&mut self) {
        self.stop.stop();
        self.engine.clear();
        self.iteration_count = 0;
        self.total_simulated_time = 0.0;
        self.state = SimulationState::Idle;
    }

    /// Negligible total kinetic energy, or every particle at rest.
    pub fn is_stable(&self) -> bool {
        self.engine.total_kinetic_energy() < KINETIC_ENERGY_THRESHOLD
            || self.engine.all_particles_at_rest()
    }
}
