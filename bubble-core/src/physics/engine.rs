use log::{debug, trace};

use crate::config::EngineConfig;
use crate::geometry::{Rect, Shape, Vector2D};
use crate::physics::phases::{
    boundary_phase, collision_phase, force_phase, integration_phase, separation_phase,
};
use crate::physics::{Force, Particle, ParticleForce, SystemForce};
use crate::types::ParticleId;

/// Owns a set of particles and the forces acting on them, and advances
/// them one fixed step at a time.
///
/// See [`crate::physics::phases`] for what one step does.
#[derive(Clone, Debug)]
pub struct PhysicsEngine<S: Shape> {
    particles: Vec<Particle<S>>,
    particle_forces: Vec<ParticleForce>,
    system_forces: Vec<SystemForce>,
    gravity: Vector2D,
    world_bounds: Option<Rect>,
    restitution_coefficient: f64,
    collision_iterations: usize,
}

impl<S: Shape> Default for PhysicsEngine<S> {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl<S: Shape> PhysicsEngine<S> {
    /// An empty engine with the default [`EngineConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            particles: Vec::new(),
            particle_forces: Vec::new(),
            system_forces: Vec::new(),
            gravity: cfg.gravity,
            world_bounds: None,
            restitution_coefficient: cfg.restitution_coefficient,
            collision_iterations: cfg.collision_iterations,
        }
    }

    // ------------------------------------------------------------------
    // Particles
    // ------------------------------------------------------------------

    pub fn add_particle(&mut self, particle: Particle<S>) {
        self.particles.push(particle);
    }

    /// Removes the first particle with `id`.
    ///
    /// ### Returns
    /// The removed particle, or `None` if no particle has that id.
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle<S>> {
        let index = self.particles.iter().position(|p| p.id() == id)?;
        Some(self.particles.remove(index))
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle<S>> {
        self.particles.iter().find(|p| p.id() == id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle<S>> {
        self.particles.iter_mut().find(|p| p.id() == id)
    }

    /// Particles in insertion order.
    pub fn particles(&self) -> &[Particle<S>] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Shapes of all particles, in insertion order.
    pub fn shapes(&self) -> Vec<S> {
        self.particles.iter().map(|p| p.shape().clone()).collect()
    }

    // ------------------------------------------------------------------
    // Forces
    // ------------------------------------------------------------------

    pub fn add_force(&mut self, force: impl Into<Force>) {
        match force.into() {
            Force::Particle(f) => self.particle_forces.push(f),
            Force::System(f) => self.system_forces.push(f),
        }
    }

    /// Removes the first force equal to `force`.
    ///
    /// ### Returns
    /// `true` if a force was removed.
    pub fn remove_force(&mut self, force: impl Into<Force>) -> bool {
        match force.into() {
            Force::Particle(f) => remove_first(&mut self.particle_forces, &f),
            Force::System(f) => remove_first(&mut self.system_forces, &f),
        }
    }

    pub fn particle_forces(&self) -> &[ParticleForce] {
        &self.particle_forces
    }

    pub fn system_forces(&self) -> &[SystemForce] {
        &self.system_forces
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn gravity(&self) -> Vector2D {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector2D) {
        self.gravity = gravity;
    }

    pub fn world_bounds(&self) -> Option<Rect> {
        self.world_bounds
    }

    pub fn set_world_bounds(&mut self, bounds: Option<Rect>) {
        self.world_bounds = bounds;
    }

    pub fn restitution_coefficient(&self) -> f64 {
        self.restitution_coefficient
    }

    pub fn set_restitution_coefficient(&mut self, restitution: f64) {
        self.restitution_coefficient = restitution;
    }

    pub fn collision_iterations(&self) -> usize {
        self.collision_iterations
    }

    pub fn set_collision_iterations(&mut self, iterations: usize) {
        self.collision_iterations = iterations;
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advances the system by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        force_phase(
            &mut self.particles,
            self.gravity,
            &self.system_forces,
            &self.particle_forces,
        );
        integration_phase(&mut self.particles, dt);

        let bounced = match &self.world_bounds {
            Some(bounds) => boundary_phase(&mut self.particles, bounds, self.restitution_coefficient),
            None => 0,
        };

        let mut corrected = 0;
        for _ in 0..self.collision_iterations {
            corrected += self.resolve_collisions();
        }

        trace!(
            "engine: step dt={dt:.4} bounced={bounced} corrected={corrected} ke={:.5}",
            self.total_kinetic_energy()
        );
    }

    /// Runs one round of pairwise collision resolution.
    ///
    /// ### Returns
    /// The number of pairs that were pushed apart.
    pub fn resolve_collisions(&mut self) -> usize {
        collision_phase(&mut self.particles, self.restitution_coefficient)
    }

    /// `true` if any pair that could still move overlaps by more than
    /// `tolerance`.
    pub fn has_overlaps(&self, tolerance: f64) -> bool {
        let particles = &self.particles;
        (0..particles.len()).any(|i| {
            particles[i + 1..].iter().any(|other| {
                let p = &particles[i];
                p.inverse_mass() + other.inverse_mass() > 0.0
                    && p.distance_to_other(other) < -tolerance
            })
        })
    }

    /// Pushes overlapping pairs apart until no pair overlaps at all, for at
    /// most `max_rounds` rounds.
    ///
    /// Only positions matter after a run, so this clears the residual
    /// overlaps a capped run can leave behind. Every pair that is moved ends
    /// up `margin` apart, and particles are clamped back into the world
    /// bounds after each round.
    ///
    /// ### Returns
    /// The number of rounds that were needed.
    pub fn settle_overlaps(&mut self, max_rounds: usize, margin: f64) -> usize {
        let mut rounds = 0;
        while rounds < max_rounds && self.has_overlaps(0.0) {
            separation_phase(&mut self.particles, margin);
            if let Some(bounds) = &self.world_bounds {
                boundary_phase(&mut self.particles, bounds, self.restitution_coefficient);
            }
            rounds += 1;
        }
        if rounds > 0 {
            debug!("engine: settled residual overlaps in {rounds} round(s)");
        }
        rounds
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    pub fn all_particles_at_rest(&self) -> bool {
        self.particles.iter().all(|p| p.is_at_rest())
    }

    /// Removes every particle and force. Settings are kept.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.particle_forces.clear();
        self.system_forces.clear();
    }

    /// Logs position and velocity of every particle at debug level.
    pub fn log_state(&self) {
        for p in &self.particles {
            let pos = p.position();
            let vel = p.velocity();
            debug!(
                "particle {}: pos=({:.2}, {:.2}) vel=({:.2}, {:.2})",
                p.id(),
                pos.dx,
                pos.dy,
                vel.dx,
                vel.dy
            );
        }
    }
}

fn remove_first<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    match items.iter().position(|x| x == item) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}
