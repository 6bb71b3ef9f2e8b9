//! Forces acting on particles.
//!
//! Forces fall into two categories, kept as separate enums so the engine
//! can dispatch on them with a single `match`:
//! - [`ParticleForce`] acts on one particle at a time.
//! - [`SystemForce`] looks at the whole particle set (pairwise effects).
//!
//! [`Force`] wraps either one for [`crate::physics::PhysicsEngine::add_force`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Shape, Vector2D};
use crate::physics::Particle;

/// Linear spring pulling every particle towards a fixed point:
/// `F = -strength * (position - center)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentralAttractionForce {
    center: Vector2D,
    strength: f64,
    pub is_active: bool,
}

impl CentralAttractionForce {
    pub fn new(center: Vector2D, strength: f64) -> Self {
        Self {
            center,
            strength,
            is_active: true,
        }
    }

    pub fn center(&self) -> Vector2D {
        self.center
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn force_on<S: Shape>(&self, particle: &Particle<S>) -> Vector2D {
        (particle.position() - self.center) * -self.strength
    }

    pub fn apply<S: Shape>(&self, particle: &mut Particle<S>) {
        if !self.is_active || particle.is_static() {
            return;
        }
        let force = self.force_on(particle);
        particle.apply_force(force);
    }
}

/// Drag opposing the current velocity: `F = -damping_factor * velocity`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DampingForce {
    pub damping_factor: f64,
    pub is_active: bool,
}

impl DampingForce {
    pub fn new(damping_factor: f64) -> Self {
        Self {
            damping_factor,
            is_active: true,
        }
    }

    pub fn apply<S: Shape>(&self, particle: &mut Particle<S>) {
        if !self.is_active || particle.is_static() {
            return;
        }
        particle.apply_force(particle.velocity() * -self.damping_factor);
    }
}

/// Pushes overlapping particles apart in proportion to how deep they
/// overlap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepulsionForce {
    pub strength: f64,
    /// Pairs whose signed gap is not below this are ignored.
    pub influence_radius: f64,
    pub is_active: bool,
}

impl RepulsionForce {
    pub fn new(strength: f64, influence_radius: f64) -> Self {
        Self {
            strength,
            influence_radius,
            is_active: true,
        }
    }

    /// Applies equal and opposite forces to every colliding pair of
    /// non-static particles within the influence radius.
    ///
    /// For a pair `(p1, p2)` with overlap vector `o` (pointing from `p2`
    /// to `p1`), `p1` receives `o.normalized() * strength * |o|` and `p2`
    /// receives the negation.
    pub fn apply_to_all<S: Shape>(&self, particles: &mut [Particle<S>]) {
        if !self.is_active {
            return;
        }

        for i in 0..particles.len() {
            if particles[i].is_static() {
                continue;
            }
            for j in (i + 1)..particles.len() {
                let (head, tail) = particles.split_at_mut(j);
                let p1 = &mut head[i];
                let p2 = &mut tail[0];

                if p2.is_static() {
                    continue;
                }
                if p1.distance_to_other(p2) >= self.influence_radius {
                    continue;
                }
                if !p1.is_colliding_with_other(p2) {
                    continue;
                }

                let overlap = p1.overlap_vector_with(p2);
                if overlap.is_zero() {
                    continue;
                }

                let force = overlap.normalized() * (self.strength * overlap.magnitude());
                p1.apply_force(force);
                p2.apply_force(-force);
            }
        }
    }
}

/// Forces applied to each particle independently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParticleForce {
    CentralAttraction(CentralAttractionForce),
    Damping(DampingForce),
}

impl ParticleForce {
    pub fn is_active(&self) -> bool {
        match self {
            ParticleForce::CentralAttraction(f) => f.is_active,
            ParticleForce::Damping(f) => f.is_active,
        }
    }

    pub fn apply<S: Shape>(&self, particle: &mut Particle<S>) {
        match self {
            ParticleForce::CentralAttraction(f) => f.apply(particle),
            ParticleForce::Damping(f) => f.apply(particle),
        }
    }
}

/// Forces computed over the whole particle set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SystemForce {
    Repulsion(RepulsionForce),
}

impl SystemForce {
    pub fn is_active(&self) -> bool {
        match self {
            SystemForce::Repulsion(f) => f.is_active,
        }
    }

    pub fn apply_to_all<S: Shape>(&self, particles: &mut [Particle<S>]) {
        match self {
            SystemForce::Repulsion(f) => f.apply_to_all(particles),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Force {
    Particle(ParticleForce),
    System(SystemForce),
}

impl From<ParticleForce> for Force {
    fn from(force: ParticleForce) -> Self {
        Force::Particle(force)
    }
}

impl From<SystemForce> for Force {
    fn from(force: SystemForce) -> Self {
        Force::System(force)
    }
}

impl From<CentralAttractionForce> for Force {
    fn from(force: CentralAttractionForce) -> Self {
        Force::Particle(ParticleForce::CentralAttraction(force))
    }
}

impl From<DampingForce> for Force {
    fn from(force: DampingForce) -> Self {
        Force::Particle(ParticleForce::Damping(force))
    }
}

impl From<RepulsionForce> for Force {
    fn from(force: RepulsionForce) -> Self {
        Force::System(SystemForce::Repulsion(force))
    }
}
