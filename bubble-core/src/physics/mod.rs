//! Particles, forces and the fixed-step physics engine.

mod engine;
mod force;
mod particle;
pub mod phases;

pub use engine::PhysicsEngine;
pub use force::{
    CentralAttractionForce, DampingForce, Force, ParticleForce, RepulsionForce, SystemForce,
};
pub use particle::Particle;
