//! The phases of one physics step.
//!
//! [`crate::physics::PhysicsEngine::update`] runs them in this order:
//! 1. [`force_phase`] — reset accelerations, then apply gravity, system
//!    forces and particle forces.
//! 2. [`integration_phase`] — semi-implicit Euler for every particle.
//! 3. [`boundary_phase`] — clamp particles back into the world bounds.
//! 4. [`collision_phase`] — one round of pairwise collision resolution,
//!    repeated `collision_iterations` times.
//!
//! [`separation_phase`] is not part of a step; it clears leftover
//! overlaps once a run is over (see
//! [`crate::physics::PhysicsEngine::settle_overlaps`]).

use crate::geometry::{Rect, Shape, Vector2D};
use crate::physics::{Particle, ParticleForce, SystemForce};

/// Rebuilds every particle's acceleration from scratch.
///
/// Accelerations are reset first and static particles receive no gravity,
/// so nothing accumulated in a previous step leaks into this one.
///
/// ### Parameters
/// - `particles` - All particles of the engine, in insertion order.
/// - `gravity` - Acceleration applied as `gravity * mass`.
/// - `system_forces` - Forces that see the whole particle set.
/// - `particle_forces` - Forces applied to each particle independently.
pub fn force_phase<S: Shape>(
    particles: &mut [Particle<S>],
    gravity: Vector2D,
    system_forces: &[SystemForce],
    particle_forces: &[ParticleForce],
) {
    for particle in particles.iter_mut() {
        particle.reset_acceleration();
        if !particle.is_static() {
            let weight = gravity * particle.mass();
            particle.apply_force(weight);
        }
    }

    for force in system_forces.iter().filter(|f| f.is_active()) {
        force.apply_to_all(particles);
    }

    for force in particle_forces.iter().filter(|f| f.is_active()) {
        for particle in particles.iter_mut() {
            force.apply(particle);
        }
    }
}

pub fn integration_phase<S: Shape>(particles: &mut [Particle<S>], dt: f64) {
    for particle in particles.iter_mut() {
        particle.update(dt);
    }
}

/// Keeps particle positions inside `bounds`.
///
/// A position past an edge is clamped onto it and the matching velocity
/// component is multiplied by `-restitution`. Only the particle's
/// position (its shape's center) is tested, not the shape's extent.
///
/// ### Returns
/// The number of particles that bounced.
pub fn boundary_phase<S: Shape>(
    particles: &mut [Particle<S>],
    bounds: &Rect,
    restitution: f64,
) -> usize {
    let mut bounced = 0;

    for particle in particles.iter_mut().filter(|p| !p.is_static()) {
        let mut position = particle.position();
        let mut velocity = particle.velocity();
        let mut hit = false;

        if position.dx < bounds.min_x() {
            position.dx = bounds.min_x();
            velocity.dx *= -restitution;
            hit = true;
        } else if position.dx > bounds.max_x() {
            position.dx = bounds.max_x();
            velocity.dx *= -restitution;
            hit = true;
        }

        if position.dy < bounds.min_y() {
            position.dy = bounds.min_y();
            velocity.dy *= -restitution;
            hit = true;
        } else if position.dy > bounds.max_y() {
            position.dy = bounds.max_y();
            velocity.dy *= -restitution;
            hit = true;
        }

        if hit {
            particle.set_position(position);
            particle.set_velocity(velocity);
            bounced += 1;
        }
    }
    bounced
}

/// Resolves every colliding pair once.
///
/// For each unordered pair `(p1, p2)` in insertion order:
///
/// 1. Skip unless the shapes collide, or if both particles are static.
/// 2. Push the particles apart by the overlap vector, split by inverse
///    mass: `p1 += c * inv1`, `p2 -= c * inv2` with
///    `c = overlap / (inv1 + inv2)`. A static particle does not move but
///    still blocks the other one.
/// 3. If the particles are approaching along the collision normal, apply
///    the impulse `-(1 + restitution) * v_n / (inv1 + inv2)`, again split
///    by inverse mass.
///
/// ### Returns
/// The number of pairs that received a positional correction.
pub fn collision_phase<S: Shape>(particles: &mut [Particle<S>], restitution: f64) -> usize {
    let mut corrected = 0;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (head, tail) = particles.split_at_mut(j);
            let p1 = &mut head[i];
            let p2 = &mut tail[0];

            let total_inverse_mass = p1.inverse_mass() + p2.inverse_mass();
            if total_inverse_mass == 0.0 {
                continue;
            }
            if !p1.is_colliding_with_other(p2) {
                continue;
            }

            let overlap = p1.overlap_vector_with(p2);
            if overlap.is_zero() {
                continue;
            }

            let correction = overlap / total_inverse_mass;
            if !p1.is_static() {
                p1.set_position(p1.position() + correction * p1.inverse_mass());
            }
            if !p2.is_static() {
                p2.set_position(p2.position() - correction * p2.inverse_mass());
            }
            corrected += 1;

            let normal = overlap.normalized();
            let velocity_along_normal = (p1.velocity() - p2.velocity()).dot(normal);
            if velocity_along_normal > 0.0 {
                continue;
            }

            let impulse_magnitude = -(1.0 + restitution) * velocity_along_normal / total_inverse_mass;
            let impulse = normal * impulse_magnitude;

            if !p1.is_static() {
                p1.set_velocity(p1.velocity() + impulse * p1.inverse_mass());
            }
            if !p2.is_static() {
                p2.set_velocity(p2.velocity() - impulse * p2.inverse_mass());
            }
        }
    }
    corrected
}

/// Moves every overlapping pair apart until its gap equals `margin`.
///
/// Only positions change, split by inverse mass like the positional
/// correction in [`collision_phase`]. Velocities are left alone. A pair
/// whose centers coincide is pushed apart along +x.
///
/// ### Returns
/// The number of pairs that were moved.
pub fn separation_phase<S: Shape>(particles: &mut [Particle<S>], margin: f64) -> usize {
    let mut separated = 0;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (head, tail) = particles.split_at_mut(j);
            let p1 = &mut head[i];
            let p2 = &mut tail[0];

            let total_inverse_mass = p1.inverse_mass() + p2.inverse_mass();
            if total_inverse_mass == 0.0 {
                continue;
            }
            let gap = p1.distance_to_other(p2);
            if gap >= 0.0 {
                continue;
            }

            let mut normal = (p1.position() - p2.position()).normalized();
            if normal.is_zero() {
                normal = Vector2D::UNIT_X;
            }
            let correction = normal * ((margin - gap) / total_inverse_mass);

            if !p1.is_static() {
                p1.set_position(p1.position() + correction * p1.inverse_mass());
            }
            if !p2.is_static() {
                p2.set_position(p2.position() - correction * p2.inverse_mass());
            }
            separated += 1;
        }
    }
    separated
}
