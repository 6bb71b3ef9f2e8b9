use crate::geometry::{Shape, Vector2D};
use crate::tolerance::{EPSILON, REST_SPEED_THRESHOLD};
use crate::types::ParticleId;

/// A shape plus the kinematic state that moves it.
///
/// The particle owns its shape exclusively. Every position change goes
/// through one private path that also moves the shape, so
/// `shape().center() == position().as_point()` holds at all times.
///
/// A mass of zero makes the particle static: it ignores forces, never
/// integrates, and has an inverse mass of zero.
#[derive(Clone, Debug)]
pub struct Particle<S: Shape> {
    id: ParticleId,
    position: Vector2D,
    previous_position: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    mass: f64,
    inverse_mass: f64,
    shape: S,
}

fn inverse_of(mass: f64) -> f64 {
    assert!(
        mass.is_finite() && mass >= 0.0,
        "particle mass must be finite and non-negative, got {mass}"
    );
    if mass == 0.0 { 0.0 } else { 1.0 / mass }
}

impl<S: Shape> Particle<S> {
    /// Creates a particle at rest and moves `shape` so its center sits on
    /// `position`.
    ///
    /// ### Panics
    /// If `mass` is negative, infinite or NaN. Use a mass of zero for a
    /// static particle.
    pub fn new(id: ParticleId, position: Vector2D, mass: f64, shape: S) -> Self {
        let mut particle = Self {
            id,
            position,
            previous_position: position,
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            mass,
            inverse_mass: inverse_of(mass),
            shape,
        };
        particle.move_to(position);
        particle
    }

    /// Creates a particle positioned at its shape's current center.
    pub fn from_shape(id: ParticleId, mass: f64, shape: S) -> Self {
        let position = Vector2D::from(shape.center());
        Self::new(id, position, mass, shape)
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vector2D {
        self.position
    }

    #[inline]
    pub fn previous_position(&self) -> Vector2D {
        self.previous_position
    }

    #[inline]
    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    #[inline]
    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn into_shape(self) -> S {
        self.shape
    }

    /// The only place `position` is written.
    fn move_to(&mut self, position: Vector2D) {
        self.position = position;
        self.shape.set_center(position.as_point());
    }

    /// Teleports the particle, remembering where it came from.
    pub fn set_position(&mut self, position: Vector2D) {
        self.previous_position = self.position;
        self.move_to(position);
    }

    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    /// Changes the mass; zero makes the particle static.
    ///
    /// ### Panics
    /// If `mass` is negative, infinite or NaN.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.inverse_mass = inverse_of(mass);
    }

    /// Accumulates `force * inverse_mass` into the acceleration.
    /// Static particles ignore forces.
    pub fn apply_force(&mut self, force: Vector2D) {
        if self.is_static() {
            return;
        }
        self.acceleration += force * self.inverse_mass;
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vector2D::ZERO;
    }

    /// Semi-implicit Euler step: velocity first, then position with the
    /// new velocity.
    pub fn update(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        self.previous_position = self.position;
        self.velocity += self.acceleration * dt;
        self.move_to(self.position + self.velocity * dt);
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn is_at_rest(&self) -> bool {
        self.speed() < REST_SPEED_THRESHOLD
    }

    pub fn distance_to_other(&self, other: &Self) -> f64 {
        self.shape.distance_to_other(&other.shape)
    }

    pub fn is_colliding_with_other(&self, other: &Self) -> bool {
        self.shape.is_colliding_with_other(&other.shape, EPSILON)
    }

    pub fn is_edge_to_edge_with_other(&self, other: &Self) -> bool {
        self.shape.is_edge_to_edge_with_other(&other.shape, EPSILON)
    }

    /// Direction from `other` to `self`, scaled by the penetration depth.
    ///
    /// Zero unless the shapes collide, and zero when both centers
    /// coincide (there is no direction to push in).
    pub fn overlap_vector_with(&self, other: &Self) -> Vector2D {
        if !self.is_colliding_with_other(other) {
            return Vector2D::ZERO;
        }
        let direction = (self.position - other.position).normalized();
        let depth = -self.distance_to_other(other);
        direction * depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoxedCircle, Point};
    use approx::assert_relative_eq;

    fn circle_particle(id: ParticleId, x: f64, y: f64, mass: f64) -> Particle<BoxedCircle> {
        Particle::new(
            id,
            Vector2D::new(x, y),
            mass,
            BoxedCircle::from_center(Point::ZERO, 10.0),
        )
    }

    #[test]
    fn shape_follows_position() {
        let mut p = circle_particle(0, 5.0, 7.0, 1.0);
        assert_eq!(p.shape().center(), Point::new(5.0, 7.0));

        p.set_position(Vector2D::new(-3.0, 4.0));
        assert_eq!(p.shape().center(), p.position().as_point());
        assert_eq!(p.previous_position(), Vector2D::new(5.0, 7.0));

        p.set_velocity(Vector2D::new(10.0, 0.0));
        p.update(0.5);
        assert_eq!(p.shape().center(), p.position().as_point());
    }

    #[test]
    fn from_shape_uses_the_shape_center() {
        let p = Particle::from_shape(3, 1.0, BoxedCircle::from_center(Point::new(4.0, 2.0), 1.0));
        assert_eq!(p.id(), 3);
        assert_eq!(p.position(), Vector2D::new(4.0, 2.0));
    }

    #[test]
    fn semi_implicit_euler_uses_updated_velocity() {
        let mut p = circle_particle(0, 0.0, 0.0, 2.0);
        p.apply_force(Vector2D::new(4.0, 0.0));
        assert_eq!(p.acceleration(), Vector2D::new(2.0, 0.0));

        p.update(0.5);
        assert_eq!(p.velocity(), Vector2D::new(1.0, 0.0));
        assert_eq!(p.position(), Vector2D::new(0.5, 0.0));
        assert_eq!(p.previous_position(), Vector2D::ZERO);

        p.reset_acceleration();
        assert_eq!(p.acceleration(), Vector2D::ZERO);
    }

    #[test]
    fn static_particles_ignore_forces_and_never_move() {
        let mut p = circle_particle(0, 1.0, 1.0, 0.0).with_velocity(Vector2D::new(3.0, 3.0));
        assert!(p.is_static());

        p.apply_force(Vector2D::new(100.0, -50.0));
        assert_eq!(p.acceleration(), Vector2D::ZERO);

        for dt in [0.0, 1.0 / 60.0, 1.0, 1e6] {
            p.update(dt);
            assert_eq!(p.position(), Vector2D::new(1.0, 1.0));
        }
    }

    #[test]
    fn set_mass_toggles_static() {
        let mut p = circle_particle(0, 0.0, 0.0, 4.0);
        assert!(!p.is_static());
        assert_relative_eq!(p.inverse_mass(), 0.25);

        p.set_mass(0.0);
        assert!(p.is_static());
        assert_eq!(p.inverse_mass(), 0.0);

        p.set_mass(2.0);
        assert!(!p.is_static());
        assert_relative_eq!(p.inverse_mass(), 0.5);
    }

    #[test]
    #[should_panic(expected = "finite and non-negative")]
    fn infinite_mass_is_rejected() {
        let mut p = circle_particle(0, 0.0, 0.0, 4.0);
        p.set_mass(f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "finite and non-negative")]
    fn negative_mass_is_rejected_on_creation() {
        circle_particle(0, 0.0, 0.0, -1.0);
    }

    #[test]
    fn energy_and_rest() {
        let p = circle_particle(0, 0.0, 0.0, 2.0).with_velocity(Vector2D::new(3.0, 4.0));
        assert_relative_eq!(p.speed(), 5.0);
        assert_relative_eq!(p.kinetic_energy(), 25.0);
        assert!(!p.is_at_rest());
        assert!(circle_particle(1, 0.0, 0.0, 1.0).is_at_rest());
    }

    #[test]
    fn overlap_vector_points_away_from_other() {
        let a = circle_particle(0, 15.0, 0.0, 1.0);
        let b = circle_particle(1, 0.0, 0.0, 1.0);
        let overlap = a.overlap_vector_with(&b);
        assert!(overlap.is_equal_to(Vector2D::new(5.0, 0.0), 1e-12));
        assert!(b.overlap_vector_with(&a).is_equal_to(Vector2D::new(-5.0, 0.0), 1e-12));

        let far = circle_particle(2, 50.0, 0.0, 1.0);
        assert_eq!(a.overlap_vector_with(&far), Vector2D::ZERO);
    }

    #[test]
    fn coincident_centers_have_no_overlap_direction() {
        let a = circle_particle(0, 0.0, 0.0, 1.0);
        let b = circle_particle(1, 0.0, 0.0, 1.0);
        assert!(a.is_colliding_with_other(&b));
        assert_eq!(a.overlap_vector_with(&b), Vector2D::ZERO);
    }

    #[test]
    fn touching_particles_are_edge_to_edge() {
        let a = circle_particle(0, 0.0, 0.0, 1.0);
        let b = circle_particle(1, 20.0, 0.0, 1.0);
        assert!(a.is_edge_to_edge_with_other(&b));
        assert!(a.is_colliding_with_other(&b));
    }
}
