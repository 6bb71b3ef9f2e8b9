/// Identifier for a particle in a [`crate::physics::PhysicsEngine`].
///
/// Ids are assigned by the caller and are not indices: removing a
/// particle does not renumber the remaining ones.
pub type ParticleId = usize;
