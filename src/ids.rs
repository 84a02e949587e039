//! Short identifier generation.

use uuid::Uuid;

/// Length of every generated identifier.
pub const ID_LEN: usize = 5;

/// Seam for identifier generation so tests can force deterministic
/// collisions. Production uses [`RandomId`].
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Takes the first [`ID_LEN`] characters of a random v4 UUID in its
/// canonical string form. Short enough to collide eventually, which is why
/// the shortener verifies uniqueness instead of assuming it.
#[derive(Default)]
pub struct RandomId;

impl IdGenerator for RandomId {
    fn generate(&self) -> String {
        let mut id = Uuid::new_v4().to_string();
        id.truncate(ID_LEN);
        id
    }
}
