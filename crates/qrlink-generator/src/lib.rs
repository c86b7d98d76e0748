pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use qrlink_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage;
/// the caller is responsible for rejecting codes that are already taken.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    fn generate(&self) -> Self::Output;
}
