pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use shortly_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Nothing here promises uniqueness: the caller checks the table and asks
/// again on collision, possibly with a longer length.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self, length: usize) -> Self::Output {
        (**self).generate(length)
    }
}
