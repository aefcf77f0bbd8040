use crate::Generator;
use shortly_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator using a sequential counter.
///
/// Produces codes like "sq0000", "sq0001", ... where the counter is
/// zero-padded so the whole code has the requested length. When the counter
/// no longer fits, the code grows past the requested length instead of
/// wrapping.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter
    /// value, e.g. to resume after a known state.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self, length: usize) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let width = length.saturating_sub(self.prefix.len());
        ShortCode::new_unchecked(format!("{}{:0width$}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("sq");

        assert_eq!(generator.generate(6).as_str(), "sq0000");
        assert_eq!(generator.generate(6).as_str(), "sq0001");
        assert_eq!(generator.generate(6).as_str(), "sq0002");
    }

    #[test]
    fn pads_to_requested_length() {
        let generator = SeqGenerator::with_prefix("node-a");

        assert_eq!(generator.generate(10).as_str(), "node-a0000");
        assert_eq!(generator.generate(7).as_str(), "node-a1");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("sq", 1000);

        assert_eq!(generator.generate(8).as_str(), "sq001000");
        assert_eq!(generator.generate(8).as_str(), "sq001001");
    }

    #[test]
    fn grows_when_counter_overflows_width() {
        let generator = SeqGenerator::with_offset("sq", 12345);

        assert_eq!(generator.generate(4).as_str(), "sq12345");
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("sq");
        generator.generate(6);
        generator.generate(6);

        let cloned = generator.clone();

        assert_eq!(generator.generate(6).as_str(), "sq0002");
        assert_eq!(cloned.generate(6).as_str(), "sq0002");
    }
}
