use crate::Generator;
use rand::distr::Alphanumeric;
use rand::Rng;
use shortly_core::ShortCode;

/// Random `[A-Za-z0-9]` codes drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self, length: usize) -> Self::Output {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
