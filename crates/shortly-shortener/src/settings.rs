use jiff::SignedDuration;
use shortly_core::shortcode::MAX_LENGTH;
use typed_builder::TypedBuilder;

/// How generated codes are allocated.
///
/// The defaults try up to 1000 random codes, starting at 6 characters and
/// growing by one character after every 50 collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct GenerationPolicy {
    #[builder(default = 6)]
    pub initial_length: usize,
    #[builder(default = 1000)]
    pub max_attempts: usize,
    /// Number of failed attempts between length increments. Zero disables
    /// escalation.
    #[builder(default = 50)]
    pub escalate_every: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GenerationPolicy {
    /// Length to use for the attempt following `failed` collisions, never
    /// longer than a valid short code.
    pub fn length_after(&self, failed: usize) -> usize {
        let length = match self.escalate_every {
            0 => self.initial_length,
            every => self.initial_length.saturating_add(failed / every),
        };
        length.min(MAX_LENGTH)
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Validity applied when a request does not specify one.
    #[builder(default = SignedDuration::from_mins(30))]
    pub default_validity: SignedDuration,
    #[builder(default)]
    pub generation: GenerationPolicy,
    /// Codes that may never be allocated, e.g. route names of the UI.
    #[builder(default, setter(into))]
    pub reserved: Vec<String>,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ShortenerSettings {
    pub fn is_reserved(&self, code: &str) -> bool {
        self.reserved.iter().any(|r| r == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_values() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.initial_length, 6);
        assert_eq!(policy.max_attempts, 1000);
        assert_eq!(policy.escalate_every, 50);
    }

    #[test]
    fn length_grows_every_fifty_failures() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.length_after(0), 6);
        assert_eq!(policy.length_after(49), 6);
        assert_eq!(policy.length_after(50), 7);
        assert_eq!(policy.length_after(999), 25);
    }

    #[test]
    fn length_stops_at_longest_valid_code() {
        let policy = GenerationPolicy::builder().initial_length(40).build();
        assert_eq!(policy.length_after(0), MAX_LENGTH);
        assert_eq!(policy.length_after(999), MAX_LENGTH);

        let policy = GenerationPolicy::builder().escalate_every(1).build();
        assert_eq!(policy.length_after(999), MAX_LENGTH);
    }

    #[test]
    fn zero_disables_escalation() {
        let policy = GenerationPolicy::builder().escalate_every(0).build();
        assert_eq!(policy.length_after(500), 6);
    }

    #[test]
    fn reserved_matches_exactly() {
        let settings = ShortenerSettings::builder()
            .reserved(vec!["stats".to_string()])
            .build();
        assert!(settings.is_reserved("stats"));
        assert!(!settings.is_reserved("Stats"));
        assert!(!settings.is_reserved("stats2"));
    }
}
