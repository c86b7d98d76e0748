use crate::Generator;
use qrlink_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator producing `prefix` plus a zero-padded counter.
///
/// Codes come out as "qr000000", "qr000001", ... which makes it useful for
/// reproducible tests and for seeding fixtures. The prefix must itself be
/// made of URL-safe characters.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a generator whose first code uses `offset` as its counter.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("qr");

        assert_eq!(generator.generate().as_str(), "qr000000");
        assert_eq!(generator.generate().as_str(), "qr000001");
        assert_eq!(generator.generate().as_str(), "qr000002");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("ln", 1000);

        assert_eq!(generator.generate().as_str(), "ln001000");
        assert_eq!(generator.generate().as_str(), "ln001001");
    }
}
