use crate::Generator;
use qrlink_core::ShortCode;
use rand::Rng;

/// URL-safe symbols, the same 64 that nanoid draws from.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub const DEFAULT_LENGTH: usize = 6;
const MAX_LENGTH: usize = 64;

/// Draws fixed-length codes uniformly at random from [`ALPHABET`].
///
/// No uniqueness is guaranteed. At the default length there are 64^6
/// (about 6.9e10) possible codes.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator for codes of `length` symbols, clamped to `1..=64`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_length_is_six() {
        let code = RandomGenerator::default().generate();
        assert_eq!(code.as_str().len(), 6);
    }

    #[test]
    fn codes_pass_validation() {
        let generator = RandomGenerator::new(12);
        for _ in 0..200 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), 12);
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn length_is_clamped() {
        assert_eq!(RandomGenerator::new(0).length(), 1);
        assert_eq!(RandomGenerator::new(500).length(), 64);
    }

    #[test]
    fn codes_are_distinct_in_practice() {
        let generator = RandomGenerator::new(10);
        let codes: HashSet<String> = (0..1000)
            .map(|_| generator.generate().as_str().to_owned())
            .collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
