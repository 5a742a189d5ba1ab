//! Password generator — uniform draws from a configurable charset.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 16;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub length: usize,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { length: DEFAULT_LENGTH, include_numbers: true, include_symbols: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPassword {
    pub password: String,
    pub length: usize,
    pub charset_size: usize,
}

#[must_use]
pub fn charset(options: &GeneratorOptions) -> Vec<char> {
    let mut set = String::from(LETTERS);
    if options.include_numbers {
        set.push_str(DIGITS);
    }
    if options.include_symbols {
        set.push_str(SYMBOLS);
    }
    set.chars().collect()
}

/// Generate a password; the length is clamped to
/// [`MIN_LENGTH`]`..=`[`MAX_LENGTH`].
pub fn generate<R: Rng>(options: &GeneratorOptions, rng: &mut R) -> GeneratedPassword {
    let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);
    let chars = charset(options);
    let password = (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect();
    GeneratedPassword { password, length, charset_size: chars.len() }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
