//! Identifier generation.
//!
//! Symbols are chosen by masking random bytes down to the smallest
//! power-of-two range that covers the alphabet and discarding bytes that
//! land past its end. Every symbol is therefore equally likely.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::{Alphabet, GenerationError};

/// Shortest identifier that can be generated.
pub const MIN_LENGTH: i64 = 1;

/// Longest identifier that can be generated.
pub const MAX_LENGTH: i64 = 64;

/// Generates an identifier of `length` symbols from the operating-system RNG.
pub fn generate(alphabet: &Alphabet, length: i64) -> Result<String, GenerationError> {
    generate_with_rng(&mut OsRng, alphabet, length)
}

/// Generates an identifier of `length` symbols from the given random source.
pub fn generate_with_rng<R>(
    rng: &mut R,
    alphabet: &Alphabet,
    length: i64,
) -> Result<String, GenerationError>
where
    R: TryRngCore + ?Sized,
{
    if alphabet.is_empty() {
        return Err(GenerationError::EmptyAlphabet);
    }

    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(GenerationError::InvalidLength {
            min: MIN_LENGTH,
            max: MAX_LENGTH,
            actual: length,
        });
    }

    // Bounded above, so the cast cannot truncate.
    let length = length as usize;
    let mask = alphabet.mask();
    let step = batch_size(alphabet.len(), mask, length);

    let mut id = String::with_capacity(length);
    let mut produced = 0;
    let mut bytes = vec![0u8; step];

    while produced < length {
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| GenerationError::EntropyUnavailable(e.to_string()))?;

        for byte in &bytes {
            if let Some(symbol) = alphabet.symbol(usize::from(byte & mask)) {
                id.push(symbol);
                produced += 1;
                if produced == length {
                    break;
                }
            }
        }
    }

    Ok(id)
}

/// Bytes to draw per batch so that one batch usually suffices.
fn batch_size(alphabet_len: usize, mask: u8, length: usize) -> usize {
    let accept_ratio = alphabet_len as f64 / (f64::from(mask) + 1.0);
    ((1.6 * length as f64) / accept_ratio).ceil() as usize
}

// =============================================================================
// Tests
// =============================================================================
