//! # nanoprov-id
//!
//! Random identifier generation for the nanoid provider.
//!
//! ## Design Principles
//!
//! - Alphabets are validated once, when they are built; generation never
//!   sees an empty or oversized alphabet
//! - Every symbol is drawn independently and uniformly (mask-and-reject,
//!   no modulo bias)
//! - Randomness comes from the operating system through a fallible
//!   interface, so an unavailable source is an error, not a panic
//! - Generation holds no shared state and is safe to call from any thread
//!
//! ## Example
//!
//! ```
//! use nanoprov_id::{generate, Alphabet};
//!
//! let alphabet = Alphabet::dns();
//! let id = generate(&alphabet, 10).unwrap();
//! assert_eq!(id.chars().count(), 10);
//! assert!(id.chars().all(|c| alphabet.contains(c)));
//! ```

mod alphabet;
mod error;
mod generator;

pub use alphabet::*;
pub use error::GenerationError;
pub use generator::{generate, generate_with_rng, MAX_LENGTH, MIN_LENGTH};
