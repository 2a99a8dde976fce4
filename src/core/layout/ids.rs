//! Element identifier and visual seed sources
//!
//! Excalidraw wants a unique id per element plus a random `seed` (used for
//! the hand-drawn stroke jitter) and `versionNonce`. The layout engine takes
//! these from an injected [`IdGenerator`] so conversions can be reproduced.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::constants::{ID_LENGTH, NONCE_RANGE, SEED_RANGE};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of element identifiers and visual randomization
pub trait IdGenerator {
    /// A new identifier, never returned before by this generator
    fn next_id(&mut self) -> String;

    /// Stroke jitter seed
    fn next_seed(&mut self) -> u32;

    /// Version nonce
    fn next_nonce(&mut self) -> u32;
}

/// Deterministic counter-based generator: `el-1`, `el-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("el-{}", self.next)
    }

    fn next_seed(&mut self) -> u32 {
        self.next % SEED_RANGE
    }

    fn next_nonce(&mut self) -> u32 {
        self.next % NONCE_RANGE
    }
}

/// Random generator producing 9-character base-36 ids
pub struct RandomIds {
    rng: StdRng,
    issued: HashSet<String>,
}

impl RandomIds {
    /// Seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence for a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    fn random_id(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        loop {
            let id = self.random_id();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn next_seed(&mut self) -> u32 {
        self.rng.gen_range(0..SEED_RANGE)
    }

    fn next_nonce(&mut self) -> u32 {
        self.rng.gen_range(0..NONCE_RANGE)
    }
}
