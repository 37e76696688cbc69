//! Seeded random stream with independent per-row sub-streams.

use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used by the benchmark binary.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic source of `[0, 1)` values for scalars and matrix fills.
///
/// Every draw operation (one scalar, or one whole matrix fill) takes the
/// next ChaCha stream id. Inside a fill, row `i` of a `rows x cols` matrix
/// seeks straight to draw `i * cols` of that stream, so a row task never
/// depends on any other task having run first.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    next_stream: u64,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            next_stream: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draw operations consumed so far.
    pub fn position(&self) -> u64 {
        self.next_stream
    }

    pub(crate) fn advance(&mut self) -> u64 {
        let stream = self.next_stream;
        self.next_stream += 1;
        stream
    }

    /// Draw one scalar in `[0, 1)`.
    pub fn next_scalar(&mut self) -> f64 {
        let stream = self.advance();
        sub_stream(self.seed, stream, 0).sample(Standard)
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Generator positioned at draw `first_draw` of `stream`.
pub(crate) fn sub_stream(seed: u64, stream: u64, first_draw: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    // one f64 sample consumes one u64, i.e. two 32-bit words
    rng.set_word_pos(first_draw as u128 * 2);
    rng
}
