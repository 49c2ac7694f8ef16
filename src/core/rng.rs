//! Seedable random source for game setup.
//!
//! The engine never reaches for a process-global generator. The host owns a
//! [`GameRng`] per match and lends it to setup and start-game, so the same
//! seed plus the same action sequence always reproduces the same match.
//!
//! ```
//! use cell_duel::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let bits_a: Vec<bool> = (0..16).map(|_| a.gen_bit()).collect();
//! let bits_b: Vec<bool> = (0..16).map(|_| b.gen_bit()).collect();
//! assert_eq!(bits_a, bits_b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Unbiased coin flip.
    pub fn gen_bit(&mut self) -> bool {
        self.inner.gen::<bool>()
    }

    /// Capture the generator position for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self { inner, seed: state.seed }
    }
}

/// Serializable generator position.
///
/// ChaCha8 word position makes restore O(1) however many bits were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
