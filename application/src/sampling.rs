//! Candidate sampling
//!
//! Draws the candidates of each decision uniformly, without replacement,
//! from the decision's pool. Each sequence run owns its own source.

use council_domain::{Candidate, CandidateSet};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Seed mixed from wall-clock nanoseconds, process id, OS randomness and
/// a heap address, hashed with SHA-256.
pub fn entropy_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let os_random: [u8; 16] = rand::rng().random();
    let marker = Box::new(0u8);
    let address = &*marker as *const u8 as usize;

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(os_random);
    hasher.update(address.to_le_bytes());
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(seed)
}

/// Uniform sampler over candidate pools
///
/// # Example
///
/// ```
/// use council_application::CandidateSource;
/// use council_domain::Candidate;
///
/// let pool: Vec<Candidate> = ["A DETECTIVE", "A THIEF", "A GHOST", "A KING"]
///     .into_iter()
///     .map(Candidate::from)
///     .collect();
/// let mut source = CandidateSource::with_seed(42);
///
/// let drawn = source.draw(&pool, 2).unwrap();
/// assert_eq!(drawn.len(), 2);
///
/// // Asking for more than the pool holds returns the whole pool.
/// assert_eq!(source.draw(&pool, 10).unwrap().len(), 4);
/// ```
pub struct CandidateSource {
    rng: StdRng,
}

impl CandidateSource {
    /// Source seeded from [`entropy_seed`], so repeated runs differ.
    pub fn from_entropy_mix() -> Self {
        Self::with_seed(entropy_seed())
    }

    /// Deterministic source for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Re-seed: from `seed` when given, otherwise from fresh entropy.
    pub fn reseed(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(entropy_seed);
        debug!(seed, "Re-seeding candidate source");
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw `count` distinct candidates from `pool`.
    ///
    /// Returns the entire pool (shuffled) when `count` exceeds its size, and
    /// `None` only for an empty pool or a zero count.
    pub fn draw(&mut self, pool: &[Candidate], count: usize) -> Option<CandidateSet> {
        let amount = count.min(pool.len());
        if amount == 0 {
            return None;
        }
        let drawn = index::sample(&mut self.rng, pool.len(), amount)
            .into_iter()
            .map(|i| pool[i].clone())
            .collect();
        CandidateSet::new(drawn)
    }
}

impl Default for CandidateSource {
    fn default() -> Self {
        Self::from_entropy_mix()
    }
}
