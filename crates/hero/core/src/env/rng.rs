//! RNG oracle for deterministic random number generation.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value. Characters derive one seed per roll
//! from their own seed and a roll counter, so a replay of the same inputs
//! reproduces every dodge and quick step.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Returns true with probability `probability` (resolution 1/10000).
    fn roll_chance(&self, seed: u64, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        let threshold = (probability.min(1.0) * 10_000.0) as u32;
        self.next_u32(seed) % 10_000 < threshold
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: the seed is the state, so the oracle can be shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for a single roll.
///
/// # Arguments
///
/// * `base_seed` - Seed assigned to the character at spawn
/// * `nonce` - Roll counter (increments after every roll)
/// * `salt` - Distinguishes independent rolls that share a nonce
pub fn compute_seed(base_seed: u64, nonce: u64, salt: u32) -> u64 {
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (salt as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Roll source bound to one character for the duration of an operation.
///
/// Each roll consumes one nonce, so the sequence of outcomes only depends on
/// the character's seed and how many rolls it has made.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    nonce: &'a mut u64,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64, nonce: &'a mut u64) -> Self {
        Self { rng, seed, nonce }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.seed, *self.nonce, 0);
        *self.nonce = self.nonce.wrapping_add(1);
        seed
    }

    /// Raw 32-bit roll.
    pub fn roll(&mut self) -> u32 {
        let seed = self.next_seed();
        self.rng.next_u32(seed)
    }

    /// Returns true with the given probability.
    pub fn chance(&mut self, probability: f32) -> bool {
        let seed = self.next_seed();
        self.rng.roll_chance(seed, probability)
    }

    /// Unit vector at a whole-degree angle picked by one roll.
    pub fn direction(&mut self) -> (f32, f32) {
        let degrees = (self.roll() % 360) as f32;
        let radians = degrees.to_radians();
        (radians.cos(), radians.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn chance_respects_bounds() {
        let low = FixedRng(0);
        let high = FixedRng(9_999);

        assert!(low.roll_chance(1, 0.5));
        assert!(!low.roll_chance(1, 0.0));
        assert!(!high.roll_chance(1, 0.5));
        assert!(high.roll_chance(1, 1.0));
    }

    #[test]
    fn dice_advances_nonce_per_roll() {
        let rng = PcgRng;
        let mut nonce = 0;
        let mut dice = Dice::new(&rng, 7, &mut nonce);

        let first = dice.roll();
        let second = dice.roll();
        assert_ne!(first, second);
        assert_eq!(nonce, 2);
    }

    #[test]
    fn direction_is_unit_length() {
        let rng = PcgRng;
        let mut nonce = 0;
        let mut dice = Dice::new(&rng, 99, &mut nonce);

        for _ in 0..16 {
            let (x, y) = dice.direction();
            assert!(((x * x + y * y) - 1.0).abs() < 1e-4);
        }
    }
}
