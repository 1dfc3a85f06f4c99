use rand::{Error, RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

const PCG_MULTIPLIER: u64 = 6364136223846793005;
const PCG_INCREMENT: u64 = 1442695040888963407;

/// Small seeded PRNG shared by the finder and every layout.
///
/// A fixed seed reproduces the same sequence of candidate choices and so the
/// same puzzle. Seeds drawn from the OS are remembered so a run can be
/// replayed with `--seed`.
#[derive(Debug, Clone)]
pub struct PuzzleRng {
    seed: u64,
    state: u64,
}

impl PuzzleRng {
    /// Seed from OS entropy, or from the clock when the OS has none to give
    pub fn from_entropy_seed() -> Self {
        let mut bytes = [0u8; 8];
        let seed = match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                tracing::warn!("OS entropy unavailable ({e}), seeding from the clock");
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            }
        };
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            state: seed.wrapping_add(1),
        }
    }

    /// The seed this generator started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance the LCG state and permute its high bits (xorshift, then a
    /// state-dependent rotation) into 32 output bits.
    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(PCG_INCREMENT);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngCore for PuzzleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PuzzleRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::with_seed(seed)
    }
}
