use rand_core::{impls, Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 48_271;
const MODULUS: u64 = 2_147_483_647;

pub const DEFAULT_SEED: u32 = 1;

/// Park-Miller "minimal standard" linear congruential generator,
/// `x[n] = 48271 * x[n-1] mod (2^31 - 1)`.
#[derive(Debug, Clone)]
pub struct MinStd {
    state: u64,
}

impl MinStd {
    pub fn new(seed: u32) -> Self {
        let state = match u64::from(seed) % MODULUS {
            0 => 1,
            s => s,
        };
        Self { state }
    }

    /// Next value in `[1, 2^31 - 2]`.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        self.state = (MULTIPLIER * self.state) % MODULUS;
        self.state as u32
    }
}

impl Default for MinStd {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for MinStd {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // 31 bits from the first draw, the top bit of the second fills bit 0
        let hi = self.next_word();
        let lo = self.next_word();
        (hi << 1) | ((lo >> 30) & 1)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MinStd {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new((state ^ (state >> 32)) as u32)
    }
}
