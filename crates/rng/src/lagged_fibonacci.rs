use rand_core::{impls, Error, RngCore, SeedableRng};

const WORD_BITS: u32 = 24;
const MODULUS: i64 = 1 << WORD_BITS;
const LONG_LAG: usize = 24;
const SHORT_LAG: usize = 10;

const SEEDER_MULTIPLIER: u64 = 40_014;
const SEEDER_MODULUS: u64 = 2_147_483_563;

pub const DEFAULT_SEED: u32 = 19_780_503;

/// Subtract-with-carry lagged Fibonacci generator on 24-bit words,
/// `x[n] = x[n-10] - x[n-24] - carry (mod 2^24)`.
#[derive(Debug, Clone)]
pub struct LaggedFibonacci {
    history: [u32; LONG_LAG],
    carry: u32,
    index: usize,
}

impl LaggedFibonacci {
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        let mut lcg = match u64::from(seed) % SEEDER_MODULUS {
            0 => 1,
            s => s,
        };

        let mut history = [0u32; LONG_LAG];
        for slot in history.iter_mut() {
            lcg = (SEEDER_MULTIPLIER * lcg) % SEEDER_MODULUS;
            *slot = (lcg % MODULUS as u64) as u32;
        }
        let carry = u32::from(history[LONG_LAG - 1] == 0);

        Self {
            history,
            carry,
            index: 0,
        }
    }

    /// Next 24-bit word.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        let short = self.history[(self.index + LONG_LAG - SHORT_LAG) % LONG_LAG];
        let long = self.history[self.index];

        let mut y = i64::from(short) - i64::from(long) - i64::from(self.carry);
        if y < 0 {
            y += MODULUS;
            self.carry = 1;
        } else {
            self.carry = 0;
        }

        let word = y as u32;
        self.history[self.index] = word;
        self.index = (self.index + 1) % LONG_LAG;
        word
    }
}

impl Default for LaggedFibonacci {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for LaggedFibonacci {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let hi = self.next_word();
        let lo = self.next_word();
        (hi << 8) | (lo >> 16)
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

impl SeedableRng for LaggedFibonacci {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new((state ^ (state >> 32)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_output() {
        let mut rng = LaggedFibonacci::default();
        let mut last = 0;
        for _ in 0..10_000 {
            last = rng.next_word();
        }
        assert_eq!(last, 7_937_952);
    }

    #[test]
    fn test_words_fit_in_24_bits() {
        let mut rng = LaggedFibonacci::new(12_345);
        for _ in 0..5_000 {
            assert!(rng.next_word() < 1 << 24);
        }
    }

    #[test]
    fn test_zero_seed_uses_default() {
        let mut a = LaggedFibonacci::new(0);
        let mut b = LaggedFibonacci::default();
        for _ in 0..50 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_seeds_give_distinct_streams() {
        let mut a = LaggedFibonacci::seed_from_u64(1);
        let mut b = LaggedFibonacci::seed_from_u64(2);
        let xs: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(xs, ys);
    }
}
