// Reference: https://prng.di.unimi.it/
// Recommended general-purpose PRNG from Vigna & Blackman.
// Period: 2^256 - 1, passes BigCrush and PractRand.

use crate::UnitSource;

/// Fast, high-quality PRNG using the xoshiro256++ algorithm.
///
/// This is the default source for the printer. Floats are built from the
/// top 53 bits of each output, so every draw lies in [0, 1).
#[derive(Clone, Debug)]
pub struct Xoshiro256PlusPlus {
    s: [u64; 4],
}

impl Xoshiro256PlusPlus {
    /// Create a new RNG seeded from a u64.
    ///
    /// Uses SplitMix64 to expand the seed into the full 256-bit state,
    /// as recommended by the xoshiro authors.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut z = seed;
        let mut state = [0u64; 4];
        for s in &mut state {
            z = z.wrapping_add(0x9e3779b97f4a7c15);
            let mut x = z;
            x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
            *s = x ^ (x >> 31);
        }
        Self { s: state }
    }

    /// Generate the next u64 value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a double in [0, 1) from the upper 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// Advance the state by 2^128 calls. The hybrid generators reseed from a
    /// jumped copy so their reseed values never overlap the seed's own stream.
    pub fn jump(&mut self) {
        const JUMP: [u64; 4] = [
            0x180ec6d33cfd0aba,
            0xd5a61266f0c9392c,
            0xa9582618e03fc9aa,
            0x39abdc4529b1661c,
        ];

        let mut acc = [0u64; 4];

        for &jump_val in &JUMP {
            for b in 0..64 {
                if (jump_val >> b) & 1 != 0 {
                    for (a, s) in acc.iter_mut().zip(self.s.iter()) {
                        *a ^= *s;
                    }
                }
                self.next_u64();
            }
        }

        self.s = acc;
    }
}

impl UnitSource for Xoshiro256PlusPlus {
    fn next_unit(&mut self) -> f64 {
        self.next_f64()
    }
}
