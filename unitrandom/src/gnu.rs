// glibc random() with the default TYPE_3 table: degree 31, separation 3.
// srandom() fills the table with the Park-Miller "minimal standard" LCG
// and then throws away 10 * 31 outputs.

use crate::UnitSource;

const DEG: usize = 31;
const SEP: usize = 3;

/// Bit-exact emulation of glibc's `srandom()` / `random()`.
///
/// A C program calling `srand(seed)` followed by `rand()` on glibc sees the
/// same values as [`GnuRandom::next_u31`] on `GnuRandom::with_seed(seed)`.
#[derive(Clone, Debug)]
pub struct GnuRandom {
    state: [u32; DEG],
    fptr: usize,
    rptr: usize,
}

impl GnuRandom {
    /// The equivalent of `srandom(seed)`.
    pub fn with_seed(seed: u32) -> Self {
        let mut rng = Self {
            state: [0; DEG],
            fptr: 0,
            rptr: 0,
        };
        rng.srandom(seed);
        rng
    }

    fn srandom(&mut self, seed: u32) {
        // glibc: seed 0 would leave the table all zero
        let seed = if seed == 0 { 1 } else { seed };

        // The table is int32_t; a seed above i32::MAX goes in negative
        let mut word = seed as i32 as i64;
        self.state[0] = word as u32;

        // Schrage's method for 16807 * word % 2147483647 without overflow
        for i in 1..DEG {
            let hi = word / 127773;
            let lo = word % 127773;
            word = 16807 * lo - 2836 * hi;
            if word < 0 {
                word += 2147483647;
            }
            self.state[i] = word as u32;
        }

        self.fptr = SEP;
        self.rptr = 0;

        for _ in 0..(10 * DEG) {
            self.next_u31();
        }
    }

    /// Next output of `random()`, in [0, 2^31).
    pub fn next_u31(&mut self) -> u32 {
        self.state[self.fptr] = self.state[self.fptr].wrapping_add(self.state[self.rptr]);
        let result = self.state[self.fptr] >> 1;

        // Advance pointers
        self.fptr += 1;
        if self.fptr >= DEG {
            self.fptr = 0;
            self.rptr += 1;
        } else {
            self.rptr += 1;
            if self.rptr >= DEG {
                self.rptr = 0;
            }
        }

        result
    }
}

impl UnitSource for GnuRandom {
    /// `random() / 2^31`. Dividing by RAND_MAX instead would let 1.0 through.
    fn next_unit(&mut self) -> f64 {
        self.next_u31() as f64 / (1u64 << 31) as f64
    }
}
