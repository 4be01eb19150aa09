//! Hybrid linear congruential generators.
//!
//! The base step is `x = (c + a*x) mod (m + 1)`, reported as `x / (m + 1)`,
//! with `c = n^2` for a run of `n` values. Variants change how `x` and `a`
//! are mixed ([`Mix`]), reseed `x` every `round(w * m)` draws, or scale `c`
//! by `exp(t)` where `t` walks a chaotic map.

use crate::{ChaoticMap, MapKind, UnitSource, Xoshiro256PlusPlus};

/// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Left shift applied by the shifting mixes.
const SHIFT: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mix {
    /// `c + a*x`
    #[default]
    Multiply,
    /// `(c + a*x) << 5`
    MultiplyShift,
    /// `(c + (x ^ a)) << 5`
    MaskShift,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HybridParams {
    /// Modulus parameter `m`; values fall in `0..=m`.
    pub modulus: u64,
    /// `a = 5 * 10^k`.
    pub multiplier_exp: u32,
    pub mix: Mix,
    /// Reseed every `round(w * m)` draws. `None` never reseeds.
    pub reseed_fraction: Option<f64>,
    /// Scale the increment by `exp(t)` of this map's state.
    pub increment_map: Option<MapKind>,
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            modulus: (1 << 31) - 2,
            multiplier_exp: 6,
            mix: Mix::Multiply,
            reseed_fraction: None,
            increment_map: None,
        }
    }
}

impl HybridParams {
    /// Reseeds with the usual 1% worst-case period.
    pub fn switching() -> Self {
        Self {
            reseed_fraction: Some(0.01),
            ..Self::default()
        }
    }

    pub fn switch_shift() -> Self {
        Self {
            mix: Mix::MultiplyShift,
            ..Self::switching()
        }
    }

    pub fn switch_mask_shift() -> Self {
        Self {
            mix: Mix::MaskShift,
            ..Self::switching()
        }
    }

    /// Switching generator whose increment follows the tent map.
    pub fn tent_hybrid() -> Self {
        Self {
            increment_map: Some(MapKind::tent()),
            ..Self::switching()
        }
    }

    /// Switching generator whose increment follows the gauss map.
    pub fn gauss_hybrid() -> Self {
        Self {
            increment_map: Some(MapKind::gauss()),
            ..Self::switching()
        }
    }

    pub fn multiplier(&self) -> u128 {
        5 * 10u128.pow(self.multiplier_exp)
    }

    fn reseed_period(&self) -> Option<u64> {
        self.reseed_fraction
            .map(|w| ((w * self.modulus as f64).round() as u64).max(1))
    }
}

#[derive(Clone, Debug)]
pub struct HybridLcg {
    state: u128,
    modulus: u128,
    multiplier: u128,
    mix: Mix,
    /// `n^2`, scaled per draw when `chaos` is set.
    base_increment: u128,
    chaos: Option<ChaoticMap>,
    period: Option<u64>,
    drawn: u64,
    reseeder: Xoshiro256PlusPlus,
}

impl HybridLcg {
    /// Build a generator for a run of `count` values.
    ///
    /// Returns an error if:
    /// - the modulus is zero
    /// - `a = 5 * 10^k` does not fit in 64 bits (k > 18)
    /// - the reseed fraction is not a positive finite number
    pub fn new(params: HybridParams, count: u64, seed: u64) -> Result<Self, String> {
        if params.modulus == 0 {
            return Err("Hybrid modulus must be at least 1".to_string());
        }
        if params.multiplier_exp > 18 {
            return Err(format!(
                "Multiplier exponent {} too large (max 18)",
                params.multiplier_exp
            ));
        }
        if let Some(w) = params.reseed_fraction {
            if !(w.is_finite() && w > 0.0) {
                return Err(format!("Reseed fraction {} must be positive", w));
            }
        }

        Ok(Self::build(params, count, seed))
    }

    /// Skips validation; only for the presets on [`HybridParams`].
    pub(crate) fn build(params: HybridParams, count: u64, seed: u64) -> Self {
        let n = count as u128;
        let mut reseeder = Xoshiro256PlusPlus::seed_from_u64(seed);
        reseeder.jump();

        Self {
            state: seed as u128,
            modulus: params.modulus as u128 + 1,
            multiplier: params.multiplier(),
            mix: params.mix,
            base_increment: n * n,
            chaos: params
                .increment_map
                .map(|kind| ChaoticMap::from_seed(kind, seed)),
            period: params.reseed_period(),
            drawn: 0,
            reseeder,
        }
    }

    fn increment(&mut self) -> u128 {
        match &mut self.chaos {
            Some(map) => {
                let scale = map.state().exp();
                map.step();
                // Saturating float-to-int cast; only the residue matters
                (self.base_increment as f64 * scale) as u128
            }
            None => self.base_increment,
        }
    }

    /// Next raw value in `0..=m`.
    pub fn next_raw(&mut self) -> u64 {
        if let Some(period) = self.period {
            if self.drawn % period == 0 {
                self.state = self.reseeder.next_u64() as u128;
            }
        }
        self.drawn += 1;

        let m = self.modulus;
        let c = self.increment() % m;

        // x < 2^64 and a < 2^63, so neither the product nor the XOR overflows;
        // shifting the reduced sum is the same as shifting then reducing
        self.state = match self.mix {
            Mix::Multiply => (c + (self.state % m) * self.multiplier % m) % m,
            Mix::MultiplyShift => {
                let sum = (c + (self.state % m) * self.multiplier % m) % m;
                (sum << SHIFT) % m
            }
            Mix::MaskShift => {
                let sum = (c + (self.state ^ self.multiplier) % m) % m;
                (sum << SHIFT) % m
            }
        };
        self.state as u64
    }
}

impl UnitSource for HybridLcg {
    fn next_unit(&mut self) -> f64 {
        let v = self.next_raw() as f64 / self.modulus as f64;
        // Large moduli lose precision and can round x / (m + 1) up to 1.0
        v.min(BELOW_ONE)
    }
}
