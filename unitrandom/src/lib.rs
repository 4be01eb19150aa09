//! Uniform [0, 1) random sources.
//!
//! Every source implements [`UnitSource`]. [`Algorithm::build`] turns a name
//! and a seed into a boxed source; [`Seed::Entropy`] pulls the seed from the
//! operating system.

mod chaotic;
mod gnu;
mod hybrid;
mod xoshiro;

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;

pub use chaotic::{ChaoticMap, MapKind};
pub use gnu::GnuRandom;
pub use hybrid::{HybridLcg, HybridParams, Mix};
pub use xoshiro::Xoshiro256PlusPlus;

/// A source of doubles uniformly distributed in [0, 1).
pub trait UnitSource {
    /// Next draw. Implementations must return `v` with `0.0 <= v < 1.0`.
    fn next_unit(&mut self) -> f64;

    /// Iterator over the next `count` draws.
    fn draws(&mut self, count: u64) -> Draws<'_, Self>
    where
        Self: Sized,
    {
        Draws {
            source: self,
            remaining: count,
        }
    }
}

impl<S: UnitSource + ?Sized> UnitSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Iterator returned by [`UnitSource::draws`].
pub struct Draws<'a, S> {
    source: &'a mut S,
    remaining: u64,
}

impl<S: UnitSource> Iterator for Draws<'_, S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.source.next_unit())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Where a source's seed comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Seed {
    /// Read 64 bits from the OS entropy source.
    #[default]
    Entropy,
    Fixed(u64),
}

impl Seed {
    pub fn resolve(self) -> u64 {
        match self {
            Seed::Entropy => OsRng.next_u64(),
            Seed::Fixed(seed) => seed,
        }
    }
}

impl From<Option<u64>> for Seed {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Seed::Entropy, Seed::Fixed)
    }
}

/// Named random sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Algorithm {
    /// xoshiro256++
    #[default]
    Xoshiro,
    /// glibc random(), seeded with the low 32 bits of the seed
    Glibc,
    /// Tent map, mu = 1.7
    Tent,
    /// Gauss map, alpha = 0.3, beta = -0.7
    Gauss,
    /// Logistic map, r = 3.99
    Logistic,
    /// Hybrid LCG (n^2 + a*x) mod (m + 1)
    Hybrid,
    /// Hybrid LCG reseeded every 1% of its modulus
    Switch,
    /// Switching hybrid with the sum shifted left by 5
    SwitchShift,
    /// Switching hybrid mixing x ^ a, shifted left by 5
    SwitchMaskShift,
    /// Switching hybrid with its increment scaled by the tent map
    TentHybrid,
    /// Switching hybrid with its increment scaled by the gauss map
    GaussHybrid,
}

impl Algorithm {
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Xoshiro,
        Algorithm::Glibc,
        Algorithm::Tent,
        Algorithm::Gauss,
        Algorithm::Logistic,
        Algorithm::Hybrid,
        Algorithm::Switch,
        Algorithm::SwitchShift,
        Algorithm::SwitchMaskShift,
        Algorithm::TentHybrid,
        Algorithm::GaussHybrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Xoshiro => "xoshiro",
            Algorithm::Glibc => "glibc",
            Algorithm::Tent => "tent",
            Algorithm::Gauss => "gauss",
            Algorithm::Logistic => "logistic",
            Algorithm::Hybrid => "hybrid",
            Algorithm::Switch => "switch",
            Algorithm::SwitchShift => "switch-shift",
            Algorithm::SwitchMaskShift => "switch-mask-shift",
            Algorithm::TentHybrid => "tent-hybrid",
            Algorithm::GaussHybrid => "gauss-hybrid",
        }
    }

    /// Construct the source. `count` is the number of draws the caller
    /// intends to make; only the hybrid generators use it.
    pub fn build(self, seed: u64, count: u64) -> Box<dyn UnitSource> {
        let hybrid = |params: HybridParams| -> Box<dyn UnitSource> {
            Box::new(HybridLcg::build(params, count, seed))
        };
        match self {
            Algorithm::Xoshiro => Box::new(Xoshiro256PlusPlus::seed_from_u64(seed)),
            Algorithm::Glibc => Box::new(GnuRandom::with_seed(seed as u32)),
            Algorithm::Tent => Box::new(ChaoticMap::from_seed(MapKind::tent(), seed)),
            Algorithm::Gauss => Box::new(ChaoticMap::from_seed(MapKind::gauss(), seed)),
            Algorithm::Logistic => Box::new(ChaoticMap::from_seed(MapKind::logistic(), seed)),
            Algorithm::Hybrid => hybrid(HybridParams::default()),
            Algorithm::Switch => hybrid(HybridParams::switching()),
            Algorithm::SwitchShift => hybrid(HybridParams::switch_shift()),
            Algorithm::SwitchMaskShift => hybrid(HybridParams::switch_mask_shift()),
            Algorithm::TentHybrid => hybrid(HybridParams::tent_hybrid()),
            Algorithm::GaussHybrid => hybrid(HybridParams::gauss_hybrid()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
                format!("Unknown algorithm '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}
