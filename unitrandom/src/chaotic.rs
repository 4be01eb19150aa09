//! One-dimensional chaotic maps iterated as random sources.
//!
//! Each draw advances the map once and reports the state wrapped into [0, 1).
//! These are experimental generators; their output is visibly correlated
//! from one draw to the next.

use crate::UnitSource;

pub const TENT_MU: f64 = 1.7;
pub const GAUSS_ALPHA: f64 = 0.3;
pub const GAUSS_BETA: f64 = -0.7;
pub const LOGISTIC_R: f64 = 3.99;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapKind {
    /// `x < 0.5 ? mu*x : mu*(1-x)`
    Tent { mu: f64 },
    /// `exp(-alpha*x^2) + beta`
    Gauss { alpha: f64, beta: f64 },
    /// `r*x*(1-x)`
    Logistic { r: f64 },
}

impl MapKind {
    pub fn tent() -> Self {
        MapKind::Tent { mu: TENT_MU }
    }

    pub fn gauss() -> Self {
        MapKind::Gauss {
            alpha: GAUSS_ALPHA,
            beta: GAUSS_BETA,
        }
    }

    pub fn logistic() -> Self {
        MapKind::Logistic { r: LOGISTIC_R }
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            MapKind::Tent { mu } => {
                if x < 0.5 {
                    mu * x
                } else {
                    mu * (1.0 - x)
                }
            }
            MapKind::Gauss { alpha, beta } => (-alpha * x * x).exp() + beta,
            MapKind::Logistic { r } => r * x * (1.0 - x),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChaoticMap {
    kind: MapKind,
    state: f64,
}

impl ChaoticMap {
    /// Start the map at `(seed % 1_000_000) / 1_000_000`.
    pub fn from_seed(kind: MapKind, seed: u64) -> Self {
        let start = (seed % 1_000_000) as f64 / 1_000_000.0;
        Self::with_state(kind, start)
    }

    pub fn with_state(kind: MapKind, start: f64) -> Self {
        // 0 is a fixed point of the tent and logistic maps
        let state = if start == 0.0 || !start.is_finite() {
            0.5
        } else {
            start
        };
        Self { kind, state }
    }

    /// Current unwrapped state.
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Iterate the map once and return the new unwrapped state.
    #[inline]
    pub fn step(&mut self) -> f64 {
        self.state = self.kind.apply(self.state);
        self.state
    }
}

/// Reduce `x` modulo 1 into [0, 1).
#[inline]
pub(crate) fn wrap_unit(x: f64) -> f64 {
    let v = x.rem_euclid(1.0);
    // rem_euclid of a tiny negative value rounds up to exactly 1.0
    if v >= 1.0 {
        0.0
    } else {
        v
    }
}

impl UnitSource for ChaoticMap {
    fn next_unit(&mut self) -> f64 {
        wrap_unit(self.step())
    }
}
