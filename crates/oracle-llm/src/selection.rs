//! Weighted primary/fallback provider selection

use oracle_config::ProviderKind;
use rand::Rng;

/// Providers to try for one request, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Provider called first
    pub primary: ProviderKind,
    /// Provider called once if the primary fails
    pub fallback: Option<ProviderKind>,
}

/// Pick the primary and fallback among the providers holding a credential
///
/// `available` is ordered by preference. With two candidates the first one
/// becomes primary with probability `primary_weight` (clamped to 0..=1) and
/// the other becomes the fallback. A single candidate has no fallback.
/// Returns `None` when nothing is available.
pub fn select<R: Rng>(available: &[ProviderKind], primary_weight: f64, rng: &mut R) -> Option<Selection> {
    match *available {
        [] => None,
        [only] => Some(Selection {
            primary: only,
            fallback: None,
        }),
        [preferred, other, ..] => {
            let weight = if primary_weight.is_nan() {
                0.0
            } else {
                primary_weight.clamp(0.0, 1.0)
            };

            let (primary, fallback) = if rng.random_bool(weight) {
                (preferred, other)
            } else {
                (other, preferred)
            };

            Some(Selection {
                primary,
                fallback: Some(fallback),
            })
        }
    }
}
