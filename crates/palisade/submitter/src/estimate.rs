//! Static pre-submission cost estimates.
//!
//! Estimates are quoted before generation even starts, so they key off the
//! catalog unit name and the requested tiers rather than real bytecode. The
//! shape is a base figure per unit scaled by tier multipliers; both
//! multiplier tables are monotone, so a higher tier never quotes cheaper.

use palisade_types::{round_cost, ComplexityTier, SecurityTier};

const BASE_ESTIMATES: &[(&str, f64)] = &[
    ("FundCaptureGuard", 0.012),
    ("FlowWatcherGuard", 0.010),
    ("AccessSentinel", 0.009),
    ("BaseGuard", 0.008),
];

const DEFAULT_BASE: f64 = 0.008;

fn complexity_factor(tier: ComplexityTier) -> f64 {
    match tier {
        ComplexityTier::Simple => 1.0,
        ComplexityTier::Medium => 1.25,
        ComplexityTier::Advanced => 1.6,
        ComplexityTier::Enterprise => 2.0,
    }
}

fn security_factor(tier: SecurityTier) -> f64 {
    match tier {
        SecurityTier::Basic => 1.0,
        SecurityTier::Premium => 1.2,
        SecurityTier::Enterprise => 1.5,
    }
}

/// Estimated submission cost for a catalog unit at the given tiers.
pub fn estimate_cost(unit_name: &str, complexity: ComplexityTier, security: SecurityTier) -> f64 {
    let base = BASE_ESTIMATES
        .iter()
        .find(|(name, _)| *name == unit_name)
        .map(|(_, base)| *base)
        .unwrap_or(DEFAULT_BASE);
    round_cost(base * complexity_factor(complexity) * security_factor(security))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_units_have_distinct_bases() {
        let capture = estimate_cost("FundCaptureGuard", ComplexityTier::Simple, SecurityTier::Basic);
        let base = estimate_cost("BaseGuard", ComplexityTier::Simple, SecurityTier::Basic);
        assert!(capture > base);
    }

    #[test]
    fn unknown_unit_falls_back_to_default_base() {
        let unknown = estimate_cost("Mystery", ComplexityTier::Simple, SecurityTier::Basic);
        let base = estimate_cost("BaseGuard", ComplexityTier::Simple, SecurityTier::Basic);
        assert_eq!(unknown, base);
    }

    #[test]
    fn estimate_is_monotone_in_complexity() {
        let tiers = [
            ComplexityTier::Simple,
            ComplexityTier::Medium,
            ComplexityTier::Advanced,
            ComplexityTier::Enterprise,
        ];
        for pair in tiers.windows(2) {
            let lower = estimate_cost("BaseGuard", pair[0], SecurityTier::Basic);
            let higher = estimate_cost("BaseGuard", pair[1], SecurityTier::Basic);
            assert!(higher > lower, "{:?} should cost more than {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn estimate_is_monotone_in_security() {
        let tiers = [
            SecurityTier::Basic,
            SecurityTier::Premium,
            SecurityTier::Enterprise,
        ];
        for pair in tiers.windows(2) {
            let lower = estimate_cost("BaseGuard", ComplexityTier::Medium, pair[0]);
            let higher = estimate_cost("BaseGuard", ComplexityTier::Medium, pair[1]);
            assert!(higher > lower, "{:?} should cost more than {:?}", pair[1], pair[0]);
        }
    }
}
