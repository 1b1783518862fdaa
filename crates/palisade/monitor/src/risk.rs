//! Static risk assessment of a deployment.

use tracing::debug;

use palisade_types::{ComplexityTier, DeploymentRequest, RiskAssessment, RiskLevel, SecurityTier};

fn has_feature(features: &[String], name: &str) -> bool {
    features.iter().any(|f| f == name)
}

fn level_for(score: f64) -> RiskLevel {
    if score < 25.0 {
        RiskLevel::Low
    } else if score < 50.0 {
        RiskLevel::Medium
    } else if score < 75.0 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

/// Score a deployment request against the security features detected in its
/// generated source.
///
/// The score starts at a neutral 50 and moves with the security tier, the
/// complexity tier, and each detected safety idiom; it is clamped to
/// [0, 100]. Missing reentrancy or access-control protection is recorded as
/// a vulnerability note, present idioms as mitigation notes.
pub fn assess_risk(request: &DeploymentRequest, features: &[String]) -> RiskAssessment {
    let mut score: f64 = 50.0;
    let mut vulnerabilities = Vec::new();
    let mut mitigations = Vec::new();

    score += match request.security {
        SecurityTier::Basic => 10.0,
        SecurityTier::Premium => -10.0,
        SecurityTier::Enterprise => -20.0,
    };

    score += match request.complexity {
        ComplexityTier::Simple => 0.0,
        ComplexityTier::Medium => 5.0,
        ComplexityTier::Advanced => 10.0,
        ComplexityTier::Enterprise => 15.0,
    };

    if has_feature(features, "reentrancy-guard") {
        score -= 10.0;
        mitigations.push("reentrancy guard present on state-mutating paths".to_owned());
    } else {
        score += 10.0;
        vulnerabilities.push("no reentrancy protection detected".to_owned());
    }

    if has_feature(features, "access-control") {
        score -= 10.0;
        mitigations.push("caller access control present".to_owned());
    } else {
        score += 10.0;
        vulnerabilities.push("no access control detected".to_owned());
    }

    if has_feature(features, "input-validation") {
        score -= 5.0;
        mitigations.push("inputs validated before use".to_owned());
    }
    if has_feature(features, "event-emission") {
        score -= 5.0;
        mitigations.push("state changes emit events for off-chain monitoring".to_owned());
    }

    let score = score.clamp(0.0, 100.0);
    let overall_risk = level_for(score);
    debug!(score, risk = overall_risk.as_str(), "risk assessment computed");

    RiskAssessment {
        overall_risk,
        score,
        vulnerabilities,
        mitigations,
    }
}
