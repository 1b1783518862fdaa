//! Step plan construction.
//!
//! Every deployment follows the same five-step plan; only the estimates
//! vary with the requested tiers. Time estimates scale with complexity and
//! the submission step carries the static pre-submission cost estimate.

use palisade_submitter::estimate_cost;
use palisade_toolchain::catalog_unit_for;
use palisade_types::{ComplexityTier, DeploymentRequest, PipelineStep, UserActionKind};

/// Number of steps in every deployment plan.
pub const TOTAL_STEPS: u32 = 5;

fn time_scale(tier: ComplexityTier) -> f64 {
    match tier {
        ComplexityTier::Simple => 1.0,
        ComplexityTier::Medium => 1.25,
        ComplexityTier::Advanced => 1.6,
        ComplexityTier::Enterprise => 2.0,
    }
}

/// Build the ordered step plan for a request.
pub fn build_plan(request: &DeploymentRequest) -> Vec<PipelineStep> {
    let scale = time_scale(request.complexity);
    let secs = |base: u64| (base as f64 * scale).round() as u64;
    let submit_cost = estimate_cost(
        catalog_unit_for(&request.description),
        request.complexity,
        request.security,
    );

    vec![
        PipelineStep::new(
            1,
            "Generate guard source",
            "Produce the guard source through the generation backend chain",
        )
        .with_estimates(secs(45), 0.0),
        PipelineStep::new(
            2,
            "Compile",
            "Compile the project and select the unit to deploy",
        )
        .with_estimates(secs(30), 0.0),
        PipelineStep::new(
            3,
            "Submit to network",
            "Sign the submission and await inclusion",
        )
        .with_user_action(UserActionKind::Sign)
        .with_estimates(secs(60), submit_cost),
        PipelineStep::new(
            4,
            "Package configuration",
            "Render the settings and descriptor documents",
        )
        .with_user_action(UserActionKind::Configure)
        .with_estimates(secs(15), 0.0),
        PipelineStep::new(
            5,
            "Enable monitoring",
            "Derive the monitoring policy and verify alert rules",
        )
        .with_user_action(UserActionKind::Verify)
        .with_estimates(secs(20), 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_types::{
        Deployment, GuardCategory, MonitoringTier, NetworkId, SecurityTier, UserId,
    };

    fn request(complexity: ComplexityTier, security: SecurityTier) -> DeploymentRequest {
        DeploymentRequest {
            description: "capture funds from attackers".to_owned(),
            complexity,
            security,
            network: NetworkId::SUPPORTED,
            budget: 0.05,
            category: GuardCategory::FundCapture,
            monitoring: MonitoringTier::Basic,
            custom_requirements: vec![],
        }
    }

    #[test]
    fn plan_has_five_numbered_steps() {
        let plan = build_plan(&request(ComplexityTier::Medium, SecurityTier::Basic));
        assert_eq!(plan.len(), TOTAL_STEPS as usize);
        for (i, step) in plan.iter().enumerate() {
            assert_eq!(step.number, i as u32 + 1);
        }
    }

    #[test]
    fn submission_step_blocks_on_signing() {
        let plan = build_plan(&request(ComplexityTier::Medium, SecurityTier::Basic));
        let submit = &plan[2];
        assert!(submit.requires_user_action);
        assert_eq!(submit.action_kind, Some(UserActionKind::Sign));
        assert!(submit.estimated_cost > 0.0);
    }

    #[test]
    fn aggregate_estimate_is_monotone_in_complexity() {
        let tiers = [
            ComplexityTier::Simple,
            ComplexityTier::Medium,
            ComplexityTier::Advanced,
            ComplexityTier::Enterprise,
        ];
        let cost = |c| {
            Deployment::new(
                UserId::new("u1"),
                request(c, SecurityTier::Basic),
                build_plan(&request(c, SecurityTier::Basic)),
            )
            .estimated_cost
        };
        for pair in tiers.windows(2) {
            assert!(cost(pair[1]) >= cost(pair[0]));
        }
    }

    #[test]
    fn aggregate_estimate_is_monotone_in_security() {
        let tiers = [
            SecurityTier::Basic,
            SecurityTier::Premium,
            SecurityTier::Enterprise,
        ];
        let cost = |s| {
            Deployment::new(
                UserId::new("u1"),
                request(ComplexityTier::Medium, s),
                build_plan(&request(ComplexityTier::Medium, s)),
            )
            .estimated_cost
        };
        for pair in tiers.windows(2) {
            assert!(cost(pair[1]) >= cost(pair[0]));
        }
    }

    #[test]
    fn time_estimates_scale_with_complexity() {
        let simple = build_plan(&request(ComplexityTier::Simple, SecurityTier::Basic));
        let enterprise = build_plan(&request(ComplexityTier::Enterprise, SecurityTier::Basic));
        for (a, b) in simple.iter().zip(&enterprise) {
            assert!(b.estimated_secs > a.estimated_secs);
        }
    }
}
