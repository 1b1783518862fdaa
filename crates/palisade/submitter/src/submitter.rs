//! The submission flow: checks, payload, receipt, settled cost.

use std::sync::Arc;

use tracing::{info, warn};

use palisade_types::{round_cost, CompiledUnit, DeploymentRequest, NetworkId};

use crate::client::{NetworkClient, SimulatedNetworkClient, SubmissionPayload};
use crate::error::{SubmitError, SubmitResult};

/// Submitter configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Network submissions target.
    pub network: NetworkId,
    /// Signing credential. `None` means the submitter cannot run.
    pub credential: Option<String>,
}

impl SubmitterConfig {
    pub fn new(network: NetworkId, credential: Option<String>) -> Self {
        let credential = credential.filter(|c| !c.trim().is_empty());
        Self {
            network,
            credential,
        }
    }
}

/// What the pipeline records after a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub address: String,
    pub tx_id: String,
    /// Cost settled from the receipt, rounded to the cost precision.
    pub actual_cost: f64,
}

/// Submits compiled units through a [`NetworkClient`].
pub struct Submitter {
    config: SubmitterConfig,
    client: Arc<dyn NetworkClient>,
}

impl Submitter {
    pub fn new(config: SubmitterConfig, client: Arc<dyn NetworkClient>) -> Self {
        Self { config, client }
    }

    /// Submitter backed by the in-process simulated network.
    pub fn simulated(config: SubmitterConfig) -> Self {
        Self::new(config, Arc::new(SimulatedNetworkClient::default()))
    }

    /// Whether a signing credential is configured.
    pub fn initialized(&self) -> bool {
        self.config.credential.is_some()
    }

    /// Submit a compiled unit and settle its actual cost from the receipt.
    pub async fn submit(
        &self,
        unit: &CompiledUnit,
        constructor_args: &[serde_json::Value],
        request: &DeploymentRequest,
    ) -> SubmitResult<SubmissionOutcome> {
        if !self.initialized() {
            return Err(SubmitError::NotInitialized);
        }
        if !self.config.network.is_supported() {
            return Err(SubmitError::UnsupportedNetwork(self.config.network.chain_id()));
        }

        let payload = SubmissionPayload {
            unit_name: unit.name.clone(),
            bytecode: unit.bytecode.clone(),
            constructor_args: constructor_args.to_vec(),
            network: self.config.network,
            max_cost: request.budget,
        };

        let receipt = self.client.submit(&payload).await?;
        if receipt.units_consumed == 0 {
            // Valid per the receipt contract, but worth an operator's eye.
            warn!(
                unit = %unit.name,
                tx = %receipt.tx_id,
                "inclusion receipt reports zero units consumed"
            );
        }

        let actual_cost = round_cost(receipt.units_consumed as f64 * receipt.unit_price);
        info!(
            unit = %unit.name,
            address = %receipt.address,
            tx = %receipt.tx_id,
            cost = actual_cost,
            "submission included"
        );

        Ok(SubmissionOutcome {
            address: receipt.address,
            tx_id: receipt.tx_id,
            actual_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InclusionReceipt;
    use async_trait::async_trait;
    use palisade_types::{ComplexityTier, GuardCategory, MonitoringTier, SecurityTier};

    fn unit() -> CompiledUnit {
        CompiledUnit {
            name: "BaseGuard".to_owned(),
            interface: vec![],
            bytecode: "0x60806040".to_owned(),
            toolchain_version: "0.8.24".to_owned(),
            optimized: true,
            optimizer_runs: 200,
        }
    }

    fn request() -> DeploymentRequest {
        DeploymentRequest {
            description: "generic guard".to_owned(),
            complexity: ComplexityTier::Medium,
            security: SecurityTier::Basic,
            network: NetworkId::SUPPORTED,
            budget: 0.05,
            category: GuardCategory::Generic,
            monitoring: MonitoringTier::Basic,
            custom_requirements: vec![],
        }
    }

    fn config() -> SubmitterConfig {
        SubmitterConfig::new(NetworkId::SUPPORTED, Some("0xdeadbeef".to_owned()))
    }

    struct FixedReceiptClient {
        units_consumed: u64,
        unit_price: f64,
    }

    #[async_trait]
    impl NetworkClient for FixedReceiptClient {
        async fn submit(&self, _payload: &SubmissionPayload) -> SubmitResult<InclusionReceipt> {
            Ok(InclusionReceipt {
                address: "0x00000000000000000000000000000000000000aa".to_owned(),
                tx_id: "0xfeed".to_owned(),
                units_consumed: self.units_consumed,
                unit_price: self.unit_price,
            })
        }
    }

    #[tokio::test]
    async fn submit_settles_cost_from_receipt() {
        let client = FixedReceiptClient {
            units_consumed: 50_000,
            unit_price: 2e-9,
        };
        let submitter = Submitter::new(config(), Arc::new(client));

        let outcome = submitter.submit(&unit(), &[], &request()).await.unwrap();
        assert_eq!(outcome.actual_cost, 0.0001);
        assert!(outcome.address.starts_with("0x"));
    }

    #[tokio::test]
    async fn missing_credential_is_not_initialized() {
        let submitter = Submitter::simulated(SubmitterConfig::new(NetworkId::SUPPORTED, None));
        let err = submitter.submit(&unit(), &[], &request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::NotInitialized));
    }

    #[tokio::test]
    async fn blank_credential_is_not_initialized() {
        let submitter = Submitter::simulated(SubmitterConfig::new(
            NetworkId::SUPPORTED,
            Some("   ".to_owned()),
        ));
        assert!(!submitter.initialized());
    }

    #[tokio::test]
    async fn unsupported_network_is_rejected() {
        let submitter = Submitter::simulated(SubmitterConfig::new(
            NetworkId::new(1),
            Some("0xdeadbeef".to_owned()),
        ));
        let err = submitter.submit(&unit(), &[], &request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::UnsupportedNetwork(1)));
    }

    #[tokio::test]
    async fn zero_unit_receipt_settles_to_zero_cost() {
        let client = FixedReceiptClient {
            units_consumed: 0,
            unit_price: 2e-9,
        };
        let submitter = Submitter::new(config(), Arc::new(client));

        let outcome = submitter.submit(&unit(), &[], &request()).await.unwrap();
        assert_eq!(outcome.actual_cost, 0.0);
    }

    #[tokio::test]
    async fn simulated_end_to_end() {
        let submitter = Submitter::simulated(config());
        let outcome = submitter.submit(&unit(), &[], &request()).await.unwrap();
        assert_eq!(outcome.address.len(), 42);
        assert!(outcome.actual_cost > 0.0);
    }
}
