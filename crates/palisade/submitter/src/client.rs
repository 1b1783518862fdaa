//! Network client abstraction and the simulated implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palisade_types::NetworkId;

use crate::error::SubmitResult;

/// Everything the network needs to include a compiled unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Unit (contract) name, for logging and explorers.
    pub unit_name: String,
    /// Hex-encoded binary payload.
    pub bytecode: String,
    /// Constructor arguments, already encoded for the wire.
    pub constructor_args: Vec<serde_json::Value>,
    /// Target network.
    pub network: NetworkId,
    /// Ceiling the caller is willing to pay.
    pub max_cost: f64,
}

/// Proof of inclusion returned by the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InclusionReceipt {
    /// Address the unit now lives at.
    pub address: String,
    /// Transaction identifier.
    pub tx_id: String,
    /// Execution units the inclusion consumed.
    pub units_consumed: u64,
    /// Price per execution unit at inclusion time.
    pub unit_price: f64,
}

/// One network endpoint capable of including submissions.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Submit the payload and wait for its inclusion receipt.
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitResult<InclusionReceipt>;
}

/// In-process client that fabricates receipts with realistic shape.
///
/// Consumption scales with payload size so larger units cost more, and
/// addresses and transaction ids are freshly random each call.
pub struct SimulatedNetworkClient {
    unit_price: f64,
}

impl SimulatedNetworkClient {
    pub fn new(unit_price: f64) -> Self {
        Self { unit_price }
    }
}

impl Default for SimulatedNetworkClient {
    fn default() -> Self {
        // Roughly the observed per-unit price on the supported testnet.
        Self::new(2e-9)
    }
}

const BASE_UNITS: u64 = 21_000;
const UNITS_PER_BYTE: u64 = 200;

fn random_hex(chars: usize) -> String {
    let mut hex = String::with_capacity(chars);
    while hex.len() < chars {
        hex.push_str(&Uuid::new_v4().simple().to_string());
    }
    hex.truncate(chars);
    hex
}

#[async_trait]
impl NetworkClient for SimulatedNetworkClient {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitResult<InclusionReceipt> {
        let body_len = payload.bytecode.trim_start_matches("0x").len() as u64 / 2;
        Ok(InclusionReceipt {
            address: format!("0x{}", random_hex(40)),
            tx_id: format!("0x{}", random_hex(64)),
            units_consumed: BASE_UNITS + body_len * UNITS_PER_BYTE,
            unit_price: self.unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(bytecode: &str) -> SubmissionPayload {
        SubmissionPayload {
            unit_name: "BaseGuard".to_owned(),
            bytecode: bytecode.to_owned(),
            constructor_args: vec![],
            network: NetworkId::SUPPORTED,
            max_cost: 0.05,
        }
    }

    #[tokio::test]
    async fn simulated_receipts_have_chain_shape() {
        let client = SimulatedNetworkClient::default();
        let receipt = client.submit(&payload("0x60806040")).await.unwrap();

        assert_eq!(receipt.address.len(), 42);
        assert!(receipt.address.starts_with("0x"));
        assert_eq!(receipt.tx_id.len(), 66);
        assert!(receipt.units_consumed >= BASE_UNITS);
    }

    #[tokio::test]
    async fn larger_payloads_consume_more() {
        let client = SimulatedNetworkClient::default();
        let small = client.submit(&payload("0x6080")).await.unwrap();
        let large = client
            .submit(&payload(&format!("0x{}", "60".repeat(512))))
            .await
            .unwrap();
        assert!(large.units_consumed > small.units_consumed);
    }
}
