//! Deterministic local generator, the chain's guaranteed-success link.
//!
//! Template selection is an explicit ordered table of (keywords, category,
//! template) rows evaluated top to bottom, with a guaranteed default branch.
//! The table is data, not scattered conditionals, so the classifier is
//! directly testable.

use async_trait::async_trait;
use chrono::Utc;

use palisade_types::{DeploymentRequest, GeneratedArtifact, GuardCategory};

use crate::chain::GenerationBackend;
use crate::error::GenerationResult;
use crate::extract::scan_security_features;

/// Confidence assigned to template artifacts. Deliberately higher than the
/// remote confidence: template content is pre-vetted.
pub const TEMPLATE_CONFIDENCE: f64 = 0.95;

pub const BACKEND_NAME: &str = "template";

/// One canned guard template.
#[derive(Debug, Clone, Copy)]
pub struct GuardTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

const FUND_CAPTURE: GuardTemplate = GuardTemplate {
    name: "FundCaptureGuard",
    description: "Honeypot-style guard that captures and quarantines attacker funds",
    source: r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.24;

contract FundCaptureGuard {
    address public immutable owner;
    mapping(address => uint256) private captured;
    bool private locked;

    event FundsCaptured(address indexed from, uint256 amount);
    event FundsReleased(address indexed to, uint256 amount);

    modifier onlyOwner() {
        require(msg.sender == owner, "not owner");
        _;
    }

    modifier nonReentrant() {
        require(!locked, "reentrant");
        locked = true;
        _;
        locked = false;
    }

    constructor() {
        owner = msg.sender;
    }

    receive() external payable {
        captured[msg.sender] += msg.value;
        emit FundsCaptured(msg.sender, msg.value);
    }

    function release(address payable to, uint256 amount) external onlyOwner nonReentrant {
        require(to != address(0), "zero address");
        require(amount <= address(this).balance, "insufficient");
        to.transfer(amount);
        emit FundsReleased(to, amount);
    }
}
"#,
};

const FLOW_WATCHER: GuardTemplate = GuardTemplate {
    name: "FlowWatcherGuard",
    description: "Passive guard that records value flows and flags volume anomalies",
    source: r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.24;

contract FlowWatcherGuard {
    address public immutable owner;
    uint256 public volumeCeiling;
    uint256 public windowVolume;

    event FlowObserved(address indexed from, address indexed to, uint256 amount);
    event VolumeAnomaly(uint256 windowVolume, uint256 ceiling);

    modifier onlyOwner() {
        require(msg.sender == owner, "not owner");
        _;
    }

    constructor(uint256 ceiling) {
        owner = msg.sender;
        volumeCeiling = ceiling;
    }

    function observe(address from, address to, uint256 amount) external {
        require(from != address(0) && to != address(0), "zero address");
        windowVolume += amount;
        emit FlowObserved(from, to, amount);
        if (windowVolume > volumeCeiling) {
            emit VolumeAnomaly(windowVolume, volumeCeiling);
        }
    }

    function resetWindow() external onlyOwner {
        windowVolume = 0;
    }
}
"#,
};

const ACCESS_SENTINEL: GuardTemplate = GuardTemplate {
    name: "AccessSentinel",
    description: "Guard that enforces an allowlist on protected calls",
    source: r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.24;

contract AccessSentinel {
    address public immutable owner;
    mapping(address => bool) public allowed;

    event AccessGranted(address indexed account);
    event AccessRevoked(address indexed account);
    event AccessDenied(address indexed account);

    modifier onlyOwner() {
        require(msg.sender == owner, "not owner");
        _;
    }

    constructor() {
        owner = msg.sender;
        allowed[msg.sender] = true;
    }

    function grant(address account) external onlyOwner {
        require(account != address(0), "zero address");
        allowed[account] = true;
        emit AccessGranted(account);
    }

    function revoke(address account) external onlyOwner {
        allowed[account] = false;
        emit AccessRevoked(account);
    }

    function check(address account) external returns (bool) {
        if (!allowed[account]) {
            emit AccessDenied(account);
            return false;
        }
        return true;
    }
}
"#,
};

const BASE_GUARD: GuardTemplate = GuardTemplate {
    name: "BaseGuard",
    description: "General-purpose guard with pause control and event logging",
    source: r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.24;

contract BaseGuard {
    address public immutable owner;
    bool public paused;

    event GuardTriggered(address indexed actor, bytes32 reason);
    event PauseToggled(bool paused);

    modifier onlyOwner() {
        require(msg.sender == owner, "not owner");
        _;
    }

    constructor() {
        owner = msg.sender;
    }

    function trigger(bytes32 reason) external {
        require(!paused, "paused");
        emit GuardTriggered(msg.sender, reason);
    }

    function setPaused(bool value) external onlyOwner {
        paused = value;
        emit PauseToggled(value);
    }
}
"#,
};

/// Ordered selection table: first matching row wins, last row is the
/// guaranteed default.
const SELECTION_TABLE: &[(&[&str], GuardCategory, &GuardTemplate)] = &[
    (
        &["capture", "honeypot", "trap", "bait"],
        GuardCategory::FundCapture,
        &FUND_CAPTURE,
    ),
    (
        &["watch", "flow", "monitor", "observe"],
        GuardCategory::FlowWatcher,
        &FLOW_WATCHER,
    ),
    (
        &["access", "allowlist", "whitelist", "restrict"],
        GuardCategory::AccessControl,
        &ACCESS_SENTINEL,
    ),
];

/// The deterministic local generator. Always succeeds.
#[derive(Debug, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Select a template for the request.
    ///
    /// Keyword matches in the description take priority; the requested
    /// category is the secondary signal; `BaseGuard` is the default.
    pub fn select(request: &DeploymentRequest) -> &'static GuardTemplate {
        let description = request.description.to_ascii_lowercase();
        for (keywords, category, template) in SELECTION_TABLE {
            let keyword_hit = keywords.iter().any(|k| description.contains(k));
            if keyword_hit || request.category == *category {
                return template;
            }
        }
        &BASE_GUARD
    }

    /// Produce an artifact for the request. Infallible by construction.
    pub fn generate_artifact(&self, request: &DeploymentRequest) -> GeneratedArtifact {
        let template = Self::select(request);
        GeneratedArtifact {
            source: template.source.to_owned(),
            name: template.name.to_owned(),
            description: template.description.to_owned(),
            security_features: scan_security_features(template.source),
            confidence: TEMPLATE_CONFIDENCE,
            backend: BACKEND_NAME.to_owned(),
            generated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl GenerationBackend for TemplateGenerator {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn available(&self) -> bool {
        true
    }

    async fn generate(&self, request: &DeploymentRequest) -> GenerationResult<GeneratedArtifact> {
        Ok(self.generate_artifact(request))
    }
}
