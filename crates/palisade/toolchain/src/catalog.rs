//! Deployment unit selection.
//!
//! The compiled project exposes a small fixed catalog of guard units. Which
//! one a request deploys is decided by an ordered keyword table over the
//! request description; rows are checked top to bottom and the first hit
//! wins.

use palisade_types::CompiledUnit;

/// Generic guard deployed when no keyword row matches.
pub const DEFAULT_UNIT: &str = "BaseGuard";

const SELECTION_TABLE: &[(&[&str], &str)] = &[
    (&["capture", "honeypot", "trap", "bait"], "FundCaptureGuard"),
    (&["watch", "flow", "monitor", "observe"], "FlowWatcherGuard"),
    (
        &["access", "allowlist", "whitelist", "restrict"],
        "AccessSentinel",
    ),
];

/// Catalog unit name for a request description.
pub fn catalog_unit_for(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    for (keywords, unit) in SELECTION_TABLE {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return unit;
        }
    }
    DEFAULT_UNIT
}

/// Pick the unit to deploy from the compiled batch.
///
/// Preference order: the catalog unit for the description, then
/// [`DEFAULT_UNIT`], then the first compiled unit. `None` only when the
/// batch is empty, in which case the caller downgrades to a manual build.
pub fn select_unit<'a>(description: &str, units: &'a [CompiledUnit]) -> Option<&'a CompiledUnit> {
    let wanted = catalog_unit_for(description);
    units
        .iter()
        .find(|u| u.name == wanted)
        .or_else(|| units.iter().find(|u| u.name == DEFAULT_UNIT))
        .or_else(|| units.first())
}
