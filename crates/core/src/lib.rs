//! Mirath estate distribution engine -- accepts a validated case,
//! produces per-heir allocations with their legal basis.
//!
//! A case is validated once ([`Case`]), reduced to the facts share rules
//! condition on ([`composition::Composition`]), then run through the
//! fixed stage pipeline in [`resolve`]. The resulting
//! [`DistributionReport`] is immutable and carries any allocation
//! imbalance as warnings rather than errors.

pub mod basis;
pub mod case;
pub mod composition;
pub mod error;
pub mod numeric;
pub mod registry;
pub mod report;
pub mod resolve;

pub use basis::{Basis, Language, Share};
pub use case::{Case, CaseInput, DuplicatePolicy, EntryId, HeirEntry, HeirInput, ValidationPolicy};
pub use error::DistributionError;
pub use numeric::{estate_from_f64, Fraction};
pub use registry::{Kinship, Relation, Sex};
pub use report::{AllocationRecord, AllocationWarning, DistributionReport};
pub use resolve::{DaughterShare, EngineOptions};

/// Distribute a validated case.
///
/// Pure and synchronous: the case is only borrowed, and independent cases
/// may be distributed concurrently.
pub fn distribute(case: &Case, options: &EngineOptions) -> Result<DistributionReport, DistributionError> {
    resolve::resolve(case, options)
}

/// Validate a JSON case document and distribute it.
///
/// # Arguments
/// * `case` - `{ "deceased_sex", "estate_value", "heirs": [{ "relation", "count" }] }`
/// * `policy` - duplicate-entry handling during validation
/// * `options` - language and engine switches
pub fn distribute_json(
    case: &serde_json::Value,
    policy: &ValidationPolicy,
    options: &EngineOptions,
) -> Result<DistributionReport, DistributionError> {
    let case = Case::from_json(case, policy)?;
    distribute(&case, options)
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
