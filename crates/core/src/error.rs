use crate::registry::Relation;

/// Errors that stop a distribution before any share is resolved.
///
/// Allocation imbalances are not errors; they are attached to the
/// report as [`crate::report::AllocationWarning`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    /// Estate value is zero, negative or not representable.
    #[error("invalid estate value: {value} (must be a positive amount)")]
    InvalidEstateValue { value: String },

    /// No heir entries were supplied.
    #[error("heir set is empty: at least one heir entry is required")]
    EmptyHeirSet,

    /// A heir entry names a relation outside the registry.
    #[error("unknown relation code '{code}'")]
    UnknownRelationCode { code: String },

    /// Count is zero, or exceeds what the relation allows.
    #[error("invalid count {count} for {relation}: allowed range is 1..={max}")]
    InvalidCount {
        relation: Relation,
        count: u32,
        max: u32,
    },

    /// The same relation code appears in more than one entry and the
    /// validation policy rejects duplicates.
    #[error("relation {relation} appears in more than one heir entry")]
    DuplicateRelation { relation: Relation },

    /// Husband and wife cannot both survive one deceased.
    #[error("husband and wife cannot both be heirs of the same deceased")]
    ConflictingSpouses,

    /// Decimal arithmetic overflowed.
    #[error("numeric overflow: {message}")]
    Overflow { message: String },

    /// The case document could not be decoded.
    #[error("invalid case document: {message}")]
    Deserialize { message: String },
}
