//! Share resolution.
//!
//! Stages run once each in legal precedence order: spouse, mother,
//! father, descendants, collaterals. A stage sees only the remaining
//! estate left by the stages before it and never revisits their records.
//! After the last stage the total is checked against the estate and any
//! imbalance is attached to the report as a warning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::basis::{Basis, Language};
use crate::case::{Case, HeirEntry};
use crate::composition::{Composition, SiblingKind, SpouseRole, FEMALE_SIBLINGS, MALE_SIBLINGS};
use crate::error::DistributionError;
use crate::numeric::{split_weighted, Fraction};
use crate::registry::Relation;
use crate::report::{AllocationRecord, AllocationWarning, DistributionReport};

/// How daughters are paid when no son is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaughterShare {
    /// Daughters take the whole remaining estate by the weighted split,
    /// labelled as the 1/2 or 2/3 fixed share.
    #[default]
    #[serde(rename = "residue")]
    Residue,
    /// Daughters take exactly 1/2 or 2/3 of the estate; any difference
    /// is left for the balance check.
    #[serde(rename = "fixed")]
    FixedFraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub language: Language,
    pub daughters_without_son: DaughterShare,
    /// Absolute difference tolerated between allocations and estate.
    pub balance_tolerance: Decimal,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            language: Language::English,
            daughters_without_son: DaughterShare::Residue,
            balance_tolerance: Decimal::new(1, 6),
        }
    }
}

/// Read-only inputs shared by every stage.
pub struct StageContext<'a> {
    pub case: &'a Case,
    pub facts: &'a Composition,
    pub options: &'a EngineOptions,
}

/// Records produced by one stage and the estate it leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub records: Vec<AllocationRecord>,
    pub remaining: Decimal,
}

impl StageOutcome {
    fn untouched(remaining: Decimal) -> Self {
        StageOutcome {
            records: Vec::new(),
            remaining,
        }
    }
}

pub type Stage = fn(&StageContext<'_>, Decimal) -> Result<StageOutcome, DistributionError>;

/// Stages in precedence order. Reordering changes the law applied.
pub const PIPELINE: [(&str, Stage); 5] = [
    ("spouse", spouse_stage),
    ("mother", mother_stage),
    ("father", father_stage),
    ("descendants", descendant_stage),
    ("collaterals", collateral_stage),
];

/// Run every stage over `case` and produce its report.
pub fn resolve(case: &Case, options: &EngineOptions) -> Result<DistributionReport, DistributionError> {
    let facts = Composition::analyze(case);
    let ctx = StageContext {
        case,
        facts: &facts,
        options,
    };

    let mut remaining = case.estate_value();
    let mut records = Vec::new();
    for (name, stage) in PIPELINE {
        let outcome = stage(&ctx, remaining)?;
        debug!(
            stage = name,
            records = outcome.records.len(),
            remaining = %outcome.remaining,
            "stage resolved"
        );
        records.extend(outcome.records);
        remaining = outcome.remaining;
    }

    let warnings = check_allocation(case, &records, options.balance_tolerance)?;
    for w in &warnings {
        warn!(kind = w.kind(), "{}", w);
    }

    Ok(DistributionReport::new(
        case.estate_value(),
        options.language,
        records,
        warnings,
    ))
}

fn record(
    ctx: &StageContext<'_>,
    entry: &HeirEntry,
    basis: Basis,
    amount: Decimal,
) -> Result<AllocationRecord, DistributionError> {
    AllocationRecord::new(
        entry,
        basis,
        amount,
        ctx.case.estate_value(),
        ctx.options.language,
    )
}

/// Fixed fraction of the whole estate, deducted from the remainder.
fn fixed_share(
    ctx: &StageContext<'_>,
    entry: &HeirEntry,
    basis: Basis,
    fraction: Fraction,
    remaining: Decimal,
) -> Result<StageOutcome, DistributionError> {
    let amount = fraction.of(ctx.case.estate_value())?;
    Ok(StageOutcome {
        records: vec![record(ctx, entry, basis, amount)?],
        remaining: remaining - amount,
    })
}

/// Husband 1/4 or 1/2, wife 1/8 or 1/4, depending on descendants.
pub fn spouse_stage(ctx: &StageContext<'_>, remaining: Decimal) -> Result<StageOutcome, DistributionError> {
    let Some(role) = ctx.facts.spouse else {
        return Ok(StageOutcome::untouched(remaining));
    };
    let with_descendant = ctx.facts.has_descendant();
    let (relation, basis, fraction) = match (role, with_descendant) {
        (SpouseRole::Husband, true) => (Relation::Husband, Basis::HusbandWithDescendant, Fraction::QUARTER),
        (SpouseRole::Husband, false) => (Relation::Husband, Basis::HusbandWithoutDescendant, Fraction::HALF),
        (SpouseRole::Wife, true) => (Relation::Wife, Basis::WifeWithDescendant, Fraction::EIGHTH),
        (SpouseRole::Wife, false) => (Relation::Wife, Basis::WifeWithoutDescendant, Fraction::QUARTER),
    };
    match ctx.case.entry(relation) {
        Some(entry) => fixed_share(ctx, entry, basis, fraction, remaining),
        None => Ok(StageOutcome::untouched(remaining)),
    }
}

/// Mother 1/6 with a descendant or two or more siblings, else 1/3.
pub fn mother_stage(ctx: &StageContext<'_>, remaining: Decimal) -> Result<StageOutcome, DistributionError> {
    let Some(entry) = ctx.case.entry(Relation::Mother) else {
        return Ok(StageOutcome::untouched(remaining));
    };
    let reduced = ctx.facts.has_descendant() || ctx.facts.sibling_count(SiblingKind::Any) >= 2;
    if reduced {
        fixed_share(ctx, entry, Basis::MotherReduced, Fraction::SIXTH, remaining)
    } else {
        fixed_share(ctx, entry, Basis::MotherThird, Fraction::THIRD, remaining)
    }
}

/// Father 1/6 by mandate with a descendant, otherwise the whole residue.
pub fn father_stage(ctx: &StageContext<'_>, remaining: Decimal) -> Result<StageOutcome, DistributionError> {
    let Some(entry) = ctx.case.entry(Relation::Father) else {
        return Ok(StageOutcome::untouched(remaining));
    };
    if ctx.facts.has_descendant() {
        return fixed_share(ctx, entry, Basis::FatherFixed, Fraction::SIXTH, remaining);
    }
    let amount = remaining.max(Decimal::ZERO);
    Ok(StageOutcome {
        records: vec![record(ctx, entry, Basis::FatherResidue, amount)?],
        remaining: remaining - amount,
    })
}

/// Sons and daughters share the remainder, each son weighing two
/// daughters. Without a son the daughters' basis becomes the 1/2 or 2/3
/// fixed share.
pub fn descendant_stage(ctx: &StageContext<'_>, remaining: Decimal) -> Result<StageOutcome, DistributionError> {
    let facts = ctx.facts;
    if !facts.has_descendant() || remaining <= Decimal::ZERO {
        return Ok(StageOutcome::untouched(remaining));
    }

    let sons: Vec<&HeirEntry> = ctx.case.entries_of(&[Relation::Son]).collect();
    let daughters: Vec<&HeirEntry> = ctx.case.entries_of(&[Relation::Daughter]).collect();

    let daughter_basis = if facts.has_son() {
        Basis::DaughterWithSon
    } else if facts.daughter_count == 1 {
        Basis::SoleDaughter
    } else {
        Basis::PluralDaughters
    };

    if !facts.has_son() && ctx.options.daughters_without_son == DaughterShare::FixedFraction {
        let fraction = if facts.daughter_count == 1 {
            Fraction::HALF
        } else {
            Fraction::TWO_THIRDS
        };
        let total = fraction.of(ctx.case.estate_value())?;
        let weights: Vec<u64> = daughters.iter().map(|d| u64::from(d.count)).collect();
        let shares = split_weighted(total, &weights)?;
        let records = daughters
            .iter()
            .zip(shares)
            .map(|(entry, amount)| record(ctx, entry, daughter_basis, amount))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(StageOutcome {
            records,
            remaining: remaining - total,
        });
    }

    let members: Vec<(&HeirEntry, Basis, u64)> = sons
        .iter()
        .map(|e| (*e, Basis::SonResidue, 2 * u64::from(e.count)))
        .chain(
            daughters
                .iter()
                .map(|e| (*e, daughter_basis, u64::from(e.count))),
        )
        .collect();
    split_residue(ctx, &members, remaining)
}

/// Full and paternal half siblings share the remainder when there is
/// neither a descendant nor a father, brothers weighing two sisters.
pub fn collateral_stage(ctx: &StageContext<'_>, remaining: Decimal) -> Result<StageOutcome, DistributionError> {
    let facts = ctx.facts;
    if facts.has_descendant() || facts.has_father || remaining <= Decimal::ZERO {
        return Ok(StageOutcome::untouched(remaining));
    }

    let members: Vec<(&HeirEntry, Basis, u64)> = ctx
        .case
        .entries_of(&MALE_SIBLINGS)
        .map(|e| {
            let basis = Basis::BrotherResidue {
                full: e.relation.is_full_sibling(),
            };
            (e, basis, 2 * u64::from(e.count))
        })
        .chain(ctx.case.entries_of(&FEMALE_SIBLINGS).map(|e| {
            let basis = Basis::SisterWithBrother {
                full: e.relation.is_full_sibling(),
            };
            (e, basis, u64::from(e.count))
        }))
        .collect();
    if members.is_empty() {
        return Ok(StageOutcome::untouched(remaining));
    }
    split_residue(ctx, &members, remaining)
}

/// Weighted split consuming the whole residue.
fn split_residue(
    ctx: &StageContext<'_>,
    members: &[(&HeirEntry, Basis, u64)],
    residue: Decimal,
) -> Result<StageOutcome, DistributionError> {
    let weights: Vec<u64> = members.iter().map(|(_, _, w)| *w).collect();
    let shares = split_weighted(residue, &weights)?;
    let records = members
        .iter()
        .zip(shares)
        .map(|((entry, basis, _), amount)| record(ctx, entry, *basis, amount))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StageOutcome {
        records,
        remaining: Decimal::ZERO,
    })
}

/// Compare allocations with the estate and flag relations no stage
/// consumes.
fn check_allocation(
    case: &Case,
    records: &[AllocationRecord],
    tolerance: Decimal,
) -> Result<Vec<AllocationWarning>, DistributionError> {
    let mut warnings: Vec<AllocationWarning> = case
        .entries_of(&[Relation::Grandfather, Relation::Grandmother])
        .map(|e| AllocationWarning::UnconsumedRelation {
            relation: e.relation,
            count: e.count,
        })
        .collect();

    let allocated = records
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.amount))
        .ok_or_else(|| DistributionError::Overflow {
            message: format!("total of {} allocations", records.len()),
        })?;
    let gap = case.estate_value() - allocated;
    if gap > tolerance {
        warnings.push(AllocationWarning::UnderAllocation { unallocated: gap });
    } else if -gap > tolerance {
        warnings.push(AllocationWarning::OverAllocation { excess: -gap });
    }
    Ok(warnings)
}
