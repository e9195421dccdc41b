//! Case input and validation.
//!
//! A [`Case`] can only be obtained through validation, so the engine
//! never sees a non-positive estate, an empty heir set, an unknown
//! relation code or an impossible head count.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DistributionError;
use crate::registry::{Relation, Sex};

/// Raw case as submitted by a caller, e.g. decoded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    pub deceased_sex: Sex,
    pub estate_value: Decimal,
    pub heirs: Vec<HeirInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeirInput {
    pub relation: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// What to do when one relation code appears in several entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Sum the counts into the first entry for that relation.
    #[default]
    Merge,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub duplicates: DuplicatePolicy,
}

/// Opaque identity of a heir entry within one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

/// A validated heir entry: `count` heirs of the identical relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeirEntry {
    pub id: EntryId,
    pub relation: Relation,
    pub sex: Sex,
    pub count: u32,
}

/// A validated case, read-only for the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    deceased_sex: Sex,
    estate_value: Decimal,
    entries: Vec<HeirEntry>,
}

impl Case {
    /// Validate typed heir claims into a case.
    pub fn new(
        deceased_sex: Sex,
        estate_value: Decimal,
        heirs: impl IntoIterator<Item = (Relation, u32)>,
        policy: &ValidationPolicy,
    ) -> Result<Case, DistributionError> {
        if estate_value <= Decimal::ZERO {
            return Err(DistributionError::InvalidEstateValue {
                value: estate_value.to_string(),
            });
        }

        let mut entries: Vec<HeirEntry> = Vec::new();
        for (relation, count) in heirs {
            check_count(relation, count)?;
            match entries.iter_mut().find(|e| e.relation == relation) {
                Some(existing) => match policy.duplicates {
                    DuplicatePolicy::Merge => {
                        // The extra heirs are reported against the headroom left.
                        let merged = existing.count.checked_add(count).ok_or_else(|| {
                            DistributionError::InvalidCount {
                                relation,
                                count,
                                max: relation.info().max_count - existing.count,
                            }
                        })?;
                        check_count(relation, merged)?;
                        existing.count = merged;
                    }
                    DuplicatePolicy::Reject => {
                        return Err(DistributionError::DuplicateRelation { relation });
                    }
                },
                None => entries.push(HeirEntry {
                    id: EntryId(entries.len() as u32),
                    relation,
                    sex: relation.sex(),
                    count,
                }),
            }
        }

        if entries.is_empty() {
            return Err(DistributionError::EmptyHeirSet);
        }

        let has = |r: Relation| entries.iter().any(|e| e.relation == r);
        if has(Relation::Husband) && has(Relation::Wife) {
            return Err(DistributionError::ConflictingSpouses);
        }

        // The deceased's sex drives no rule yet; a same-sex spouse is
        // most likely a data entry mistake.
        let spouse_sex = entries
            .iter()
            .find(|e| matches!(e.relation, Relation::Husband | Relation::Wife))
            .map(|e| e.sex);
        if spouse_sex == Some(deceased_sex) {
            warn!(?deceased_sex, "spouse has the same sex as the deceased");
        }

        Ok(Case {
            deceased_sex,
            estate_value,
            entries,
        })
    }

    /// Validate a raw case, resolving relation codes against the registry.
    pub fn from_input(input: &CaseInput, policy: &ValidationPolicy) -> Result<Case, DistributionError> {
        if input.estate_value <= Decimal::ZERO {
            return Err(DistributionError::InvalidEstateValue {
                value: input.estate_value.to_string(),
            });
        }
        if input.heirs.is_empty() {
            return Err(DistributionError::EmptyHeirSet);
        }
        let heirs = input
            .heirs
            .iter()
            .map(|h| Ok((h.relation.parse::<Relation>()?, h.count)))
            .collect::<Result<Vec<_>, DistributionError>>()?;
        Case::new(input.deceased_sex, input.estate_value, heirs, policy)
    }

    /// Decode and validate a JSON case document.
    ///
    /// An `estate_value` that is not a decimal amount (`"NaN"`,
    /// `"Infinity"`, free text) is an invalid estate, not a malformed
    /// document.
    pub fn from_json(value: &serde_json::Value, policy: &ValidationPolicy) -> Result<Case, DistributionError> {
        if let Some(raw) = value.get("estate_value") {
            if serde_json::from_value::<Decimal>(raw.clone()).is_err() {
                let value = match raw {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(DistributionError::InvalidEstateValue { value });
            }
        }
        let input: CaseInput =
            serde_json::from_value(value.clone()).map_err(|e| DistributionError::Deserialize {
                message: e.to_string(),
            })?;
        Case::from_input(&input, policy)
    }

    pub fn deceased_sex(&self) -> Sex {
        self.deceased_sex
    }

    pub fn estate_value(&self) -> Decimal {
        self.estate_value
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[HeirEntry] {
        &self.entries
    }

    /// First entry for a relation. With the merge policy it is the only one.
    pub fn entry(&self, relation: Relation) -> Option<&HeirEntry> {
        self.entries.iter().find(|e| e.relation == relation)
    }

    pub fn entries_of<'a>(
        &'a self,
        relations: &'a [Relation],
    ) -> impl Iterator<Item = &'a HeirEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| relations.contains(&e.relation))
    }
}

fn check_count(relation: Relation, count: u32) -> Result<(), DistributionError> {
    let max = relation.info().max_count;
    if count == 0 || count > max {
        return Err(DistributionError::InvalidCount {
            relation,
            count,
            max,
        });
    }
    Ok(())
}
