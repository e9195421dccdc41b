//! Static heir registry.
//!
//! Maps each relation code to its sex, kinship category, display labels
//! and the largest head count a single deceased can leave for it. The
//! registry is a lookup table only: rules key on [`Relation`] identity,
//! never on the kinship category, which exists for display grouping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basis::Language;
use crate::error::DistributionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Kinship category, used to group relations for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kinship {
    Descendant,
    Ascendant,
    Spouse,
    Sibling,
}

impl Kinship {
    pub const ALL: [Kinship; 4] = [
        Kinship::Descendant,
        Kinship::Ascendant,
        Kinship::Spouse,
        Kinship::Sibling,
    ];

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Kinship::Descendant, Language::English) => "Descendants",
            (Kinship::Ascendant, Language::English) => "Ascendants",
            (Kinship::Spouse, Language::English) => "Spouse",
            (Kinship::Sibling, Language::English) => "Siblings",
            (Kinship::Descendant, Language::Arabic) => "أبناء",
            (Kinship::Ascendant, Language::Arabic) => "أصول",
            (Kinship::Spouse, Language::Arabic) => "زوجية",
            (Kinship::Sibling, Language::Arabic) => "إخوة",
        }
    }
}

/// Closed enumeration of relation codes accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Son,
    Daughter,
    Father,
    Mother,
    Husband,
    Wife,
    Brother,
    Sister,
    HalfBrother,
    HalfSister,
    Grandfather,
    Grandmother,
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeirRelation {
    pub relation: Relation,
    pub code: &'static str,
    pub sex: Sex,
    pub kinship: Kinship,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    /// Largest head count one deceased can leave for this relation.
    pub max_count: u32,
}

impl HeirRelation {
    pub fn label(&self, lang: Language) -> &'static str {
        match lang {
            Language::English => self.label_en,
            Language::Arabic => self.label_ar,
        }
    }
}

const fn row(
    relation: Relation,
    code: &'static str,
    sex: Sex,
    kinship: Kinship,
    label_en: &'static str,
    label_ar: &'static str,
    max_count: u32,
) -> HeirRelation {
    HeirRelation {
        relation,
        code,
        sex,
        kinship,
        label_en,
        label_ar,
        max_count,
    }
}

/// Rows are stored in `Relation` discriminant order.
static REGISTRY: [HeirRelation; 12] = [
    row(Relation::Son, "son", Sex::Male, Kinship::Descendant, "Son", "ابن", u32::MAX),
    row(Relation::Daughter, "daughter", Sex::Female, Kinship::Descendant, "Daughter", "بنت", u32::MAX),
    row(Relation::Father, "father", Sex::Male, Kinship::Ascendant, "Father", "أب", 1),
    row(Relation::Mother, "mother", Sex::Female, Kinship::Ascendant, "Mother", "أم", 1),
    row(Relation::Husband, "husband", Sex::Male, Kinship::Spouse, "Husband", "زوج", 1),
    row(Relation::Wife, "wife", Sex::Female, Kinship::Spouse, "Wife", "زوجة", 4),
    row(Relation::Brother, "brother", Sex::Male, Kinship::Sibling, "Full brother", "أخ شقيق", u32::MAX),
    row(Relation::Sister, "sister", Sex::Female, Kinship::Sibling, "Full sister", "أخت شقيقة", u32::MAX),
    row(Relation::HalfBrother, "half_brother", Sex::Male, Kinship::Sibling, "Paternal half-brother", "أخ لأب", u32::MAX),
    row(Relation::HalfSister, "half_sister", Sex::Female, Kinship::Sibling, "Paternal half-sister", "أخت لأب", u32::MAX),
    row(Relation::Grandfather, "grandfather", Sex::Male, Kinship::Ascendant, "Grandfather", "جد", 1),
    row(Relation::Grandmother, "grandmother", Sex::Female, Kinship::Ascendant, "Grandmother", "جدة", 2),
];

impl Relation {
    pub const ALL: [Relation; 12] = [
        Relation::Son,
        Relation::Daughter,
        Relation::Father,
        Relation::Mother,
        Relation::Husband,
        Relation::Wife,
        Relation::Brother,
        Relation::Sister,
        Relation::HalfBrother,
        Relation::HalfSister,
        Relation::Grandfather,
        Relation::Grandmother,
    ];

    pub fn info(self) -> &'static HeirRelation {
        &REGISTRY[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn sex(self) -> Sex {
        self.info().sex
    }

    pub fn kinship(self) -> Kinship {
        self.info().kinship
    }

    pub fn label(self, lang: Language) -> &'static str {
        self.info().label(lang)
    }

    /// Full (germane) sibling, as opposed to a paternal half-sibling.
    pub fn is_full_sibling(self) -> bool {
        matches!(self, Relation::Brother | Relation::Sister)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Relation {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|r| r.code == s)
            .map(|r| r.relation)
            .ok_or_else(|| DistributionError::UnknownRelationCode {
                code: s.to_string(),
            })
    }
}

/// Iterate registry rows in display order.
pub fn relations() -> impl Iterator<Item = &'static HeirRelation> {
    REGISTRY.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_in_discriminant_order() {
        for relation in Relation::ALL {
            assert_eq!(relation.info().relation, relation);
        }
    }

    #[test]
    fn codes_round_trip_through_from_str() {
        for relation in Relation::ALL {
            assert_eq!(relation.code().parse::<Relation>().unwrap(), relation);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "cousin".parse::<Relation>().unwrap_err();
        assert_eq!(
            err,
            DistributionError::UnknownRelationCode {
                code: "cousin".to_string()
            }
        );
    }

    #[test]
    fn serde_uses_relation_codes() {
        let json = serde_json::to_string(&Relation::HalfSister).unwrap();
        assert_eq!(json, "\"half_sister\"");
    }

    #[test]
    fn sex_and_kinship() {
        assert_eq!(Relation::Wife.sex(), Sex::Female);
        assert_eq!(Relation::Wife.kinship(), Kinship::Spouse);
        assert_eq!(Relation::Grandfather.kinship(), Kinship::Ascendant);
        assert!(Relation::Sister.is_full_sibling());
        assert!(!Relation::HalfBrother.is_full_sibling());
    }

    #[test]
    fn bilingual_labels() {
        assert_eq!(Relation::Son.label(Language::English), "Son");
        assert_eq!(Relation::Son.label(Language::Arabic), "ابن");
    }
}
