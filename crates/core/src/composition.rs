//! Composition analyzer: the facts about a heir set that share rules
//! condition on. Pure function of the case; absence yields `false`/`0`.

use crate::case::Case;
use crate::registry::Relation;

/// Surviving spouse role. One deceased leaves at most one of the two,
/// which validation enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpouseRole {
    Husband,
    Wife,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingKind {
    Male,
    Female,
    Any,
}

pub const MALE_SIBLINGS: [Relation; 2] = [Relation::Brother, Relation::HalfBrother];
pub const FEMALE_SIBLINGS: [Relation; 2] = [Relation::Sister, Relation::HalfSister];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub son_count: u64,
    pub daughter_count: u64,
    pub has_father: bool,
    pub has_mother: bool,
    pub spouse: Option<SpouseRole>,
    pub male_sibling_count: u64,
    pub female_sibling_count: u64,
}

impl Composition {
    pub fn analyze(case: &Case) -> Composition {
        let mut facts = Composition::default();
        for entry in case.entries() {
            let count = u64::from(entry.count);
            match entry.relation {
                Relation::Son => facts.son_count += count,
                Relation::Daughter => facts.daughter_count += count,
                Relation::Father => facts.has_father = true,
                Relation::Mother => facts.has_mother = true,
                Relation::Husband => facts.spouse = Some(SpouseRole::Husband),
                Relation::Wife => facts.spouse = Some(SpouseRole::Wife),
                Relation::Brother | Relation::HalfBrother => facts.male_sibling_count += count,
                Relation::Sister | Relation::HalfSister => facts.female_sibling_count += count,
                Relation::Grandfather | Relation::Grandmother => {}
            }
        }
        facts
    }

    pub fn has_descendant(&self) -> bool {
        self.son_count > 0 || self.daughter_count > 0
    }

    pub fn has_son(&self) -> bool {
        self.son_count > 0
    }

    pub fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }

    /// Head count of full and paternal half siblings of the given kind.
    pub fn sibling_count(&self, kind: SiblingKind) -> u64 {
        match kind {
            SiblingKind::Male => self.male_sibling_count,
            SiblingKind::Female => self.female_sibling_count,
            SiblingKind::Any => self.male_sibling_count + self.female_sibling_count,
        }
    }
}
