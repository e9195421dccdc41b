//! Distribution report: the immutable product of one engine run.

use std::fmt;
use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::basis::{disclaimer, legal_note, Basis, Language, Share};
use crate::case::{EntryId, HeirEntry};
use crate::error::DistributionError;
use crate::numeric::{format_amount, percentage_of, round_display};
use crate::registry::Relation;

/// One heir entry's allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    pub entry: EntryId,
    pub relation: Relation,
    pub count: u32,
    pub basis: Basis,
    pub share: Share,
    pub share_label: String,
    /// Percentage (0-100) of the whole estate.
    pub percentage: Decimal,
    pub amount: Decimal,
    pub justification: String,
}

impl AllocationRecord {
    pub(crate) fn new(
        entry: &HeirEntry,
        basis: Basis,
        amount: Decimal,
        estate_value: Decimal,
        lang: Language,
    ) -> Result<AllocationRecord, DistributionError> {
        Ok(AllocationRecord {
            entry: entry.id,
            relation: entry.relation,
            count: entry.count,
            basis,
            share: basis.share(),
            share_label: basis.share_label(lang),
            percentage: percentage_of(amount, estate_value)?,
            amount,
            justification: basis.justification(lang),
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "entry_id": self.entry,
            "relation": self.relation,
            "count": self.count,
            "share": self.share.to_string(),
            "share_label": self.share_label,
            "percentage": decimal_text(self.percentage),
            "amount": decimal_text(self.amount),
            "justification": self.justification,
        })
    }
}

/// Advisory conditions found after all stages ran. They do not
/// invalidate the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationWarning {
    /// Records sum to less than the estate.
    UnderAllocation { unallocated: Decimal },
    /// Records sum to more than the estate.
    OverAllocation { excess: Decimal },
    /// A heir was accepted but no rule assigns it a share.
    UnconsumedRelation { relation: Relation, count: u32 },
}

impl AllocationWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            AllocationWarning::UnderAllocation { .. } => "under_allocation",
            AllocationWarning::OverAllocation { .. } => "over_allocation",
            AllocationWarning::UnconsumedRelation { .. } => "unconsumed_relation",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        match self {
            AllocationWarning::UnderAllocation { unallocated } => {
                value["amount"] = serde_json::json!(decimal_text(*unallocated));
            }
            AllocationWarning::OverAllocation { excess } => {
                value["amount"] = serde_json::json!(decimal_text(*excess));
            }
            AllocationWarning::UnconsumedRelation { relation, count } => {
                value["relation"] = serde_json::json!(relation);
                value["count"] = serde_json::json!(count);
            }
        }
        value
    }
}

impl fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationWarning::UnderAllocation { unallocated } => write!(
                f,
                "{} of the estate is not assigned to any heir",
                format_amount(*unallocated)
            ),
            AllocationWarning::OverAllocation { excess } => write!(
                f,
                "fixed shares exceed the estate by {}",
                format_amount(*excess)
            ),
            AllocationWarning::UnconsumedRelation { relation, count } => write!(
                f,
                "{} x{} is not covered by any share rule and received nothing",
                relation, count
            ),
        }
    }
}

/// Ordered allocation records plus the originating estate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionReport {
    estate_value: Decimal,
    language: Language,
    records: Vec<AllocationRecord>,
    warnings: Vec<AllocationWarning>,
}

impl DistributionReport {
    pub(crate) fn new(
        estate_value: Decimal,
        language: Language,
        records: Vec<AllocationRecord>,
        warnings: Vec<AllocationWarning>,
    ) -> Self {
        DistributionReport {
            estate_value,
            language,
            records,
            warnings,
        }
    }

    pub fn estate_value(&self) -> Decimal {
        self.estate_value
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[AllocationWarning] {
        &self.warnings
    }

    pub fn records_for(&self, relation: Relation) -> impl Iterator<Item = &AllocationRecord> {
        self.records.iter().filter(move |r| r.relation == relation)
    }

    /// Amount allocated to the first record for `relation`.
    pub fn amount_for(&self, relation: Relation) -> Option<Decimal> {
        self.records_for(relation).next().map(|r| r.amount)
    }

    pub fn total_allocated(&self) -> Decimal {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Estate minus allocations; negative when over-allocated.
    pub fn unallocated(&self) -> Decimal {
        self.estate_value - self.total_allocated()
    }

    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.unallocated().abs() <= tolerance
    }

    /// Serialize to JSON output format. Decimals are strings.
    pub fn to_json(&self) -> serde_json::Value {
        let records: Vec<serde_json::Value> = self.records.iter().map(|r| r.to_json()).collect();
        let warnings: Vec<serde_json::Value> = self.warnings.iter().map(|w| w.to_json()).collect();
        serde_json::json!({
            "estate_value": decimal_text(self.estate_value),
            "language": self.language,
            "total_allocated": decimal_text(self.total_allocated()),
            "unallocated": decimal_text(self.unallocated()),
            "records": records,
            "warnings": warnings,
        })
    }

    /// Human-readable report in the report's language.
    pub fn render_text(&self, currency: &str) -> String {
        let lang = self.language;
        let h = Headings::for_language(lang);
        let money = |d: Decimal| {
            if currency.is_empty() {
                format_amount(d)
            } else {
                format!("{} {}", format_amount(d), currency)
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", h.estate, money(self.estate_value));
        for r in &self.records {
            let _ = writeln!(out);
            if r.count > 1 {
                let _ = writeln!(out, "{} ({}: {})", r.relation.label(lang), h.count, r.count);
            } else {
                let _ = writeln!(out, "{}", r.relation.label(lang));
            }
            let _ = writeln!(out, "  {}: {}", h.share, r.share_label);
            let _ = writeln!(
                out,
                "  {}: {} ({:.2}%)",
                h.amount,
                money(r.amount),
                round_display(r.percentage)
            );
            let _ = writeln!(out, "  {}: {}", h.basis, r.justification);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}: {}", h.total, money(self.total_allocated()));
        for w in &self.warnings {
            let _ = writeln!(out, "{}: {}", h.warning, w);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", legal_note(lang));
        let _ = writeln!(out, "{}", disclaimer(lang));
        out
    }
}

/// Decimals are emitted as normalized strings so trailing zeros from
/// division do not leak into output.
fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

struct Headings {
    estate: &'static str,
    count: &'static str,
    share: &'static str,
    amount: &'static str,
    basis: &'static str,
    total: &'static str,
    warning: &'static str,
}

impl Headings {
    fn for_language(lang: Language) -> Self {
        match lang {
            Language::English => Headings {
                estate: "Estate value",
                count: "count",
                share: "Share",
                amount: "Amount",
                basis: "Legal basis",
                total: "Total allocated",
                warning: "Warning",
            },
            Language::Arabic => Headings {
                estate: "قيمة التركة الإجمالية",
                count: "العدد",
                share: "النصيب",
                amount: "المبلغ",
                basis: "الأساس الشرعي",
                total: "مجموع الأنصبة",
                warning: "تنبيه",
            },
        }
    }
}
