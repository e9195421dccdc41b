//! Legal basis of each allocation and its rendered text.
//!
//! The engine decides a [`Basis`]; labels and justifications are derived
//! from it in the requested [`Language`]. Article numbers refer to the
//! family code the calculation follows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::numeric::Fraction;

/// Language of labels and justifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "ar", alias = "arabic")]
    Arabic,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" => Ok(Language::Arabic),
            other => Err(format!("unsupported language '{}' (expected en or ar)", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("en"),
            Language::Arabic => f.write_str("ar"),
        }
    }
}

/// How a share is held: a fixed fraction of the whole estate, or a
/// claim on whatever remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Share {
    Fixed(Fraction),
    Residuary,
}

impl Share {
    pub fn is_residuary(self) -> bool {
        matches!(self, Share::Residuary)
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Share::Fixed(fraction) => write!(f, "{}", fraction),
            Share::Residuary => f.write_str("residuary"),
        }
    }
}

/// The rule that produced an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    HusbandWithDescendant,
    HusbandWithoutDescendant,
    WifeWithDescendant,
    WifeWithoutDescendant,
    /// Mother reduced to a sixth by a descendant or two or more siblings.
    MotherReduced,
    MotherThird,
    /// Father's sixth by mandate alongside a descendant.
    FatherFixed,
    FatherResidue,
    SonResidue,
    DaughterWithSon,
    SoleDaughter,
    PluralDaughters,
    BrotherResidue { full: bool },
    SisterWithBrother { full: bool },
}

impl Basis {
    pub fn share(self) -> Share {
        match self {
            Basis::HusbandWithDescendant => Share::Fixed(Fraction::QUARTER),
            Basis::HusbandWithoutDescendant => Share::Fixed(Fraction::HALF),
            Basis::WifeWithDescendant => Share::Fixed(Fraction::EIGHTH),
            Basis::WifeWithoutDescendant => Share::Fixed(Fraction::QUARTER),
            Basis::MotherReduced => Share::Fixed(Fraction::SIXTH),
            Basis::MotherThird => Share::Fixed(Fraction::THIRD),
            Basis::FatherFixed => Share::Fixed(Fraction::SIXTH),
            Basis::SoleDaughter => Share::Fixed(Fraction::HALF),
            Basis::PluralDaughters => Share::Fixed(Fraction::TWO_THIRDS),
            Basis::FatherResidue
            | Basis::SonResidue
            | Basis::DaughterWithSon
            | Basis::BrotherResidue { .. }
            | Basis::SisterWithBrother { .. } => Share::Residuary,
        }
    }

    /// Short label shown next to the amount, e.g. `1/8 (eighth)`.
    pub fn share_label(self, lang: Language) -> String {
        if let Share::Fixed(fraction) = self.share() {
            return format!("{} ({})", fraction, fraction_name(fraction, lang));
        }
        match (self, lang) {
            (Basis::FatherResidue, Language::English) => "Residue (agnatic heir)".to_string(),
            (Basis::FatherResidue, Language::Arabic) => "الباقي تعصيباً".to_string(),
            (Basis::SonResidue, Language::English) => {
                "Residuary (male takes twice the female)".to_string()
            }
            (Basis::SonResidue, Language::Arabic) => "عصبة (للذكر مثل حظ الأنثيين)".to_string(),
            (Basis::DaughterWithSon, Language::English) => "Residuary with the son".to_string(),
            (Basis::DaughterWithSon, Language::Arabic) => "عصبة مع الابن".to_string(),
            (Basis::BrotherResidue { full }, lang) => match lang {
                Language::English => format!("Residuary ({})", line_en(full)),
                Language::Arabic => format!("عصبة ({})", if full { "شقيق" } else { "لأب" }),
            },
            (Basis::SisterWithBrother { full }, lang) => match lang {
                Language::English => format!("Residuary with the brother ({})", line_en(full)),
                Language::Arabic => {
                    format!("عصبة مع الأخ ({})", if full { "شقيقة" } else { "لأب" })
                }
            },
            _ => self.share().to_string(),
        }
    }

    /// Legal justification, citing the article where one applies.
    pub fn justification(self, lang: Language) -> String {
        let text = match (self, lang) {
            (Basis::HusbandWithDescendant, Language::English) => {
                "The husband takes one quarter because the deceased left an inheriting descendant (Family Code, Art. 150)"
            }
            (Basis::HusbandWithDescendant, Language::Arabic) => {
                "نصيب الزوج الربع لوجود فرع وارث (المادة 150 من قانون الأسرة)"
            }
            (Basis::HusbandWithoutDescendant, Language::English) => {
                "The husband takes one half because the deceased left no inheriting descendant"
            }
            (Basis::HusbandWithoutDescendant, Language::Arabic) => {
                "نصيب الزوج النصف لعدم وجود فرع وارث"
            }
            (Basis::WifeWithDescendant, Language::English) => {
                "The wife takes one eighth because the deceased left an inheriting descendant (Family Code, Art. 151)"
            }
            (Basis::WifeWithDescendant, Language::Arabic) => {
                "نصيب الزوجة الثمن لوجود فرع وارث (المادة 151 من قانون الأسرة)"
            }
            (Basis::WifeWithoutDescendant, Language::English) => {
                "The wife takes one quarter because the deceased left no inheriting descendant"
            }
            (Basis::WifeWithoutDescendant, Language::Arabic) => {
                "نصيب الزوجة الربع لعدم وجود فرع وارث"
            }
            (Basis::MotherReduced, Language::English) => {
                "The mother takes one sixth because of an inheriting descendant or two or more siblings (Family Code, Art. 148)"
            }
            (Basis::MotherReduced, Language::Arabic) => {
                "نصيب الأم السدس لوجود فرع وارث أو جمع من الإخوة (المادة 148 من قانون الأسرة)"
            }
            (Basis::MotherThird, Language::English) => {
                "The mother takes one third: no inheriting descendant and fewer than two siblings"
            }
            (Basis::MotherThird, Language::Arabic) => {
                "نصيب الأم الثلث لعدم وجود فرع وارث ولا جمع من الإخوة"
            }
            (Basis::FatherFixed, Language::English) => {
                "The father takes one sixth by mandate alongside an inheriting descendant (Family Code, Art. 147)"
            }
            (Basis::FatherFixed, Language::Arabic) => {
                "نصيب الأب السدس فرضاً لوجود فرع وارث (المادة 147 من قانون الأسرة)"
            }
            (Basis::FatherResidue, Language::English) => {
                "The father takes the residue as agnatic heir because there is no inheriting descendant"
            }
            (Basis::FatherResidue, Language::Arabic) => {
                "الأب يأخذ الباقي تعصيباً لعدم وجود فرع وارث"
            }
            (Basis::SonResidue, Language::English) => {
                "The son inherits as residuary heir, the male taking twice the share of the female (Family Code, Art. 144)"
            }
            (Basis::SonResidue, Language::Arabic) => {
                "الابن يرث بالتعصيب، للذكر مثل حظ الأنثيين (المادة 144 من قانون الأسرة)"
            }
            (Basis::DaughterWithSon, Language::English) => {
                "The daughter inherits as residuary heir with the son, the male taking twice the share of the female"
            }
            (Basis::DaughterWithSon, Language::Arabic) => {
                "البنت ترث مع الابن بالتعصيب، للذكر مثل حظ الأنثيين"
            }
            (Basis::SoleDaughter, Language::English) => {
                "A sole daughter inherits one half as a fixed share (Family Code, Art. 145)"
            }
            (Basis::SoleDaughter, Language::Arabic) => {
                "البنت الواحدة ترث النصف فرضاً (المادة 145 من قانون الأسرة)"
            }
            (Basis::PluralDaughters, Language::English) => {
                "Two or more daughters inherit two thirds as a fixed share"
            }
            (Basis::PluralDaughters, Language::Arabic) => "البنتان فأكثر يرثن الثلثين فرضاً",
            (Basis::BrotherResidue { full }, Language::English) => {
                return format!(
                    "The {} brother inherits as residuary heir: no inheriting descendant and no father",
                    line_en(full)
                );
            }
            (Basis::BrotherResidue { full }, Language::Arabic) => {
                return format!(
                    "الأخ {} يرث بالتعصيب لعدم وجود فرع وارث ولا أب",
                    if full { "شقيق" } else { "لأب" }
                );
            }
            (Basis::SisterWithBrother { full }, Language::English) => {
                return format!(
                    "The {} sister inherits as residuary heir with the brother",
                    line_en(full)
                );
            }
            (Basis::SisterWithBrother { full }, Language::Arabic) => {
                return format!(
                    "الأخت {} ترث مع الأخ بالتعصيب",
                    if full { "شقيقة" } else { "لأب" }
                );
            }
        };
        text.to_string()
    }
}

fn line_en(full: bool) -> &'static str {
    if full {
        "full"
    } else {
        "paternal half"
    }
}

fn fraction_name(fraction: Fraction, lang: Language) -> &'static str {
    match ((fraction.num, fraction.den), lang) {
        ((1, 2), Language::English) => "half",
        ((1, 3), Language::English) => "third",
        ((1, 4), Language::English) => "quarter",
        ((1, 6), Language::English) => "sixth",
        ((1, 8), Language::English) => "eighth",
        ((2, 3), Language::English) => "two thirds",
        ((1, 2), Language::Arabic) => "النصف",
        ((1, 3), Language::Arabic) => "الثلث",
        ((1, 4), Language::Arabic) => "الربع",
        ((1, 6), Language::Arabic) => "السدس",
        ((1, 8), Language::Arabic) => "الثمن",
        ((2, 3), Language::Arabic) => "الثلثان",
        (_, Language::English) => "fixed share",
        (_, Language::Arabic) => "فرض",
    }
}

/// School and code the rules follow, shown under every report.
pub fn legal_note(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "Calculated according to the Maliki school and the Algerian Family Code (Ordinance 84-11, as amended)"
        }
        Language::Arabic => "الحساب وفق المذهب المالكي وأحكام قانون الأسرة الجزائري (الأمر 84-11 المعدل والمتمم)",
    }
}

pub fn disclaimer(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "These results are indicative. For official documentation consult a certified notary and a qualified jurist."
        }
        Language::Arabic => {
            "هذه النتائج استرشادية. للتوثيق الرسمي، يجب مراجعة موثق معتمد وعالم شرعي متخصص."
        }
    }
}
