//! Display strings used in chart labels.
use serde::{Deserialize, Serialize};

/// Language of month labels and dataset names in chart series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const EN_US_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl DisplayLocale {
    /// Short month name for a 1-based month number
    pub fn short_month(&self, month: u32) -> &'static str {
        let names = match self {
            DisplayLocale::PtBr => &PT_BR_MONTHS,
            DisplayLocale::EnUs => &EN_US_MONTHS,
        };
        names[((month.clamp(1, 12)) - 1) as usize]
    }

    pub fn income_label(&self) -> &'static str {
        match self {
            DisplayLocale::PtBr => "Receitas",
            DisplayLocale::EnUs => "Income",
        }
    }

    pub fn expenses_label(&self) -> &'static str {
        match self {
            DisplayLocale::PtBr => "Despesas",
            DisplayLocale::EnUs => "Expenses",
        }
    }

    pub fn new_members_label(&self) -> &'static str {
        match self {
            DisplayLocale::PtBr => "Novos membros",
            DisplayLocale::EnUs => "New members",
        }
    }

    pub fn attendance_label(&self) -> &'static str {
        match self {
            DisplayLocale::PtBr => "Média de presenças",
            DisplayLocale::EnUs => "Average attendance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_month_names() {
        assert_eq!(DisplayLocale::PtBr.short_month(2), "fev");
        assert_eq!(DisplayLocale::EnUs.short_month(12), "Dec");
        assert_eq!(DisplayLocale::PtBr.short_month(1), "jan");
    }

    #[test]
    fn test_locale_deserializes_from_tag() {
        let locale: DisplayLocale = serde_json::from_str("\"en-US\"").unwrap();
        assert_eq!(locale, DisplayLocale::EnUs);
        assert_eq!(DisplayLocale::default(), DisplayLocale::PtBr);
    }
}
