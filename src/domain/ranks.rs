//! Fixed catalog of military ranks, ordered from highest precedence to lowest.

use serde::Serialize;

/// A selectable rank: the stored value and the label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub value: &'static str,
    pub label: &'static str,
}

impl RankEntry {
    const fn same(value: &'static str) -> Self {
        Self {
            value,
            label: value,
        }
    }
}

/// "No selection" entry offered first in a rank picker. Never a valid rank.
pub const SENTINEL: RankEntry = RankEntry {
    value: "",
    label: "اختر الرتبة العسكرية",
};

/// Bucket label for members without a rank in aggregated statistics.
pub const UNSPECIFIED_LABEL: &str = "غير محدد";

pub const RANKS: [RankEntry; 17] = [
    RankEntry::same("مشير"),
    RankEntry::same("فريق أول"),
    RankEntry::same("فريق"),
    RankEntry::same("لواء"),
    RankEntry::same("عميد"),
    RankEntry::same("عقيد"),
    RankEntry::same("رائد"),
    RankEntry::same("نقيب"),
    RankEntry::same("ملازم أول"),
    RankEntry::same("ملازم"),
    RankEntry::same("مساعد أول"),
    RankEntry::same("مساعد"),
    RankEntry::same("رقيب أول"),
    RankEntry::same("رقيب"),
    RankEntry::same("عريف"),
    RankEntry::same("جندي أول"),
    RankEntry::same("جندي"),
];

/// Returns true iff `value` is one of the catalog's non-sentinel values.
#[must_use]
pub fn is_valid_rank(value: &str) -> bool {
    precedence(value).is_some()
}

/// Position of `value` in catalog order (0 = highest rank).
#[must_use]
pub fn precedence(value: &str) -> Option<usize> {
    if value.is_empty() {
        return None;
    }
    RANKS.iter().position(|rank| rank.value == value)
}

/// Picker choices: the sentinel followed by every rank in precedence order.
pub fn choices() -> impl Iterator<Item = RankEntry> {
    std::iter::once(SENTINEL).chain(RANKS)
}
