//! Splitting a list into inline chips and overflow entries.

use super::item::SelectItem;

/// Chip count used when no `max_elements` is given
pub const DEFAULT_MAX_ELEMENTS: usize = 5;

/// Trigger label when the current selection is not in the overflow
pub const OVERFLOW_PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, Copy)]
pub struct Partition<'a> {
    pub visible: &'a [SelectItem],
    pub hidden: &'a [SelectItem],
}

impl<'a> Partition<'a> {
    pub fn has_overflow(&self) -> bool {
        !self.hidden.is_empty()
    }

    pub fn hidden_contains(&self, item: &SelectItem) -> bool {
        self.hidden.iter().any(|h| h.same_as(item))
    }
}

/// Effective cap; zero counts as unset.
pub fn effective_max(max_elements: Option<usize>) -> usize {
    match max_elements {
        Some(0) | None => DEFAULT_MAX_ELEMENTS,
        Some(n) => n,
    }
}

/// Visible prefix of `min(max, len)` items, the rest hidden.
pub fn partition(list: &[SelectItem], max_elements: Option<usize>) -> Partition<'_> {
    let range = effective_max(max_elements).min(list.len());
    let (visible, hidden) = list.split_at(range);
    Partition { visible, hidden }
}

/// Overflow trigger label: the current item's value when it sits in the
/// hidden remainder, otherwise `"..."`.
pub fn trigger_label<'a>(partition: &Partition<'a>, current: &'a SelectItem) -> &'a str {
    if partition.hidden_contains(current) {
        current.value.as_str()
    } else {
        OVERFLOW_PLACEHOLDER
    }
}
