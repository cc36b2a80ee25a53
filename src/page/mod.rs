//! Named text slots of the dashboard page.
//!
//! The renderer never reaches into a document; it writes text to
//! [`Slot`]s through the [`PageTargets`] trait and lets the adapter decide
//! where that text ends up.

mod html;

pub use html::{ChartScript, HtmlDashboard, DEFAULT_LAYOUT};

use std::collections::BTreeMap;
use std::fmt;

/// A text slot in the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Status line: "Last run ..." or "Error: ...".
    LastRun,
    TotalNodes,
    TotalContacted,
    /// Value of the n-th ranked stat (1-based).
    StatValue(u8),
    /// Label of the n-th ranked stat (1-based).
    StatLabel(u8),
}

impl Slot {
    /// Every slot a successful render fills, in page order.
    pub const ALL: [Slot; 9] = [
        Slot::LastRun,
        Slot::TotalNodes,
        Slot::TotalContacted,
        Slot::StatValue(1),
        Slot::StatLabel(1),
        Slot::StatValue(2),
        Slot::StatLabel(2),
        Slot::StatValue(3),
        Slot::StatLabel(3),
    ];

    /// Element id of the slot in the layout.
    pub fn element_id(&self) -> String {
        match self {
            Slot::LastRun => "last-run".to_string(),
            Slot::TotalNodes => "total-nodes".to_string(),
            Slot::TotalContacted => "total-contacted".to_string(),
            Slot::StatValue(n) => format!("stat-{}-value", n),
            Slot::StatLabel(n) => format!("stat-{}-label", n),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element_id())
    }
}

/// Trait for receiving slot text.
pub trait PageTargets {
    /// Overwrite the text of `slot`.
    fn set_text(&mut self, slot: Slot, text: &str);
}

/// In-memory slot text, the simplest [`PageTargets`].
///
/// Both the HTML and terminal adapters keep their text in one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    slots: BTreeMap<Slot, String>,
}

impl PageText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a slot, if it has been written.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Written slots in page order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, text)| (*slot, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PageTargets for PageText {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slots.insert(slot, text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        let ids: Vec<String> = Slot::ALL.iter().map(Slot::element_id).collect();
        assert_eq!(
            ids,
            vec![
                "last-run",
                "total-nodes",
                "total-contacted",
                "stat-1-value",
                "stat-1-label",
                "stat-2-value",
                "stat-2-label",
                "stat-3-value",
                "stat-3-label",
            ]
        );
        assert_eq!(Slot::StatLabel(2).to_string(), "stat-2-label");
    }

    #[test]
    fn test_page_text_overwrites() {
        let mut page = PageText::new();
        assert!(page.is_empty());

        page.set_text(Slot::LastRun, "Loading");
        page.set_text(Slot::LastRun, "Last run March 1, 2024");
        page.set_text(Slot::TotalNodes, "1,000");

        assert_eq!(page.len(), 2);
        assert_eq!(page.get(Slot::LastRun), Some("Last run March 1, 2024"));
        assert_eq!(page.get(Slot::TotalContacted), None);

        let order: Vec<Slot> = page.iter().map(|(slot, _)| slot).collect();
        assert_eq!(order, vec![Slot::LastRun, Slot::TotalNodes]);
    }
}
