use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;
use std::hash::Hash;

pub const IMPACT_TITLES: [&str; 5] = [
    "1,164,000+ loans disbursed digitally",
    "111,000+ active users",
    "97% of invited members registered",
    "4.9★ average app store rating",
    "65% of loans created and approved directly within the app",
];

pub const DELIVERABLES: [(&str, &str); 4] = [
    (
        "NestBank's Visual Identity Definition",
        "Defined the brand’s core visual language, including colour palette, typography, iconography, and imagery style.",
    ),
    (
        "Design System Creation",
        "Built a scalable component library to ensure consistency and efficiency across design and development.",
    ),
    (
        "Mobile App Interface Design",
        "Designed end-to-end user flows covering onboarding, loan management, payments, and financial tracking.",
    ),
    (
        "User & Process Research",
        "Analysed user groups, current loan journeys, and brand perception to identify opportunities for a digital-first experience.",
    ),
];

pub const EMPTY_DETAIL_HTML: &str = "<div style=\"opacity:.8\">No details available.</div>";

/// How a card expands, decided from its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailKind {
    Impact,
    Deliverables,
    ProblemSolution,
    Single,
}

impl DetailKind {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "impact" => DetailKind::Impact,
            "deliverables" => DetailKind::Deliverables,
            "problem & solution" => DetailKind::ProblemSolution,
            _ => DetailKind::Single,
        }
    }

    pub fn panel_count(self) -> usize {
        match self {
            DetailKind::Impact => IMPACT_TITLES.len(),
            DetailKind::Deliverables => DELIVERABLES.len(),
            DetailKind::ProblemSolution => 2,
            DetailKind::Single => 1,
        }
    }

    #[inline]
    pub fn emphasized(self) -> bool {
        self == DetailKind::ProblemSolution
    }
}

/// Content for one detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelSpec {
    pub html: String,
    pub aria_label: String,
}

fn label_html(title: &str) -> String {
    format!("<p class=\"text-label\">{title}</p>")
}

/// Panels for a card. `body_html` is the card's own body; `problem` and
/// `solution` are the paragraphs found under those labels, if any.
pub fn panel_specs(
    kind: DetailKind,
    label: &str,
    body_html: &str,
    problem: &str,
    solution: &str,
) -> Vec<PanelSpec> {
    match kind {
        DetailKind::Impact => IMPACT_TITLES
            .iter()
            .map(|t| PanelSpec {
                html: label_html(t),
                aria_label: t.to_string(),
            })
            .collect(),
        DetailKind::Deliverables => DELIVERABLES
            .iter()
            .map(|(t, _)| PanelSpec {
                html: label_html(t),
                aria_label: format!("{t} details"),
            })
            .collect(),
        DetailKind::ProblemSolution => vec![
            PanelSpec {
                html: format!("{}{problem}", label_html("Problem")),
                aria_label: "Problem details".to_string(),
            },
            PanelSpec {
                html: format!("{}{solution}", label_html("Solution")),
                aria_label: "Solution details".to_string(),
            },
        ],
        DetailKind::Single => {
            let label = label.trim();
            vec![PanelSpec {
                html: if body_html.is_empty() {
                    EMPTY_DETAIL_HTML.to_string()
                } else {
                    body_html.to_string()
                },
                aria_label: if label.is_empty() {
                    "Details".to_string()
                } else {
                    format!("{label} details")
                },
            }]
        }
    }
}

/// Result of toggling a card.
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle<P> {
    /// The card was closed; these panels must be collapsed.
    Closed(SmallVec<[P; 5]>),
    /// The card must open; reuse these panels if present, else build
    /// `wanted` new ones and hand them back via [`DetailSet::opened`].
    Open { reuse: Option<SmallVec<[P; 5]>> },
}

/// Card → panels bookkeeping, plus the set of open cards.
///
/// Panels of a closed card are remembered so reopening reuses the same
/// nodes when the panel count still matches.
#[derive(Debug)]
pub struct DetailSet<K, P> {
    panels: FnvHashMap<K, SmallVec<[P; 5]>>,
    open: FnvHashSet<K>,
}

impl<K, P> Default for DetailSet<K, P> {
    fn default() -> Self {
        Self {
            panels: FnvHashMap::default(),
            open: FnvHashSet::default(),
        }
    }
}

impl<K: Hash + Eq + Clone, P: Clone> DetailSet<K, P> {
    #[inline]
    pub fn is_open(&self, card: &K) -> bool {
        self.open.contains(card)
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn open_cards(&self) -> Vec<K> {
        self.open.iter().cloned().collect()
    }

    pub fn toggle(&mut self, card: &K, wanted: usize) -> Toggle<P> {
        if self.is_open(card) {
            return Toggle::Closed(self.close(card).unwrap_or_default());
        }
        let reuse = self
            .panels
            .get(card)
            .filter(|p| p.len() == wanted)
            .cloned();
        Toggle::Open { reuse }
    }

    /// Record that `card` is now open with `panels`.
    pub fn opened(&mut self, card: K, panels: impl IntoIterator<Item = P>) {
        self.panels.insert(card.clone(), panels.into_iter().collect());
        self.open.insert(card);
    }

    /// Close `card`, returning its panels for collapsing.
    pub fn close(&mut self, card: &K) -> Option<SmallVec<[P; 5]>> {
        if !self.open.remove(card) {
            return None;
        }
        self.panels.get(card).cloned()
    }

    /// Close every open card.
    pub fn close_all(&mut self) -> Vec<(K, SmallVec<[P; 5]>)> {
        let cards = self.open_cards();
        cards
            .into_iter()
            .filter_map(|c| self.close(&c).map(|p| (c, p)))
            .collect()
    }
}
