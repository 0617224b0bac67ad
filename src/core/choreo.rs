/// A staggered reveal: the i-th element fires at `base + i * step` ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    pub base_ms: u32,
    pub step_ms: u32,
}

pub const NAV_INTRO: Stagger = Stagger {
    base_ms: 600,
    step_ms: 180,
};
pub const CARD_INTRO: Stagger = Stagger {
    base_ms: 900,
    step_ms: 260,
};
pub const CARD_REVEAL: Stagger = Stagger {
    base_ms: 120,
    step_ms: 120,
};
pub const TILE_INTRO: Stagger = Stagger {
    base_ms: 200,
    step_ms: 70,
};

// Top/bottom share of the viewport that reveals an exited UI
pub const EDGE_ZONE_RATIO: f64 = 0.15;

impl Stagger {
    /// Delays for `count` elements; `None` means apply synchronously
    /// (reduced motion).
    pub fn delays(&self, count: usize, reduced_motion: bool) -> Option<Vec<u32>> {
        if reduced_motion {
            return None;
        }
        Some(
            (0..count as u32)
                .map(|i| self.base_ms.saturating_add(i.saturating_mul(self.step_ms)))
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Top,
    Middle,
    Bottom,
}

#[inline]
pub fn pointer_zone(client_y: f64, viewport_h: f64) -> Zone {
    let ratio = client_y / viewport_h.max(1.0);
    if ratio <= EDGE_ZONE_RATIO {
        Zone::Top
    } else if ratio >= 1.0 - EDGE_ZONE_RATIO {
        Zone::Bottom
    } else {
        Zone::Middle
    }
}

/// Tracks the pointer's edge zone and reports entries into top/bottom.
#[derive(Clone, Copy, Debug)]
pub struct ZoneTracker {
    last: Zone,
}

impl Default for ZoneTracker {
    fn default() -> Self {
        Self { last: Zone::Middle }
    }
}

impl ZoneTracker {
    /// `true` when the pointer just entered the top or bottom edge.
    pub fn update(&mut self, zone: Zone) -> bool {
        if zone == self.last {
            return false;
        }
        self.last = zone;
        zone != Zone::Middle
    }
}

/// Where a document-level click landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub inside_card: bool,
    pub inside_detail: bool,
    pub inside_nav: bool,
}

/// UI state the background-click decision depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    pub small_screen: bool,
    pub exited: bool,
    pub open_cards: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Ignore,
    /// Small screens: close details and force the UI visible.
    CloseAllAndPin,
    Reveal,
    /// Collapse open details; the UI stays.
    CloseAll,
    /// Nothing was open: slide the UI out.
    Exit,
}

pub fn background_click_action(target: ClickTarget, ui: UiSnapshot) -> ClickAction {
    if target.inside_card || target.inside_detail {
        return ClickAction::Ignore;
    }
    if ui.small_screen {
        return ClickAction::CloseAllAndPin;
    }
    if ui.exited && !target.inside_nav {
        return ClickAction::Reveal;
    }
    if ui.open_cards > 0 {
        return ClickAction::CloseAll;
    }
    if target.inside_nav {
        ClickAction::Ignore
    } else {
        ClickAction::Exit
    }
}
