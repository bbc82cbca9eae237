// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Section navigation.
//!
//! Input is classified by pure functions ([`classify_wheel`], [`classify_swipe`],
//! [`classify_key`]); the [`NavigationController`] then decides whether a transition commits and
//! returns the [`NavAction`]s the caller must apply to the page and the timer queue.
//!
//! Wheel and touch input are debounced by two separate flags. A wheel transition and a swipe
//! arriving inside each other's window can therefore both commit.

use std::time::Duration;

use crate::config::{DEBOUNCE, SWIPE_THRESHOLD_PX};
use crate::model::SectionId;
use crate::proposal::ProposalOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Which debounce flag guards an input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceSource {
    Wheel,
    Touch,
}

/// Keys the presentation reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Other,
}

/// Raw input, already converted to pixels where a gesture is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Key(Key),
}

/// What an input event asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(Direction),
    Answer(ProposalOutcome),
}

pub fn classify_wheel(delta_y: f64) -> Option<Direction> {
    if delta_y > 0.0 {
        Some(Direction::Next)
    } else if delta_y < 0.0 {
        Some(Direction::Previous)
    } else {
        None
    }
}

/// Swiping up (finger moving towards the top) advances.
pub fn classify_swipe(start_y: f64, end_y: f64) -> Option<Direction> {
    if start_y - end_y > SWIPE_THRESHOLD_PX {
        Some(Direction::Next)
    } else if end_y - start_y > SWIPE_THRESHOLD_PX {
        Some(Direction::Previous)
    } else {
        None
    }
}

/// Keys only mean something on the proposal section, and never navigate.
pub fn classify_key(current: SectionId, key: Key) -> Option<ProposalOutcome> {
    if current != SectionId::Proposal {
        return None;
    }
    match key {
        Key::Char('y' | 'Y') | Key::Enter => Some(ProposalOutcome::Accepted),
        Key::Char('n' | 'N') => Some(ProposalOutcome::Declined),
        _ => None,
    }
}

/// Classifies one event. `touch_start` is the Y captured by the preceding touch start, if any.
pub fn map_input_to_intent(
    current: SectionId,
    event: InputEvent,
    touch_start: Option<f64>,
) -> Option<Intent> {
    match event {
        InputEvent::Wheel { delta_y } => classify_wheel(delta_y).map(Intent::Navigate),
        InputEvent::TouchEnd { y } => {
            touch_start.and_then(|start| classify_swipe(start, y)).map(Intent::Navigate)
        }
        InputEvent::TouchStart { .. } => None,
        InputEvent::Key(key) => classify_key(current, key).map(Intent::Answer),
    }
}

/// Remembers where the current touch began.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchTracker {
    start_y: Option<f64>,
}

impl TouchTracker {
    pub fn begin(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    pub fn start_y(&self) -> Option<f64> {
        self.start_y
    }
}

/// Side effects a navigation decision asks for, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Hide(SectionId),
    Show(SectionId),
    /// Mark the position indicator for this section active and every other one inactive.
    Indicate(SectionId),
    ScrollIntoView(SectionId),
    /// Clear the given debounce flag after `delay`.
    ReleaseAfter { source: DebounceSource, delay: Duration },
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    sections: Vec<SectionId>,
    current: usize,
    wheel_debounce: bool,
    touch_debounce: bool,
    debounce: Duration,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            sections: SectionId::ALL.to_vec(),
            current: 0,
            wheel_debounce: false,
            touch_debounce: false,
            debounce: DEBOUNCE,
        }
    }
}

impl NavigationController {
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> SectionId {
        self.sections[self.current]
    }

    pub fn is_debouncing(&self, source: DebounceSource) -> bool {
        match source {
            DebounceSource::Wheel => self.wheel_debounce,
            DebounceSource::Touch => self.touch_debounce,
        }
    }

    /// Shows the first section and hides the rest.
    pub fn initialize(&mut self) -> Vec<NavAction> {
        self.current = 0;
        let first = self.current();
        let mut actions = self
            .sections
            .iter()
            .filter(|id| **id != first)
            .map(|id| NavAction::Hide(*id))
            .collect::<Vec<_>>();
        actions.push(NavAction::Show(first));
        actions.push(NavAction::Indicate(first));
        actions
    }

    /// Moves one section in `direction` unless `source` is debouncing or the move would leave
    /// the sequence. Dropped requests return no actions and change nothing.
    pub fn request_transition(
        &mut self,
        source: DebounceSource,
        direction: Direction,
    ) -> Vec<NavAction> {
        if self.is_debouncing(source) {
            return Vec::new();
        }
        let Some(target) = self.neighbor(direction) else {
            return Vec::new();
        };
        let mut actions = vec![self.arm(source)];
        actions.extend(self.move_to(target));
        actions
    }

    /// Wheel handling: any wheel event that gets past the flag re-arms it, even when it
    /// does not move (zero delta or a boundary).
    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<NavAction> {
        if self.wheel_debounce {
            return Vec::new();
        }
        let mut actions = vec![self.arm(DebounceSource::Wheel)];
        if let Some(target) = classify_wheel(delta_y).and_then(|dir| self.neighbor(dir)) {
            actions.extend(self.move_to(target));
        }
        actions
    }

    pub fn release(&mut self, source: DebounceSource) {
        match source {
            DebounceSource::Wheel => self.wheel_debounce = false,
            DebounceSource::Touch => self.touch_debounce = false,
        }
    }

    fn neighbor(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next if self.current + 1 < self.sections.len() => Some(self.current + 1),
            Direction::Previous if self.current > 0 => Some(self.current - 1),
            _ => None,
        }
    }

    fn arm(&mut self, source: DebounceSource) -> NavAction {
        match source {
            DebounceSource::Wheel => self.wheel_debounce = true,
            DebounceSource::Touch => self.touch_debounce = true,
        }
        NavAction::ReleaseAfter { source, delay: self.debounce }
    }

    fn move_to(&mut self, target: usize) -> [NavAction; 4] {
        let previous = self.current();
        self.current = target;
        let next = self.current();
        [
            NavAction::Hide(previous),
            NavAction::Show(next),
            NavAction::Indicate(next),
            NavAction::ScrollIntoView(next),
        ]
    }
}
