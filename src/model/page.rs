// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use crate::config::{Content, MUSIC_PLAY_LABEL};
use crate::countdown::CountdownDisplay;
use crate::effects::{Confetti, Heart, ParticleId, Ripple};
use crate::model::SectionId;
use crate::proposal::Offset;

/// A full-screen content panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    id: SectionId,
    title: String,
    body: String,
    active: bool,
}

impl SectionView {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Position indicator entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub section: SectionId,
    pub active: bool,
}

/// Last scroll-into-view request, for the frontend's slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub section: SectionId,
    pub at: Duration,
}

/// Buttons that can carry a ripple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Next(SectionId),
    Yes,
    No,
}

/// Visibility of the proposal prompt and its two response panels.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalView {
    pub buttons_visible: bool,
    pub yes_panel_visible: bool,
    pub no_panel_visible: bool,
    pub yes_text: String,
    pub no_text: String,
    /// Translation applied to the decline control.
    pub decline_offset: Offset,
}

/// The element tree the presentation mutates and the frontend renders.
///
/// Containers that may be absent are `Option`s; operations on a missing container are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    sections: Vec<SectionView>,
    dots: Vec<Dot>,
    scroll: Option<ScrollRequest>,
    countdown: CountdownDisplay,
    proposal: ProposalView,
    hearts: Option<Vec<Heart>>,
    confetti: Option<Vec<Confetti>>,
    ripples: Vec<(ButtonId, Ripple)>,
    music_label: &'static str,
    alert: Option<String>,
}

impl Page {
    pub fn new(content: &Content) -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|id| {
                let (title, body) = content
                    .section(id)
                    .map(|text| (text.title.clone(), text.body.clone()))
                    .unwrap_or_default();
                SectionView { id, title, body, active: false }
            })
            .collect();
        let dots = SectionId::ALL.into_iter().map(|section| Dot { section, active: false }).collect();
        Self {
            sections,
            dots,
            scroll: None,
            countdown: CountdownDisplay::zero(),
            proposal: ProposalView {
                buttons_visible: true,
                yes_panel_visible: false,
                no_panel_visible: false,
                yes_text: content.yes_response().to_owned(),
                no_text: content.no_response().to_owned(),
                decline_offset: Offset::default(),
            },
            hearts: Some(Vec::new()),
            confetti: Some(Vec::new()),
            ripples: Vec::new(),
            music_label: MUSIC_PLAY_LABEL,
            alert: None,
        }
    }

    /// Drops the hearts container, as if the markup lacked it.
    pub fn without_hearts_container(mut self) -> Self {
        self.hearts = None;
        self
    }

    /// Drops the confetti container, as if the markup lacked it.
    pub fn without_confetti_container(mut self) -> Self {
        self.confetti = None;
        self
    }

    pub fn sections(&self) -> &[SectionView] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn active_section(&self) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.active)
    }

    pub fn set_section_active(&mut self, id: SectionId, active: bool) {
        if let Some(section) = self.sections.iter_mut().find(|section| section.id == id) {
            section.active = active;
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn set_indicator(&mut self, id: SectionId) {
        for dot in &mut self.dots {
            dot.active = dot.section == id;
        }
    }

    pub fn scroll_request(&self) -> Option<ScrollRequest> {
        self.scroll
    }

    pub fn scroll_into_view(&mut self, section: SectionId, at: Duration) {
        if self.section(section).is_some() {
            self.scroll = Some(ScrollRequest { section, at });
        }
    }

    pub fn countdown(&self) -> &CountdownDisplay {
        &self.countdown
    }

    pub fn set_countdown(&mut self, display: CountdownDisplay) {
        self.countdown = display;
    }

    pub fn proposal(&self) -> &ProposalView {
        &self.proposal
    }

    pub fn proposal_mut(&mut self) -> &mut ProposalView {
        &mut self.proposal
    }

    pub fn hearts(&self) -> Option<&[Heart]> {
        self.hearts.as_deref()
    }

    /// Returns `false` when there is no hearts container.
    pub fn append_hearts(&mut self, hearts: Vec<Heart>) -> bool {
        let Some(container) = self.hearts.as_mut() else {
            return false;
        };
        container.extend(hearts);
        true
    }

    pub fn has_confetti_container(&self) -> bool {
        self.confetti.is_some()
    }

    pub fn confetti(&self) -> &[Confetti] {
        self.confetti.as_deref().unwrap_or_default()
    }

    /// Replaces the container's content with `burst`.
    pub fn reset_confetti(&mut self, burst: Vec<Confetti>) {
        if let Some(container) = self.confetti.as_mut() {
            *container = burst;
        }
    }

    /// Removes one piece if it is still attached. Returns whether it was.
    pub fn remove_confetti(&mut self, id: ParticleId) -> bool {
        let Some(container) = self.confetti.as_mut() else {
            return false;
        };
        let before = container.len();
        container.retain(|piece| piece.id != id);
        container.len() != before
    }

    pub fn ripples(&self) -> impl Iterator<Item = (ButtonId, &Ripple)> {
        self.ripples.iter().map(|(button, ripple)| (*button, ripple))
    }

    pub fn add_ripple(&mut self, button: ButtonId, ripple: Ripple) {
        self.ripples.push((button, ripple));
    }

    pub fn remove_ripple(&mut self, id: ParticleId) -> bool {
        let before = self.ripples.len();
        self.ripples.retain(|(_, ripple)| ripple.id != id);
        self.ripples.len() != before
    }

    pub fn music_label(&self) -> &'static str {
        self.music_label
    }

    pub fn set_music_label(&mut self, label: &'static str) {
        self.music_label = label;
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Shows a modal message. The frontend blocks other input until it is dismissed.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }
}
