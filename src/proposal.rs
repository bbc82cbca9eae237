// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The proposal prompt and its two terminal outcomes.

use rand::Rng;

use crate::config::{CLICK_RANGE_PX, HOVER_RANGE_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalOutcome {
    Accepted,
    Declined,
}

/// Whether a click keeps bubbling to document-level handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stopped,
}

/// Translation of the decline control, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// Uniform offset in `[-range, range)` on both axes.
    pub fn random<R: Rng>(rng: &mut R, range: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * 2.0 * range - range,
            y: rng.gen::<f64>() * 2.0 * range - range,
        }
    }

    pub fn within(&self, range: f64) -> bool {
        (-range..range).contains(&self.x) && (-range..range).contains(&self.y)
    }
}

/// Proposal state. Once answered it never returns to [`ProposalState::Unanswered`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ProposalState {
    #[default]
    Unanswered,
    Accepted,
    /// Declined; the decline control now runs away from the pointer.
    Declined { offset: Offset },
}

impl ProposalState {
    pub fn outcome(&self) -> Option<ProposalOutcome> {
        match self {
            Self::Unanswered => None,
            Self::Accepted => Some(ProposalOutcome::Accepted),
            Self::Declined { .. } => Some(ProposalOutcome::Declined),
        }
    }

    /// Records the first answer. Returns `false` when an answer was already given.
    pub fn answer(&mut self, outcome: ProposalOutcome) -> bool {
        if !matches!(self, Self::Unanswered) {
            return false;
        }
        *self = match outcome {
            ProposalOutcome::Accepted => Self::Accepted,
            ProposalOutcome::Declined => Self::Declined { offset: Offset::default() },
        };
        true
    }

    pub fn decline_offset(&self) -> Option<Offset> {
        match self {
            Self::Declined { offset } => Some(*offset),
            _ => None,
        }
    }

    /// Hovering the evasive decline control moves it. No-op unless declined.
    pub fn hover_decline<R: Rng>(&mut self, rng: &mut R) -> Option<Offset> {
        let Self::Declined { offset } = self else {
            return None;
        };
        *offset = Offset::random(rng, HOVER_RANGE_PX);
        Some(*offset)
    }

    /// Clicking the evasive decline control moves it further and swallows the click.
    pub fn click_decline<R: Rng>(&mut self, rng: &mut R) -> Propagation {
        let Self::Declined { offset } = self else {
            return Propagation::Continue;
        };
        *offset = Offset::random(rng, CLICK_RANGE_PX);
        Propagation::Stopped
    }
}
