// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Deserialize;

/// Identifier of one full-screen section.
///
/// The set of sections is closed; ordering lives in [`SectionId::ALL`] and in the
/// navigation controller, not in the discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Landing,
    Message,
    Memories,
    Proposal,
    Gallery,
    Countdown,
}

impl SectionId {
    /// Presentation order.
    pub const ALL: [SectionId; 6] = [
        Self::Landing,
        Self::Message,
        Self::Memories,
        Self::Proposal,
        Self::Gallery,
        Self::Countdown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Message => "message",
            Self::Memories => "memories",
            Self::Proposal => "proposal",
            Self::Gallery => "gallery",
            Self::Countdown => "countdown",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
