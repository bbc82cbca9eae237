// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fixed presentation constants plus the optional JSON content override.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::model::SectionId;

/// Month of the countdown target (February).
pub const TARGET_MONTH: u32 = 2;
/// Day of month of the countdown target.
pub const TARGET_DAY: u32 = 14;

pub const DEBOUNCE: Duration = Duration::from_millis(800);
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Minimum vertical travel for a drag to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

pub const HEART_COUNT: usize = 15;
pub const CONFETTI_COUNT: usize = 150;
pub const CONFETTI_LIFETIME: Duration = Duration::from_millis(2000);
pub const CONFETTI_PALETTE: [&str; 6] =
    ["#7E57C2", "#9575CD", "#B39DDB", "#D1C4E9", "#E1BEE7", "#F3E5F5"];

pub const NOTIFICATION_DELAY: Duration = Duration::from_millis(1500);
pub const MUSIC_AUTOPLAY_DELAY: Duration = Duration::from_millis(2000);
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);

/// Hover moves the decline control within `[-HOVER_RANGE_PX, HOVER_RANGE_PX)` on each axis.
pub const HOVER_RANGE_PX: f64 = 100.0;
/// Click moves the decline control within `[-CLICK_RANGE_PX, CLICK_RANGE_PX)` on each axis.
pub const CLICK_RANGE_PX: f64 = 150.0;

pub const MUSIC_PLAY_LABEL: &str = "Play Love Song";
pub const MUSIC_PAUSE_LABEL: &str = "Pause Music";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    pub title: String,
    pub body: String,
}

/// Text shown by the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    sections: BTreeMap<SectionId, SectionText>,
    yes_response: String,
    no_response: String,
    love_letter: String,
}

impl Default for Content {
    fn default() -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|id| (id, default_section_text(id)))
            .collect();
        Self {
            sections,
            yes_response: "You said yes! This is the best day of my life.".to_owned(),
            no_response: "Are you sure? That button seems to disagree...".to_owned(),
            love_letter: DEFAULT_LOVE_LETTER.to_owned(),
        }
    }
}

const DEFAULT_LOVE_LETTER: &str = "My love,\n\
In you I found everything I never knew I was looking for.\n\
You are my home, my peace and my happiness.\n\
With you, every day is more than Valentine's Day.\n\n\
Forever and always.";

fn default_section_text(id: SectionId) -> SectionText {
    let (title, body) = match id {
        SectionId::Landing => ("For You", "Scroll down, there is something I want to tell you."),
        SectionId::Message => (
            "A Little Message",
            "Every moment with you feels like the first page of a story I never want to end.",
        ),
        SectionId::Memories => (
            "Our Memories",
            "The first coffee. The long walks. The songs we sang too loudly in the car.",
        ),
        SectionId::Proposal => ("Will You Be My Valentine?", "Press y for yes or n for no."),
        SectionId::Gallery => ("Gallery", "Snapshots of us, kept where only we can see them."),
        SectionId::Countdown => ("Counting Down", "Until Valentine's Day"),
    };
    SectionText { title: title.to_owned(), body: body.to_owned() }
}

impl Content {
    pub fn section(&self, id: SectionId) -> Option<&SectionText> {
        self.sections.get(&id)
    }

    pub fn yes_response(&self) -> &str {
        &self.yes_response
    }

    pub fn no_response(&self) -> &str {
        &self.no_response
    }

    pub fn love_letter(&self) -> &str {
        &self.love_letter
    }

    /// Parses a content override document and applies it on top of the defaults.
    pub fn from_json(source: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(source)?;
        let mut content = Self::default();
        content.apply(file);
        Ok(content)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|source| ContentError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&source)
    }

    fn apply(&mut self, file: ContentFile) {
        for (id, section) in file.sections {
            let entry = self.sections.entry(id).or_insert_with(|| default_section_text(id));
            if let Some(title) = section.title {
                entry.title = title;
            }
            if let Some(body) = section.body {
                entry.body = body;
            }
        }
        if let Some(yes_response) = file.yes_response {
            self.yes_response = yes_response;
        }
        if let Some(no_response) = file.no_response {
            self.no_response = no_response;
        }
        if let Some(love_letter) = file.love_letter {
            self.love_letter = love_letter;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ContentFile {
    sections: BTreeMap<SectionId, SectionOverride>,
    yes_response: Option<String>,
    no_response: Option<String>,
    love_letter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SectionOverride {
    title: Option<String>,
    body: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content file: {0}")]
    Parse(#[from] serde_json::Error),
}
