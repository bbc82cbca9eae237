// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Audio collaborators.
//!
//! Audio is optional. Every failure surfaces as an [`AudioError`] that callers log and swallow.

use std::io::{self, Write};

use crate::config::{MUSIC_PAUSE_LABEL, MUSIC_PLAY_LABEL};
use crate::effects::ToneSequence;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio synthesis is not available")]
    Unavailable,
    #[error("playback was rejected: {0}")]
    Rejected(String),
    #[error("audio output failed: {0}")]
    Io(#[from] io::Error),
}

/// Plays a synthesized tone sequence.
pub trait ToneOutput {
    fn play(&mut self, tones: &ToneSequence) -> Result<(), AudioError>;
}

/// Plays and pauses the background song.
pub trait MusicOutput {
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
}

/// No audio device at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl ToneOutput for NoAudio {
    fn play(&mut self, _tones: &ToneSequence) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

impl MusicOutput for NoAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Rejected("no audio device".to_owned()))
    }

    fn pause(&mut self) {}

    fn is_paused(&self) -> bool {
        true
    }
}

/// Rings the terminal bell.
///
/// Terminals have no pitch control, so each note rings one bell.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ToneOutput for TerminalBell<W> {
    fn play(&mut self, tones: &ToneSequence) -> Result<(), AudioError> {
        for _ in tones.notes.iter() {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Toggle state of the music button.
pub struct MusicPlayer {
    output: Box<dyn MusicOutput>,
}

impl MusicPlayer {
    pub fn new(output: Box<dyn MusicOutput>) -> Self {
        Self { output }
    }

    pub fn is_paused(&self) -> bool {
        self.output.is_paused()
    }

    /// Plays when paused, pauses when playing. Returns the label the button should show.
    pub fn toggle(&mut self) -> &'static str {
        if self.output.is_paused() {
            self.play()
        } else {
            self.output.pause();
            MUSIC_PLAY_LABEL
        }
    }

    /// Starts playback; a rejection leaves the button on the play label.
    pub fn play(&mut self) -> &'static str {
        match self.output.play() {
            Ok(()) => MUSIC_PAUSE_LABEL,
            Err(err) => {
                tracing::warn!(error = %err, "music playback failed");
                MUSIC_PLAY_LABEL
            }
        }
    }
}

impl std::fmt::Debug for MusicPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicPlayer").field("paused", &self.is_paused()).finish()
    }
}
