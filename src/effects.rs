// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Decorative effects: particle bursts, the celebration tone and button ripples.
//!
//! Everything here is formula-driven; randomness comes from the caller's [`Rng`] so bursts are
//! reproducible under a seeded generator.

use std::time::Duration;

use rand::Rng;

/// Identifier of a dynamically created element (confetti piece or ripple).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic source of [`ParticleId`]s.
#[derive(Debug, Default, Clone)]
pub struct ParticleIds {
    next: u64,
}

impl ParticleIds {
    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A background heart. Hearts float forever.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub float_duration: Duration,
    pub delay: Duration,
    pub opacity: f64,
}

pub fn spawn_hearts<R: Rng>(rng: &mut R, count: usize) -> Vec<Heart> {
    (0..count)
        .map(|_| Heart {
            left_pct: rng.gen::<f64>() * 100.0,
            top_pct: rng.gen::<f64>() * 100.0,
            size_px: rng.gen::<f64>() * 20.0 + 10.0,
            float_duration: Duration::from_secs_f64(rng.gen::<f64>() * 10.0 + 5.0),
            delay: Duration::from_secs_f64(rng.gen::<f64>() * 5.0),
            opacity: rng.gen::<f64>() * 0.5 + 0.3,
        })
        .collect()
}

/// One falling confetti piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub id: ParticleId,
    pub color: &'static str,
    pub size_px: f64,
    pub left_pct: f64,
    pub fall_duration: Duration,
    pub delay: Duration,
    pub round: bool,
    /// Clock reading at creation.
    pub born: Duration,
}

impl Confetti {
    /// Fall progress in `[0, 1]` at `now`, or `None` while still waiting out its delay.
    pub fn progress(&self, now: Duration) -> Option<f64> {
        let started = self.born + self.delay;
        let elapsed = now.checked_sub(started)?;
        let total = self.fall_duration.as_secs_f64();
        if total <= 0.0 {
            return Some(1.0);
        }
        Some((elapsed.as_secs_f64() / total).min(1.0))
    }
}

pub fn spawn_confetti<R: Rng>(
    rng: &mut R,
    ids: &mut ParticleIds,
    count: usize,
    palette: &[&'static str],
    now: Duration,
) -> Vec<Confetti> {
    if palette.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| Confetti {
            id: ids.next_id(),
            color: palette[rng.gen_range(0..palette.len())],
            size_px: rng.gen::<f64>() * 10.0 + 5.0,
            left_pct: rng.gen::<f64>() * 100.0,
            fall_duration: Duration::from_secs_f64(rng.gen::<f64>() + 1.0),
            delay: Duration::from_secs_f64(rng.gen::<f64>() * 2.0),
            round: rng.gen::<f64>() > 0.5,
            born: now,
        })
        .collect()
}

/// A click ripple on a button, in cell coordinates relative to the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: ParticleId,
    pub x: f64,
    pub y: f64,
    pub born: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency_hz: f64,
    pub offset: Duration,
}

/// A short oscillator melody with an exponential gain decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSequence {
    pub notes: [Note; 4],
    pub gain_start: f64,
    pub gain_end: f64,
    pub length: Duration,
}

impl ToneSequence {
    /// C5, E5, G5, C6.
    pub const CELEBRATION: ToneSequence = ToneSequence {
        notes: [
            Note { frequency_hz: 523.25, offset: Duration::from_millis(0) },
            Note { frequency_hz: 659.25, offset: Duration::from_millis(100) },
            Note { frequency_hz: 783.99, offset: Duration::from_millis(200) },
            Note { frequency_hz: 1046.5, offset: Duration::from_millis(300) },
        ],
        gain_start: 0.3,
        gain_end: 0.01,
        length: Duration::from_millis(500),
    };

    /// Gain at `at` after the start, following `start * (end/start)^(t/length)`.
    pub fn gain_at(&self, at: Duration) -> f64 {
        if at >= self.length {
            return self.gain_end;
        }
        let t = at.as_secs_f64() / self.length.as_secs_f64();
        self.gain_start * (self.gain_end / self.gain_start).powf(t)
    }
}
