// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serenade: a scroll-driven terminal presentation.
//!
//! The crate is split into a deterministic core (navigation, countdown, proposal, timers) that
//! mutates an in-memory [`model::Page`], and a ratatui frontend in [`tui`] that renders it.

pub mod audio;
pub mod config;
pub mod countdown;
pub mod effects;
pub mod model;
pub mod nav;
pub mod presentation;
pub mod proposal;
pub mod schedule;
pub mod tui;
