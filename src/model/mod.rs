// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation data model.
//!
//! Sections are identified by [`SectionId`]; everything the frontend draws lives in a [`Page`].

pub mod page;
pub mod section;

pub use page::{ButtonId, Dot, Page, ProposalView, ScrollRequest, SectionView};
pub use section::SectionId;
