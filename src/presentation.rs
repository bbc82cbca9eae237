// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The presentation session.
//!
//! [`Presentation`] owns every piece of mutable state: the navigation controller, the proposal,
//! the countdown target, the page and the timer queue. Input handlers and timer tasks run
//! against it one at a time; nothing is shared.

use std::time::Duration;

use chrono::Local;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::audio::{MusicOutput, MusicPlayer, NoAudio, ToneOutput};
use crate::config::{
    Content, CONFETTI_COUNT, CONFETTI_LIFETIME, CONFETTI_PALETTE, HEART_COUNT,
    MUSIC_AUTOPLAY_DELAY, NOTIFICATION_DELAY, RIPPLE_LIFETIME, TICK_INTERVAL,
};
use crate::countdown::{self, CountdownTarget};
use crate::effects::{spawn_confetti, spawn_hearts, ParticleId, ParticleIds, Ripple, ToneSequence};
use crate::model::{ButtonId, Page, SectionId};
use crate::nav::{
    map_input_to_intent, DebounceSource, Direction, InputEvent, Intent, NavAction,
    NavigationController, TouchTracker,
};
use crate::proposal::{ProposalOutcome, ProposalState, Propagation};
use crate::schedule::{Clock, TimerQueue};

/// Deferred work registered with the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ReleaseDebounce(DebounceSource),
    CountdownTick,
    ExpireConfetti(ParticleId),
    ExpireRipple(ParticleId),
    ShowLoveLetter,
    AutoplayMusic,
}

/// Clickable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    NextButton(SectionId),
    YesButton,
    /// The decline button; evasive once the proposal was declined.
    NoButton,
    MusicButton,
}

impl ClickTarget {
    fn ripple_button(self) -> Option<ButtonId> {
        match self {
            Self::NextButton(section) => Some(ButtonId::Next(section)),
            Self::YesButton => Some(ButtonId::Yes),
            Self::NoButton => Some(ButtonId::No),
            Self::MusicButton => None,
        }
    }
}

pub struct Presentation<C, R> {
    clock: C,
    rng: R,
    page: Page,
    nav: NavigationController,
    touch: TouchTracker,
    target: CountdownTarget,
    proposal: ProposalState,
    timers: TimerQueue<Task>,
    tones: Box<dyn ToneOutput>,
    music: MusicPlayer,
    particle_ids: ParticleIds,
    love_letter: String,
    started: bool,
}

impl<C: Clock, R: Rng> Presentation<C, R> {
    /// A session without audio, counting down to the next February 14th in local time.
    pub fn new(content: &Content, clock: C, rng: R) -> Self {
        let target = CountdownTarget::valentines(&clock.wall().with_timezone(&Local));
        Self {
            clock,
            rng,
            page: Page::new(content),
            nav: NavigationController::default(),
            touch: TouchTracker::default(),
            target,
            proposal: ProposalState::default(),
            timers: TimerQueue::new(),
            tones: Box::new(NoAudio),
            music: MusicPlayer::new(Box::new(NoAudio)),
            particle_ids: ParticleIds::default(),
            love_letter: content.love_letter().to_owned(),
            started: false,
        }
    }

    pub fn with_audio(mut self, tones: Box<dyn ToneOutput>, music: Box<dyn MusicOutput>) -> Self {
        self.tones = tones;
        self.music = MusicPlayer::new(music);
        self
    }

    pub fn with_target(mut self, target: CountdownTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Shows the first section, seeds the hearts, runs the first countdown tick and registers
    /// the recurring tick and the music autoplay. Calling it twice is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let now = self.clock.elapsed();
        let actions = self.nav.initialize();
        self.apply(actions);

        if self.page.hearts().is_some() {
            let hearts = spawn_hearts(&mut self.rng, HEART_COUNT);
            self.page.append_hearts(hearts);
        } else {
            debug!("no hearts container; skipping background hearts");
        }

        self.tick_countdown();
        self.timers.schedule_every(now, TICK_INTERVAL, Task::CountdownTick);
        self.timers.schedule_once(now, MUSIC_AUTOPLAY_DELAY, Task::AutoplayMusic);
        info!(target_at = %self.target.at(), "presentation started");
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn proposal(&self) -> &ProposalState {
        &self.proposal
    }

    pub fn target(&self) -> &CountdownTarget {
        &self.target
    }

    pub fn timers(&self) -> &TimerQueue<Task> {
        &self.timers
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn current_section(&self) -> SectionId {
        self.nav.current()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { delta_y } => {
                let actions = self.nav.on_wheel(delta_y);
                if actions.is_empty() {
                    debug!(delta_y, "wheel event dropped while debouncing");
                }
                self.apply(actions);
            }
            InputEvent::TouchStart { y } => self.touch.begin(y),
            InputEvent::TouchEnd { .. } | InputEvent::Key(_) => {
                match map_input_to_intent(self.nav.current(), event, self.touch.start_y()) {
                    Some(Intent::Navigate(direction)) => {
                        self.navigate(DebounceSource::Touch, direction);
                    }
                    Some(Intent::Answer(outcome)) => self.answer(outcome),
                    None => {}
                }
            }
        }
    }

    /// Clicks bubble to the document-level ripple handler unless the target stops them.
    pub fn click(&mut self, target: ClickTarget, x: f64, y: f64) -> Propagation {
        let propagation = match target {
            ClickTarget::NextButton(_) => {
                self.navigate(DebounceSource::Wheel, Direction::Next);
                Propagation::Continue
            }
            ClickTarget::YesButton => {
                self.answer(ProposalOutcome::Accepted);
                Propagation::Continue
            }
            ClickTarget::NoButton => match self.proposal {
                ProposalState::Declined { .. } => {
                    let propagation = self.proposal.click_decline(&mut self.rng);
                    self.sync_decline_offset();
                    propagation
                }
                _ => {
                    self.answer(ProposalOutcome::Declined);
                    Propagation::Continue
                }
            },
            ClickTarget::MusicButton => {
                self.toggle_music();
                Propagation::Continue
            }
        };

        if propagation == Propagation::Continue {
            if let Some(button) = target.ripple_button() {
                self.add_ripple(button, x, y);
            }
        }
        propagation
    }

    pub fn hover(&mut self, target: ClickTarget) {
        if target == ClickTarget::NoButton && self.proposal.hover_decline(&mut self.rng).is_some()
        {
            self.sync_decline_offset();
        }
    }

    pub fn toggle_music(&mut self) {
        let label = self.music.toggle();
        self.page.set_music_label(label);
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.page.dismiss_alert()
    }

    /// Runs every timer task due at the current clock reading. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.elapsed();
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(now) {
            self.run_task(task);
            fired += 1;
        }
        fired
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ReleaseDebounce(source) => self.nav.release(source),
            Task::CountdownTick => self.tick_countdown(),
            Task::ExpireConfetti(id) => {
                self.page.remove_confetti(id);
            }
            Task::ExpireRipple(id) => {
                self.page.remove_ripple(id);
            }
            Task::ShowLoveLetter => self.page.show_alert(self.love_letter.clone()),
            Task::AutoplayMusic => {
                if self.music.is_paused() {
                    let label = self.music.play();
                    self.page.set_music_label(label);
                }
            }
        }
    }

    fn navigate(&mut self, source: DebounceSource, direction: Direction) {
        let actions = self.nav.request_transition(source, direction);
        if actions.is_empty() {
            debug!(?source, ?direction, "transition dropped");
        }
        self.apply(actions);
    }

    fn apply(&mut self, actions: Vec<NavAction>) {
        let now = self.clock.elapsed();
        for action in actions {
            match action {
                NavAction::Hide(id) => self.page.set_section_active(id, false),
                NavAction::Show(id) => self.page.set_section_active(id, true),
                NavAction::Indicate(id) => self.page.set_indicator(id),
                NavAction::ScrollIntoView(id) => {
                    debug!(section = %id, "section transition");
                    self.page.scroll_into_view(id, now);
                }
                NavAction::ReleaseAfter { source, delay } => {
                    self.timers.schedule_once(now, delay, Task::ReleaseDebounce(source));
                }
            }
        }
    }

    fn tick_countdown(&mut self) {
        let display = countdown::tick(&self.target, self.clock.wall());
        self.page.set_countdown(display);
    }

    fn answer(&mut self, outcome: ProposalOutcome) {
        if self.nav.current() != SectionId::Proposal {
            debug!(?outcome, "answer outside the proposal section ignored");
            return;
        }
        if !self.proposal.answer(outcome) {
            debug!(?outcome, "proposal already answered");
            return;
        }
        info!(?outcome, "proposal answered");

        let view = self.page.proposal_mut();
        view.buttons_visible = false;
        match outcome {
            ProposalOutcome::Accepted => {
                view.yes_panel_visible = true;
                view.no_panel_visible = false;
                self.celebrate();
            }
            ProposalOutcome::Declined => {
                view.no_panel_visible = true;
                view.yes_panel_visible = false;
            }
        }
    }

    fn celebrate(&mut self) {
        let now = self.clock.elapsed();
        if self.page.has_confetti_container() {
            let burst = spawn_confetti(
                &mut self.rng,
                &mut self.particle_ids,
                CONFETTI_COUNT,
                &CONFETTI_PALETTE,
                now,
            );
            for piece in &burst {
                self.timers.schedule_once(now, CONFETTI_LIFETIME, Task::ExpireConfetti(piece.id));
            }
            self.page.reset_confetti(burst);
        }

        if let Err(err) = self.tones.play(&ToneSequence::CELEBRATION) {
            warn!(error = %err, "celebration tone skipped");
        }

        self.queue_love_letter(now);
    }

    /// Local only: the letter is shown in a modal on this screen, nothing is sent anywhere.
    fn queue_love_letter(&mut self, now: Duration) {
        info!("love letter queued for local display");
        self.timers.schedule_once(now, NOTIFICATION_DELAY, Task::ShowLoveLetter);
    }

    fn add_ripple(&mut self, button: ButtonId, x: f64, y: f64) {
        let now = self.clock.elapsed();
        let id = self.particle_ids.next_id();
        self.page.add_ripple(button, Ripple { id, x, y, born: now });
        self.timers.schedule_once(now, RIPPLE_LIFETIME, Task::ExpireRipple(id));
    }

    fn sync_decline_offset(&mut self) {
        if let Some(offset) = self.proposal.decline_offset() {
            self.page.proposal_mut().decline_offset = offset;
        }
    }
}

#[cfg(test)]
mod tests;
