// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use rstest::{fixture, rstest};

use super::{ClickTarget, Presentation, Task};
use crate::audio::tests::{FakeMusic, FakeTones};
use crate::audio::NoAudio;
use crate::config::{
    Content, CONFETTI_COUNT, CLICK_RANGE_PX, HEART_COUNT, HOVER_RANGE_PX, MUSIC_PAUSE_LABEL,
    MUSIC_PLAY_LABEL,
};
use crate::countdown::CountdownTarget;
use crate::model::{ButtonId, Page, SectionId};
use crate::nav::{DebounceSource, InputEvent, Key};
use crate::proposal::{ProposalOutcome, ProposalState, Propagation};
use crate::schedule::ManualClock;

type Session<'a> = Presentation<&'a ManualClock, StdRng>;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 13, 23, 59, 50).unwrap()
}

#[fixture]
fn clock() -> ManualClock {
    ManualClock::new(origin())
}

fn session(clock: &ManualClock) -> Session<'_> {
    let mut presentation = Presentation::new(&Content::default(), clock, StdRng::seed_from_u64(42))
        .with_target(CountdownTarget::valentines(&origin()));
    presentation.start();
    presentation
}

fn advance(presentation: &mut Session<'_>, clock: &ManualClock, by: Duration) {
    clock.advance(by);
    presentation.run_due();
}

fn visible_sections(presentation: &Session<'_>) -> Vec<SectionId> {
    presentation
        .page()
        .sections()
        .iter()
        .filter(|section| section.is_active())
        .map(|section| section.id())
        .collect()
}

fn goto_proposal(presentation: &mut Session<'_>, clock: &ManualClock) {
    while presentation.current_section() != SectionId::Proposal {
        presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
        advance(presentation, clock, ms(800));
    }
}

#[rstest]
fn start_shows_first_section_and_hearts(clock: ManualClock) {
    let presentation = session(&clock);

    assert_eq!(visible_sections(&presentation), vec![SectionId::Landing]);
    let active_dots = presentation.page().dots().iter().filter(|dot| dot.active).count();
    assert_eq!(active_dots, 1);
    assert_eq!(presentation.page().hearts().map(<[_]>::len), Some(HEART_COUNT));
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "00", "10"]);
}

#[rstest]
fn start_twice_is_a_no_op(clock: ManualClock) {
    let mut presentation = session(&clock);
    let timers = presentation.timers().len();
    presentation.start();

    assert_eq!(presentation.timers().len(), timers);
    assert_eq!(presentation.page().hearts().map(<[_]>::len), Some(HEART_COUNT));
}

#[rstest]
fn missing_hearts_container_is_skipped(clock: ManualClock) {
    let mut presentation =
        Presentation::new(&Content::default(), &clock, StdRng::seed_from_u64(1))
            .with_page(Page::new(&Content::default()).without_hearts_container());
    presentation.start();

    assert!(presentation.page().hearts().is_none());
    assert_eq!(visible_sections(&presentation), vec![SectionId::Landing]);
}

#[rstest]
fn wheel_transition_debounces_for_800ms(clock: ManualClock) {
    let mut presentation = session(&clock);

    presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
    assert_eq!(presentation.current_section(), SectionId::Message);
    assert!(presentation.navigation().is_debouncing(DebounceSource::Wheel));

    presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
    assert_eq!(presentation.current_section(), SectionId::Message);

    advance(&mut presentation, &clock, ms(799));
    presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
    assert_eq!(presentation.current_section(), SectionId::Message);

    advance(&mut presentation, &clock, ms(1));
    assert!(!presentation.navigation().is_debouncing(DebounceSource::Wheel));
    presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
    assert_eq!(presentation.current_section(), SectionId::Memories);
    assert_eq!(presentation.page().scroll_request().map(|r| r.section), Some(SectionId::Memories));
}

#[rstest]
fn exactly_one_section_visible_after_every_transition(clock: ManualClock) {
    let mut presentation = session(&clock);
    let deltas = [100.0, 100.0, -50.0, 100.0, 100.0, 100.0, 100.0, 100.0, -100.0, -100.0];

    for delta_y in deltas {
        presentation.handle(InputEvent::Wheel { delta_y });
        let visible = visible_sections(&presentation);
        assert_eq!(visible, vec![presentation.current_section()]);
        let dot = presentation.page().dots().iter().find(|dot| dot.active).expect("active dot");
        assert_eq!(dot.section, presentation.current_section());
        advance(&mut presentation, &clock, ms(800));
    }
    assert_eq!(presentation.current_section(), SectionId::Proposal);
}

#[rstest]
fn swipe_moves_and_short_drags_do_not(clock: ManualClock) {
    let mut presentation = session(&clock);

    presentation.handle(InputEvent::TouchStart { y: 300.0 });
    presentation.handle(InputEvent::TouchEnd { y: 260.0 });
    assert_eq!(presentation.current_section(), SectionId::Landing);
    assert!(!presentation.navigation().is_debouncing(DebounceSource::Touch));

    presentation.handle(InputEvent::TouchStart { y: 300.0 });
    presentation.handle(InputEvent::TouchEnd { y: 200.0 });
    assert_eq!(presentation.current_section(), SectionId::Message);
    assert!(presentation.navigation().is_debouncing(DebounceSource::Touch));

    presentation.handle(InputEvent::TouchStart { y: 100.0 });
    presentation.handle(InputEvent::TouchEnd { y: 400.0 });
    assert_eq!(presentation.current_section(), SectionId::Message);

    advance(&mut presentation, &clock, ms(800));
    presentation.handle(InputEvent::TouchStart { y: 100.0 });
    presentation.handle(InputEvent::TouchEnd { y: 400.0 });
    assert_eq!(presentation.current_section(), SectionId::Landing);
}

#[rstest]
fn wheel_and_swipe_can_both_commit_inside_one_window(clock: ManualClock) {
    let mut presentation = session(&clock);

    presentation.handle(InputEvent::Wheel { delta_y: 100.0 });
    presentation.handle(InputEvent::TouchStart { y: 400.0 });
    presentation.handle(InputEvent::TouchEnd { y: 100.0 });

    assert_eq!(presentation.current_section(), SectionId::Memories);
}

#[rstest]
fn countdown_ticks_every_second_and_stops_at_zero(clock: ManualClock) {
    let mut presentation = session(&clock);

    advance(&mut presentation, &clock, ms(3000));
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "00", "07"]);

    advance(&mut presentation, &clock, ms(7000));
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "00", "00"]);

    advance(&mut presentation, &clock, ms(5000));
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "00", "00"]);
    assert_eq!(presentation.timers().count_matching(|task| *task == Task::CountdownTick), 1);
}

#[rstest]
fn keys_only_answer_on_proposal(clock: ManualClock) {
    let mut presentation = session(&clock);

    presentation.handle(InputEvent::Key(Key::Char('y')));
    assert_eq!(*presentation.proposal(), ProposalState::Unanswered);
    assert_eq!(presentation.current_section(), SectionId::Landing);

    goto_proposal(&mut presentation, &clock);
    presentation.handle(InputEvent::Key(Key::Enter));
    assert_eq!(presentation.proposal().outcome(), Some(ProposalOutcome::Accepted));
    assert_eq!(presentation.current_section(), SectionId::Proposal);
}

#[rstest]
fn acceptance_bursts_confetti_that_removes_itself(clock: ManualClock) {
    let tones = FakeTones::default();
    let played = tones.played.clone();
    let mut presentation =
        Presentation::new(&Content::default(), &clock, StdRng::seed_from_u64(9))
            .with_audio(Box::new(tones), Box::new(NoAudio));
    presentation.start();
    goto_proposal(&mut presentation, &clock);

    presentation.handle(InputEvent::Key(Key::Char('Y')));
    let view = presentation.page().proposal();
    assert!(!view.buttons_visible);
    assert!(view.yes_panel_visible);
    assert!(!view.no_panel_visible);
    assert_eq!(presentation.page().confetti().len(), CONFETTI_COUNT);
    assert_eq!(*played.borrow(), 1);

    advance(&mut presentation, &clock, ms(1499));
    assert!(presentation.page().alert().is_none());
    advance(&mut presentation, &clock, ms(1));
    assert_eq!(presentation.page().alert(), Some(Content::default().love_letter()));

    advance(&mut presentation, &clock, ms(499));
    assert_eq!(presentation.page().confetti().len(), CONFETTI_COUNT);
    advance(&mut presentation, &clock, ms(1));
    assert!(presentation.page().confetti().is_empty());
    assert_eq!(presentation.timers().count_matching(|t| matches!(t, Task::ExpireConfetti(_))), 0);
}

#[rstest]
fn acceptance_without_audio_or_confetti_container_still_completes(clock: ManualClock) {
    let mut presentation =
        Presentation::new(&Content::default(), &clock, StdRng::seed_from_u64(9))
            .with_page(Page::new(&Content::default()).without_confetti_container());
    presentation.start();
    goto_proposal(&mut presentation, &clock);

    presentation.click(ClickTarget::YesButton, 2.0, 0.0);

    assert!(presentation.page().proposal().yes_panel_visible);
    assert!(presentation.page().confetti().is_empty());
    advance(&mut presentation, &clock, ms(1500));
    assert!(presentation.page().alert().is_some());
    assert!(presentation.dismiss_alert());
    assert!(presentation.page().alert().is_none());
}

#[rstest]
fn declined_control_evades_within_bounds_and_never_accepts(clock: ManualClock) {
    let mut presentation = session(&clock);
    goto_proposal(&mut presentation, &clock);

    presentation.handle(InputEvent::Key(Key::Char('n')));
    let view = presentation.page().proposal();
    assert!(!view.buttons_visible);
    assert!(view.no_panel_visible);
    assert!(!view.yes_panel_visible);

    for _ in 0..50 {
        presentation.hover(ClickTarget::NoButton);
        assert!(presentation.page().proposal().decline_offset.within(HOVER_RANGE_PX));

        let ripples_before = presentation.page().ripples().count();
        let propagation = presentation.click(ClickTarget::NoButton, 1.0, 0.0);
        assert_eq!(propagation, Propagation::Stopped);
        assert!(presentation.page().proposal().decline_offset.within(CLICK_RANGE_PX));
        assert_eq!(presentation.page().ripples().count(), ripples_before);
    }

    presentation.handle(InputEvent::Key(Key::Char('y')));
    assert_eq!(presentation.proposal().outcome(), Some(ProposalOutcome::Declined));
    assert!(!presentation.page().proposal().yes_panel_visible);
    assert!(presentation.page().confetti().is_empty());
}

#[rstest]
fn first_click_on_decline_answers_and_ripples(clock: ManualClock) {
    let mut presentation = session(&clock);
    goto_proposal(&mut presentation, &clock);

    let propagation = presentation.click(ClickTarget::NoButton, 3.0, 0.0);

    assert_eq!(propagation, Propagation::Continue);
    assert_eq!(presentation.proposal().outcome(), Some(ProposalOutcome::Declined));
    assert_eq!(presentation.page().proposal().decline_offset, Default::default());
    let ripples = presentation.page().ripples().map(|(button, _)| button).collect::<Vec<_>>();
    assert_eq!(ripples, vec![ButtonId::No]);
}

#[rstest]
fn next_button_respects_wheel_debounce_and_ripples(clock: ManualClock) {
    let mut presentation = session(&clock);

    presentation.click(ClickTarget::NextButton(SectionId::Landing), 4.0, 0.0);
    presentation.click(ClickTarget::NextButton(SectionId::Message), 4.0, 0.0);
    assert_eq!(presentation.current_section(), SectionId::Message);
    assert_eq!(presentation.page().ripples().count(), 2);

    advance(&mut presentation, &clock, ms(600));
    assert_eq!(presentation.page().ripples().count(), 0);
}

#[rstest]
fn music_autoplays_after_two_seconds(clock: ManualClock) {
    let music = FakeMusic::paused();
    let log = music.log.clone();
    let mut presentation =
        Presentation::new(&Content::default(), &clock, StdRng::seed_from_u64(2))
            .with_audio(Box::new(NoAudio), Box::new(music));
    presentation.start();
    assert_eq!(presentation.page().music_label(), MUSIC_PLAY_LABEL);

    advance(&mut presentation, &clock, ms(2000));
    assert_eq!(presentation.page().music_label(), MUSIC_PAUSE_LABEL);

    presentation.click(ClickTarget::MusicButton, 0.0, 0.0);
    assert_eq!(presentation.page().music_label(), MUSIC_PLAY_LABEL);
    assert_eq!(*log.borrow(), vec!["play", "pause"]);
    assert_eq!(presentation.page().ripples().count(), 0);
}

#[rstest]
fn rejected_autoplay_keeps_play_label(clock: ManualClock) {
    let mut presentation = session(&clock);
    advance(&mut presentation, &clock, ms(2000));
    assert_eq!(presentation.page().music_label(), MUSIC_PLAY_LABEL);

    presentation.toggle_music();
    assert_eq!(presentation.page().music_label(), MUSIC_PLAY_LABEL);
}
