// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};

use serenade::audio::{AudioError, MusicOutput, ToneOutput};
use serenade::config::{Content, CONFETTI_COUNT, MUSIC_PAUSE_LABEL};
use serenade::countdown::CountdownTarget;
use serenade::effects::ToneSequence;
use serenade::model::SectionId;
use serenade::nav::{DebounceSource, InputEvent, Key};
use serenade::presentation::{ClickTarget, Presentation};
use serenade::proposal::{ProposalOutcome, Propagation};
use serenade::schedule::ManualClock;

#[derive(Clone, Default)]
struct RecordingTones {
    frequencies: Rc<RefCell<Vec<f64>>>,
}

impl ToneOutput for RecordingTones {
    fn play(&mut self, tones: &ToneSequence) -> Result<(), AudioError> {
        self.frequencies.borrow_mut().extend(tones.notes.iter().map(|note| note.frequency_hz));
        Ok(())
    }
}

#[derive(Default)]
struct Speaker {
    playing: bool,
}

impl MusicOutput for Speaker {
    fn play(&mut self) -> Result<(), AudioError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_paused(&self) -> bool {
        !self.playing
    }
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("content.json")
}

fn advance(presentation: &mut Presentation<&ManualClock, StdRng>, clock: &ManualClock, ms: u64) {
    clock.advance(Duration::from_millis(ms));
    presentation.run_due();
}

#[test]
fn full_session_in_virtual_time() {
    let content = Content::load(fixture_path()).expect("content fixture");
    let origin = Utc.with_ymd_and_hms(2025, 2, 13, 23, 0, 0).unwrap();
    let clock = ManualClock::new(origin);
    let tones = RecordingTones::default();
    let frequencies = tones.frequencies.clone();

    let mut presentation = Presentation::new(&content, &clock, StdRng::seed_from_u64(2025))
        .with_target(CountdownTarget::valentines(&origin))
        .with_audio(Box::new(tones), Box::new(Speaker::default()));
    presentation.start();

    let landing = presentation.page().active_section().expect("landing");
    assert_eq!(landing.title(), "Hi Sam");
    assert_eq!(presentation.page().countdown().fields(), ["00", "01", "00", "00"]);

    advance(&mut presentation, &clock, 2000);
    assert_eq!(presentation.page().music_label(), MUSIC_PAUSE_LABEL);
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "59", "58"]);

    // A burst of wheel events commits a single transition.
    for _ in 0..10 {
        presentation.handle(InputEvent::Wheel { delta_y: 120.0 });
    }
    assert_eq!(presentation.current_section(), SectionId::Message);

    advance(&mut presentation, &clock, 800);
    presentation.handle(InputEvent::TouchStart { y: 500.0 });
    presentation.handle(InputEvent::TouchEnd { y: 300.0 });
    assert_eq!(presentation.current_section(), SectionId::Memories);
    assert!(presentation.navigation().is_debouncing(DebounceSource::Touch));

    advance(&mut presentation, &clock, 800);
    presentation.click(ClickTarget::NextButton(SectionId::Memories), 10.0, 0.0);
    assert_eq!(presentation.current_section(), SectionId::Proposal);

    presentation.handle(InputEvent::Key(Key::Enter));
    assert_eq!(presentation.proposal().outcome(), Some(ProposalOutcome::Accepted));
    assert_eq!(presentation.page().proposal().yes_text, "Best. Answer. Ever.");
    assert_eq!(presentation.page().confetti().len(), CONFETTI_COUNT);
    assert_eq!(*frequencies.borrow(), vec![523.25, 659.25, 783.99, 1046.5]);

    assert_eq!(presentation.click(ClickTarget::NoButton, 0.0, 0.0), Propagation::Continue);
    assert_eq!(presentation.proposal().outcome(), Some(ProposalOutcome::Accepted));

    advance(&mut presentation, &clock, 1500);
    assert_eq!(presentation.page().alert(), Some("Sam,\nSee you on the fourteenth."));
    advance(&mut presentation, &clock, 500);
    assert!(presentation.page().confetti().is_empty());
    assert!(presentation.dismiss_alert());

    presentation.handle(InputEvent::Wheel { delta_y: 1.0 });
    advance(&mut presentation, &clock, 800);
    presentation.handle(InputEvent::Wheel { delta_y: 1.0 });
    assert_eq!(presentation.current_section(), SectionId::Countdown);
    let countdown = presentation.page().active_section().expect("countdown");
    assert_eq!(countdown.body(), "Until our day");

    advance(&mut presentation, &clock, 60 * 60 * 1000);
    assert_eq!(presentation.page().countdown().fields(), ["00", "00", "00", "00"]);
    let visible = presentation.page().sections().iter().filter(|s| s.is_active()).count();
    assert_eq!(visible, 1);
}

#[test]
fn content_fixture_rejects_unknown_fields() {
    let err = Content::from_json(r#"{ "sections": {}, "signature": "me" }"#).unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}
