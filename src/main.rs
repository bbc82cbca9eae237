// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serenade CLI entrypoint.
//!
//! Runs the presentation in the terminal. Logging is opt-in and always goes to a file, since the
//! TUI owns the terminal.

use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use rand::{rngs::StdRng, SeedableRng};
use serenade::audio::{NoAudio, TerminalBell, ToneOutput};
use serenade::config::Content;
use serenade::presentation::Presentation;
use serenade::schedule::SystemClock;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SERENADE_LOG";
const DEFAULT_LOG_FILTER: &str = "serenade=info";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--content <file.json>] [--log <file>] [--bell]\n\n--content overrides section titles, bodies and messages from a JSON file.\n--log appends diagnostics to <file>; {LOG_ENV} sets the filter (default {DEFAULT_LOG_FILTER}).\n--bell rings the terminal bell for the celebration tone."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    content: Option<String>,
    log: Option<String>,
    bell: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--content" => {
                if options.content.is_some() {
                    return Err(());
                }
                options.content = Some(args.next().ok_or(())?);
            }
            "--log" => {
                if options.log.is_some() {
                    return Err(());
                }
                options.log = Some(args.next().ok_or(())?);
            }
            "--bell" => {
                if options.bell {
                    return Err(());
                }
                options.bell = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "serenade".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(path) = options.log.as_deref() {
            init_logging(path)?;
        }

        let content = match options.content.as_deref() {
            Some(path) => Content::load(path)?,
            None => Content::default(),
        };

        let tones: Box<dyn ToneOutput> = if options.bell {
            Box::new(TerminalBell::new(io::stdout()))
        } else {
            Box::new(NoAudio)
        };
        let presentation = Presentation::new(&content, SystemClock::new(), StdRng::from_entropy())
            .with_audio(tones, Box::new(NoAudio));

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(serenade::tui::run(presentation))?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("serenade: {err}");
        std::process::exit(1);
    }
}
