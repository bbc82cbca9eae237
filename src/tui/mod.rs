// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Renders the presentation [`Page`] with ratatui and turns crossterm input into presentation
//! events. Mouse wheel and arrow keys act as the wheel, a left-button drag acts as a touch
//! swipe, and a press and release on the same cell is a click.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::countdown::CountdownDisplay;
use crate::effects::{Confetti, Heart};
use crate::model::{ButtonId, Page, ScrollRequest, SectionId, SectionView};
use crate::nav::{InputEvent, Key};
use crate::presentation::{ClickTarget, Presentation};
use crate::proposal::Offset;
use crate::schedule::Clock;

mod theme;

pub use theme::ThemeError;
use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::LightMagenta;
const FOOTER_BRAND: &str = "♥ serenade";
/// Wheel delta reported for one scroll notch or arrow key.
const WHEEL_DELTA_PX: f64 = 100.0;
/// Pixels per terminal cell, used to turn drags and decline offsets into page units.
const ROW_PX: f64 = 20.0;
const COLUMN_PX: f64 = 10.0;
const INPUT_POLL: Duration = Duration::from_millis(250);
const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const SLIDE_DURATION: Duration = Duration::from_millis(400);
const DOTS_WIDTH: u16 = 3;
const NEXT_LABEL: &str = "Next ↓";
const YES_LABEL: &str = "Yes";
const NO_LABEL: &str = "No";

/// Runs the interactive terminal UI until the user quits.
///
/// Input is read on the blocking pool; the loop wakes for input, the next timer deadline, or the
/// next animation frame, whichever comes first.
pub async fn run<C: Clock, R: Rng>(presentation: Presentation<C, R>) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(presentation, theme);
    app.presentation.start();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || read_events(tx));

    while !app.should_quit {
        app.presentation.run_due();
        terminal.draw(|frame| draw(frame, &mut app))?;

        let wait = app.wait_budget();
        tokio::select! {
            received = rx.recv() => match received {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            () = tokio::time::sleep(wait) => {}
        }
    }

    drop(rx);
    if let Err(err) = reader.await {
        debug!(error = %err, "input reader ended abnormally");
    }
    info!("presentation closed");
    Ok(())
}

fn read_events(tx: mpsc::UnboundedSender<io::Result<Event>>) {
    while !tx.is_closed() {
        match event::poll(INPUT_POLL) {
            Ok(false) => {}
            Ok(true) => {
                if tx.send(event::read()).is_err() {
                    break;
                }
            }
            Err(err) => {
                let _ = tx.send(Err(err));
                break;
            }
        }
    }
}

struct App<C, R> {
    presentation: Presentation<C, R>,
    theme: TuiTheme,
    show_help: bool,
    should_quit: bool,
    /// Clickable regions from the last frame, in draw order.
    hit_regions: Vec<(Rect, ClickTarget)>,
    pressed_at: Option<(u16, u16)>,
}

impl<C: Clock, R: Rng> App<C, R> {
    fn new(presentation: Presentation<C, R>, theme: TuiTheme) -> Self {
        Self {
            presentation,
            theme,
            show_help: false,
            should_quit: false,
            hit_regions: Vec::new(),
            pressed_at: None,
        }
    }

    fn wait_budget(&self) -> Duration {
        let now = self.presentation.clock().elapsed();
        self.presentation
            .next_deadline()
            .map_or(FRAME_INTERVAL, |deadline| deadline.saturating_sub(now).min(FRAME_INTERVAL))
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.presentation.page().alert().is_some() {
            match code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.presentation.dismiss_alert();
                }
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('m') => self.presentation.toggle_music(),
            KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j' | ' ') => {
                self.wheel(WHEEL_DELTA_PX);
            }
            KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => self.wheel(-WHEEL_DELTA_PX),
            KeyCode::Enter => self.presentation.handle(InputEvent::Key(Key::Enter)),
            KeyCode::Char(ch) => self.presentation.handle(InputEvent::Key(Key::Char(ch))),
            _ => self.presentation.handle(InputEvent::Key(Key::Other)),
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help || self.presentation.page().alert().is_some() {
            return;
        }

        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.wheel(WHEEL_DELTA_PX),
            MouseEventKind::ScrollUp => self.wheel(-WHEEL_DELTA_PX),
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some((column, row));
                self.presentation.handle(InputEvent::TouchStart { y: row_to_px(row) });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed_at.take();
                self.presentation.handle(InputEvent::TouchEnd { y: row_to_px(row) });
                if pressed == Some((column, row)) {
                    self.click_at(column, row);
                }
            }
            MouseEventKind::Moved => {
                if let Some((_, target)) = self.hit_test(column, row) {
                    self.presentation.hover(target);
                }
            }
            _ => {}
        }
    }

    fn wheel(&mut self, delta_y: f64) {
        self.presentation.handle(InputEvent::Wheel { delta_y });
    }

    fn click_at(&mut self, column: u16, row: u16) {
        let Some((rect, target)) = self.hit_test(column, row) else {
            return;
        };
        let x = f64::from(column - rect.x) * COLUMN_PX;
        let y = f64::from(row - rect.y) * ROW_PX;
        self.presentation.click(target, x, y);
    }

    /// Topmost region under the cell, if any.
    fn hit_test(&self, column: u16, row: u16) -> Option<(Rect, ClickTarget)> {
        self.hit_regions
            .iter()
            .rev()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .copied()
    }
}

fn row_to_px(row: u16) -> f64 {
    f64::from(row) * ROW_PX
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn draw<C: Clock, R: Rng>(frame: &mut Frame<'_>, app: &mut App<C, R>) {
    let area = frame.area();
    let now = app.presentation.clock().elapsed();
    let page = app.presentation.page();
    let theme = &app.theme;
    app.hit_regions.clear();

    frame.render_widget(Block::default().style(theme.base_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let (body_area, footer_area) = (rows[0], rows[1]);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(DOTS_WIDTH)])
        .split(body_area);
    let (stage, dots_area) = (columns[0], columns[1]);

    if let Some(hearts) = page.hearts() {
        for heart in hearts {
            if let Some((x, y)) = heart_cell(heart, stage, now) {
                frame.buffer_mut().set_string(x, y, "♥", theme.heart_style(heart.opacity));
            }
        }
    }

    if let Some(section) = page.active_section() {
        render_section(frame, page, section, theme, stage, now, &mut app.hit_regions);
    }
    render_music_button(frame, page, theme, stage, &mut app.hit_regions);
    render_dots(frame, page, theme, dots_area);

    for piece in page.confetti() {
        if let Some((x, y)) = confetti_cell(piece, stage, now) {
            let symbol = if piece.round { "●" } else { "■" };
            let style = theme.base_style().fg(theme.confetti_color(piece.color));
            frame.buffer_mut().set_string(x, y, symbol, style);
        }
    }

    let position = app.presentation.navigation().current_index();
    let total = app.presentation.navigation().sections().len();
    let compact = footer_uses_compact_mode(footer_area);
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(FOOTER_BRAND.chars().count() as u16)])
        .split(footer_area);
    frame.render_widget(Paragraph::new(footer_help_line(page, position, total, compact)), footer[0]);
    frame.render_widget(Paragraph::new(footer_brand_line()), footer[1]);

    if app.show_help {
        render_help(frame, theme, body_area);
    }
    if let Some(message) = page.alert() {
        render_alert(frame, theme, message, body_area);
    }
}

fn render_section(
    frame: &mut Frame<'_>,
    page: &Page,
    section: &SectionView,
    theme: &TuiTheme,
    stage: Rect,
    now: Duration,
    hits: &mut Vec<(Rect, ClickTarget)>,
) {
    let panel = centered_rect(80, 80, stage);
    let offset = slide_offset(panel.height, page.scroll_request(), now);
    let panel = Rect {
        y: panel.y.saturating_add(offset),
        height: panel.height.saturating_sub(offset),
        ..panel
    };
    if panel.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style())
        .title(Span::styled(format!(" {} ", section.title()), theme.title_style()));
    let inner = block.inner(panel);
    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let (text_area, controls) = (parts[0], parts[1]);

    let paragraph = Paragraph::new(section_text(page, section, theme))
        .style(theme.base_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, text_area);

    let is_last = page.sections().last().map(SectionView::id) == Some(section.id());
    match section.id() {
        SectionId::Proposal => render_proposal_buttons(frame, page, theme, controls, stage, hits),
        id if !is_last => {
            let rect = button_rect(controls, NEXT_LABEL, 0);
            render_button(frame, page, theme, rect, NEXT_LABEL, ButtonId::Next(id));
            hits.push((rect, ClickTarget::NextButton(id)));
        }
        _ => {}
    }
}

fn section_text(page: &Page, section: &SectionView, theme: &TuiTheme) -> Text<'static> {
    let mut lines = vec![Line::from(""), Line::from(section.body().to_owned())];
    match section.id() {
        SectionId::Countdown => {
            lines.push(Line::from(""));
            lines.extend(countdown_lines(page.countdown(), theme));
        }
        SectionId::Proposal => {
            let view = page.proposal();
            if view.yes_panel_visible {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(view.yes_text.clone(), theme.title_style())));
            }
            if view.no_panel_visible {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(view.no_text.clone(), theme.error_style())));
            }
        }
        _ => {}
    }
    Text::from(lines)
}

fn countdown_lines(display: &CountdownDisplay, theme: &TuiTheme) -> Vec<Line<'static>> {
    let labels = ["Days", "Hours", "Minutes", "Seconds"];
    let mut values = Vec::new();
    let mut captions = Vec::new();
    for (value, label) in display.fields().into_iter().zip(labels) {
        values.push(Span::styled(format!("{value:^9}"), theme.countdown_value_style()));
        captions.push(Span::raw(format!("{label:^9}")));
    }
    vec![Line::from(values), Line::from(captions)]
}

/// Yes and No side by side while unanswered. After a decline only the No button remains and
/// it is drawn at its evasive offset, clamped to the stage.
fn render_proposal_buttons(
    frame: &mut Frame<'_>,
    page: &Page,
    theme: &TuiTheme,
    controls: Rect,
    stage: Rect,
    hits: &mut Vec<(Rect, ClickTarget)>,
) {
    let view = page.proposal();
    if view.buttons_visible {
        let yes = button_rect(controls, YES_LABEL, -6);
        render_button(frame, page, theme, yes, YES_LABEL, ButtonId::Yes);
        hits.push((yes, ClickTarget::YesButton));
    }
    if view.buttons_visible || view.no_panel_visible {
        let home = button_rect(controls, NO_LABEL, 6);
        let no = offset_rect(home, view.decline_offset, stage);
        render_button(frame, page, theme, no, NO_LABEL, ButtonId::No);
        hits.push((no, ClickTarget::NoButton));
    }
}

fn render_music_button(
    frame: &mut Frame<'_>,
    page: &Page,
    theme: &TuiTheme,
    stage: Rect,
    hits: &mut Vec<(Rect, ClickTarget)>,
) {
    let label = format!("♪ {}", page.music_label());
    let width = (label.chars().count() as u16 + 2).min(stage.width);
    if stage.height == 0 || width == 0 {
        return;
    }
    let rect = Rect {
        x: stage.x + stage.width - width,
        y: stage.y + stage.height - 1,
        width,
        height: 1,
    };
    let paragraph = Paragraph::new(label)
        .style(theme.button_style(false))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, rect);
    hits.push((rect, ClickTarget::MusicButton));
}

fn render_button(
    frame: &mut Frame<'_>,
    page: &Page,
    theme: &TuiTheme,
    rect: Rect,
    label: &str,
    button: ButtonId,
) {
    let rippling = page.ripples().any(|(id, _)| id == button);
    let paragraph = Paragraph::new(label.to_owned())
        .style(theme.button_style(rippling))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, rect);
}

fn render_dots(frame: &mut Frame<'_>, page: &Page, theme: &TuiTheme, area: Rect) {
    let dots = page.dots();
    let needed = (dots.len() as u16).saturating_mul(2);
    if area.width == 0 || area.height < needed {
        return;
    }
    let top = area.y + (area.height - needed) / 2;
    let x = area.x + area.width / 2;
    for (idx, dot) in dots.iter().enumerate() {
        let symbol = if dot.active { "●" } else { "○" };
        let y = top + idx as u16 * 2;
        frame.buffer_mut().set_string(x, y, symbol, theme.dot_style(dot.active));
    }
}

/// A one-row button centered in `area`, shifted `shift` columns from the center.
fn button_rect(area: Rect, label: &str, shift: i32) -> Rect {
    let width = (label.chars().count() as u16 + 4).min(area.width);
    let center = i32::from(area.x) + i32::from(area.width) / 2 + shift;
    let min_x = i32::from(area.x);
    let max_x = i32::from(area.x + area.width - width);
    let x = (center - i32::from(width) / 2).clamp(min_x, max_x.max(min_x));
    Rect { x: x as u16, y: area.y, width, height: area.height.min(1) }
}

fn offset_rect(rect: Rect, offset: Offset, bounds: Rect) -> Rect {
    let dx = (offset.x / COLUMN_PX).round() as i32;
    let dy = (offset.y / ROW_PX).round() as i32;
    let max_x = i32::from(bounds.x + bounds.width.saturating_sub(rect.width));
    let max_y = i32::from(bounds.y + bounds.height.saturating_sub(rect.height));
    let x = (i32::from(rect.x) + dx).clamp(i32::from(bounds.x), max_x.max(i32::from(bounds.x)));
    let y = (i32::from(rect.y) + dy).clamp(i32::from(bounds.y), max_y.max(i32::from(bounds.y)));
    Rect { x: x as u16, y: y as u16, ..rect }
}

/// Rows the active panel is still shifted down by while it slides into view.
fn slide_offset(height: u16, scroll: Option<ScrollRequest>, now: Duration) -> u16 {
    let Some(request) = scroll else {
        return 0;
    };
    let since = now.saturating_sub(request.at);
    if since >= SLIDE_DURATION {
        return 0;
    }
    let remaining = 1.0 - since.as_secs_f64() / SLIDE_DURATION.as_secs_f64();
    (f64::from(height / 3) * remaining).round() as u16
}

/// Hearts drift upwards and wrap around.
fn heart_cell(heart: &Heart, area: Rect, now: Duration) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let period = heart.float_duration.as_secs_f64();
    let phase = match now.checked_sub(heart.delay) {
        Some(elapsed) if period > 0.0 => (elapsed.as_secs_f64() / period).fract(),
        _ => 0.0,
    };
    let top = (heart.top_pct / 100.0 - phase).rem_euclid(1.0);
    Some(scale_into(area, heart.left_pct / 100.0, top))
}

/// Confetti falls from the top edge over its fall duration once its delay has passed.
fn confetti_cell(piece: &Confetti, area: Rect, now: Duration) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let progress = piece.progress(now)?;
    Some(scale_into(area, piece.left_pct / 100.0, progress))
}

fn scale_into(area: Rect, x_frac: f64, y_frac: f64) -> (u16, u16) {
    let x = (x_frac.clamp(0.0, 1.0) * f64::from(area.width - 1)).round() as u16;
    let y = (y_frac.clamp(0.0, 1.0) * f64::from(area.height - 1)).round() as u16;
    (area.x + x, area.y + y)
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
