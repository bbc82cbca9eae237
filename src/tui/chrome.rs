// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, footer, help, and popup helpers used by TUI rendering.
fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 72
}

fn footer_help_line(page: &Page, position: usize, total: usize, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    push_footer_entry(&mut spans, "section", &format!("{}/{}", position + 1, total));
    push_footer_entry(&mut spans, "scroll", "j/k");
    let answering = page.active_section().map(SectionView::id) == Some(SectionId::Proposal);
    let answered = !page.proposal().buttons_visible;
    push_footer_entry_maybe_disabled(&mut spans, "answer", "y/n", !answering || answered);
    if !compact {
        push_footer_entry(&mut spans, "music", "m");
        push_footer_entry(&mut spans, "help", "?");
    }
    push_footer_entry(&mut spans, "quit", "q");

    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, theme: &TuiTheme, main_area: Rect) {
    let area = centered_rect(70, 90, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);

    let key_col_width = ["j/k, ↓/↑, PgDn/PgUp", "Mouse drag"]
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();

    lines.push(Line::from(Span::styled("--- Navigate ---", header_style)));
    lines.push(help_kv("j/k, ↓/↑, PgDn/PgUp", "Next/previous section", key_col_width, key_style));
    lines.push(help_kv("Mouse wheel", "Next/previous section", key_col_width, key_style));
    lines.push(help_kv("Mouse drag", "Swipe up/down", key_col_width, key_style));
    lines.push(help_kv("Click", "Press a button", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Proposal ---", header_style)));
    lines.push(help_kv("y, Enter", "Yes", key_col_width, key_style));
    lines.push(help_kv("n", "No", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Global ---", header_style)));
    lines.push(help_kv("m", "Play/pause music", key_col_width, key_style));
    lines.push(help_kv("?", "Help (toggle)", key_col_width, key_style));
    lines.push(help_kv("q, Esc", "Quit", key_col_width, key_style));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Esc or ? closes this help.", dim_style)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style())
        .title(" Help ");
    let paragraph = Paragraph::new(Text::from(lines))
        .style(theme.base_style())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_alert(frame: &mut Frame<'_>, theme: &TuiTheme, message: &str, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);

    let mut lines = message.lines().map(|line| Line::from(line.to_owned())).collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style())
        .title(Span::styled(" ♥ ", theme.title_style()));
    let paragraph = Paragraph::new(Text::from(lines))
        .style(theme.base_style())
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(footer_value_span(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_span(value: &str, disabled: bool) -> Span<'static> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))
}
