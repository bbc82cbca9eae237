// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

const PALETTE_ENV: &str = "SERENADE_TUI_PALETTE";

/// Colors by what they paint. The defaults stay on the terminal's own ANSI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Roles {
    /// Titles and the active dot.
    accent: Color,
    /// Panel borders and button faces.
    frame: Color,
    /// Hearts and the declined panel.
    heart: Color,
    muted: Color,
    /// Countdown digits.
    highlight: Color,
    /// Button labels.
    on_frame: Color,
}

impl Default for Roles {
    fn default() -> Self {
        Self {
            accent: Color::LightMagenta,
            frame: Color::Magenta,
            heart: Color::Red,
            muted: Color::DarkGray,
            highlight: Color::LightYellow,
            on_frame: Color::White,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    base: Option<(Color, Color)>,
    roles: Roles,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV.to_string(),
                    value: "<non-unicode>".to_string(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        Self::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
            name: PALETTE_ENV.to_string(),
            value: format!("{trimmed} ({error})"),
        })
    }

    /// `fg,bg,accent,frame,heart,muted,highlight`, each `#RRGGBB`.
    fn parse_csv(value: &str) -> Result<Self, String> {
        let colors = value.split(',').map(parse_hex_color).collect::<Result<Vec<_>, _>>()?;
        let [fg, bg, accent, frame, heart, muted, highlight] = colors[..] else {
            return Err(format!(
                "expected 7 comma-separated colors (fg,bg,accent,frame,heart,muted,highlight), got {}",
                colors.len()
            ));
        };

        Ok(Self {
            base: Some((fg, bg)),
            roles: Roles { accent, frame, heart, muted, highlight, on_frame: fg },
        })
    }

    pub(crate) fn base_style(&self) -> Style {
        match self.base {
            Some((fg, bg)) => Style::default().fg(fg).bg(bg),
            None => Style::default(),
        }
    }

    pub(crate) fn title_style(&self) -> Style {
        self.base_style().fg(self.roles.accent).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn heart_style(&self, opacity: f64) -> Style {
        let style = self.base_style().fg(self.roles.heart);
        if opacity < 0.5 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    /// Buttons render reversed while a ripple is running on them.
    pub(crate) fn button_style(&self, rippling: bool) -> Style {
        let style = self
            .base_style()
            .fg(self.roles.on_frame)
            .bg(self.roles.frame)
            .add_modifier(Modifier::BOLD);
        if rippling {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub(crate) fn dot_style(&self, active: bool) -> Style {
        let color = if active { self.roles.accent } else { self.roles.muted };
        self.base_style().fg(color)
    }

    pub(crate) fn countdown_value_style(&self) -> Style {
        self.base_style().fg(self.roles.highlight).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn panel_border_style(&self) -> Style {
        self.base_style().fg(self.roles.frame)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.roles.heart)
    }

    /// Confetti keeps its own hex color; unparsable values fall back to the frame color.
    pub(crate) fn confetti_color(&self, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or(self.roles.frame)
    }
}

fn parse_hex_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed:?} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[derive(Debug, Clone)]
pub enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};
    use rstest::rstest;

    use super::{parse_hex_color, TuiTheme};
    use crate::config::CONFETTI_PALETTE;

    #[test]
    fn palette_override_assigns_roles() {
        let theme = TuiTheme::parse_csv(
            "#111111, #222222, #ff00ff, #880088, #ff0000, #444444, #ffff00",
        )
        .expect("palette");

        assert_eq!(theme.base_style().bg, Some(Color::Rgb(0x22, 0x22, 0x22)));
        assert_eq!(theme.title_style().fg, Some(Color::Rgb(0xff, 0x00, 0xff)));
        assert_eq!(theme.button_style(false).fg, Some(Color::Rgb(0x11, 0x11, 0x11)));
        assert_eq!(theme.button_style(false).bg, Some(Color::Rgb(0x88, 0x00, 0x88)));
        assert_eq!(theme.dot_style(false).fg, Some(Color::Rgb(0x44, 0x44, 0x44)));
        assert_eq!(theme.countdown_value_style().fg, Some(Color::Rgb(0xff, 0xff, 0x00)));
    }

    #[rstest]
    #[case("nope")]
    #[case("#111111,#222222")]
    #[case("#111111,#222222,#333333,#444444,#555555,#666666,#777777,#888888")]
    #[case("#111111,#222222,#333333,#444444,#555555,#666666,rgb:ff/00/00")]
    fn palette_override_rejects_bad_csv(#[case] raw: &str) {
        TuiTheme::parse_csv(raw).unwrap_err();
    }

    #[test]
    fn default_theme_uses_ansi_colors() {
        let theme = TuiTheme::default();
        assert_eq!(theme.base_style().bg, None);
        assert_eq!(theme.heart_style(1.0).fg, Some(Color::Red));
        assert!(theme.heart_style(0.3).add_modifier.contains(Modifier::DIM));
        assert!(theme.button_style(true).add_modifier.contains(Modifier::REVERSED));
        assert_eq!(theme.dot_style(true).fg, Some(Color::LightMagenta));
    }

    #[rstest]
    #[case("#7E57C2", Color::Rgb(0x7e, 0x57, 0xc2))]
    #[case("F3E5F5", Color::Rgb(0xf3, 0xe5, 0xf5))]
    #[case(" #000001 ", Color::Rgb(0, 0, 1))]
    fn parses_hex_colors(#[case] raw: &str, #[case] expected: Color) {
        assert_eq!(parse_hex_color(raw), Ok(expected));
    }

    #[test]
    fn every_confetti_color_is_a_real_rgb() {
        let theme = TuiTheme::default();
        for hex in CONFETTI_PALETTE {
            assert!(matches!(theme.confetti_color(hex), Color::Rgb(..)), "{hex}");
        }
        assert_eq!(theme.confetti_color("purple"), Color::Magenta);
    }
}
