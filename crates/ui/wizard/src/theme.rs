use std::env;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    pub fn detect_auto() -> Self {
        // Override via env if provided
        if let Ok(v) = env::var("WIZARD_COLOR_MODE") {
            return match v.to_ascii_lowercase().as_str() {
                "24bit" | "truecolor" | "rgb" => ColorMode::TrueColor,
                "256" | "ansi256" => ColorMode::Ansi256,
                "16" | "ansi16" | "ansi" => ColorMode::Ansi16,
                _ => ColorMode::Auto,
            };
        }

        // Autodetect by common env vars
        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }

    /// Concrete mode; `Auto` is resolved once from the environment.
    pub fn resolve(self) -> Self {
        match self {
            ColorMode::Auto => match Self::detect_auto() {
                ColorMode::Auto => ColorMode::Ansi16,
                detected => detected,
            },
            other => other,
        }
    }
}

/// Visual roles of the form screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Border,
    Title,
    Description,
    Label,
    Required,
    Help,
    Value,
    Placeholder,
    Focused,
    Selected,
    Track,
    Thumb,
    Error,
    Warn,
    Button,
    ButtonFocused,
    Hint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug)]
pub struct Palette {
    pub fg: Rgb,
    pub dim: Rgb,
    pub border: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub error: Rgb,
    pub warn: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // Subtiles dunkles Standard-Theme (nvim-ähnlich)
        Self {
            fg: Rgb(192, 202, 245),
            dim: Rgb(107, 112, 137),
            border: Rgb(59, 63, 81),
            accent: Rgb(125, 207, 255),
            success: Rgb(158, 206, 106),
            error: Rgb(247, 118, 142),
            warn: Rgb(224, 175, 104),
        }
    }
}

/// Theme tokens handed to the form view. The engine itself never sees them.
#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl Theme {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode: mode.resolve(),
            palette: Palette::default(),
        }
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        match group {
            UiGroup::Border => Style::default().fg(self.color(p.border)),
            UiGroup::Title => Style::default().fg(self.color(p.fg)).add_modifier(Modifier::BOLD),
            UiGroup::Description | UiGroup::Help | UiGroup::Hint => {
                Style::default().fg(self.color(p.dim))
            }
            UiGroup::Label => Style::default().fg(self.color(p.fg)),
            UiGroup::Required => Style::default().fg(self.color(p.error)).add_modifier(Modifier::BOLD),
            UiGroup::Value => Style::default().fg(self.color(p.accent)),
            UiGroup::Placeholder => Style::default()
                .fg(self.color(p.dim))
                .add_modifier(Modifier::ITALIC),
            UiGroup::Focused => Style::default()
                .fg(self.color(p.fg))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            UiGroup::Selected => Style::default().fg(self.color(p.success)).add_modifier(Modifier::BOLD),
            UiGroup::Track => Style::default().fg(self.color(p.border)),
            UiGroup::Thumb => Style::default().fg(self.color(p.accent)).add_modifier(Modifier::BOLD),
            UiGroup::Error => Style::default().fg(self.color(p.error)),
            UiGroup::Warn => Style::default().fg(self.color(p.warn)),
            UiGroup::Button => Style::default().fg(self.color(p.fg)).bg(self.color(p.border)),
            UiGroup::ButtonFocused => Style::default()
                .fg(Color::Black)
                .bg(self.color(p.success))
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb.0, rgb.1, rgb.2)),
            ColorMode::Ansi16 | ColorMode::Auto => ansi16_from_rgb(rgb.0, rgb.1, rgb.2),
        }
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // Map RGB to xterm 256 color palette (6x6x6 cube + grayscale ramp)
    let r_idx = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_idx = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_idx = (b as f32 / 255.0 * 5.0).round() as u8;
    let color_idx = 16 + 36 * r_idx + 6 * g_idx + b_idx; // 16..231

    let avg = (r as u16 + g as u16 + b as u16) as f32 / 3.0;
    let gray_idx = (avg / 255.0 * 23.0).round() as u8; // 0..23
    let gray_color = 232 + gray_idx; // 232..255

    let cube_r = r_idx as f32 * 255.0 / 5.0;
    let cube_g = g_idx as f32 * 255.0 / 5.0;
    let cube_b = b_idx as f32 * 255.0 / 5.0;
    let dcube = (cube_r - r as f32).abs() + (cube_g - g as f32).abs() + (cube_b - b as f32).abs();
    let gval = gray_idx as f32 * 255.0 / 23.0;
    let dgray = (gval - r as f32).abs() + (gval - g as f32).abs() + (gval - b as f32).abs();
    if dgray + 15.0 < dcube {
        gray_color
    } else {
        color_idx
    }
}

fn ansi16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let bright = avg > 128;
    let nearest = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 0, 0)),
        (Color::Green, (0, 205, 0)),
        (Color::Yellow, (205, 205, 0)),
        (Color::Blue, (0, 0, 238)),
        (Color::Magenta, (205, 0, 205)),
        (Color::Cyan, (0, 205, 205)),
        (Color::Gray, (229, 229, 229)),
    ]
    .into_iter()
    .min_by_key(|(_, (cr, cg, cb))| {
        (*cr as i32 - r as i32).abs() + (*cg as i32 - g as i32).abs() + (*cb as i32 - b as i32).abs()
    })
    .map_or(Color::Gray, |(c, _)| c);
    match (nearest, bright) {
        (Color::Black, true) => Color::DarkGray,
        (Color::Red, true) => Color::LightRed,
        (Color::Green, true) => Color::LightGreen,
        (Color::Yellow, true) => Color::LightYellow,
        (Color::Blue, true) => Color::LightBlue,
        (Color::Magenta, true) => Color::LightMagenta,
        (Color::Cyan, true) => Color::LightCyan,
        (Color::Gray, true) => Color::White,
        (c, _) => c,
    }
}
