use serde::Serialize;

use crate::{
    config::Settings,
    constants::{BASE_FILE_BADGE, BASE_FILE_TOOLTIP},
};

/// What a file explorer shows next to a base file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub badge: Option<char>,
    pub color: String,
    pub tooltip: &'static str,
}

impl Decoration {
    /// `None` when highlighting is disabled or the file is not a base file
    pub fn for_file(settings: &Settings, is_base_file: bool) -> Option<Self> {
        if !settings.enabled || !is_base_file {
            return None;
        }

        Some(if settings.use_symbol {
            Self {
                badge: Some(BASE_FILE_BADGE),
                color: settings.symbol_color.clone(),
                tooltip: BASE_FILE_TOOLTIP,
            }
        } else {
            Self { badge: None, color: settings.highlight_color.clone(), tooltip: BASE_FILE_TOOLTIP }
        })
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional)
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#').unwrap_or(color.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
