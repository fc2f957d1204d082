//! Styles derived from focus, tab activity and status band.
//!
//! Every style is computed on demand from the state it depends on; nothing
//! here is mutable.

use crate::repl::events::Focus;
use crate::repl::models::StatusBand;
use crossterm::style::{Attribute, Color, ContentStyle, Stylize};

pub const HIGHLIGHT: Color = Color::Rgb {
    r: 0x51,
    g: 0x9F,
    b: 0x50,
};
pub const MUTED: Color = Color::Rgb {
    r: 0x53,
    g: 0x53,
    b: 0x53,
};
pub const STATUS_OK: Color = Color::Rgb {
    r: 0x21,
    g: 0xFF,
    b: 0x4E,
};
pub const STATUS_REDIRECT: Color = Color::Rgb {
    r: 0xFF,
    g: 0xC6,
    b: 0x6D,
};
pub const STATUS_ERROR: Color = Color::Rgb {
    r: 0xDA,
    g: 0x49,
    b: 0x39,
};

/// Prompt and text of an input slot
pub fn slot_style(focused: bool) -> ContentStyle {
    if focused {
        ContentStyle::new().with(HIGHLIGHT)
    } else {
        ContentStyle::new()
    }
}

/// Frame colour of the tabbed region: highlighted while it has focus
pub fn border_color(focus: Focus) -> Color {
    match focus {
        Focus::ResponseRegion => HIGHLIGHT,
        Focus::InputRegion => MUTED,
    }
}

pub fn border_style(focus: Focus) -> ContentStyle {
    ContentStyle::new().with(border_color(focus))
}

pub fn tab_style(active: bool, focus: Focus) -> ContentStyle {
    let style = ContentStyle::new().with(border_color(focus));
    if active {
        style.attribute(Attribute::Bold).attribute(Attribute::Reverse)
    } else {
        style
    }
}

/// Background colour of the status block for a band
pub fn status_color(band: StatusBand) -> Color {
    match band {
        StatusBand::Ok => STATUS_OK,
        StatusBand::Redirect => STATUS_REDIRECT,
        StatusBand::Error => STATUS_ERROR,
    }
}

pub fn status_style(band: StatusBand) -> ContentStyle {
    ContentStyle::new().with(Color::Black).on(status_color(band))
}

pub fn spinner_style() -> ContentStyle {
    ContentStyle::new().with(HIGHLIGHT)
}

pub fn error_style() -> ContentStyle {
    ContentStyle::new().with(STATUS_ERROR)
}

pub fn message_style() -> ContentStyle {
    ContentStyle::new().with(HIGHLIGHT)
}

pub fn help_style() -> ContentStyle {
    ContentStyle::new().with(MUTED)
}
