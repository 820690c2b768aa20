//! Centralized theme constants for Pref Counter
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Dark palette (zinc + teal)
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900

pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// COLORS - Light palette
// =============================================================================
pub const LIGHT_BG_BASE: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa); // zinc-50
pub const LIGHT_BG_ELEVATED: Color32 = Color32::WHITE;

pub const LIGHT_TEXT_PRIMARY: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const LIGHT_TEXT_MUTED: Color32 = Color32::from_rgb(0x52, 0x52, 0x5b); // zinc-600
pub const LIGHT_TEXT_DIM: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
pub const BTN_ACCENT_HOVER: Color32 = Color32::from_rgb(0x14, 0xb8, 0xa6); // teal-500

pub const BTN_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600
pub const BTN_DANGER_HOVER: Color32 = Color32::from_rgb(0xb9, 0x1c, 0x1c); // red-700

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_COUNTER: f32 = 64.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const CHECKBOX_SIZE: f32 = 18.0;
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPERS - Palette selection by persisted theme flag
// =============================================================================
pub fn text_primary(dark: bool) -> Color32 {
    if dark { TEXT_PRIMARY } else { LIGHT_TEXT_PRIMARY }
}

pub fn text_muted(dark: bool) -> Color32 {
    if dark { TEXT_MUTED } else { LIGHT_TEXT_MUTED }
}

pub fn text_dim(dark: bool) -> Color32 {
    if dark { TEXT_DIM } else { LIGHT_TEXT_DIM }
}

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context, dark: bool) {
    let visuals = if dark {
        egui::Visuals {
            dark_mode: true,
            panel_fill: BG_BASE,
            window_fill: Color32::from_rgb(0x1a, 0x1a, 0x1e),
            extreme_bg_color: BG_BASE,
            faint_bg_color: BG_ELEVATED,
            hyperlink_color: ACCENT,
            ..egui::Visuals::dark()
        }
    } else {
        egui::Visuals {
            dark_mode: false,
            panel_fill: LIGHT_BG_BASE,
            window_fill: LIGHT_BG_ELEVATED,
            extreme_bg_color: LIGHT_BG_BASE,
            faint_bg_color: LIGHT_BG_ELEVATED,
            hyperlink_color: BTN_ACCENT_HOVER,
            ..egui::Visuals::light()
        }
    };
    ctx.set_visuals(visuals);
}
