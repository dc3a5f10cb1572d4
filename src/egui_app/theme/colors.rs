//! Color constants for the Paper Killer theme: ink-blue chrome on
//! paper-white content.

use eframe::egui::Color32;

/// Top bar background - Deep ink
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1E, 0x2A, 0x3A);

/// Navigation sidebar background
pub const SIDEBAR_BG: Color32 = Color32::from_rgb(0x25, 0x33, 0x46);

/// Main content background - Paper white
pub const CONTENT_BG: Color32 = Color32::from_rgb(0xF7, 0xF5, 0xF0);

/// Card background
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xD9, 0xD4, 0xC7);

/// Dark background for the auth screens
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x2A, 0x3A);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEE, 0xF1, 0xF5);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x1E, 0x2A, 0x3A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x7A, 0x86, 0x96);

/// Accent color for primary buttons and links
pub const ACCENT: Color32 = Color32::from_rgb(0x2F, 0x6F, 0xB3);

/// Selected navigation entry
pub const SELECTED_ITEM: Color32 = Color32::from_rgb(0x3A, 0x4D, 0x66);

/// Favorite star
pub const FAVORITE: Color32 = Color32::from_rgb(0xF2, 0xB1, 0x34);

/// Tag chip background
pub const TAG_BG: Color32 = Color32::from_rgb(0xE3, 0xEC, 0xF7);

pub const SUCCESS: Color32 = Color32::from_rgb(0x3C, 0x9A, 0x5F);

pub const ERROR: Color32 = Color32::from_rgb(0xD6, 0x4B, 0x4B);

pub const WARNING: Color32 = Color32::from_rgb(0xE8, 0x9A, 0x2C);

pub const INFO: Color32 = Color32::from_rgb(0x4A, 0x8B, 0xC9);
