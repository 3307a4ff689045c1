//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Background of every view
pub const BG_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Title text on the main menu
pub const TITLE_COLOR: Color = Color::new(0.55, 0.80, 0.30, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.5, 0.5, 0.55, 1.0);

/// Error/status text
pub const STATUS_COLOR: Color = Color::new(0.95, 0.65, 0.30, 1.0);

/// Header/overlay background
pub const HEADER_COLOR: Color = Color::new(0.08, 0.08, 0.10, 0.85);

// =============================================================================
// Buttons
// =============================================================================

pub const BUTTON_BG: Color = Color::new(0.16, 0.16, 0.19, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.22, 0.26, 0.30, 1.0);
pub const BUTTON_PRESSED: Color = Color::new(0.28, 0.34, 0.40, 1.0);
pub const BUTTON_BORDER: Color = Color::new(0.35, 0.35, 0.40, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Main menu title
pub const FONT_SIZE_TITLE: f32 = 64.0;

/// Button labels
pub const FONT_SIZE_BUTTON: f32 = 24.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 18.0;

// =============================================================================
// World rendering
// =============================================================================

/// Multiplier applied to the colour of the level below when drawn as floor
pub const FLOOR_DIM: f32 = 0.55;
