//! Color palette
//!
//! RGB tuples shared by entities, tiles, bars and the message log.
//! The UI layer converts these into terminal colors.

/// An RGB color
pub type Rgb = (u8, u8, u8);

// Message and text colors
pub const WHITE: Rgb = (255, 255, 255);
pub const RED: Rgb = (255, 0, 0);
pub const DARK_RED: Rgb = (128, 0, 0);
pub const DARKER_RED: Rgb = (64, 0, 0);
pub const LIGHT_RED: Rgb = (255, 115, 115);
pub const ORANGE: Rgb = (255, 127, 0);
pub const YELLOW: Rgb = (255, 255, 0);
pub const LIGHT_YELLOW: Rgb = (255, 255, 115);
pub const GREEN: Rgb = (0, 255, 0);
pub const LIGHT_GREEN: Rgb = (115, 255, 115);
pub const LIGHT_CYAN: Rgb = (115, 255, 255);
pub const LIGHT_BLUE: Rgb = (115, 115, 255);
pub const DARKER_BLUE: Rgb = (0, 0, 128);
pub const LIGHT_VIOLET: Rgb = (185, 115, 255);
pub const LIGHT_GRAY: Rgb = (159, 159, 159);
pub const LIGHTEST_GRAY: Rgb = (223, 223, 223);

// Entity colors
pub const DESATURATED_GREEN: Rgb = (63, 127, 63);
pub const DARKER_GREEN: Rgb = (0, 127, 0);
pub const VIOLET: Rgb = (127, 0, 255);
pub const AZURE: Rgb = (0, 127, 255);
pub const SKY: Rgb = (0, 191, 255);
pub const DARKER_ORANGE: Rgb = (127, 63, 0);
pub const DARKER_HAN: Rgb = (32, 0, 127);
pub const GOLD: Rgb = (255, 191, 0);
pub const PALE_SPIRIT: Rgb = (180, 200, 255);

// Tile colors (lit / remembered)
pub const LIGHT_WALL: Rgb = (130, 110, 50);
pub const DARK_WALL: Rgb = (0, 0, 100);
pub const LIGHT_GROUND: Rgb = (200, 180, 50);
pub const DARK_GROUND: Rgb = (50, 50, 150);
