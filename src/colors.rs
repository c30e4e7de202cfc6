//! Named colors as CIE 1931 xy chromaticity coordinates.

/// A fixed color, independent of brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
	name: &'static str,
	xy: [f64; 2],
}

impl Color {
	const fn new(name: &'static str, x: f64, y: f64) -> Self {
		Color { name, xy: [x, y] }
	}

	/// Lowercase name used by [`by_name`].
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Coordinates as sent in the `xy` field of a light state.
	pub fn xy(&self) -> [f64; 2] {
		self.xy
	}
}

pub const RED: Color = Color::new("red", 0.6915, 0.3083);
pub const ORANGE: Color = Color::new("orange", 0.5614, 0.4156);
pub const YELLOW: Color = Color::new("yellow", 0.4325, 0.5007);
pub const GREEN: Color = Color::new("green", 0.1700, 0.7000);
pub const CYAN: Color = Color::new("cyan", 0.1607, 0.3423);
pub const BLUE: Color = Color::new("blue", 0.1530, 0.0480);
pub const PURPLE: Color = Color::new("purple", 0.2485, 0.0917);
pub const PINK: Color = Color::new("pink", 0.3824, 0.1601);
pub const WHITE: Color = Color::new("white", 0.3227, 0.3290);

/// All named colors.
pub static ALL: [Color; 9] = [RED, ORANGE, YELLOW, GREEN, CYAN, BLUE, PURPLE, PINK, WHITE];

/// Looks up a named color. Names are lowercase.
pub fn by_name(name: &str) -> Option<Color> {
	ALL.iter().copied().find(|c| c.name == name)
}
