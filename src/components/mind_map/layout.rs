//! Label layout: greedy word wrap and vertical centring.

pub const LABEL_MAX_WIDTH: f64 = 90.0;
pub const LINE_HEIGHT: f64 = 16.0;

/// Breaks `text` on single spaces, starting a new line whenever adding the
/// next word would push the measured width past `max_width`. A word wider
/// than `max_width` still gets a line of its own.
pub fn wrap_label(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();

	for word in text.split(' ') {
		let candidate = if current.is_empty() {
			word.to_string()
		} else {
			format!("{current} {word}")
		};
		if measure(&candidate) > max_width && !current.is_empty() {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		} else {
			current = candidate;
		}
	}
	lines.push(current);
	lines
}

/// Baseline y of each of `count` lines centred on `center_y`.
pub fn line_positions(center_y: f64, count: usize, line_height: f64) -> impl Iterator<Item = f64> {
	let start = center_y - (count as f64 * line_height) / 2.0 + line_height / 2.0;
	(0..count).map(move |i| start + i as f64 * line_height)
}
