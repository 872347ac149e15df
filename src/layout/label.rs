use super::LabelPlan;

/// Greedy wrap limit, in characters. A word joins the current line while
/// `line.len() + word.len()` stays below this; the joining space is not
/// counted. Charts rendered elsewhere with the same rule line-break
/// identically, so the boundary must not drift.
const WRAP_LIMIT: usize = 15;

/// Plans a leaf label for a `box_width` x `box_height` tile: greedy word
/// wrapping plus one shared font size.
///
/// The font size is a character-count heuristic, deliberately not a
/// measured-text fit:
/// `min(box_width / (longest_line * 0.5), box_height / (lines * 2))`.
/// A single word at or over the wrap limit is never split and may
/// overflow the tile.
pub fn place_label(text: &str, box_width: f32, box_height: f32) -> LabelPlan {
    let lines = wrap_words(text);

    let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    // Empty labels divide by zero here; the min() against the height term
    // keeps the result finite, same as the upstream chart.
    let font_size = (box_width / (longest as f32 * 0.5))
        .min(box_height / (lines.len() as f32 * 2.0));

    LabelPlan { lines, font_size }
}

fn wrap_words(text: &str) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        if current.chars().count() + word.chars().count() < WRAP_LIMIT {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    lines.push(current);
    lines
}

/// Vertical center of line `index` measured from the top of the box.
/// Lines are centered as a block around `box_height / 2`.
pub fn line_offset(plan: &LabelPlan, index: usize, box_height: f32) -> f32 {
    let count = plan.lines.len() as f32;
    box_height / 2.0 + (index as f32 - (count - 1.0) / 2.0) * plan.font_size
}
