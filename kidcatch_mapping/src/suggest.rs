// Related-choice suggestions shown to the parent after an object is picked.
//
// Exact match on the choice, no resolver involved.

const SKY: &[&str] = &["月亮", "雲朵", "彩虹"];
const FEELINGS: &[&str] = &["擁抱", "笑臉", "親親"];
const FRUIT: &[&str] = &["蘋果", "香蕉", "西瓜"];
const MORE_FRUIT: &[&str] = &["草莓", "葡萄", "橘子"];

/// Choices that pair well with `current_choice`. Empty when nothing fits.
pub fn suggest_related_choices(current_choice: &str) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    if current_choice == "星星" {
        suggestions.extend_from_slice(SKY);
    }
    if current_choice == "愛心" {
        suggestions.extend_from_slice(FEELINGS);
    }
    if FRUIT.contains(&current_choice) {
        suggestions.extend_from_slice(MORE_FRUIT);
    }
    suggestions
}
