// Effect-description paragraph shown to the parent as a game preview.
//
// Fixed template, three lines, plus an optional fourth:
//
//   寶貝選擇了用{catcher}來接{object}！
//   {behavior}，{special effect}。
//   {catcher}有特殊能力：{special ability}！
//   而且是{color}的，{color effect}！        <- only for an exact color key
//
// Object and catcher go through the full resolver chain (containment match,
// total). The color does not: it is an exact key lookup, so "金色的" or
// " 金色" add nothing.

use crate::{Lexicon, default_lexicon};

impl Lexicon {
    /// Compose the preview paragraph for an object/catcher/color triple.
    pub fn describe(&self, object_input: &str, catcher_input: &str, color: Option<&str>) -> String {
        let object = self.resolve_object(object_input);
        let catcher = self.resolve_catcher(catcher_input);

        let mut text = format!(
            "寶貝選擇了用{}來接{}！\n{}，{}。\n{}有特殊能力：{}！",
            catcher.visual,
            object.visual,
            object.behavior,
            object.special_effect,
            catcher.visual,
            catcher.special_ability,
        );

        if let Some((color, effect)) = color.and_then(|c| self.color_effect(c).map(|e| (c, e))) {
            text.push_str(&format!("\n而且是{}的，{}！", color, effect.effect));
        }

        text
    }
}

/// `Lexicon::describe` against the default lexicon.
pub fn describe(object_input: &str, catcher_input: &str, color: Option<&str>) -> String {
    default_lexicon().describe(object_input, catcher_input, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_lines_without_color() {
        let text = describe("蘋果", "籃子", None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "寶貝選擇了用🧺來接🍎！",
                "正常掉落，像真的蘋果一樣，接到時有咬一口的音效。",
                "🧺有特殊能力：穩穩地接住東西！",
            ]
        );
    }

    #[test]
    fn known_color_adds_fourth_line() {
        let text = describe("星星", "網子", Some("金色"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("\n而且是金色的，物品會發出金光！"));
    }

    #[test]
    fn unknown_color_is_omitted() {
        let text = describe("星星", "網子", Some("亂入色"));
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("而且是"));
    }

    #[test]
    fn color_match_is_exact_not_containment() {
        assert_eq!(describe("星星", "網子", Some("金色的")).lines().count(), 3);
        assert_eq!(describe("星星", "網子", Some("")).lines().count(), 3);
    }

    #[test]
    fn unknown_inputs_still_describe() {
        let text = describe("飛天豬", "超級吸塵器", None);
        assert!(text.starts_with("寶貝選擇了用🤲來接❓！"));
        assert!(text.contains("飛天豬"));
        assert!(text.contains("超級吸塵器"));
    }
}
