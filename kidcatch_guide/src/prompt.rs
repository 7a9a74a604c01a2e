// Prompt construction for the live enricher.
//
// The preamble lists every predefined object, catcher and color effect from
// the lexicon, so the model talks about the same glyphs and effects the game
// will actually show. Step prompts append either the child's latest answer
// (with the lexicon's reading of it) or the opening instructions.

use std::fmt::Write as _;

use kidcatch_mapping::{CreationStep, Lexicon};

pub fn preamble(lexicon: &Lexicon) -> String {
    let mut out = String::from(
        "你是一個親子遊戲創作助手，專門幫助家長引導孩子創作「接東西」遊戲。\n\n\
         重要原則：\n\
         1. 你只需要理解孩子的想法，不需要了解遊戲技術細節\n\
         2. 專注於描述遊戲效果會多麼有趣\n\
         3. 用溫暖、充滿想像力的語言回應\n\
         4. 每個選擇都會產生獨特的視覺效果\n\
         5. 回應要簡潔，大約50-100字\n\n\
         可選擇的物品（每個都有特殊效果）：\n",
    );
    for o in lexicon.objects() {
        let _ = writeln!(
            out,
            "- {}{}：{}，{}",
            o.key, o.entry.visual, o.entry.behavior, o.entry.special_effect
        );
    }
    out.push_str("\n可選擇的接取工具：\n");
    for c in lexicon.catchers() {
        let _ = writeln!(out, "- {}{}：{}", c.key, c.entry.visual, c.entry.special_ability);
    }
    out.push_str("\n特殊顏色效果：\n");
    for c in lexicon.colors() {
        let _ = writeln!(out, "- {}：{}", c.key, c.effect.effect);
    }
    out.push_str("\n請用繁體中文回應，語氣要溫暖有趣。\n");
    out
}

/// Guidance prompt for one step. With an answer, asks for praise, an effect
/// description and a next-step hint; without, asks for the opening.
pub fn guidance_prompt(lexicon: &Lexicon, child_answer: Option<&str>) -> String {
    let mut prompt = preamble(lexicon);
    prompt.push('\n');
    match child_answer {
        Some(answer) => {
            let reading = lexicon.interpret_child_input(answer);
            let reading_json = serde_json::to_string_pretty(&reading).unwrap_or_default();
            let _ = write!(
                prompt,
                "孩子剛才說：\"{answer}\"\n\n\
                 我的理解：{reading_json}\n\n\
                 請給出一段溫暖的回應（50-100字），包含：\n\
                 1. 對孩子選擇的讚美\n\
                 2. 生動描述這會產生什麼遊戲效果\n\
                 3. 對家長的下一步建議\n\n\
                 請直接回應，不要使用JSON格式。\n"
            );
        }
        None => prompt.push_str(
            "這是創作的第一步：選擇要接的物品。\n\n\
             請給家長一段溫暖的引導（50-100字），包含：\n\
             1. 鼓勵的開場\n\
             2. 解釋這個步驟的重要性\n\
             3. 如何引導孩子表達想法\n\n\
             請直接回應，不要使用JSON格式。\n",
        ),
    }
    prompt
}

pub fn share_prompt(game_title: &str, steps: &[CreationStep]) -> String {
    let process = steps
        .iter()
        .map(|s| format!("{} - {}", s.question, s.answer))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "根據以下親子創作過程，生成一段溫馨的分享文案（50-80字）：\n\
         遊戲名稱：{game_title}\n\
         創作過程：{process}\n\n\
         要求：\n\
         1. 突出孩子的可愛創意\n\
         2. 表達創作的樂趣\n\
         3. 邀請其他人也來嘗試\n\
         4. 加入2-3個相關表情符號\n\
         5. 用繁體中文\n\n\
         請直接回應文案，不要額外說明。\n"
    )
}
