// Static guidance used whenever live enrichment is unavailable or fails.
//
// Suggested questions are keyed by the step that was just answered and ask
// about the *next* one (answering `object` yields catcher questions). Steps
// without their own row (`speed`, `complete`, unknown) get the start row.

use kidcatch_mapping::model::answer_for;
use kidcatch_mapping::{CreationStep, StepId};

/// Question recorded for an answer when no suggestion was on screen.
pub const DEFAULT_QUESTION: &str = "孩子的想法";

pub fn suggested_questions(step: StepId) -> &'static [&'static str] {
    match step {
        StepId::Object => &[
            "我們用什麼來接呢？",
            "要用籃子還是小手手接？",
            "想要用什麼特別的工具嗎？",
        ],
        StepId::Catcher => &[
            "你喜歡什麼顏色呢？",
            "要不要有彩虹的顏色？",
            "想要閃閃發光的嗎？",
        ],
        StepId::Color => &[
            "東西要掉得快快的還是慢慢的？",
            "要很多一起掉下來嗎？",
            "想要簡單一點還是有挑戰一點？",
        ],
        StepId::Start | StepId::Speed | StepId::Complete | StepId::Unknown => &[
            "寶貝想接什麼水果呢？",
            "想要接可愛的小動物嗎？",
            "要不要接天上掉下來的星星？",
        ],
    }
}

/// Template guidance for a step, echoing the child's answer when there is one.
pub fn guidance(step: StepId, child_answer: Option<&str>) -> String {
    match (step, child_answer) {
        (StepId::Object, Some(a)) => {
            format!("哇！孩子選擇了「{a}」，真是很棒的想法！現在讓我們選擇用什麼工具來接這些寶貝吧！")
        }
        (StepId::Object, None) => "很棒的選擇！現在問問孩子想用什麼來接住這些東西呢？".into(),
        (StepId::Catcher, Some(a)) => {
            format!("太有創意了！用「{a}」來接東西一定很有趣！現在讓孩子選擇喜歡的顏色，讓遊戲更加繽紛！")
        }
        (StepId::Catcher, None) => "太有創意了！讓孩子選擇喜歡的顏色吧！".into(),
        (StepId::Color, Some(a)) => {
            format!("「{a}」的顏色會讓遊戲變得很特別！最後，問問孩子想要什麼樣的遊戲速度呢？")
        }
        (StepId::Color, None) => "最後，問問孩子想要遊戲的速度如何？".into(),
        (StepId::Speed, Some(a)) => {
            format!("「{a}」的速度剛剛好！遊戲已經準備好了，和孩子一起來玩吧！")
        }
        (StepId::Speed, None) => "遊戲快要完成了，和孩子一起來玩吧！".into(),
        (StepId::Start | StepId::Complete | StepId::Unknown, _) => {
            "讓我們一起創作一個有趣的接東西遊戲吧！首先，問問孩子想接什麼東西呢？每個選擇都會創造出不同的遊戲效果喔！".into()
        }
    }
}

/// Share text built from the answers alone.
pub fn share_text(game_title: &str, steps: &[CreationStep]) -> String {
    let answer = |id| answer_for(steps, id).filter(|a| !a.trim().is_empty());
    let object = answer(StepId::Object).unwrap_or("東西");
    let catcher = answer(StepId::Catcher).unwrap_or("工具");
    format!(
        "我家寶貝創作了「{game_title}」！用{catcher}接{object}的遊戲，充滿了孩子的創意和想像力！快來一起玩吧！🎮✨"
    )
}
