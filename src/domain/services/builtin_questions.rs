//! Built-in questions used when no catalog scenario fits a mini-game

use crate::domain::entities::{AnswerOption, Scenario, ScenarioTranslation};

pub const WRIT_FALLBACK_ID: &str = "writ_fallback";

fn options(texts: [&str; 4]) -> Vec<AnswerOption> {
    ["a", "b", "c", "d"]
        .into_iter()
        .zip(texts)
        .map(|(id, text)| AnswerOption::new(id, text))
        .collect()
}

fn asked(prompt: &str, texts: [&str; 4], explanation: &str) -> ScenarioTranslation {
    ScenarioTranslation {
        story: prompt.to_string(),
        explanation: explanation.to_string(),
        options: options(texts),
        ..Default::default()
    }
}

/// Wheel question for a category, if one is bundled
pub fn wheel_fallback(category: &str) -> Option<Scenario> {
    let scenario = match category {
        "equality" => Scenario::new("wheel_equality", "equality", "b")
            .with_translation(
                "en",
                asked(
                    "Which article guarantees equality before law?",
                    ["Article 12", "Article 14", "Article 19", "Article 21"],
                    "Article 14 guarantees equality before law and equal protection of laws.",
                ),
            )
            .with_translation(
                "hi",
                asked(
                    "कौन सा अनु. कानून के समक्ष समानता देता है?",
                    ["अनु.12", "अनु.14", "अनु.19", "अनु.21"],
                    "अनु.14 कानून के समक्ष समानता देता है।",
                ),
            ),
        "freedom" => Scenario::new("wheel_freedom", "freedom", "a")
            .with_translation(
                "en",
                asked(
                    "Which article protects freedom of speech?",
                    ["Article 19", "Article 20", "Article 21", "Article 14"],
                    "Article 19(1)(a) protects freedom of speech and expression.",
                ),
            )
            .with_translation(
                "hi",
                asked(
                    "कौन सा अनु. भाषण की स्वतंत्रता देता है?",
                    ["अनु.19", "अनु.20", "अनु.21", "अनु.14"],
                    "अनु.19(1)(a) भाषण की स्वतंत्रता देता है।",
                ),
            ),
        _ => return None,
    };
    Some(scenario.with_order(0))
}

/// Habeas corpus scenario for Writ Quest
pub fn writ_fallback() -> Scenario {
    let mut en = asked(
        "A citizen is illegally detained without lawful order. Which writ applies?",
        [
            "Habeas Corpus (unlawful detention)",
            "Mandamus (public duty enforcement)",
            "Quo Warranto (challenge right to office)",
            "Certiorari (quash illegal order)",
        ],
        "Habeas Corpus is the remedy for unlawful detention; Article 32 enables Supreme Court remedies.",
    );
    en.concept = "Writs".to_string();
    en.feedback_correct = en.explanation.clone();
    en.feedback_incorrect = "Incorrect. The correct writ is Habeas Corpus for unlawful detention.".to_string();

    let mut hi = asked(
        "एक नागरिक को बिना वैध आदेश अवैध रूप से हिरासत में रखा गया है। कौन सा राइट लागू होता है?",
        [
            "हैबियस कॉर्पस (अवैध हिरासत)",
            "मंडामस (सार्वजनिक कर्तव्य लागू कराना)",
            "क्वो वारंटो (पद की वैधता पर प्रश्न)",
            "सर्टिओरारी (अवैध आदेश रद्द करना)",
        ],
        "हैबियस कॉर्पस अवैध हिरासत हेतु है; अनु.32 सर्वोच्च न्यायालय उपचार देता है।",
    );
    hi.concept = "रिट".to_string();
    hi.feedback_correct = hi.explanation.clone();
    hi.feedback_incorrect = "गलत। सही राइट अवैध हिरासत के लिए हैबियस कॉर्पस है।".to_string();

    Scenario::new(WRIT_FALLBACK_ID, "constitutional-remedies", "a")
        .with_translation("en", en)
        .with_translation("hi", hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validate_scenario;

    #[test]
    fn test_builtin_questions_are_well_formed() {
        let mut all = vec![writ_fallback()];
        all.extend(["equality", "freedom"].iter().filter_map(|c| wheel_fallback(c)));

        assert_eq!(all.len(), 3);
        for scenario in &all {
            assert!(validate_scenario(scenario).is_empty(), "{}", scenario.id);
        }
    }

    #[test]
    fn test_unknown_category_has_no_fallback() {
        assert!(wheel_fallback("exploitation").is_none());
    }
}
