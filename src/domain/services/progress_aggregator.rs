//! Progress aggregation - folds game results into a profile
//!
//! Only sums and set unions are used, so merging is commutative and
//! associative and a stale whole-profile resend is harmless.

use crate::domain::entities::{GameResult, Module, ProgressProfile, Scenario};
use crate::domain::value_objects::LanguageCode;

pub const MODULE_COMPLETION_BONUS: i64 = 50;
pub const LEARNED_SCENARIO_POINTS: i64 = 10;

/// Merge one result into a profile.
///
/// Points are summed without clamping. Badge, completed module and learned
/// concepts are set unions; re-adding an existing entry is a no-op.
pub fn merge(profile: &ProgressProfile, result: &GameResult) -> ProgressProfile {
    let mut merged = profile.clone();
    merged.points += result.points;
    if let Some(badge) = result.badge.as_ref().filter(|b| !b.is_empty()) {
        merged.badges.insert(badge.clone());
    }
    if let Some(module_id) = &result.completed_module {
        merged.completed_modules.insert(module_id.clone());
    }
    merged.learned_concepts.extend(
        result
            .learned_concepts
            .iter()
            .filter(|concept| !concept.is_empty())
            .cloned(),
    );
    merged
}

/// Result for answering a learning scenario correctly: points plus the
/// scenario's concept in `language`.
pub fn learned_scenario(scenario: &Scenario, language: &LanguageCode) -> GameResult {
    let concept = scenario.translations.resolve(language).concept.clone();
    GameResult::points(LEARNED_SCENARIO_POINTS).with_learned_concept(concept)
}

/// Result for finishing every scenario of a module.
///
/// Returns `None` when the profile already lists the module as completed,
/// in any language, or already holds its badge. A module pays out once.
pub fn module_completion(
    profile: &ProgressProfile,
    module: &Module,
    language: &LanguageCode,
) -> Option<GameResult> {
    if profile.has_completed(&module.id) {
        return None;
    }
    let badge = module.translations.resolve(language).badge_name.clone();
    if !badge.is_empty() && profile.has_badge(&badge) {
        return None;
    }
    let result = GameResult::points(MODULE_COMPLETION_BONUS).with_completed_module(module.id.clone());
    Some(if badge.is_empty() {
        result
    } else {
        result.with_badge(badge)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScenarioTranslation;

    #[test]
    fn test_merge_sums_points_and_unions_badges() {
        let profile = ProgressProfile {
            points: 20,
            ..Default::default()
        };

        let merged = merge(&profile, &GameResult::points(60).with_badge("Constitutional Champion"));
        let merged = merge(&merged, &GameResult::points(-5).with_badge("Constitutional Champion"));

        assert_eq!(merged.points, 75);
        assert_eq!(merged.badges.len(), 1);
        assert!(merged.has_badge("Constitutional Champion"));
    }

    #[test]
    fn test_merge_does_not_clamp_points() {
        let merged = merge(&ProgressProfile::default(), &GameResult::points(-7));
        assert_eq!(merged.points, -7);
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let a = GameResult::points(10).with_learned_concept("Art. 12");
        let b = GameResult::points(50)
            .with_badge("Equality Advocate")
            .with_completed_module("equality".into());
        let start = ProgressProfile::default();

        assert_eq!(merge(&merge(&start, &a), &b), merge(&merge(&start, &b), &a));
    }

    #[test]
    fn test_module_completion_pays_once() {
        let module = crate::domain::entities::Module::new("equality").with_translation(
            "en",
            "Right to Equality",
            "Articles 14-18",
            "Equality Advocate",
        );
        let profile = ProgressProfile::default();

        let result = module_completion(&profile, &module, &"hi".into()).unwrap();
        assert_eq!(result.points, MODULE_COMPLETION_BONUS);
        assert_eq!(result.badge.as_deref(), Some("Equality Advocate"));

        let profile = merge(&profile, &result);
        assert!(profile.has_completed(&"equality".into()));
        assert_eq!(module_completion(&profile, &module, &"en".into()), None);
    }

    #[test]
    fn test_module_completion_ignores_language_switch() {
        let module = crate::domain::entities::Module::new("equality")
            .with_translation("en", "Right to Equality", "Articles 14-18", "Equality Advocate")
            .with_translation("hi", "समानता का अधिकार", "अनुच्छेद 14-18", "समानता समर्थक");

        let first = module_completion(&ProgressProfile::default(), &module, &"hi".into()).unwrap();
        assert_eq!(first.badge.as_deref(), Some("समानता समर्थक"));

        let profile = merge(&ProgressProfile::default(), &first);
        assert_eq!(module_completion(&profile, &module, &"en".into()), None);
        assert_eq!(profile.points, MODULE_COMPLETION_BONUS);
        assert_eq!(profile.badges.len(), 1);
    }

    #[test]
    fn test_learned_scenario_records_concept() {
        let scenario = Scenario::new("s1", "general-definition", "b").with_translation(
            "en",
            ScenarioTranslation {
                concept: "Who is the State? (Art. 12)".to_string(),
                ..Default::default()
            },
        );

        let result = learned_scenario(&scenario, &"en".into());
        let profile = merge(&ProgressProfile::default(), &result);
        assert_eq!(profile.points, 10);
        assert!(profile.learned_concepts.contains("Who is the State? (Art. 12)"));
    }
}
