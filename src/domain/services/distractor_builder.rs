//! Multiple-choice assembly from a scenario's correct option plus foreign distractors

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::{AnswerOption, Scenario};
use crate::domain::value_objects::LanguageCode;

pub const DEFAULT_MAX_CHOICES: usize = 4;
const MAX_DISTRACTORS: usize = 3;

/// Build a shuffled choice list containing the correct option exactly once.
///
/// Distractors are drawn from the options of every other scenario in `pool`.
/// Candidates sharing an id or text with the correct option or with an
/// already chosen distractor are skipped, so every returned id and text is
/// distinct. The distractor count is capped at `max - 1`, so truncation never
/// drops the correct option.
///
/// If the scenario's resolved options do not contain its correct answer the
/// options are returned unchanged; no correct option is fabricated.
pub fn build_choices<R: Rng>(
    scenario: &Scenario,
    language: &LanguageCode,
    pool: &[Scenario],
    max: usize,
    rng: &mut R,
) -> Vec<AnswerOption> {
    let own_options = scenario.options_for(language);
    let Some(correct) = own_options
        .iter()
        .find(|option| scenario.is_correct(&option.id))
        .cloned()
    else {
        tracing::warn!(
            scenario_id = %scenario.id,
            language = %language,
            "Correct answer not among options, showing options as authored"
        );
        return own_options;
    };

    let max = max.max(1);
    let mut candidates: Vec<AnswerOption> = pool
        .iter()
        .filter(|other| other.id != scenario.id)
        .flat_map(|other| other.options_for(language))
        .collect();
    candidates.shuffle(rng);

    let limit = MAX_DISTRACTORS.min(max - 1);
    let mut choices = Vec::with_capacity(limit + 1);
    choices.push(correct);
    for candidate in candidates {
        if choices.len() > limit {
            break;
        }
        let clashes = choices
            .iter()
            .any(|chosen| chosen.id == candidate.id || chosen.text == candidate.text);
        if !clashes {
            choices.push(candidate);
        }
    }
    choices.shuffle(rng);
    choices.truncate(max);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScenarioTranslation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario(id: &str, correct: &str, options: &[(&str, &str)]) -> Scenario {
        Scenario::new(id, "equality", correct).with_translation(
            "en",
            ScenarioTranslation {
                concept: format!("Concept {}", id),
                options: options
                    .iter()
                    .map(|(id, text)| AnswerOption::new(*id, *text))
                    .collect(),
                ..Default::default()
            },
        )
    }

    fn pool() -> Vec<Scenario> {
        vec![
            scenario("s1", "b", &[("a", "Private bodies only"), ("b", "Article 12 State"), ("c", "Presidential approval")]),
            scenario("s2", "a", &[("a", "Article 14"), ("b", "Article 19"), ("c", "Article 21")]),
            scenario("s3", "c", &[("a", "Habeas Corpus"), ("b", "Mandamus"), ("c", "Certiorari"), ("d", "Quo Warranto")]),
            scenario("s4", "a", &[("a", "Article 17"), ("b", "Article 18")]),
        ]
    }

    #[test]
    fn test_correct_option_present_exactly_once() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            for scenario in &pool {
                let choices = build_choices(scenario, &"en".into(), &pool, DEFAULT_MAX_CHOICES, &mut rng);
                let correct_count = choices
                    .iter()
                    .filter(|c| c.id == scenario.correct_answer)
                    .count();
                assert_eq!(correct_count, 1);
                assert!(!choices.is_empty() && choices.len() <= DEFAULT_MAX_CHOICES);
            }
        }
    }

    #[test]
    fn test_small_max_keeps_correct_option() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(11);
        let target = &pool[0];

        for max in [0, 1, 2] {
            let choices = build_choices(target, &"en".into(), &pool, max, &mut rng);
            assert!(choices.iter().any(|c| c.id == target.correct_answer));
            assert!(choices.len() <= max.max(1));
        }
    }

    #[test]
    fn test_lone_scenario_yields_only_correct_option() {
        let pool = vec![scenario("s1", "b", &[("a", "x"), ("b", "y")])];
        let mut rng = StdRng::seed_from_u64(1);

        let choices = build_choices(&pool[0], &"en".into(), &pool, DEFAULT_MAX_CHOICES, &mut rng);
        assert_eq!(choices, vec![AnswerOption::new("b", "y")]);
    }

    #[test]
    fn test_missing_correct_option_returns_options_unchanged() {
        let broken = scenario("broken", "d", &[("a", "one"), ("b", "two")]);
        let mut rng = StdRng::seed_from_u64(3);

        let choices = build_choices(&broken, &"en".into(), &pool(), DEFAULT_MAX_CHOICES, &mut rng);
        assert_eq!(choices, broken.options_for(&"en".into()));
    }

    #[test]
    fn test_distractor_ids_and_texts_are_distinct() {
        let pool = vec![
            scenario("s1", "a", &[("a", "Article 14"), ("b", "Article 15")]),
            scenario("s2", "a", &[("a", "Article 19"), ("b", "Article 15")]),
            scenario("s3", "a", &[("a", "Article 21"), ("b", "Article 22")]),
        ];
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..100 {
            let choices = build_choices(&pool[0], &"en".into(), &pool, DEFAULT_MAX_CHOICES, &mut rng);
            let mut ids: Vec<&str> = choices.iter().map(|c| c.id.as_str()).collect();
            let mut texts: Vec<&str> = choices.iter().map(|c| c.text.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            texts.sort_unstable();
            texts.dedup();
            assert_eq!(ids.len(), choices.len());
            assert_eq!(texts.len(), choices.len());
            assert_eq!(choices.len(), 2);
        }
    }

    #[test]
    fn test_distractors_come_from_other_scenarios() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(5);
        let target = &pool[1];
        let own_texts: Vec<String> = target
            .options_for(&"en".into())
            .into_iter()
            .filter(|o| o.id != target.correct_answer)
            .map(|o| o.text)
            .collect();

        for _ in 0..50 {
            let choices = build_choices(target, &"en".into(), &pool, DEFAULT_MAX_CHOICES, &mut rng);
            assert_eq!(choices.len(), DEFAULT_MAX_CHOICES);
            assert!(choices.iter().all(|c| !own_texts.contains(&c.text)));
        }
    }
}
