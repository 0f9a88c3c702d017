//! Small questions built in code, one per stateful variant.

use quizkit_types::{
    CategorizationQuestion, Category, FillBlanksMultiQuestion, MatchItem, MatchPair,
    MatchingQuestion, MultipleChoiceQuestion, OrderingQuestion, Question,
    ReadingComprehensionQuestion, TrueFalseQuestion,
};

/// Two animals, two sounds.
pub fn animal_sounds() -> Question {
    Question::new(
        "animal-sounds",
        "Match each animal to its sound",
        MatchingQuestion::new(
            vec![MatchItem::new("1", "Dog"), MatchItem::new("2", "Cat")],
            vec![MatchItem::new("A", "Bark"), MatchItem::new("B", "Meow")],
            vec![MatchPair::new("1", "A"), MatchPair::new("2", "B")],
        ),
    )
}

/// Three letters, one swap away from sorted.
pub fn letter_order() -> Question {
    Question::new(
        "letter-order",
        "Put the letters in alphabetical order",
        OrderingQuestion::new(["b", "a", "c"], ["a", "b", "c"]),
    )
}

pub fn fox_and_fence() -> Question {
    Question::new(
        "fox-and-fence",
        "Fill in the blanks",
        FillBlanksMultiQuestion::new("The ___x___ jumped over the ___y___.", ["x", "y"])
            .with_options(["fox", "fence"]),
    )
}

pub fn fruit_and_veg() -> Question {
    Question::new(
        "fruit-and-veg",
        "Sort the produce",
        CategorizationQuestion::new(
            ["Apple", "Carrot"],
            vec![
                Category::new("Fruit", ["Apple"]),
                Category::new("Vegetable", ["Carrot"]),
            ],
        ),
    )
}

/// A passage with a choice and a true/false sub-question.
pub fn paris_passage() -> Question {
    Question::new(
        "paris-passage",
        "Read the passage and answer the questions",
        ReadingComprehensionQuestion::new(
            "Paris is the capital of France.",
            vec![
                Question::new(
                    "paris-capital",
                    "Which city is the capital of France?",
                    MultipleChoiceQuestion::new(["Paris", "Lyon", "Nice"]),
                ),
                Question::new(
                    "paris-france",
                    "Paris is in France.",
                    TrueFalseQuestion {
                        correct_value: true,
                    },
                ),
            ],
        ),
    )
}

#[cfg(test)]
mod tests {
    use quizkit_types::QuestionType;

    use super::*;

    #[test]
    fn scenarios_survive_the_wire() {
        for question in [
            animal_sounds(),
            letter_order(),
            fox_and_fence(),
            fruit_and_veg(),
            paris_passage(),
        ] {
            let json = question.to_json().unwrap();
            assert_eq!(Question::from_json(&json).unwrap(), question);
        }
    }

    #[test]
    fn lessons_parse() {
        let basics = crate::english_basics().unwrap();
        assert_eq!(basics.len(), 12);
        let mut seen: Vec<QuestionType> = basics
            .questions()
            .iter()
            .filter_map(Question::question_type)
            .collect();
        seen.sort_by_key(|t| t.as_str());
        seen.dedup();
        assert_eq!(seen.len(), QuestionType::ALL.len());

        let edge = crate::edge_cases().unwrap();
        assert_eq!(edge.title.as_deref(), Some("Edge cases"));
        assert_eq!(edge.len(), 4);
        assert_eq!(edge.get("voice-note").map(Question::tag), Some("audio_response"));
        assert_eq!(
            edge.get("choice-without-options").map(Question::tag),
            Some("multiple_choice")
        );
    }
}
