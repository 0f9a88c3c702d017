//! Property tests over random interaction sequences.

use std::collections::BTreeMap;

use proptest::prelude::*;
use quizkit::{
    AnswerValue, Capture, CategorizationQuestion, Category, CorrectionQuestion, FillBlankQuestion,
    FillBlanksMultiQuestion, Handler, HostProps, Interaction, MatchItem, MatchPair,
    MatchingQuestion, MultipleChoiceQuestion, OrderingQuestion, Question, QuestionKind,
    QuestionSession, ReadingComprehensionQuestion, TrueFalseQuestion, WritingShortQuestion,
    dispatch,
};

const WORDS: [&str; 6] = ["a", "b", "c", "fox", "fence", " "];

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(WORDS.to_vec()).prop_map(str::to_string)
}

fn interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        word().prop_map(Interaction::Choose),
        prop::collection::vec(word(), 0..3).prop_map(|w| Interaction::Edit(w.concat())),
        word().prop_map(Interaction::TapLeft),
        word().prop_map(Interaction::TapRight),
        (0usize..5).prop_map(Interaction::MoveUp),
        (0usize..5).prop_map(Interaction::MoveDown),
        word().prop_map(Interaction::TapItem),
        word().prop_map(Interaction::TapCategory),
        word().prop_map(Interaction::FocusBlank),
        word().prop_map(Interaction::TapBankWord),
        (word(), word()).prop_map(|(blank, text)| Interaction::EditBlank { blank, text }),
        word().prop_map(Interaction::ClearBlank),
        Just(Interaction::Submit),
    ]
}

fn interactions() -> impl Strategy<Value = Vec<Interaction>> {
    prop::collection::vec(interaction(), 0..40)
}

fn items(ids: &[&str]) -> Vec<MatchItem> {
    ids.iter().map(|id| MatchItem::new(*id, id.to_uppercase())).collect()
}

fn flat_questions() -> Vec<Question> {
    vec![
        Question::new("mc", "", MultipleChoiceQuestion::new(["a", "b", ""])),
        Question::new("tf", "", TrueFalseQuestion::default()),
        Question::new("fb-bank", "", FillBlankQuestion::new("x ___ y").with_options(["a", "fox"])),
        Question::new("fb-text", "", FillBlankQuestion::new("x ___ y")),
        Question::new("ws", "", WritingShortQuestion::default()),
        Question::new("fix", "", CorrectionQuestion::new("a b", "a c")),
    ]
}

fn matching() -> Question {
    Question::new(
        "match",
        "",
        MatchingQuestion::new(
            items(&["a", "b", "c"]),
            items(&["a", "b", "fox"]),
            vec![MatchPair::new("a", "fox")],
        ),
    )
}

fn categorization() -> Question {
    Question::new(
        "cat",
        "",
        CategorizationQuestion::new(
            ["a", "b", "a", "c"],
            vec![Category::new("fox", ["a"]), Category::new("fence", ["b", "c"])],
        ),
    )
}

fn word_bank() -> Question {
    Question::new(
        "multi",
        "",
        FillBlanksMultiQuestion::new("___a___ ___b___ ___c___", ["a", "b", "c"])
            .with_options(["fox", "fence", "fox"]),
    )
}

/// Play `script` and return every answer together with the readiness seen
/// right after the emitting step.
fn play(question: &Question, script: &[Interaction]) -> (QuestionSession, Vec<(AnswerValue, bool)>) {
    let mut session = QuestionSession::new(question.clone(), HostProps::new());
    let mut emitted = Vec::new();
    for interaction in script {
        let mut received = Vec::new();
        session.interact(interaction.clone(), &mut |v: AnswerValue| received.push(v));
        let ready = session.is_ready();
        emitted.extend(received.into_iter().map(|v| (v, ready)));
    }
    (session, emitted)
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

proptest! {
    #[test]
    fn flat_variants_never_answer_unready(script in interactions()) {
        for question in flat_questions() {
            let (_, emitted) = play(&question, &script);
            prop_assert!(emitted.len() <= 1);
            for (answer, ready) in emitted {
                prop_assert!(ready);
                let text = answer.as_text().unwrap();
                prop_assert!(!text.trim().is_empty());
                if question.id() == "fix" {
                    prop_assert_ne!(text, "a b");
                }
            }
        }
    }

    #[test]
    fn ordering_stays_a_permutation(script in interactions()) {
        let original = ["c", "a", "fox", "a", "b"];
        let question = Question::new("order", "", OrderingQuestion::new(original, original));
        let (session, emitted) = play(&question, &script);

        let expected = sorted(original.iter().map(|s| s.to_string()).collect());
        if let Handler::Ordering(handler) = session.handler() {
            prop_assert_eq!(sorted(handler.working_order().to_vec()), expected.clone());
        }
        for (answer, _) in emitted {
            let submitted = answer.as_sequence().unwrap().to_vec();
            prop_assert_eq!(submitted.len(), original.len());
            prop_assert_eq!(sorted(submitted), expected.clone());
        }
    }

    #[test]
    fn matching_answers_once_when_complete(script in interactions()) {
        let question = matching();
        let mut handler = dispatch(&question, &HostProps::new());
        let mut answers = Vec::new();
        for interaction in &script {
            handler.handle(interaction, &HostProps::new(), &mut |v: AnswerValue| answers.push(v));
            let Handler::Matching(matching) = &handler else {
                panic!("expected matching handler");
            };
            let mut rights: Vec<&String> = matching.pairs().values().collect();
            let total = rights.len();
            rights.sort();
            rights.dedup();
            prop_assert_eq!(rights.len(), total);
            prop_assert_eq!(answers.len() == 1, total == 3);
        }
        prop_assert!(answers.len() <= 1);
        if let Some(answer) = answers.first() {
            prop_assert_eq!(answer.as_map().unwrap().len(), 3);
        }
    }

    #[test]
    fn categorization_places_each_item_once(script in interactions()) {
        let question = categorization();
        let QuestionKind::Categorization(content) = question.kind() else {
            unreachable!();
        };
        let (session, emitted) = play(&question, &script);

        if let Handler::Categorization(handler) = session.handler() {
            let mut placed: Vec<String> = handler
                .buckets()
                .iter()
                .flat_map(|(_, items)| items.iter().cloned())
                .collect();
            placed.extend(handler.uncategorized().into_iter().map(str::to_string));
            prop_assert_eq!(sorted(placed), sorted(content.items.clone()));
        }
        for (answer, _) in emitted {
            let buckets = answer.as_buckets().unwrap();
            prop_assert_eq!(buckets.len(), 2);
            let flattened: Vec<String> = buckets.into_values().flatten().collect();
            prop_assert_eq!(sorted(flattened), sorted(content.items.clone()));
        }
    }

    #[test]
    fn bank_words_are_single_use(script in interactions()) {
        let question = word_bank();
        let mut session = QuestionSession::new(question, HostProps::new());
        for interaction in script {
            session.interact(interaction, &mut |_: AnswerValue| {});
            let Handler::FillBlanksMulti(handler) = session.handler() else {
                panic!("expected fill_blanks_multi handler");
            };
            let mut uses: BTreeMap<&str, usize> = BTreeMap::new();
            for blank in handler.blanks() {
                if let Some(word) = handler.answer(blank) {
                    *uses.entry(word).or_default() += 1;
                }
            }
            for (word, count) in uses {
                let copies = handler.options().iter().filter(|o| *o == word).count();
                prop_assert!(count <= copies, "{word} used {count} times");
            }
        }
    }

    #[test]
    fn composite_has_one_line_per_sub_question(
        kinds in prop::collection::vec(0u8..4, 0..8),
        answers in prop::collection::vec("[a-z]{1,6}", 8),
    ) {
        let subs: Vec<Question> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let id = format!("s{i}");
                match kind {
                    0 => Question::new(id, "", MultipleChoiceQuestion::new([answers[i].clone()])),
                    1 => Question::new(id, "", TrueFalseQuestion::default()),
                    2 => Question::new(id, "", WritingShortQuestion::default()),
                    _ => Question::new(id, "", FillBlankQuestion::new("___")),
                }
            })
            .collect();
        let mut script = Vec::new();
        for (i, kind) in kinds.iter().enumerate() {
            match kind {
                0 => script.push(Interaction::Choose(answers[i].clone())),
                1 => script.push(Interaction::judge(i % 2 == 0)),
                _ => {
                    script.push(Interaction::Edit(answers[i].clone()));
                    script.push(Interaction::Submit);
                }
            }
        }
        if kinds.is_empty() {
            script.push(Interaction::Submit);
        }

        let question = Question::new("reading", "", ReadingComprehensionQuestion::new("", subs));
        let (_, emitted) = play(&question, &script);
        prop_assert_eq!(emitted.len(), 1);
        let composite = emitted[0].0.as_text().unwrap().to_string();
        let lines: Vec<&str> = if composite.is_empty() {
            Vec::new()
        } else {
            composite.split('\n').collect()
        };
        prop_assert_eq!(lines.len(), kinds.len());
        for (i, line) in lines.iter().enumerate() {
            let label = char::from(b'a' + i as u8);
            let prefix = format!("{label}) ");
            prop_assert!(line.starts_with(&prefix));
        }
    }

    #[test]
    fn disabled_input_changes_nothing(script in interactions()) {
        let disabled = HostProps::new().disabled(true);
        let mut questions = flat_questions();
        questions.extend([matching(), categorization(), word_bank()]);
        questions.push(Question::new("order", "", OrderingQuestion::new(["a", "b"], ["b", "a"])));

        for question in questions {
            let mut handler = dispatch(&question, &HostProps::new());
            let before = handler.clone();
            let mut answers = Vec::new();
            for interaction in &script {
                handler.handle(interaction, &disabled, &mut |v: AnswerValue| answers.push(v));
            }
            prop_assert!(answers.is_empty());
            prop_assert_eq!(&handler, &before);
        }
    }
}
