use quizkit_types::{
    AnswerSink, AnswerValue, CompositeAnswer, HostProps, Question, ReadingComprehensionQuestion,
    SubmitPolicy,
};

use crate::capture::WriteOnce;
use crate::{Capture, Handler, Interaction, Outcome, dispatch};

/// A passage followed by sub-questions, answered one at a time.
///
/// Each sub-question gets its own handler from [`dispatch`]. Its answer is
/// stored as a string and the cursor moves on; there is no way back. After
/// the last sub-question the stored answers are folded into one
/// [`CompositeAnswer`] string and submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingComprehensionHandler {
    passage: String,
    sub_questions: Vec<Question>,
    index: usize,
    current: Option<Box<Handler>>,
    answers: CompositeAnswer,
    gate: WriteOnce,
}

impl ReadingComprehensionHandler {
    pub fn new(question: &ReadingComprehensionQuestion) -> Self {
        for sub in question.unsupported_sub_questions() {
            tracing::warn!(
                id = sub.id(),
                tag = sub.tag(),
                "sub-question type is not meant for reading comprehension"
            );
        }
        let mut handler = Self {
            passage: question.passage.clone(),
            sub_questions: question.sub_questions.clone(),
            index: 0,
            current: None,
            answers: CompositeAnswer::new(),
            gate: WriteOnce::default(),
        };
        handler.current = handler.present(0);
        handler
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn sub_questions(&self) -> &[Question] {
        &self.sub_questions
    }

    /// Zero-based index of the sub-question being answered.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref().and_then(|_| self.sub_questions.get(self.index))
    }

    /// The handler of the sub-question being answered.
    pub fn current_handler(&self) -> Option<&Handler> {
        self.current.as_deref()
    }

    /// Answers stored so far, in sub-question order.
    pub fn answers(&self) -> &CompositeAnswer {
        &self.answers
    }

    fn present(&self, index: usize) -> Option<Box<Handler>> {
        let question = self.sub_questions.get(index)?;
        Some(Box::new(dispatch(question, &HostProps::new())))
    }

    fn advance(&mut self, answer: AnswerValue, sink: &mut dyn AnswerSink) -> Outcome {
        tracing::debug!(
            label = %CompositeAnswer::label(self.index),
            kind = answer.type_name(),
            "sub-question answered"
        );
        self.answers.push(answer.coerce_to_string());
        self.index += 1;
        self.current = self.present(self.index);
        if self.current.is_some() {
            return Outcome::Changed;
        }
        self.gate.submit(AnswerValue::Text(self.answers.fold()), sink)
    }
}

impl Capture for ReadingComprehensionHandler {
    fn is_ready(&self) -> bool {
        self.index >= self.sub_questions.len()
    }

    fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy::Implicit
    }

    fn is_answered(&self) -> bool {
        self.gate.is_answered()
    }

    fn handle(
        &mut self,
        interaction: &Interaction,
        props: &HostProps,
        sink: &mut dyn AnswerSink,
    ) -> Outcome {
        if !self.gate.accepts_input(props) {
            return Outcome::Inert;
        }
        let Some(current) = self.current.as_mut() else {
            // Only reachable without sub-questions.
            return match interaction {
                Interaction::Submit if self.is_ready() => {
                    self.gate.submit(AnswerValue::Text(self.answers.fold()), sink)
                }
                _ => Outcome::Unsupported,
            };
        };

        let mut captured = None;
        let outcome = current.handle(interaction, &HostProps::new(), &mut |value: AnswerValue| {
            captured = Some(value);
        });
        match captured {
            Some(answer) => self.advance(answer, sink),
            None => outcome,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(text) = answer.as_text() else {
            return false;
        };
        self.answers = CompositeAnswer::parse(text);
        self.index = self.answers.len().min(self.sub_questions.len());
        self.current = None;
        self.gate.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use quizkit_types::{
        MatchingQuestion, MultipleChoiceQuestion, OrderingQuestion, TrueFalseQuestion,
    };

    use super::*;

    fn question() -> ReadingComprehensionQuestion {
        ReadingComprehensionQuestion::new(
            "Paris is the capital of France.",
            vec![
                Question::new(
                    "q1",
                    "What is the capital?",
                    MultipleChoiceQuestion::new(["Paris", "Rome"]),
                ),
                Question::new(
                    "q2",
                    "France is in Europe.",
                    TrueFalseQuestion {
                        correct_value: true,
                    },
                ),
            ],
        )
    }

    #[test]
    fn sub_answers_are_folded() {
        let mut handler = ReadingComprehensionHandler::new(&question());
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        assert_eq!(
            handler.handle(&Interaction::choose("Paris"), &HostProps::new(), &mut sink),
            Outcome::Changed
        );
        assert_eq!(handler.current_index(), 1);
        assert_eq!(handler.current_question().map(Question::id), Some("q2"));

        assert_eq!(
            handler.handle(&Interaction::judge(true), &HostProps::new(), &mut sink),
            Outcome::Submitted
        );
        assert_eq!(received, vec![AnswerValue::from("a) Paris\nb) true")]);
        assert!(handler.current_handler().is_none());
    }

    #[test]
    fn sub_outcomes_pass_through() {
        let mut handler = ReadingComprehensionHandler::new(&question());
        let mut sink = |_: AnswerValue| {};
        assert_eq!(
            handler.handle(&Interaction::choose("Berlin"), &HostProps::new(), &mut sink),
            Outcome::Inert
        );
        assert_eq!(
            handler.handle(&Interaction::MoveUp(1), &HostProps::new(), &mut sink),
            Outcome::Unsupported
        );
        assert_eq!(handler.current_index(), 0);
    }

    #[test]
    fn structured_sub_answers_are_coerced() {
        let mut handler = ReadingComprehensionHandler::new(&ReadingComprehensionQuestion::new(
            "",
            vec![Question::new(
                "order",
                "Put them in order",
                OrderingQuestion::new(["b", "a"], ["a", "b"]),
            )],
        ));
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);
        handler.handle(&Interaction::MoveUp(1), &HostProps::new(), &mut sink);
        handler.handle(&Interaction::Submit, &HostProps::new(), &mut sink);
        assert_eq!(received, vec![AnswerValue::from("a) a,b")]);
    }

    #[test]
    fn no_sub_questions_submits_empty_composite() {
        let mut handler =
            ReadingComprehensionHandler::new(&ReadingComprehensionQuestion::new("Text", vec![]));
        let mut received = Vec::new();
        assert!(handler.is_ready());
        handler.handle(
            &Interaction::Submit,
            &HostProps::new(),
            &mut |v: AnswerValue| received.push(v),
        );
        assert_eq!(received, vec![AnswerValue::from("")]);
    }

    #[test]
    fn malformed_sub_question_stalls_the_passage() {
        let mut handler = ReadingComprehensionHandler::new(&ReadingComprehensionQuestion::new(
            "Dogs bark.",
            vec![
                Question::new("r1", "Dogs bark.", TrueFalseQuestion { correct_value: true }),
                Question::new("r2", "Match", MatchingQuestion::default()),
            ],
        ));
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        assert_eq!(
            handler.handle(&Interaction::judge(true), &HostProps::new(), &mut sink),
            Outcome::Changed
        );
        assert!(matches!(handler.current_handler(), Some(Handler::Malformed(_))));
        for interaction in [
            Interaction::TapLeft("1".into()),
            Interaction::TapRight("A".into()),
            Interaction::Submit,
        ] {
            assert_eq!(
                handler.handle(&interaction, &HostProps::new(), &mut sink),
                Outcome::Inert
            );
        }
        assert_eq!(handler.current_index(), 1);
        assert!(!handler.is_ready());
        assert!(received.is_empty());
        assert_eq!(handler.answers().parts(), ["true"]);
    }

    #[test]
    fn restore_parses_composite() {
        let mut handler = ReadingComprehensionHandler::new(&question());
        assert!(handler.restore(&AnswerValue::from("a) Paris\nb) false")));
        assert_eq!(handler.answers().parts(), ["Paris", "false"]);
        assert!(handler.is_answered());
        assert!(handler.current_handler().is_none());
    }
}
