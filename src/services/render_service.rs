use crate::models::question::{McqItem, TrueFalseItem, OPTION_LABELS};
use crate::models::session::QuizSession;
use serde::{Deserialize, Serialize};

pub const NO_RAW_OUTPUT: &str = "No raw output provided";

/// Numbered text cards for the current session, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedQuiz {
    pub mcq_cards: Vec<String>,
    pub true_false_cards: Vec<String>,
    pub raw_card: Option<String>,
}

impl RenderedQuiz {
    pub fn to_text(&self) -> String {
        self.raw_card
            .iter()
            .chain(self.mcq_cards.iter())
            .chain(self.true_false_cards.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub struct RenderService;

impl RenderService {
    pub fn render(session: &QuizSession) -> RenderedQuiz {
        let structured = session.structured();

        if structured.is_empty() {
            // A fresh session has nothing to show yet.
            if session.updated_at().is_none() && session.raw().is_empty() {
                return RenderedQuiz::default();
            }
            let raw = if session.raw().is_empty() {
                NO_RAW_OUTPUT.to_string()
            } else {
                session.raw().to_string()
            };
            return RenderedQuiz {
                raw_card: Some(raw),
                ..RenderedQuiz::default()
            };
        }

        RenderedQuiz {
            mcq_cards: structured
                .mcqs
                .iter()
                .enumerate()
                .map(|(idx, q)| Self::mcq_card(idx + 1, q))
                .collect(),
            true_false_cards: structured
                .true_false
                .iter()
                .enumerate()
                .map(|(idx, q)| Self::true_false_card(idx + 1, q))
                .collect(),
            raw_card: None,
        }
    }

    fn mcq_card(number: usize, q: &McqItem) -> String {
        let mut card = format!("Q{}: {}", number, q.question);
        for (label, option) in OPTION_LABELS.iter().zip(q.options.iter()) {
            card.push_str(&format!("\n{}. {}", label, option));
        }
        card.push_str(&format!("\nAnswer: {}", q.answer));
        card
    }

    fn true_false_card(number: usize, q: &TrueFalseItem) -> String {
        format!("T{}: {}\nAnswer: {}", number, q.question, q.answer)
    }
}
