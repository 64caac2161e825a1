use serde::{Deserialize, Serialize};

pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqItem {
    pub question: String,
    pub options: [String; 4],
    pub answer: String,
}

/// True/false answers are kept as free-form text; the generator is asked for
/// "True"/"False" but nothing checks that it complied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub mcqs: Vec<McqItem>,
    pub true_false: Vec<TrueFalseItem>,
}

impl QuizResult {
    pub fn is_empty(&self) -> bool {
        self.mcqs.is_empty() && self.true_false.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mcqs.len() + self.true_false.len()
    }
}
