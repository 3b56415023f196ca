use serde::{Deserialize, Serialize};

/// Instruction appended to every question so the model replies in prose
pub const RESPONSE_FORMAT: &str = "Return a sentence describing the response data\n";

/// A user question posted to the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
}

impl Question {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    /// Render the user message sent to the model
    pub fn to_prompt(&self) -> String {
        format!("{}\n{}", self.question, RESPONSE_FORMAT)
    }
}

/// The model's natural-language answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
}

impl Answer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}
