use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}

#[derive(Serialize, Default)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Deserialize, Validate)]
pub struct GenerateTestRequest {
    #[validate(length(min = 1, message = "subject must not be empty"))]
    pub subject: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Serialize, Default)]
pub struct TestResponse {
    pub questions: Vec<String>,
}

// The tutoring surface stays usable with no upstream: canned copy keeps the
// conversation moving instead of surfacing an outage to the student.

pub fn offline_reply() -> String {
    "I am here to help! Tell me what topic you are studying.".to_string()
}

pub fn retry_reply() -> String {
    "Let's continue learning! Ask your question again.".to_string()
}

pub fn offline_questions(subject: &str) -> Vec<String> {
    vec![
        format!("Explain basics of {subject}"),
        format!("Give an example problem from {subject}"),
    ]
}

pub fn retry_questions(subject: &str) -> Vec<String> {
    vec![
        format!("What is {subject}?"),
        format!("Explain core concepts of {subject}"),
    ]
}
