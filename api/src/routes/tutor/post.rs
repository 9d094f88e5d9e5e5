use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::services::gemini::parse_question_lines;
use crate::{response::ApiResponse, state::AppState};

use super::common::{
    ChatRequest, ChatResponse, GenerateTestRequest, TestResponse, offline_questions,
    offline_reply, retry_questions, retry_reply,
};

/// POST /api/tutor/chat
///
/// Sends the student's question to the selected generation model wrapped in the tutoring
/// prompt. The endpoint never reports an upstream outage to the student: with no model
/// selected, or when the call fails, it answers with canned encouragement instead.
///
/// ### Responses
/// - `200 OK` with `{ "reply": "..." }`
/// - `400 BAD_REQUEST` when `message` is empty
pub async fn chat_with_tutor(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse<ChatResponse>>) {
    if let Err(e) = body.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid request: {e}"))),
        );
    }

    let Some(tutor) = state.tutor() else {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(
                ChatResponse {
                    reply: offline_reply(),
                },
                "Tutor reply (offline fallback)",
            )),
        );
    };

    let prompt = format!(
        "You are a friendly AI tutor for students.\n\
         Explain clearly and briefly.\n\n\
         Student question:\n{}",
        body.message
    );

    match tutor.generate(&prompt).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ApiResponse::success(ChatResponse { reply }, "Tutor reply")),
        ),
        Err(e) => {
            tracing::warn!("tutor chat generation failed: {e}");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ChatResponse {
                        reply: retry_reply(),
                    },
                    "Tutor reply (retry fallback)",
                )),
            )
        }
    }
}

/// POST /api/tutor/generate-test
///
/// Generates a short practice test for a subject and difficulty. The generated text is
/// split into one question per line with bullets, numbering, and code fences stripped.
/// Like the chat endpoint it degrades to canned subject-templated questions on any
/// upstream failure.
///
/// ### Responses
/// - `200 OK` with `{ "questions": ["...", ...] }`
/// - `400 BAD_REQUEST` when `subject` is empty
pub async fn generate_full_test(
    State(state): State<AppState>,
    Json(body): Json<GenerateTestRequest>,
) -> (StatusCode, Json<ApiResponse<TestResponse>>) {
    if let Err(e) = body.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid request: {e}"))),
        );
    }

    let Some(tutor) = state.tutor() else {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(
                TestResponse {
                    questions: offline_questions(&body.subject),
                },
                "Test generated (offline fallback)",
            )),
        );
    };

    let prompt = format!(
        "Generate 5 {} level questions for subject {}.\nOnly list questions.",
        body.difficulty, body.subject
    );

    match tutor.generate(&prompt).await {
        Ok(text) => {
            let questions = parse_question_lines(&text);
            if questions.is_empty() {
                return (
                    StatusCode::OK,
                    Json(ApiResponse::success(
                        TestResponse {
                            questions: retry_questions(&body.subject),
                        },
                        "Test generated (retry fallback)",
                    )),
                );
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    TestResponse { questions },
                    "Test generated",
                )),
            )
        }
        Err(e) => {
            tracing::warn!("test generation failed: {e}");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    TestResponse {
                        questions: retry_questions(&body.subject),
                    },
                    "Test generated (retry fallback)",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::PerformanceModel;
    use std::path::Path;

    fn offline_state() -> AppState {
        AppState::new(PerformanceModel::init(Path::new("no/bundle.json")), None)
    }

    #[tokio::test]
    async fn chat_falls_back_when_no_model_is_selected() {
        let (status, Json(response)) = chat_with_tutor(
            State(offline_state()),
            Json(ChatRequest {
                message: "What is a derivative?".to_string(),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
        assert_eq!(response.data.reply, offline_reply());
    }

    #[tokio::test]
    async fn chat_rejects_an_empty_message() {
        let (status, Json(response)) = chat_with_tutor(
            State(offline_state()),
            Json(ChatRequest {
                message: String::new(),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_generation_falls_back_with_subject_templated_questions() {
        let (status, Json(response)) = generate_full_test(
            State(offline_state()),
            Json(GenerateTestRequest {
                subject: "algebra".to_string(),
                difficulty: "easy".to_string(),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
        assert_eq!(response.data.questions, offline_questions("algebra"));
    }

    #[tokio::test]
    async fn test_generation_rejects_an_empty_subject() {
        let (status, _) = generate_full_test(
            State(offline_state()),
            Json(GenerateTestRequest {
                subject: String::new(),
                difficulty: "easy".to_string(),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
