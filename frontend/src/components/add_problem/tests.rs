use super::form_state::{ProblemDraft, TopicSelection};
use super::*;
use crate::error::AppError;
use crate::web::MockTransport;
use codetrackr_shared::protocol::HttpMethod;
use codetrackr_shared::{CompletedDate, Topic};
use serde_json::json;

const BASE: &str = "http://backend.test/api";

fn api() -> CodeTrackrApi<MockTransport> {
    CodeTrackrApi::with_transport(BASE, Some("t1".into()), MockTransport::new())
}

fn draft(topics: &[Topic]) -> ProblemDraft {
    let mut draft = ProblemDraft::new(CompletedDate::parse("2024-06-01").unwrap());
    draft.title = "Climbing Stairs".into();
    let mut selection = TopicSelection::new();
    for topic in topics {
        selection.insert(*topic);
    }
    draft.topics = selection;
    draft
}

#[tokio::test]
async fn zero_topics_never_reach_the_network() {
    let api = api();
    let err = submit_problem(&api, &draft(&[])).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(api.transport().request_count(), 0);
}

#[tokio::test]
async fn valid_draft_is_posted_with_token() {
    let api = api();
    api.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/problems", BASE),
        200,
        json!({
            "id": "p9",
            "title": "Climbing Stairs",
            "platform": "LeetCode",
            "difficulty": "Easy",
            "topics": ["DP"],
            "date_completed": "2024-06-01"
        }),
    );

    let created = submit_problem(&api, &draft(&[Topic::Dp])).await.unwrap();
    assert_eq!(created.problem().map(|p| p.id.as_str()), Some("p9"));

    let requests = api.transport().requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("Authorization"), Some("Bearer t1"));
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["topics"], json!(["DP"]));
    assert_eq!(body["date_completed"], json!("2024-06-01"));
}

#[tokio::test]
async fn acknowledgement_without_record_counts_as_saved() {
    let api = api();
    api.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/problems", BASE),
        201,
        json!({ "message": "Problem created" }),
    );

    let saved = submit_problem(&api, &draft(&[Topic::Dp])).await;
    assert!(saved.is_ok());
    assert!(saved.unwrap().problem().is_none());
    assert_eq!(api.transport().request_count(), 1);
}

#[tokio::test]
async fn backend_rejection_keeps_draft_for_retry() {
    let api = api();
    api.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/problems", BASE),
        401,
        json!({ "detail": "Token has expired" }),
    );

    let pending = draft(&[Topic::Dp, Topic::Greedy]);
    let err = submit_problem(&api, &pending).await.unwrap_err();

    assert_eq!(err.user_message(ADD_FAILED), "Token has expired");
    assert_eq!(pending.topics.joined(), "DP, Greedy");
    assert_eq!(pending.title, "Climbing Stairs");
}
