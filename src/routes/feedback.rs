use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::{
        auth::{AdminUser, StudentIdentity},
        feedback::{CommentFeedQuery, SubmitCommentRequest, SubmitVoteRequest},
    },
    routes::ok,
    services::{feedback::FeedbackService, issues::IssueService, metrics},
    AppState,
};

/// POST /feedback/submit — one permanent vote per (user, food), today's
/// menu only.
pub async fn submit_vote(
    State(state): State<AppState>,
    student: StudentIdentity,
    Json(body): Json<SubmitVoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let today = state.today();
    let receipt = {
        let mut data = state.data.write().await;
        FeedbackService::cast_vote(&mut data, &student.0, body.food_id, body.feedback_type, today)?
    };
    state.persist().await?;
    let vote_label = receipt.your_vote.to_string();
    metrics::VOTES_COUNTER.with_label_values(&[vote_label.as_str()]).inc();
    Ok(ok(receipt))
}

/// POST /feedback/comment — today's menu only, 5 characters minimum.
pub async fn submit_comment(
    State(state): State<AppState>,
    _student: StudentIdentity,
    Json(body): Json<SubmitCommentRequest>,
) -> Result<Json<Value>, ApiError> {
    let today = state.today();
    let comment = {
        let mut data = state.data.write().await;
        FeedbackService::submit_comment(&mut data, body.food_id, &body.comment, today)?
    };
    state.persist().await?;
    metrics::COMMENTS_COUNTER.inc();
    Ok(ok(comment))
}

/// DELETE /feedback/comment/{id} — admin only.
pub async fn delete_comment(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    {
        let mut data = state.data.write().await;
        FeedbackService::delete_comment(&mut data, comment_id)?;
    }
    state.persist().await?;
    info!("Comment {comment_id} deleted by {}", admin.email);
    Ok(ok(json!({ "deleted": comment_id })))
}

/// GET /feedback/disliked-issues — the admin triage view: commented
/// foods grouped by (day, meal), today's buckets first.
pub async fn disliked_issues(State(state): State<AppState>) -> Json<Value> {
    let data = state.data.read().await;
    let groups = IssueService::group(&data.menu, state.today());
    ok(groups)
}

/// GET /feedback/all-comments?day=&meal=&sentiment= — the flat community
/// feed, newest first.
pub async fn all_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentFeedQuery>,
) -> Json<Value> {
    let data = state.data.read().await;
    ok(FeedbackService::comment_feed(&data.menu, &query))
}
