use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::menu::{Comment, MealSlot, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VoteType::Like => "like",
            VoteType::Dislike => "dislike",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for VoteType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" => Ok(VoteType::Like),
            "dislike" => Ok(VoteType::Dislike),
            other => Err(anyhow::anyhow!("Unknown vote type: {other}")),
        }
    }
}

/// Derived 3-way label from a food item's tally ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Liked,
    Disliked,
    Mixed,
}

impl std::str::FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "liked" => Ok(Sentiment::Liked),
            "disliked" => Ok(Sentiment::Disliked),
            "mixed" => Ok(Sentiment::Mixed),
            other => Err(anyhow::anyhow!("Unknown sentiment: {other}")),
        }
    }
}

/// Per-user vote records: at most one vote per (user, food). Once a vote
/// exists, every further vote on that food from that user is rejected;
/// there is no switching and no decrement path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: HashMap<String, HashMap<Uuid, VoteType>>,
}

impl VoteLedger {
    pub fn vote_for(&self, user: &str, food_id: Uuid) -> Option<VoteType> {
        self.votes.get(user).and_then(|m| m.get(&food_id)).copied()
    }

    pub fn has_voted(&self, user: &str, food_id: Uuid) -> bool {
        self.vote_for(user, food_id).is_some()
    }

    /// Records a vote. The caller must have checked `has_voted` first.
    pub fn record(&mut self, user: &str, food_id: Uuid, vote: VoteType) {
        self.votes
            .entry(user.to_string())
            .or_default()
            .insert(food_id, vote);
    }

    /// Drops votes for food ids that no longer exist on the menu.
    pub fn prune(&mut self, known_ids: &HashSet<Uuid>) {
        for map in self.votes.values_mut() {
            map.retain(|food_id, _| known_ids.contains(food_id));
        }
        self.votes.retain(|_, map| !map.is_empty());
    }

    pub fn clear(&mut self) {
        self.votes.clear();
    }

    pub fn total_votes(&self) -> usize {
        self.votes.values().map(|m| m.len()).sum()
    }
}

/// Body for POST /feedback/submit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    pub food_id: Uuid,
    pub feedback_type: VoteType,
}

/// Body for POST /feedback/comment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCommentRequest {
    pub food_id: Uuid,
    pub comment: String,
}

/// Returned from a successful vote: the updated tally, plus a nudge to
/// open the comment box when the vote was a dislike.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub food_id: Uuid,
    pub likes: u32,
    pub dislikes: u32,
    pub your_vote: VoteType,
    pub prompt_comment: bool,
}

/// One entry of the flat community-feedback feed: a comment joined with
/// its food's identity and tally.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFeedEntry {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub food_id: Uuid,
    pub food_name: String,
    pub day: Weekday,
    pub meal: MealSlot,
    pub date: Option<NaiveDate>,
    pub likes: u32,
    pub dislikes: u32,
    pub sentiment: Sentiment,
}

/// Query params for GET /feedback/all-comments.
#[derive(Debug, Default, Deserialize)]
pub struct CommentFeedQuery {
    pub day: Option<Weekday>,
    pub meal: Option<MealSlot>,
    pub sentiment: Option<Sentiment>,
}

/// One food item inside a triage group, its comments newest-first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSummary {
    pub food_id: Uuid,
    pub food_name: String,
    pub day: Weekday,
    pub meal: MealSlot,
    pub date: Option<NaiveDate>,
    pub likes: u32,
    pub dislikes: u32,
    pub comments: Vec<Comment>,
    pub newest_comment_date: DateTime<Utc>,
}

/// One (day, meal) bucket of the admin triage view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMealGroup {
    pub day: Weekday,
    pub meal: MealSlot,
    pub foods: Vec<FoodSummary>,
    pub newest_comment_date: DateTime<Utc>,
}
