use chrono::Utc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::feedback::{
    CommentFeedEntry, CommentFeedQuery, VoteReceipt, VoteType,
};
use crate::models::menu::{Comment, FoodItem, MealSlot, Weekday, WeekMenu};
use crate::services::sentiment;
use crate::store::AppData;

const MIN_COMMENT_CHARS: usize = 5;

pub struct FeedbackService;

impl FeedbackService {
    /// Casts a vote. The gates, in order: the item must exist, it must be
    /// on today's menu, and the user must not have voted on it before in
    /// either direction. One vote per (user, food) is permanent.
    pub fn cast_vote(
        data: &mut AppData,
        user: &str,
        food_id: Uuid,
        vote: VoteType,
        today: Weekday,
    ) -> Result<VoteReceipt, ApiError> {
        let (day, _, _) = data
            .menu
            .find_item(food_id)
            .ok_or_else(|| ApiError::NotFound("Food item not found".into()))?;
        if day != today {
            return Err(ApiError::ViewOnly);
        }
        if data.ledger.has_voted(user, food_id) {
            return Err(ApiError::AlreadyVoted);
        }

        let (_, _, item) = data
            .menu
            .find_item_mut(food_id)
            .ok_or_else(|| ApiError::NotFound("Food item not found".into()))?;
        apply_vote(item, vote);
        let receipt = VoteReceipt {
            food_id,
            likes: item.likes,
            dislikes: item.dislikes,
            your_vote: vote,
            // a dislike opens the comment box so the kitchen learns why
            prompt_comment: vote == VoteType::Dislike,
        };
        data.ledger.record(user, food_id, vote);
        Ok(receipt)
    }

    /// Appends a comment to a food item on today's menu. The text is
    /// trimmed and must keep at least 5 characters.
    pub fn submit_comment(
        data: &mut AppData,
        food_id: Uuid,
        text: &str,
        today: Weekday,
    ) -> Result<Comment, ApiError> {
        let text = text.trim();
        if text.chars().count() < MIN_COMMENT_CHARS {
            return Err(ApiError::Validation(
                "Comment must be at least 5 characters long".into(),
            ));
        }

        let (day, _, item) = data
            .menu
            .find_item_mut(food_id)
            .ok_or_else(|| ApiError::NotFound("Food item not found".into()))?;
        if day != today {
            return Err(ApiError::ViewOnly);
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        item.comments.push(comment.clone());
        Ok(comment)
    }

    /// Admin removal of a comment, wherever it lives.
    pub fn delete_comment(data: &mut AppData, comment_id: Uuid) -> Result<(), ApiError> {
        for day in Weekday::ALL {
            for meal in MealSlot::ALL {
                for item in data.menu.day_mut(day).slot_mut(meal) {
                    if let Some(pos) = item.comments.iter().position(|c| c.id == comment_id) {
                        item.comments.remove(pos);
                        return Ok(());
                    }
                }
            }
        }
        Err(ApiError::NotFound("Comment not found".into()))
    }

    /// The flat community-feedback feed: every comment joined with its
    /// food's identity and tally, newest first, optionally filtered.
    pub fn comment_feed(menu: &WeekMenu, query: &CommentFeedQuery) -> Vec<CommentFeedEntry> {
        let mut entries: Vec<CommentFeedEntry> = menu
            .iter_slots()
            .filter(|(day, meal, _)| {
                query.day.map_or(true, |d| d == *day) && query.meal.map_or(true, |m| m == *meal)
            })
            .flat_map(|(day, meal, items)| {
                let date = menu.day(day).date;
                items.iter().flat_map(move |item| {
                    let label = sentiment::classify(item.likes, item.dislikes);
                    item.comments.iter().map(move |comment| CommentFeedEntry {
                        id: comment.id,
                        text: comment.text.clone(),
                        timestamp: comment.timestamp,
                        food_id: item.id,
                        food_name: item.name.clone(),
                        day,
                        meal,
                        date,
                        likes: item.likes,
                        dislikes: item.dislikes,
                        sentiment: label,
                    })
                })
            })
            .filter(|entry| query.sentiment.map_or(true, |s| s == entry.sentiment))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

/// Pure tally increment. Votes are never switched or retracted, so no
/// decrement counterpart exists.
pub fn apply_vote(item: &mut FoodItem, vote: VoteType) {
    match vote {
        VoteType::Like => item.likes += 1,
        VoteType::Dislike => item.dislikes += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::Sentiment;
    use chrono::Duration;

    fn fixture() -> (AppData, Uuid, Uuid) {
        let mut data = AppData::default();
        let dal = FoodItem::new("Dal Tadka");
        let rice = FoodItem::new("Jeera Rice");
        let dal_id = dal.id;
        let rice_id = rice.id;
        data.menu.monday.lunch.push(dal);
        data.menu.tuesday.dinner.push(rice);
        (data, dal_id, rice_id)
    }

    #[test]
    fn test_first_vote_increments_tally() {
        let (mut data, dal_id, _) = fixture();
        let receipt =
            FeedbackService::cast_vote(&mut data, "user-1", dal_id, VoteType::Like, Weekday::Monday)
                .unwrap();
        assert_eq!(receipt.likes, 1);
        assert_eq!(receipt.dislikes, 0);
        assert!(!receipt.prompt_comment);
    }

    #[test]
    fn test_repeat_vote_rejected_without_second_increment() {
        let (mut data, dal_id, _) = fixture();
        FeedbackService::cast_vote(&mut data, "user-1", dal_id, VoteType::Like, Weekday::Monday)
            .unwrap();
        let repeat =
            FeedbackService::cast_vote(&mut data, "user-1", dal_id, VoteType::Like, Weekday::Monday);
        assert!(matches!(repeat, Err(ApiError::AlreadyVoted)));
        assert_eq!(data.menu.monday.lunch[0].likes, 1);
    }

    #[test]
    fn test_vote_switching_rejected() {
        let (mut data, dal_id, _) = fixture();
        FeedbackService::cast_vote(&mut data, "user-1", dal_id, VoteType::Like, Weekday::Monday)
            .unwrap();
        let switched = FeedbackService::cast_vote(
            &mut data,
            "user-1",
            dal_id,
            VoteType::Dislike,
            Weekday::Monday,
        );
        assert!(matches!(switched, Err(ApiError::AlreadyVoted)));
        assert_eq!(data.menu.monday.lunch[0].likes, 1);
        assert_eq!(data.menu.monday.lunch[0].dislikes, 0);
    }

    #[test]
    fn test_other_users_still_vote() {
        let (mut data, dal_id, _) = fixture();
        FeedbackService::cast_vote(&mut data, "user-1", dal_id, VoteType::Like, Weekday::Monday)
            .unwrap();
        let receipt = FeedbackService::cast_vote(
            &mut data,
            "user-2",
            dal_id,
            VoteType::Dislike,
            Weekday::Monday,
        )
        .unwrap();
        assert_eq!(receipt.likes, 1);
        assert_eq!(receipt.dislikes, 1);
        assert!(receipt.prompt_comment);
    }

    #[test]
    fn test_vote_outside_current_day_is_view_only() {
        let (mut data, _, rice_id) = fixture();
        let result =
            FeedbackService::cast_vote(&mut data, "user-1", rice_id, VoteType::Like, Weekday::Monday);
        assert!(matches!(result, Err(ApiError::ViewOnly)));
        assert_eq!(data.menu.tuesday.dinner[0].likes, 0);
        assert!(!data.ledger.has_voted("user-1", rice_id));
    }

    #[test]
    fn test_vote_on_unknown_item() {
        let (mut data, _, _) = fixture();
        let result = FeedbackService::cast_vote(
            &mut data,
            "user-1",
            Uuid::new_v4(),
            VoteType::Like,
            Weekday::Monday,
        );
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_comment_length_gate() {
        let (mut data, dal_id, _) = fixture();
        let short = FeedbackService::submit_comment(&mut data, dal_id, "abcd", Weekday::Monday);
        assert!(matches!(short, Err(ApiError::Validation(_))));
        // whitespace doesn't count toward the minimum
        let padded = FeedbackService::submit_comment(&mut data, dal_id, "  ab  ", Weekday::Monday);
        assert!(padded.is_err());

        let ok = FeedbackService::submit_comment(&mut data, dal_id, "abcde", Weekday::Monday);
        assert!(ok.is_ok());
        assert_eq!(data.menu.monday.lunch[0].comments.len(), 1);
    }

    #[test]
    fn test_comment_outside_current_day_is_view_only() {
        let (mut data, _, rice_id) = fixture();
        let result =
            FeedbackService::submit_comment(&mut data, rice_id, "Too salty", Weekday::Monday);
        assert!(matches!(result, Err(ApiError::ViewOnly)));
    }

    #[test]
    fn test_delete_comment() {
        let (mut data, dal_id, _) = fixture();
        let comment =
            FeedbackService::submit_comment(&mut data, dal_id, "Needs more salt", Weekday::Monday)
                .unwrap();

        FeedbackService::delete_comment(&mut data, comment.id).unwrap();
        assert!(data.menu.monday.lunch[0].comments.is_empty());

        let again = FeedbackService::delete_comment(&mut data, comment.id);
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_feed_is_newest_first_and_filterable() {
        let (mut data, dal_id, rice_id) = fixture();
        let base = Utc::now();
        data.menu.monday.lunch[0].comments.push(Comment {
            id: Uuid::new_v4(),
            text: "older".into(),
            timestamp: base - Duration::hours(2),
        });
        data.menu.monday.lunch[0].dislikes = 6;
        data.menu.monday.lunch[0].likes = 4;
        data.menu.tuesday.dinner[0].comments.push(Comment {
            id: Uuid::new_v4(),
            text: "newer".into(),
            timestamp: base,
        });

        let all = FeedbackService::comment_feed(&data.menu, &CommentFeedQuery::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "newer");
        assert_eq!(all[1].text, "older");

        let monday_only = FeedbackService::comment_feed(
            &data.menu,
            &CommentFeedQuery {
                day: Some(Weekday::Monday),
                ..Default::default()
            },
        );
        assert_eq!(monday_only.len(), 1);
        assert_eq!(monday_only[0].food_id, dal_id);
        assert_eq!(monday_only[0].sentiment, Sentiment::Disliked);

        let mixed_only = FeedbackService::comment_feed(
            &data.menu,
            &CommentFeedQuery {
                sentiment: Some(Sentiment::Mixed),
                ..Default::default()
            },
        );
        assert_eq!(mixed_only.len(), 1);
        assert_eq!(mixed_only[0].food_id, rice_id);
    }
}
