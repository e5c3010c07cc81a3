use serde::Serialize;
use uuid::Uuid;

use crate::models::feedback::Sentiment;
use crate::models::menu::{MealSlot, Weekday, WeekMenu};
use crate::services::sentiment;

/// Per-item stats for the admin charts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodStat {
    pub id: Uuid,
    pub name: String,
    pub day: Weekday,
    pub meal: MealSlot,
    pub likes: u32,
    pub dislikes: u32,
    pub comment_count: usize,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_items: usize,
    pub total_likes: u64,
    pub total_dislikes: u64,
    pub total_comments: usize,
    pub food_items: Vec<FoodStat>,
}

pub struct AnalyticsService;

impl AnalyticsService {
    pub fn summarize(menu: &WeekMenu) -> AnalyticsSummary {
        let food_items: Vec<FoodStat> = menu
            .iter_slots()
            .flat_map(|(day, meal, items)| {
                items.iter().map(move |item| FoodStat {
                    id: item.id,
                    name: item.name.clone(),
                    day,
                    meal,
                    likes: item.likes,
                    dislikes: item.dislikes,
                    comment_count: item.comments.len(),
                    sentiment: sentiment::classify(item.likes, item.dislikes),
                })
            })
            .collect();

        AnalyticsSummary {
            total_items: food_items.len(),
            total_likes: food_items.iter().map(|i| u64::from(i.likes)).sum(),
            total_dislikes: food_items.iter().map(|i| u64::from(i.dislikes)).sum(),
            total_comments: food_items.iter().map(|i| i.comment_count).sum(),
            food_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::FoodItem;

    #[test]
    fn test_summary_totals() {
        let mut menu = WeekMenu::default();
        let mut dal = FoodItem::new("Dal");
        dal.likes = 7;
        dal.dislikes = 3;
        menu.monday.lunch.push(dal);
        let mut poha = FoodItem::new("Poha");
        poha.likes = 1;
        poha.dislikes = 4;
        menu.tuesday.breakfast.push(poha);

        let summary = AnalyticsService::summarize(&menu);
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_likes, 8);
        assert_eq!(summary.total_dislikes, 7);
        assert_eq!(summary.food_items[0].sentiment, Sentiment::Liked);
        assert_eq!(summary.food_items[1].sentiment, Sentiment::Disliked);
    }

    #[test]
    fn test_empty_menu() {
        let summary = AnalyticsService::summarize(&WeekMenu::default());
        assert_eq!(summary.total_items, 0);
        assert!(summary.food_items.is_empty());
    }
}
