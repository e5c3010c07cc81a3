use chrono::{DateTime, Utc};

use crate::models::feedback::{DayMealGroup, FoodSummary};
use crate::models::menu::{MealSlot, Weekday, WeekMenu};

pub struct IssueService;

impl IssueService {
    /// The admin triage view: Day → Meal → Food → Comments, restricted to
    /// items that have at least one comment. Today's buckets come first so
    /// actionable complaints sit at the top; within each partition the
    /// most recently commented bucket wins, and within a bucket foods are
    /// ranked by newest comment, ties broken by dislike count.
    pub fn group(menu: &WeekMenu, today: Weekday) -> Vec<DayMealGroup> {
        let mut today_groups: Vec<DayMealGroup> = Vec::new();
        let mut other_groups: Vec<DayMealGroup> = Vec::new();

        for day in Weekday::ALL {
            for meal in MealSlot::ALL {
                let date = menu.day(day).date;
                let mut foods: Vec<FoodSummary> = menu
                    .day(day)
                    .slot(meal)
                    .iter()
                    .filter(|item| !item.comments.is_empty())
                    .map(|item| {
                        let mut comments = item.comments.clone();
                        comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                        let newest = comments
                            .first()
                            .map(|c| c.timestamp)
                            .unwrap_or(DateTime::<Utc>::MIN_UTC);
                        FoodSummary {
                            food_id: item.id,
                            food_name: item.name.clone(),
                            day,
                            meal,
                            date,
                            likes: item.likes,
                            dislikes: item.dislikes,
                            comments,
                            newest_comment_date: newest,
                        }
                    })
                    .collect();

                if foods.is_empty() {
                    continue;
                }

                foods.sort_by(|a, b| {
                    b.newest_comment_date
                        .cmp(&a.newest_comment_date)
                        .then(b.dislikes.cmp(&a.dislikes))
                });
                let newest = foods[0].newest_comment_date;

                let group = DayMealGroup {
                    day,
                    meal,
                    foods,
                    newest_comment_date: newest,
                };
                if day == today {
                    today_groups.push(group);
                } else {
                    other_groups.push(group);
                }
            }
        }

        today_groups.sort_by(|a, b| b.newest_comment_date.cmp(&a.newest_comment_date));
        other_groups.sort_by(|a, b| b.newest_comment_date.cmp(&a.newest_comment_date));

        today_groups.extend(other_groups);
        today_groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::{Comment, FoodItem};
    use chrono::Duration;
    use uuid::Uuid;

    fn comment_at(text: &str, at: DateTime<Utc>) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp: at,
        }
    }

    fn item_with(name: &str, dislikes: u32, comments: Vec<Comment>) -> FoodItem {
        let mut item = FoodItem::new(name);
        item.dislikes = dislikes;
        item.comments = comments;
        item
    }

    #[test]
    fn test_comments_sorted_newest_first_within_a_food() {
        let base = Utc::now();
        let mut menu = WeekMenu::default();
        menu.monday.lunch.push(item_with(
            "Dal",
            0,
            vec![
                comment_at("first", base - Duration::hours(3)),
                comment_at("second", base),
            ],
        ));

        let groups = IssueService::group(&menu, Weekday::Monday);
        assert_eq!(groups.len(), 1);
        let food = &groups[0].foods[0];
        assert_eq!(food.comments[0].text, "second");
        assert_eq!(food.comments[1].text, "first");
        assert_eq!(food.newest_comment_date, base);
    }

    #[test]
    fn test_items_without_comments_filtered_out() {
        let mut menu = WeekMenu::default();
        menu.monday.lunch.push(FoodItem::new("Rice"));
        menu.monday.lunch.push(item_with(
            "Dal",
            0,
            vec![comment_at("too watery", Utc::now())],
        ));

        let groups = IssueService::group(&menu, Weekday::Monday);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].foods.len(), 1);
        assert_eq!(groups[0].foods[0].food_name, "Dal");
    }

    #[test]
    fn test_foods_ranked_by_recency_then_dislikes() {
        let base = Utc::now();
        let mut menu = WeekMenu::default();
        menu.monday.lunch.push(item_with(
            "Stale",
            9,
            vec![comment_at("old complaint", base - Duration::hours(5))],
        ));
        menu.monday.lunch.push(item_with(
            "Fresh",
            1,
            vec![comment_at("new complaint", base)],
        ));
        // same recency as Fresh, more dislikes: the tie-break
        menu.monday.lunch.push(item_with(
            "Contested",
            4,
            vec![comment_at("also new", base)],
        ));

        let groups = IssueService::group(&menu, Weekday::Monday);
        let names: Vec<_> = groups[0]
            .foods
            .iter()
            .map(|f| f.food_name.as_str())
            .collect();
        assert_eq!(names, vec!["Contested", "Fresh", "Stale"]);
    }

    #[test]
    fn test_todays_buckets_precede_others_regardless_of_recency() {
        let base = Utc::now();
        let mut menu = WeekMenu::default();
        // Tuesday has the most recent comment…
        menu.tuesday.dinner.push(item_with(
            "Rajma",
            0,
            vec![comment_at("latest of all", base)],
        ));
        // …but Monday is today, so it leads.
        menu.monday.breakfast.push(item_with(
            "Poha",
            0,
            vec![comment_at("cold again", base - Duration::hours(8))],
        ));

        let groups = IssueService::group(&menu, Weekday::Monday);
        assert_eq!(groups[0].day, Weekday::Monday);
        assert_eq!(groups[1].day, Weekday::Tuesday);
    }

    #[test]
    fn test_partitions_each_sorted_by_recency() {
        let base = Utc::now();
        let mut menu = WeekMenu::default();
        menu.monday.breakfast.push(item_with(
            "Poha",
            0,
            vec![comment_at("a", base - Duration::hours(4))],
        ));
        menu.monday.dinner.push(item_with(
            "Khichdi",
            0,
            vec![comment_at("b", base - Duration::hours(1))],
        ));
        menu.friday.lunch.push(item_with(
            "Kadhi",
            0,
            vec![comment_at("c", base - Duration::hours(2))],
        ));
        menu.wednesday.lunch.push(item_with(
            "Chole",
            0,
            vec![comment_at("d", base - Duration::hours(3))],
        ));

        let groups = IssueService::group(&menu, Weekday::Monday);
        let order: Vec<_> = groups.iter().map(|g| (g.day, g.meal)).collect();
        assert_eq!(
            order,
            vec![
                // today's buckets, newest first
                (Weekday::Monday, MealSlot::Dinner),
                (Weekday::Monday, MealSlot::Breakfast),
                // then the rest, newest first
                (Weekday::Friday, MealSlot::Lunch),
                (Weekday::Wednesday, MealSlot::Lunch),
            ]
        );
    }
}
