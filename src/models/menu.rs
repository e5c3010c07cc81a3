use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday-first cycle order, matching the menu tabs.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(anyhow::anyhow!("Unknown day: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snacks,
        MealSlot::Dinner,
    ];
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snacks => "snacks",
            MealSlot::Dinner => "dinner",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MealSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "snacks" => Ok(MealSlot::Snacks),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(anyhow::anyhow!("Unknown meal: {other}")),
        }
    }
}

/// One student comment on a food item. Immutable once created; only an
/// admin delete removes it from the owning item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A food item in one (day, meal) slot, carrying its feedback tally and
/// its comments in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub likes: u32,
    pub dislikes: u32,
    pub comments: Vec<Comment>,
}

impl FoodItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            likes: 0,
            dislikes: 0,
            comments: Vec::new(),
        }
    }

    /// Case-insensitive name match, the key used by the upload merge.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.trim())
    }
}

/// One day's menu: four fixed meal slots. An empty slot is a valid
/// "no menu available" state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayMenu {
    pub date: Option<NaiveDate>,
    pub breakfast: Vec<FoodItem>,
    pub lunch: Vec<FoodItem>,
    pub snacks: Vec<FoodItem>,
    pub dinner: Vec<FoodItem>,
}

impl DayMenu {
    pub fn slot(&self, meal: MealSlot) -> &Vec<FoodItem> {
        match meal {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snacks => &self.snacks,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, meal: MealSlot) -> &mut Vec<FoodItem> {
        match meal {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snacks => &mut self.snacks,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn is_empty(&self) -> bool {
        MealSlot::ALL.iter().all(|m| self.slot(*m).is_empty())
    }

    pub fn item_count(&self) -> usize {
        MealSlot::ALL.iter().map(|m| self.slot(*m).len()).sum()
    }
}

/// The full 7-day cycle: seven fixed `DayMenu` fields, one per weekday.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekMenu {
    pub monday: DayMenu,
    pub tuesday: DayMenu,
    pub wednesday: DayMenu,
    pub thursday: DayMenu,
    pub friday: DayMenu,
    pub saturday: DayMenu,
    pub sunday: DayMenu,
}

impl WeekMenu {
    pub fn day(&self, day: Weekday) -> &DayMenu {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayMenu {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// All (day, meal) slots in cycle order.
    pub fn iter_slots(&self) -> impl Iterator<Item = (Weekday, MealSlot, &[FoodItem])> {
        Weekday::ALL.iter().flat_map(move |day| {
            MealSlot::ALL
                .iter()
                .map(move |meal| (*day, *meal, self.day(*day).slot(*meal).as_slice()))
        })
    }

    pub fn find_item(&self, food_id: Uuid) -> Option<(Weekday, MealSlot, &FoodItem)> {
        self.iter_slots().find_map(|(day, meal, items)| {
            items
                .iter()
                .find(|item| item.id == food_id)
                .map(|item| (day, meal, item))
        })
    }

    pub fn find_item_mut(&mut self, food_id: Uuid) -> Option<(Weekday, MealSlot, &mut FoodItem)> {
        let (day, meal) = self.find_item(food_id).map(|(d, m, _)| (d, m))?;
        let item = self
            .day_mut(day)
            .slot_mut(meal)
            .iter_mut()
            .find(|item| item.id == food_id)?;
        Some((day, meal, item))
    }

    /// Every food id currently on the menu, for ledger pruning.
    pub fn all_food_ids(&self) -> HashSet<Uuid> {
        self.iter_slots()
            .flat_map(|(_, _, items)| items.iter().map(|item| item.id))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        Weekday::ALL.iter().map(|d| self.day(*d).item_count()).sum()
    }

    pub fn comment_count(&self) -> usize {
        self.iter_slots()
            .flat_map(|(_, _, items)| items.iter().map(|item| item.comments.len()))
            .sum()
    }
}

/// Body for POST /menu/add-item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub day: Weekday,
    pub meal: MealSlot,
    pub food_name: String,
}

/// Body for DELETE /menu/remove-item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub day: Weekday,
    pub meal: MealSlot,
    pub food_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStats {
    pub days_found: usize,
    pub total_items: usize,
}

/// Outcome of a menu upload: which days were recognized and what survived
/// the merge. Partial menus are accepted; the warnings name the gaps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub warnings: Vec<String>,
    pub stats: UploadStats,
}
