use chrono::{NaiveTime, Timelike};

use crate::errors::ApiError;
use crate::models::feedback::VoteLedger;
use crate::models::menu::{FoodItem, MealSlot, UploadReport, Weekday, WeekMenu};
use crate::services::upload::ParsedMenu;

pub struct MenuService;

impl MenuService {
    /// Applies an upload to the menu. Each recognized day is a full
    /// replace per slot, except that an incoming item whose name matches
    /// an existing item in the same slot (case-insensitive) keeps the
    /// existing id, tally and comments. Days the sheet did not cover are
    /// left untouched and surface as warnings.
    pub fn apply_upload(
        menu: &mut WeekMenu,
        ledger: &mut VoteLedger,
        parsed: ParsedMenu,
    ) -> UploadReport {
        let stats = parsed.stats();

        for (day, parsed_day) in &parsed.days {
            let day_menu = menu.day_mut(*day);
            if parsed_day.date.is_some() {
                day_menu.date = parsed_day.date;
            }
            for meal in MealSlot::ALL {
                let old = std::mem::take(day_menu.slot_mut(meal));
                let rebuilt = parsed_day
                    .slot(meal)
                    .iter()
                    .map(|name| match old.iter().find(|item| item.name_matches(name)) {
                        Some(existing) => {
                            let mut kept = existing.clone();
                            // descriptive fields come from the upload
                            kept.name = name.clone();
                            kept
                        }
                        None => FoodItem::new(name.clone()),
                    })
                    .collect();
                *day_menu.slot_mut(meal) = rebuilt;
            }
        }

        // Votes for items the replace dropped are dead weight.
        ledger.prune(&menu.all_food_ids());

        UploadReport {
            warnings: parsed.warnings,
            stats,
        }
    }

    /// Appends a zero-tally item to one slot.
    pub fn add_item(
        menu: &mut WeekMenu,
        day: Weekday,
        meal: MealSlot,
        name: &str,
    ) -> Result<FoodItem, ApiError> {
        let name = name.trim();
        if name.chars().count() < 2 {
            return Err(ApiError::Validation(
                "Food name must be at least 2 characters long".into(),
            ));
        }
        let slot = menu.day_mut(day).slot_mut(meal);
        if slot.iter().any(|item| item.name_matches(name)) {
            return Err(ApiError::Validation(format!(
                "'{name}' is already on the {day} {meal} menu"
            )));
        }
        let item = FoodItem::new(name);
        slot.push(item.clone());
        Ok(item)
    }

    /// Removes an item by case-insensitive name, dropping its votes.
    pub fn remove_item(
        menu: &mut WeekMenu,
        ledger: &mut VoteLedger,
        day: Weekday,
        meal: MealSlot,
        name: &str,
    ) -> Result<FoodItem, ApiError> {
        let slot = menu.day_mut(day).slot_mut(meal);
        let position = slot
            .iter()
            .position(|item| item.name_matches(name))
            .ok_or_else(|| {
                ApiError::NotFound(format!("'{}' is not on the {day} {meal} menu", name.trim()))
            })?;
        let removed = slot.remove(position);
        ledger.prune(&menu.all_food_ids());
        Ok(removed)
    }

    /// Clears the whole cycle, votes included.
    pub fn remove_all(menu: &mut WeekMenu, ledger: &mut VoteLedger) -> usize {
        let removed = menu.item_count();
        *menu = WeekMenu::default();
        ledger.clear();
        removed
    }

    /// The meal being served at the given wall-clock time. Outside every
    /// window the menu defaults to breakfast, like the tabs do.
    pub fn current_meal(time: NaiveTime) -> MealSlot {
        const WINDOWS: [(MealSlot, (u32, u32), (u32, u32)); 4] = [
            (MealSlot::Breakfast, (7, 30), (9, 0)),
            (MealSlot::Lunch, (13, 30), (15, 0)),
            (MealSlot::Snacks, (17, 30), (18, 30)),
            (MealSlot::Dinner, (20, 0), (22, 0)),
        ];
        let minutes = time.hour() * 60 + time.minute();
        for (meal, (sh, sm), (eh, em)) in WINDOWS {
            let start = sh * 60 + sm;
            let end = eh * 60 + em;
            if minutes >= start && minutes < end {
                return meal;
            }
        }
        MealSlot::Breakfast
    }
}
