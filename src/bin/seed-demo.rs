//! Demo state seeder
//!
//! Builds a realistic demo week for the hostel mess and writes it to the
//! state snapshot:
//! - 7 days × 4 meals of typical mess dishes
//! - likes/dislikes and a handful of comments on today's menu
//! - matching vote records for two demo devices
//! - wastage figures for the last 5 days
//!
//! Usage:
//!   STATE_PATH=data/state.json ./seed-demo
//!
//! Environment variables:
//!   STATE_PATH — where to write the snapshot (default: data/state.json)

use std::env;
use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Duration, Local, Utc};
use uuid::Uuid;

use sortmyhostel_api::models::feedback::VoteType;
use sortmyhostel_api::models::menu::{Comment, FoodItem, MealSlot, Weekday};
use sortmyhostel_api::services::wastage::WastageService;
use sortmyhostel_api::store::{self, AppData};

const WEEK: [(Weekday, [&[&str]; 4]); 7] = [
    (
        Weekday::Monday,
        [
            &["Poha", "Boiled Eggs", "Tea"],
            &["Dal Tadka", "Jeera Rice", "Roti"],
            &["Samosa", "Masala Chai"],
            &["Paneer Butter Masala", "Naan"],
        ],
    ),
    (
        Weekday::Tuesday,
        [
            &["Idli", "Sambar", "Coffee"],
            &["Rajma", "Steamed Rice", "Salad"],
            &["Veg Sandwich", "Tea"],
            &["Chicken Curry", "Chapati"],
        ],
    ),
    (
        Weekday::Wednesday,
        [
            &["Aloo Paratha", "Curd", "Tea"],
            &["Chole", "Bhature"],
            &["Bread Pakora", "Masala Chai"],
            &["Veg Pulao", "Raita"],
        ],
    ),
    (
        Weekday::Thursday,
        [
            &["Upma", "Banana", "Coffee"],
            &["Kadhi Pakora", "Steamed Rice", "Papad"],
            &["Biscuits", "Tea"],
            &["Egg Curry", "Roti"],
        ],
    ),
    (
        Weekday::Friday,
        [
            &["Dosa", "Chutney", "Coffee"],
            &["Veg Biryani", "Boondi Raita"],
            &["Spring Rolls", "Tea"],
            &["Dal Makhani", "Butter Naan"],
        ],
    ),
    (
        Weekday::Saturday,
        [
            &["Chana Chaat", "Toast", "Tea"],
            &["Curd Rice", "Pickle", "Papad"],
            &["Maggi", "Masala Chai"],
            &["Mixed Veg", "Chapati"],
        ],
    ),
    (
        Weekday::Sunday,
        [
            &["Puri Bhaji", "Halwa", "Tea"],
            &["Paneer Biryani", "Mirchi Ka Salan"],
            &["Pav Bhaji", "Tea"],
            &["Khichdi", "Kadhi"],
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let state_path = env::var("STATE_PATH").unwrap_or_else(|_| "data/state.json".to_string());

    println!("=== Seed Demo State ===");

    let mut data = AppData::default();

    // 1. The weekly menu, dated for the current calendar week
    let today = Local::now().date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

    for (offset, (day, meals)) in WEEK.iter().enumerate() {
        let day_menu = data.menu.day_mut(*day);
        day_menu.date = Some(monday + Duration::days(offset as i64));
        for (meal, names) in MealSlot::ALL.iter().zip(meals.iter()) {
            for name in names.iter() {
                day_menu.slot_mut(*meal).push(FoodItem::new(*name));
            }
        }
    }
    println!("  Menu: {} items across 7 days", data.menu.item_count());

    // 2. Feedback on today's menu, with matching ledger records
    let current_day = Weekday::from_chrono(today.weekday());
    let now = Utc::now();
    let complaints = [
        "Too oily today, please go easy on the ghee",
        "Served cold by the time second batch came",
        "Portion size has gone down this week",
    ];

    let day_menu = data.menu.day_mut(current_day);
    let mut votes: Vec<(String, Uuid, VoteType)> = Vec::new();
    for (slot_idx, meal) in MealSlot::ALL.iter().enumerate() {
        for (item_idx, item) in day_menu.slot_mut(*meal).iter_mut().enumerate() {
            // a spread of tallies: first item leans liked, second disliked
            if item_idx == 0 {
                item.likes = 6;
                item.dislikes = 2;
            } else {
                item.likes = 2;
                item.dislikes = 5;
                item.comments.push(Comment {
                    id: Uuid::new_v4(),
                    text: complaints[(slot_idx + item_idx) % complaints.len()].to_string(),
                    timestamp: now - Duration::minutes((slot_idx * 37 + item_idx * 11) as i64),
                });
            }
            votes.push((
                format!("demo-device-{}", (slot_idx + item_idx) % 2 + 1),
                item.id,
                if item_idx == 0 { VoteType::Like } else { VoteType::Dislike },
            ));
        }
    }
    for (user, food_id, vote) in votes {
        data.ledger.record(&user, food_id, vote);
    }
    println!(
        "  Feedback: {} comments, {} vote records",
        data.menu.comment_count(),
        data.ledger.total_votes()
    );

    // 3. Wastage for the last five days
    for (cooked, wasted, days_ago) in [
        (52.0, 6.5, 5i64),
        (48.0, 4.2, 4),
        (55.0, 8.0, 3),
        (50.0, 3.1, 2),
        (47.0, 5.0, 1),
    ] {
        WastageService::record(&mut data.wastage, cooked, wasted, today - Duration::days(days_ago))
            .map_err(|e| anyhow::anyhow!("seed wastage rejected: {e}"))?;
    }
    println!("  Wastage: {} entries", data.wastage.entries.len());

    store::save(Path::new(&state_path), &data).await?;
    println!("Snapshot written to {state_path}");

    Ok(())
}
