//! Seasonal and holiday themes for the occasion recipe tab.

use chrono::{Datelike, Local, NaiveDate};

/// A holiday or season used to theme occasion recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occasion {
    pub name: &'static str,
    pub description: &'static str,
}

struct OccasionRange {
    month: u32,
    start_day: u32,
    end_day: u32,
    occasion: Occasion,
}

const fn range(
    month: u32,
    start_day: u32,
    end_day: u32,
    name: &'static str,
    description: &'static str,
) -> OccasionRange {
    OccasionRange {
        month,
        start_day,
        end_day,
        occasion: Occasion { name, description },
    }
}

const OCCASIONS: &[OccasionRange] = &[
    range(1, 1, 1, "New Year's Day", "New Year's celebration recipes"),
    range(1, 13, 20, "Martin Luther King Jr. Day Weekend", "comfort food and soul food"),
    range(2, 1, 14, "Valentine's Day", "romantic dinners and desserts"),
    range(2, 15, 28, "Black History Month", "soul food and African-American cuisine"),
    range(3, 1, 17, "St. Patrick's Day", "Irish-inspired dishes"),
    range(3, 18, 31, "Spring Season", "fresh spring vegetables and lighter dishes"),
    range(4, 1, 30, "Easter Season", "spring brunch and Easter dinner recipes"),
    range(5, 1, 15, "Cinco de Mayo", "Mexican-inspired celebration food"),
    range(5, 20, 31, "Memorial Day Weekend", "BBQ and grilling recipes"),
    range(6, 1, 21, "Father's Day", "hearty grilling and favorite comfort foods"),
    range(6, 22, 30, "Summer Season", "light summer meals and grilling"),
    range(7, 1, 4, "Independence Day", "BBQ, picnic, and patriotic recipes"),
    range(7, 5, 31, "Summer Grilling Season", "outdoor cooking and fresh salads"),
    range(8, 1, 31, "Late Summer", "fresh produce and outdoor dining"),
    range(9, 1, 22, "Labor Day Weekend", "BBQ and end-of-summer gatherings"),
    range(9, 23, 30, "Fall Season", "autumn harvest and comfort food"),
    range(10, 1, 31, "Halloween & Fall Harvest", "pumpkin, apple, and festive fall recipes"),
    range(11, 1, 15, "Thanksgiving Prep", "Thanksgiving sides and preparations"),
    range(11, 16, 30, "Thanksgiving", "traditional Thanksgiving feast recipes"),
    range(12, 1, 24, "Christmas & Holiday Season", "festive holiday meals and cookies"),
    range(12, 25, 31, "Christmas & New Year's", "holiday leftovers and party food"),
];

/// Occasion in effect on `date`, falling back to the season.
pub fn occasion_for(date: NaiveDate) -> Occasion {
    let (month, day) = (date.month(), date.day());

    OCCASIONS
        .iter()
        .find(|r| r.month == month && (r.start_day..=r.end_day).contains(&day))
        .map(|r| r.occasion)
        .unwrap_or_else(|| season_for(month))
}

/// Occasion in effect today, in local time.
pub fn current_occasion() -> Occasion {
    occasion_for(Local::now().date_naive())
}

fn season_for(month: u32) -> Occasion {
    match month {
        12 | 1 | 2 => Occasion {
            name: "Winter Season",
            description: "warming winter comfort foods",
        },
        3..=5 => Occasion {
            name: "Spring Season",
            description: "fresh spring vegetables and lighter dishes",
        },
        6..=8 => Occasion {
            name: "Summer Season",
            description: "light summer meals and grilling",
        },
        _ => Occasion {
            name: "Fall Season",
            description: "autumn harvest and comfort food",
        },
    }
}
