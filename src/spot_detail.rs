//! What the spot detail screen displays.
//!
//! The UI shell owns widgets and menus; this module only derives their
//! content from a spot, the user's rating and the weather preference.

use serde::Serialize;
use url::Url;

use crate::rating_store::{MAX_RATING, NO_RATING};
use crate::vacation_spot::{Coordinate, VacationSpot};

const STAR: &str = "★";

pub const SUBMIT_RATING_TITLE: &str = "Submit Rating";
pub const REMOVE_RATING_TITLE: &str = "Remove rating";
pub const RATE_MENU_TITLE: &str = "Rate...";
pub const SHOW_WEATHER_TITLE: &str = "Show";
pub const HIDE_WEATHER_TITLE: &str = "Hide";

const RATING_TITLES: [&str; 5] = ["Boring", "Meh", "It's OK", "Like It", "Fantastic!"];

/// `count` stars, clamped to `0..=5`. Editorial ratings come from the
/// catalogue unchecked.
pub fn stars(count: i64) -> String {
    STAR.repeat(count.clamp(NO_RATING as i64, MAX_RATING as i64) as usize)
}

/// One entry of the "Rate..." menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingOption {
    pub title: &'static str,
    pub value: u8,
}

impl RatingOption {
    /// The five entries, from one star to five.
    pub fn all() -> Vec<RatingOption> {
        RATING_TITLES
            .into_iter()
            .zip(1u8..)
            .map(|(title, value)| RatingOption { title, value })
            .collect()
    }

    /// The menu identifier of this entry, its star count as a string.
    pub fn action_identifier(&self) -> String {
        self.value.to_string()
    }

    /// Parses a menu action identifier back into a star count. Anything that
    /// is not one of the menu's identifiers yields `None` and is ignored.
    pub fn from_action_identifier(identifier: &str) -> Option<u8> {
        identifier
            .parse::<u8>()
            .ok()
            .filter(|value| (1..=RATING_TITLES.len() as u8).contains(value))
    }
}

/// Context menu attached to the rating button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingMenu {
    pub title: &'static str,
    pub options: Vec<RatingOption>,
    pub remove_rating_title: &'static str,
    pub remove_rating_enabled: bool,
}

impl RatingMenu {
    pub fn new(own_rating: u8) -> Self {
        Self {
            title: RATE_MENU_TITLE,
            options: RatingOption::all(),
            remove_rating_title: REMOVE_RATING_TITLE,
            remove_rating_enabled: own_rating > NO_RATING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDetail {
    pub identifier: i64,
    pub title: String,
    pub why_visit: String,
    pub what_to_see: String,
    pub weather_info: String,
    pub weather_info_hidden: bool,
    pub weather_toggle_title: &'static str,
    pub average_rating_stars: String,
    /// `None` hides the "your rating" row.
    pub own_rating_stars: Option<String>,
    pub rating_button_title: String,
    pub rating_menu: RatingMenu,
    pub wikipedia_url: Url,
    pub coordinate: Coordinate,
}

impl SpotDetail {
    pub fn new(spot: &VacationSpot, own_rating: u8, hide_weather_info: bool) -> Self {
        let (own_rating_stars, rating_button_title) = if own_rating > NO_RATING {
            (Some(stars(own_rating as i64)), format!("Update Rating ({own_rating})"))
        } else {
            (None, SUBMIT_RATING_TITLE.to_string())
        };

        Self {
            identifier: spot.identifier(),
            title: spot.name().to_string(),
            why_visit: spot.why_visit().to_string(),
            what_to_see: spot.what_to_see().to_string(),
            weather_info: spot.weather_info().to_string(),
            weather_info_hidden: hide_weather_info,
            weather_toggle_title: weather_toggle_title(hide_weather_info),
            average_rating_stars: stars(spot.user_rating()),
            own_rating_stars,
            rating_button_title,
            rating_menu: RatingMenu::new(own_rating),
            wikipedia_url: spot.wikipedia_url().clone(),
            coordinate: spot.coordinate(),
        }
    }
}

/// Title of the weather toggle: it offers the opposite of the current state.
pub fn weather_toggle_title(hide_weather_info: bool) -> &'static str {
    if hide_weather_info {
        SHOW_WEATHER_TITLE
    } else {
        HIDE_WEATHER_TITLE
    }
}

/// New preference after tapping a toggle currently titled `current_title`.
pub fn toggle_hide_weather(current_title: &str) -> bool {
    current_title == HIDE_WEATHER_TITLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_clamped_to_the_rating_scale() {
        assert_eq!(stars(-3), "");
        assert_eq!(stars(0), "");
        assert_eq!(stars(2), "★★");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(6), "★★★★★");
        assert_eq!(stars(i64::MAX), "★★★★★");
    }
}
