//! The user's own spot ratings and the weather display preference.
//!
//! Both live in the persisted [`Settings`] under stable key names so values
//! written by earlier versions of the app remain readable. Setters take a
//! refresh callback that runs after a successful write with the value read
//! back from storage, so dependent displays can redraw.

use std::path::Path;

use log::debug;

use crate::app_response::AppResponse;
use crate::settings::Settings;

pub const HIDE_WEATHER_INFO_KEY: &str = "shouldHideWeatherInfo";
pub const RATING_KEY_PREFIX: &str = "currentUserRating-";

/// Lowest and highest star counts. Zero means "not rated".
pub const NO_RATING: u8 = 0;
pub const MAX_RATING: u8 = 5;

/// Settings key holding the rating of spot `identifier`.
pub fn rating_key(identifier: i64) -> String {
    format!("{RATING_KEY_PREFIX}{identifier}")
}

pub struct RatingStore {
    settings: Settings,
}

impl RatingStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn open(path: impl AsRef<Path>, map_size: usize) -> Result<Self, AppResponse> {
        Ok(Self::new(Settings::open(path, map_size)?))
    }

    /// The user's rating of `identifier`, or 0 when unrated.
    pub fn rating(&self, identifier: i64) -> Result<u8, AppResponse> {
        let stored = self.settings.get_integer(&rating_key(identifier))?;
        Ok(match stored {
            Some(value) if (0..=MAX_RATING as i64).contains(&value) => value as u8,
            Some(value) => {
                debug!("Ignoring out-of-range rating {value} for spot {identifier}");
                NO_RATING
            }
            None => NO_RATING,
        })
    }

    /// Stores `value` as the rating of `identifier` and then calls `refresh`
    /// with the stored rating.
    ///
    /// Writing 0 removes the rating. Values outside `0..=5` are rejected with
    /// [`AppResponse::ValidationError`]; nothing is written and `refresh` is
    /// not called.
    pub fn set_rating<F>(&self, identifier: i64, value: i64, refresh: F) -> Result<(), AppResponse>
    where
        F: FnOnce(u8),
    {
        if !(0..=MAX_RATING as i64).contains(&value) {
            return Err(AppResponse::ValidationError(format!(
                "Rating {value} for spot {identifier} is outside 0..={MAX_RATING}"
            )));
        }

        let key = rating_key(identifier);
        if value == NO_RATING as i64 {
            self.settings.remove(&key)?;
        } else {
            self.settings.set_integer(&key, value)?;
        }
        debug!("Rating for spot {identifier} set to {value}");

        refresh(self.rating(identifier)?);
        Ok(())
    }

    /// The "Remove rating" action.
    pub fn remove_rating<F>(&self, identifier: i64, refresh: F) -> Result<(), AppResponse>
    where
        F: FnOnce(u8),
    {
        self.set_rating(identifier, NO_RATING as i64, refresh)
    }

    /// Whether weather info should be hidden. Defaults to `false`.
    pub fn hide_weather_info(&self) -> Result<bool, AppResponse> {
        Ok(self
            .settings
            .get_bool(HIDE_WEATHER_INFO_KEY)?
            .unwrap_or(false))
    }

    pub fn set_hide_weather_info<F>(&self, hide: bool, refresh: F) -> Result<(), AppResponse>
    where
        F: FnOnce(bool),
    {
        self.settings.set_bool(HIDE_WEATHER_INFO_KEY, hide)?;
        refresh(self.hide_weather_info()?);
        Ok(())
    }

    /// Ratings of the given spots, skipping unrated ones.
    pub fn ratings<I>(&self, identifiers: I) -> Result<Vec<(i64, u8)>, AppResponse>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut rated = Vec::new();
        for identifier in identifiers {
            let rating = self.rating(identifier)?;
            if rating > NO_RATING {
                rated.push((identifier, rating));
            }
        }
        Ok(rated)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn close(self) -> Result<(), AppResponse> {
        self.settings.close()
    }
}
