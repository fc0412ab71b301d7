//! Vacation spot records and their property-list schema.
//!
//! A [`VacationSpot`] is an immutable value record. The bundled catalogue
//! stores each spot as a plist dictionary whose key names differ from the
//! Rust field names (`wikipediaLink` instead of `wikipedia_url`, and the
//! coordinate split across `latitude` / `longitude`). The translation goes
//! through [`SpotField`], an explicit map that is used in both directions.

use plist::{Dictionary, Value};
use serde::Serialize;
use url::Url;

use crate::catalogue::CatalogueError;

/// A geographic point, passed straight through to the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// External keys of a spot record in the catalogue resource.
///
/// [`SpotField::key`] maps internal to external names and
/// [`SpotField::from_key`] maps back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotField {
    Identifier,
    Name,
    LocationName,
    ThumbnailName,
    WhyVisit,
    WhatToSee,
    WeatherInfo,
    UserRating,
    WikipediaLink,
    Latitude,
    Longitude,
}

impl SpotField {
    /// Every field, in the order records are encoded.
    pub const ALL: [SpotField; 11] = [
        SpotField::Identifier,
        SpotField::Name,
        SpotField::LocationName,
        SpotField::ThumbnailName,
        SpotField::WhyVisit,
        SpotField::WhatToSee,
        SpotField::WeatherInfo,
        SpotField::UserRating,
        SpotField::WikipediaLink,
        SpotField::Latitude,
        SpotField::Longitude,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SpotField::Identifier => "identifier",
            SpotField::Name => "name",
            SpotField::LocationName => "locationName",
            SpotField::ThumbnailName => "thumbnailName",
            SpotField::WhyVisit => "whyVisit",
            SpotField::WhatToSee => "whatToSee",
            SpotField::WeatherInfo => "weatherInfo",
            SpotField::UserRating => "userRating",
            SpotField::WikipediaLink => "wikipediaLink",
            SpotField::Latitude => "latitude",
            SpotField::Longitude => "longitude",
        }
    }

    pub fn from_key(key: &str) -> Option<SpotField> {
        SpotField::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// One entry of the catalogue.
///
/// Fields are private so a loaded catalogue cannot be mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationSpot {
    identifier: i64,
    name: String,
    location_name: String,
    thumbnail_name: String,
    why_visit: String,
    what_to_see: String,
    weather_info: String,
    user_rating: i64,
    wikipedia_url: Url,
    coordinate: Coordinate,
}

impl VacationSpot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identifier: i64,
        name: impl Into<String>,
        location_name: impl Into<String>,
        thumbnail_name: impl Into<String>,
        why_visit: impl Into<String>,
        what_to_see: impl Into<String>,
        weather_info: impl Into<String>,
        user_rating: i64,
        wikipedia_url: Url,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            identifier,
            name: name.into(),
            location_name: location_name.into(),
            thumbnail_name: thumbnail_name.into(),
            why_visit: why_visit.into(),
            what_to_see: what_to_see.into(),
            weather_info: weather_info.into(),
            user_rating,
            wikipedia_url,
            coordinate,
        }
    }

    pub fn identifier(&self) -> i64 {
        self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    pub fn thumbnail_name(&self) -> &str {
        &self.thumbnail_name
    }

    pub fn why_visit(&self) -> &str {
        &self.why_visit
    }

    pub fn what_to_see(&self) -> &str {
        &self.what_to_see
    }

    pub fn weather_info(&self) -> &str {
        &self.weather_info
    }

    /// The editorial rating shipped with the catalogue, not the user's own.
    pub fn user_rating(&self) -> i64 {
        self.user_rating
    }

    pub fn wikipedia_url(&self) -> &Url {
        &self.wikipedia_url
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Encodes the spot as a plist dictionary keyed by [`SpotField::key`].
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        for field in SpotField::ALL {
            let value = match field {
                SpotField::Identifier => Value::Integer(self.identifier.into()),
                SpotField::Name => Value::String(self.name.clone()),
                SpotField::LocationName => Value::String(self.location_name.clone()),
                SpotField::ThumbnailName => Value::String(self.thumbnail_name.clone()),
                SpotField::WhyVisit => Value::String(self.why_visit.clone()),
                SpotField::WhatToSee => Value::String(self.what_to_see.clone()),
                SpotField::WeatherInfo => Value::String(self.weather_info.clone()),
                SpotField::UserRating => Value::Integer(self.user_rating.into()),
                SpotField::WikipediaLink => Value::String(self.wikipedia_url.to_string()),
                SpotField::Latitude => Value::Real(self.coordinate.latitude),
                SpotField::Longitude => Value::Real(self.coordinate.longitude),
            };
            dict.insert(field.key().to_string(), value);
        }
        dict
    }

    /// Decodes a spot from a plist dictionary.
    ///
    /// `index` is the record's position in the catalogue and is only used in
    /// error messages. Unknown keys are ignored.
    ///
    /// `wikipediaLink` must be an absolute URL with a scheme, since the
    /// browser view cannot open anything else. Scheme-less references such as
    /// `en.wikipedia.org/wiki/Kyoto` fail with [`CatalogueError::InvalidUrl`],
    /// which the loader treats as fatal.
    pub fn from_dictionary(index: usize, dict: &Dictionary) -> Result<Self, CatalogueError> {
        let reader = RecordReader { index, dict };

        let identifier = reader.integer(SpotField::Identifier)?;
        let name = reader.string(SpotField::Name)?;
        let location_name = reader.string(SpotField::LocationName)?;
        let thumbnail_name = reader.string(SpotField::ThumbnailName)?;
        let why_visit = reader.string(SpotField::WhyVisit)?;
        let what_to_see = reader.string(SpotField::WhatToSee)?;
        let weather_info = reader.string(SpotField::WeatherInfo)?;
        let user_rating = reader.integer(SpotField::UserRating)?;

        let wikipedia_link = reader.string(SpotField::WikipediaLink)?;
        let wikipedia_url =
            Url::parse(&wikipedia_link).map_err(|_| CatalogueError::InvalidUrl(wikipedia_link))?;

        let latitude = reader.real(SpotField::Latitude)?;
        let longitude = reader.real(SpotField::Longitude)?;

        Ok(Self {
            identifier,
            name,
            location_name,
            thumbnail_name,
            why_visit,
            what_to_see,
            weather_info,
            user_rating,
            wikipedia_url,
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

struct RecordReader<'a> {
    index: usize,
    dict: &'a Dictionary,
}

impl RecordReader<'_> {
    fn value(&self, field: SpotField) -> Result<&Value, CatalogueError> {
        self.dict
            .get(field.key())
            .ok_or(CatalogueError::MissingField {
                index: self.index,
                key: field.key(),
            })
    }

    fn mismatch(&self, field: SpotField, expected: &'static str) -> CatalogueError {
        CatalogueError::TypeMismatch {
            index: self.index,
            key: field.key(),
            expected,
        }
    }

    fn string(&self, field: SpotField) -> Result<String, CatalogueError> {
        self.value(field)?
            .as_string()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(field, "string"))
    }

    fn integer(&self, field: SpotField) -> Result<i64, CatalogueError> {
        self.value(field)?
            .as_signed_integer()
            .ok_or_else(|| self.mismatch(field, "integer"))
    }

    // Whole-number coordinates may be written as <integer>.
    fn real(&self, field: SpotField) -> Result<f64, CatalogueError> {
        let value = self.value(field)?;
        value
            .as_real()
            .or_else(|| value.as_signed_integer().map(|i| i as f64))
            .ok_or_else(|| self.mismatch(field, "real"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_map_is_bidirectional() {
        for field in SpotField::ALL {
            assert_eq!(SpotField::from_key(field.key()), Some(field));
        }
        assert_eq!(SpotField::from_key("wikipediaURL"), None);
        assert_eq!(SpotField::WikipediaLink.key(), "wikipediaLink");
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let spot = VacationSpot::new(
            7,
            "Null Island",
            "Gulf of Guinea",
            "null-island",
            "Because it is there",
            "Water",
            "Warm",
            1,
            Url::parse("https://en.wikipedia.org/wiki/Null_Island").unwrap(),
            Coordinate::new(0.0, 0.0),
        );
        let mut dict = spot.to_dictionary();
        dict.insert("latitude".to_string(), Value::Integer(0.into()));
        dict.insert("longitude".to_string(), Value::Integer(0.into()));

        let decoded = VacationSpot::from_dictionary(0, &dict).unwrap();
        assert_eq!(decoded, spot);
    }

    #[test]
    fn scheme_less_wikipedia_link_is_invalid() {
        let mut dict = VacationSpot::new(
            3,
            "Kyoto",
            "Kansai, Japan",
            "kyoto",
            "Temples",
            "Gion",
            "Humid",
            5,
            Url::parse("https://en.wikipedia.org/wiki/Kyoto").unwrap(),
            Coordinate::new(35.0116, 135.7681),
        )
        .to_dictionary();
        dict.insert(
            "wikipediaLink".to_string(),
            Value::String("en.wikipedia.org/wiki/Kyoto".to_string()),
        );

        match VacationSpot::from_dictionary(0, &dict) {
            Err(err @ CatalogueError::InvalidUrl(_)) => assert!(err.is_fatal()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn string_identifier_is_a_type_mismatch() {
        let mut dict = Dictionary::new();
        dict.insert("identifier".to_string(), Value::String("1".to_string()));

        match VacationSpot::from_dictionary(3, &dict) {
            Err(CatalogueError::TypeMismatch { index, key, expected }) => {
                assert_eq!(index, 3);
                assert_eq!(key, "identifier");
                assert_eq!(expected, "integer");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
