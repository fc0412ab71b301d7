//! Loading the bundled vacation spot catalogue.
//!
//! The catalogue ships with the application as a property list: an array of
//! dictionaries, one per [`VacationSpot`]. Loading follows a two-tier policy:
//!
//! - A missing or unreadable resource, or a record with an invalid Wikipedia
//!   URL, is a packaging mistake and panics. Release builds are compiled with
//!   `panic = 'abort'`, so the process terminates.
//! - Any other decode failure is logged and the whole catalogue is discarded.
//!   A single malformed record never yields a partial catalogue.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use log::{error, info};
use plist::Value;

use crate::vacation_spot::VacationSpot;

/// File extension of bundled catalogue resources.
pub const RESOURCE_EXTENSION: &str = "plist";

#[derive(Debug)]
pub enum CatalogueError {
    /// The resource file does not exist or could not be read.
    ResourceNotFound(String),
    /// The bytes are not a property list.
    Malformed(String),
    /// The property list root is not an array.
    NotAnArray,
    /// A catalogue entry is not a dictionary.
    NotADictionary { index: usize },
    MissingField { index: usize, key: &'static str },
    TypeMismatch {
        index: usize,
        key: &'static str,
        expected: &'static str,
    },
    DuplicateIdentifier(i64),
    InvalidUrl(String),
}

impl CatalogueError {
    /// Whether the error must terminate the process instead of degrading to
    /// an empty catalogue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CatalogueError::ResourceNotFound(_) | CatalogueError::InvalidUrl(_)
        )
    }
}

impl Display for CatalogueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogueError::ResourceNotFound(msg) => write!(f, "Resource not found: {}", msg),
            CatalogueError::Malformed(msg) => write!(f, "Malformed property list: {}", msg),
            CatalogueError::NotAnArray => write!(f, "Expected an array of vacation spots"),
            CatalogueError::NotADictionary { index } => {
                write!(f, "Entry {} is not a dictionary", index)
            }
            CatalogueError::MissingField { index, key } => {
                write!(f, "Entry {} is missing key '{}'", index, key)
            }
            CatalogueError::TypeMismatch { index, key, expected } => {
                write!(f, "Entry {} has a non-{} value for key '{}'", index, expected, key)
            }
            CatalogueError::DuplicateIdentifier(id) => {
                write!(f, "Identifier {} appears more than once", id)
            }
            CatalogueError::InvalidUrl(link) => write!(f, "Invalid Wikipedia URL: {}", link),
        }
    }
}

impl std::error::Error for CatalogueError {}

impl From<plist::Error> for CatalogueError {
    fn from(err: plist::Error) -> Self {
        CatalogueError::Malformed(err.to_string())
    }
}

/// Directory holding the application's bundled resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the plist resource called `name`.
    pub fn path_for_resource(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{RESOURCE_EXTENSION}"))
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, CatalogueError> {
        let path = self.path_for_resource(name);
        std::fs::read(&path)
            .map_err(|e| CatalogueError::ResourceNotFound(format!("{}: {e}", path.display())))
    }
}

/// The ordered, immutable set of spots for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    spots: Vec<VacationSpot>,
}

impl Catalogue {
    pub fn spots(&self) -> &[VacationSpot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VacationSpot> {
        self.spots.iter()
    }

    /// Spot shown at `row` of the list.
    pub fn get(&self, row: usize) -> Option<&VacationSpot> {
        self.spots.get(row)
    }

    pub fn find(&self, identifier: i64) -> Option<&VacationSpot> {
        self.spots.iter().find(|spot| spot.identifier() == identifier)
    }

    pub fn into_vec(self) -> Vec<VacationSpot> {
        self.spots
    }
}

impl From<Vec<VacationSpot>> for Catalogue {
    fn from(spots: Vec<VacationSpot>) -> Self {
        Self { spots }
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a VacationSpot;
    type IntoIter = std::slice::Iter<'a, VacationSpot>;

    fn into_iter(self) -> Self::IntoIter {
        self.spots.iter()
    }
}

/// Loads the catalogue resource `resource_name` from `bundle`.
///
/// # Panics
///
/// Panics if the resource cannot be read or a record carries an invalid
/// Wikipedia URL. Every other decode error is logged and produces an empty
/// catalogue.
pub fn load_catalogue(bundle: &ResourceBundle, resource_name: &str) -> Catalogue {
    let data = match bundle.read(resource_name) {
        Ok(data) => data,
        Err(e) => panic!(
            "An error occurred while reading {resource_name}.{RESOURCE_EXTENSION}: {e}"
        ),
    };

    match decode_catalogue(&data) {
        Ok(spots) => {
            info!("Loaded {} vacation spots from {}", spots.len(), resource_name);
            Catalogue::from(spots)
        }
        Err(e) if e.is_fatal() => panic!("{e}"),
        Err(e) => {
            error!("Couldn't load vacation spots: {e}");
            Catalogue::default()
        }
    }
}

/// Decodes a catalogue from XML or binary plist bytes.
///
/// Decoding is all-or-nothing: the first bad record fails the whole call.
pub fn decode_catalogue(data: &[u8]) -> Result<Vec<VacationSpot>, CatalogueError> {
    let root = Value::from_reader(Cursor::new(data))?;
    let entries = root.as_array().ok_or(CatalogueError::NotAnArray)?;

    let mut seen = HashSet::with_capacity(entries.len());
    let mut spots = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let dict = entry
            .as_dictionary()
            .ok_or(CatalogueError::NotADictionary { index })?;
        let spot = VacationSpot::from_dictionary(index, dict)?;

        if !seen.insert(spot.identifier()) {
            return Err(CatalogueError::DuplicateIdentifier(spot.identifier()));
        }
        spots.push(spot);
    }

    Ok(spots)
}

/// Encodes spots as an XML plist using the same field map as decoding.
pub fn encode_catalogue(spots: &[VacationSpot]) -> Result<Vec<u8>, CatalogueError> {
    let root = Value::Array(
        spots
            .iter()
            .map(|spot| Value::Dictionary(spot.to_dictionary()))
            .collect(),
    );

    let mut buffer = Vec::new();
    root.to_writer_xml(&mut buffer)?;
    Ok(buffer)
}
