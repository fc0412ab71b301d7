use log::info;

use crate::app_response::AppResponse;
use crate::catalogue::{load_catalogue, Catalogue, ResourceBundle};
use crate::config::CoreConfig;
use crate::rating_store::RatingStore;
use crate::spot_detail::SpotDetail;
use crate::vacation_spot::VacationSpot;

/// Everything the UI shell needs for one session: the catalogue, loaded once,
/// and the open rating store.
pub struct CoreState {
    catalogue: Catalogue,
    ratings: RatingStore,
}

impl CoreState {
    /// Loads the catalogue and opens the rating store.
    ///
    /// # Panics
    ///
    /// Panics when the bundled catalogue resource is missing, see
    /// [`load_catalogue`].
    pub fn init(config: &CoreConfig) -> Result<Self, AppResponse> {
        let bundle = ResourceBundle::new(&config.resource_dir);
        let catalogue = load_catalogue(&bundle, &config.catalogue_name);
        let ratings = RatingStore::open(&config.settings_path, config.map_size)?;

        info!("Core initialised with {} spots", catalogue.len());
        Ok(Self { catalogue, ratings })
    }

    pub fn from_parts(catalogue: Catalogue, ratings: RatingStore) -> Self {
        Self { catalogue, ratings }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn spot(&self, identifier: i64) -> Result<&VacationSpot, AppResponse> {
        self.catalogue
            .find(identifier)
            .ok_or_else(|| AppResponse::NotFound(format!("No spot with identifier {identifier}")))
    }

    pub fn spot_detail(&self, identifier: i64) -> Result<SpotDetail, AppResponse> {
        let spot = self.spot(identifier)?;
        let own_rating = self.ratings.rating(identifier)?;
        let hide_weather_info = self.ratings.hide_weather_info()?;
        Ok(SpotDetail::new(spot, own_rating, hide_weather_info))
    }

    /// User ratings of every rated spot, in catalogue order.
    pub fn rated_spots(&self) -> Result<Vec<(i64, u8)>, AppResponse> {
        self.ratings
            .ratings(self.catalogue.iter().map(VacationSpot::identifier))
    }

    pub fn close(self) -> Result<(), AppResponse> {
        self.ratings.close()
    }
}
