//! # Vacation Spots Core
//!
//! The data layer of the Vacation Spots mobile app, designed for FFI
//! (Foreign Function Interface) integration with the native UI shell.
//!
//! ## Features
//!
//! - **Bundled catalogue**: the list of vacation spots is decoded once from a
//!   property list shipped with the app
//! - **All-or-nothing loading**: one malformed record discards the catalogue
//!   instead of showing partial data
//! - **Persisted ratings**: per-spot star ratings and the weather display
//!   preference are stored in LMDB
//! - **Explicit refresh**: every setter takes a callback fired after the write
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use vacation_spots_core::{init_core, get_all_spots, set_rating};
//! use std::ffi::CString;
//!
//! let config = r#"{"resource_dir":"resources","settings_path":"spots_settings"}"#;
//! let config = CString::new(config).unwrap();
//! let state = init_core(config.as_ptr());
//!
//! let spots = get_all_spots(state);
//! let result = set_rating(state, 1, 4, None);
//! ```
//!
//! ## FFI Functions
//!
//! - [`init_core`] - Load the catalogue and open the rating store
//! - [`get_all_spots`] - Every spot, in catalogue order
//! - [`get_spot_by_id`] - One spot
//! - [`get_spot_detail`] - Display data for the detail screen
//! - [`get_rating`] / [`set_rating`] / [`remove_rating`] - The user's own rating
//! - [`get_rated_spots`] - Every rated spot
//! - [`get_hide_weather_info`] / [`set_hide_weather_info`] - Display preference
//! - [`close_core`] - Release the handle
//! - [`free_response`] - Free a returned string

pub mod app_response;
pub mod catalogue;
pub mod config;
pub mod core_state;
pub mod rating_store;
pub mod settings;
pub mod spot_detail;
pub mod vacation_spot;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::config::CoreConfig;
use crate::core_state::CoreState;

/// Called after a rating write with the spot identifier and its stored rating.
pub type RatingRefreshCallback = extern "C" fn(identifier: i64, rating: i32);

/// Called after a preference write with the stored value.
pub type WeatherRefreshCallback = extern "C" fn(hide_weather_info: bool);

/// Loads the catalogue and opens the rating store.
///
/// # Parameters
///
/// * `config_ptr` - Null-terminated JSON [`CoreConfig`]; missing keys take
///   their defaults
///
/// # Returns
///
/// A pointer to the [`CoreState`], or null if the configuration is invalid or
/// the settings store cannot be opened. Release it with [`close_core`].
///
/// # Safety
///
/// `config_ptr` must be null or point to a valid null-terminated string that
/// stays alive for the duration of the call.
///
/// # Errors
///
/// Returns null if:
/// - `config_ptr` is null or not valid UTF-8
/// - The JSON is malformed or has unknown keys
/// - The LMDB environment cannot be created at `settings_path`
///
/// # Panics
///
/// A missing catalogue resource is a packaging error and aborts the process.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vacation_spots_core::init_core;
///
/// let config = CString::new(r#"{"settings_path":"spots_settings"}"#).unwrap();
/// let state = init_core(config.as_ptr());
///
/// if !state.is_null() {
///     // Catalogue loaded and store open
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn init_core(config_ptr: *const c_char) -> *mut CoreState {
    if config_ptr.is_null() {
        warn!("Null config pointer passed to init_core");
        return std::ptr::null_mut();
    }

    let config_str = match unsafe { CStr::from_ptr(config_ptr).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    let config = match CoreConfig::from_json(config_str) {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid core configuration: {e}");
            return std::ptr::null_mut();
        }
    };

    match CoreState::init(&config) {
        Ok(state) => {
            info!("✅ Core initialised");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to initialise core: {e}");
            warn!("Attempted settings path: {}", config.settings_path.display());
            std::ptr::null_mut()
        }
    }
}

/// Returns every spot as a JSON array, in catalogue order.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`init_core`]
///
/// # Returns
///
/// A JSON-formatted C string: `Ok` wrapping the array of spots. An empty array
/// means the catalogue failed to decode; the UI should show "no content".
/// Free it with [`free_response`].
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// `BadRequest` for a null `state`.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vacation_spots_core::{free_response, get_all_spots, init_core};
///
/// let config = CString::new("{}").unwrap();
/// let state = init_core(config.as_ptr());
///
/// let spots = get_all_spots(state);
/// free_response(spots);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_spots(state: *mut CoreState) -> *const c_char {
    let state = match state_ref(state, "get_all_spots") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    json_response(state.catalogue().spots())
}

/// Returns the spot with `identifier` as a JSON object.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// - `BadRequest` for a null `state`
/// - `NotFound` if no spot has `identifier`
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_spot_by_id(state: *mut CoreState, identifier: i64) -> *const c_char {
    let state = match state_ref(state, "get_spot_by_id") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    match state.spot(identifier) {
        Ok(spot) => json_response(spot),
        Err(e) => response_to_c_string(&e),
    }
}

/// Returns the detail screen content for `identifier`.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`init_core`]
/// * `identifier` - Spot identifier from the catalogue
///
/// # Returns
///
/// `Ok` wrapping a camelCase JSON [`spot_detail::SpotDetail`], built from the
/// spot, the user's current rating and the weather preference.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// - `BadRequest` for a null `state`
/// - `NotFound` if no spot has `identifier`
/// - `DatabaseError` if the settings store cannot be read
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_spot_detail(state: *mut CoreState, identifier: i64) -> *const c_char {
    let state = match state_ref(state, "get_spot_detail") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    match state.spot_detail(identifier) {
        Ok(detail) => json_response(&detail),
        Err(e) => response_to_c_string(&e),
    }
}

/// Returns the user's rating of `identifier`, `0` when unrated.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// `BadRequest` for a null `state`, `DatabaseError` on LMDB failure.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_rating(state: *mut CoreState, identifier: i64) -> *const c_char {
    let state = match state_ref(state, "get_rating") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    match state.ratings().rating(identifier) {
        Ok(rating) => response_to_c_string(&AppResponse::Ok(rating.to_string())),
        Err(e) => response_to_c_string(&e),
    }
}

/// Stores the user's rating of `identifier`.
///
/// `value` must be within `0..=5`; `0` removes the rating. Out-of-range values
/// return `ValidationError` and leave the stored rating untouched.
/// `on_refresh`, when given, runs after a successful write.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`init_core`]
/// * `identifier` - Spot identifier; it is not checked against the catalogue
/// * `value` - Star count, `0..=5`
/// * `on_refresh` - Optional callback receiving the identifier and stored rating
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// - `BadRequest` for a null `state`
/// - `ValidationError` for a value outside `0..=5`; `on_refresh` is not called
/// - `DatabaseError` if the write fails
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vacation_spots_core::{free_response, init_core, set_rating};
///
/// extern "C" fn rating_changed(identifier: i64, rating: i32) {
///     println!("spot {identifier} now rated {rating}");
/// }
///
/// let config = CString::new("{}").unwrap();
/// let state = init_core(config.as_ptr());
///
/// free_response(set_rating(state, 3, 4, Some(rating_changed)));
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn set_rating(
    state: *mut CoreState,
    identifier: i64,
    value: i64,
    on_refresh: Option<RatingRefreshCallback>,
) -> *const c_char {
    let state = match state_ref(state, "set_rating") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    let result = state.ratings().set_rating(identifier, value, |rating| {
        if let Some(callback) = on_refresh {
            callback(identifier, rating as i32);
        }
    });

    match result {
        Ok(()) => response_to_c_string(&AppResponse::Ok(format!(
            "Rating for spot {identifier} set to {value}"
        ))),
        Err(e) => response_to_c_string(&e),
    }
}

/// Removes the user's rating of `identifier`.
///
/// Same as [`set_rating`] with `0`.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// `BadRequest` for a null `state`, `DatabaseError` if the delete fails.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn remove_rating(
    state: *mut CoreState,
    identifier: i64,
    on_refresh: Option<RatingRefreshCallback>,
) -> *const c_char {
    let state = match state_ref(state, "remove_rating") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    let result = state.ratings().remove_rating(identifier, |rating| {
        if let Some(callback) = on_refresh {
            callback(identifier, rating as i32);
        }
    });

    match result {
        Ok(()) => response_to_c_string(&AppResponse::Ok(format!(
            "Rating for spot {identifier} removed"
        ))),
        Err(e) => response_to_c_string(&e),
    }
}

/// Returns `[[identifier, rating], ...]` for every rated spot, in catalogue order.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_rated_spots(state: *mut CoreState) -> *const c_char {
    let state = match state_ref(state, "get_rated_spots") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    match state.rated_spots() {
        Ok(rated) => json_response(&rated),
        Err(e) => response_to_c_string(&e),
    }
}

/// Returns `"true"` when weather info should be hidden.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// `BadRequest` for a null `state`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_hide_weather_info(state: *mut CoreState) -> *const c_char {
    let state = match state_ref(state, "get_hide_weather_info") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    match state.ratings().hide_weather_info() {
        Ok(hide) => response_to_c_string(&AppResponse::Ok(hide.to_string())),
        Err(e) => response_to_c_string(&e),
    }
}

/// Stores the weather display preference.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`init_core`]
/// * `hide` - New preference
/// * `on_refresh` - Optional callback receiving the stored value
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`init_core`] that has
/// not been passed to [`close_core`].
///
/// # Errors
///
/// `BadRequest` for a null `state`, `DatabaseError` if the write fails.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn set_hide_weather_info(
    state: *mut CoreState,
    hide: bool,
    on_refresh: Option<WeatherRefreshCallback>,
) -> *const c_char {
    let state = match state_ref(state, "set_hide_weather_info") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };

    let result = state.ratings().set_hide_weather_info(hide, |stored| {
        if let Some(callback) = on_refresh {
            callback(stored);
        }
    });

    match result {
        Ok(()) => response_to_c_string(&AppResponse::Ok(hide.to_string())),
        Err(e) => response_to_c_string(&e),
    }
}

/// Closes the rating store and frees the handle.
///
/// # Safety
///
/// `state` must be null or a pointer returned by [`init_core`]. It is freed
/// here and must not be used afterwards, including a second `close_core`.
///
/// # Errors
///
/// `BadRequest` for a null `state`, `DatabaseError` if the final sync fails.
/// The handle is freed either way.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_core(state: *mut CoreState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_core".to_string());
        return response_to_c_string(&error);
    }

    let state = unsafe { Box::from_raw(state) };

    match state.close() {
        Ok(()) => {
            let success = AppResponse::Ok("Core closed successfully".to_string());
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Frees a string returned by any function of this library.
///
/// # Safety
///
/// `ptr` must be null or a string returned by this library that has not
/// been freed yet.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn state_ref<'a>(state: *mut CoreState, caller: &str) -> Result<&'a CoreState, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(state) => Ok(state),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Serialises `value` and wraps it in an `Ok` response.
fn json_response<T: Serialize + ?Sized>(value: &T) -> *const c_char {
    match serde_json::to_string(value) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error serializing to JSON: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Converts an [`AppResponse`] to a C string owned by the caller.
///
/// Returns null if serialisation or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}
