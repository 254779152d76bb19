//! User location resolution for the navbar's location button.
//!
//! This module turns "where is the user" into a display string, never an
//! error: every failure mode maps to a fixed label so the navbar always has
//! something sensible to show. The moving parts are injected through small
//! traits ([`Environment`] for transport security and build mode,
//! [`PositionSource`] for device coordinates, [`ReverseGeocoder`] for
//! coordinates to place name) so every branch is testable without a network
//! or a real position fix.
//!
//! The concrete wiring uses IP geolocation via [IpApi](https://ip-api.com/)
//! for positions and OpenCage for the reverse lookup.

use ipgeolocate::{Locator, Service};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

const GEOLOCATION_NOT_SUPPORTED: &str = "Geolocation not supported";
const LOCATION_DETECTED: &str = "Location detected";
const LOCATION_NOT_AVAILABLE: &str = "Location not available";
const HTTPS_REQUIRED: &str = "HTTPS required for location";
const ACCESS_DENIED: &str = "Location access denied";
const LOCATION_UNAVAILABLE: &str = "Location unavailable";
const REQUEST_TIMED_OUT: &str = "Request timed out";
const CLICK_TO_DETECT: &str = "Click to detect location";

/// A position fix in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Options for a position request, mirroring what device geolocation APIs
/// accept.
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    /// A coarse fix is acceptable when false.
    pub high_accuracy: bool,
    /// Give up on the position request after this long.
    pub timeout: Duration,
    /// Cached fixes younger than this are acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

/// Why a position request failed, as a tagged variant rather than free text.
///
/// Classification happens once, inside the [`PositionSource`] adapter;
/// everything above it switches on the variant only.
#[derive(Debug, Clone, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("position request timed out")]
    Timeout,
    #[error("geolocation requires a secure origin")]
    InsecureOrigin,
    #[error("{0}")]
    Other(String),
}

/// Runtime signals that gate the simulated-location fallback.
pub trait Environment {
    fn is_secure_context(&self) -> bool;
    fn is_development(&self) -> bool;
}

/// Source of device coordinates.
pub trait PositionSource {
    /// Whether the host environment offers geolocation at all.
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

/// Converts coordinates into a displayable place name.
///
/// `Ok(None)` means the lookup worked but offered nothing usable; that is a
/// valid outcome, not an error.
pub trait ReverseGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> color_eyre::Result<Option<String>>;
}

/// Tuning for [`resolve_location`], derived from configuration.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub position: PositionOptions,
    /// City name returned by the simulated-fix path.
    pub simulated_city: String,
    /// How long the simulated path takes to "resolve".
    pub simulated_delay: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            position: PositionOptions::default(),
            simulated_city: "Dubai".to_string(),
            simulated_delay: Duration::from_millis(1000),
        }
    }
}

/// Resolves a display label for the user's location.
///
/// Always returns a string: a place name on the happy path, otherwise one of
/// the fixed status labels. The mapping is exhaustive; no outcome leaves the
/// caller without a terminal value to show.
pub async fn resolve_location<E, P, G>(
    environment: &E,
    positions: &P,
    geocoder: &G,
    settings: &ResolverSettings,
) -> String
where
    E: Environment,
    P: PositionSource,
    G: ReverseGeocoder,
{
    // Local debug runs have no secure transport to satisfy a geolocation
    // grant; simulate a fix so the rest of the flow stays exercisable.
    if !environment.is_secure_context() && environment.is_development() {
        tokio::time::sleep(settings.simulated_delay).await;
        info!("Simulated location fix: {}", settings.simulated_city);
        return settings.simulated_city.clone();
    }

    if !positions.is_supported() {
        warn!("Geolocation is not supported in this environment");
        return GEOLOCATION_NOT_SUPPORTED.to_string();
    }

    match positions.current_position(settings.position).await {
        Ok(coords) => match geocoder.reverse(coords.latitude, coords.longitude).await {
            Ok(Some(name)) => {
                info!("Resolved location: {}", name);
                name
            }
            Ok(None) => LOCATION_DETECTED.to_string(),
            Err(e) => {
                error!("Reverse geocoding failed: {e}");
                LOCATION_NOT_AVAILABLE.to_string()
            }
        },
        Err(err) => {
            warn!("Position request failed: {err}");
            match err {
                GeolocationError::InsecureOrigin => HTTPS_REQUIRED,
                GeolocationError::PermissionDenied => ACCESS_DENIED,
                GeolocationError::PositionUnavailable => LOCATION_UNAVAILABLE,
                GeolocationError::Timeout => REQUEST_TIMED_OUT,
                GeolocationError::Other(_) => CLICK_TO_DETECT,
            }
            .to_string()
        }
    }
}

/// Transport security and build mode of the running process.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeEnvironment {
    secure_transport: bool,
    development: bool,
}

impl RuntimeEnvironment {
    /// Secure transport comes from configuration; development mode follows
    /// the build profile.
    pub fn detect(secure_transport: bool) -> Self {
        Self {
            secure_transport,
            development: cfg!(debug_assertions),
        }
    }
}

impl Environment for RuntimeEnvironment {
    fn is_secure_context(&self) -> bool {
        self.secure_transport
    }

    fn is_development(&self) -> bool {
        self.development
    }
}

/// Position source backed by IP geolocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct IpPositionSource;

impl PositionSource for IpPositionSource {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        // Using IpApi as the service, it's pretty reliable. An IP fix is
        // inherently coarse, so the accuracy and max-age options are moot
        // here; the timeout still applies.
        let lookup = Locator::get("1.1.1.1", Service::IpApi);
        match tokio::time::timeout(options.timeout, lookup).await {
            Err(_) => Err(GeolocationError::Timeout),
            Ok(Err(e)) => {
                error!("Error using geolocation service: {}", e);
                Err(GeolocationError::PositionUnavailable)
            }
            Ok(Ok(loc)) => match (loc.latitude.parse::<f64>(), loc.longitude.parse::<f64>()) {
                (Ok(latitude), Ok(longitude)) => {
                    info!("Geolocation successful - ({}, {})", latitude, longitude);
                    Ok(Coordinates {
                        latitude,
                        longitude,
                    })
                }
                _ => {
                    error!("Geolocation service returned unparseable coordinates");
                    Err(GeolocationError::PositionUnavailable)
                }
            },
        }
    }
}
