mod panel;

pub use panel::{MapPanel, MarkerKind};

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::errors::RoutingError;
use crate::geometry::{haversine, EARTH_RADIUS_KM};


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TransportMode {

    /// Nominal speed used for straight-line time estimates
    pub fn speed_kmh(&self) -> f64 {
        match self {
            TransportMode::Walking => 5.0,
            TransportMode::Cycling => 15.0,
            TransportMode::Driving => 40.0,
        }
    }

    /// Profile name understood by the routing service
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

/// Unknown names fall back to driving
impl FromStr for TransportMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "walking" => TransportMode::Walking,
            "cycling" => TransportMode::Cycling,
            _ => TransportMode::Driving,
        })
    }
}


/// Geographic point in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine(self.lat, self.lng, other.lat, other.lng, EARTH_RADIUS_KM)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}


/// Route as returned by the routing service
#[derive(Clone, Debug, PartialEq)]
pub struct RoutedPath {
    pub polyline: Vec<GeoPoint>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// External routing service
pub trait Router {
    fn route(&self, start: GeoPoint, end: GeoPoint, mode: TransportMode) -> Result<RoutedPath, RoutingError>;
}


#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Routed(RoutedPath),
    /// Straight line between the two points with a speed based time
    Estimated {
        polyline: Vec<GeoPoint>,
        distance_km: f64,
        duration_min: u64,
    },
}

impl Route {

    pub fn polyline(&self) -> &[GeoPoint] {
        match self {
            Route::Routed(path) => &path.polyline,
            Route::Estimated { polyline, .. } => polyline,
        }
    }

    pub fn is_estimate(&self) -> bool {
        matches!(self, Route::Estimated { .. })
    }

    /// Distance text as shown in the panel
    pub fn distance_text(&self) -> String {
        match self {
            Route::Routed(path) => format!("{:.2} km", path.distance_m / 1000.0),
            Route::Estimated { distance_km, .. } => format!("{distance_km:.2} km (direct)"),
        }
    }

    /// Duration text as shown in the panel
    pub fn duration_text(&self) -> String {
        match self {
            Route::Routed(path) => format!("{} min", (path.duration_s / 60.0).round() as u64),
            Route::Estimated { duration_min, .. } => format!("{duration_min} min (estimated)"),
        }
    }
}


/// Straight-line estimate between two points
pub fn estimate_route(start: GeoPoint, end: GeoPoint, mode: TransportMode) -> Route {
    let distance_km = start.distance_km(&end);
    let duration_min = (distance_km / mode.speed_kmh() * 60.0).round() as u64;

    Route::Estimated {
        polyline: vec![start, end],
        distance_km,
        duration_min,
    }
}

/// Ask the router, fall back to the straight-line estimate if it fails
/// The caller always gets a distance and a time
pub fn plan_route<R>(router: &R, start: GeoPoint, end: GeoPoint, mode: TransportMode) -> Route
where
    R: Router + ?Sized,
{
    match router.route(start, end, mode) {
        Ok(path) => Route::Routed(path),
        Err(error) => {
            warn!(%error, %start, %end, %mode, "routing failed, using straight-line estimate");
            estimate_route(start, end, mode)
        }
    }
}
