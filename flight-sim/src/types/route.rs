use std::f64::consts::PI;

use super::airport::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this, `sin(d)` is treated as zero and the interpolation weights are undefined.
const DEGENERATE_SIN: f64 = 1e-12;

/// Angular distance in radians between two points, from the spherical law of cosines.
///
/// Returns NaN when rounding pushes the cosine outside `[-1, 1]`.
pub fn angular_distance(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let lat2 = destination.latitude.to_radians();
    let lon2 = destination.longitude.to_radians();

    (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos()).acos()
}

/// Builds `points + 1` waypoints along the great circle from `origin` to
/// `destination`, both endpoints included.
///
/// Returns an empty route when the path is undefined: coincident or
/// antipodal endpoints, a NaN distance, or zero segments.
pub fn great_circle_route(origin: GeoPoint, destination: GeoPoint, points: usize) -> Vec<GeoPoint> {
    if points == 0 {
        return Vec::new();
    }

    let dist = angular_distance(origin, destination);
    let sin_dist = dist.sin();
    if dist.is_nan() || sin_dist.abs() < DEGENERATE_SIN {
        return Vec::new();
    }

    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let lat2 = destination.latitude.to_radians();
    let lon2 = destination.longitude.to_radians();

    let mut route = Vec::with_capacity(points + 1);
    for i in 0..=points {
        let f = i as f64 / points as f64;
        let a = ((1.0 - f) * dist).sin() / sin_dist;
        let b = (f * dist).sin() / sin_dist;

        let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
        let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
        let z = a * lat1.sin() + b * lat2.sin();

        let point = GeoPoint::new(
            z.atan2((x * x + y * y).sqrt()).to_degrees(),
            y.atan2(x).to_degrees(),
        );
        if !point.is_finite() {
            return Vec::new();
        }
        route.push(point);
    }

    route
}

/// Initial bearing from `from` to `to`, in degrees within `[0, 360)`.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let bearing = y.atan2(x).to_degrees();

    (bearing + 360.0) % 360.0
}

/// Great-circle distance in kilometres.
pub fn haversine_distance(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let origin_lat_rad = origin.latitude * PI / 180.0;
    let dest_lat_rad = destination.latitude * PI / 180.0;

    let delta_lat = dest_lat_rad - origin_lat_rad;
    let delta_lon = (destination.longitude - origin.longitude) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + origin_lat_rad.cos() * dest_lat_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
