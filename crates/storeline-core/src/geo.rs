//! # Geo Utility
//!
//! Distance math for the "stores within 30 miles" view.
//!
//! The distance is the Euclidean norm of the coordinate deltas, not a
//! great-circle distance. Stored coordinates live on a 0..100 grid and
//! existing data was curated against this formula, so it must not change.

use crate::types::{Coordinates, StoreLocation};

/// Planar distance between two coordinate pairs.
///
/// ## Example
/// ```rust
/// use storeline_core::geo::distance;
///
/// assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
/// ```
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat1 - lat2;
    let d_lon = lon1 - lon2;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

/// True when `b` is at most `radius` away from `a`. The bound is inclusive.
pub fn within_radius(a: Coordinates, b: Coordinates, radius: f64) -> bool {
    a.distance_to(&b) <= radius
}

/// Keeps the stores within `radius` of `origin`, preserving input order.
pub fn stores_within(
    origin: Coordinates,
    stores: impl IntoIterator<Item = StoreLocation>,
    radius: f64,
) -> Vec<StoreLocation> {
    stores
        .into_iter()
        .filter(|store| within_radius(origin, store.coordinates, radius))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 3.0, 4.0)]
    #[case(10.0, 10.0, 40.5, 99.25)]
    #[case(-5.5, 12.0, 7.0, -3.0)]
    fn test_distance_is_symmetric(
        #[case] lat1: f64,
        #[case] lon1: f64,
        #[case] lat2: f64,
        #[case] lon2: f64,
    ) {
        assert_eq!(
            distance(lat1, lon1, lat2, lon2),
            distance(lat2, lon2, lat1, lon1)
        );
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(42.0, 17.5)]
    fn test_distance_to_self_is_zero(#[case] lat: f64, #[case] lon: f64) {
        assert_eq!(distance(lat, lon, lat, lon), 0.0);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let origin = Coordinates::new(10.0, 10.0);
        assert!(within_radius(origin, Coordinates::new(10.0, 40.0), 30.0));
        assert!(!within_radius(origin, Coordinates::new(10.0, 40.0001), 30.0));
    }

    #[test]
    fn test_stores_within_keeps_order() {
        let origin = Coordinates::new(0.0, 0.0);
        let stores = vec![
            StoreLocation {
                store_id: 3,
                coordinates: Coordinates::new(1.0, 1.0),
            },
            StoreLocation {
                store_id: 1,
                coordinates: Coordinates::new(90.0, 90.0),
            },
            StoreLocation {
                store_id: 2,
                coordinates: Coordinates::new(0.0, 30.0),
            },
        ];

        let ids: Vec<i64> = stores_within(origin, stores, 30.0)
            .into_iter()
            .map(|s| s.store_id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
