//! Great-circle distances and proximity filtering.

use crate::domain::{Coordinate, NearbyStation, Station};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default radius of the nearby-stations list, in kilometres.
pub const NEARBY_RADIUS_KM: f64 = 3.0;

/// Haversine distance between two points, in kilometres.
///
/// # Examples
///
/// ```
/// use bike_server::domain::Coordinate;
/// use bike_server::geo::haversine_km;
///
/// let taipei_101 = Coordinate::new(25.0330, 121.5654);
/// assert_eq!(haversine_km(taipei_101, taipei_101), 0.0);
/// ```
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

impl Coordinate {
    /// Haversine distance to `other`, in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Stations within `radius_km` of `origin`, closest first.
///
/// Stations with invalid coordinates are skipped. Equal distances keep
/// their snapshot order. The input is never modified.
pub fn nearby(stations: &[Station], origin: Coordinate, radius_km: f64) -> Vec<NearbyStation> {
    let mut found: Vec<NearbyStation> = stations
        .iter()
        .filter(|s| s.is_valid())
        .filter_map(|s| {
            let distance_km = origin.distance_km(&s.coordinate);
            (distance_km <= radius_km).then(|| NearbyStation {
                station: s.clone(),
                distance_km,
            })
        })
        .collect();

    // sort_by is stable
    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationId, StationStatus};

    const ORIGIN: Coordinate = Coordinate::new(25.0330, 121.5654);

    fn station_at(id: &str, coordinate: Coordinate) -> Station {
        Station {
            id: StationId::new(id),
            name: format!("Station {id}"),
            address: String::new(),
            area: String::new(),
            total_slots: 10,
            available_bikes: 5,
            available_slots: 5,
            coordinate,
            updated_at: String::new(),
            status: StationStatus::Active,
        }
    }

    /// A point `km` kilometres due north of `ORIGIN`.
    fn north_of_origin(km: f64) -> Coordinate {
        let d_lat = (km / EARTH_RADIUS_KM).to_degrees();
        Coordinate::new(ORIGIN.latitude + d_lat, ORIGIN.longitude)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(ORIGIN, ORIGIN).abs() < 1e-9);
    }

    #[test]
    fn known_distance() {
        // Taipei Main Station to Taipei 101 is roughly 5.1 km.
        let main_station = Coordinate::new(25.0478, 121.5170);
        let d = haversine_km(main_station, ORIGIN);
        assert!((d - 5.13).abs() < 0.2, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let other = Coordinate::new(24.9, 121.3);
        let d1 = ORIGIN.distance_km(&other);
        let d2 = other.distance_km(&ORIGIN);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(nearby(&[], ORIGIN, NEARBY_RADIUS_KM).is_empty());
    }

    #[test]
    fn filters_and_sorts_by_distance() {
        let stations = vec![
            station_at("ten", north_of_origin(10.0)),
            station_at("two_nine", north_of_origin(2.9)),
            station_at("three_one", north_of_origin(3.1)),
            station_at("half", north_of_origin(0.5)),
        ];

        let result = nearby(&stations, ORIGIN, NEARBY_RADIUS_KM);
        let ids: Vec<&str> = result.iter().map(|n| n.station.id.as_str()).collect();
        assert_eq!(ids, vec!["half", "two_nine"]);
        assert!((result[0].distance_km - 0.5).abs() < 1e-6);
        assert!((result[1].distance_km - 2.9).abs() < 1e-6);
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let point = north_of_origin(1.0);
        let stations = vec![
            station_at("first", point),
            station_at("closer", north_of_origin(0.2)),
            station_at("second", point),
        ];

        let result = nearby(&stations, ORIGIN, NEARBY_RADIUS_KM);
        let ids: Vec<&str> = result.iter().map(|n| n.station.id.as_str()).collect();
        assert_eq!(ids, vec!["closer", "first", "second"]);
    }

    #[test]
    fn skips_invalid_stations() {
        let stations = vec![
            station_at("bad", Coordinate::new(f64::NAN, 121.5654)),
            station_at("good", ORIGIN),
        ];

        let result = nearby(&stations, ORIGIN, NEARBY_RADIUS_KM);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].station.id.as_str(), "good");
    }

    #[test]
    fn input_is_untouched() {
        let stations = vec![
            station_at("far", north_of_origin(2.0)),
            station_at("near", north_of_origin(1.0)),
        ];
        let before = stations.clone();

        let _ = nearby(&stations, ORIGIN, NEARBY_RADIUS_KM);
        assert_eq!(stations, before);
    }
}
