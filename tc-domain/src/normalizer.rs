use crate::{
    CelestialBody, CommodityQuote, Coordinates, PadSize, RawBodiesPayload, RawBody, RawCommodity, RawCoords, RawStation, RawSystemPayload, Station,
    SystemBodies, SystemSnapshot,
};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::debug;

pub const UNKNOWN_COMMODITY_NAME: &str = "Unknown";

pub fn normalize(raw: RawSystemPayload) -> SystemSnapshot {
    normalize_at(raw, Utc::now())
}

/// Never fails. Whatever can't be used is dropped, so a sparse payload becomes a sparse snapshot.
pub fn normalize_at(raw: RawSystemPayload, fetched_at: DateTime<Utc>) -> SystemSnapshot {
    let RawSystemPayload {
        name,
        coords,
        information,
        stations,
    } = raw;

    let raw_stations = stations.unwrap_or_default();
    let num_raw_stations = raw_stations.len();
    let stations = raw_stations.into_iter().filter_map(to_station).collect_vec();

    if stations.len() < num_raw_stations {
        debug!(
            system = name.as_str(),
            dropped = num_raw_stations - stations.len(),
            "dropped stations without name or usable landing pad size"
        );
    }

    let information = information.unwrap_or_default();

    SystemSnapshot {
        name,
        economy: information.economy,
        government: information.government,
        security: information.security,
        population: information.population,
        coordinates: coords.and_then(to_coordinates),
        stations,
        fetched_at,
    }
}

fn to_station(raw: RawStation) -> Option<Station> {
    match (raw.name, raw.max_landing_pad_size.and_then(|size| PadSize::try_from(size).ok())) {
        (Some(name), Some(max_pad_size)) => Some(Station {
            name,
            max_pad_size,
            commodities: raw.commodities.unwrap_or_default().into_iter().map(to_commodity_quote).collect_vec(),
        }),
        _ => None,
    }
}

fn to_commodity_quote(raw: RawCommodity) -> CommodityQuote {
    CommodityQuote {
        name: raw.name.unwrap_or_else(|| UNKNOWN_COMMODITY_NAME.to_string()),
        station_buy_price: raw.buy_price,
        station_sell_price: raw.sell_price,
    }
}

fn to_coordinates(raw: RawCoords) -> Option<Coordinates> {
    match (raw.x, raw.y, raw.z) {
        (Some(x), Some(y), Some(z)) => Some(Coordinates { x, y, z }),
        _ => None,
    }
}

pub fn normalize_bodies(raw: RawBodiesPayload) -> SystemBodies {
    let raw_bodies = raw.bodies.unwrap_or_default();
    let num_raw_bodies = raw_bodies.len();

    let bodies = raw_bodies
        .into_iter()
        .filter_map(to_celestial_body)
        .sorted_by(|a, b| compare_distance_to_arrival(a.distance_to_arrival_ls, b.distance_to_arrival_ls))
        .collect_vec();

    if bodies.len() < num_raw_bodies {
        debug!(system = raw.name.as_deref(), dropped = num_raw_bodies - bodies.len(), "dropped unnamed bodies");
    }

    SystemBodies {
        system_name: raw.name,
        bodies,
    }
}

fn to_celestial_body(raw: RawBody) -> Option<CelestialBody> {
    let name = raw.name?;
    Some(CelestialBody {
        name,
        body_type: raw.body_type,
        sub_type: raw.sub_type,
        distance_to_arrival_ls: raw.distance_to_arrival,
        is_landable: raw.is_landable,
        gravity: raw.gravity,
        earth_masses: raw.earth_masses,
        radius_km: raw.radius,
        surface_temperature_k: raw.surface_temperature,
    })
}

// unknown distances go last
fn compare_distance_to_arrival(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawInformation;
    use chrono::TimeZone;
    use test_log::test;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(3310, 5, 1, 12, 0, 0).unwrap()
    }

    fn raw_commodity(name: &str, buy_price: Option<i64>, sell_price: Option<i64>) -> RawCommodity {
        RawCommodity {
            name: Some(name.to_string()),
            buy_price,
            sell_price,
        }
    }

    fn raw_station(name: Option<&str>, pad_size: Option<i64>, commodities: Vec<RawCommodity>) -> RawStation {
        RawStation {
            name: name.map(|n| n.to_string()),
            max_landing_pad_size: pad_size,
            commodities: Some(commodities),
        }
    }

    #[test]
    fn normalizes_complete_payload() {
        let raw = RawSystemPayload {
            name: "LHS 3447".to_string(),
            coords: Some(RawCoords {
                x: Some(-43.1875),
                y: Some(-5.28125),
                z: Some(56.15625),
            }),
            information: Some(RawInformation {
                economy: Some("Industrial".to_string()),
                government: Some("Corporate".to_string()),
                security: Some("Medium".to_string()),
                population: Some(4_200_000_000),
            }),
            stations: Some(vec![raw_station(
                Some("Worlidge Terminal"),
                Some(3),
                vec![raw_commodity("Gold", Some(9_000), Some(9_500))],
            )]),
        };

        let snapshot = normalize_at(raw, fixed_time());

        assert_eq!(snapshot.name, "LHS 3447");
        assert_eq!(snapshot.economy.as_deref(), Some("Industrial"));
        assert_eq!(snapshot.population, Some(4_200_000_000));
        assert_eq!(
            snapshot.coordinates,
            Some(Coordinates {
                x: -43.1875,
                y: -5.28125,
                z: 56.15625
            })
        );
        assert_eq!(snapshot.fetched_at, fixed_time());
        assert_eq!(
            snapshot.stations,
            vec![Station {
                name: "Worlidge Terminal".to_string(),
                max_pad_size: PadSize::Large,
                commodities: vec![CommodityQuote {
                    name: "Gold".to_string(),
                    station_buy_price: Some(9_000),
                    station_sell_price: Some(9_500),
                }],
            }]
        );
    }

    #[test]
    fn drops_station_without_pad_size_regardless_of_commodities() {
        let commodities = (0..25).map(|i| raw_commodity(&format!("Commodity {i}"), Some(100), Some(90))).collect_vec();

        let raw = RawSystemPayload {
            name: "Diaguandri".to_string(),
            coords: None,
            information: None,
            stations: Some(vec![
                raw_station(Some("Ray Gateway"), None, commodities),
                raw_station(Some("Zhen Dock"), Some(2), vec![]),
            ]),
        };

        let snapshot = normalize_at(raw, fixed_time());

        assert_eq!(snapshot.stations.iter().map(|s| s.name.as_str()).collect_vec(), vec!["Zhen Dock"]);
    }

    #[test]
    fn drops_station_without_name_or_with_invalid_pad_size() {
        let raw = RawSystemPayload {
            name: "Diaguandri".to_string(),
            coords: None,
            information: None,
            stations: Some(vec![
                raw_station(None, Some(3), vec![]),
                raw_station(Some("Zero Pad"), Some(0), vec![]),
                raw_station(Some("Huge Pad"), Some(4), vec![]),
                raw_station(Some("Small Pad"), Some(1), vec![]),
            ]),
        };

        let snapshot = normalize_at(raw, fixed_time());

        assert_eq!(snapshot.stations.len(), 1);
        assert_eq!(snapshot.stations[0].max_pad_size, PadSize::Small);
    }

    #[test]
    fn keeps_missing_prices_absent_and_defaults_missing_names() {
        let raw = RawSystemPayload {
            name: "Sol".to_string(),
            coords: None,
            information: None,
            stations: Some(vec![raw_station(
                Some("Abraham Lincoln"),
                Some(3),
                vec![
                    RawCommodity {
                        name: None,
                        buy_price: Some(12),
                        sell_price: None,
                    },
                    raw_commodity("Tea", None, Some(0)),
                ],
            )]),
        };

        let snapshot = normalize_at(raw, fixed_time());
        let commodities = &snapshot.stations[0].commodities;

        assert_eq!(commodities[0].name, UNKNOWN_COMMODITY_NAME);
        assert_eq!(commodities[0].station_buy_price, Some(12));
        assert_eq!(commodities[0].station_sell_price, None);
        assert_eq!(commodities[1].station_buy_price, None);
        assert_eq!(commodities[1].station_sell_price, Some(0));
    }

    #[test]
    fn omits_coordinates_when_any_axis_is_missing() {
        let raw = RawSystemPayload {
            name: "Sol".to_string(),
            coords: Some(RawCoords {
                x: Some(0.0),
                y: None,
                z: Some(0.0),
            }),
            information: None,
            stations: None,
        };

        assert_eq!(normalize_at(raw, fixed_time()).coordinates, None);
    }

    #[test]
    fn degrades_null_stations_to_empty_snapshot() {
        let raw: RawSystemPayload = serde_json::from_str(r#"{"name":"Sol","stations":null}"#).unwrap();

        let snapshot = normalize_at(raw, fixed_time());

        assert_eq!(snapshot.name, "Sol");
        assert!(snapshot.stations.is_empty());
        assert_eq!(snapshot.economy, None);
        assert_eq!(snapshot.government, None);
        assert_eq!(snapshot.security, None);
        assert_eq!(snapshot.population, None);
        assert_eq!(snapshot.coordinates, None);
    }

    #[test]
    fn normalizes_bodies_sorted_by_distance_with_unknown_last() {
        let body = |name: Option<&str>, distance: Option<f64>| RawBody {
            name: name.map(|n| n.to_string()),
            distance_to_arrival: distance,
            ..Default::default()
        };

        let raw = RawBodiesPayload {
            id: Some(27),
            name: Some("Sol".to_string()),
            bodies: Some(vec![
                body(Some("Mystery"), None),
                body(Some("Earth"), Some(499.0)),
                body(None, Some(1.0)),
                body(Some("Sol"), Some(0.0)),
                body(Some("Mars"), Some(760.0)),
            ]),
        };

        let bodies = normalize_bodies(raw);

        assert_eq!(bodies.system_name.as_deref(), Some("Sol"));
        assert_eq!(
            bodies.bodies.iter().map(|b| b.name.as_str()).collect_vec(),
            vec!["Sol", "Earth", "Mars", "Mystery"]
        );
    }

    #[test]
    fn normalizes_missing_bodies_to_empty_list() {
        assert_eq!(normalize_bodies(RawBodiesPayload::default()), SystemBodies::default());
    }
}
