use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSystemPayload {
    pub name: String,
    pub coords: Option<RawCoords>,
    pub information: Option<RawInformation>,
    pub stations: Option<Vec<RawStation>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawCoords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawInformation {
    pub economy: Option<String>,
    pub government: Option<String>,
    pub security: Option<String>,
    pub population: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawStation {
    pub name: Option<String>,
    pub max_landing_pad_size: Option<i64>,
    pub commodities: Option<Vec<RawCommodity>>,
}

/// `buy_price` is what the station pays the player, `sell_price` is what the player pays the station.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCommodity {
    pub name: Option<String>,
    pub buy_price: Option<i64>,
    pub sell_price: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawBodiesPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub bodies: Option<Vec<RawBody>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawBody {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub body_type: Option<String>,
    pub sub_type: Option<String>,
    pub distance_to_arrival: Option<f64>,
    pub is_landable: Option<bool>,
    pub gravity: Option<f64>,
    pub earth_masses: Option<f64>,
    pub radius: Option<f64>,
    pub surface_temperature: Option<f64>,
}
