use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommodityQuote {
    pub name: String,
    /// price at which the station buys from the player
    pub station_buy_price: Option<i64>,
    /// price at which the station sells to the player
    pub station_sell_price: Option<i64>,
}

impl CommodityQuote {
    /// the price the player pays when buying here, if the station sells this commodity at a usable price
    pub fn purchase_price(&self) -> Option<i64> {
        self.station_sell_price.filter(|price| *price > 0)
    }

    /// the price the player receives when selling here, if the station buys this commodity at a usable price
    pub fn sale_price(&self) -> Option<i64> {
        self.station_buy_price.filter(|price| *price > 0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum PadSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl TryFrom<i64> for PadSize {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PadSize::Small),
            2 => Ok(PadSize::Medium),
            3 => Ok(PadSize::Large),
            other => Err(other),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub max_pad_size: PadSize,
    pub commodities: Vec<CommodityQuote>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub name: String,
    pub economy: Option<String>,
    pub government: Option<String>,
    pub security: Option<String>,
    pub population: Option<i64>,
    pub coordinates: Option<Coordinates>,
    pub stations: Vec<Station>,
    pub fetched_at: DateTime<Utc>,
}

impl SystemSnapshot {
    pub fn stations_with_ids(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations.iter().enumerate().map(|(idx, station)| (StationId(idx), station))
    }
}

/// Position of a station within its snapshot. Names are not unique, so pairing uses this instead.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecommendation {
    pub commodity: String,
    pub buy_station_id: StationId,
    pub buy_station_name: String,
    pub buy_price: i64,
    pub sell_station_id: StationId,
    pub sell_station_name: String,
    pub sell_price: i64,
    pub profit_per_unit: i64,
    pub total_profit: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub name: String,
    pub body_type: Option<String>,
    pub sub_type: Option<String>,
    pub distance_to_arrival_ls: Option<f64>,
    pub is_landable: Option<bool>,
    pub gravity: Option<f64>,
    pub earth_masses: Option<f64>,
    pub radius_km: Option<f64>,
    pub surface_temperature_k: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemBodies {
    pub system_name: Option<String>,
    pub bodies: Vec<CelestialBody>,
}
