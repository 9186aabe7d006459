use crate::{StationId, SystemSnapshot, TradeRecommendation};
use itertools::Itertools;
use std::cmp::Reverse;

/// One side of a possible trade: a commodity at a station with a strictly positive price.
#[derive(Debug, Clone, Copy)]
struct TradeLeg<'a> {
    station_id: StationId,
    station_name: &'a str,
    commodity: &'a str,
    price: i64,
}

/// Every profitable (buy station, sell station, commodity) triple, most profitable first.
///
/// Stations are told apart by their position in the snapshot, so two stations sharing a name still
/// pair with each other. Ties in `total_profit` keep discovery order: buy station, its commodity,
/// sell station, its commodity.
pub fn find_recommendations(snapshot: &SystemSnapshot, cargo_capacity: u32) -> Vec<TradeRecommendation> {
    let purchase_legs = snapshot
        .stations_with_ids()
        .flat_map(|(station_id, station)| {
            station.commodities.iter().filter_map(move |quote| {
                quote.purchase_price().map(|price| TradeLeg {
                    station_id,
                    station_name: &station.name,
                    commodity: &quote.name,
                    price,
                })
            })
        })
        .collect_vec();

    let sale_legs = snapshot
        .stations_with_ids()
        .flat_map(|(station_id, station)| {
            station.commodities.iter().filter_map(move |quote| {
                quote.sale_price().map(|price| TradeLeg {
                    station_id,
                    station_name: &station.name,
                    commodity: &quote.name,
                    price,
                })
            })
        })
        .collect_vec();

    purchase_legs
        .iter()
        .flat_map(|buy| {
            sale_legs
                .iter()
                .filter(move |sell| buy.station_id != sell.station_id && buy.commodity == sell.commodity && sell.price > buy.price)
                .map(move |sell| to_recommendation(buy, sell, cargo_capacity))
        })
        .sorted_by_key(|recommendation| Reverse(recommendation.total_profit))
        .collect_vec()
}

fn to_recommendation(buy: &TradeLeg, sell: &TradeLeg, cargo_capacity: u32) -> TradeRecommendation {
    let profit_per_unit = sell.price - buy.price;

    TradeRecommendation {
        commodity: buy.commodity.to_string(),
        buy_station_id: buy.station_id,
        buy_station_name: buy.station_name.to_string(),
        buy_price: buy.price,
        sell_station_id: sell.station_id,
        sell_station_name: sell.station_name.to_string(),
        sell_price: sell.price,
        profit_per_unit,
        total_profit: profit_per_unit.saturating_mul(i64::from(cargo_capacity)),
    }
}

pub fn top_recommendations(recommendations: &[TradeRecommendation], limit: usize) -> &[TradeRecommendation] {
    &recommendations[..recommendations.len().min(limit)]
}
