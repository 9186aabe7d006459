use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tc_domain::{SystemBodies, SystemSnapshot, TradeRecommendation};
use thousands::Separable;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .force_no_tty()
        .enforce_styling()
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn render_recommendations(recommendations: &[TradeRecommendation], cargo_capacity: u32) -> String {
    let mut table = new_table(vec!["#", "Commodity", "Buy at", "Buy", "Sell at", "Sell", "Profit/unit", "Total"]);

    for (idx, r) in recommendations.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            r.commodity.clone(),
            r.buy_station_name.clone(),
            format!("{}cr", r.buy_price.separate_with_commas()),
            r.sell_station_name.clone(),
            format!("{}cr", r.sell_price.separate_with_commas()),
            format!("{}cr", r.profit_per_unit.separate_with_commas()),
            format!("{}cr", r.total_profit.separate_with_commas()),
        ]);
    }

    format!("cargo capacity: {} t\n{table}", cargo_capacity.separate_with_commas())
}

pub fn render_system(snapshot: &SystemSnapshot) -> String {
    let mut summary = new_table(vec!["System", "Economy", "Government", "Security", "Population", "Coordinates"]);
    summary.add_row(vec![
        snapshot.name.clone(),
        or_dash(snapshot.economy.as_deref()),
        or_dash(snapshot.government.as_deref()),
        or_dash(snapshot.security.as_deref()),
        or_dash(snapshot.population.map(|p| p.separate_with_commas())),
        or_dash(snapshot.coordinates.map(|c| format!("{:.2} / {:.2} / {:.2}", c.x, c.y, c.z))),
    ]);

    let mut stations = new_table(vec!["Station", "Max pad", "Commodities"]);
    for station in &snapshot.stations {
        stations.add_row(vec![
            station.name.clone(),
            station.max_pad_size.to_string(),
            station.commodities.len().to_string(),
        ]);
    }

    format!("{summary}\n{stations}")
}

pub fn render_bodies(bodies: &SystemBodies) -> String {
    let mut table = new_table(vec!["Body", "Type", "Sub type", "Distance (ls)", "Landable"]);

    for body in &bodies.bodies {
        table.add_row(vec![
            body.name.clone(),
            or_dash(body.body_type.as_deref()),
            or_dash(body.sub_type.as_deref()),
            or_dash(body.distance_to_arrival_ls.map(|d| (d.round() as i64).separate_with_commas())),
            or_dash(body.is_landable.map(|l| if l { "yes" } else { "no" })),
        ]);
    }

    table.to_string()
}
