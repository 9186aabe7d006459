use crate::system_loader::LoadState;
use std::sync::Arc;
use tc_domain::{find_recommendations, SystemSnapshot, TradeRecommendation};
use tokio::sync::watch;
use tracing::debug;

/// Presentation-side owner of the latest snapshot and the recommendations derived from it.
#[derive(Debug, Clone)]
pub struct TradeBoard {
    snapshot: Option<Arc<SystemSnapshot>>,
    cargo_capacity: u32,
    recommendations: Vec<TradeRecommendation>,
}

impl TradeBoard {
    pub fn new(cargo_capacity: u32) -> Self {
        Self {
            snapshot: None,
            cargo_capacity,
            recommendations: vec![],
        }
    }

    pub fn snapshot(&self) -> Option<&SystemSnapshot> {
        self.snapshot.as_deref()
    }

    pub fn cargo_capacity(&self) -> u32 {
        self.cargo_capacity
    }

    pub fn recommendations(&self) -> &[TradeRecommendation] {
        &self.recommendations
    }

    pub fn apply_snapshot(&mut self, snapshot: Arc<SystemSnapshot>) {
        self.snapshot = Some(snapshot);
        self.recompute();
    }

    pub fn set_cargo_capacity(&mut self, cargo_capacity: u32) {
        self.cargo_capacity = cargo_capacity;
        self.recompute();
    }

    /// Applies every newly committed snapshot until the loader goes away.
    pub async fn follow(mut self, mut state_rx: watch::Receiver<LoadState>) -> Self {
        while state_rx.changed().await.is_ok() {
            let maybe_snapshot = state_rx.borrow_and_update().loaded.as_ref().map(|loaded| Arc::clone(&loaded.snapshot));

            let Some(snapshot) = maybe_snapshot else {
                continue;
            };

            let is_current = self.snapshot.as_ref().is_some_and(|current| Arc::ptr_eq(current, &snapshot));
            if !is_current {
                self.apply_snapshot(snapshot);
            }
        }
        self
    }

    fn recompute(&mut self) {
        self.recommendations = match &self.snapshot {
            None => vec![],
            Some(snapshot) => find_recommendations(snapshot, self.cargo_capacity),
        };
        debug!(
            num_recommendations = self.recommendations.len(),
            cargo_capacity = self.cargo_capacity,
            "recomputed trade recommendations"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system_loader::LoadedSystem;
    use chrono::Utc;
    use tc_domain::{CommodityQuote, PadSize, Station, SystemBodies};

    fn gold_snapshot(name: &str, sale_price: i64) -> Arc<SystemSnapshot> {
        let station = |station_name: &str, quote: CommodityQuote| Station {
            name: station_name.to_string(),
            max_pad_size: PadSize::Medium,
            commodities: vec![quote],
        };

        Arc::new(SystemSnapshot {
            name: name.to_string(),
            economy: None,
            government: None,
            security: None,
            population: None,
            coordinates: None,
            stations: vec![
                station(
                    "Seller",
                    CommodityQuote {
                        name: "Gold".to_string(),
                        station_buy_price: None,
                        station_sell_price: Some(100),
                    },
                ),
                station(
                    "Buyer",
                    CommodityQuote {
                        name: "Gold".to_string(),
                        station_buy_price: Some(sale_price),
                        station_sell_price: None,
                    },
                ),
            ],
            fetched_at: Utc::now(),
        })
    }

    #[test]
    fn recomputes_on_snapshot_and_capacity_change() {
        let mut board = TradeBoard::new(10);
        assert!(board.recommendations().is_empty());

        board.apply_snapshot(gold_snapshot("Sol", 150));
        assert_eq!(board.recommendations()[0].total_profit, 500);

        board.set_cargo_capacity(20);
        assert_eq!(board.recommendations()[0].total_profit, 1000);

        board.apply_snapshot(gold_snapshot("Sol", 90));
        assert!(board.recommendations().is_empty());
        assert_eq!(board.cargo_capacity(), 20);
    }

    #[tokio::test]
    async fn follows_committed_snapshots_until_loader_is_gone() {
        let (tx, rx) = watch::channel(LoadState::default());
        let board_task = tokio::spawn(TradeBoard::new(4).follow(rx));

        tx.send_modify(|state| state.is_loading = true);
        tx.send_modify(|state| {
            state.is_loading = false;
            state.loaded = Some(Arc::new(LoadedSystem {
                snapshot: gold_snapshot("Achenar", 130),
                bodies: SystemBodies::default(),
            }));
        });
        drop(tx);

        let board = board_task.await.unwrap();

        assert_eq!(board.snapshot().map(|s| s.name.as_str()), Some("Achenar"));
        assert_eq!(board.recommendations().len(), 1);
        assert_eq!(board.recommendations()[0].total_profit, 120);
    }
}
