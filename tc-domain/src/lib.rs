pub mod edsm_model;
pub mod normalizer;
pub mod trade_model;
pub mod trading;

pub use edsm_model::*;
pub use normalizer::{normalize, normalize_at, normalize_bodies};
pub use trade_model::*;
pub use trading::{find_recommendations, top_recommendations};
