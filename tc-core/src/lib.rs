pub mod configuration;
pub mod edsm_client;
pub mod notes_store;
pub mod profile_image_store;
pub mod reqwest_helpers;
pub mod system_loader;
pub mod trade_board;
