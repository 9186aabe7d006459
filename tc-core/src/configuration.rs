use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfiguration {
    pub edsm_base_url: String,
    pub data_dir: PathBuf,
    pub cargo_capacity: u32,
    pub requests_per_second: NonZeroU32,
}

impl AppConfiguration {
    pub fn key_value_store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }
}
