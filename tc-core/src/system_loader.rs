use crate::edsm_client::{EdsmClientTrait, FetchError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tc_domain::{normalize, normalize_bodies, SystemBodies, SystemSnapshot};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSystem {
    pub snapshot: Arc<SystemSnapshot>,
    pub bodies: SystemBodies,
}

#[derive(Debug, Clone, Default)]
pub struct LoadState {
    pub loaded: Option<Arc<LoadedSystem>>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Committed(Arc<LoadedSystem>),
    /// a newer load started while this one was in flight; its result (success or failure) was dropped
    Superseded,
}

/// Loads a system and its bodies in two sequential stages and publishes the result.
/// The last load to start wins: results of older loads are never published.
#[derive(Debug)]
pub struct SystemLoader {
    client: Arc<dyn EdsmClientTrait>,
    latest_generation: AtomicU64,
    state_tx: watch::Sender<LoadState>,
}

impl SystemLoader {
    pub fn new(client: Arc<dyn EdsmClientTrait>) -> Self {
        let (state_tx, _) = watch::channel(LoadState::default());
        Self {
            client,
            latest_generation: AtomicU64::new(0),
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    pub fn current_state(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    pub async fn load(&self, system_name: &str) -> Result<LoadOutcome, FetchError> {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state_tx.send_modify(|state| state.is_loading = true);

        info!(system_name, generation, "loading system");
        let result = self.fetch_system_and_bodies(system_name).await;

        // the generation check happens under the channel lock, so a newer load can't slip in between check and commit
        let mut outcome = Ok(LoadOutcome::Superseded);
        self.state_tx.send_if_modified(|state| {
            if self.latest_generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            state.is_loading = false;
            match &result {
                Ok(loaded) => {
                    let loaded = Arc::new(loaded.clone());
                    state.loaded = Some(Arc::clone(&loaded));
                    state.error_message = None;
                    outcome = Ok(LoadOutcome::Committed(loaded));
                }
                Err(err) => {
                    state.error_message = Some(err.to_string());
                    outcome = Err(err.clone());
                }
            }
            true
        });

        match &outcome {
            Ok(LoadOutcome::Committed(loaded)) => info!(
                system_name = loaded.snapshot.name.as_str(),
                generation,
                num_stations = loaded.snapshot.stations.len(),
                num_bodies = loaded.bodies.bodies.len(),
                "committed system"
            ),
            Ok(LoadOutcome::Superseded) => debug!(system_name, generation, "discarding stale load result"),
            Err(err) => warn!(system_name, generation, "loading system failed: {err}"),
        }

        outcome
    }

    async fn fetch_system_and_bodies(&self, system_name: &str) -> Result<LoadedSystem, FetchError> {
        let raw_system = self.client.fetch_system(system_name).await?;
        let snapshot = normalize(raw_system);

        // the resolved name may differ from what the user typed
        let raw_bodies = self.client.fetch_bodies(&snapshot.name).await?;

        Ok(LoadedSystem {
            snapshot: Arc::new(snapshot),
            bodies: normalize_bodies(raw_bodies),
        })
    }
}
