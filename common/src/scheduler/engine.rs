// Refresh engine implementation

use crate::errors::RefreshError;
use crate::fetch::MenuSource;
use crate::models::{MenuState, MenuView, MENU_UNAVAILABLE_MESSAGE};
use crate::{parser, select, telemetry};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, watch};
use tokio::time::interval;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Configuration for the refresh engine
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often to re-run the refresh cycle (in seconds)
    pub refresh_interval_seconds: u64,
    /// Field delimiter of the published sheet
    pub delimiter: char,
    /// Timezone used to compute "today"; `None` means the system local zone
    pub timezone: Option<Tz>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: 300,
            delimiter: ',',
            timezone: None,
        }
    }
}

/// RefreshEngine owns the fetch/parse/select pipeline and the single
/// exposed-state slot consumed by presentation.
///
/// Each timer tick publishes `Loading` and spawns a detached cycle task.
/// Cycles are not serialized: a slow fetch can overlap the next tick's, and
/// whichever cycle resolves last owns the slot (last-write-wins). In-flight
/// cycles are never cancelled; stopping the engine only stops the timer.
pub struct RefreshEngine {
    config: RefreshConfig,
    source: Arc<dyn MenuSource>,
    state_tx: Arc<watch::Sender<MenuState>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl RefreshEngine {
    /// Create a new refresh engine
    pub fn new(config: RefreshConfig, source: Arc<dyn MenuSource>) -> Self {
        let (state_tx, _state_rx) = watch::channel(MenuState::Idle);
        let (shutdown_tx, _shutdown_rx) = broadcast::channel(1);

        Self {
            config,
            source,
            state_tx: Arc::new(state_tx),
            shutdown_tx,
        }
    }

    /// Get a receiver for the exposed state slot
    pub fn subscribe(&self) -> watch::Receiver<MenuState> {
        self.state_tx.subscribe()
    }

    /// Get a shutdown signal receiver
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Snapshot of the currently exposed state
    pub fn current_state(&self) -> MenuState {
        self.state_tx.borrow().clone()
    }

    fn today(&self) -> NaiveDate {
        match self.config.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }

    /// Trigger one refresh cycle without waiting for the next timer tick.
    ///
    /// Publishes `Loading`, then runs the pipeline in a detached task that
    /// replaces the slot with `Ready` or `Error` when it resolves.
    #[instrument(skip(self))]
    pub fn refresh_now(&self) {
        let cycle_id = Uuid::new_v4();
        let today = self.today();
        let today_key = today.format("%Y-%m-%d").to_string();
        let as_of = today.format("%A, %B %-d").to_string();
        let delimiter = self.config.delimiter;
        let source = Arc::clone(&self.source);
        let state_tx = Arc::clone(&self.state_tx);

        debug!(cycle_id = %cycle_id, today = %today_key, "Starting refresh cycle");
        state_tx.send_replace(MenuState::Loading);

        tokio::spawn(async move {
            let started = Instant::now();
            match run_pipeline(source.as_ref(), &today_key, delimiter).await {
                Ok(view) => {
                    info!(
                        cycle_id = %cycle_id,
                        categories = view.categories().len(),
                        records = view.record_count(),
                        "Refresh cycle produced a menu view"
                    );
                    telemetry::record_refresh_success(
                        &cycle_id,
                        started.elapsed().as_secs_f64(),
                        view.record_count(),
                    );
                    state_tx.send_replace(MenuState::Ready { view, as_of });
                }
                Err(e) => {
                    // Root cause stays in the logs; consumers only ever see
                    // the fixed message.
                    error!(cycle_id = %cycle_id, error = %e, "Refresh cycle failed");
                    telemetry::record_refresh_failure(
                        &cycle_id,
                        started.elapsed().as_secs_f64(),
                        "fetch",
                    );
                    state_tx.send_replace(MenuState::Error {
                        message: MENU_UNAVAILABLE_MESSAGE.to_string(),
                    });
                }
            }
        });
    }

    /// Run the refresh loop until a shutdown signal arrives.
    ///
    /// The interval's first tick fires immediately, so one cycle starts on
    /// activation. Stopping drops the timer; any cycle still in flight runs
    /// to completion and may still apply its result to the slot.
    #[instrument(skip(self))]
    pub async fn run(&self) {
        info!(
            refresh_interval_seconds = self.config.refresh_interval_seconds,
            "Starting refresh engine"
        );

        let mut ticker = interval(Duration::from_secs(self.config.refresh_interval_seconds));
        let mut shutdown_rx = self.shutdown_receiver();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_now();
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping refresh engine");
                    break;
                }
            }
        }

        info!("Refresh engine stopped");
    }

    /// Stop the refresh loop
    #[instrument(skip(self))]
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn run_pipeline(
    source: &dyn MenuSource,
    today: &str,
    delimiter: char,
) -> Result<MenuView, RefreshError> {
    let raw = source.fetch_raw().await?;
    let records = parser::parse(&raw, delimiter);
    Ok(select::select(&records, today))
}
