use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use eframe::egui;

use crate::cache::SourceCache;
use crate::config::AppConfig;
use crate::data::distance::{Unavailable, distance};
use crate::data::filter::{FilterCriteria, filter};
use crate::data::loader::{self, LoadError, Source};
use crate::data::model::Dataset;
use crate::prefs::{ConfigurationError, ViewControls};
use crate::scene::{self, SceneDescription};

type LoadResult = Result<Dataset, LoadError>;

/// A fetch running on a worker thread, tagged with what it is reading.
struct PendingFetch {
    source: Source,
    rx: Receiver<LoadResult>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Last successfully loaded dataset. Kept on screen while a refresh runs
    /// and after a failed one.
    pub dataset: Option<Dataset>,

    /// Category selection and name search.
    pub criteria: FilterCriteria,

    /// Raw view widget values; validated into preferences per frame.
    pub controls: ViewControls,

    /// Names picked in the two distance selectors.
    pub distance_a: Option<String>,
    pub distance_b: Option<String>,

    /// Set by the reset button, cleared once the plot has applied it.
    pub reset_requested: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    cache: SourceCache,
    pending: Option<PendingFetch>,
    last_attempt: Option<Instant>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            cache: SourceCache::new(config.cache_ttl),
            config,
            dataset: None,
            criteria: FilterCriteria::default(),
            controls: ViewControls::default(),
            distance_a: None,
            distance_b: None,
            reset_requested: false,
            status_message: None,
            pending: None,
            last_attempt: None,
        }
    }

    /// Whether a fetch is in flight.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    // ---- Loading ----

    /// Collect a finished fetch and start a new one when the cache expired.
    pub fn poll(&mut self, ctx: &egui::Context) {
        if let Some(pending) = &self.pending {
            match pending.rx.try_recv() {
                Ok(result) => {
                    if let Some(pending) = self.pending.take() {
                        self.finish_fetch(&pending.source, result, Instant::now());
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.pending = None;
                    self.status_message = Some("Error: fetch worker stopped".into());
                }
            }
        }

        let now = Instant::now();
        if self.fetch_due(now) {
            self.start_fetch(ctx, now);
        }

        // Wake up again when the cached sheet goes stale.
        if let Some(left) = self.cache.remaining(now) {
            ctx.request_repaint_after(left);
        } else if let Some(last) = self.last_attempt {
            let since = now.saturating_duration_since(last);
            ctx.request_repaint_after(self.config.cache_ttl.saturating_sub(since));
        }
    }

    /// A fetch is due when none is running, the cache is stale, and the last
    /// attempt (successful or not) is at least one TTL old.
    pub fn fetch_due(&self, now: Instant) -> bool {
        if self.pending.is_some() || !self.cache.is_stale(now) {
            return false;
        }
        match self.last_attempt {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.config.cache_ttl,
        }
    }

    fn start_fetch(&mut self, ctx: &egui::Context, now: Instant) {
        let (tx, rx) = mpsc::channel();
        let source = self.config.source.clone();
        let timeout = self.config.fetch_timeout;
        let ctx = ctx.clone();

        log::info!("Fetching map data from {source}");
        std::thread::spawn(move || {
            let result = loader::load(&source, timeout);
            // Receiver is gone if the fetch was abandoned or the app shut down.
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        self.pending = Some(PendingFetch {
            source: self.config.source.clone(),
            rx,
        });
        self.last_attempt = Some(now);
    }

    /// Refresh button: forget the cached sheet so the next frame refetches.
    ///
    /// A fetch still in flight is abandoned; its worker finds the channel
    /// closed and its result is never shown.
    pub fn request_refresh(&mut self) {
        self.cache.force_invalidate();
        self.pending = None;
        self.last_attempt = None;
    }

    /// Switch to a local CSV snapshot.
    pub fn open_local(&mut self, path: PathBuf) {
        self.config.source = Source::File(path);
        self.request_refresh();
    }

    /// Apply a worker's result, unless it was read from a source that is no
    /// longer configured.
    fn finish_fetch(&mut self, source: &Source, result: LoadResult, now: Instant) {
        if *source != self.config.source {
            log::debug!("Discarding result from previous source {source}");
            return;
        }
        self.apply_load_result(result, now);
    }

    pub fn apply_load_result(&mut self, result: LoadResult, now: Instant) {
        match result {
            Ok(dataset) => {
                self.cache.mark_loaded(now);
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::warn!("Failed to load map data: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, carrying over the user's selections.
    ///
    /// Categories seen before keep their selected/deselected state; new ones
    /// start selected. Distance selections that no longer exist fall back to
    /// the first and second name.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let known = self
            .dataset
            .as_ref()
            .map(Dataset::categories)
            .unwrap_or_default();
        self.criteria.allowed_categories = dataset
            .categories()
            .into_iter()
            .filter(|c| !known.contains(c) || self.criteria.allowed_categories.contains(c))
            .collect();

        let names = dataset.unique_names();
        if !self.distance_a.as_ref().is_some_and(|n| names.contains(n)) {
            self.distance_a = names.first().cloned();
        }
        if !self.distance_b.as_ref().is_some_and(|n| names.contains(n)) {
            self.distance_b = names.get(1).or(names.first()).cloned();
        }

        if self.dataset.is_none() {
            self.reset_requested = true;
        }
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    // ---- Derived views (recomputed every frame) ----

    /// Points passing the current filters.
    pub fn visible(&self) -> Dataset {
        self.dataset
            .as_ref()
            .map(|ds| filter(ds, &self.criteria))
            .unwrap_or_default()
    }

    /// Scene for the current filters and view controls.
    pub fn scene(&self) -> Result<SceneDescription, ConfigurationError> {
        let prefs = self.controls.to_preferences(self.reset_requested)?;
        Ok(scene::build(&self.visible(), &prefs))
    }

    /// Distance between the two selected points, once both are chosen.
    pub fn selected_distance(&self) -> Option<Result<f64, Unavailable>> {
        let dataset = self.dataset.as_ref()?;
        let a = self.distance_a.as_deref()?;
        let b = self.distance_b.as_deref()?;
        Some(distance(dataset, a, b))
    }

    // ---- Category selection ----

    /// Toggle a single category in the filter.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.criteria.allowed_categories.remove(category) {
            self.criteria
                .allowed_categories
                .insert(category.to_string());
        }
    }

    /// Select all categories.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.allowed_categories = ds.categories();
        }
    }

    /// Deselect all categories.
    pub fn select_none(&mut self) {
        self.criteria.allowed_categories.clear();
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(AppConfig::default())
    }
}
