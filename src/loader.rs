use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use tokio::time::sleep;

use crate::config::LoaderConfig;
use crate::error::ScoutError;
use crate::model::RecipeSummary;

/// Capability the loader pulls recipes through.
///
/// The HTTP client implements this against the live API; tests script it.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch one random recipe.
    async fn fetch_one(&self) -> Result<RecipeSummary, ScoutError>;

    /// Keyword search, used only when random fetching yields nothing.
    async fn search(&self, term: &str) -> Result<Vec<RecipeSummary>, ScoutError>;
}

/// Receives the exposed list after each merged batch, before the run
/// terminates. Implementations must not block.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, recipes: &[RecipeSummary]);
}

/// Hands out run tickets so that starting a new run supersedes every
/// older one. A superseded run stops emitting and returns
/// [`ScoutError::Superseded`] instead of writing stale results.
#[derive(Debug, Clone, Default)]
pub struct RunCounter {
    current: Arc<AtomicU64>,
}

impl RunCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run. Any ticket issued earlier becomes stale.
    pub fn begin(&self) -> RunTicket {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RunTicket {
            current: Arc::clone(&self.current),
            id,
        }
    }
}

/// Tag for one loader invocation.
#[derive(Debug)]
pub struct RunTicket {
    current: Arc<AtomicU64>,
    id: u64,
}

impl RunTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}

/// Accumulator owned by a single loader run: insertion-ordered unique
/// recipes plus the id set backing deduplication.
#[derive(Debug, Default)]
struct LoaderState {
    recipes: Vec<RecipeSummary>,
    seen: HashSet<String>,
    batches_done: usize,
}

impl LoaderState {
    /// Keep the recipe unless its id was already seen. First occurrence wins.
    fn absorb(&mut self, recipe: RecipeSummary) {
        if self.seen.insert(recipe.id.clone()) {
            self.recipes.push(recipe);
        } else {
            debug!("Dropping duplicate recipe {}", recipe.id);
        }
    }

    /// The caller-visible slice: insertion order, capped at `target`.
    fn exposed(&self, target: usize) -> &[RecipeSummary] {
        &self.recipes[..self.recipes.len().min(target)]
    }
}

/// Collects up to `target` unique random recipes in sequential batches
/// of concurrent fetches.
///
/// Each batch issues `batch_size` fetches at once and settles all of
/// them before merging; individual failures only reduce the batch's
/// yield. If every batch comes back empty the loader falls back to a
/// keyword search once. A partial-but-nonzero run is a success and
/// never triggers the fallback.
pub struct RandomRecipeLoader<S> {
    source: Arc<S>,
    config: LoaderConfig,
    observer: Option<Box<dyn ProgressObserver>>,
}

impl<S: RecipeSource + 'static> RandomRecipeLoader<S> {
    pub fn new(source: Arc<S>, config: LoaderConfig) -> Result<Self, ScoutError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            observer: None,
        })
    }

    /// Install an observer that sees the exposed list after each batch.
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run to completion. Returns the deduplicated list (at most
    /// `target` entries, first-seen order), or [`ScoutError::Exhausted`]
    /// when neither the batches nor the fallback produced anything.
    pub async fn run(&self, ticket: &RunTicket) -> Result<Vec<RecipeSummary>, ScoutError> {
        let target = self.config.target;
        let total_batches = target.div_ceil(self.config.batch_size);
        let mut state = LoaderState::default();

        info!(
            "Loading up to {} random recipes ({} batches of {})",
            target, total_batches, self.config.batch_size
        );

        for batch in 0..total_batches {
            if !ticket.is_current() {
                info!("Run superseded before batch {}, stopping", batch + 1);
                return Err(ScoutError::Superseded);
            }

            self.run_batch(&mut state).await;
            state.batches_done += 1;

            if !ticket.is_current() {
                info!(
                    "Run superseded after batch {}, dropping {} recipes",
                    state.batches_done,
                    state.recipes.len()
                );
                return Err(ScoutError::Superseded);
            }
            self.emit(state.exposed(target));

            // Truncate-then-stop: the exposed list above is already
            // capped, so reaching the target ends the run here.
            if state.recipes.len() >= target {
                debug!(
                    "Collected {} unique recipes after batch {}, stopping early",
                    state.recipes.len(),
                    state.batches_done
                );
                break;
            }

            if batch + 1 < total_batches {
                sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
            }
        }

        if state.recipes.is_empty() {
            return self.fallback(ticket).await;
        }

        let mut recipes = state.recipes;
        recipes.truncate(target);
        info!(
            "Loaded {} unique recipes in {} batches",
            recipes.len(),
            state.batches_done
        );
        Ok(recipes)
    }

    /// Issue one batch of concurrent fetches and merge the settled
    /// results. Merge order follows issue order, not arrival order, so
    /// a run is deterministic given the same successes and failures.
    async fn run_batch(&self, state: &mut LoaderState) {
        let handles: Vec<_> = (0..self.config.batch_size)
            .map(|_| {
                let source = Arc::clone(&self.source);
                tokio::spawn(async move { source.fetch_one().await })
            })
            .collect();

        for handle in handles {
            match handle.await {
                Ok(Ok(recipe)) => state.absorb(recipe),
                Ok(Err(e)) => warn!("Random fetch failed, omitting from batch: {}", e),
                // The fetch task itself died; the rest of the batch
                // still merges and the next batch proceeds.
                Err(e) => error!("Batch member failed to settle: {}", e),
            }
        }
    }

    async fn fallback(&self, ticket: &RunTicket) -> Result<Vec<RecipeSummary>, ScoutError> {
        let term = &self.config.fallback_term;
        warn!(
            "No recipes from random batches, falling back to search for {:?}",
            term
        );

        match self.source.search(term).await {
            Ok(mut recipes) if !recipes.is_empty() => {
                recipes.truncate(self.config.target);
                if !ticket.is_current() {
                    info!("Run superseded during fallback, dropping results");
                    return Err(ScoutError::Superseded);
                }
                self.emit(&recipes);
                info!("Fallback search yielded {} recipes", recipes.len());
                Ok(recipes)
            }
            Ok(_) => {
                error!("Fallback search for {:?} returned nothing", term);
                Err(ScoutError::Exhausted)
            }
            Err(e) => {
                error!("Fallback search for {:?} failed: {}", term, e);
                Err(ScoutError::Exhausted)
            }
        }
    }

    fn emit(&self, recipes: &[RecipeSummary]) {
        if let Some(observer) = &self.observer {
            observer.on_progress(recipes);
        }
    }
}
