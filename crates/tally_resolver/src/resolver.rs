//! Entity resolution over cached collection snapshots.

use crate::{FuzzyScorer, ResolverConfig, Scorer, SourceProvider};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tally_cache::{CacheStore, Snapshot};
use tally_core::{CandidateEntity, CollectionKey, ResolutionMatch};
use tally_error::{IntegrityError, IntegrityErrorKind, TallyResult, ValidationError};
use tracing::{debug, info, instrument};

/// Threshold used when the caller does not supply one.
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Resolves free-text references to candidates of a remote collection.
///
/// The resolver owns no data of its own. Snapshots live in the shared
/// [`CacheStore`]; on a miss or after expiry the caller-supplied fetch is
/// invoked and its result replaces the cached snapshot.
///
/// No lock is held while fetching, and the cache is only written once the
/// fetch has completed, so a resolution dropped mid-fetch leaves the cache
/// untouched. A fetch that was already running when the collection was
/// invalidated is returned to its caller but never cached.
#[derive(Debug)]
pub struct EntityResolver<S = FuzzyScorer> {
    cache: Arc<CacheStore>,
    scorer: S,
    default_threshold: u8,
}

impl EntityResolver<FuzzyScorer> {
    /// Creates a resolver using [`FuzzyScorer`].
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self::with_scorer(cache, FuzzyScorer)
    }

    /// Creates a resolver with its own cache, both configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails
    /// [`ResolverConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use tally_resolver::{EntityResolver, ResolverConfig};
    ///
    /// let config = ResolverConfig::from_toml_str("[resolver]\ndefault_threshold = 80").unwrap();
    /// let resolver = EntityResolver::from_config(&config).unwrap();
    /// assert_eq!(resolver.default_threshold(), 80);
    /// ```
    pub fn from_config(config: &ResolverConfig) -> TallyResult<Self> {
        config.validate()?;
        let threshold = config.default_threshold()?;
        let cache = Arc::new(CacheStore::new(config.cache().clone()));
        Self::new(cache).with_default_threshold(threshold)
    }
}

impl<S: Scorer> EntityResolver<S> {
    /// Creates a resolver with a custom scorer.
    pub fn with_scorer(cache: Arc<CacheStore>, scorer: S) -> Self {
        Self {
            cache,
            scorer,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Returns this resolver with a different default threshold.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `threshold` is above 100.
    pub fn with_default_threshold(mut self, threshold: u8) -> TallyResult<Self> {
        self.default_threshold = validate_threshold(i64::from(threshold))?;
        Ok(self)
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Threshold applied by [`EntityResolver::resolve_default`].
    pub fn default_threshold(&self) -> u8 {
        self.default_threshold
    }

    /// Resolves `query` against the `key` collection.
    ///
    /// `fetch_fn` runs only on a cache miss or after expiry. Matches scoring
    /// below `threshold` are dropped; the rest are ordered by score
    /// (highest first), then by ascending id.
    ///
    /// # Errors
    ///
    /// - Validation error if `threshold` is outside `[0, 100]` or `query` is
    ///   blank. Nothing is read from the cache or fetched in that case.
    /// - Whatever `fetch_fn` returned, unchanged. A stale snapshot is never
    ///   served in its place.
    /// - Integrity error if the snapshot contains duplicate ids; such a
    ///   snapshot is not cached.
    #[instrument(skip(self, fetch_fn))]
    pub async fn resolve<F, Fut>(
        &self,
        key: CollectionKey,
        query: &str,
        threshold: i64,
        fetch_fn: F,
    ) -> TallyResult<Vec<ResolutionMatch>>
    where
        F: FnOnce(CollectionKey) -> Fut,
        Fut: Future<Output = TallyResult<Vec<CandidateEntity>>>,
    {
        let threshold = validate_threshold(threshold)?;
        let query = validate_query(query)?;

        let candidates = self.candidates(key, fetch_fn).await?;
        let matches = self.rank(query, &candidates, threshold);

        info!(
            collection = %key,
            candidates = candidates.len(),
            matches = matches.len(),
            "Resolved query"
        );
        Ok(matches)
    }

    /// Like [`EntityResolver::resolve`], fetching through a [`SourceProvider`].
    pub async fn resolve_from(
        &self,
        key: CollectionKey,
        query: &str,
        threshold: i64,
        source: &dyn SourceProvider,
    ) -> TallyResult<Vec<ResolutionMatch>> {
        self.resolve(key, query, threshold, |key| source.fetch(key))
            .await
    }

    /// Like [`EntityResolver::resolve_from`] with the default threshold.
    pub async fn resolve_default(
        &self,
        key: CollectionKey,
        query: &str,
        source: &dyn SourceProvider,
    ) -> TallyResult<Vec<ResolutionMatch>> {
        self.resolve_from(key, query, i64::from(self.default_threshold), source)
            .await
    }

    /// Drops the cached snapshot of `key`.
    ///
    /// Write paths call this right after a mutation of the collection
    /// succeeds (adding a friend, creating a group, ...).
    pub fn invalidate(&self, key: CollectionKey) {
        self.cache.invalidate(key);
    }

    /// Drops every cached snapshot.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn candidates<F, Fut>(&self, key: CollectionKey, fetch_fn: F) -> TallyResult<Snapshot>
    where
        F: FnOnce(CollectionKey) -> Fut,
        Fut: Future<Output = TallyResult<Vec<CandidateEntity>>>,
    {
        // Read before the lookup so an invalidation during the fetch is seen
        let generation = self.cache.generation(key);

        if let Some(snapshot) = self.cache.get(key) {
            // The store is shared and `CacheStore::set` is public, so a hit
            // may hold a snapshot this resolver never checked
            check_unique_ids(key, &snapshot)?;
            return Ok(snapshot);
        }

        debug!(collection = %key, "Fetching collection from source");
        let fetched = fetch_fn(key).await?;
        check_unique_ids(key, &fetched)?;

        let snapshot: Snapshot = fetched.into();
        let ttl = self.cache.config().ttl_for(key);
        if self
            .cache
            .set_if_generation(key, Arc::clone(&snapshot), ttl, generation)
        {
            debug!(collection = %key, count = snapshot.len(), "Cached fresh snapshot");
        } else {
            debug!(collection = %key, "Collection invalidated during fetch, not caching");
        }
        Ok(snapshot)
    }

    fn rank(
        &self,
        query: &str,
        candidates: &[CandidateEntity],
        threshold: u8,
    ) -> Vec<ResolutionMatch> {
        let floor = f64::from(threshold);
        let mut matches: Vec<ResolutionMatch> = candidates
            .iter()
            .filter_map(|candidate| {
                let score = self.scorer.score(query, candidate.display_name());
                (score >= floor).then(|| ResolutionMatch::from_candidate(candidate, score))
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score()
                .total_cmp(a.score())
                .then_with(|| a.id().cmp(b.id()))
        });
        matches
    }
}

fn validate_threshold(threshold: i64) -> TallyResult<u8> {
    u8::try_from(threshold)
        .ok()
        .filter(|t| *t <= 100)
        .ok_or_else(|| {
            ValidationError::new(
                "threshold",
                format!("must be between 0 and 100, got {threshold}"),
            )
            .into()
        })
}

fn validate_query(query: &str) -> TallyResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("query", "cannot be empty").into());
    }
    Ok(trimmed)
}

fn check_unique_ids(key: CollectionKey, candidates: &[CandidateEntity]) -> TallyResult<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    match candidates.iter().find(|c| !seen.insert(*c.id())) {
        Some(duplicate) => Err(IntegrityError::new(IntegrityErrorKind::DuplicateId {
            collection: key.to_string(),
            id: *duplicate.id(),
        })
        .into()),
        None => Ok(()),
    }
}
