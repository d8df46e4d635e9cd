use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::modules::cross_seed::{CrossSeedProcessor, RawHit, SeedPolicy};
use crate::modules::indexer::{Release, ReleaseSearcher, TitleLookup};
use crate::modules::torznab::domain::{
    category_id_for, matches_requested, FeedItem, LabelMode, RequestType, TorznabRequest,
    TorznabResponse,
};
use crate::modules::torznab::infrastructure::{render_capabilities, FeedWriter};
use crate::shared::application::PaginatedResult;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::{CacheStats, TtlCache};
use crate::shared::utils::LogContext;

const MAX_CACHE_ENTRIES: usize = 1000;

/// Filtered result list shared between the cache and in-flight requests
pub type FeedItems = Arc<Vec<FeedItem>>;

/// Torznab `/api` endpoint, independent of any HTTP framework
///
/// Holds the only cross-request state: the filtered-result cache.
pub struct TorznabService {
    api_key: String,
    processor: CrossSeedProcessor,
    searcher: Arc<dyn ReleaseSearcher>,
    lookup: Arc<dyn TitleLookup>,
    cache: TtlCache<FeedItems>,
    label_mode: LabelMode,
    site_link: String,
}

impl TorznabService {
    pub fn new(
        api_key: impl Into<String>,
        policy: Arc<SeedPolicy>,
        searcher: Arc<dyn ReleaseSearcher>,
        lookup: Arc<dyn TitleLookup>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            processor: CrossSeedProcessor::new(policy),
            searcher,
            lookup,
            cache: TtlCache::new(cache_ttl, MAX_CACHE_ENTRIES),
            label_mode: LabelMode::default(),
            site_link: String::new(),
        }
    }

    pub fn with_label_mode(mut self, label_mode: LabelMode) -> Self {
        self.label_mode = label_mode;
        self
    }

    /// Base URL the feed reports as its channel link
    pub fn with_site_link(mut self, site_link: impl Into<String>) -> Self {
        self.site_link = site_link.into();
        self
    }

    pub fn policy(&self) -> &SeedPolicy {
        self.processor.policy()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Answer one `/api` call. Never fails; errors become status codes.
    pub async fn handle(&self, params: &HashMap<String, String>) -> TorznabResponse {
        info!(
            "=== INCOMING REQUEST === type: {}",
            params.get("t").map(String::as_str).unwrap_or("unknown")
        );

        if params.get("apikey") != Some(&self.api_key) {
            warn!(
                "Invalid API key: {}",
                params.get("apikey").map(String::as_str).unwrap_or("<none>")
            );
            return TorznabResponse::text(403, "Invalid API key");
        }

        match self.dispatch(params).await {
            Ok(response) => response,
            Err(e) => {
                LogContext::error_with_context(&e, "Torznab request failed");
                TorznabResponse::from_error(&e)
            }
        }
    }

    async fn dispatch(&self, params: &HashMap<String, String>) -> AppResult<TorznabResponse> {
        let request = TorznabRequest::from_params(params)?;

        match &request.request_type {
            RequestType::Caps => {
                info!("Returning capabilities");
                Ok(TorznabResponse::xml(render_capabilities()?))
            }
            request_type if request_type.is_search() => self.search(&request).await,
            _ => Ok(TorznabResponse::text(400, "Unknown request type")),
        }
    }

    /// Run a search request and render the requested page
    pub async fn search(&self, request: &TorznabRequest) -> AppResult<TorznabResponse> {
        info!("=== SEARCH REQUEST ===");
        let items = self.filtered_items(request).await?;

        let page = PaginatedResult::new(&items, &request.pagination);
        info!(
            "Pagination: offset={}, limit={}, total={}, returning={}",
            page.offset,
            page.limit,
            page.total_count,
            page.items.len()
        );

        let apply_labels = self
            .label_mode
            .applies(self.policy().private_filtering_enabled());
        let xml = FeedWriter::new(self.site_link.as_str(), apply_labels).render(&page.items)?;
        Ok(TorznabResponse::xml(xml))
    }

    /// Filtered, deduplicated results for a request, from cache when fresh
    pub async fn filtered_items(&self, request: &TorznabRequest) -> AppResult<FeedItems> {
        self.cache.purge_expired();

        let cache_key = request.cache_key();
        if let Some(items) = self.cache.get(&cache_key) {
            info!("Using cached results ({} results)", items.len());
            return Ok(items);
        }

        let releases = match self.fetch_releases(request).await {
            Some(releases) => releases,
            // Upstream failures are not cached
            None => return Ok(Arc::new(Vec::new())),
        };

        let items = Arc::new(self.filter_releases(releases, request)?);
        self.cache.insert(cache_key, Arc::clone(&items));
        info!("Cached {} results", items.len());
        Ok(items)
    }

    /// Query the aggregator, or `None` if it failed
    async fn fetch_releases(&self, request: &TorznabRequest) -> Option<Vec<Release>> {
        let query = self.resolve_query(request).await;
        let hydra_query = request.to_hydra_query(query);

        LogContext::search_operation(&hydra_query.query, Some("NZBHydra2"), None);
        match self.searcher.search(&hydra_query).await {
            Ok(releases) => {
                LogContext::search_operation(
                    &hydra_query.query,
                    Some("NZBHydra2"),
                    Some(releases.len()),
                );
                Some(releases)
            }
            Err(e) => {
                error!("Error querying NZBHydra2: {}", e);
                None
            }
        }
    }

    /// Free-text query, falling back to a title looked up from the ids
    async fn resolve_query(&self, request: &TorznabRequest) -> String {
        if !request.query.is_empty() {
            return request.query.clone();
        }

        if let Some(imdb_id) = request.imdb_id.as_deref() {
            if let Some(title) = self.lookup.movie_title(imdb_id).await {
                info!("Using Radarr lookup: '{}' instead of just IMDb ID", title);
                return title;
            }
        } else if let Some(tvdb_id) = request.tvdb_id.as_deref() {
            if let Some(title) = self.lookup.series_title(tvdb_id).await {
                info!("Using Sonarr lookup: '{}' instead of just TVDb ID", title);
                return title;
            }
        }

        String::new()
    }

    /// Id match, cross-seed engine, category filter, link dedup
    fn filter_releases(
        &self,
        releases: Vec<Release>,
        request: &TorznabRequest,
    ) -> AppResult<Vec<FeedItem>> {
        let releases = filter_by_external_id(releases, request);

        let batch: Vec<RawHit<Release>> = releases
            .into_iter()
            .map(|release| {
                RawHit::with_payload(
                    release.title.clone(),
                    release.size,
                    release.indexer.clone(),
                    release,
                )
            })
            .collect();

        let groups = self.processor.process(batch)?;
        info!("Grouped into {} cross-seedable releases", groups.len());

        let items = FeedItem::flatten(groups);
        info!(
            "Filtered to {} cross-seedable results (min {} trackers)",
            items.len(),
            self.policy().min_duplicates()
        );

        let items = filter_by_category(items, &request.requested_categories());
        Ok(dedup_by_link(items))
    }
}

/// Keep releases tagged with the requested IMDb id, else the requested TVDb id
fn filter_by_external_id(releases: Vec<Release>, request: &TorznabRequest) -> Vec<Release> {
    if let Some(imdb_id) = request.normalized_imdb_id() {
        let kept: Vec<Release> = releases
            .into_iter()
            .filter(|r| r.imdb_id.as_deref() == Some(imdb_id.as_str()))
            .collect();
        info!(
            "Filtered to {} results matching IMDb ID {}",
            kept.len(),
            imdb_id
        );
        return kept;
    }

    if let Some(tvdb_id) = request.tvdb_id.as_deref() {
        let kept: Vec<Release> = releases
            .into_iter()
            .filter(|r| r.tvdb_id.as_deref() == Some(tvdb_id))
            .collect();
        info!(
            "Filtered to {} results matching TVDb ID {}",
            kept.len(),
            tvdb_id
        );
        return kept;
    }

    releases
}

fn filter_by_category(items: Vec<FeedItem>, requested: &[String]) -> Vec<FeedItem> {
    if requested.is_empty() {
        return items;
    }

    let kept: Vec<FeedItem> = items
        .into_iter()
        .filter(|item| matches_requested(category_id_for(&item.release.category), requested))
        .collect();
    info!(
        "Category filtered to {} results matching {:?}",
        kept.len(),
        requested
    );
    kept
}

/// First occurrence of each non-empty link wins
fn dedup_by_link(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let before = items.len();
    let mut seen: HashSet<String> = HashSet::new();

    let unique: Vec<FeedItem> = items
        .into_iter()
        .filter(|item| !item.release.link.is_empty() && seen.insert(item.release.link.clone()))
        .collect();

    if unique.len() < before {
        info!(
            "Deduplicated {} -> {} results (removed {})",
            before,
            unique.len(),
            before - unique.len()
        );
    }
    unique
}
