//! Navigation layer
//!
//! Maps page paths to routes, runs the route's loader behind a loading
//! placeholder, then mounts and renders the matching view. Loader failures
//! render the error view instead of the target view.

use crate::api;
use crate::cache::QueryCache;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::{CocktailError, CocktailResult};
use crate::loader::{item_loader, landing_loader, ItemData, LandingData, QueryClient};
use crate::ui::{self, TaskSpinner, UiContext};
use crate::views::{self, ErrorView, ItemState, ItemView, Mounted, SearchState, SearchView};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use tracing::info;
use url::Url;

const ROUTE_BASE: &str = "cocktails://app/";
const ITEM_SEGMENT: &str = "cocktail";

/// Escaped in an item id; unreserved characters stay as they are
const ID_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A page of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Search results; `None` searches the default term
    Landing { search: Option<String> },
    /// One cocktail by id
    Item { id: String },
}

impl Route {
    pub fn home() -> Self {
        Self::Landing { search: None }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self::Landing {
            search: Some(term.into()),
        }
    }

    pub fn item(id: impl Into<String>) -> Self {
        Self::Item { id: id.into() }
    }

    /// Parse a page path such as `/`, `/?search=gin` or `/cocktail/11007`
    pub fn parse(path: &str) -> CocktailResult<Self> {
        let not_found = || CocktailError::RouteNotFound(path.to_string());

        let base = Url::parse(ROUTE_BASE)
            .map_err(|e| CocktailError::Internal(format!("route base: {}", e)))?;
        let url = base.join(path.trim()).map_err(|_| not_found())?;
        if url.scheme() != base.scheme() || url.host_str() != base.host_str() {
            return Err(not_found());
        }

        let segments: Vec<String> = match url.path_segments() {
            Some(segments) => segments
                .filter(|seg| !seg.is_empty())
                .map(|seg| percent_decode_str(seg).decode_utf8().map(|s| s.into_owned()))
                .collect::<Result<_, _>>()
                .map_err(|_| not_found())?,
            None => Vec::new(),
        };
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => {
                let search = url
                    .query_pairs()
                    .find(|(k, _)| k == "search")
                    .map(|(_, v)| v.into_owned());
                Ok(Self::Landing { search })
            }
            [ITEM_SEGMENT, id] if !id.trim().is_empty() => Ok(Self::item(id.trim())),
            _ => Err(not_found()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landing { search: None } => write!(f, "/"),
            Self::Landing { search: Some(term) } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("search", term)
                    .finish();
                write!(f, "/?{}", query)
            }
            Self::Item { id } => {
                write!(f, "/{}/{}", ITEM_SEGMENT, utf8_percent_encode(id, ID_ESCAPE))
            }
        }
    }
}

/// A loaded page with its mounted view
pub enum Page {
    Landing {
        data: LandingData,
        view: Mounted<SearchState>,
    },
    Item {
        data: ItemData,
        view: Mounted<ItemState>,
    },
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Self::Landing { data, .. } => Route::search(&data.search_term),
            Self::Item { data, .. } => Route::item(&data.id),
        }
    }
}

/// Runs loaders and renders pages against one shared query cache
pub struct Router {
    client: QueryClient,
    ctx: UiContext,
}

impl Router {
    pub fn new(client: QueryClient, ctx: UiContext) -> Self {
        Self { client, ctx }
    }

    /// Build the process-wide cache and recipe source from configuration
    pub fn from_config(config: &Config, ctx: UiContext) -> CocktailResult<Self> {
        let source = api::create_source(config)?;
        let cache = QueryCache::new(config.stale_after());
        let client = QueryClient::new(cache, source, &config.search.default_term);
        Ok(Self::new(client, ctx))
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// Run the route's loader and mount its view, without output.
    ///
    /// An item that does not exist redirects to the landing page.
    pub async fn load(&self, route: &Route) -> CocktailResult<Page> {
        let cache = self.client.cache();

        match route {
            Route::Landing { search } => {
                let data = landing_loader(&self.client, search.as_deref()).await?;
                let view = views::mount(cache, data.key(), SearchView::state);
                Ok(Page::Landing { data, view })
            }
            Route::Item { id } => {
                let data = item_loader(&self.client, id).await?;
                let view = views::mount(cache, data.key(), ItemView::state);
                if view.current() != ItemState::RedirectHome {
                    return Ok(Page::Item { data, view });
                }

                info!("No cocktail with id {}, redirecting home", data.id);
                let data = landing_loader(&self.client, None).await?;
                let view = views::mount(cache, data.key(), SearchView::state);
                Ok(Page::Landing { data, view })
            }
        }
    }

    /// Navigate to a route: placeholder while loading, then the page or the
    /// error view
    pub async fn navigate(&self, route: &Route, format: OutputFormat) -> CocktailResult<Page> {
        let mut spinner = TaskSpinner::new(&self.ctx);
        spinner.start(&format!("Loading {}", route));
        let result = self.load(route).await;

        match result {
            Ok(mut page) => {
                spinner.clear();
                if let (Route::Item { id }, Page::Landing { .. }) = (route, &page) {
                    if format == OutputFormat::Table {
                        ui::notice(&self.ctx, &format!("No cocktail with id {}", id));
                    }
                }
                self.render(&mut page, format)?;
                Ok(page)
            }
            Err(e) => {
                spinner.stop_error(&format!("Could not load {}", route));
                ErrorView::new(self.ctx.clone()).render(&e);
                Err(e)
            }
        }
    }

    /// Parse `path` and navigate to it; unknown paths render the 404 page
    pub async fn open(&self, path: &str, format: OutputFormat) -> CocktailResult<Page> {
        match Route::parse(path) {
            Ok(route) => self.navigate(&route, format).await,
            Err(e) => {
                ErrorView::new(self.ctx.clone()).render(&e);
                Err(e)
            }
        }
    }

    /// Fetch the page's data again even if it is still fresh.
    ///
    /// The page's mounted view picks up the result; render it afterwards.
    pub async fn refresh(&self, page: &Page) -> CocktailResult<()> {
        let descriptor = match page {
            Page::Landing { data, .. } => self.client.search_query(Some(&data.search_term)),
            Page::Item { data, .. } => self.client.item_query(&data.id),
        };
        info!("Refreshing {}", page.route());
        self.client.cache().refetch(descriptor).await
    }

    /// Render a loaded page's current state
    pub fn render(&self, page: &mut Page, format: OutputFormat) -> CocktailResult<()> {
        match page {
            Page::Landing { data, view } => {
                SearchView::new(self.ctx.clone(), format).render(&data.search_term, &view.take())
            }
            Page::Item { view, .. } => ItemView::new(self.ctx.clone(), format).render(&view.take()),
        }
    }
}
