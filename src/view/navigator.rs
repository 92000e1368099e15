//! Sequencing of page loads.
//!
//! Loads are asynchronous and can overlap when the user navigates quickly. Each
//! navigation takes a fresh [`RequestToken`]; when its load finishes the result
//! is only shown if no newer navigation has started in the meantime.

use crate::dashboard::Dashboard;
use crate::source::DocumentSource;
use crate::view::home_view::HomeView;
use crate::view::route::Route;
use crate::view::site_detail_view::SiteDetailView;
use log::{debug, error};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Identifies one navigation. Later navigations have larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What the dashboard currently displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum View {
    /// A load for this route is in flight.
    Loading(Route),
    Home(HomeView),
    Site(SiteDetailView),
    /// The site could not be fetched or held no usable data.
    SiteUnavailable { code: String },
}

pub struct Navigator<S> {
    dashboard: Dashboard<S>,
    issued: AtomicU64,
    current: RwLock<Arc<View>>,
}

impl<S: DocumentSource> Navigator<S> {
    pub fn new(dashboard: Dashboard<S>) -> Self {
        Self {
            dashboard,
            issued: AtomicU64::new(0),
            current: RwLock::new(Arc::new(View::Loading(Route::Home))),
        }
    }

    pub fn dashboard(&self) -> &Dashboard<S> {
        &self.dashboard
    }

    /// The view on screen.
    pub async fn current(&self) -> Arc<View> {
        self.current.read().await.clone()
    }

    fn latest_token(&self) -> RequestToken {
        RequestToken(self.issued.load(Ordering::SeqCst))
    }

    /// Loads `route` and shows it, unless a newer navigation started first.
    ///
    /// Returns the view that was applied, or `None` when the result was stale
    /// and dropped.
    pub async fn navigate(&self, route: Route) -> Option<Arc<View>> {
        let token = RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        self.apply(token, View::Loading(route.clone())).await;

        let view = match &route {
            Route::Home => View::Home(self.dashboard.home_view().call().await),
            Route::Site(code) => match self.dashboard.site_view(code).await {
                Ok(detail) => View::Site(detail),
                Err(e) => {
                    error!("Site {} unavailable: {}", code, e);
                    View::SiteUnavailable { code: code.clone() }
                }
            },
        };

        self.apply(token, view).await
    }

    async fn apply(&self, token: RequestToken, view: View) -> Option<Arc<View>> {
        let mut current = self.current.write().await;
        if token != self.latest_token() {
            debug!(
                "Dropping stale navigation {:?}, latest is {:?}",
                token,
                self.latest_token()
            );
            return None;
        }
        let view = Arc::new(view);
        *current = view.clone();
        Some(view)
    }
}
