use chrono::NaiveDate;

use crate::config::{MapConfig, RefreshOrdering};
use crate::filter::{Filter, FilterDefaults, FilterInput};
use crate::markers::{MarkerId, MarkerSet};
use crate::models::{EarthquakeEvent, FetchError};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshStatus {
    Idle,
    Loading { request: u64 },
    Loaded { count: usize },
    Failed { reason: String },
}

/// Handed out by [`MapViewController::begin_refresh`]; carries the request id
/// back into [`MapViewController::complete_refresh`].
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTicket {
    pub request: u64,
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied { markers: usize, recentered: bool },
    /// A newer request was issued; the response was dropped.
    Stale { request: u64, latest: u64 },
    Failed(FetchError),
}

/// Owns the map view and the markers on it, and runs the
/// filter → fetch → render cycle. The HTTP call itself happens between
/// `begin_refresh` and `complete_refresh`.
#[derive(Debug, Clone)]
pub struct MapViewController {
    viewport: Viewport,
    markers: MarkerSet,
    open_popup: Option<MarkerId>,
    status: RefreshStatus,
    latest_request: u64,
    follow_zoom: u8,
    ordering: RefreshOrdering,
    filter_defaults: FilterDefaults,
}

impl MapViewController {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            viewport: Viewport::new(config.default_center, config.default_zoom, config.max_zoom),
            markers: MarkerSet::new(),
            open_popup: None,
            status: RefreshStatus::Idle,
            latest_request: 0,
            follow_zoom: config.follow_zoom,
            ordering: config.ordering,
            filter_defaults: config.filter_defaults.clone(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn status(&self) -> &RefreshStatus {
        &self.status
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Resolve the filter and tag a new request.
    pub fn begin_refresh(&mut self, input: &FilterInput, today: NaiveDate) -> RefreshTicket {
        let filter = input.resolve(&self.filter_defaults, today);
        self.latest_request += 1;
        let request = self.latest_request;
        self.status = RefreshStatus::Loading { request };
        tracing::info!(
            request,
            min_magnitude = filter.min_magnitude,
            start = %filter.start_date,
            end = %filter.end_date,
            "refreshing earthquakes"
        );
        RefreshTicket { request, filter }
    }

    /// Apply the result of request `request`.
    ///
    /// Success replaces the whole marker set and recenters on the first event.
    /// Failure keeps the current markers and view.
    pub fn complete_refresh(
        &mut self,
        request: u64,
        result: Result<Vec<EarthquakeEvent>, FetchError>,
    ) -> RefreshOutcome {
        if self.ordering == RefreshOrdering::LastRequestWins && request != self.latest_request {
            tracing::debug!(request, latest = self.latest_request, "discarding stale response");
            return RefreshOutcome::Stale {
                request,
                latest: self.latest_request,
            };
        }

        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(request, error = %e, "earthquake refresh failed");
                // Markers from a newer request are on screen; keep their status.
                if self.markers.generation().is_some_and(|shown| shown > request) {
                    return RefreshOutcome::Failed(e);
                }
                self.status = RefreshStatus::Failed {
                    reason: e.to_string(),
                };
                return RefreshOutcome::Failed(e);
            }
        };

        self.open_popup = None;
        self.markers.replace_all(request, events);

        let recentered = match self.markers.first() {
            Some(first) => {
                let center = first.position();
                self.viewport.set_view(center, self.follow_zoom);
                true
            }
            None => false,
        };

        let count = self.markers.len();
        self.status = RefreshStatus::Loaded { count };
        tracing::info!(request, count, recentered, "earthquake markers updated");
        RefreshOutcome::Applied {
            markers: count,
            recentered,
        }
    }

    pub fn open_popup(&mut self, id: MarkerId) {
        if self.markers.get(id).is_some() {
            tracing::debug!(marker = id.0, "opening popup");
            self.open_popup = Some(id);
        }
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    pub fn open_popup_id(&self) -> Option<MarkerId> {
        self.open_popup
    }
}
