use catalog::DateRegistry;
use foundation::{DatasetSnapshot, ObservationDate};
use layers::farms::FarmLayer;
use layers::ndvi::NdviLayer;
use layers::surface::MapSurface;
use layers::{Layer, LayerKind};
use runtime::{names, EventBus, Metrics};
use streaming::endpoints;

use crate::backend::{BoxFuture, MapApi};
use crate::error::ClientError;
use crate::loader::{LoadOutcome, LoadTarget, PendingLoad};
use crate::session::SessionState;

const NDVI_LAYER_ID: u64 = 1;
const FARM_LAYER_ID: u64 = 2;

/// User interactions the shell reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A data-layer radio input was selected.
    SelectLayer(LayerKind),
    /// The calendar button was pressed.
    ToggleCalendar,
    /// A date was picked in the calendar.
    PickDate(ObservationDate),
    /// The chat button was pressed.
    OpenChat,
    /// The instructions panel was dismissed.
    HideInstructions,
}

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    None,
    /// Leave the map for another page.
    Navigate(&'static str),
    /// A snapshot load ran to completion.
    Loaded(LoadOutcome),
}

/// Owns the map surface and wires UI events to data loads.
///
/// Handlers take `&mut self` and run on a single task. Loads are split into
/// [`MapShell::begin_load`], [`MapShell::fetch`] and
/// [`MapShell::complete_load`] so overlapping requests can finish in any
/// order; only the newest one is applied.
pub struct MapShell<A> {
    api: A,
    surface: MapSurface,
    ndvi: NdviLayer,
    farms: FarmLayer,
    dates: DateRegistry,
    session: SessionState,
    events: EventBus,
    metrics: Metrics,
    calendar_open: bool,
    instructions_visible: bool,
}

impl<A: MapApi> MapShell<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            surface: MapSurface::default(),
            ndvi: NdviLayer::new(NDVI_LAYER_ID),
            farms: FarmLayer::new(FARM_LAYER_ID),
            dates: DateRegistry::new(),
            session: SessionState::new(),
            events: EventBus::new(),
            metrics: Metrics::new(),
            calendar_open: false,
            instructions_visible: true,
        }
    }

    /// Page-load sequence: farm pins, then the latest snapshot.
    pub async fn start(&mut self) -> LoadOutcome {
        self.load_farms().await;
        self.resolve_and_load(LoadTarget::Latest).await
    }

    /// Fetches farm locations and pins them. Failures are logged only.
    pub async fn load_farms(&mut self) {
        match self.api.farms().await {
            Ok(farms) => {
                let markers = self.farms.markers(&farms);
                let skipped = farms.len() - markers.len();
                if skipped > 0 {
                    self.events.warn(
                        "map.farms",
                        format!("{skipped} farm(s) without usable coordinates"),
                    );
                }
                self.events
                    .info("map.farms", format!("{} farm marker(s)", markers.len()));
                self.surface.add_farm_markers(markers);
                self.metrics
                    .set_gauge(names::FARM_MARKERS, self.surface.farm_markers().len() as i64);
            }
            Err(err) => self
                .events
                .error("map.farms", format!("failed to fetch farm data: {err}")),
        }
    }

    /// Loads `target` and replaces the NDVI overlay with it.
    pub async fn resolve_and_load(&mut self, target: LoadTarget) -> LoadOutcome {
        let pending = self.begin_load(target);
        let result = self.fetch(&pending).await;
        self.complete_load(pending, result)
    }

    /// Issues a token for `target`; any earlier pending load becomes stale.
    pub fn begin_load(&mut self, target: LoadTarget) -> PendingLoad {
        self.metrics.inc(names::LOADS_STARTED);
        self.session.loader.begin(target)
    }

    pub fn fetch(
        &self,
        pending: &PendingLoad,
    ) -> BoxFuture<'_, Result<DatasetSnapshot, ClientError>> {
        self.api.snapshot(pending.target.clone())
    }

    /// Applies a fetched snapshot if `pending` is still the newest load.
    ///
    /// A successful snapshot's date becomes the current date even when it
    /// differs from what was requested. Failures leave everything as it was.
    pub fn complete_load(
        &mut self,
        pending: PendingLoad,
        result: Result<DatasetSnapshot, ClientError>,
    ) -> LoadOutcome {
        if !self.session.loader.is_current(&pending) {
            self.metrics.inc(names::LOADS_STALE);
            self.events.debug(
                "map.load",
                format!("dropping stale response for {}", pending.target),
            );
            return LoadOutcome::Stale;
        }
        if self.session.layer == LayerKind::None {
            self.metrics.inc(names::LOADS_STALE);
            self.events.debug(
                "map.load",
                format!("NDVI layer is off, not drawing {}", pending.target),
            );
            return LoadOutcome::Stale;
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.metrics.inc(names::LOADS_FAILED);
                self.events.error(
                    "map.load",
                    format!("failed to load data for {}: {err}", pending.target),
                );
                return LoadOutcome::Failed(err);
            }
        };

        let commands = self
            .ndvi
            .render(&snapshot, self.session.current_date.as_ref());
        self.surface.apply(commands);

        if let Some(date) = snapshot.date {
            if let LoadTarget::Date(requested) = &pending.target {
                if *requested != date {
                    self.events.warn(
                        "map.load",
                        format!("requested {requested}, server returned {date}"),
                    );
                }
            }
            self.dates.mark_active(date.clone());
            self.session.current_date = Some(date);
        }

        let markers = self.surface.overlay_marker_count();
        self.metrics.inc(names::LOADS_APPLIED);
        self.metrics.set_gauge(names::OVERLAY_MARKERS, markers as i64);
        self.events.info(
            "map.load",
            format!("{} NDVI point(s) for {}", markers, pending.target),
        );
        LoadOutcome::Applied {
            date: self.session.current_date.clone(),
            markers,
        }
    }

    pub async fn handle(&mut self, event: UiEvent) -> ShellEffect {
        match event {
            UiEvent::SelectLayer(kind) => self.select_layer(kind).await,
            UiEvent::ToggleCalendar => {
                self.toggle_calendar().await;
                ShellEffect::None
            }
            UiEvent::PickDate(date) => {
                self.calendar_open = false;
                self.session.layer = LayerKind::Ndvi;
                ShellEffect::Loaded(self.resolve_and_load(LoadTarget::Date(date)).await)
            }
            UiEvent::OpenChat => ShellEffect::Navigate(endpoints::CHAT_PAGE),
            UiEvent::HideInstructions => {
                self.instructions_visible = false;
                ShellEffect::None
            }
        }
    }

    async fn select_layer(&mut self, kind: LayerKind) -> ShellEffect {
        self.session.layer = kind;
        match kind {
            LayerKind::Ndvi => {
                let target = match &self.session.current_date {
                    Some(date) => LoadTarget::Date(date.clone()),
                    None => LoadTarget::Latest,
                };
                ShellEffect::Loaded(self.resolve_and_load(target).await)
            }
            LayerKind::None => {
                // Responses still in flight must not bring the overlay back.
                self.session.loader.invalidate();
                let ndvi_id = self.ndvi.id();
                if self.surface.overlay().is_some_and(|o| o.layer == ndvi_id) {
                    self.surface.detach_overlay();
                    self.events.debug("map.layer", "NDVI overlay removed");
                }
                self.metrics.set_gauge(names::OVERLAY_MARKERS, 0);
                ShellEffect::None
            }
        }
    }

    /// Opens or closes the calendar; the first opening fetches the dates.
    async fn toggle_calendar(&mut self) {
        self.calendar_open = !self.calendar_open;
        if self.calendar_open && !self.dates.is_populated() {
            self.fetch_available_dates().await;
        }
    }

    /// Fetches the date index unless it is already populated.
    pub async fn fetch_available_dates(&mut self) {
        if self.dates.is_populated() {
            return;
        }
        match self.api.dates().await {
            Ok(dates) => {
                let n = dates.len();
                if self.dates.populate(dates) {
                    self.events
                        .info("map.dates", format!("{n} observation date(s) available"));
                }
            }
            Err(err) => self
                .events
                .error("map.dates", format!("failed to fetch available dates: {err}")),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn dates(&self) -> &DateRegistry {
        &self.dates
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }
}
