use std::collections::{HashMap, HashSet};
use std::time::Duration;

use gnsscore::applink::AppLink;
use gnsscore::catalog::{self, LatLng, SiteRecord, SiteStore};
use gnsscore::map::tiles::{visible_tiles, ERROR_TILE_URL};
use gnsscore::map::{self, clamp_zoom, MercatorHelper, SelectionState, TileId};
use gnsscore::plot::tracker::NARROW_VIEWPORT_PX;
use gnsscore::plot::{plot_header_title, plot_image_urls, PlotKind, PlotLoadTracker};
use gnsscore::search::{
    CollapseState, Effect, SearchCollapse, SubmitDecision, SubmitGuard, ToggleTarget, Transition,
};
use gnsscore::telemetry::{EventLog, LoadMetrics};
use iced::widget::{
    button, canvas::{self, Canvas}, column, container, image, operation, radio, row,
    scrollable, space, text, text_input, tooltip, Column, Container, Id,
};
use iced::{event, window, Alignment, Element, Event, Length, Size, Subscription, Task, Theme, Vector};

mod scene;

use scene::MapScene;

/// Map height when the panels stack on a narrow window; also the offset
/// the auto-scroll jumps to so the plot panel becomes visible.
const MAP_HEIGHT_NARROW: f32 = 420.0;
const MAP_HEIGHT_WIDE: f32 = 560.0;
/// Matches the collapse animation of the web header.
const COLLAPSE_ANIMATION: Duration = Duration::from_millis(350);
const ATTRIBUTION: &str = "Map data (c) OpenStreetMap contributors; tiles served by GeoNet.";

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Viewer::boot, Viewer::update, Viewer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Viewer) -> String {
    "GNSS Time Series Viewer".into()
}

fn application_subscription(_: &Viewer) -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Window(window::Event::Unfocused) => Some(Message::PageHidden),
        _ => None,
    })
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Light
}

struct Viewer {
    origin: String,
    store: SiteStore,
    selection: SelectionState,
    plot_kind: PlotKind,
    plots: Vec<PlotSlot>,
    plot_header: Option<String>,
    tracker: PlotLoadTracker,
    search: SearchCollapse,
    query: String,
    query_secondary: String,
    centre: LatLng,
    zoom: u8,
    tiles: HashMap<TileId, image::Handle>,
    pending_tiles: HashSet<TileId>,
    error_tile: Option<image::Handle>,
    map_cache: canvas::Cache,
    window: Size,
    metrics: LoadMetrics,
    app_link: Option<AppLink>,
    status: String,
    history: Vec<String>,
}

struct PlotSlot {
    url: String,
    handle: Option<image::Handle>,
}

#[derive(Debug, Clone)]
enum Message {
    SitesFetched(Result<Vec<SiteRecord>, String>),
    TileFetched(TileId, Result<Vec<u8>, String>),
    ErrorTileFetched(Result<Vec<u8>, String>),
    SiteClicked(usize),
    MapDragged(Vector),
    MapZoomed(i32),
    PlotFetched {
        generation: u64,
        slot: usize,
        result: Result<Vec<u8>, String>,
    },
    PlotKindPicked(PlotKind),
    SearchToggled,
    SearchShown,
    SearchCollapsed,
    QueryChanged(String),
    QuerySubmitted,
    SecondaryQueryChanged(String),
    SecondaryQuerySubmitted,
    WindowResized(Size),
    PageHidden,
}

impl Viewer {
    fn boot() -> (Self, Task<Message>) {
        let origin = catalog::DEFAULT_ORIGIN.to_string();
        let mut viewer = Viewer {
            origin: origin.clone(),
            store: SiteStore::new(),
            selection: SelectionState::new(),
            plot_kind: PlotKind::default(),
            plots: Vec::new(),
            plot_header: None,
            tracker: PlotLoadTracker::new(),
            search: SearchCollapse::new(),
            query: String::new(),
            query_secondary: String::new(),
            centre: map::NZ_CENTRE,
            zoom: map::DEFAULT_ZOOM,
            tiles: HashMap::new(),
            pending_tiles: HashSet::new(),
            error_tile: None,
            map_cache: canvas::Cache::new(),
            window: Size::new(1280.0, 800.0),
            metrics: LoadMetrics::new(),
            app_link: AppLink::for_user_agent(&platform_user_agent()),
            status: "Loading site catalog...".into(),
            history: Vec::new(),
        };

        let sites = Task::perform(fetch_sites(origin), Message::SitesFetched);
        let error_tile = Task::perform(
            fetch_bytes(ERROR_TILE_URL.to_string()),
            Message::ErrorTileFetched,
        );
        let tiles = viewer.request_tiles();
        (viewer, Task::batch([sites, error_tile, tiles]))
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::SitesFetched(Ok(sites)) => {
                let count = sites.len();
                EventLog::catalog_loaded(count);
                state.metrics.record_sites_rendered(count);
                state.store.fill(sites);
                state.status = format!("{count} sites on the map");
                state.push_history(format!("Catalog: {count} sites"));
                state.map_cache.clear();
                Task::none()
            }
            Message::SitesFetched(Err(error)) => {
                EventLog::catalog_failed(&error);
                state.metrics.record_fetch_error();
                state.status = format!("Site catalog unavailable: {error}");
                Task::none()
            }
            Message::TileFetched(id, Ok(bytes)) => {
                state.pending_tiles.remove(&id);
                state.tiles.insert(id, image::Handle::from_bytes(bytes));
                state.map_cache.clear();
                Task::none()
            }
            Message::TileFetched(id, Err(error)) => {
                state.pending_tiles.remove(&id);
                EventLog::tile_failed(&id.url(), &error);
                if let Some(fallback) = &state.error_tile {
                    state.tiles.insert(id, fallback.clone());
                    state.map_cache.clear();
                }
                Task::none()
            }
            Message::ErrorTileFetched(Ok(bytes)) => {
                state.error_tile = Some(image::Handle::from_bytes(bytes));
                Task::none()
            }
            Message::ErrorTileFetched(Err(error)) => {
                EventLog::tile_failed(ERROR_TILE_URL, &error);
                Task::none()
            }
            Message::SiteClicked(index) => {
                state.selection.select(index);
                if let Some(site) = state.store.site(index) {
                    EventLog::site_selected(&site.site_id);
                    state.push_history(format!("Selected {}", site.site_id));
                }
                state.map_cache.clear();
                state.load_plots()
            }
            Message::PlotKindPicked(kind) => {
                state.plot_kind = kind;
                state.load_plots()
            }
            Message::PlotFetched {
                generation,
                slot,
                result,
            } => state.on_plot_fetched(generation, slot, result),
            Message::MapDragged(delta) => {
                let (cx, cy) = MercatorHelper::project(state.centre, state.zoom);
                state.centre = MercatorHelper::unproject(
                    cx - f64::from(delta.x),
                    cy - f64::from(delta.y),
                    state.zoom,
                );
                state.map_cache.clear();
                state.request_tiles()
            }
            Message::MapZoomed(step) => {
                let zoomed = clamp_zoom(i32::from(state.zoom) + step);
                if zoomed == state.zoom {
                    return Task::none();
                }
                state.zoom = zoomed;
                state.map_cache.clear();
                state.request_tiles()
            }
            Message::SearchToggled => state.on_search_toggled(),
            Message::SearchShown => {
                // a stale completion after the box was driven closed must
                // not disarm the toggle
                if state.search.state() != CollapseState::Expanding {
                    return Task::none();
                }
                let effects = state.search.apply(Transition::Shown);
                state.run_search_effects(effects)
            }
            Message::SearchCollapsed => {
                state.search.apply(Transition::Hidden);
                Task::none()
            }
            Message::QueryChanged(value) => {
                state.query = value;
                Task::none()
            }
            Message::QuerySubmitted => match state.search.submit(&state.query) {
                SubmitDecision::Allow => {
                    state.status = format!("Searching GeoNet for \"{}\"", state.query);
                    state.push_history(format!("Search: {}", state.query));
                    Task::none()
                }
                SubmitDecision::Suppress(effects) => state.run_search_effects(effects),
            },
            Message::SecondaryQueryChanged(value) => {
                state.query_secondary = value;
                Task::none()
            }
            Message::SecondaryQuerySubmitted => {
                if SubmitGuard::allows(&state.query_secondary) {
                    state.status = format!("Searching GeoNet for \"{}\"", state.query_secondary);
                    state.push_history(format!("Search: {}", state.query_secondary));
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                state.window = size;
                state.map_cache.clear();
                state.request_tiles()
            }
            Message::PageHidden => {
                // no hide animation while the window is not visible
                for effect in state.search.page_hidden() {
                    if effect == Effect::Collapse {
                        state.search.apply(Transition::Hidden);
                    }
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let narrow = state.window.width < NARROW_VIEWPORT_PX;

        let mut page = Column::new().spacing(12).padding(16).push(state.view_header());
        if narrow {
            page = page.push(state.view_secondary_search());
        }

        let map_panel = state.view_map(narrow);
        let content: Element<'_, Message> = if state.plot_header.is_some() {
            if narrow {
                column![map_panel, state.view_plots()].spacing(12).into()
            } else {
                row![
                    container(map_panel).width(Length::FillPortion(5)),
                    container(state.view_plots()).width(Length::FillPortion(5)),
                ]
                .spacing(12)
                .into()
            }
        } else {
            map_panel
        };
        page = page.push(content).push(state.view_footer());

        scrollable(page)
            .id(page_scroll_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let search: Element<'_, Message> = match self.search.state() {
            CollapseState::Collapsed => button("Search")
                .on_press(Message::SearchToggled)
                .padding(8)
                .into(),
            _ => row![
                text_input("Search GeoNet", &self.query)
                    .on_input(Message::QueryChanged)
                    .on_submit(Message::QuerySubmitted)
                    .padding(6)
                    .width(Length::Fixed(260.0)),
                button("Go").on_press(Message::QuerySubmitted).padding(8),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into(),
        };

        row![
            text("GeoNet GNSS Time Series").size(24),
            space::horizontal(),
            search,
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_secondary_search(&self) -> Element<'_, Message> {
        row![
            text_input("Search GeoNet", &self.query_secondary)
                .on_input(Message::SecondaryQueryChanged)
                .on_submit(Message::SecondaryQuerySubmitted)
                .padding(6),
            button("Search")
                .on_press(Message::SecondaryQuerySubmitted)
                .padding(8),
        ]
        .spacing(8)
        .into()
    }

    fn view_map(&self, narrow: bool) -> Element<'_, Message> {
        let height = if narrow {
            MAP_HEIGHT_NARROW
        } else {
            MAP_HEIGHT_WIDE
        };
        let map = Canvas::new(MapScene {
            sites: self.store.get().unwrap_or_default(),
            selected: self.selection.selected(),
            centre: self.centre,
            zoom: self.zoom,
            tiles: &self.tiles,
            cache: &self.map_cache,
        })
        .width(Length::Fill)
        .height(Length::Fixed(height));

        let attribution = tooltip(
            text("Map data").size(12),
            container(text(ATTRIBUTION).size(12))
                .padding(8)
                .style(container::rounded_box),
            tooltip::Position::Top,
        );

        column![map, attribution].spacing(4).into()
    }

    fn view_plots(&self) -> Element<'_, Message> {
        let header = text(self.plot_header.clone().unwrap_or_default()).size(20);

        let controls = row![
            radio(
                "Displacement",
                PlotKind::Displacement,
                Some(self.plot_kind),
                Message::PlotKindPicked,
            ),
            radio(
                "Multipath",
                PlotKind::Multipath,
                Some(self.plot_kind),
                Message::PlotKindPicked,
            ),
        ]
        .spacing(16);

        let images = self
            .plots
            .iter()
            .fold(Column::new().spacing(8), |col, slot| match &slot.handle {
                Some(handle) => col.push(image(handle.clone()).width(Length::Fill)),
                None => col.push(text(format!("loading {}", slot.url)).size(12)),
            });

        column![header, controls, images].spacing(12).into()
    }

    fn view_footer(&self) -> Element<'_, Message> {
        let mut footer = Column::new().spacing(4);
        if let Some(link) = &self.app_link {
            footer = footer.push(
                row![
                    text("Get the GeoNet Quake app:").size(14),
                    text(link.href).size(14),
                ]
                .spacing(8),
            );
        }

        let snapshot = self.metrics.snapshot();
        footer = footer.push(text(&self.status).size(14)).push(
            text(format!(
                "{} sites | {} of {} plot images loaded",
                snapshot.sites_rendered, snapshot.images_loaded, snapshot.images_requested
            ))
            .size(12),
        );

        let history = if self.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            self.history
                .iter()
                .rev()
                .fold(Column::new().spacing(2), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };
        footer
            .push(Container::new(scrollable(history).height(Length::Fixed(80.0))).padding(4))
            .into()
    }

    /// Starts a plot batch for the current selection; no-op without one.
    fn load_plots(&mut self) -> Task<Message> {
        let Some(index) = self.selection.selected() else {
            return Task::none();
        };
        let Some(site) = self.store.site(index) else {
            return Task::none();
        };

        let urls = plot_image_urls(&self.origin, site, self.plot_kind);
        let header = plot_header_title(&site.name);
        let site_id = site.site_id.clone();

        let generation = self.tracker.begin(urls.len());
        EventLog::plots_requested(&site_id, urls.len());
        self.metrics.record_images_requested(urls.len());
        self.plot_header = Some(header);
        self.plots = urls
            .iter()
            .map(|url| PlotSlot {
                url: url.clone(),
                handle: None,
            })
            .collect();
        // the map panel shrinks to make room; its canvas must re-measure
        self.map_cache.clear();

        let fetches = urls.into_iter().enumerate().map(|(slot, url)| {
            Task::perform(fetch_bytes(url), move |result| Message::PlotFetched {
                generation,
                slot,
                result,
            })
        });
        Task::batch(fetches)
    }

    fn on_plot_fetched(
        &mut self,
        generation: u64,
        slot: usize,
        result: Result<Vec<u8>, String>,
    ) -> Task<Message> {
        if generation != self.tracker.generation() {
            return Task::none();
        }
        match result {
            Ok(bytes) => {
                if let Some(entry) = self.plots.get_mut(slot) {
                    entry.handle = Some(image::Handle::from_bytes(bytes));
                }
                self.metrics.record_image_loaded();
                self.tracker.record_loaded(generation);
                if self.tracker.should_scroll(self.window.width) {
                    return operation::scroll_to(
                        page_scroll_id(),
                        scrollable::AbsoluteOffset {
                            x: 0.0,
                            y: MAP_HEIGHT_NARROW,
                        },
                    );
                }
                Task::none()
            }
            Err(error) => {
                let url = self
                    .plots
                    .get(slot)
                    .map(|entry| entry.url.clone())
                    .unwrap_or_default();
                EventLog::image_failed(&url, &error);
                self.metrics.record_fetch_error();
                Task::none()
            }
        }
    }

    fn on_search_toggled(&mut self) -> Task<Message> {
        match (self.search.state(), self.search.toggle_target()) {
            (CollapseState::Collapsed, ToggleTarget::Armed) => {
                let effects = self.search.apply(Transition::ShowStarted);
                let started = self.run_search_effects(effects);
                let shown = Task::perform(collapse_delay(), |_| Message::SearchShown);
                Task::batch([started, shown])
            }
            _ => Task::none(),
        }
    }

    fn run_search_effects(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::ClearQuery => self.query.clear(),
                // the machine tracks its own toggle target
                Effect::DisarmToggle | Effect::RearmToggle => {}
                Effect::Collapse => {
                    tasks.push(Task::perform(collapse_delay(), |_| Message::SearchCollapsed));
                }
            }
        }
        Task::batch(tasks)
    }

    fn request_tiles(&mut self) -> Task<Message> {
        let (width, height) = self.map_viewport();
        let mut fetches = Vec::new();
        for id in visible_tiles(self.centre, self.zoom, width, height) {
            if self.tiles.contains_key(&id) || self.pending_tiles.contains(&id) {
                continue;
            }
            self.pending_tiles.insert(id);
            fetches.push(Task::perform(fetch_bytes(id.url()), move |result| {
                Message::TileFetched(id, result)
            }));
        }
        Task::batch(fetches)
    }

    fn map_viewport(&self) -> (f32, f32) {
        let width = if self.plot_header.is_some() && self.window.width >= NARROW_VIEWPORT_PX {
            self.window.width / 2.0
        } else {
            self.window.width
        };
        let height = if self.window.width < NARROW_VIEWPORT_PX {
            MAP_HEIGHT_NARROW
        } else {
            MAP_HEIGHT_WIDE
        };
        (width.max(256.0), height.max(256.0))
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_sites(origin: String) -> Result<Vec<SiteRecord>, String> {
    let url = catalog::sites_endpoint(&origin);
    let response = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    let body = response.text().await.map_err(|e| e.to_string())?;
    catalog::parse_site_collection(&body).map_err(|e| e.to_string())
}

async fn fetch_bytes(url: String) -> Result<Vec<u8>, String> {
    let response = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(response.status().to_string());
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

async fn collapse_delay() {
    tokio::time::sleep(COLLAPSE_ANIMATION).await;
}

fn page_scroll_id() -> Id {
    Id::new("viewer-page")
}

/// User-agent token for the running platform, feeding the footer badge.
fn platform_user_agent() -> String {
    match std::env::consts::OS {
        "ios" => "iPhone".to_string(),
        os => os.to_string(),
    }
}
