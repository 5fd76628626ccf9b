use std::time::{Duration, Instant};

use eframe::egui::{Context, Pos2, Vec2};

use doi_explorer::config::ExplorerConfig;
use doi_explorer::dataset::year_of;
use doi_explorer::layout::PlaybackTimer;
use doi_explorer::session::Session;

mod graph;
mod render_utils;
mod ui;

/// Rows shown in the search results list before it scrolls.
const SEARCH_RESULT_LIMIT: usize = 200;

pub struct ExplorerApp {
    session: Session,
    timer: PlaybackTimer,
    pan: Vec2,
    zoom: f32,
    search: String,
    year_from: i32,
    year_to: i32,
    year_bounds: (i32, i32),
    hovered: Option<HoverTarget>,
    dragging: Option<String>,
    search_results: Option<SearchResultsCache>,
    view_scratch: ViewScratch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoverTarget {
    Node(usize),
    Link(usize),
}

/// Ranked result rows for one scoring revision.
struct SearchResultsCache {
    revision: u64,
    rows: Vec<usize>,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

impl ExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        session: Session,
        config: &ExplorerConfig,
    ) -> Self {
        let mut timer = PlaybackTimer::new(config.playback.interval());
        if config.playback.autoplay {
            timer.start(Instant::now());
        }

        let range = session.params().date_range;
        let year_from = year_of(range.min).unwrap_or(1910);
        let year_to = year_of(range.max).unwrap_or(2024);
        let year_bounds = Self::year_bounds(&session, year_from, year_to);

        Self {
            search: session.params().search_query.clone(),
            session,
            timer,
            pan: Vec2::ZERO,
            zoom: 1.0,
            year_from,
            year_to,
            year_bounds,
            hovered: None,
            dragging: None,
            search_results: None,
            view_scratch: ViewScratch::default(),
        }
    }

    /// Slider bounds covering both the configured range and every dated node.
    fn year_bounds(session: &Session, year_from: i32, year_to: i32) -> (i32, i32) {
        session
            .nodes()
            .iter()
            .filter_map(|node| node.timespan)
            .flat_map(|span| [year_of(span.begin), year_of(span.end)])
            .flatten()
            .fold((year_from, year_to), |(min, max), year| {
                (min.min(year), max.max(year))
            })
    }

    fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    fn focus_node(&mut self, id: &str) {
        self.session.set_focus(Some(id));
        if let Some(node) = self.session.layout().node(id) {
            self.pan = (self.session.layout().center() - node.position) * self.zoom;
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.timer.poll(now) {
            self.session.step();
        }

        self.show(ctx);

        if self.session.refresh_scores() {
            ctx.request_repaint();
        }
        if let Some(wait) = self.timer.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }
}
