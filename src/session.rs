//! One loaded graph with its layout, interest scores and highlight state,
//! driven the way an interactive view drives them.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::export::Snapshot;
use crate::graph::{Archetype, Graph, Link, NeighborMap, Node};
use crate::highlight::Highlight;
use crate::interest::{
    DateRange, DoiParams, InterestComponents, InterestEngine, WeightSet, archetype_relevance,
    date_relevance, search_relevance,
};
use crate::layout::{LayoutEngine, LayoutPhase};

pub struct Session {
    archetypes: Vec<Archetype>,
    links: Vec<Link>,
    neighbors: Arc<NeighborMap>,
    layout: LayoutEngine,
    interest: InterestEngine,
    params: DoiParams,
    weight_set: WeightSet,
    highlight: Highlight,
    scores_dirty: bool,
    revision: u64,
}

impl Session {
    /// Every archetype starts selected and the date filter starts at the
    /// configured range. Positions are seeded and scores computed up front.
    pub fn new(graph: Graph, config: &ExplorerConfig) -> Self {
        let Graph {
            archetypes,
            nodes,
            links,
            neighbors,
        } = graph;
        let neighbors = Arc::new(neighbors);

        let mut params = DoiParams::new(config.filters.date_range());
        params.selected_archetypes = (0..archetypes.len() as u32)
            .chain(nodes.iter().map(|node| node.group))
            .collect();

        let mut layout = LayoutEngine::new(nodes, &links, &config.layout);
        layout.initialize();
        let interest = InterestEngine::new(Arc::clone(&neighbors), &config.interest);

        let mut session = Self {
            archetypes,
            links,
            neighbors,
            layout,
            interest,
            params,
            weight_set: config.interest.weights,
            highlight: Highlight::All,
            scores_dirty: true,
            revision: 0,
        };
        session.refresh_scores();
        info!(
            "session ready: {} nodes, {} links, {} archetypes",
            session.layout.nodes().len(),
            session.links.len(),
            session.archetypes.len()
        );
        session
    }

    pub fn set_search(&mut self, query: &str) {
        if self.params.search_query != query {
            self.params.search_query = query.to_owned();
            self.scores_dirty = true;
        }
    }

    pub fn set_archetype(&mut self, group: u32, selected: bool) {
        let changed = if selected {
            self.params.selected_archetypes.insert(group)
        } else {
            self.params.selected_archetypes.remove(&group)
        };
        self.scores_dirty |= changed;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        if self.params.date_range != range {
            self.params.date_range = range;
            self.scores_dirty = true;
        }
    }

    /// Unknown ids are ignored so a stale selection cannot zero every `J`.
    pub fn set_focus(&mut self, focus: Option<&str>) {
        if let Some(id) = focus
            && self.layout.index_of(id).is_none()
        {
            warn!("ignoring focus on unknown node {id}");
            return;
        }
        if self.params.focus.as_deref() != focus {
            self.params.focus = focus.map(str::to_owned);
            self.scores_dirty = true;
        }
    }

    pub fn set_weight_set(&mut self, set: WeightSet) {
        if self.weight_set != set {
            self.weight_set = set;
            self.interest.set_weight_set(set);
            self.scores_dirty = true;
        }
    }

    /// Rescores every node when a filter, the focus or the weights changed
    /// since the last pass. Returns whether scores were recomputed.
    pub fn refresh_scores(&mut self) -> bool {
        if !self.scores_dirty {
            return false;
        }
        let scores = self.interest.scores(self.layout.nodes(), &self.params);
        self.layout.apply_scores(&scores);
        self.scores_dirty = false;
        self.revision += 1;
        debug!("scores refreshed (revision {})", self.revision);
        true
    }

    pub fn step(&mut self) {
        self.layout.step();
    }

    pub fn run(&mut self, iterations: usize) {
        self.layout.run(iterations);
    }

    pub fn run_configured(&mut self) {
        self.layout.run_configured();
    }

    pub fn pin(&mut self, id: &str, x: f32, y: f32) {
        self.layout.pin(id, x, y);
    }

    pub fn unpin(&mut self, id: &str) {
        self.layout.unpin(id);
    }

    pub fn highlight_nodes(&mut self, ids: &[&str]) {
        self.highlight = Highlight::focused(ids.iter().copied(), &self.neighbors);
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
    }

    pub fn components(&mut self, id: &str) -> Option<InterestComponents> {
        let index = self.layout.index_of(id)?;
        let nodes = self.layout.nodes();
        Some(self.interest.components(&nodes[index], nodes, &self.params))
    }

    /// Hops from the current focus, `None` without a focus or when unreachable.
    pub fn focus_distance(&mut self, id: &str) -> Option<usize> {
        let focus = self.params.focus.as_deref()?;
        self.interest.focus_distance(focus, id)
    }

    /// Node indices passing all three filters at once: search, archetype and
    /// date range.
    pub fn filter_matches(&self) -> Vec<usize> {
        let query = self.params.search_query.to_lowercase();
        self.layout
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                search_relevance(&node.name, &query) > 0.0
                    && archetype_relevance(node.group, &self.params.selected_archetypes) > 0.0
                    && date_relevance(node.timespan, self.params.date_range) > 0.0
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.layout.nodes(), &self.links, &self.highlight)
    }

    pub fn nodes(&self) -> &[Node] {
        self.layout.nodes()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn archetype_name(&self, group: u32) -> Option<&str> {
        self.archetypes
            .get(group as usize)
            .map(|archetype| archetype.name.as_str())
    }

    pub fn neighbors(&self) -> &NeighborMap {
        &self.neighbors
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn phase(&self) -> LayoutPhase {
        self.layout.phase()
    }

    pub fn params(&self) -> &DoiParams {
        &self.params
    }

    pub fn focus(&self) -> Option<&str> {
        self.params.focus.as_deref()
    }

    pub fn weight_set(&self) -> WeightSet {
        self.weight_set
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Bumped on every rescore.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
