use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use doi_explorer::dataset::year_start_millis;
use doi_explorer::interest::{DateRange, WeightSet};

use super::super::{ExplorerApp, SEARCH_RESULT_LIMIT, SearchResultsCache};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ExplorerApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search")
            .on_hover_text("Case-insensitive substring match on vertex titles.");
        if ui.text_edit_singleline(&mut self.search).changed() {
            self.session.set_search(&self.search);
        }

        ui.add_space(6.0);
        ui.label("Archetypes");
        ui.horizontal_wrapped(|ui| {
            let groups: Vec<(u32, String)> = self
                .session
                .archetypes()
                .iter()
                .enumerate()
                .map(|(group, archetype)| (group as u32, archetype.name.clone()))
                .collect();
            for (group, name) in groups {
                let mut selected = self.session.params().selected_archetypes.contains(&group);
                if ui.checkbox(&mut selected, name).changed() {
                    self.session.set_archetype(group, selected);
                }
            }
        });

        ui.add_space(6.0);
        ui.label("Date range");
        let (min_year, max_year) = self.year_bounds;
        let mut dates_changed = false;
        dates_changed |= ui
            .add(egui::Slider::new(&mut self.year_from, min_year..=max_year).text("from"))
            .changed();
        dates_changed |= ui
            .add(egui::Slider::new(&mut self.year_to, min_year..=max_year).text("to"))
            .changed();
        if dates_changed {
            self.year_to = self.year_to.max(self.year_from);
            if let (Some(min), Some(max)) = (
                year_start_millis(self.year_from),
                year_start_millis(self.year_to + 1),
            ) {
                self.session.set_date_range(DateRange::new(min, max - 1));
            }
        }

        ui.separator();
        ui.label("Interest weights");
        let mut weight_set = self.session.weight_set();
        egui::ComboBox::from_id_salt("weight_set")
            .selected_text(weight_set.label())
            .show_ui(ui, |ui| {
                for set in WeightSet::ALL {
                    ui.selectable_value(&mut weight_set, set, set.label());
                }
            });
        if weight_set != self.session.weight_set() {
            self.session.set_weight_set(weight_set);
        }
        let weights = weight_set.weights();
        ui.small(format!(
            "α {:.1}  β {:.1}  γ {:.1}",
            weights.alpha, weights.beta, weights.gamma
        ));

        ui.separator();
        self.draw_search_results(ui);
    }

    fn draw_search_results(&mut self, ui: &mut Ui) {
        let rows = self.search_result_rows();
        ui.label(format!("Matches ({})", rows.len()));

        if rows.is_empty() {
            ui.label("No vertices match every filter.");
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for &index in rows.iter().take(SEARCH_RESULT_LIMIT) {
                    let Some(node) = self.session.nodes().get(index) else {
                        continue;
                    };
                    let is_focus = self.session.focus() == Some(node.id.as_str());
                    ui.horizontal(|ui| {
                        if ui.selectable_label(is_focus, node.name.as_str()).clicked() {
                            clicked = Some(node.id.clone());
                        }
                        if let Some(archetype) = self.session.archetype_name(node.group) {
                            ui.weak(archetype);
                        }
                    });
                }
            });

        if let Some(id) = clicked {
            self.focus_node(&id);
        }
    }

    /// Vertices passing every filter, best fuzzy match first; with an empty
    /// query the most interesting come first.
    fn search_result_rows(&mut self) -> Vec<usize> {
        let revision = self.session.revision();
        if let Some(cache) = &self.search_results
            && cache.revision == revision
        {
            return cache.rows.clone();
        }

        let query = self.session.params().search_query.clone();
        let nodes = self.session.nodes();
        let mut rows = self.session.filter_matches();
        if query.is_empty() {
            rows.sort_by(|&a, &b| nodes[b].doi.total_cmp(&nodes[a].doi));
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(usize, i64)> = rows
                .into_iter()
                .map(|index| {
                    let score = fuzzy_match_score(&matcher, &nodes[index].name, &query);
                    (index, score.unwrap_or(0))
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            rows = scored.into_iter().map(|(index, _)| index).collect();
        }

        self.search_results = Some(SearchResultsCache {
            revision,
            rows: rows.clone(),
        });
        rows
    }
}
