use std::collections::HashSet;

use crate::graph::NeighborMap;

/// Opacity applied to nodes and links outside the active set.
pub const DIMMED_OPACITY: f32 = 0.3;

/// The focus nodes plus their direct neighbours. Ids missing from the
/// neighbour map still count as active themselves.
pub fn active_set<'a, I>(focus: I, neighbors: &NeighborMap) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut active = HashSet::new();
    for id in focus {
        if let Some(adjacent) = neighbors.neighbors(id) {
            active.extend(adjacent.iter().cloned());
        }
        active.insert(id.to_owned());
    }
    active
}

/// Visibility partition consumed by the renderer. Never touches positions or
/// scores.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    /// Nothing emphasised; everything drawn at full opacity.
    #[default]
    All,
    Focused(HashSet<String>),
}

impl Highlight {
    pub fn focused<'a, I>(focus: I, neighbors: &NeighborMap) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::Focused(active_set(focus, neighbors))
    }

    pub fn clear(&mut self) {
        *self = Self::All;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Focused(_))
    }

    pub fn is_node_active(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Focused(active) => active.contains(id),
        }
    }

    /// A link stays lit only when both of its endpoints are.
    pub fn is_link_active(&self, source: &str, target: &str) -> bool {
        self.is_node_active(source) && self.is_node_active(target)
    }

    pub fn node_opacity(&self, id: &str) -> f32 {
        if self.is_node_active(id) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }

    pub fn link_opacity(&self, source: &str, target: &str) -> f32 {
        if self.is_link_active(source, target) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }

    pub fn active_ids(&self) -> Option<&HashSet<String>> {
        match self {
            Self::All => None,
            Self::Focused(active) => Some(active),
        }
    }
}
