use eframe::egui::{Vec2, vec2};

use super::roots::{NodeRole, pair_multiplier};

/// Distances below this are clamped so that `k² / d` stays finite.
pub(super) const MIN_DISTANCE: f32 = 0.01;

#[derive(Clone, Copy)]
pub(super) struct RepulsionParams {
    pub(super) k: f32,
    pub(super) root_repulsion: f32,
    pub(super) isolated_root_repulsion: f32,
}

/// Unit direction from `from` to `to` and their clamped distance. Coincident
/// points get a deterministic direction derived from the pair indices.
fn separation(from: Vec2, to: Vec2, from_index: usize, to_index: usize) -> (Vec2, f32) {
    let delta = to - from;
    let distance = delta.length();
    let direction = if distance > 1.0e-6 && distance.is_finite() {
        delta / distance
    } else {
        let angle = ((from_index as f32) * 0.618_034 + (to_index as f32) * 0.414_214)
            * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    };
    (direction, distance.max(MIN_DISTANCE))
}

/// Pairwise `k² / d` repulsion; O(n²).
pub(super) fn accumulate_repulsion(
    positions: &[Vec2],
    roles: &[NodeRole],
    params: RepulsionParams,
    forces: &mut [Vec2],
) {
    let k_sq = params.k * params.k;
    for first in 0..positions.len() {
        for second in (first + 1)..positions.len() {
            let multiplier = pair_multiplier(
                roles[first],
                roles[second],
                params.root_repulsion,
                params.isolated_root_repulsion,
            );
            if multiplier <= 0.0 {
                continue;
            }

            let (direction, distance) =
                separation(positions[first], positions[second], first, second);
            let push = direction * (k_sq / distance * multiplier);
            forces[first] -= push;
            forces[second] += push;
        }
    }
}

/// `d² / k` attraction along every edge.
pub(super) fn accumulate_attraction(
    positions: &[Vec2],
    edges: &[(usize, usize)],
    k: f32,
    forces: &mut [Vec2],
) {
    for &(source, target) in edges {
        if source == target {
            continue;
        }

        let delta = positions[target] - positions[source];
        let distance = delta.length();
        if distance <= f32::EPSILON || !distance.is_finite() {
            continue;
        }

        let pull = delta / distance * (distance * distance / k);
        forces[source] += pull;
        forces[target] -= pull;
    }
}

pub(super) fn accumulate_centering(
    positions: &[Vec2],
    center: Vec2,
    strength: f32,
    forces: &mut [Vec2],
) {
    for (force, position) in forces.iter_mut().zip(positions) {
        *force += (center - *position) * strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: RepulsionParams = RepulsionParams {
        k: 10.0,
        root_repulsion: 4.0,
        isolated_root_repulsion: 1.0,
    };

    #[test]
    fn repulsion_pushes_apart() {
        let positions = [vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let mut forces = [Vec2::ZERO; 2];
        accumulate_repulsion(
            &positions,
            &[NodeRole::Member, NodeRole::Member],
            PARAMS,
            &mut forces,
        );

        assert!((forces[0].x + 10.0).abs() < 1.0e-4);
        assert!((forces[1].x - 10.0).abs() < 1.0e-4);
        assert_eq!(forces[0].y, 0.0);
    }

    #[test]
    fn root_pairs_repel_harder() {
        let positions = [vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let mut forces = [Vec2::ZERO; 2];
        accumulate_repulsion(
            &positions,
            &[NodeRole::Root, NodeRole::Root],
            PARAMS,
            &mut forces,
        );
        assert!((forces[1].x - 40.0).abs() < 1.0e-3);
    }

    #[test]
    fn coincident_points_stay_finite() {
        let positions = [vec2(5.0, 5.0); 3];
        let mut forces = [Vec2::ZERO; 3];
        accumulate_repulsion(&positions, &[NodeRole::Member; 3], PARAMS, &mut forces);

        for force in forces {
            assert!(force.x.is_finite() && force.y.is_finite());
            assert!(force.length() > 0.0);
        }
    }

    #[test]
    fn attraction_pulls_together() {
        let positions = [vec2(0.0, 0.0), vec2(20.0, 0.0)];
        let mut forces = [Vec2::ZERO; 2];
        accumulate_attraction(&positions, &[(0, 1), (1, 1)], PARAMS.k, &mut forces);

        assert!((forces[0].x - 40.0).abs() < 1.0e-3);
        assert!((forces[1].x + 40.0).abs() < 1.0e-3);
    }

    #[test]
    fn centering_points_at_center() {
        let positions = [vec2(0.0, 10.0)];
        let mut forces = [Vec2::ZERO];
        accumulate_centering(&positions, vec2(10.0, 10.0), 0.1, &mut forces);
        assert!((forces[0].x - 1.0).abs() < 1.0e-6);
        assert_eq!(forces[0].y, 0.0);
    }
}
