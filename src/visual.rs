//! Colour and size mapping shared by the viewer and the export path.

use crate::graph::Node;

pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub const BASE_RADIUS: f32 = 30.0;
pub const MAX_RADIUS: f32 = 50.0;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

pub fn group_color(group: u32) -> &'static str {
    CATEGORY10[group as usize % CATEGORY10.len()]
}

/// `#rrggbb` (leading `#` optional). Malformed input yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

pub fn rgb_to_hsl([r, g, b]: [u8; 3]) -> Hsl {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h / 6.0 * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

pub fn hsl_to_rgb(hsl: Hsl) -> [u8; 3] {
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);
    let a = hsl.s.clamp(0.0, 100.0) * l.min(1.0 - l) / 100.0;
    let channel = |n: f32| {
        let k = (n + hsl.h.rem_euclid(360.0) / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round().clamp(0.0, 255.0) as u8
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

/// Higher interest renders darker: 90% lightness at 0, 30% at 1.
pub fn doi_lightness(doi: f32) -> f32 {
    let doi = if doi.is_finite() { doi.clamp(0.0, 1.0) } else { 0.0 };
    90.0 - doi * 60.0
}

/// Group hue and saturation with lightness taken from the DOI.
pub fn doi_fill(group: u32, doi: f32) -> [u8; 3] {
    let Some(base) = hex_to_hsl(group_color(group)) else {
        return [128, 128, 128];
    };
    hsl_to_rgb(Hsl {
        l: doi_lightness(doi),
        ..base
    })
}

pub fn node_radius(degree: usize, min_degree: usize, max_degree: usize) -> f32 {
    if max_degree <= min_degree {
        return BASE_RADIUS;
    }
    let normalized = degree.saturating_sub(min_degree) as f32 / (max_degree - min_degree) as f32;
    (BASE_RADIUS + normalized * (MAX_RADIUS - BASE_RADIUS)).min(MAX_RADIUS)
}

pub fn degree_bounds(nodes: &[Node]) -> (usize, usize) {
    let min = nodes.iter().map(|node| node.degree).min().unwrap_or(0);
    let max = nodes.iter().map(|node| node.degree).max().unwrap_or(0);
    (min, max)
}

/// Node indices sorted so the most interesting nodes are painted last.
pub fn draw_order(nodes: &[Node]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[a].doi.total_cmp(&nodes[b].doi));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_by_group() {
        assert_eq!(group_color(0), "#1f77b4");
        assert_eq!(group_color(12), group_color(2));
    }

    #[test]
    fn hsl_conversion_matches_reference_colors() {
        let blue = hex_to_hsl("#1f77b4").unwrap();
        assert!((blue.h - 204.6).abs() < 0.5, "{blue:?}");
        assert_eq!(hsl_to_rgb(blue), [0x1f, 0x77, 0xb4]);

        let grey = hex_to_hsl("7f7f7f").unwrap();
        assert_eq!(grey.s, 0.0);
        assert_eq!(hsl_to_rgb(grey), [0x7f, 0x7f, 0x7f]);

        assert!(hex_to_rgb("#12345").is_none());
        assert!(hex_to_rgb("#zz0000").is_none());
    }

    #[test]
    fn interest_darkens_fill() {
        assert_eq!(doi_lightness(0.0), 90.0);
        assert_eq!(doi_lightness(1.0), 30.0);
        assert_eq!(doi_lightness(f32::NAN), 90.0);

        let dull = doi_fill(3, 0.0);
        let vivid = doi_fill(3, 1.0);
        let sum = |rgb: [u8; 3]| rgb.iter().map(|&c| c as u32).sum::<u32>();
        assert!(sum(vivid) < sum(dull));
    }

    #[test]
    fn radius_scales_with_degree() {
        assert_eq!(node_radius(4, 4, 4), BASE_RADIUS);
        assert_eq!(node_radius(0, 0, 10), 30.0);
        assert_eq!(node_radius(5, 0, 10), 40.0);
        assert_eq!(node_radius(10, 0, 10), 50.0);
    }

    #[test]
    fn draw_order_puts_interest_last() {
        let mut nodes: Vec<Node> = ["a", "b", "c"]
            .iter()
            .map(|id| Node::new(*id, *id, 0))
            .collect();
        nodes[0].doi = 0.9;
        nodes[1].doi = 0.1;
        nodes[2].doi = 0.5;
        assert_eq!(draw_order(&nodes), vec![1, 2, 0]);
    }
}
