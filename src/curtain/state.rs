use crate::{
    animation::timeline::TweenTarget,
    curve::sample_curve_to_edge,
    foundation::core::{Polarity, VIEWBOX},
};

/// Number of layers in every curtain.
pub const LAYERS: usize = 2;

/// Address of one control point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PointKey {
    pub layer: usize,
    pub point: usize,
}

/// One wave. Index 0 is painted first (behind), index 1 on top.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    index: usize,
    points: Vec<f64>,
}

impl Layer {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }
}

/// The two layers' control points.
#[derive(Clone, Debug, PartialEq)]
pub struct CurtainState {
    layers: [Layer; LAYERS],
    polarity: Polarity,
}

impl CurtainState {
    pub fn new(points: usize, initial: f64, polarity: Polarity) -> Self {
        let initial = initial.clamp(0.0, VIEWBOX);
        Self {
            layers: std::array::from_fn(|index| Layer {
                index,
                points: vec![initial; points],
            }),
            polarity,
        }
    }

    pub fn layers(&self) -> &[Layer; LAYERS] {
        &self.layers
    }

    /// # Panics
    ///
    /// Panics if `index >= LAYERS`.
    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    pub fn points_per_layer(&self) -> usize {
        self.layers[0].points.len()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Set every point of both layers to `value`.
    pub fn reset(&mut self, value: f64) {
        let value = value.clamp(0.0, VIEWBOX);
        for layer in &mut self.layers {
            layer.points.fill(value);
        }
    }

    /// Path geometry of one layer.
    pub fn render_layer(&self, index: usize) -> String {
        sample_curve_to_edge(&self.layers[index].points, self.polarity.closing_edge())
    }

    /// Path geometry of both layers, back first.
    pub fn render(&self) -> [String; LAYERS] {
        std::array::from_fn(|index| self.render_layer(index))
    }
}

impl TweenTarget<PointKey> for CurtainState {
    fn value(&self, key: PointKey) -> f64 {
        self.layers[key.layer].points[key.point]
    }

    fn set_value(&mut self, key: PointKey, value: f64) {
        self.layers[key.layer].points[key.point] = value.clamp(0.0, VIEWBOX);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curtain/state.rs"]
mod tests;
