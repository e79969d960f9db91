//! Box layout - one-axis flow of children
//!
//! Children are placed one after another along the orientation axis, separated
//! by `spacing` and surrounded by `padding` on every side. The layout extent on
//! the cross axis is the largest child extent on that axis.

use crate::{ChildGeometry, LayoutError, LayoutOutcome, LayoutStrategy, Placement, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use widget_tree::{Point, Size};

/// Primary flow axis of a box layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl FromStr for Orientation {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(LayoutError::InvalidOrientation(other.to_string())),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated box layout configuration, as read from a scene or settings file.
///
/// `orientation` stays a string here so that a bad value surfaces as
/// [`LayoutError::InvalidOrientation`] at construction rather than as a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxLayoutOptions {
    pub orientation: String,
    pub spacing: f64,
    pub padding: f64,
    pub uniform_width: bool,
    pub uniform_height: bool,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Default for BoxLayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal.as_str().to_string(),
            spacing: 1.0,
            padding: 0.0,
            uniform_width: false,
            uniform_height: false,
            invert_x: false,
            invert_y: false,
        }
    }
}

/// Validated box layout strategy
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    orientation: Orientation,
    spacing: f64,
    padding: f64,
    uniform_width: bool,
    uniform_height: bool,
    invert_x: bool,
    invert_y: bool,
}

fn validate_length(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{name} must be a finite number >= 0, got {value}"
        )))
    }
}

impl BoxLayout {
    /// Create a box layout with default spacing (1) and no padding
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 1.0,
            padding: 0.0,
            uniform_width: false,
            uniform_height: false,
            invert_x: false,
            invert_y: false,
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Validate raw options into a layout
    pub fn from_options(options: &BoxLayoutOptions) -> Result<Self> {
        let orientation = options.orientation.parse::<Orientation>()?;
        Ok(Self {
            orientation,
            spacing: validate_length("spacing", options.spacing)?,
            padding: validate_length("padding", options.padding)?,
            uniform_width: options.uniform_width,
            uniform_height: options.uniform_height,
            invert_x: options.invert_x,
            invert_y: options.invert_y,
        })
    }

    /// Set the gap between consecutive children.
    /// Negative or non-finite values are clamped to zero.
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = validate_length("spacing", spacing).unwrap_or(0.0);
        self
    }

    /// Set the space between the layout border and its content.
    /// Negative or non-finite values are clamped to zero.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = validate_length("padding", padding).unwrap_or(0.0);
        self
    }

    pub fn uniform_width(mut self, uniform: bool) -> Self {
        self.uniform_width = uniform;
        self
    }

    pub fn uniform_height(mut self, uniform: bool) -> Self {
        self.uniform_height = uniform;
        self
    }

    pub fn invert_x(mut self, invert: bool) -> Self {
        self.invert_x = invert;
        self
    }

    pub fn invert_y(mut self, invert: bool) -> Self {
        self.invert_y = invert;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn get_spacing(&self) -> f64 {
        self.spacing
    }

    pub fn get_padding(&self) -> f64 {
        self.padding
    }

    /// Extent along the flow axis when every child is forced to `max`.
    ///
    /// `(n - 1) * (max + spacing)`: the last child's own extent is not
    /// counted. Existing consumers size against this value. With no children
    /// the extent is 0, not `-spacing`.
    fn uniform_extent(&self, count: usize, max: f64) -> f64 {
        match count {
            0 => 0.0,
            n => (n - 1) as f64 * (max + self.spacing),
        }
    }
}

impl LayoutStrategy for BoxLayout {
    fn name(&self) -> &'static str {
        "box"
    }

    fn compute(&self, origin: Point, children: &[ChildGeometry]) -> LayoutOutcome {
        let measured: Vec<&ChildGeometry> = children
            .iter()
            .filter(|child| {
                let ok = child.is_well_formed();
                if !ok {
                    tracing::trace!(child = %child.id, "skipping malformed child");
                }
                ok
            })
            .collect();

        // Measurement
        let mut max_width = 0.0_f64;
        let mut max_height = 0.0_f64;
        let mut current_width = 0.0_f64;
        let mut current_height = 0.0_f64;
        for child in &measured {
            max_width = max_width.max(child.size.width);
            max_height = max_height.max(child.size.height);
            match self.orientation {
                Orientation::Horizontal => {
                    if current_width > 0.0 {
                        current_width += self.spacing;
                    }
                    current_width += child.size.width;
                }
                Orientation::Vertical => {
                    if current_height > 0.0 {
                        current_height += self.spacing;
                    }
                    current_height += child.size.height;
                }
            }
        }

        // Uniform sizing
        let mut sizes: Vec<Size> = measured.iter().map(|child| child.size).collect();
        if self.uniform_width {
            sizes.iter_mut().for_each(|size| size.width = max_width);
            if self.orientation == Orientation::Horizontal {
                current_width = self.uniform_extent(children.len(), max_width);
            }
        }
        if self.uniform_height {
            sizes.iter_mut().for_each(|size| size.height = max_height);
            if self.orientation == Orientation::Vertical {
                current_height = self.uniform_extent(children.len(), max_height);
            }
        }

        // Cross axis takes the largest child
        match self.orientation {
            Orientation::Horizontal => current_height = max_height,
            Orientation::Vertical => current_width = max_width,
        }

        current_width += self.padding * 2.0;
        current_height += self.padding * 2.0;

        // Positioning
        let mut cursor = Point::new(origin.x + self.padding, origin.y + self.padding);
        let mut placements = Vec::with_capacity(measured.len());
        for (child, size) in measured.iter().zip(sizes) {
            // Each flag mirrors its own axis: invert_x moves x, never y.
            let x = if self.invert_x {
                origin.x + current_width - size.width - (cursor.x - origin.x)
            } else {
                cursor.x
            };
            let y = if self.invert_y {
                origin.y + current_height - size.height - (cursor.y - origin.y)
            } else {
                cursor.y
            };
            placements.push(Placement {
                id: child.id,
                pos: Point::new(x, y),
                size,
            });
            match self.orientation {
                Orientation::Horizontal => cursor.x += size.width + self.spacing,
                Orientation::Vertical => cursor.y += size.height + self.spacing,
            }
        }

        LayoutOutcome {
            content_size: Size::new(current_width, current_height),
            placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widget_tree::WidgetId;

    fn children(sizes: &[(f64, f64)]) -> Vec<ChildGeometry> {
        sizes
            .iter()
            .map(|&(w, h)| ChildGeometry::new(WidgetId::new(), Point::ORIGIN, Size::new(w, h)))
            .collect()
    }

    fn xs(outcome: &LayoutOutcome) -> Vec<f64> {
        outcome.placements.iter().map(|p| p.pos.x).collect()
    }

    fn ys(outcome: &LayoutOutcome) -> Vec<f64> {
        outcome.placements.iter().map(|p| p.pos.y).collect()
    }

    #[test]
    fn test_horizontal_three_children() {
        let layout = BoxLayout::horizontal().spacing(2.0);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (20.0, 5.0), (30.0, 5.0)]));

        assert_eq!(outcome.content_size, Size::new(64.0, 5.0));
        assert_eq!(xs(&outcome), vec![0.0, 12.0, 34.0]);
        assert_eq!(ys(&outcome), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_positions_follow_origin_and_padding() {
        let layout = BoxLayout::horizontal().spacing(2.0).padding(3.0);
        let outcome = layout.compute(
            Point::new(100.0, 50.0),
            &children(&[(10.0, 5.0), (20.0, 8.0)]),
        );

        assert_eq!(outcome.content_size, Size::new(10.0 + 2.0 + 20.0 + 6.0, 8.0 + 6.0));
        assert_eq!(xs(&outcome), vec![103.0, 115.0]);
        assert_eq!(ys(&outcome), vec![53.0, 53.0]);
    }

    #[test]
    fn test_vertical_flow() {
        let layout = BoxLayout::vertical().spacing(4.0);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (30.0, 7.0)]));

        assert_eq!(outcome.content_size, Size::new(30.0, 16.0));
        assert_eq!(ys(&outcome), vec![0.0, 9.0]);
        assert_eq!(xs(&outcome), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_layout_is_padding_only() {
        let layout = BoxLayout::horizontal().padding(4.0);
        let outcome = layout.compute(Point::ORIGIN, &[]);
        assert_eq!(outcome.content_size, Size::new(8.0, 8.0));
        assert!(outcome.placements.is_empty());
    }

    #[test]
    fn test_spacing_starts_after_positive_extent() {
        // A zero-width leading child does not open a spacing gap in measurement.
        let layout = BoxLayout::horizontal().spacing(5.0);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(0.0, 5.0), (10.0, 5.0)]));
        assert_eq!(outcome.content_size.width, 10.0);
        assert_eq!(xs(&outcome), vec![0.0, 5.0]);
    }

    #[test]
    fn test_uniform_width_uses_count_approximation() {
        let layout = BoxLayout::horizontal().spacing(2.0).uniform_width(true);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (20.0, 5.0), (30.0, 5.0)]));

        assert!(outcome.placements.iter().all(|p| p.size.width == 30.0));
        assert_eq!(outcome.content_size.width, 2.0 * (30.0 + 2.0));
        assert_eq!(xs(&outcome), vec![0.0, 32.0, 64.0]);
    }

    #[test]
    fn test_uniform_width_on_cross_axis_keeps_max_extent() {
        let layout = BoxLayout::vertical().spacing(1.0).uniform_width(true);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (25.0, 5.0)]));

        assert!(outcome.placements.iter().all(|p| p.size.width == 25.0));
        assert_eq!(outcome.content_size, Size::new(25.0, 11.0));
    }

    #[test]
    fn test_uniform_height_vertical() {
        let layout = BoxLayout::vertical().spacing(1.0).uniform_height(true);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (10.0, 9.0)]));

        assert!(outcome.placements.iter().all(|p| p.size.height == 9.0));
        assert_eq!(outcome.content_size.height, 10.0);
        assert_eq!(ys(&outcome), vec![0.0, 10.0]);
    }

    #[test]
    fn test_uniform_with_no_children() {
        let layout = BoxLayout::horizontal().uniform_width(true).padding(1.0);
        let outcome = layout.compute(Point::ORIGIN, &[]);
        assert_eq!(outcome.content_size, Size::new(2.0, 2.0));
    }

    #[test]
    fn test_invert_x_mirrors_horizontally() {
        let layout = BoxLayout::horizontal().spacing(2.0).invert_x(true);
        let outcome = layout.compute(Point::ORIGIN, &children(&[(10.0, 5.0), (20.0, 5.0), (30.0, 5.0)]));

        assert_eq!(xs(&outcome), vec![54.0, 32.0, 0.0]);
        assert_eq!(ys(&outcome), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invert_y_mirrors_vertically() {
        let layout = BoxLayout::vertical().spacing(1.0).padding(1.0).invert_y(true);
        let outcome = layout.compute(Point::new(0.0, 10.0), &children(&[(4.0, 2.0), (4.0, 3.0)]));

        // content height = 2 + 1 + 3 + 2 * 1 = 8
        assert_eq!(outcome.content_size.height, 8.0);
        assert_eq!(ys(&outcome), vec![10.0 + 8.0 - 2.0 - 1.0, 10.0 + 8.0 - 3.0 - 4.0]);
    }

    #[test]
    fn test_malformed_child_is_skipped() {
        let mut kids = children(&[(10.0, 5.0), (20.0, 5.0)]);
        kids.insert(1, ChildGeometry::new(WidgetId::new(), Point::ORIGIN, Size::new(f64::NAN, 5.0)));
        let layout = BoxLayout::horizontal().spacing(2.0);
        let outcome = layout.compute(Point::ORIGIN, &kids);

        assert_eq!(outcome.placements.len(), 2);
        assert_eq!(outcome.content_size, Size::new(32.0, 5.0));
        assert_eq!(xs(&outcome), vec![0.0, 12.0]);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let layout = BoxLayout::vertical().spacing(3.0).padding(2.0).uniform_height(true);
        let kids = children(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        let origin = Point::new(7.0, 9.0);
        assert_eq!(layout.compute(origin, &kids), layout.compute(origin, &kids));
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!("vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!(
            "diagonal".parse::<Orientation>(),
            Err(LayoutError::InvalidOrientation("diagonal".into()))
        );
    }

    #[test]
    fn test_options_defaults() {
        let layout = BoxLayout::from_options(&BoxLayoutOptions::default()).unwrap();
        assert_eq!(layout, BoxLayout::horizontal());
        assert_eq!(layout.get_spacing(), 1.0);
        assert_eq!(layout.get_padding(), 0.0);
    }

    #[test]
    fn test_options_reject_bad_values() {
        let diagonal = BoxLayoutOptions {
            orientation: "diagonal".into(),
            ..Default::default()
        };
        assert!(matches!(
            BoxLayout::from_options(&diagonal),
            Err(LayoutError::InvalidOrientation(_))
        ));

        let negative = BoxLayoutOptions {
            spacing: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            BoxLayout::from_options(&negative),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_options_from_json_fill_defaults() {
        let options: BoxLayoutOptions =
            serde_json::from_str(r#"{"orientation": "vertical", "padding": 4}"#).unwrap();
        assert_eq!(options.orientation, "vertical");
        assert_eq!(options.padding, 4.0);
        assert_eq!(options.spacing, 1.0);
        assert!(!options.uniform_width);

        let layout = BoxLayout::from_options(&options).unwrap();
        assert_eq!(layout.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_builder_clamps_negative_lengths() {
        let layout = BoxLayout::horizontal().spacing(-3.0).padding(f64::NAN);
        assert_eq!(layout.get_spacing(), 0.0);
        assert_eq!(layout.get_padding(), 0.0);
    }
}
