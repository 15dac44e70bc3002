//! Bubble chart dataset and layout.
//!
//! A dataset is a list of `(x, y, size, label)` points. [`layout`] turns it
//! into one marker per point with a pixel radius chosen so that marker *area*
//! is proportional to `size`, plus padded axis ranges. Drawing is left to the
//! front end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fraction of each axis span added on both sides of the data.
pub const AXIS_PADDING: f64 = 0.10;

/// One data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    /// Encoded as marker area; must be finite and positive.
    pub size: f64,
    #[serde(default)]
    pub label: String,
}

impl BubblePoint {
    pub fn new(x: f64, y: f64, size: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            size,
            label: label.into(),
        }
    }
}

fn default_title() -> String {
    "Bubble Chart".to_string()
}

/// A titled set of points, as read from a TOML or JSON data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_title")]
    pub title: String,
    pub points: Vec<BubblePoint>,
}

/// Built-in dataset used when no data file is given: hours practised per
/// weekday against the score reached, sized by exercises completed.
pub fn sample_dataset() -> Dataset {
    Dataset {
        title: "Practice hours vs. score".to_string(),
        points: vec![
            BubblePoint::new(1.0, 52.0, 3.0, "Mon"),
            BubblePoint::new(2.5, 61.0, 5.0, "Tue"),
            BubblePoint::new(0.5, 45.0, 1.0, "Wed"),
            BubblePoint::new(3.0, 74.0, 8.0, "Thu"),
            BubblePoint::new(1.5, 58.0, 4.0, "Fri"),
            BubblePoint::new(4.0, 88.0, 12.0, "Sat"),
            BubblePoint::new(2.0, 66.0, 6.0, "Sun"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset has no points")]
    Empty,
    #[error("point {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },
    #[error("point {index} has size {size}; sizes must be positive")]
    InvalidSize { index: usize, size: f64 },
}

/// Validate a dataset, returning all errors found.
pub fn validate_dataset(dataset: &Dataset) -> Vec<DatasetError> {
    let mut errors = Vec::new();
    if dataset.points.is_empty() {
        errors.push(DatasetError::Empty);
    }
    for (index, p) in dataset.points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            errors.push(DatasetError::NonFiniteCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }
        if !p.size.is_finite() || p.size <= 0.0 {
            errors.push(DatasetError::InvalidSize {
                index,
                size: p.size,
            });
        }
    }
    errors
}

/// A positioned marker ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    /// Pixel radius.
    pub radius: f64,
    pub label: String,
}

/// Everything a renderer needs: axis ranges and one marker per point, in
/// dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleLayout {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub markers: Vec<Marker>,
}

/// Radius for `size` such that the largest size gets `max_radius` and area
/// scales linearly with size.
pub fn marker_radius(size: f64, max_size: f64, max_radius: f64) -> f64 {
    max_radius * (size / max_size).sqrt()
}

/// Span of `values` widened by [`AXIS_PADDING`] on each side. A zero-width
/// span widens to +/-1 around the value.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (-1.0, 1.0);
    }
    let span = hi - lo;
    if span == 0.0 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * AXIS_PADDING;
    (lo - pad, hi + pad)
}

/// Lay out a dataset. Invalid datasets report their first problem.
pub fn layout(dataset: &Dataset, max_radius: f64) -> Result<BubbleLayout, DatasetError> {
    if let Some(err) = validate_dataset(dataset).into_iter().next() {
        return Err(err);
    }

    let max_size = dataset
        .points
        .iter()
        .map(|p| p.size)
        .fold(f64::NEG_INFINITY, f64::max);

    let markers = dataset
        .points
        .iter()
        .map(|p| Marker {
            x: p.x,
            y: p.y,
            radius: marker_radius(p.size, max_size, max_radius),
            label: p.label.clone(),
        })
        .collect();

    Ok(BubbleLayout {
        title: dataset.title.clone(),
        x_range: padded_range(dataset.points.iter().map(|p| p.x)),
        y_range: padded_range(dataset.points.iter().map(|p| p.y)),
        markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_valid() {
        let data = sample_dataset();
        assert!(validate_dataset(&data).is_empty());
        assert_eq!(data.points.len(), 7);
    }

    #[test]
    fn test_one_marker_per_point() {
        let data = sample_dataset();
        let out = layout(&data, 40.0).unwrap();
        assert_eq!(out.markers.len(), data.points.len());
        for (m, p) in out.markers.iter().zip(&data.points) {
            assert_eq!((m.x, m.y), (p.x, p.y));
            assert_eq!(m.label, p.label);
        }
    }

    #[test]
    fn test_area_proportional_to_size() {
        let data = sample_dataset();
        let out = layout(&data, 40.0).unwrap();
        // area / size is constant
        let ratios: Vec<f64> = out
            .markers
            .iter()
            .zip(&data.points)
            .map(|(m, p)| m.radius * m.radius / p.size)
            .collect();
        for r in &ratios {
            assert!((r - ratios[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_radius_monotonic_in_size() {
        let mut points = sample_dataset().points;
        points.sort_by(|a, b| a.size.total_cmp(&b.size));
        let data = Dataset {
            title: "sorted".into(),
            points,
        };
        let out = layout(&data, 30.0).unwrap();
        for pair in out.markers.windows(2) {
            assert!(pair[0].radius <= pair[1].radius);
        }
        assert_eq!(out.markers.last().unwrap().radius, 30.0);
    }

    #[test]
    fn test_marker_radius() {
        assert_eq!(marker_radius(4.0, 4.0, 20.0), 20.0);
        assert_eq!(marker_radius(1.0, 4.0, 20.0), 10.0);
    }

    #[test]
    fn test_ranges_cover_all_points() {
        let data = sample_dataset();
        let out = layout(&data, 40.0).unwrap();
        for p in &data.points {
            assert!(out.x_range.0 < p.x && p.x < out.x_range.1);
            assert!(out.y_range.0 < p.y && p.y < out.y_range.1);
        }
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 10.0]), (-1.0, 11.0));
        assert_eq!(padded_range([5.0, 5.0]), (4.0, 6.0));
        assert_eq!(padded_range(std::iter::empty()), (-1.0, 1.0));
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let data = Dataset {
            title: "bad".into(),
            points: vec![
                BubblePoint::new(f64::NAN, 1.0, 1.0, "a"),
                BubblePoint::new(1.0, 1.0, 0.0, "b"),
                BubblePoint::new(1.0, 1.0, -2.0, "c"),
            ],
        };
        let errors = validate_dataset(&data);
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors[0],
            DatasetError::NonFiniteCoordinate { index: 0, .. }
        ));
        assert_eq!(
            errors[1],
            DatasetError::InvalidSize {
                index: 1,
                size: 0.0
            }
        );
        assert!(matches!(layout(&data, 10.0), Err(DatasetError::NonFiniteCoordinate { .. })));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let data = Dataset {
            title: "empty".into(),
            points: vec![],
        };
        assert_eq!(layout(&data, 10.0), Err(DatasetError::Empty));
    }
}
