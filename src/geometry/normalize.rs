//! Geometry normalization.
//!
//! # Responsibilities
//! - Pass LineStrings through unchanged
//! - Stitch MultiLineString parts into one line, bridging small gaps
//! - Simplify stitched lines (dual carriageways produce many vertices)
//!
//! # Stitching
//! ```text
//! chain = first part
//! repeat:
//!     drop parts with both endpoints within carriageway_width of chain
//!     for every remaining part, measure the four endpoint gaps
//!         chain.end → part.start   (append)
//!         chain.end → part.end     (append reversed)
//!         part.end  → chain.start  (prepend)
//!         part.start→ chain.start  (prepend reversed)
//!     keep joins whose far end extends past chain by > carriageway_width
//!     join the part with the smallest gap if gap <= snap_tolerance
//!     otherwise fail with Disconnected
//! ```
//!
//! Dual carriageways arrive as two opposite-direction parts a few metres
//! apart. Chaining them would produce an out-and-back line that simplifies
//! down to a single point, so the second carriageway is discarded instead.

use geo::{Coord, Distance, Euclidean, LineString, MultiLineString, Point, Simplify};
use thiserror::Error;

use crate::config::GeometryConfig;
use crate::source::RoadGeometry;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("line has {0} coordinate(s), at least 2 are required")]
    Degenerate(usize),

    #[error("MultiLineString has no parts")]
    Empty,

    #[error("{unjoined} of {parts} line parts are further than {tolerance} from the merged line")]
    Disconnected {
        parts: usize,
        unjoined: usize,
        tolerance: f64,
    },

    #[error("polyline encoding failed: {0}")]
    Encode(String),
}

/// Turns a road geometry into a single line suitable for encoding.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stitching: Stitching,
    simplify_epsilon: f64,
}

impl Normalizer {
    pub fn new(stitching: Stitching, simplify_epsilon: f64) -> Self {
        Self {
            stitching,
            simplify_epsilon,
        }
    }

    pub fn from_config(config: &GeometryConfig) -> Self {
        Self::new(
            Stitching {
                snap_tolerance: config.snap_tolerance,
                carriageway_width: config.carriageway_width,
            },
            config.simplify_epsilon,
        )
    }

    pub fn normalize(&self, geometry: &RoadGeometry) -> Result<LineString<f64>, GeometryError> {
        let line = match geometry {
            RoadGeometry::Line(line) => line.clone(),
            RoadGeometry::MultiLine(lines) => {
                let merged = self.stitching.stitch(lines)?;
                if self.simplify_epsilon > 0.0 {
                    merged.simplify(self.simplify_epsilon)
                } else {
                    merged
                }
            }
        };

        if line.0.len() < 2 {
            return Err(GeometryError::Degenerate(line.0.len()));
        }
        Ok(line)
    }
}

/// Distances (degrees) used when merging MultiLineString parts.
#[derive(Debug, Clone, Copy)]
pub struct Stitching {
    pub snap_tolerance: f64,
    pub carriageway_width: f64,
}

#[derive(Clone, Copy)]
enum Join {
    Append,
    AppendReversed,
    Prepend,
    PrependReversed,
}

impl Stitching {
    /// Merge the parts of `lines` into one line.
    pub fn stitch(&self, lines: &MultiLineString<f64>) -> Result<LineString<f64>, GeometryError> {
        let mut parts: Vec<Vec<Coord<f64>>> = lines
            .iter()
            .map(|l| l.0.clone())
            .filter(|coords| !coords.is_empty())
            .collect();
        let total = parts.len();
        if parts.is_empty() {
            return Err(GeometryError::Empty);
        }

        let mut chain = LineString::new(parts.remove(0));

        loop {
            parts.retain(|part| !self.runs_alongside(&chain, part));
            if parts.is_empty() {
                break;
            }

            let best = parts
                .iter()
                .enumerate()
                .flat_map(|(i, part)| {
                    candidate_joins(&chain.0, part).map(move |(j, far, g)| (i, j, far, g))
                })
                .filter(|(_, _, far, _)| self.extends(&chain, *far))
                .min_by(|a, b| a.3.total_cmp(&b.3));

            let (idx, join) = match best {
                Some((idx, join, _, distance)) if distance <= self.snap_tolerance => (idx, join),
                _ => {
                    return Err(GeometryError::Disconnected {
                        parts: total,
                        unjoined: parts.len(),
                        tolerance: self.snap_tolerance,
                    })
                }
            };

            let mut part = parts.swap_remove(idx);
            let mut coords = std::mem::take(&mut chain.0);
            match join {
                Join::Append => extend(&mut coords, part),
                Join::AppendReversed => {
                    part.reverse();
                    extend(&mut coords, part);
                }
                Join::Prepend => {
                    extend(&mut part, coords);
                    coords = part;
                }
                Join::PrependReversed => {
                    part.reverse();
                    extend(&mut part, coords);
                    coords = part;
                }
            }
            chain = LineString::new(coords);
        }

        Ok(chain)
    }

    fn runs_alongside(&self, chain: &LineString<f64>, part: &[Coord<f64>]) -> bool {
        let ends = [part[0], part[part.len() - 1]];
        ends.iter()
            .all(|&end| Euclidean.distance(&Point::from(end), chain) <= self.carriageway_width)
    }

    fn extends(&self, chain: &LineString<f64>, far: Coord<f64>) -> bool {
        Euclidean.distance(&Point::from(far), chain) > self.carriageway_width
    }
}

/// Each join with the part endpoint left dangling after it and its gap.
fn candidate_joins(
    chain: &[Coord<f64>],
    part: &[Coord<f64>],
) -> impl Iterator<Item = (Join, Coord<f64>, f64)> {
    // Both slices are non-empty.
    let (head, tail) = (chain[0], chain[chain.len() - 1]);
    let (start, end) = (part[0], part[part.len() - 1]);
    [
        (Join::Append, end, gap(tail, start)),
        (Join::AppendReversed, start, gap(tail, end)),
        (Join::Prepend, start, gap(end, head)),
        (Join::PrependReversed, end, gap(start, head)),
    ]
    .into_iter()
}

/// Append `next` to `line`, dropping a duplicated shared endpoint.
fn extend(line: &mut Vec<Coord<f64>>, next: Vec<Coord<f64>>) {
    let skip = match (line.last(), next.first()) {
        (Some(a), Some(b)) if a == b => 1,
        _ => 0,
    };
    line.extend(next.into_iter().skip(skip));
}

fn gap(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(parts: Vec<Vec<(f64, f64)>>) -> MultiLineString<f64> {
        MultiLineString::new(parts.into_iter().map(LineString::from).collect())
    }

    fn stitching(snap_tolerance: f64) -> Stitching {
        Stitching {
            snap_tolerance,
            carriageway_width: 0.001,
        }
    }

    fn stitch(lines: &MultiLineString<f64>, snap_tolerance: f64) -> Result<LineString<f64>, GeometryError> {
        Stitching {
            snap_tolerance,
            carriageway_width: 0.0,
        }
        .stitch(lines)
    }

    fn lon_span(line: &LineString<f64>) -> f64 {
        let lons: Vec<f64> = line.coords().map(|c| c.x).collect();
        lons.iter().copied().fold(f64::MIN, f64::max) - lons.iter().copied().fold(f64::MAX, f64::min)
    }

    #[test]
    fn test_line_passes_through() {
        let line = LineString::from(vec![(0.0, 0.0), (0.05, 0.01), (0.1, 0.0)]);
        let normalizer = Normalizer::new(stitching(0.1), 0.1);
        let out = normalizer.normalize(&RoadGeometry::Line(line.clone())).unwrap();
        assert_eq!(out, line);
    }

    #[test]
    fn test_stitch_out_of_order_and_reversed() {
        let lines = multi(vec![
            vec![(1.0, 0.0), (2.0, 0.0)],
            vec![(3.0, 0.0), (2.0, 0.0)],
            vec![(0.0, 0.0), (1.0, 0.0)],
        ]);

        let merged = stitch(&lines, 0.0).unwrap();
        assert_eq!(
            merged,
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
        );
    }

    #[test]
    fn test_stitch_bridges_small_gap() {
        let lines = multi(vec![vec![(0.0, 0.0), (1.0, 0.0)], vec![(1.05, 0.0), (2.0, 0.0)]]);

        let merged = stitch(&lines, 0.1).unwrap();
        assert_eq!(merged.0.len(), 4);
        assert_eq!(merged.0[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(merged.0[3], Coord { x: 2.0, y: 0.0 });
    }

    #[test]
    fn test_disjoint_parts_fail() {
        let lines = multi(vec![vec![(0.0, 0.0), (1.0, 0.0)], vec![(5.0, 5.0), (6.0, 5.0)]]);

        assert_eq!(
            stitch(&lines, 0.1),
            Err(GeometryError::Disconnected {
                parts: 2,
                unjoined: 1,
                tolerance: 0.1
            })
        );
    }

    #[test]
    fn test_multiline_is_simplified() {
        let lines = multi(vec![
            vec![(0.0, 0.0), (0.5, 0.001), (1.0, 0.0)],
            vec![(1.0, 0.0), (1.5, -0.001), (2.0, 0.0)],
        ]);

        let out = Normalizer::new(stitching(0.1), 0.01)
            .normalize(&RoadGeometry::MultiLine(lines))
            .unwrap();
        assert_eq!(out, LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn test_empty_and_degenerate() {
        let normalizer = Normalizer::new(stitching(0.1), 0.0);
        assert_eq!(
            normalizer.normalize(&RoadGeometry::MultiLine(MultiLineString::new(vec![]))),
            Err(GeometryError::Empty)
        );
        assert_eq!(
            normalizer.normalize(&RoadGeometry::Line(LineString::from(vec![(0.0, 0.0)]))),
            Err(GeometryError::Degenerate(1))
        );
    }

    #[test]
    fn test_dual_carriageway_keeps_one_direction() {
        let lines = multi(vec![
            vec![(115.85, -31.95), (115.86, -31.95), (115.87, -31.95)],
            vec![(115.87, -31.9502), (115.86, -31.9502), (115.85, -31.9502)],
        ]);

        let out = Normalizer::new(stitching(0.1), 0.1)
            .normalize(&RoadGeometry::MultiLine(lines))
            .unwrap();
        assert_eq!(out.0.first(), Some(&Coord { x: 115.85, y: -31.95 }));
        assert_eq!(out.0.last(), Some(&Coord { x: 115.87, y: -31.95 }));
        assert!((lon_span(&out) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_split_dual_carriageway_spans_road() {
        // Westbound pieces come first and interleave with eastbound ones.
        let lines = multi(vec![
            vec![(2.0, 0.0002), (1.0, 0.0002)],
            vec![(0.0, 0.0), (1.0, 0.0)],
            vec![(1.0, 0.0), (2.0, 0.0)],
            vec![(1.0, 0.0002), (0.0, 0.0002)],
        ]);

        let merged = stitching(0.1).stitch(&lines).unwrap();
        assert!((lon_span(&merged) - 2.0).abs() < 1e-9);
        // No vertex is visited twice along the line.
        let lons: Vec<f64> = merged.coords().map(|c| c.x).collect();
        assert!(lons.windows(2).all(|w| w[0] > w[1]) || lons.windows(2).all(|w| w[0] < w[1]));
    }
}
