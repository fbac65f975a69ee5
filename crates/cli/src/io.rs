//! JSON shapes read and written by the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maxrect::{reconstruct_corners, Polygon, RectangleSolution};
use serde::{Deserialize, Serialize};

/// Polygon file: a bare `[[x, y], ...]` ring or `{ "vertices": [[x, y], ...] }`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PolygonFile {
    Ring(Vec<[f64; 2]>),
    Object { vertices: Vec<[f64; 2]> },
}

impl PolygonFile {
    pub fn from_polygon(polygon: &Polygon) -> Self {
        PolygonFile::Ring(polygon.vertices().iter().map(|v| [v.x, v.y]).collect())
    }

    fn into_xy(self) -> Vec<(f64, f64)> {
        let ring = match self {
            PolygonFile::Ring(r) | PolygonFile::Object { vertices: r } => r,
        };
        ring.into_iter().map(|[x, y]| (x, y)).collect()
    }
}

pub fn read_polygon(path: &Path) -> Result<Polygon> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PolygonFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing polygon JSON in {}", path.display()))?;
    let polygon = Polygon::from_xy(&file.into_xy())
        .with_context(|| format!("validating polygon from {}", path.display()))?;
    Ok(polygon)
}

/// Written by `solve`.
#[derive(Debug, Deserialize, Serialize)]
pub struct RectangleReport {
    pub area: f64,
    pub side: f64,
    pub angle: f64,
    /// Base edge `[point1, point2]`.
    pub base: [[f64; 2]; 2],
    /// Corners in winding order.
    pub corners: [[f64; 2]; 4],
    pub variant: String,
    pub point_gap: f64,
    pub samples: usize,
    pub elapsed_ms: f64,
}

impl RectangleReport {
    pub fn new(sol: &RectangleSolution, elapsed_ms: f64) -> Self {
        let xy = |v: maxrect::Vec2<f64>| [v.x, v.y];
        Self {
            area: sol.area,
            side: sol.side,
            angle: sol.angle,
            base: [xy(sol.point1), xy(sol.point2)],
            corners: reconstruct_corners(sol).map(xy),
            variant: sol.variant.name().to_string(),
            point_gap: sol.point_gap,
            samples: sol.samples,
            elapsed_ms,
        }
    }
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn both_polygon_shapes_parse() {
        let dir = tempdir().unwrap();
        let bare = dir.path().join("bare.json");
        fs::write(&bare, "[[0,0],[2,0],[2,1],[0,1]]").unwrap();
        let obj = dir.path().join("obj.json");
        fs::write(&obj, r#"{"vertices": [[0,0],[2,0],[2,1],[0,1]]}"#).unwrap();
        let a = read_polygon(&bare).unwrap();
        let b = read_polygon(&obj).unwrap();
        assert_eq!(a, b);
        assert!((a.area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_polygon_surfaces_core_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("line.json");
        fs::write(&path, "[[0,0],[1,0]]").unwrap();
        let err = read_polygon(&path).unwrap_err();
        assert!(err
            .chain()
            .any(|e| e.to_string().starts_with("degenerate polygon")));
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/poly.json");
        let poly = Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
        write_json(&path, &PolygonFile::from_polygon(&poly)).unwrap();
        assert_eq!(read_polygon(&path).unwrap(), poly);
    }
}
