//! TopoJSON topology decoding: quantized arcs to absolute rings.
//!
//! Arcs are delta-encoded integer positions shared between neighbouring
//! boundaries. A ring lists signed arc indices; a negative index `i` means
//! arc `!i` traversed in reverse.

use std::collections::BTreeMap;

use foundation::math::LonLat;
use scene::geometry::Ring;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizeTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Default for QuantizeTransform {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            translate: [0.0, 0.0],
        }
    }
}

impl QuantizeTransform {
    pub fn apply(&self, x: i64, y: i64) -> LonLat {
        LonLat::new(
            x as f64 * self.scale[0] + self.translate[0],
            y as f64 * self.scale[1] + self.translate[1],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedArc {
    pub deltas: Vec<[i64; 2]>,
}

/// Signed arc references of one geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryArcs {
    Polygon(Vec<Vec<i64>>),
    MultiPolygon(Vec<Vec<Vec<i64>>>),
    /// Points, lines, or null geometries: no rings.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopologyGeometry {
    pub numeric_code: Option<u32>,
    pub name: Option<String>,
    pub arcs: GeometryArcs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub transform: QuantizeTransform,
    pub arcs: Vec<EncodedArc>,
    pub objects: BTreeMap<String, Vec<TopologyGeometry>>,
}

/// One boundary feature with its rings resolved to absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub numeric_code: Option<u32>,
    pub name: Option<String>,
    pub rings: Vec<Ring>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    Json(String),
    NotATopology,
    MissingObject(String),
    InvalidArc { index: usize, reason: String },
    InvalidGeometry { index: usize, reason: String },
    ArcOutOfRange { arc: i64, arc_count: usize },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::Json(e) => write!(f, "JSON parse error: {e}"),
            TopologyError::NotATopology => write!(f, "expected TopoJSON Topology"),
            TopologyError::MissingObject(name) => {
                write!(f, "topology has no geometry collection named {name:?}")
            }
            TopologyError::InvalidArc { index, reason } => {
                write!(f, "invalid arc at index {index}: {reason}")
            }
            TopologyError::InvalidGeometry { index, reason } => {
                write!(f, "invalid geometry at index {index}: {reason}")
            }
            TopologyError::ArcOutOfRange { arc, arc_count } => {
                write!(f, "arc reference {arc} out of range ({arc_count} arcs)")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

#[derive(Deserialize)]
struct RawTopology {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    transform: Option<QuantizeTransform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<i64>>>,
    #[serde(default)]
    objects: Map<String, Value>,
}

impl Topology {
    pub fn from_json_str(payload: &str) -> Result<Self, TopologyError> {
        let raw: RawTopology =
            serde_json::from_str(payload).map_err(|e| TopologyError::Json(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTopology) -> Result<Self, TopologyError> {
        if raw.kind != "Topology" {
            return Err(TopologyError::NotATopology);
        }

        let mut arcs = Vec::with_capacity(raw.arcs.len());
        for (index, positions) in raw.arcs.into_iter().enumerate() {
            let mut deltas = Vec::with_capacity(positions.len());
            let (mut x, mut y) = (0i64, 0i64);
            for pos in positions {
                let [dx, dy, ..] = pos.as_slice() else {
                    return Err(TopologyError::InvalidArc {
                        index,
                        reason: "position with fewer than two components".to_string(),
                    });
                };
                let (Some(nx), Some(ny)) = (x.checked_add(*dx), y.checked_add(*dy)) else {
                    return Err(TopologyError::InvalidArc {
                        index,
                        reason: "coordinate overflow".to_string(),
                    });
                };
                (x, y) = (nx, ny);
                deltas.push([*dx, *dy]);
            }
            arcs.push(EncodedArc { deltas });
        }

        let mut objects = BTreeMap::new();
        for (name, object) in raw.objects {
            // Only geometry collections carry features; other objects are ignored.
            let Some(geometries) = object.get("geometries").and_then(|g| g.as_array()) else {
                continue;
            };
            let parsed = geometries
                .iter()
                .enumerate()
                .map(|(index, g)| parse_geometry(index, g))
                .collect::<Result<Vec<_>, _>>()?;
            objects.insert(name, parsed);
        }

        Ok(Self {
            transform: raw.transform.unwrap_or_default(),
            arcs,
            objects,
        })
    }

    /// Absolute polylines for every arc, in arc order.
    pub fn decode_arcs(&self) -> Vec<Vec<LonLat>> {
        self.arcs
            .iter()
            .map(|arc| decode_arc(arc, &self.transform))
            .collect()
    }

    /// Resolves every geometry of the named collection into rings.
    pub fn features(&self, object: &str) -> Result<Vec<CountryFeature>, TopologyError> {
        let geometries = self
            .objects
            .get(object)
            .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;
        let decoded = self.decode_arcs();

        let mut features = Vec::with_capacity(geometries.len());
        for geometry in geometries {
            let ring_refs: Vec<&Vec<i64>> = match &geometry.arcs {
                GeometryArcs::Polygon(rings) => rings.iter().collect(),
                GeometryArcs::MultiPolygon(polys) => polys.iter().flatten().collect(),
                GeometryArcs::Unsupported => Vec::new(),
            };

            let mut rings = Vec::with_capacity(ring_refs.len());
            for refs in ring_refs {
                let ring = resolve_ring(refs, &decoded)?;
                if !ring.is_empty() {
                    rings.push(ring);
                }
            }

            features.push(CountryFeature {
                numeric_code: geometry.numeric_code,
                name: geometry.name.clone(),
                rings,
            });
        }
        Ok(features)
    }
}

/// Cumulative sum of the deltas, then the quantization transform.
///
/// Sums saturate; arcs parsed by [`Topology`] are checked for overflow up front.
pub fn decode_arc(arc: &EncodedArc, transform: &QuantizeTransform) -> Vec<LonLat> {
    let (mut x, mut y) = (0i64, 0i64);
    arc.deltas
        .iter()
        .map(|[dx, dy]| {
            x = x.saturating_add(*dx);
            y = y.saturating_add(*dy);
            transform.apply(x, y)
        })
        .collect()
}

/// Concatenates the referenced arcs in order, reversing negated ones.
///
/// Shared endpoints are kept, not de-duplicated.
pub fn resolve_ring(refs: &[i64], decoded: &[Vec<LonLat>]) -> Result<Ring, TopologyError> {
    let mut ring = Vec::new();
    for &r in refs {
        let (index, reversed) = if r < 0 { (!r, true) } else { (r, false) };
        let arc = usize::try_from(index)
            .ok()
            .and_then(|i| decoded.get(i))
            .ok_or(TopologyError::ArcOutOfRange {
                arc: r,
                arc_count: decoded.len(),
            })?;
        if reversed {
            ring.extend(arc.iter().rev().copied());
        } else {
            ring.extend(arc.iter().copied());
        }
    }
    Ok(ring)
}

fn parse_geometry(index: usize, value: &Value) -> Result<TopologyGeometry, TopologyError> {
    let obj = value
        .as_object()
        .ok_or_else(|| TopologyError::InvalidGeometry {
            index,
            reason: "geometry must be an object".to_string(),
        })?;

    let numeric_code = match obj.get("id") {
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    let name = obj
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(str::to_string);

    let invalid = |reason: &str| TopologyError::InvalidGeometry {
        index,
        reason: reason.to_string(),
    };

    let arcs = match obj.get("type").and_then(|t| t.as_str()) {
        Some("Polygon") => {
            let rings = obj
                .get("arcs")
                .and_then(parse_rings)
                .ok_or_else(|| invalid("Polygon arcs must be arrays of arc indices"))?;
            GeometryArcs::Polygon(rings)
        }
        Some("MultiPolygon") => {
            let polys = obj
                .get("arcs")
                .and_then(|v| v.as_array())
                .and_then(|polys| polys.iter().map(parse_rings).collect::<Option<Vec<_>>>())
                .ok_or_else(|| invalid("MultiPolygon arcs must be arrays of rings"))?;
            GeometryArcs::MultiPolygon(polys)
        }
        _ => GeometryArcs::Unsupported,
    };

    Ok(TopologyGeometry {
        numeric_code,
        name,
        arcs,
    })
}

fn parse_rings(value: &Value) -> Option<Vec<Vec<i64>>> {
    value
        .as_array()?
        .iter()
        .map(|ring| ring.as_array()?.iter().map(Value::as_i64).collect())
        .collect()
}
