use crate::error::{Error, Result};
use crate::model::Vertex;
use crate::region::Region;
use crate::walk_region::WalkRegion;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version written into and required from authoring documents.
pub const DOC_VERSION: u32 = 1;

// Authoring document: the shape as drawn plus an optional placement.
#[derive(Serialize, Deserialize)]
struct RegionDoc {
    version: u32,
    contour: Vec<Vertex>,
    #[serde(default)]
    holes: Vec<Vec<Vertex>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Vertex>,
}

fn doc_of(r: &Region) -> RegionDoc {
    RegionDoc {
        version: DOC_VERSION,
        contour: r.contour().map(|c| c.vertices().to_vec()).unwrap_or_default(),
        holes: r.holes().iter().map(|h| h.vertices().to_vec()).collect(),
        position: if r.is_valid() { Some(r.position()) } else { None },
    }
}

fn parse_doc(v: Value) -> Result<RegionDoc> {
    let doc: RegionDoc = serde_json::from_value(v)?;
    if doc.version != DOC_VERSION {
        return Err(Error::Format(format!("unsupported document version {}", doc.version)));
    }
    Ok(doc)
}

impl Region {
    pub fn to_json_value(&self) -> Value {
        serde_json::to_value(doc_of(self)).unwrap_or(Value::Null)
    }

    pub fn from_json_value(v: Value) -> Result<Region> {
        let doc = parse_doc(v)?;
        let mut r = Region::new(&doc.contour, &doc.holes)?;
        if let Some(p) = doc.position {
            if !r.set_pos(p.x, p.y) {
                return Err(Error::CoordinateOutOfRange { index: 0, x: p.x as i64, y: p.y as i64 });
            }
        }
        Ok(r)
    }
}

impl WalkRegion {
    pub fn to_json_value(&self) -> Value { self.region.to_json_value() }

    /// Loads an authoring document and builds the visibility graph from scratch.
    pub fn from_json_value(v: Value) -> Result<WalkRegion> {
        let doc = parse_doc(v)?;
        let mut w = WalkRegion::new(&doc.contour, &doc.holes)?;
        if let Some(p) = doc.position {
            if !w.set_pos(p.x, p.y) {
                return Err(Error::CoordinateOutOfRange { index: 0, x: p.x as i64, y: p.y as i64 });
            }
        }
        Ok(w)
    }

    pub fn to_json_string(&self) -> String { self.to_json_value().to_string() }

    pub fn from_json_str(s: &str) -> Result<WalkRegion> {
        let v: Value = serde_json::from_str(s)?;
        WalkRegion::from_json_value(v)
    }
}
