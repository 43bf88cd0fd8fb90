//! Binary persistence blocks for save games.
//!
//! All values are little-endian. Top-level blocks start with a magic number
//! and a format version; nested polygon and region payloads do not repeat
//! the header. Restoring a walk region reads the nodes and visibility matrix
//! back verbatim instead of recomputing the graph. Restored state must agree
//! with what building the same shape would produce: polygons clockwise, the
//! position on the contour's top-left corner and the nodes equal to the
//! polygon vertices.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::algorithms::visibility::collect_nodes;
use crate::error::{Error, Result};
use crate::geometry::limits::{MAX_HOLES, MAX_NODES, MAX_POLYGON_VERTICES};
use crate::model::Vertex;
use crate::polygon::Polygon;
use crate::region::Region;
use crate::walk_region::WalkRegion;

/// 'REGN'
pub const REGION_MAGIC: u32 = 0x4E47_4552;
/// 'WALK'
pub const WALK_REGION_MAGIC: u32 = 0x4B4C_4157;
/// 'ARNA'
pub const ARENA_MAGIC: u32 = 0x414E_5241;
pub const FORMAT_VERSION: u32 = 1;

pub(crate) fn write_header<W: Write>(w: &mut W, magic: u32) -> Result<()> {
    w.write_u32::<LittleEndian>(magic)?;
    w.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    Ok(())
}

pub(crate) fn read_header<R: Read>(r: &mut R, magic: u32) -> Result<()> {
    let got = r.read_u32::<LittleEndian>()?;
    if got != magic {
        log::warn!("persisted block rejected: magic {:#010x}, expected {:#010x}", got, magic);
        return Err(Error::Format(format!("bad magic {:#010x}", got)));
    }
    let version = r.read_u32::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(Error::Format(format!("unsupported version {}", version)));
    }
    Ok(())
}

fn read_count<R: Read>(r: &mut R, what: &str, max: usize) -> Result<usize> {
    let n = r.read_u32::<LittleEndian>()? as usize;
    if n > max {
        return Err(Error::Format(format!("{} count {} exceeds {}", what, n, max)));
    }
    Ok(n)
}

fn write_vertex<W: Write>(w: &mut W, v: Vertex) -> Result<()> {
    w.write_i32::<LittleEndian>(v.x)?;
    w.write_i32::<LittleEndian>(v.y)?;
    Ok(())
}

fn read_vertex<R: Read>(r: &mut R) -> Result<Vertex> {
    let x = r.read_i32::<LittleEndian>()?;
    let y = r.read_i32::<LittleEndian>()?;
    Ok(Vertex { x, y })
}

fn write_vertices<W: Write>(w: &mut W, vertices: &[Vertex]) -> Result<()> {
    w.write_u32::<LittleEndian>(vertices.len() as u32)?;
    for v in vertices {
        write_vertex(w, *v)?;
    }
    Ok(())
}

fn read_vertices<R: Read>(r: &mut R, what: &str, max: usize) -> Result<Vec<Vertex>> {
    let n = read_count(r, what, max)?;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(read_vertex(r)?);
    }
    Ok(out)
}

impl Polygon {
    /// Vertex count followed by the X/Y pairs, in stored order.
    pub fn persist<W: Write>(&self, w: &mut W) -> Result<()> {
        write_vertices(w, self.vertices())
    }

    /// Reads a polygon written by [`Polygon::persist`]; derived attributes are recomputed.
    pub fn unpersist<R: Read>(r: &mut R) -> Result<Polygon> {
        let vertices = read_vertices(r, "polygon vertex", MAX_POLYGON_VERTICES)?;
        Polygon::new(&vertices)
    }
}

impl Region {
    pub(crate) fn persist_body<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u8(self.valid as u8)?;
        if !self.valid {
            return Ok(());
        }
        write_vertex(w, self.position)?;
        w.write_u32::<LittleEndian>(self.polygons.len() as u32)?;
        for p in &self.polygons {
            p.persist(w)?;
        }
        Ok(())
    }

    pub(crate) fn unpersist_body<R: Read>(r: &mut R) -> Result<Region> {
        if r.read_u8()? == 0 {
            return Ok(Region::default());
        }
        let position = read_vertex(r)?;
        let count = read_count(r, "polygon", MAX_HOLES + 1)?;
        if count == 0 {
            return Err(Error::Format("valid region without a contour".into()));
        }
        let mut polygons = Vec::with_capacity(count);
        for i in 0..count {
            let p = Polygon::unpersist(r)?;
            if !p.is_cw() {
                return Err(Error::Format(format!("polygon {} is not stored clockwise", i)));
            }
            polygons.push(p);
        }
        let region = Region::from_parts(polygons, position);
        let bb = region.bounding_box();
        if position != Vertex::new(bb.left, bb.top) {
            return Err(Error::Format(format!(
                "position ({}, {}) is not the bounding box corner ({}, {})",
                position.x, position.y, bb.left, bb.top
            )));
        }
        Ok(region)
    }

    pub fn persist<W: Write>(&self, w: &mut W) -> Result<()> {
        write_header(w, REGION_MAGIC)?;
        self.persist_body(w)
    }

    pub fn unpersist<R: Read>(r: &mut R) -> Result<Region> {
        read_header(r, REGION_MAGIC)?;
        Region::unpersist_body(r)
    }
}

impl WalkRegion {
    pub(crate) fn persist_body<W: Write>(&self, w: &mut W) -> Result<()> {
        self.region.persist_body(w)?;
        write_vertices(w, &self.nodes)?;
        w.write_u32::<LittleEndian>(self.visibility.len() as u32)?;
        for row in &self.visibility {
            w.write_u32::<LittleEndian>(row.len() as u32)?;
            for e in row {
                w.write_u32::<LittleEndian>(*e)?;
            }
        }
        Ok(())
    }

    pub(crate) fn unpersist_body<R: Read>(r: &mut R) -> Result<WalkRegion> {
        let region = Region::unpersist_body(r)?;
        let nodes = read_vertices(r, "node", MAX_NODES)?;
        let rows = read_count(r, "matrix row", MAX_NODES)?;
        let mut visibility = Vec::with_capacity(rows);
        for _ in 0..rows {
            let cols = read_count(r, "matrix column", MAX_NODES)?;
            let mut row = Vec::with_capacity(cols);
            for _ in 0..cols {
                row.push(r.read_u32::<LittleEndian>()?);
            }
            visibility.push(row);
        }

        let expected: usize = region.polygons.iter().map(|p| p.vertex_count()).sum();
        if nodes.len() != expected {
            return Err(Error::Format(format!("{} nodes for {} polygon vertices", nodes.len(), expected)));
        }
        if nodes != collect_nodes(&region) {
            return Err(Error::Format("nodes do not match the polygon vertices".into()));
        }
        if visibility.len() != expected || visibility.iter().any(|row| row.len() != expected) {
            return Err(Error::Format(format!("visibility matrix is not {0}x{0}", expected)));
        }
        Ok(WalkRegion::from_parts(region, nodes, visibility))
    }

    pub fn persist<W: Write>(&self, w: &mut W) -> Result<()> {
        write_header(w, WALK_REGION_MAGIC)?;
        self.persist_body(w)
    }

    pub fn unpersist<R: Read>(r: &mut R) -> Result<WalkRegion> {
        read_header(r, WALK_REGION_MAGIC)?;
        WalkRegion::unpersist_body(r)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.persist(&mut out)?;
        Ok(out)
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<WalkRegion> {
        WalkRegion::unpersist(&mut bytes)
    }
}
