use crate::error;
use crate::interop::{arr_u8, flat_vertices, new_obj, pairs, point_obj, set_kv, str_array};
use crate::Navigator;
use wasm_bindgen::prelude::*;
use walkmesh::{path_to_svg, Region, RegionArena, RegionEntry, RegionHandle, Vertex, WalkRegion};
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn handle(index: u32, generation: u32) -> RegionHandle { RegionHandle { index, generation } }

fn handle_obj(h: RegionHandle) -> JsValue {
    let o = new_obj();
    set_kv(&o, "index", &JsValue::from_f64(h.index as f64));
    set_kv(&o, "generation", &JsValue::from_f64(h.generation as f64));
    o.into()
}

// Splits a flat hole coordinate buffer by per-hole vertex counts.
fn split_holes(coords: &[i32], lengths: &[u32]) -> Option<Vec<Vec<Vertex>>> {
    let all = pairs(coords);
    // usize is 32 bits on wasm32, so the sum itself may overflow
    let total = lengths.iter().try_fold(0usize, |acc, n| acc.checked_add(*n as usize))?;
    if total != all.len() {
        return None;
    }
    let mut out = Vec::with_capacity(lengths.len());
    let mut at = 0;
    for n in lengths {
        let n = *n as usize;
        out.push(all[at..at + n].to_vec());
        at += n;
    }
    Some(out)
}

#[wasm_bindgen]
impl Navigator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Navigator {
        crate::Navigator::rs_new()
    }

    pub fn region_count(&self) -> u32 {
        self.inner.len() as u32
    }

    /// Adds a region from flat `[x0, y0, x1, y1, ...]` buffers. `hole_lengths`
    /// gives the vertex count of each hole in `holes`. Walkable regions also
    /// get a visibility graph and answer path queries.
    pub fn add_region_res(&mut self, contour: &[i32], holes: &[i32], hole_lengths: &[u32], walkable: bool) -> JsValue {
        if contour.len() % 2 != 0 {
            return error::bad_coordinates("contour", contour.len());
        }
        if holes.len() % 2 != 0 {
            return error::bad_coordinates("holes", holes.len());
        }
        let Some(holes) = split_holes(holes, hole_lengths) else {
            return error::bad_coordinates("hole_lengths", hole_lengths.len());
        };
        let contour = pairs(contour);
        let entry: walkmesh::Result<RegionEntry> = if walkable {
            WalkRegion::new(&contour, &holes).map(RegionEntry::from)
        } else {
            Region::new(&contour, &holes).map(RegionEntry::from)
        };
        match entry {
            Ok(e) => error::ok(handle_obj(self.inner.insert(e))),
            Err(e) => error::from_core(&e),
        }
    }

    /// Adds a region from an authoring document `{version, contour, holes, position?}`.
    pub fn add_region_json_res(&mut self, doc: JsValue, walkable: bool) -> JsValue {
        let val = match serde_wasm_bindgen::from_value::<serde_json::Value>(doc) {
            Ok(v) => v,
            Err(e) => return error::err("json_parse", format!("{}", e), None),
        };
        let entry = if walkable {
            WalkRegion::from_json_value(val).map(RegionEntry::from)
        } else {
            Region::from_json_value(val).map(RegionEntry::from)
        };
        match entry {
            Ok(e) => error::ok(handle_obj(self.inner.insert(e))),
            Err(e) => error::from_core(&e),
        }
    }

    pub fn remove_region(&mut self, index: u32, generation: u32) -> bool {
        self.inner.remove(handle(index, generation)).is_some()
    }

    pub fn contains(&self, index: u32, generation: u32) -> bool {
        self.inner.contains(handle(index, generation))
    }

    pub fn set_pos_res(&mut self, index: u32, generation: u32, x: i32, y: i32) -> JsValue {
        let Some(entry) = self.inner.get_mut(handle(index, generation)) else {
            return error::invalid_handle(index, generation);
        };
        if entry.set_pos(x, y) {
            error::ok(JsValue::TRUE)
        } else {
            error::out_of_range(x, y)
        }
    }

    pub fn get_pos_res(&self, index: u32, generation: u32) -> JsValue {
        match self.inner.region(handle(index, generation)) {
            Some(r) => error::ok(point_obj(r.position()).into()),
            None => error::invalid_handle(index, generation),
        }
    }

    pub fn centroid_res(&self, index: u32, generation: u32) -> JsValue {
        match self.inner.region(handle(index, generation)) {
            Some(r) => error::ok(point_obj(r.centroid()).into()),
            None => error::invalid_handle(index, generation),
        }
    }

    /// Stale handles answer `false`.
    pub fn is_point_in_region(&self, index: u32, generation: u32, x: i32, y: i32) -> bool {
        self.inner
            .region(handle(index, generation))
            .map_or(false, |r| r.is_point_in_region(Vertex::new(x, y)))
    }

    pub fn is_line_of_sight(&self, index: u32, generation: u32, ax: i32, ay: i32, bx: i32, by: i32) -> bool {
        self.inner
            .region(handle(index, generation))
            .map_or(false, |r| r.is_line_of_sight(Vertex::new(ax, ay), Vertex::new(bx, by)))
    }

    /// `{x, y, degraded}` where `degraded` marks the nearest-vertex fallback.
    pub fn closest_point_res(&self, index: u32, generation: u32, x: i32, y: i32) -> JsValue {
        let Some(r) = self.inner.region(handle(index, generation)) else {
            return error::invalid_handle(index, generation);
        };
        let c = r.find_closest_region_point(Vertex::new(x, y));
        let o = point_obj(c.point());
        set_kv(&o, "degraded", &JsValue::from_bool(c.is_degraded()));
        error::ok(o.into())
    }

    /// Path as a flat `Int32Array` of waypoints, start and end included.
    pub fn query_path_res(&self, index: u32, generation: u32, sx: i32, sy: i32, ex: i32, ey: i32) -> JsValue {
        let w = match walk(&self.inner, index, generation) {
            Ok(w) => w,
            Err(e) => return e,
        };
        match w.query_path(Vertex::new(sx, sy), Vertex::new(ex, ey)) {
            Ok(path) => error::ok(flat_vertices(&path).into()),
            Err(e) => error::from_core(&e),
        }
    }

    /// Graph nodes as flat pairs plus the row-major visibility matrix.
    pub fn get_graph_res(&self, index: u32, generation: u32) -> JsValue {
        let w = match walk(&self.inner, index, generation) {
            Ok(w) => w,
            Err(e) => return e,
        };
        let flat: Vec<u32> = w.visibility_matrix().iter().flatten().copied().collect();
        let matrix = js_sys::Uint32Array::new_with_length(flat.len() as u32);
        matrix.copy_from(&flat);
        let obj = new_obj();
        set_kv(&obj, "nodes", &flat_vertices(w.nodes()).into());
        set_kv(&obj, "matrix", &matrix.into());
        set_kv(&obj, "noEdge", &JsValue::from_f64(walkmesh::NO_EDGE as f64));
        error::ok(obj.into())
    }

    pub fn to_json_res(&self, index: u32, generation: u32) -> JsValue {
        let Some(entry) = self.inner.get(handle(index, generation)) else {
            return error::invalid_handle(index, generation);
        };
        let value = match entry {
            RegionEntry::Walk(w) => w.to_json_value(),
            RegionEntry::Plain(r) => r.to_json_value(),
        };
        match serde_wasm_bindgen::to_value(&value) {
            Ok(v) => error::ok(v),
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }

    pub fn to_svg_paths_res(&self, index: u32, generation: u32) -> JsValue {
        match walk(&self.inner, index, generation) {
            Ok(w) => error::ok(str_array(&w.to_svg_paths()).into()),
            Err(e) => e,
        }
    }

    pub fn path_to_svg(&self, coords: &[i32]) -> String {
        path_to_svg(&pairs(coords))
    }

    /// Save-game block for the whole arena.
    pub fn persist_res(&self) -> JsValue {
        let mut buf = Vec::new();
        match self.inner.persist(&mut buf) {
            Ok(()) => error::ok(arr_u8(&buf).into()),
            Err(e) => error::from_core(&e),
        }
    }

    /// Replaces the arena with a persisted one; on error nothing changes.
    pub fn unpersist_res(&mut self, bytes: &[u8]) -> JsValue {
        let mut r = bytes;
        match RegionArena::unpersist(&mut r) {
            Ok(arena) => {
                self.inner = arena;
                error::ok(JsValue::from_f64(self.inner.len() as f64))
            }
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("unpersist failed: {}", e)));
                error::from_core(&e)
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self { Navigator::new() }
}

fn walk(arena: &RegionArena, index: u32, generation: u32) -> Result<&WalkRegion, JsValue> {
    match arena.get(handle(index, generation)) {
        None => Err(error::invalid_handle(index, generation)),
        Some(RegionEntry::Plain(_)) => Err(error::not_walkable(index)),
        Some(RegionEntry::Walk(w)) => Ok(w),
    }
}
