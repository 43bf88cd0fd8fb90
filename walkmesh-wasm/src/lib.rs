use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Arena of regions exposed to JavaScript. Regions are addressed by the
/// `(index, generation)` pair returned when they are added.
#[wasm_bindgen]
pub struct Navigator { pub(crate) inner: walkmesh::RegionArena }

impl Navigator {
    pub fn rs_new() -> Navigator { Navigator { inner: walkmesh::RegionArena::new() } }
}
