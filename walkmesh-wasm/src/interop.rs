use js_sys::{Array, Int32Array, Object, Reflect, Uint8Array};
use wasm_bindgen::JsValue;
use walkmesh::Vertex;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_i32(slice: &[i32]) -> Int32Array {
    let arr = Int32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_u8(slice: &[u8]) -> Uint8Array {
    let arr = Uint8Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
// [x0, y0, x1, y1, ...]
pub fn flat_vertices(vs: &[Vertex]) -> Int32Array {
    let flat: Vec<i32> = vs.iter().flat_map(|v| [v.x, v.y]).collect();
    arr_i32(&flat)
}
pub fn pairs(coords: &[i32]) -> Vec<Vertex> {
    coords.chunks_exact(2).map(|c| Vertex::new(c[0], c[1])).collect()
}
pub fn point_obj(v: Vertex) -> Object {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(v.x as f64));
    set_kv(&o, "y", &JsValue::from_f64(v.y as f64));
    o
}
pub fn str_array(items: &[String]) -> Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}
