use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use walkmesh::Error;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn invalid_handle(index: u32, generation: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "index", &JsValue::from_f64(index as f64));
    set_kv(&d, "generation", &JsValue::from_f64(generation as f64));
    err("invalid_handle", "no region for this handle", Some(d.into()))
}

#[inline]
pub fn not_walkable(index: u32) -> JsValue {
    let d = new_obj(); set_kv(&d, "index", &JsValue::from_f64(index as f64));
    err("not_walkable", "region has no visibility graph", Some(d.into()))
}

#[inline]
pub fn bad_coordinates(param: &str, len: usize) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "len", &JsValue::from_f64(len as f64));
    err("bad_coordinates", format!("parameter '{}' must hold x, y pairs", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(x: i32, y: i32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "x", &JsValue::from_f64(x as f64));
    set_kv(&d, "y", &JsValue::from_f64(y as f64));
    err("out_of_range", "position leaves the coordinate limits", Some(d.into()))
}

/// Maps a core error onto a stable code plus its display message.
pub fn from_core(e: &Error) -> JsValue {
    let code = match e {
        Error::TooFewVertices { .. } => "too_few_vertices",
        Error::TooManyVertices { .. } => "too_many_vertices",
        Error::CoordinateOutOfRange { .. } => "out_of_range",
        Error::DegenerateEdge { .. } => "degenerate_edge",
        Error::SelfIntersecting { .. } => "self_intersecting",
        Error::InvalidRegion => "invalid_region",
        Error::StartUnreachable { .. } => "start_unreachable",
        Error::EndUnreachable { .. } => "end_unreachable",
        Error::NoPath => "no_path",
        Error::StaleHandle { .. } => "invalid_handle",
        Error::Format(_) | Error::Io(_) => "bad_format",
        Error::Json(_) => "json_parse",
    };
    err(code, e.to_string(), None)
}
