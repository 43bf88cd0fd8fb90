use std::time::Instant;
use walkmesh::{Vertex, WalkRegion};

// Rectangle with a grid of square pillars; `pillars` per side.
fn build_pillar_hall(pillars: i32) -> WalkRegion {
    let cell = 40;
    let size = cell * (pillars + 1);
    let contour = [Vertex::new(0, 0), Vertex::new(size, 0), Vertex::new(size, size), Vertex::new(0, size)];
    let mut holes = Vec::new();
    for j in 1..=pillars { for i in 1..=pillars {
        let (cx, cy) = (i * cell, j * cell);
        holes.push(vec![Vertex::new(cx - 8, cy - 8), Vertex::new(cx + 8, cy - 8), Vertex::new(cx + 8, cy + 8), Vertex::new(cx - 8, cy + 8)]);
    } }
    WalkRegion::new(&contour, &holes).unwrap_or_else(|e| { eprintln!("FAIL: cannot build region: {}", e); std::process::exit(1); })
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut pillars = 6i32;
    let mut queries = 2000usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--pillars=") { if let Ok(v)=val.parse() { pillars=v; } }
        else if let Some(val)=a.strip_prefix("--queries=") { if let Ok(v)=val.parse() { queries=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let t_build = Instant::now();
    let w = build_pillar_hall(pillars.max(1));
    let build_ms = t_build.elapsed().as_secs_f64() * 1000.0;
    let size = w.bounding_box().right;

    let mut times_ms: Vec<f64> = Vec::with_capacity(queries);
    let mut seed = 0x9E37_79B9_7F4A_7C15u64;
    let mut next = |m: i32| { seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); ((seed >> 33) % (m as u64 + 1)) as i32 };
    let mut found = 0usize;
    let mut waypoints = 0usize;
    let start_all = Instant::now();
    for _ in 0..queries {
        let a = Vertex::new(next(size), next(size));
        let b = Vertex::new(next(size), next(size));
        let t0 = Instant::now();
        if let Ok(path) = w.query_path(a, b) { found += 1; waypoints += path.len(); }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("nodes={} build_ms={:.3} queries={} found={} waypoints={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}",
        w.nodes().len(), build_ms, queries, found, waypoints, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
