use walkmesh::persist::{ARENA_MAGIC, WALK_REGION_MAGIC};
use walkmesh::{Error, Region, RegionArena, RegionEntry, RegionHandle, Vertex, WalkRegion, DOC_VERSION};

fn v(x: i32, y: i32) -> Vertex { Vertex::new(x, y) }

fn lcg(seed: &mut u64) -> u32 { *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); (*seed >> 33) as u32 }

fn room(w: i32, h: i32, pillar: bool) -> WalkRegion {
    let holes = if pillar {
        vec![vec![v(w / 4, h / 4), v(3 * w / 4, h / 4), v(3 * w / 4, 3 * h / 4), v(w / 4, 3 * h / 4)]]
    } else {
        Vec::new()
    };
    WalkRegion::new(&[v(0, 0), v(w, 0), v(w, h), v(0, h)], &holes).unwrap()
}

#[test]
fn walk_region_header_and_reload() {
    let mut w = room(40, 20, true);
    assert!(w.set_pos(-13, 77));
    let bytes = w.to_bytes().unwrap();
    assert_eq!(&bytes[0..4], &WALK_REGION_MAGIC.to_le_bytes());
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());

    let back = WalkRegion::from_bytes(&bytes).unwrap();
    assert_eq!(back, w);
    // the restored graph answers like the original one
    let (a, b) = (v(-12, 78), v(26, 96));
    assert_eq!(back.query_path(a, b).unwrap(), w.query_path(a, b).unwrap());
}

#[test]
fn corrupted_blocks_are_rejected() {
    let w = room(10, 10, false);
    let bytes = w.to_bytes().unwrap();

    let mut bad_magic = bytes.clone();
    bad_magic[0] ^= 0xFF;
    assert!(matches!(WalkRegion::from_bytes(&bad_magic), Err(Error::Format(_))));

    let mut bad_version = bytes.clone();
    bad_version[4] = 9;
    assert!(matches!(WalkRegion::from_bytes(&bad_version), Err(Error::Format(_))));

    for cut in [3, 8, bytes.len() / 2, bytes.len() - 1] {
        assert!(WalkRegion::from_bytes(&bytes[..cut]).is_err(), "truncated at {}", cut);
    }

    // a plain region block is not a walk region block
    let mut plain = Vec::new();
    Region::new(&[v(0, 0), v(4, 0), v(4, 4)], &[]).unwrap().persist(&mut plain).unwrap();
    assert!(WalkRegion::from_bytes(&plain).is_err());
}

#[test]
fn json_documents_carry_the_public_version() {
    let w = room(20, 10, true);
    let doc = w.to_json_value();
    assert_eq!(doc["version"], DOC_VERSION);
    assert_eq!(WalkRegion::from_json_value(doc).unwrap(), w);

    let mut newer = w.to_json_value();
    newer["version"] = (DOC_VERSION + 1).into();
    assert!(matches!(WalkRegion::from_json_value(newer), Err(Error::Format(_))));
}

#[test]
fn arena_round_trip_keeps_handles_and_kinds() {
    let mut arena = RegionArena::new();
    let a = arena.insert(room(30, 30, true));
    let b = arena.insert(Region::new(&[v(0, 0), v(8, 0), v(4, 6)], &[]).unwrap());
    let c = arena.insert(room(12, 6, false));
    arena.remove(b);
    assert!(arena.get_mut(c).unwrap().set_pos(100, 100));

    let mut buf = Vec::new();
    arena.persist(&mut buf).unwrap();
    assert_eq!(&buf[0..4], &ARENA_MAGIC.to_le_bytes());

    let back = RegionArena::unpersist(&mut buf.as_slice()).unwrap();
    assert_eq!(back, arena);
    assert_eq!(back.handles(), vec![a, c]);
    assert!(back.get(b).is_none());
    assert!(matches!(back.get(c), Some(RegionEntry::Walk(_))));
    assert_eq!(back.region(c).unwrap().position(), v(100, 100));
}

#[test]
fn arena_rejects_unknown_region_kind() {
    let mut arena = RegionArena::new();
    arena.insert(room(10, 10, false));
    let mut buf = Vec::new();
    arena.persist(&mut buf).unwrap();
    // header (8) + slot count (4) + generation (4), then the kind byte
    buf[16] = 7;
    assert!(matches!(RegionArena::unpersist(&mut buf.as_slice()), Err(Error::Format(_))));
}

// Long-running churn test; enable with: cargo test --features long-tests
#[cfg_attr(not(feature = "long-tests"), ignore)]
#[test]
fn arena_churn_and_reload() {
    let mut seed = 0x5EED_1234_ABCD_u64;
    let mut arena = RegionArena::new();
    let mut live: Vec<RegionHandle> = Vec::new();
    let mut dead: Vec<RegionHandle> = Vec::new();
    for step in 0..2_000 {
        match lcg(&mut seed) % 4 {
            0 | 1 => {
                let w = 8 + (lcg(&mut seed) % 60) as i32;
                let h = 8 + (lcg(&mut seed) % 60) as i32;
                live.push(arena.insert(room(w, h, step % 3 == 0)));
            }
            2 if !live.is_empty() => {
                let i = lcg(&mut seed) as usize % live.len();
                let h = live.swap_remove(i);
                assert!(arena.remove(h).is_some());
                dead.push(h);
            }
            _ if !live.is_empty() => {
                let h = live[lcg(&mut seed) as usize % live.len()];
                let x = (lcg(&mut seed) % 2_000) as i32 - 1_000;
                let y = (lcg(&mut seed) % 2_000) as i32 - 1_000;
                assert!(arena.get_mut(h).unwrap().set_pos(x, y));
            }
            _ => {}
        }
        if step % 250 == 0 {
            let mut buf = Vec::new();
            arena.persist(&mut buf).unwrap();
            let back = RegionArena::unpersist(&mut buf.as_slice()).unwrap();
            // the free list comes back in slot order, so compare what is reachable
            assert_eq!(back.handles(), arena.handles());
            for h in arena.handles() {
                assert_eq!(back.get(h), arena.get(h));
            }
            arena = back;
        }
    }
    assert_eq!(arena.len(), live.len());
    for h in &live {
        assert!(arena.contains(*h));
    }
    for h in &dead {
        assert!(!arena.contains(*h));
    }
}
