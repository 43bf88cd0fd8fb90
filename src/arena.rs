//! Slot arena addressing regions by small integer handles.
//!
//! Each slot carries a generation that is bumped when its region is removed,
//! so handles kept across a removal stop resolving instead of aliasing the
//! next region stored in the same slot.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::persist::{read_header, write_header, ARENA_MAGIC};
use crate::region::Region;
use crate::walk_region::WalkRegion;

const KIND_EMPTY: u8 = 0;
const KIND_PLAIN: u8 = 1;
const KIND_WALK: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionHandle {
    pub index: u32,
    pub generation: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionEntry {
    Plain(Region),
    Walk(WalkRegion),
}

impl RegionEntry {
    pub fn region(&self) -> &Region {
        match self {
            RegionEntry::Plain(r) => r,
            RegionEntry::Walk(w) => w.region(),
        }
    }

    pub fn as_walk(&self) -> Option<&WalkRegion> {
        match self {
            RegionEntry::Walk(w) => Some(w),
            RegionEntry::Plain(_) => None,
        }
    }

    /// Moves either kind of region, keeping walk region nodes in sync.
    pub fn set_pos(&mut self, x: i32, y: i32) -> bool {
        match self {
            RegionEntry::Plain(r) => r.set_pos(x, y),
            RegionEntry::Walk(w) => w.set_pos(x, y),
        }
    }
}

impl From<Region> for RegionEntry {
    fn from(r: Region) -> Self { RegionEntry::Plain(r) }
}

impl From<WalkRegion> for RegionEntry {
    fn from(w: WalkRegion) -> Self { RegionEntry::Walk(w) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Slot {
    generation: u32,
    entry: Option<RegionEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionArena {
    slots: Vec<Slot>,
    free: Vec<u32>, // indices of empty slots, reused last-in first-out
}

impl RegionArena {
    pub fn new() -> Self { RegionArena::default() }

    pub fn insert(&mut self, entry: impl Into<RegionEntry>) -> RegionHandle {
        let entry = entry.into();
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return RegionHandle { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, entry: Some(entry) });
        RegionHandle { index, generation: 0 }
    }

    pub fn remove(&mut self, h: RegionHandle) -> Option<RegionEntry> {
        let slot = self.slots.get_mut(h.index as usize)?;
        if slot.generation != h.generation || slot.entry.is_none() {
            return None;
        }
        let entry = slot.entry.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(h.index);
        entry
    }

    pub fn contains(&self, h: RegionHandle) -> bool { self.get(h).is_some() }

    pub fn get(&self, h: RegionHandle) -> Option<&RegionEntry> {
        self.slots
            .get(h.index as usize)
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.entry.as_ref())
    }

    pub fn get_mut(&mut self, h: RegionHandle) -> Option<&mut RegionEntry> {
        self.slots
            .get_mut(h.index as usize)
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.entry.as_mut())
    }

    /// Like [`RegionArena::get`] but reports stale handles as an error.
    pub fn try_get(&self, h: RegionHandle) -> Result<&RegionEntry> {
        self.get(h).ok_or(Error::StaleHandle { index: h.index, generation: h.generation })
    }

    pub fn region(&self, h: RegionHandle) -> Option<&Region> { self.get(h).map(|e| e.region()) }

    pub fn walk_region(&self, h: RegionHandle) -> Option<&WalkRegion> { self.get(h).and_then(|e| e.as_walk()) }

    pub fn walk_region_mut(&mut self, h: RegionHandle) -> Option<&mut WalkRegion> {
        match self.get_mut(h)? {
            RegionEntry::Walk(w) => Some(w),
            RegionEntry::Plain(_) => None,
        }
    }

    pub fn len(&self) -> usize { self.slots.iter().filter(|s| s.entry.is_some()).count() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Live handles in slot order.
    pub fn handles(&self) -> Vec<RegionHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.entry.is_some())
            .map(|(i, s)| RegionHandle { index: i as u32, generation: s.generation })
            .collect()
    }

    /// Writes every slot, empty ones included, so handles survive a reload.
    pub fn persist<W: Write>(&self, w: &mut W) -> Result<()> {
        write_header(w, ARENA_MAGIC)?;
        w.write_u32::<LittleEndian>(self.slots.len() as u32)?;
        for slot in &self.slots {
            w.write_u32::<LittleEndian>(slot.generation)?;
            match &slot.entry {
                None => w.write_u8(KIND_EMPTY)?,
                Some(RegionEntry::Plain(r)) => {
                    w.write_u8(KIND_PLAIN)?;
                    r.persist_body(w)?;
                }
                Some(RegionEntry::Walk(wr)) => {
                    w.write_u8(KIND_WALK)?;
                    wr.persist_body(w)?;
                }
            }
        }
        Ok(())
    }

    pub fn unpersist<R: Read>(r: &mut R) -> Result<RegionArena> {
        read_header(r, ARENA_MAGIC)?;
        let count = r.read_u32::<LittleEndian>()? as usize;
        let mut arena = RegionArena::default();
        for index in 0..count {
            let generation = r.read_u32::<LittleEndian>()?;
            let entry = match r.read_u8()? {
                KIND_EMPTY => None,
                KIND_PLAIN => Some(RegionEntry::Plain(Region::unpersist_body(r)?)),
                KIND_WALK => Some(RegionEntry::Walk(WalkRegion::unpersist_body(r)?)),
                other => return Err(Error::Format(format!("unknown region kind {}", other))),
            };
            if entry.is_none() {
                arena.free.push(index as u32);
            }
            arena.slots.push(Slot { generation, entry });
        }
        Ok(arena)
    }
}
