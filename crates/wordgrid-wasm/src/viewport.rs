//! Flat per-cell arrays for drawing chunks from JavaScript.
//!
//! JavaScript reads these through typed arrays over wasm memory instead of
//! deserializing one object per cell.

use wordgrid_core::{CellCoord, ChunkCoord, WorldMap, CHUNK_SIZE};

/// Packed cell state flags (u32)
///
/// Bit layout:
/// - Bit 0: found
/// - Bit 1: used
/// - Bit 2: part of the current drag selection
/// - Bits 3-31: reserved
#[inline]
pub fn pack_cell_flags(found: bool, used: bool, selected: bool) -> u32 {
    let mut flags: u32 = 0;
    if found {
        flags |= 1 << 0;
    }
    if used {
        flags |= 1 << 1;
    }
    if selected {
        flags |= 1 << 2;
    }
    flags
}

/// Unpack cell flags back to (found, used, selected)
#[inline]
pub fn unpack_cell_flags(flags: u32) -> (bool, bool, bool) {
    (
        flags & (1 << 0) != 0,
        flags & (1 << 1) != 0,
        flags & (1 << 2) != 0,
    )
}

/// Cells of the chunks in view, one entry per cell.
#[derive(Default)]
pub struct ChunkBuffer {
    pub gx: Vec<i32>,
    pub gy: Vec<i32>,
    /// ASCII letter codes
    pub letters: Vec<u8>,
    pub flags: Vec<u32>,
}

impl ChunkBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            gx: Vec::with_capacity(capacity),
            gy: Vec::with_capacity(capacity),
            letters: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.gx.clear();
        self.gy.clear();
        self.letters.clear();
        self.flags.clear();
    }

    pub fn len(&self) -> usize {
        self.gx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gx.is_empty()
    }

    pub fn push(&mut self, coord: CellCoord, letter: char, flags: u32) {
        self.gx.push(coord.gx);
        self.gy.push(coord.gy);
        self.letters.push(if letter.is_ascii() { letter as u8 } else { b'?' });
        self.flags.push(flags);
    }

    /// Append every cell of the occupied chunks within the inclusive chunk range.
    pub fn populate(
        &mut self,
        world: &WorldMap,
        min: ChunkCoord,
        max: ChunkCoord,
        selected: &[CellCoord],
    ) {
        for cy in min.cy..=max.cy {
            for cx in min.cx..=max.cx {
                let chunk = ChunkCoord::new(cx, cy);
                if !world.is_occupied(chunk) {
                    continue;
                }
                for ly in 0..CHUNK_SIZE {
                    for lx in 0..CHUNK_SIZE {
                        let coord = chunk.cell_at(lx, ly);
                        if let Some(cell) = world.cell(coord) {
                            let flags = pack_cell_flags(
                                cell.is_found(),
                                cell.is_used(),
                                selected.contains(&coord),
                            );
                            self.push(coord, cell.letter(), flags);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgrid_core::snapshot::{CellSnapshot, ChunkSnapshot};
    use wordgrid_core::{Snapshot, CHUNK_AREA};

    #[test]
    fn test_pack_unpack_flags() {
        let flags = pack_cell_flags(true, false, true);
        assert_eq!(unpack_cell_flags(flags), (true, false, true));
        assert_eq!(pack_cell_flags(false, false, false), 0);
        assert_eq!(pack_cell_flags(true, true, false), 0b011);
    }

    #[test]
    fn test_populate_skips_empty_chunks() {
        let mut snapshot = Snapshot::capture(&WorldMap::new(), 0);
        snapshot.chunks.push(ChunkSnapshot {
            cx: 1,
            cy: 0,
            cells: vec![
                CellSnapshot {
                    letter: 'K',
                    found: false,
                    used: false,
                };
                CHUNK_AREA
            ],
        });
        let mut world = snapshot.to_world().unwrap();
        world.mark_found(&[CellCoord::new(10, 0)]);

        let mut buf = ChunkBuffer::with_capacity(200);
        assert!(buf.is_empty());
        buf.populate(
            &world,
            ChunkCoord::new(0, 0),
            ChunkCoord::new(1, 0),
            &[CellCoord::new(11, 0)],
        );

        assert_eq!(buf.len(), CHUNK_AREA);
        assert_eq!(buf.gx[0], 10);
        assert_eq!(buf.letters[0], b'K');
        assert_eq!(unpack_cell_flags(buf.flags[0]), (true, true, false));
        assert_eq!(unpack_cell_flags(buf.flags[1]), (false, false, true));

        buf.clear();
        assert!(buf.is_empty());
    }
}
