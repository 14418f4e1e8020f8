// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// tile:8 accepts:1 is_end:1 arc_index:22
#[derive(Clone, Copy)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    pub fn new(tile: u8, accepts: bool, is_end: bool, arc_index: u32) -> Node {
        Node(
            (tile as u32) << 24
                | (accepts as u32) << 23
                | (is_end as u32) << 22
                | (arc_index & 0x3fffff),
        )
    }

    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & 0x800000 != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & 0x400000 != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> i32 {
        (self.0 & 0x3fffff) as i32
    }

    #[inline(always)]
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

pub const MAX_NODES: usize = 0x400000;

// Node 0 points to the dawg, node 1 points to the gaddag.
pub struct Kwg(pub Box<[Node]>);

pub static EMPTY_KWG_BYTES: &[u8] = b"\x00\x00\x40\x00\x00\x00\x40\x00";

impl std::ops::Index<i32> for Kwg {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: i32) -> &Node {
        &self.0[i as usize]
    }
}

impl Kwg {
    pub fn from_bytes_alloc(buf: &[u8]) -> error::Returns<Kwg> {
        if buf.len() % 4 != 0 || buf.len() < 8 {
            return_error!(format!("word graph of {} bytes is truncated", buf.len()));
        }
        let elts = buf
            .chunks_exact(4)
            .map(|b| Node(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
            .collect::<Box<[Node]>>();
        if let Some(bad) = elts
            .iter()
            .position(|node| node.arc_index() as usize >= elts.len())
        {
            return_error!(format!("node {bad} points outside the word graph"));
        }
        Ok(Kwg(elts))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // highest tile any arc carries, 0 for the separator only.
    pub fn max_tile(&self) -> u8 {
        self.0.iter().map(Node::tile).max().unwrap_or(0)
    }

    // move generation walks the gaddag from node 1.
    #[inline(always)]
    pub fn has_gaddag(&self) -> bool {
        self.len() > 1 && (self[1].arc_index() != 0 || self[0].arc_index() == 0)
    }

    #[inline(always)]
    pub fn seek(&self, mut p: i32, tile: u8) -> i32 {
        if p >= 0 {
            p = self[p].arc_index();
            if p > 0 {
                loop {
                    let node = self[p];
                    if node.tile() == tile {
                        return p;
                    }
                    if node.is_end() {
                        return -1;
                    }
                    p += 1;
                }
            }
        }
        -1 // intentionally return 0 as -1
    }

    // Blank bits are ignored.
    pub fn accepts_word(&self, word: &[u8]) -> bool {
        let mut p = 0;
        for &tile in word {
            p = self.seek(p, tile & 0x7f);
            if p <= 0 {
                return false;
            }
        }
        p > 0 && self[p].accepts()
    }
}
