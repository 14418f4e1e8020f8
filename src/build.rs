// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, kwg};
use std::collections::HashMap;

pub enum BuildFormat {
    DawgOnly,
    Gaddawg,
}

struct TrieArc {
    tile: u8,
    accepts: bool,
    target: u32, // into Trie::nodes, 0 if no continuation.
}

// One sibling list. Arcs are kept sorted by tile, so separators come first.
#[derive(Default)]
struct TrieNode {
    arcs: Vec<TrieArc>,
}

struct Trie {
    nodes: Vec<TrieNode>, // nodes[0] is the empty list.
}

impl Trie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn new_node(&mut self) -> u32 {
        self.nodes.push(TrieNode::default());
        (self.nodes.len() - 1) as u32
    }

    fn arc_for(&mut self, node: u32, tile: u8) -> usize {
        let arcs = &mut self.nodes[node as usize].arcs;
        match arcs.binary_search_by_key(&tile, |arc| arc.tile) {
            Ok(i) => i,
            Err(i) => {
                arcs.insert(
                    i,
                    TrieArc {
                        tile,
                        accepts: false,
                        target: 0,
                    },
                );
                i
            }
        }
    }

    // Returns the arc for the last tile, creating the path as needed.
    fn insert(&mut self, root: u32, tiles: &[u8]) -> &mut TrieArc {
        let mut node = root;
        let mut arc = 0;
        for (i, &tile) in tiles.iter().enumerate() {
            arc = self.arc_for(node, tile);
            if i + 1 < tiles.len() {
                let mut target = self.nodes[node as usize].arcs[arc].target;
                if target == 0 {
                    target = self.new_node();
                    self.nodes[node as usize].arcs[arc].target = target;
                }
                node = target;
            }
        }
        &mut self.nodes[node as usize].arcs[arc]
    }

    // The sibling list reached after tiles, 0 if there is none.
    fn walk(&self, root: u32, tiles: &[u8]) -> u32 {
        let mut node = root;
        for &tile in tiles {
            match self.nodes[node as usize]
                .arcs
                .binary_search_by_key(&tile, |arc| arc.tile)
            {
                Ok(i) => node = self.nodes[node as usize].arcs[i].target,
                Err(_) => return 0,
            }
        }
        node
    }
}

type Block = Box<[(u8, bool, u32)]>; // (tile, accepts, block of continuation)

// Identical sibling lists are emitted once.
struct BlockMaker<'a> {
    trie: &'a Trie,
    block_of_node: Vec<u32>,
    blocks: Vec<Block>, // blocks[0] is the empty list.
    block_finder: HashMap<Block, u32>,
}

impl<'a> BlockMaker<'a> {
    fn new(trie: &'a Trie) -> Self {
        Self {
            trie,
            block_of_node: vec![!0; trie.nodes.len()],
            blocks: vec![Box::new([])],
            block_finder: HashMap::new(),
        }
    }

    fn make_block(&mut self, node: u32) -> u32 {
        if self.block_of_node[node as usize] != !0 {
            return self.block_of_node[node as usize];
        }
        let trie = self.trie;
        let arcs = &trie.nodes[node as usize].arcs;
        let block_idx = if arcs.is_empty() {
            0
        } else {
            let block = arcs
                .iter()
                .map(|arc| (arc.tile, arc.accepts, self.make_block(arc.target)))
                .collect::<Block>();
            let next_idx = self.blocks.len() as u32;
            match self.block_finder.entry(block) {
                std::collections::hash_map::Entry::Occupied(entry) => *entry.get(),
                std::collections::hash_map::Entry::Vacant(entry) => {
                    self.blocks.push(entry.key().clone());
                    entry.insert(next_idx);
                    next_idx
                }
            }
        };
        self.block_of_node[node as usize] = block_idx;
        block_idx
    }

    fn to_vec(&self, dawg_block: u32, gaddag_block: u32) -> error::Returns<Vec<u8>> {
        let mut block_start = Vec::with_capacity(self.blocks.len());
        let mut num_nodes = 2;
        for block in &self.blocks {
            block_start.push(if block.is_empty() { 0 } else { num_nodes as u32 });
            num_nodes += block.len();
        }
        if num_nodes > kwg::MAX_NODES {
            return_error!(format!("word graph needs {num_nodes} nodes"));
        }
        let mut ret = Vec::with_capacity(num_nodes * 4);
        ret.extend_from_slice(&kwg::Node::new(0, false, true, block_start[dawg_block as usize]).to_le_bytes());
        ret.extend_from_slice(&kwg::Node::new(0, false, true, block_start[gaddag_block as usize]).to_le_bytes());
        for block in &self.blocks {
            for (i, &(tile, accepts, target)) in block.iter().enumerate() {
                ret.extend_from_slice(
                    &kwg::Node::new(
                        tile,
                        accepts,
                        i + 1 == block.len(),
                        block_start[target as usize],
                    )
                    .to_le_bytes(),
                );
            }
        }
        Ok(ret)
    }
}

// machine_words use tiles 1 and above. Order does not matter, repeats are fine.
pub fn build(build_format: BuildFormat, machine_words: &[Box<[u8]>]) -> error::Returns<Vec<u8>> {
    let mut trie = Trie::new();
    let dawg_root = trie.new_node();
    for word in machine_words {
        if word.is_empty() {
            return_error!("cannot build an empty word".into());
        }
        if word.iter().any(|&tile| tile == 0 || tile >= 0x40) {
            return_error!(format!("invalid tiles {word:?}"));
        }
        trie.insert(dawg_root, word).accepts = true;
    }
    let gaddag_root = match build_format {
        BuildFormat::DawgOnly => 0,
        BuildFormat::Gaddawg => {
            let gaddag_root = trie.new_node();
            let mut buffer = Vec::new();
            for word in machine_words {
                // CARE = ERAC, C@, AC@, RAC@.
                buffer.clear();
                buffer.extend(word.iter().rev());
                trie.insert(gaddag_root, &buffer).accepts = true;
                for prefix_len in 1..word.len() {
                    buffer.clear();
                    buffer.extend(word[..prefix_len].iter().rev());
                    buffer.push(0);
                    // RAC@ continues as the dawg does after CAR.
                    let target = trie.walk(dawg_root, &word[..prefix_len]);
                    trie.insert(gaddag_root, &buffer).target = target;
                }
            }
            gaddag_root
        }
    };
    let mut block_maker = BlockMaker::new(&trie);
    let dawg_block = block_maker.make_block(dawg_root);
    let gaddag_block = if gaddag_root == 0 {
        0
    } else {
        block_maker.make_block(gaddag_root)
    };
    block_maker.to_vec(dawg_block, gaddag_block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(v: &[&[u8]]) -> Vec<Box<[u8]>> {
        v.iter().map(|&w| w.into()).collect()
    }

    #[test]
    fn dawg_accepts_exactly_the_words() {
        // CARE CAR CAT
        let bytes = build(
            BuildFormat::Gaddawg,
            &words(&[&[3, 1, 18, 5], &[3, 1, 18], &[3, 1, 20]]),
        )
        .unwrap();
        let kwg = kwg::Kwg::from_bytes_alloc(&bytes).unwrap();
        assert!(kwg.has_gaddag());
        assert!(kwg.accepts_word(&[3, 1, 18, 5]));
        assert!(kwg.accepts_word(&[3, 1, 18]));
        assert!(kwg.accepts_word(&[3, 1, 20]));
        assert!(kwg.accepts_word(&[3, 1, 20 | 0x80]));
        assert!(!kwg.accepts_word(&[3, 1]));
        assert!(!kwg.accepts_word(&[3, 1, 18, 5, 19]));
        assert!(!kwg.accepts_word(&[]));
    }

    #[test]
    fn gaddag_paths_continue_into_dawg() {
        // CARE
        let bytes = build(BuildFormat::Gaddawg, &words(&[&[3, 1, 18, 5]])).unwrap();
        let kwg = kwg::Kwg::from_bytes_alloc(&bytes).unwrap();
        // ERAC accepts.
        let mut p = 1;
        for &tile in &[5, 1 + 17, 1, 3] {
            p = kwg.seek(p, tile);
            assert!(p > 0);
        }
        assert!(kwg[p].accepts());
        // AC@ then RE.
        let mut p = 1;
        for &tile in &[1, 3, 0, 18, 5] {
            p = kwg.seek(p, tile);
            assert!(p > 0);
        }
        assert!(kwg[p].accepts());
        assert!(kwg.seek(1, 0) < 0);
    }

    #[test]
    fn shared_lists_are_not_repeated() {
        // AB CB: both end in the same accepting B list.
        let bytes = build(BuildFormat::DawgOnly, &words(&[&[1, 2], &[3, 2]])).unwrap();
        // 2 headers, [A C], [B].
        assert_eq!(bytes.len(), 5 * 4);
        let kwg = kwg::Kwg::from_bytes_alloc(&bytes).unwrap();
        assert!(!kwg.has_gaddag());
    }

    #[test]
    fn empty_lexicon_matches_empty_kwg() {
        let bytes = build(BuildFormat::Gaddawg, &[]).unwrap();
        assert_eq!(bytes, kwg::EMPTY_KWG_BYTES);
    }

    #[test]
    fn rejects_bad_words() {
        assert!(build(BuildFormat::Gaddawg, &words(&[&[]])).is_err());
        assert!(build(BuildFormat::Gaddawg, &words(&[&[1, 0, 2]])).is_err());
    }
}
