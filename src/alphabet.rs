// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// Tile 0 is the blank. A blank on the board is stored as (tile | 0x80).
#[derive(Clone, Debug)]
pub struct Tile {
    label: &'static str,
    blank_label: &'static str,
    freq: u8,
    score: i8,
}

impl Tile {
    const fn new(label: &'static str, blank_label: &'static str, freq: u8, score: i8) -> Tile {
        Tile {
            label,
            blank_label,
            freq,
            score,
        }
    }
}

pub struct StaticAlphabet {
    tiles: Box<[Tile]>,
}

pub enum Alphabet {
    Static(StaticAlphabet),
}

impl Alphabet {
    #[inline(always)]
    fn tiles(&self) -> &[Tile] {
        match self {
            Alphabet::Static(x) => &x.tiles,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.tiles().len() as u8
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &Tile {
        &self.tiles()[idx as usize]
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'static str> {
        let c = idx & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if idx & 0x80 == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'static str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // a blank scores like tile 0 whatever letter it stands for.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        self.get(idx & !((idx as i8) >> 7) as u8).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    // same labels and distribution, different letter values.
    pub fn rescored(&self, score_of: impl Fn(u8) -> i8) -> Alphabet {
        Alphabet::Static(StaticAlphabet {
            tiles: self
                .tiles()
                .iter()
                .enumerate()
                .map(|(idx, tile)| Tile {
                    score: score_of(idx as u8),
                    ..tile.clone()
                })
                .collect(),
        })
    }

    // uppercase label is the tile, lowercase is a blank standing for it.
    pub fn tile_of_board_label(&self, c: char) -> Option<u8> {
        let mut buf = [0u8; 4];
        let s = &*c.encode_utf8(&mut buf);
        (1..self.len()).find_map(|idx| {
            let tile = self.get(idx);
            if tile.label == s {
                Some(idx)
            } else if tile.blank_label == s {
                Some(idx | 0x80)
            } else {
                None
            }
        })
    }

    pub fn read_rack(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '?' | ' ' => v.push(0),
                _ => match self.tile_of_board_label(c) {
                    Some(tile) if tile & 0x80 == 0 => v.push(tile),
                    _ => {
                        return_error!(format!("invalid rack tile {c:?} in {s:?}"));
                    }
                },
            }
        }
        Ok(v)
    }

    // dictionary spelling; blanks have no meaning here.
    pub fn read_word(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = Vec::with_capacity(s.len());
        for c in s.chars() {
            match self.tile_of_board_label(c.to_ascii_uppercase()) {
                Some(tile) if tile & 0x80 == 0 => v.push(tile),
                _ => {
                    return_error!(format!("invalid letter {c:?} in {s:?}"));
                }
            }
        }
        Ok(v)
    }

    // letters as written in a formed word, blanks shown as their letter.
    pub fn word_to_string(&self, tiles: &[u8]) -> String {
        tiles
            .iter()
            .filter_map(|&tile| self.from_board(tile & 0x7f))
            .collect()
    }
}

static ENGLISH_TILES: [Tile; 27] = [
    Tile::new("?", "?", 2, 0),
    Tile::new("A", "a", 9, 1),
    Tile::new("B", "b", 2, 3),
    Tile::new("C", "c", 2, 3),
    Tile::new("D", "d", 4, 2),
    Tile::new("E", "e", 12, 1),
    Tile::new("F", "f", 2, 4),
    Tile::new("G", "g", 3, 2),
    Tile::new("H", "h", 2, 4),
    Tile::new("I", "i", 9, 1),
    Tile::new("J", "j", 1, 8),
    Tile::new("K", "k", 1, 5),
    Tile::new("L", "l", 4, 1),
    Tile::new("M", "m", 2, 3),
    Tile::new("N", "n", 6, 1),
    Tile::new("O", "o", 8, 1),
    Tile::new("P", "p", 2, 3),
    Tile::new("Q", "q", 1, 10),
    Tile::new("R", "r", 6, 1),
    Tile::new("S", "s", 4, 1),
    Tile::new("T", "t", 6, 1),
    Tile::new("U", "u", 4, 1),
    Tile::new("V", "v", 2, 4),
    Tile::new("W", "w", 2, 4),
    Tile::new("X", "x", 1, 8),
    Tile::new("Y", "y", 2, 4),
    Tile::new("Z", "z", 1, 10),
];

pub fn make_english_alphabet() -> Alphabet {
    Alphabet::Static(StaticAlphabet {
        tiles: Box::new(ENGLISH_TILES.clone()),
    })
}

// ?A-Z as scored in Words With Friends.
static WWF_SCORES: [i8; 27] = [
    0, 1, 4, 4, 2, 1, 4, 3, 3, 1, 10, 5, 2, 4, 2, 1, 4, 10, 1, 1, 1, 2, 5, 4, 8, 3, 10,
];

// English letters and distribution with Words With Friends values.
pub fn make_wwf_alphabet() -> Alphabet {
    make_english_alphabet().rescored(|tile| WWF_SCORES.get(tile as usize).copied().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_labels_distinguish_blanks() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.tile_of_board_label('A'), Some(1));
        assert_eq!(alphabet.tile_of_board_label('z'), Some(26 | 0x80));
        assert_eq!(alphabet.tile_of_board_label('?'), None);
        assert_eq!(alphabet.tile_of_board_label('1'), None);
        assert_eq!(alphabet.from_board(3 | 0x80), Some("c"));
        assert_eq!(alphabet.from_board(0), None);
    }

    #[test]
    fn blanks_score_zero() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.score(17), 10);
        assert_eq!(alphabet.score(17 | 0x80), 0);
        assert_eq!(alphabet.score(0), 0);
    }

    #[test]
    fn read_rack_and_word() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.read_rack("CAT?").unwrap(), vec![3, 1, 20, 0]);
        assert!(alphabet.read_rack("cat").is_err());
        assert_eq!(alphabet.read_word("qi").unwrap(), vec![17, 9]);
        assert!(alphabet.read_word("Q?").is_err());
        assert_eq!(alphabet.word_to_string(&[17, 9 | 0x80]), "QI");
    }

    #[test]
    fn wwf_values() {
        let alphabet = make_wwf_alphabet();
        let word = alphabet.read_word("CRAG").unwrap();
        assert_eq!(word.iter().map(|&t| alphabet.score(t)).collect::<Vec<_>>(), [4, 1, 1, 3]);
        assert_eq!(alphabet.score(17), 10);
        assert_eq!(alphabet.score(8 | 0x80), 0);
        assert_eq!(alphabet.freq(5), 12);
    }

    #[test]
    fn rescored_keeps_labels() {
        let alphabet = make_english_alphabet();
        let flat = alphabet.rescored(|idx| (idx != 0) as i8);
        assert_eq!(flat.len(), alphabet.len());
        assert_eq!(flat.score(17), 1);
        assert_eq!(flat.score(0), 0);
        assert_eq!(flat.from_rack(17), Some("Q"));
        assert_eq!(flat.freq(5), 12);
    }
}
