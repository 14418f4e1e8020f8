// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, build, error, kwg};
use std::sync::Arc;

// Read-only word knowledge. Searches re-acquire the graph as they go, so an
// implementation may become unavailable (or slow) halfway through a search.
pub trait Dictionary: Send + Sync {
    fn name(&self) -> &str;

    fn kwg(&self) -> Result<&kwg::Kwg, error::SearchError>;

    fn has_word(&self, word: &[u8]) -> Result<bool, error::SearchError> {
        Ok(self.kwg()?.accepts_word(word))
    }
}

pub struct WordGraph {
    name: String,
    kwg: kwg::Kwg,
}

impl WordGraph {
    // every tile in the graph must be one the alphabet has.
    pub fn from_bytes(
        name: impl Into<String>,
        alphabet: &alphabet::Alphabet,
        bytes: &[u8],
    ) -> error::Returns<WordGraph> {
        let name = name.into();
        let kwg = kwg::Kwg::from_bytes_alloc(bytes)?;
        if !kwg.has_gaddag() {
            return_error!(format!("{name} has no gaddag"));
        }
        let max_tile = kwg.max_tile();
        // cross sets hold one bit per tile.
        if max_tile >= alphabet.len() || max_tile >= 64 {
            return_error!(format!(
                "{name} has tile {max_tile}, alphabet has {}",
                alphabet.len()
            ));
        }
        Ok(WordGraph { name, kwg })
    }

    pub fn from_words<'a>(
        name: impl Into<String>,
        alphabet: &alphabet::Alphabet,
        words: impl IntoIterator<Item = &'a str>,
    ) -> error::Returns<WordGraph> {
        let mut machine_words = Vec::new();
        for word in words {
            let word = word.trim();
            if !word.is_empty() {
                machine_words.push(alphabet.read_word(word)?.into_boxed_slice());
            }
        }
        machine_words.sort_unstable();
        machine_words.dedup();
        let bytes = build::build(build::BuildFormat::Gaddawg, &machine_words)?;
        Self::from_bytes(name, alphabet, &bytes)
    }
}

impl Dictionary for WordGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn kwg(&self) -> Result<&kwg::Kwg, error::SearchError> {
        Ok(&self.kwg)
    }
}

// Where dictionary files come from.
pub trait Platform: Send + Sync {
    fn read_file(&self, name: &str) -> error::Returns<Vec<u8>>;
}

pub struct FilePlatform {
    root: std::path::PathBuf,
}

impl FilePlatform {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Platform for FilePlatform {
    fn read_file(&self, name: &str) -> error::Returns<Vec<u8>> {
        Ok(std::fs::read(self.root.join(name))?)
    }
}

#[derive(Default)]
pub struct MemoryPlatform {
    files: std::collections::HashMap<String, Vec<u8>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), contents.into());
    }
}

impl Platform for MemoryPlatform {
    fn read_file(&self, name: &str) -> error::Returns<Vec<u8>> {
        match self.files.get(name) {
            Some(contents) => Ok(contents.clone()),
            None => {
                return_error!(format!("{name} not found"));
            }
        }
    }
}

// name.kwg is a prebuilt graph, name.txt is one word per line.
pub fn load_dictionary(
    platform: &dyn Platform,
    alphabet: &alphabet::Alphabet,
    name: &str,
) -> Result<WordGraph, error::SearchError> {
    let unavailable = |e: error::BoxAnyError| {
        error::SearchError::DictionaryUnavailable(format!("{name}: {e}"))
    };
    match platform.read_file(&format!("{name}.kwg")) {
        Ok(bytes) => WordGraph::from_bytes(name, alphabet, &bytes).map_err(unavailable),
        Err(kwg_err) => match platform.read_file(&format!("{name}.txt")) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                WordGraph::from_words(name, alphabet, text.lines()).map_err(unavailable)
            }
            Err(_) => Err(unavailable(kwg_err)),
        },
    }
}

// What a search request carries to reach its dictionary.
#[derive(Clone)]
pub enum DictionaryHandle {
    Loaded(Arc<dyn Dictionary>),
    Named {
        platform: Arc<dyn Platform>,
        name: String,
    },
}

impl DictionaryHandle {
    pub fn open(&self, alphabet: &alphabet::Alphabet) -> Result<Arc<dyn Dictionary>, error::SearchError> {
        match self {
            DictionaryHandle::Loaded(dictionary) => Ok(Arc::clone(dictionary)),
            DictionaryHandle::Named { platform, name } => {
                Ok(Arc::new(load_dictionary(platform.as_ref(), alphabet, name)?))
            }
        }
    }
}

impl std::fmt::Debug for DictionaryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryHandle::Loaded(dictionary) => write!(f, "Loaded({})", dictionary.name()),
            DictionaryHandle::Named { name, .. } => write!(f, "Named({name})"),
        }
    }
}
