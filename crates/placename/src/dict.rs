//! The place-name reading dictionary.

use std::collections::HashMap;

use quake_core::NameTiers;

use crate::kana::katakana_to_hiragana;

/// Place name → hiragana reading, with a user-editable override table.
///
/// Built once per session by flattening the three administrative tiers of
/// the reference dataset into one map. Readings arrive in katakana and are
/// normalized to hiragana at insert time. The override table is loaded from
/// the persisted store and always wins over the built dictionary - an
/// explicit empty override marks "no reading available" and suppresses
/// repeated lookups for that key.
#[derive(Debug, Default, Clone)]
pub struct KanaDict {
    readings: HashMap<String, String>,
    /// Dictionary keys sorted by descending length, for longest-first scans.
    sorted_keys: Vec<String>,
    overrides: HashMap<String, String>,
}

impl KanaDict {
    /// An empty dictionary. Every lookup degrades to a blank reading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dictionary from the reference dataset.
    pub fn from_tiers(tiers: &NameTiers) -> Self {
        let mut readings = HashMap::new();
        for place in tiers.iter() {
            if place.name.is_empty() {
                continue;
            }
            readings
                .entry(place.name.clone())
                .or_insert_with(|| katakana_to_hiragana(&place.reading));
        }

        let mut sorted_keys: Vec<String> = readings.keys().cloned().collect();
        sorted_keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            readings,
            sorted_keys,
            overrides: HashMap::new(),
        }
    }

    /// Replace the override table (loaded from the persisted store).
    pub fn set_overrides(&mut self, overrides: HashMap<String, String>) {
        self.overrides = overrides;
    }

    /// The current override table.
    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    /// Resolve a reading for `"{prefecture}_{municipality}"` or a bare name.
    ///
    /// Order: explicit override (an empty value counts as a hit), exact
    /// dictionary match on the municipality segment, retry with any
    /// full-width-parenthesized annotation stripped. Returns an empty
    /// string when unresolved; never errors.
    pub fn lookup(&self, key: &str) -> String {
        if let Some(reading) = self.overrides.get(key) {
            return reading.clone();
        }

        let name = match key.split_once('_') {
            Some((_, tail)) => tail,
            None => key,
        };

        if let Some(reading) = self.readings.get(name) {
            return reading.clone();
        }

        if let Some(stripped) = strip_annotation(name) {
            if let Some(reading) = self.readings.get(&stripped) {
                return reading.clone();
            }
        }

        String::new()
    }

    /// Dictionary keys sorted by descending length (ties lexicographic),
    /// so prefix scans are deterministic and longest-first.
    pub fn keys_by_length(&self) -> &[String] {
        &self.sorted_keys
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Propose empty-placeholder overrides for keys that resolved to a
    /// blank reading during a render pass. Returns the newly added keys;
    /// the caller persists the table when the list is non-empty.
    pub fn propose_missing<I>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = Vec::new();
        for key in keys {
            if !self.lookup(&key).is_empty() {
                continue;
            }
            if self.overrides.contains_key(&key) {
                continue;
            }
            self.overrides.insert(key.clone(), String::new());
            added.push(key);
        }
        added
    }
}

/// Remove a full-width-parenthesized annotation and its contents.
fn strip_annotation(name: &str) -> Option<String> {
    let open = name.find('（')?;
    let close_rel = name[open..].find('）')?;
    let close_end = open + close_rel + '）'.len_utf8();

    let mut stripped = String::with_capacity(name.len());
    stripped.push_str(&name[..open]);
    stripped.push_str(&name[close_end..]);
    Some(stripped)
}
