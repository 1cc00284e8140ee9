//! Food knowledge table: the read-only reference data the meal analyzer
//! matches free text against. Loaded from a versioned JSON resource so the
//! table can grow or be relocalized without touching the matching code.

use std::path::Path;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

/// One food of the knowledge table: per-100-unit nutrition plus the
/// keyword variants (synonyms, multilingual) that match it in free text.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    pub keywords: Vec<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: String,
    pub unit: String,
}

/// Quantity patterns compiled for one food, anchored on its first keyword.
/// Tried in a fixed priority order; the first hit wins:
///
/// 1. grams stated on the food word ("150g de riz")
/// 2. grams stated after the food word ("riz 150g")
/// 3. bare count directly before the food word ("2 bananes")
/// 4. bare number anywhere after the food word ("riz environ 150")
///
/// The grams-before form binds tightly (only an article or preposition may
/// sit between the amount and the food word) so that a grams figure does
/// not leak onto later foods in the same sentence.
#[derive(Debug, Clone)]
pub(crate) struct QuantityPatterns {
    patterns: [Regex; 4],
}

impl QuantityPatterns {
    fn compile(keyword: &str) -> Result<Self, regex::Error> {
        let kw = regex::escape(keyword);
        Ok(Self {
            patterns: [
                Regex::new(&format!(r"(\d+)\s*g\s*(?:de\s+|d'|du\s+|des\s+)?{kw}"))?,
                Regex::new(&format!(r"{kw}.*?(\d+)\s*g"))?,
                Regex::new(&format!(r"(\d+)\s*{kw}"))?,
                Regex::new(&format!(r"{kw}.*?(\d+)"))?,
            ],
        })
    }

    /// First matching pattern wins; its captured integer is the quantity.
    /// `None` means no pattern matched and the caller should fall back to
    /// the table's reference quantity.
    pub(crate) fn extract(&self, lowered: &str) -> Option<u32> {
        self.patterns
            .iter()
            .find_map(|re| re.captures(lowered))
            .and_then(|caps| caps[1].parse().ok())
    }
}

/// A food record with its precompiled quantity patterns.
#[derive(Debug, Clone)]
pub struct FoodKnowledgeEntry {
    pub record: FoodRecord,
    pub(crate) quantity: QuantityPatterns,
}

impl FoodKnowledgeEntry {
    fn new(record: FoodRecord) -> anyhow::Result<Self> {
        let first = record
            .keywords
            .first()
            .with_context(|| format!("food '{}' declares no keywords", record.name))?;
        let quantity = QuantityPatterns::compile(first)
            .with_context(|| format!("food '{}' quantity patterns", record.name))?;
        Ok(Self { record, quantity })
    }

    /// Substring containment over lowercased input, so a keyword hit inside
    /// a compound word counts too.
    pub fn matches(&self, lowered: &str) -> bool {
        self.record
            .keywords
            .iter()
            .any(|kw| lowered.contains(kw.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    version: u32,
    foods: Vec<FoodRecord>,
}

/// The loaded, immutable knowledge table. Iteration order is file order
/// and determines the order of analyzer suggestions.
#[derive(Debug, Clone)]
pub struct FoodTable {
    version: u32,
    entries: Vec<FoodKnowledgeEntry>,
}

impl FoodTable {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let file: TableFile = serde_json::from_str(raw).context("parse food table json")?;
        let entries = file
            .foods
            .into_iter()
            .map(FoodKnowledgeEntry::new)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            version: file.version,
            entries,
        })
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read food table {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// The table shipped with the binary; FOOD_TABLE_PATH overrides it.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(include_str!("../../assets/foods.json"))
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn entries(&self) -> &[FoodKnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// === Unit Tests ===
