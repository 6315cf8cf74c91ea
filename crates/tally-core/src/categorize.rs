//! Keyword-driven auto-categorization
//!
//! Assigns a category from vendor name and notes using a keyword table.
//! The table is plain data so deployments can swap in their own category
//! scheme without code changes.

use serde::{Deserialize, Serialize};

/// Category assigned when no keyword matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// A category guess with its confidence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryGuess {
    pub category: String,
    pub confidence: f64,
}

/// Ordered keyword table mapping categories to trigger words
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRules {
    categories: Vec<(String, Vec<String>)>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            (
                "Food",
                &["kfc", "mcdonald", "restaurant", "cafe", "food", "burger", "pizza"],
            ),
            ("Fuel", &["pso", "shell", "total", "petrol", "fuel", "gas"]),
            (
                "Transport",
                &["uber", "careem", "taxi", "transport", "bus", "metro"],
            ),
            (
                "Utilities",
                &["electricity", "gas", "water", "internet", "phone", "bill"],
            ),
            ("Rent", &["rent", "lease", "housing"]),
            ("Office", &["stationery", "office", "supplies"]),
        ];

        Self {
            categories: table
                .iter()
                .map(|(category, keywords)| {
                    (
                        category.to_string(),
                        keywords.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl CategoryRules {
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Self {
        Self { categories }
    }

    /// Guess a category from vendor text and optional notes
    ///
    /// A keyword hit in the vendor name counts double a hit only in the
    /// notes. No hit at all yields the fallback category at low confidence.
    pub fn categorize(&self, vendor: &str, notes: Option<&str>) -> CategoryGuess {
        let vendor_lower = vendor.to_lowercase();
        let notes_lower = notes.unwrap_or_default().to_lowercase();
        let combined = format!("{vendor_lower} {notes_lower}");

        let mut best: Option<(&str, u32, u32)> = None;

        for (category, keywords) in &self.categories {
            let mut score = 0u32;
            let mut matches = 0u32;

            for keyword in keywords {
                if vendor_lower.contains(keyword.as_str()) {
                    score += 10;
                    matches += 1;
                } else if combined.contains(keyword.as_str()) {
                    score += 5;
                    matches += 1;
                }
            }

            if matches > 0 {
                let beats = match best {
                    None => true,
                    Some((_, best_score, best_matches)) => {
                        (score, matches) > (best_score, best_matches)
                    }
                };
                if beats {
                    best = Some((category, score, matches));
                }
            }
        }

        match best {
            Some((category, score, matches)) => CategoryGuess {
                category: category.to_string(),
                confidence: (0.6 + matches as f64 * 0.1 + score as f64 * 0.01).min(0.95),
            },
            None => CategoryGuess {
                category: FALLBACK_CATEGORY.to_string(),
                confidence: 0.3,
            },
        }
    }
}
