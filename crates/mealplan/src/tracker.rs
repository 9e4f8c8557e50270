use serde::Serialize;
use weekplate_recipe::Recipe;

/// Matching rule shared by need detection and crediting: a requirement
/// keyword and an ingredient token match when either one contains the other,
/// ignoring case. "chicken" therefore matches "chicken breast" and the other
/// way round.
///
/// The keyword side must already be trimmed and lowercased, as
/// [`IngredientTracker::new`] stores it; only the ingredient token is
/// normalized here.
pub fn ingredient_matches(keyword: &str, ingredient: &str) -> bool {
    let ingredient = ingredient.trim().to_lowercase();
    if keyword.is_empty() || ingredient.is_empty() {
        return false;
    }
    keyword.contains(&ingredient) || ingredient.contains(keyword)
}

/// One ingredient requirement the generated week failed to cover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientShortfall {
    pub ingredient: String,
    pub remaining: u32,
}

#[derive(Debug, Clone)]
struct RequirementCounter {
    keyword: String,
    required: u32,
    used: u32,
}

/// Tracks how many placed meals cover each requested ingredient keyword.
#[derive(Debug, Clone, Default)]
pub struct IngredientTracker {
    counters: Vec<RequirementCounter>,
}

impl IngredientTracker {
    /// Builds a tracker from raw `(keyword, count)` pairs. Keywords are
    /// trimmed and lowercased; blank keywords and zero counts are dropped
    /// with a warning. A keyword listed twice keeps its last count.
    pub fn new(needs: &[(String, u32)]) -> Self {
        let mut counters: Vec<RequirementCounter> = Vec::new();
        for (raw, count) in needs {
            let keyword = raw.trim().to_lowercase();
            if keyword.is_empty() || *count == 0 {
                tracing::warn!(
                    "Ignoring malformed ingredient requirement '{}' x{}",
                    raw,
                    count
                );
                continue;
            }
            if let Some(existing) = counters.iter_mut().find(|c| c.keyword == keyword) {
                existing.required = *count;
            } else {
                counters.push(RequirementCounter {
                    keyword,
                    required: *count,
                    used: 0,
                });
            }
        }
        Self { counters }
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// True while at least one keyword below its target matches one of the
    /// recipe's ingredients. Read-only: asking never changes the counts.
    pub fn has_unmet_need(&self, recipe: &Recipe) -> bool {
        self.counters.iter().any(|counter| {
            counter.used < counter.required
                && recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| ingredient_matches(&counter.keyword, ingredient))
        })
    }

    /// Credits a placed recipe against every keyword still below its target
    /// that it matches. Each keyword takes at most one unit per placement,
    /// no matter how many of the recipe's ingredients match it.
    pub fn record_if_needed(&mut self, recipe: &Recipe) {
        for counter in &mut self.counters {
            if counter.used >= counter.required {
                continue;
            }
            let matched = recipe
                .ingredients
                .iter()
                .any(|ingredient| ingredient_matches(&counter.keyword, ingredient));
            if matched {
                counter.used += 1;
            }
        }
    }

    /// Keywords still below their target, in request order.
    pub fn shortfalls(&self) -> Vec<IngredientShortfall> {
        self.counters
            .iter()
            .filter(|counter| counter.used < counter.required)
            .map(|counter| IngredientShortfall {
                ingredient: counter.keyword.clone(),
                remaining: counter.required - counter.used,
            })
            .collect()
    }
}
