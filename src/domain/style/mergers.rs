//! Attribute mergers: the five algorithms that fold weighted sources
//! into one merged attribute value plus an attribution breakdown.
//!
//! Categorical attributes (tone, sentence length) use weighted voting,
//! formality uses ordinal weighted averaging, vocabulary uses a weighted
//! union, and avoidance uses a conservative appearance-based intersection.

use serde::{Deserialize, Serialize};

use super::sample::{SourceType, WeightedSource};
use super::writing_style::{
    Formality, SentenceLength, Tone, AVOIDANCE_CAP, VOCABULARY_CAP,
};

/// How much one source contributed to a merged attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContribution {
    pub source_type: SourceType,
    /// Share of the chosen value's weight, 0-100. Rounding means the
    /// percentages for one attribute may be off by a point or two.
    pub percentage: u8,
}

/// Per-attribute attribution: which sources backed the merged value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeAttribution {
    pub sources: Vec<SourceContribution>,
}

/// A merged attribute value with its attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
    pub value: T,
    pub attribution: AttributeAttribution,
}

/// Merges tone by weighted voting.
pub fn merge_tone(sources: &[WeightedSource]) -> Merged<Tone> {
    vote(sources, |style| style.tone)
}

/// Merges sentence length by weighted voting.
pub fn merge_sentence_length(sources: &[WeightedSource]) -> Merged<SentenceLength> {
    vote(sources, |style| style.sentence_length)
}

/// Merges formality by ordinal weighted averaging.
///
/// Every source pulls the average toward its own level, so attribution
/// covers the whole batch in proportion to weight.
pub fn merge_formality(sources: &[WeightedSource]) -> Merged<Formality> {
    let total: f64 = sources.iter().map(|s| s.weight).sum();
    let weighted_sum: f64 = sources
        .iter()
        .map(|s| s.weight * s.style().formality.score())
        .sum();
    let average = if total > 0.0 { weighted_sum / total } else { 1.0 };
    let rounded = (average * 100.0).round() / 100.0;

    let attribution = AttributeAttribution {
        sources: sources
            .iter()
            .map(|s| SourceContribution {
                source_type: s.sample.source_type,
                percentage: percentage_of(s.weight, total),
            })
            .collect(),
    };

    Merged {
        value: Formality::from_score(rounded),
        attribution,
    }
}

/// Merges vocabulary by weighted union: terms accumulate the weight of
/// every source containing them; the top [`VOCABULARY_CAP`] survive.
pub fn merge_vocabulary(sources: &[WeightedSource]) -> Merged<Vec<String>> {
    let terms = collect_terms(sources, |style| &style.vocabulary);

    let mut ranked = terms;
    // Descending weight; ties broken by first-seen source order.
    ranked.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.first_seen.cmp(&b.first_seen))
    });
    ranked.truncate(VOCABULARY_CAP);

    let value: Vec<String> = ranked.iter().map(|t| t.term.clone()).collect();
    let attribution = term_attribution(sources, &ranked, |style| &style.vocabulary);
    Merged { value, attribution }
}

/// Merges avoidance conservatively. A term must appear in at least half
/// the sources; failing that, a term's summed weight must exceed 0.6.
/// The appearance rule takes precedence: when it selects anything, the
/// weight fallback is not consulted. An empty result becomes `["none"]`.
pub fn merge_avoidance(sources: &[WeightedSource]) -> Merged<Vec<String>> {
    let terms = collect_terms(sources, |style| &style.avoidance);
    let total_sources = sources.len();

    let mut selected: Vec<TermStats> = terms
        .iter()
        .filter(|t| t.term != "none")
        .filter(|t| total_sources > 0 && t.source_count * 2 >= total_sources)
        .cloned()
        .collect();

    if selected.is_empty() {
        selected = terms
            .iter()
            .filter(|t| t.term != "none")
            .filter(|t| t.weight > 0.6)
            .cloned()
            .collect();
    }

    if selected.is_empty() {
        return Merged {
            value: vec!["none".to_string()],
            attribution: AttributeAttribution::default(),
        };
    }

    // Highest weight first, then broader appearance, then first seen.
    selected.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.source_count.cmp(&a.source_count))
            .then(a.first_seen.cmp(&b.first_seen))
    });
    selected.truncate(AVOIDANCE_CAP);

    let value: Vec<String> = selected.iter().map(|t| t.term.clone()).collect();
    let attribution = term_attribution(sources, &selected, |style| &style.avoidance);
    Merged { value, attribution }
}

// =============================================================================
// Internals
// =============================================================================

/// Weighted voting over a categorical attribute.
///
/// Tie-break: the value backed by the single highest quality-weight
/// source wins (quality alone, not combined weight); any remaining tie
/// resolves by first-seen source order.
fn vote<T, F>(sources: &[WeightedSource], extract: F) -> Merged<T>
where
    T: Copy + PartialEq,
    F: Fn(&super::writing_style::WritingStyle) -> T,
{
    struct Candidate<T> {
        value: T,
        total_weight: f64,
        best_quality: f64,
        first_seen: usize,
    }

    let mut candidates: Vec<Candidate<T>> = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        let value = extract(source.style());
        let quality = source.sample.source_type.quality_weight();
        match candidates.iter_mut().find(|c| c.value == value) {
            Some(c) => {
                c.total_weight += source.weight;
                if quality > c.best_quality {
                    c.best_quality = quality;
                }
            }
            None => candidates.push(Candidate {
                value,
                total_weight: source.weight,
                best_quality: quality,
                first_seen: index,
            }),
        }
    }

    let winner = candidates
        .iter()
        .max_by(|a, b| {
            a.total_weight
                .partial_cmp(&b.total_weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    a.best_quality
                        .partial_cmp(&b.best_quality)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
                // max_by keeps the later of equal elements; invert the
                // index ordering so the first-seen candidate wins.
                .then(b.first_seen.cmp(&a.first_seen))
        })
        .expect("vote requires at least one source");

    // Attribution covers only the sources backing the winner, normalized
    // over their combined weight so one attribute's shares sum to 100.
    let supporters: Vec<&WeightedSource> = sources
        .iter()
        .filter(|s| extract(s.style()) == winner.value)
        .collect();
    let total: f64 = supporters.iter().map(|s| s.weight).sum();
    let attribution = AttributeAttribution {
        sources: supporters
            .iter()
            .map(|s| SourceContribution {
                source_type: s.sample.source_type,
                percentage: percentage_of(s.weight, total),
            })
            .collect(),
    };

    Merged {
        value: winner.value,
        attribution,
    }
}

#[derive(Debug, Clone)]
struct TermStats {
    term: String,
    weight: f64,
    source_count: usize,
    first_seen: usize,
}

/// Accumulates per-term weight and appearance counts, preserving
/// first-seen source order.
fn collect_terms<F>(sources: &[WeightedSource], extract: F) -> Vec<TermStats>
where
    F: Fn(&super::writing_style::WritingStyle) -> &Vec<String>,
{
    let mut terms: Vec<TermStats> = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        for raw in extract(source.style()) {
            let term = raw.trim().to_lowercase();
            if term.is_empty() {
                continue;
            }
            match terms.iter_mut().find(|t| t.term == term) {
                Some(t) => {
                    t.weight += source.weight;
                    t.source_count += 1;
                }
                None => terms.push(TermStats {
                    term,
                    weight: source.weight,
                    source_count: 1,
                    first_seen: index,
                }),
            }
        }
    }
    terms
}

/// Attribution for list attributes: a source counts only for terms it
/// actually supplied that made the final cut.
fn term_attribution<F>(
    sources: &[WeightedSource],
    selected: &[TermStats],
    extract: F,
) -> AttributeAttribution
where
    F: Fn(&super::writing_style::WritingStyle) -> &Vec<String>,
{
    let contributing: Vec<(SourceType, f64)> = sources
        .iter()
        .filter(|s| {
            extract(s.style()).iter().any(|term| {
                let term = term.trim().to_lowercase();
                selected.iter().any(|t| t.term == term)
            })
        })
        .map(|s| (s.sample.source_type, s.weight))
        .collect();

    let total: f64 = contributing.iter().map(|(_, w)| w).sum();
    AttributeAttribution {
        sources: contributing
            .into_iter()
            .map(|(source_type, weight)| SourceContribution {
                source_type,
                percentage: percentage_of(weight, total),
            })
            .collect(),
    }
}

fn percentage_of(weight: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    ((100.0 * weight / total).round() as i64).clamp(0, 100) as u8
}
