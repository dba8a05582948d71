//! Conversation analysis: parsing the LLM's structured answer, and the
//! rule-based analyzer used when the LLM is unavailable.

use crate::knowledge;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const MIN_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseProbability {
    pub name: String,
    /// Percentage in [0, 100].
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConversationAnalysis {
    pub symptoms: Vec<String>,
    pub diseases: Vec<DiseaseProbability>,
    pub suggestions: Vec<String>,
}

/// Analysis of a conversation with no user messages.
pub fn empty_analysis() -> ConversationAnalysis {
    ConversationAnalysis {
        symptoms: Vec::new(),
        diseases: Vec::new(),
        suggestions: knowledge::GENERAL_SUGGESTIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Extract an analysis from the medical-analysis JSON the LLM was instructed
/// to return. Tolerant of missing fields; a disease without a probability
/// gets 50%.
pub fn parse_llm_analysis(value: &Value) -> ConversationAnalysis {
    let symptoms = string_array(value.get("symptoms"));

    let diseases = value
        .get("possible_diseases")
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let name = entry.get("name")?.as_str()?.trim();
                    if name.is_empty() {
                        return None;
                    }
                    let probability = entry
                        .get("probability")
                        .and_then(|p| p.as_f64())
                        .unwrap_or(50.0);
                    Some(DiseaseProbability {
                        name: name.to_string(),
                        probability: normalize_probability(probability),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let suggestions = finalize_suggestions(string_array(value.get("health_suggestions")));

    ConversationAnalysis {
        symptoms,
        diseases,
        suggestions,
    }
}

/// Keyword analyzer ported over from the assistant's pre-LLM rule engine.
/// Scans for known symptoms and direct disease mentions, then scores disease
/// likelihood from symptom overlap.
pub fn fallback_analysis(text: &str) -> ConversationAnalysis {
    let text_lower = text.to_lowercase();

    let mut detected_symptoms: Vec<&str> = Vec::new();
    for symptom in knowledge::COMMON_SYMPTOMS.iter().copied() {
        if text_lower.contains(symptom) {
            detected_symptoms.push(symptom);
        }
    }

    // Directly named diseases score high regardless of symptom overlap, and
    // pull their representative symptoms into the detected set.
    let mut mentioned_diseases: Vec<&str> = Vec::new();
    for disease in knowledge::all_diseases() {
        if text_lower.contains(disease) {
            mentioned_diseases.push(disease);
            for symptom in knowledge::symptoms_for_disease(disease) {
                if !detected_symptoms.contains(&symptom) {
                    detected_symptoms.push(symptom);
                }
            }
        }
    }

    if detected_symptoms.is_empty() && mentioned_diseases.is_empty() {
        return empty_analysis();
    }

    let mut candidates: Vec<&str> = Vec::new();
    let mut match_counts: HashMap<&str, u32> = HashMap::new();
    for symptom in &detected_symptoms {
        if let Some(diseases) = knowledge::diseases_for_symptom(symptom) {
            for disease in diseases.iter().copied() {
                if !candidates.contains(&disease) {
                    candidates.push(disease);
                }
                *match_counts.entry(disease).or_insert(0) += 1;
            }
        }
    }
    for disease in mentioned_diseases.iter().copied() {
        if !candidates.contains(&disease) {
            candidates.push(disease);
        }
        *match_counts.entry(disease).or_insert(0) += 3;
    }

    let mut diseases: Vec<DiseaseProbability> = candidates
        .iter()
        .map(|disease| {
            let probability = if mentioned_diseases.contains(disease) {
                let count = match_counts.get(disease).copied().unwrap_or(3);
                direct_mention_probability(count)
            } else {
                let matched = match_counts.get(disease).copied().unwrap_or(0);
                let total = knowledge::symptoms_for_disease(disease).len() as u32;
                symptom_ratio_probability(matched, total)
            };
            DiseaseProbability {
                name: disease.to_string(),
                probability,
            }
        })
        .collect();

    // Highest probability first. Directly named diseases win ties (the ratio
    // formula also saturates at 95 for single-symptom diseases), then name,
    // so output is deterministic.
    diseases.sort_by(|a, b| {
        let a_direct = mentioned_diseases.iter().any(|d| *d == a.name);
        let b_direct = mentioned_diseases.iter().any(|d| *d == b.name);
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b_direct.cmp(&a_direct))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut suggestions: Vec<String> = Vec::new();
    for disease in diseases.iter().take(3) {
        if let Some(list) = knowledge::suggestions_for_disease(&disease.name) {
            for suggestion in list {
                suggestions.push(suggestion.to_string());
            }
        }
    }

    ConversationAnalysis {
        symptoms: detected_symptoms.iter().map(|s| s.to_string()).collect(),
        diseases,
        suggestions: finalize_suggestions(suggestions),
    }
}

/// A disease the user named outright: 80% plus 5 points per corroborating
/// symptom, capped at 95%.
fn direct_mention_probability(match_count: u32) -> f64 {
    let extra = match_count.saturating_sub(3) as f64;
    (80.0 + extra * 5.0).min(95.0)
}

/// Matched-to-known symptom ratio, clamped to [50, 95].
fn symptom_ratio_probability(matched: u32, total: u32) -> f64 {
    if total == 0 {
        return 50.0;
    }
    let ratio = (matched as f64 / total as f64) * 100.0;
    round1(ratio.clamp(50.0, 95.0))
}

fn normalize_probability(probability: f64) -> f64 {
    // LLMs answer either 0..1 or 0..100; store percentages.
    let percentage = if probability <= 1.0 {
        probability * 100.0
    } else {
        probability
    };
    round1(percentage.clamp(0.0, 100.0))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Pad short suggestion lists from the general pool, deduplicate while
/// preserving order, and cap the total.
pub fn finalize_suggestions(mut suggestions: Vec<String>) -> Vec<String> {
    if suggestions.len() < MIN_SUGGESTIONS {
        suggestions.extend(knowledge::GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()));
    }
    let mut seen: Vec<String> = Vec::new();
    for suggestion in suggestions {
        let key = suggestion.to_lowercase();
        if !seen.iter().any(|s: &String| s.to_lowercase() == key) {
            seen.push(suggestion);
        }
        if seen.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    seen
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_analysis_has_general_suggestions() {
        let analysis = empty_analysis();
        assert!(analysis.symptoms.is_empty());
        assert!(analysis.diseases.is_empty());
        assert_eq!(analysis.suggestions.len(), 5);
    }

    #[test]
    fn test_parse_llm_analysis() {
        let value = json!({
            "symptoms": ["headache", "nausea"],
            "possible_diseases": [
                {"name": "migraine", "probability": 72.5},
                {"name": "", "probability": 10.0},
                {"name": "tension headache"}
            ],
            "health_suggestions": ["get enough sleep"]
        });
        let analysis = parse_llm_analysis(&value);
        assert_eq!(analysis.symptoms, vec!["headache", "nausea"]);
        assert_eq!(analysis.diseases.len(), 2);
        assert_eq!(analysis.diseases[0].name, "migraine");
        assert_eq!(analysis.diseases[0].probability, 72.5);
        assert_eq!(analysis.diseases[1].probability, 50.0);
        // padded from the general pool
        assert!(analysis.suggestions.len() >= MIN_SUGGESTIONS);
        assert_eq!(analysis.suggestions[0], "get enough sleep");
    }

    #[test]
    fn test_parse_llm_analysis_fractional_probabilities() {
        let value = json!({
            "possible_diseases": [{"name": "influenza", "probability": 0.8}]
        });
        let analysis = parse_llm_analysis(&value);
        assert_eq!(analysis.diseases[0].probability, 80.0);
    }

    #[test]
    fn test_fallback_analysis_empty_text() {
        let analysis = fallback_analysis("I feel perfectly fine today.");
        assert!(analysis.symptoms.is_empty());
        assert!(analysis.diseases.is_empty());
        assert_eq!(analysis.suggestions.len(), 5);
    }

    #[test]
    fn test_fallback_analysis_detects_symptoms() {
        let analysis = fallback_analysis("I have had a headache and some nausea since morning.");
        assert!(analysis.symptoms.contains(&"headache".to_string()));
        assert!(analysis.symptoms.contains(&"nausea".to_string()));
        // migraine maps from both symptoms and reaches the 95% cap
        let migraine = analysis
            .diseases
            .iter()
            .find(|d| d.name == "migraine")
            .unwrap();
        assert_eq!(migraine.probability, 95.0);
        // gastritis matches one of its two symptoms -> floor of 50
        let gastritis = analysis
            .diseases
            .iter()
            .find(|d| d.name == "gastritis")
            .unwrap();
        assert_eq!(gastritis.probability, 50.0);
    }

    #[test]
    fn test_fallback_analysis_direct_mention_scores_high() {
        let analysis = fallback_analysis("My doctor suspects gastritis.");
        let gastritis = analysis
            .diseases
            .iter()
            .find(|d| d.name == "gastritis")
            .unwrap();
        assert!(gastritis.probability >= 80.0);
        assert!(gastritis.probability <= 95.0);
        // representative symptoms get pulled in
        assert!(analysis.symptoms.contains(&"abdominal pain".to_string()));
    }

    #[test]
    fn test_fallback_analysis_sorted_by_probability() {
        let analysis =
            fallback_analysis("I think it is influenza. Also my skin shows a rash.");
        for pair in analysis.diseases.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        assert_eq!(analysis.diseases[0].name, "influenza");
    }

    #[test]
    fn test_symptom_ratio_probability_bounds() {
        assert_eq!(symptom_ratio_probability(0, 0), 50.0);
        assert_eq!(symptom_ratio_probability(1, 4), 50.0);
        assert_eq!(symptom_ratio_probability(4, 4), 95.0);
        assert_eq!(symptom_ratio_probability(3, 4), 75.0);
    }

    #[test]
    fn test_direct_mention_probability_caps() {
        assert_eq!(direct_mention_probability(3), 80.0);
        assert_eq!(direct_mention_probability(5), 90.0);
        assert_eq!(direct_mention_probability(30), 95.0);
    }

    #[test]
    fn test_finalize_suggestions_pads_and_caps() {
        let padded = finalize_suggestions(vec!["rest".to_string()]);
        assert!(padded.len() >= MIN_SUGGESTIONS);
        assert!(padded.len() <= MAX_SUGGESTIONS);
        assert_eq!(padded[0], "rest");

        let many: Vec<String> = (0..10).map(|i| format!("tip {i}")).collect();
        assert_eq!(finalize_suggestions(many).len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_finalize_suggestions_deduplicates() {
        let suggestions = finalize_suggestions(vec![
            "Drink plenty of water".to_string(),
            "drink plenty of water".to_string(),
            "Get enough rest".to_string(),
        ]);
        let water_count = suggestions
            .iter()
            .filter(|s| s.to_lowercase() == "drink plenty of water")
            .count();
        assert_eq!(water_count, 1);
    }
}
