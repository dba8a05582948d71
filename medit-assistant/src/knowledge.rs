//! Rule-based medical lookup tables.
//!
//! Sample data backing the fallback responder and analyzer. A production
//! deployment would source this from a curated medical database.

/// Symptoms the fallback analyzer scans conversations for.
pub const COMMON_SYMPTOMS: &[&str] = &[
    "headache",
    "abdominal pain",
    "fever",
    "cough",
    "dizziness",
    "fatigue",
    "nausea",
    "diarrhea",
    "muscle pain",
    "chills",
    "sore throat",
    "runny nose",
    "rash",
    "joint pain",
];

/// Symptom -> commonly associated diseases.
pub const SYMPTOM_DISEASE_MAP: &[(&str, &[&str])] = &[
    ("headache", &["migraine", "tension headache", "cluster headache"]),
    ("abdominal pain", &["gastritis", "enteritis", "irritable bowel syndrome"]),
    ("fever", &["common cold", "influenza", "covid-19"]),
    ("cough", &["common cold", "bronchitis", "covid-19"]),
    ("dizziness", &["anemia", "vertigo", "low blood pressure"]),
    ("fatigue", &["chronic fatigue syndrome", "anemia", "hypothyroidism"]),
    ("nausea", &["gastritis", "motion sickness", "migraine"]),
    ("diarrhea", &["enteritis", "irritable bowel syndrome", "food poisoning"]),
    ("muscle pain", &["myositis", "influenza", "fibromyalgia"]),
    ("chills", &["common cold", "influenza", "pneumonia"]),
    ("sore throat", &["pharyngitis", "tonsillitis", "laryngitis"]),
    ("runny nose", &["rhinitis", "common cold", "allergy"]),
    ("rash", &["allergy", "eczema", "chickenpox"]),
    ("joint pain", &["arthritis", "rheumatoid arthritis", "gout"]),
];

/// Disease -> care suggestions. Diseases without an entry fall back to the
/// general suggestions.
pub const DISEASE_SUGGESTIONS: &[(&str, &[&str])] = &[
    ("migraine", &["get enough sleep", "manage stress", "exercise regularly"]),
    ("tension headache", &["stretch your neck and shoulders", "manage stress", "take a warm bath"]),
    ("gastritis", &["avoid irritating foods", "eat small portions often", "avoid alcohol"]),
    ("enteritis", &["drink plenty of fluids", "eat easily digestible foods", "get some rest"]),
    ("common cold", &["rest well", "stay hydrated", "take vitamin C"]),
    ("influenza", &["rest at home", "consider fever reducers", "drink plenty of fluids"]),
    ("anemia", &["eat iron-rich foods", "combine iron with vitamin C", "avoid overexertion"]),
    ("low blood pressure", &["stand up slowly", "eat small portions often", "drink plenty of fluids"]),
    ("allergy", &["avoid known triggers", "consider antihistamines", "consult a doctor"]),
];

/// Suggestions offered when nothing disease-specific applies.
pub const GENERAL_SUGGESTIONS: &[&str] = &[
    "Get enough rest and sleep",
    "Drink plenty of water",
    "Keep a balanced diet",
    "Exercise regularly",
    "Manage your stress",
];

pub fn diseases_for_symptom(symptom: &str) -> Option<&'static [&'static str]> {
    SYMPTOM_DISEASE_MAP
        .iter()
        .find(|(s, _)| *s == symptom)
        .map(|(_, diseases)| *diseases)
}

/// Reverse lookup: every symptom that maps to the given disease.
pub fn symptoms_for_disease(disease: &str) -> Vec<&'static str> {
    SYMPTOM_DISEASE_MAP
        .iter()
        .filter(|(_, diseases)| diseases.contains(&disease))
        .map(|(symptom, _)| *symptom)
        .collect()
}

pub fn suggestions_for_disease(disease: &str) -> Option<&'static [&'static str]> {
    DISEASE_SUGGESTIONS
        .iter()
        .find(|(d, _)| *d == disease)
        .map(|(_, suggestions)| *suggestions)
}

/// All known diseases, deduplicated, in table order.
pub fn all_diseases() -> Vec<&'static str> {
    let mut diseases = Vec::new();
    for (_, list) in SYMPTOM_DISEASE_MAP {
        for disease in *list {
            if !diseases.contains(disease) {
                diseases.push(*disease);
            }
        }
    }
    diseases
}

/// One-line description for a disease derived from its associated symptoms.
/// Used when the analyzer has to register a disease the database has not
/// seen yet.
pub fn disease_description(disease: &str) -> String {
    let symptoms = symptoms_for_disease(disease);
    let associated = if symptoms.is_empty() {
        "various symptoms".to_string()
    } else {
        symptoms
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{disease} is commonly associated with symptoms such as {associated}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diseases_for_symptom() {
        let diseases = diseases_for_symptom("headache").unwrap();
        assert!(diseases.contains(&"migraine"));
        assert!(diseases_for_symptom("no such symptom").is_none());
    }

    #[test]
    fn test_symptoms_for_disease_reverse_lookup() {
        let symptoms = symptoms_for_disease("common cold");
        assert!(symptoms.contains(&"fever"));
        assert!(symptoms.contains(&"cough"));
        assert!(symptoms.contains(&"chills"));
        assert!(symptoms.contains(&"runny nose"));
    }

    #[test]
    fn test_all_diseases_deduplicates() {
        let diseases = all_diseases();
        // "common cold" appears under four symptoms but must be listed once
        assert_eq!(
            diseases.iter().filter(|d| **d == "common cold").count(),
            1
        );
    }

    #[test]
    fn test_disease_description_names_symptoms() {
        let description = disease_description("migraine");
        assert!(description.contains("headache"));

        let unknown = disease_description("mystery disease");
        assert!(unknown.contains("various symptoms"));
    }
}
