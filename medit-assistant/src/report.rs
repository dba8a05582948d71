//! Health-report composition: severity parsing and the rule-based report
//! used when the LLM is unavailable.

use crate::analysis::ConversationAnalysis;
use crate::assistant::UserProfile;
use chrono::Utc;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Triage level attached to every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Urgent: immediate medical attention advised.
    Red,
    /// Concerning: see a doctor soon.
    Orange,
    /// Routine: regular self-care is enough.
    #[default]
    Green,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Red => "red",
            Severity::Orange => "orange",
            Severity::Green => "green",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Severity::Red),
            "orange" => Ok(Severity::Orange),
            "green" => Ok(Severity::Green),
            other => Err(format!("unknown severity level: '{other}'")),
        }
    }
}

/// A composed report before persistence.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub content: String,
    pub severity: Severity,
}

fn severity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        let re = Regex::new(r"(?i)\n?\s*SEVERITY_LEVEL:\s*(red|orange|green)\s*").unwrap();
        re
    })
}

/// The report prompt asks the model to close with `SEVERITY_LEVEL: <level>`.
/// Pull the level out and strip the marker from the body; an absent or
/// unparsable marker defaults to green.
pub fn extract_severity(report: &str) -> (String, Severity) {
    let re = severity_regex();
    let severity = re
        .captures(report)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Severity::from_str(m.as_str()).ok())
        .unwrap_or_default();
    let content = re.replace_all(report, "\n").trim().to_string();
    (content, severity)
}

/// Reported pain on a 0-10 scale overrides the model's triage call.
pub fn severity_from_pain(pain_intensity: f64) -> Severity {
    if pain_intensity >= 7.0 {
        Severity::Red
    } else if pain_intensity >= 4.0 {
        Severity::Orange
    } else {
        Severity::Green
    }
}

/// Rule-based markdown report assembled straight from the analysis.
pub fn fallback_report(profile: &UserProfile, analysis: &ConversationAnalysis) -> String {
    let nickname = profile.nickname.as_deref().unwrap_or("not provided");
    let age_range = profile.age_range.as_deref().unwrap_or("not provided");
    let gender = profile.gender.as_deref().unwrap_or("not provided");
    let usual_illness = if profile.usual_illness.is_empty() {
        "none".to_string()
    } else {
        profile.usual_illness.join(", ")
    };

    let mut symptom_section = String::from("## Detected Symptoms\n\n");
    if analysis.symptoms.is_empty() {
        symptom_section.push_str("No symptoms were detected.\n");
    } else {
        for symptom in &analysis.symptoms {
            symptom_section.push_str(&format!("- {symptom}\n"));
        }
    }

    let mut disease_section = String::from("## Possible Conditions\n\n");
    if analysis.diseases.is_empty() {
        disease_section.push_str("No likely conditions were identified.\n");
    } else {
        for disease in &analysis.diseases {
            disease_section.push_str(&format!("- {} ({}%)\n", disease.name, disease.probability));
        }
    }

    let mut advice_section = String::from("## Health Advice\n\n");
    for (i, suggestion) in analysis.suggestions.iter().enumerate() {
        advice_section.push_str(&format!("{}. {}\n", i + 1, suggestion));
    }

    format!(
        "# Health Analysis Report\n\n\
         ## User Information\n\
         Name: {nickname}\n\
         Age range: {age_range}\n\
         Gender: {gender}\n\
         Known conditions: {usual_illness}\n\n\
         ## Conversation Analysis\n\
         The findings below are based on the conversation with the assistant.\n\n\
         {symptom_section}\n\
         {disease_section}\n\
         {advice_section}\n\
         *Note: this report was generated automatically. Please consult a doctor for an accurate diagnosis.*\n\n\
         Generated at: {}",
        Utc::now().format("%Y-%m-%d %H:%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{empty_analysis, DiseaseProbability};

    fn profile() -> UserProfile {
        UserProfile {
            nickname: Some("Alex".to_string()),
            gender: Some("female".to_string()),
            age_range: Some("30s".to_string()),
            usual_illness: vec!["hypertension".to_string()],
        }
    }

    #[test]
    fn test_extract_severity_trailer() {
        let report = "# Report\n\nEverything looks fine.\n\nSEVERITY_LEVEL: green";
        let (content, severity) = extract_severity(report);
        assert_eq!(severity, Severity::Green);
        assert!(!content.contains("SEVERITY_LEVEL"));
        assert!(content.contains("Everything looks fine."));
    }

    #[test]
    fn test_extract_severity_case_insensitive() {
        let report = "Get to an ER now.\n\nseverity_level: RED";
        let (content, severity) = extract_severity(report);
        assert_eq!(severity, Severity::Red);
        assert!(!content.to_lowercase().contains("severity_level"));
    }

    #[test]
    fn test_extract_severity_defaults_to_green() {
        let (content, severity) = extract_severity("No marker in this report.");
        assert_eq!(severity, Severity::Green);
        assert_eq!(content, "No marker in this report.");
    }

    #[test]
    fn test_extract_severity_mid_report() {
        let report = "Part one.\nSEVERITY_LEVEL: orange\nPart two.";
        let (content, severity) = extract_severity(report);
        assert_eq!(severity, Severity::Orange);
        assert!(content.contains("Part one."));
        assert!(content.contains("Part two."));
    }

    #[test]
    fn test_severity_from_pain() {
        assert_eq!(severity_from_pain(8.0), Severity::Red);
        assert_eq!(severity_from_pain(7.0), Severity::Red);
        assert_eq!(severity_from_pain(5.5), Severity::Orange);
        assert_eq!(severity_from_pain(4.0), Severity::Orange);
        assert_eq!(severity_from_pain(2.0), Severity::Green);
    }

    #[test]
    fn test_severity_round_trip() {
        for severity in [Severity::Red, Severity::Orange, Severity::Green] {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
        assert!("purple".parse::<Severity>().is_err());
    }

    #[test]
    fn test_fallback_report_structure() {
        let mut analysis = empty_analysis();
        analysis.symptoms = vec!["headache".to_string()];
        analysis.diseases = vec![DiseaseProbability {
            name: "migraine".to_string(),
            probability: 72.5,
        }];

        let report = fallback_report(&profile(), &analysis);
        assert!(report.starts_with("# Health Analysis Report"));
        assert!(report.contains("Name: Alex"));
        assert!(report.contains("Known conditions: hypertension"));
        assert!(report.contains("- headache"));
        assert!(report.contains("- migraine (72.5%)"));
        assert!(report.contains("1. Get enough rest and sleep"));
        assert!(report.contains("consult a doctor"));
    }

    #[test]
    fn test_fallback_report_empty_analysis() {
        let report = fallback_report(&UserProfile::default(), &empty_analysis());
        assert!(report.contains("No symptoms were detected."));
        assert!(report.contains("No likely conditions were identified."));
        assert!(report.contains("Known conditions: none"));
    }
}
