//! System prompts and prompt builders for the assistant.

use crate::analysis::ConversationAnalysis;
use crate::assistant::UserProfile;
use chrono::Utc;

/// Persona for regular consultation replies.
pub const ASSISTANT_SYSTEM_PROMPT: &str = "\
You are an AI medical assistant specializing in health consultations.
Provide friendly, helpful information in response to the user's health questions.
Whenever you give medical advice, recommend consulting a medical professional.
Take care not to present an actual diagnosis or treatment.";

/// Persona for the opening message of a new conversation.
pub const GREETING_SYSTEM_PROMPT: &str = "\
You are a friendly AI medical assistant specializing in health consultations.
You are opening the conversation; use the user's profile to make the greeting personal.
Always start with empathy and respect, and let the user know they are welcome to ask medical questions.";

/// Persona and output contract for report generation. The severity trailer
/// is parsed back out by `report::extract_severity`.
pub const REPORT_SYSTEM_PROMPT: &str = "\
You are a medical report writer. Using the conversation analysis results, write a
health analysis report for the patient. The report must be professional yet easy
to understand, and include the following sections:

1. User information
2. Introduction to the conversation analysis
3. Summary of detected symptoms
4. Possible conditions and probability analysis
5. Health advice
6. Disclaimer

Additionally, judge the urgency as one of the following three levels:
- red: severe pain or a critical situation needing immediate medical attention
- orange: moderate pain or discomfort needing medical attention soon
- green: no pain or a good state, needing only routine care

Mark the urgency at the end of the report in exactly this format:
\"SEVERITY_LEVEL: [red/orange/green]\"

Caution: do not give a final diagnosis, and always recommend consulting a specialist.
Write the report in markdown.";

fn profile_summary(profile: &UserProfile) -> String {
    let mut summary = format!(
        "User profile: nickname={}, gender={}, age range={}",
        profile.nickname.as_deref().unwrap_or("not provided"),
        profile.gender.as_deref().unwrap_or("not provided"),
        profile.age_range.as_deref().unwrap_or("not provided"),
    );
    if !profile.usual_illness.is_empty() {
        summary.push_str(&format!(
            ", known health issues: {}",
            profile.usual_illness.join(", ")
        ));
    }
    summary
}

/// User-side prompt for the personalized greeting.
pub fn greeting_prompt(profile: &UserProfile) -> String {
    format!(
        "{}\n\n\
         Based on the profile above, write a friendly, personalized opening greeting.\n\
         Show empathy for the user's health situation and explain how you can help.",
        profile_summary(profile)
    )
}

/// User-side prompt for report generation. The transcript is truncated so a
/// long conversation cannot blow the token budget.
pub fn report_prompt(
    profile: &UserProfile,
    transcript: &str,
    analysis: &ConversationAnalysis,
) -> String {
    let symptoms_text = if analysis.symptoms.is_empty() {
        "No symptoms were detected.".to_string()
    } else {
        analysis.symptoms.join(", ")
    };

    let diseases_text = if analysis.diseases.is_empty() {
        "No likely conditions were identified.".to_string()
    } else {
        analysis
            .diseases
            .iter()
            .map(|d| format!("- {} ({}%)", d.name, d.probability))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let suggestions_text = analysis
        .suggestions
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Write a health analysis report based on the following information:\n\n\
         {}\n\n\
         ### Conversation excerpt:\n{}\n\n\
         ### Analysis results:\n\n\
         Detected symptoms:\n{symptoms_text}\n\n\
         Possible conditions:\n{diseases_text}\n\n\
         Health advice:\n{suggestions_text}\n\n\
         Current time: {}",
        profile_summary(profile),
        truncate_transcript(transcript, 1000),
        Utc::now().format("%Y-%m-%d %H:%M"),
    )
}

fn truncate_transcript(transcript: &str, max_chars: usize) -> String {
    if transcript.chars().count() <= max_chars {
        transcript.to_string()
    } else {
        let prefix: String = transcript.chars().take(max_chars).collect();
        format!("{prefix}... (conversation truncated)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::empty_analysis;

    #[test]
    fn test_greeting_prompt_includes_profile() {
        let profile = UserProfile {
            nickname: Some("Kim".to_string()),
            gender: Some("male".to_string()),
            age_range: Some("38".to_string()),
            usual_illness: vec!["hypertension".to_string(), "diabetes".to_string()],
        };
        let prompt = greeting_prompt(&profile);
        assert!(prompt.contains("nickname=Kim"));
        assert!(prompt.contains("hypertension, diabetes"));
    }

    #[test]
    fn test_greeting_prompt_omits_empty_illness() {
        let prompt = greeting_prompt(&UserProfile::default());
        assert!(!prompt.contains("known health issues"));
        assert!(prompt.contains("nickname=not provided"));
    }

    #[test]
    fn test_report_prompt_mentions_analysis() {
        let mut analysis = empty_analysis();
        analysis.symptoms = vec!["cough".to_string()];
        let prompt = report_prompt(&UserProfile::default(), "User: I keep coughing.", &analysis);
        assert!(prompt.contains("cough"));
        assert!(prompt.contains("I keep coughing."));
        assert!(prompt.contains("No likely conditions were identified."));
    }

    #[test]
    fn test_report_prompt_truncates_transcript() {
        let transcript = "x".repeat(5000);
        let prompt = report_prompt(&UserProfile::default(), &transcript, &empty_analysis());
        assert!(prompt.contains("(conversation truncated)"));
        assert!(!prompt.contains(&"x".repeat(1500)));
    }
}
