//! Demo dataset: one primary user with family, contacts, conversations and
//! stored reports, plus a few secondary users.

use anyhow::Result;
use medit_api::database::Database;
use medit_api::models::conversation::MessageSender;
use medit_api::models::family::CreateFamilyMemberRequest;
use medit_api::models::user::CreateUserRequest;
use medit_api::repositories::report::NewReport;
use medit_api::repositories::{
    ContactRepository, ConversationRepository, DiseaseRepository, FamilyRepository,
    ReportRepository, UserRepository,
};
use serde_json::json;

struct DemoReport {
    title: &'static str,
    summary: &'static str,
    content: &'static str,
    symptoms: &'static [&'static str],
    diseases: &'static [(&'static str, f64)],
    suggestions: &'static [&'static str],
    severity: &'static str,
}

struct DemoConversation {
    title: &'static str,
    messages: &'static [(MessageSender, &'static str)],
    report: DemoReport,
}

pub async fn seed_demo(db: &Database) -> Result<()> {
    let users = UserRepository::new(db.clone());
    let families = FamilyRepository::new(db.clone());
    let contacts = ContactRepository::new(db.clone());
    let conversations = ConversationRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let diseases = DiseaseRepository::new(db.clone());

    // Primary demo user
    let kim = users
        .create(&CreateUserRequest {
            login_id: "kim123".to_string(),
            nickname: "Kim".to_string(),
            password: "password123".to_string(),
            gender: Some("male".to_string()),
            age_range: Some("38".to_string()),
            usual_illness: vec![
                "hypertension".to_string(),
                "diabetes".to_string(),
                "arrhythmia".to_string(),
            ],
        })
        .await?;
    println!("  created user {}", kim.login_id);

    for (nickname, relation, age, illness) in [
        ("Father Kim", "father", 65, vec!["hypertension", "arthritis", "diabetes"]),
        ("Mother Kim", "mother", 62, vec!["hypothyroidism", "osteoporosis"]),
        ("Spouse Kim", "spouse", 35, vec!["migraine", "allergic rhinitis"]),
        ("Daughter Kim", "daughter", 10, vec!["atopic dermatitis"]),
        ("Son Kim", "son", 7, vec!["asthma", "allergy"]),
    ] {
        families
            .create(
                kim.id,
                &CreateFamilyMemberRequest {
                    nickname: nickname.to_string(),
                    relation: relation.to_string(),
                    age: Some(age),
                    usual_illness: illness.into_iter().map(String::from).collect(),
                },
            )
            .await?;
    }
    println!("  created 5 family members");

    // Secondary users double as contacts
    for (login_id, nickname, age_range, gender, password, illness) in [
        ("park456", "Dr. Park", "45", "female", "password456", vec![]),
        ("lee789", "Lee", "40", "male", "password789", vec!["hyperlipidemia"]),
        ("choi101", "Choi", "32", "female", "password101", vec![]),
    ] {
        users
            .create(&CreateUserRequest {
                login_id: login_id.to_string(),
                nickname: nickname.to_string(),
                password: password.to_string(),
                gender: Some(gender.to_string()),
                age_range: Some(age_range.to_string()),
                usual_illness: illness.into_iter().map(String::from).collect(),
            })
            .await?;
    }
    println!("  created 3 secondary users");

    for (contact_login, alias, relation) in [
        ("park456", "Dr. Park", "primary physician"),
        ("lee789", "Cousin Lee", "relative"),
        ("choi101", "Coach Choi", "personal trainer"),
    ] {
        if let Some(contact_user) = users.find_by_login_id(contact_login).await? {
            contacts
                .create(kim.id, contact_user.id, Some(alias), Some(relation))
                .await?;
        }
    }
    println!("  created 3 contacts");

    for demo in demo_conversations() {
        let conversation = conversations.create(kim.id, Some(demo.title)).await?;
        for (sender, content) in demo.messages {
            conversations
                .add_message(conversation.id, *sender, content)
                .await?;
        }

        let mut diseases_with_ids = Vec::new();
        for (name, probability) in demo.report.diseases {
            let stored = diseases
                .find_or_create(name, &format!("{name} (registered from demo data)"))
                .await?;
            diseases_with_ids.push(json!({
                "id": stored.id,
                "name": name,
                "probability": probability
            }));
        }

        let symptoms: Vec<String> = demo.report.symptoms.iter().map(|s| s.to_string()).collect();
        let suggestions: Vec<String> = demo
            .report
            .suggestions
            .iter()
            .map(|s| s.to_string())
            .collect();

        reports
            .create(NewReport {
                conversation_id: conversation.id,
                title: demo.report.title,
                summary: Some(demo.report.summary),
                content: demo.report.content,
                detected_symptoms: &symptoms,
                diseases_with_probabilities: serde_json::Value::Array(diseases_with_ids),
                health_suggestions: &suggestions,
                severity_level: demo.report.severity,
            })
            .await?;
    }
    println!("  created 3 conversations with reports");

    Ok(())
}

fn demo_conversations() -> Vec<DemoConversation> {
    vec![
        DemoConversation {
            title: "Blood pressure check-in",
            messages: &[
                (MessageSender::User, "My blood pressure seems well controlled lately. I think the lifestyle changes are paying off."),
                (MessageSender::Assistant, "That's good to hear. What readings are you seeing?"),
                (MessageSender::User, "Around 130/85 in the morning, quite stable."),
                (MessageSender::Assistant, "The lifestyle changes are clearly working. Keep up the regular exercise and the low-salt diet."),
            ],
            report: DemoReport {
                title: "Blood pressure stabilization",
                summary: "Blood pressure stable thanks to lifestyle changes",
                content: "Lifestyle improvements have stabilized blood pressure around 130/85. Continued management is needed; the current state is good.",
                symptoms: &["stable blood pressure"],
                diseases: &[("hypertension", 70.0)],
                suggestions: &[
                    "Keep measuring blood pressure regularly",
                    "Maintain a low-salt diet",
                    "Keep up regular aerobic exercise",
                    "Manage stress",
                ],
                severity: "green",
            },
        },
        DemoConversation {
            title: "Sudden chest pain",
            messages: &[
                (MessageSender::User, "My chest suddenly hurts badly and it's hard to breathe. I'm in a cold sweat and my left arm is tingling."),
                (MessageSender::Assistant, "When did the symptoms start? How strong is the pain?"),
                (MessageSender::User, "It started 30 minutes ago, the pain is about 8 out of 10."),
                (MessageSender::Assistant, "These look like serious symptoms. Please go to an emergency room immediately; this could be a cardiac emergency."),
            ],
            report: DemoReport {
                title: "Acute chest pain - emergency",
                summary: "Acute chest pain, breathing difficulty, radiating pain - suspected cardiac emergency",
                content: "Sudden severe chest pain (8/10), breathing difficulty, cold sweat and tingling in the left arm. Suspected cardiac emergency such as myocardial infarction. Immediate emergency care required.",
                symptoms: &["severe chest pain", "breathing difficulty", "left arm radiating pain", "cold sweat"],
                diseases: &[
                    ("acute myocardial infarction", 80.0),
                    ("unstable angina", 75.0),
                    ("aortic dissection", 40.0),
                ],
                suggestions: &[
                    "Go to the emergency room immediately",
                    "Consider calling an ambulance",
                    "Consider taking aspirin (on medical advice)",
                    "Stay at rest",
                ],
                severity: "red",
            },
        },
        DemoConversation {
            title: "Persistent headache",
            messages: &[
                (MessageSender::User, "I've had a headache for three days now. Painkillers barely help."),
                (MessageSender::Assistant, "Where is the headache located, and what kind of pain is it?"),
                (MessageSender::User, "My whole head throbs, about 6 out of 10. It gets in the way of daily life."),
                (MessageSender::Assistant, "A persistent headache like this deserves attention. Please rest and consider visiting a doctor; it may be related to your blood pressure."),
            ],
            report: DemoReport {
                title: "Persistent headache analysis",
                summary: "Moderate headache lasting over three days, affecting daily life",
                content: "Headache persisting for more than three days with intensity 6/10 and little response to painkillers. Continuous pressing/throbbing pain across the forehead. Possibly related to hypertension.",
                symptoms: &["persistent headache", "painkiller resistance", "pain intensity 6/10"],
                diseases: &[
                    ("tension headache", 65.0),
                    ("hypertensive headache", 55.0),
                    ("migraine", 40.0),
                ],
                suggestions: &[
                    "Consult a neurologist",
                    "Measure your blood pressure",
                    "Get enough rest",
                    "Increase fluid intake",
                    "Manage stress",
                ],
                severity: "orange",
            },
        },
    ]
}
