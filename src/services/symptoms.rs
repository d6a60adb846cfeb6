//! Symptom to disease matching.
//!
//! Matching is plain substring containment on the lower-cased report: a disease is
//! reported when any one of its keywords occurs anywhere in the text.

/// Known diseases and their symptom keywords, in reporting order.
pub const DISEASE_SYMPTOMS: &[(&str, &[&str])] = &[
    ("Flu", &["fever", "cough", "sore throat", "runny nose", "muscle aches"]),
    ("Cold", &["cough", "sore throat", "runny nose", "sneezing"]),
    (
        "Diabetes",
        &["increased thirst", "frequent urination", "extreme fatigue", "blurry vision"],
    ),
    (
        "Hypertension",
        &["headache", "shortness of breath", "nosebleeds", "dizziness"],
    ),
    (
        "Dengue",
        &["high fever", "severe headache", "joint pain", "skin rash", "fatigue"],
    ),
    (
        "Asthma",
        &["wheezing", "shortness of breath", "chest tightness", "coughing"],
    ),
    (
        "Food Poisoning",
        &["vomiting", "diarrhea", "stomach cramps", "nausea"],
    ),
    ("Chickenpox", &["itchy rash", "red spots", "fever", "tiredness"]),
    ("Anemia", &["fatigue", "weakness", "pale skin", "shortness of breath"]),
    (
        "Migraine",
        &["severe headache", "nausea", "sensitivity to light", "blurred vision"],
    ),
];

/// Diseases with at least one keyword found in `report`, in table order.
///
/// An empty result means no disease could be identified.
pub fn identify_diseases(report: &str) -> Vec<&'static str> {
    let report = report.to_lowercase();
    DISEASE_SYMPTOMS
        .iter()
        .filter(|(_, symptoms)| symptoms.iter().any(|symptom| report.contains(symptom)))
        .map(|(disease, _)| *disease)
        .collect()
}
