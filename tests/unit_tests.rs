// Unit tests for gigmatch

use gigmatch::core::fields::{parse_client_rating, parse_client_spent, parse_string_list};
use gigmatch::core::{classify_job, score_job, Category};
use gigmatch::models::preferences::{BudgetPrefs, ClientCriteria, CriterionWeights};
use gigmatch::models::{JobRecord, PreferenceProfile};

fn skills(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_job() -> JobRecord {
    JobRecord {
        uid: "~unit".to_string(),
        title: "Build RAG Chatbot with LangChain".to_string(),
        description: "Retrieval augmented generation over internal documents.".to_string(),
        url: None,
        job_type: Some("Fixed".to_string()),
        fixed_price: Some(2500.0),
        hourly_rate_min: None,
        hourly_rate_max: None,
        experience_level: None,
        skills: Some(r#"["Python", "LangChain", "Pinecone"]"#.to_string()),
        key_tools: None,
        client_country: None,
        client_total_spent: None,
        client_rating: None,
        client_info_raw: None,
        category: None,
        categories: Some(r#"["RAG / Document AI"]"#.to_string()),
        category_confidence: None,
        match_score: None,
        match_reasons: None,
    }
}

fn base_preferences() -> PreferenceProfile {
    PreferenceProfile {
        categories: vec!["RAG / Document AI".to_string()],
        required_skills: vec!["Python".to_string(), "LangChain".to_string()],
        nice_to_have_skills: vec!["Pinecone".to_string()],
        budget: BudgetPrefs {
            fixed_min: 1000.0,
            fixed_max: 10000.0,
            hourly_min: 40.0,
            flexibility_low: 0.8,
            flexibility_high: 1.5,
        },
        client_criteria: ClientCriteria {
            payment_verified: true,
            min_total_spent: 1000.0,
            min_rating: 4.5,
        },
        exclusion_keywords: vec!["data entry".to_string()],
        exclusions: None,
        weights: CriterionWeights::default(),
        threshold: None,
        match_threshold: Some(70.0),
        auto_relax_thresholds: vec![50.0, 30.0],
    }
}

#[test]
fn test_score_always_in_range() {
    let preferences = base_preferences();
    let mut jobs = vec![base_job()];

    let mut empty = base_job();
    empty.title = "x".to_string();
    empty.description = String::new();
    empty.skills = None;
    empty.categories = None;
    empty.job_type = None;
    empty.fixed_price = None;
    jobs.push(empty);

    for job in &jobs {
        let (score, reasons) = score_job(job, &preferences);
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(reasons.len(), 5);
    }
}

#[test]
fn test_exclusion_yields_single_reason() {
    let mut job = base_job();
    job.description = "Mostly data entry tasks.".to_string();
    let (score, reasons) = score_job(&job, &base_preferences());
    assert_eq!(score, 0.0);
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0].criterion, "exclusion");
}

#[test]
fn test_custom_weights_equal_after_normalization() {
    let job = base_job();
    let default_prefs = base_preferences();

    let mut doubled = base_preferences();
    doubled.weights = CriterionWeights {
        category: 60.0,
        required_skills: 50.0,
        nice_to_have_skills: 20.0,
        budget_fit: 40.0,
        client_quality: 30.0,
    };

    let (a, _) = score_job(&job, &default_prefs);
    let (b, _) = score_job(&job, &doubled);
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_client_neutrality_without_data() {
    // No client fields at all: the client_quality criterion sits at 0.5.
    let (_, reasons) = score_job(&base_job(), &base_preferences());
    let client = reasons
        .iter()
        .find(|r| r.criterion == "client_quality")
        .unwrap();
    assert_eq!(client.score, 0.5);
}

#[test]
fn test_classifier_category_labels_roundtrip() {
    for category in Category::ALL {
        assert!(!category.label().is_empty());
        assert!(!category.key().is_empty());
    }
}

#[test]
fn test_classifier_empty_input() {
    let (category, confidence) = classify_job("", "", &[]);
    assert_eq!(category, Category::Other);
    assert_eq!(confidence, 0.3);
}

#[test]
fn test_classifier_confidence_in_bounds() {
    let samples = [
        ("Build RAG Chatbot", "vector database pinecone embedding"),
        ("Automate invoicing", "zapier make.com workflow automation"),
        ("Fix my website", "wordpress php landing page"),
        ("Voice agent", "elevenlabs speech to text"),
        ("Untitled", "no keywords here"),
    ];
    for (title, desc) in samples {
        let (_, confidence) = classify_job(title, desc, &[]);
        assert!(
            (0.3..=1.0).contains(&confidence),
            "{title}: confidence {confidence} out of range"
        );
    }
}

#[test]
fn test_classifier_uses_skills() {
    // Skills alone can decide the category when title/description are vague.
    let (category, _) = classify_job(
        "Need an expert",
        "Long-term engagement.",
        &skills(&["OpenCV", "YOLO", "Image Segmentation"]),
    );
    assert_eq!(category, Category::ComputerVision);
}

#[test]
fn test_parse_spent_forms() {
    assert_eq!(parse_client_spent("$1M+"), Some(1_000_000.0));
    assert_eq!(parse_client_spent("$20K+ spent"), Some(20_000.0));
    assert_eq!(parse_client_spent("Less than $10K"), Some(10_000.0));
    assert_eq!(parse_client_spent("$750+"), Some(750.0));
    assert_eq!(parse_client_spent("No spending history"), None);
}

#[test]
fn test_parse_rating_forms() {
    assert_eq!(parse_client_rating("4.85 of 5"), Some(4.85));
    assert_eq!(parse_client_rating("No ratings yet"), None);
}

#[test]
fn test_parse_string_list_defensive() {
    assert_eq!(parse_string_list(Some(r#"["a","b"]"#)), skills(&["a", "b"]));
    assert!(parse_string_list(Some("[1, 2]")).is_empty());
    assert!(parse_string_list(None).is_empty());
}
