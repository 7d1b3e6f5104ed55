//! Relevance scoring through the public API.

use pdfscope::analysis::{extract_keywords, is_summary_request, score_relevance};
use pdfscope::{DocumentOutline, HeadingLevel, OutlineEntry, RelevanceConfig, RelevanceScorer};

fn travel_outline() -> DocumentOutline {
    DocumentOutline::new(
        "South of France",
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Cities", 1),
            OutlineEntry::new(HeadingLevel::H2, "Nightlife and Bars", 2),
            OutlineEntry::new(HeadingLevel::H2, "Coastal Adventures", 3),
            OutlineEntry::new(HeadingLevel::H3, "Budget Hotels", 4),
            OutlineEntry::new(HeadingLevel::H2, "Group Travel on a Budget", 5),
            OutlineEntry::new(HeadingLevel::H3, "Packing Tips", 6),
        ],
    )
}

#[test]
fn test_travel_planner_ranking() {
    let ranked = score_relevance(
        &travel_outline(),
        "Travel Planner",
        "Plan a budget trip for a group of college friends",
    );
    let got: Vec<(&str, u32)> = ranked.iter().map(|s| (s.text(), s.score)).collect();

    // travel, plan, budget, group
    assert_eq!(
        got,
        vec![("Group Travel on a Budget", 3), ("Budget Hotels", 1)]
    );
}

#[test]
fn test_ties_keep_document_order() {
    let ranked = score_relevance(&travel_outline(), "guide", "bars hotels adventures");
    let texts: Vec<&str> = ranked.iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["Nightlife and Bars", "Coastal Adventures", "Budget Hotels"]);
}

#[test]
fn test_short_tokens_are_not_keywords() {
    assert_eq!(extract_keywords("an HR VP", "go to it"), Vec::<String>::new());
    assert!(score_relevance(&travel_outline(), "an HR VP", "go to it").is_empty());
}

#[test]
fn test_keyword_limit() {
    let persona = "one two three four five six seven eight nine ten eleven";
    let keywords = extract_keywords(persona, "twelve");
    assert_eq!(keywords.len(), 10);
    assert_eq!(keywords.last().map(String::as_str), Some("ten"));

    let scorer = RelevanceScorer::with_config(RelevanceConfig {
        max_keywords: 20,
        min_keyword_len: 5,
    });
    assert_eq!(
        scorer.keywords(persona, "twelve"),
        vec!["three", "seven", "eight", "eleven", "twelve"]
    );
}

#[test]
fn test_empty_outline_scores_nothing() {
    assert!(score_relevance(&DocumentOutline::default(), "analyst", "budget").is_empty());
}

#[test]
fn test_summary_trigger() {
    assert!(is_summary_request("Summarize the key findings"));
    assert!(is_summary_request("need an executive summary"));
    assert!(!is_summary_request("summit schedule"));
}

#[test]
fn test_repeated_query_word_scores_once() {
    let outline = DocumentOutline::new(
        "Finance",
        vec![
            OutlineEntry::new(HeadingLevel::H2, "Budget Overview", 1),
            OutlineEntry::new(HeadingLevel::H2, "Analyst Review", 2),
        ],
    );
    let ranked = score_relevance(&outline, "budget analyst", "budget review");
    let got: Vec<(&str, u32)> = ranked.iter().map(|s| (s.text(), s.score)).collect();

    assert_eq!(got, vec![("Analyst Review", 2), ("Budget Overview", 1)]);
}
