//! Relevance scoring contract tests

use wikisage::models::{Page, WeightedKeyword};
use wikisage::query::RelevanceScorer;

fn page(title: &str, content: &str, categories: &[&str]) -> Page {
    Page::new(
        None,
        title.to_string(),
        format!("https://wiki.example.org/{}", title.replace(' ', "_")),
        content.to_string(),
        categories.iter().map(|c| c.to_string()).collect(),
    )
}

#[test]
fn end_to_end_docker_scenario() {
    let corpus = vec![
        page(
            "Docker Setup",
            "docker container deployment guide",
            &["DevOps"],
        ),
        page("Random Topic", "unrelated text docker mentioned once", &[]),
    ];
    let keywords = vec![WeightedKeyword::new("docker", 10.0)];
    let scorer = RelevanceScorer::new(&keywords);

    let s1 = scorer.score(&corpus[0]);
    let s2 = scorer.score(&corpus[1]);
    assert!(s1 > 0.0);
    assert!(s2 > 0.0);
    assert!(s1 > s2);

    let ranked = scorer.rank(&corpus, 10);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].page.title, "Docker Setup");
    assert_eq!(ranked[1].page.title, "Random Topic");
}

#[test]
fn increasing_weight_never_decreases_score() {
    let pages = vec![
        page("Docker Setup", "docker everywhere docker", &["DevOps"]),
        page("No Match At All", "nothing relevant", &[]),
    ];

    for p in &pages {
        let low = RelevanceScorer::new(&[WeightedKeyword::new("docker", 2.0)]).score(p);
        let high = RelevanceScorer::new(&[WeightedKeyword::new("docker", 9.0)]).score(p);
        if low > 0.0 {
            assert!(high > low, "matching page must score strictly higher");
        } else {
            assert_eq!(high, 0.0, "non-matching page stays at zero");
        }
    }
}

#[test]
fn exact_title_match_dominates_content_mentions() {
    let weight = 4.0;
    let keywords = vec![WeightedKeyword::new("kubernetes", weight)];
    let scorer = RelevanceScorer::new(&keywords);

    let titled = page("kubernetes", "", &[]);
    let mentioned = page("Some Guide", "we discuss kubernetes briefly", &[]);

    // The title terms alone (exact 50 + whole word 25, per weight) must
    // outscore a page where the keyword only appears in content.
    assert!(scorer.score(&titled) >= (50.0 + 25.0) * weight);
    assert!(scorer.score(&titled) > scorer.score(&mentioned));
}

#[test]
fn rank_returns_min_of_top_n_and_positive_count() {
    let corpus: Vec<Page> = (0..6)
        .map(|i| {
            if i < 4 {
                page(&format!("match {i}"), "shared term", &[])
            } else {
                page(&format!("other {i}"), "irrelevant", &[])
            }
        })
        .collect();
    let scorer = RelevanceScorer::new(&[WeightedKeyword::new("shared", 5.0)]);

    assert_eq!(scorer.rank(&corpus, 10).len(), 4);
    assert_eq!(scorer.rank(&corpus, 2).len(), 2);

    let ranked = scorer.rank(&corpus, 10);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score, "descending order");
    }
}

#[test]
fn ties_preserve_corpus_order() {
    let corpus = vec![
        page("twin one", "identical body", &[]),
        page("twin two", "identical body", &[]),
        page("twin three", "identical body", &[]),
    ];
    let scorer = RelevanceScorer::new(&[WeightedKeyword::new("identical", 3.0)]);

    let ranked = scorer.rank(&corpus, 10);
    let titles: Vec<&str> = ranked.iter().map(|r| r.page.title.as_str()).collect();
    assert_eq!(titles, vec!["twin one", "twin two", "twin three"]);
}

#[test]
fn multiple_keywords_accumulate() {
    let p = page("Docker Setup", "docker container deployment", &["DevOps"]);

    let single = RelevanceScorer::new(&[WeightedKeyword::new("docker", 5.0)]).score(&p);
    let both = RelevanceScorer::new(&[
        WeightedKeyword::new("docker", 5.0),
        WeightedKeyword::new("container", 3.0),
    ])
    .score(&p);

    assert!(both > single);
}
