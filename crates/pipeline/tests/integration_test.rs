//! Integration tests for the pipeline.
//!
//! These tests build a small catalog and its similarity index, then run
//! whole queries through the resolver.

use data_loader::{Catalog, LoadOptions, RawRecord};
use pipeline::{ContentTypeFilter, GenreFilter, QueryResolver, RecommendQuery, Recommendation};
use similarity::{SimilarityIndex, SimilarityKind};

fn record(title: &str, genres: &str, director: &str, kind: &str, year: Option<&str>) -> RawRecord {
    RawRecord {
        title: Some(title.to_string()),
        genres: Some(genres.to_string()),
        director: Some(director.to_string()),
        country: None,
        kind: Some(kind.to_string()),
        poster_url: None,
        release_year: year.map(str::to_string),
    }
}

/// A, B share genre and director; C shares neither
fn create_abc_setup() -> (Catalog, SimilarityIndex) {
    let catalog = Catalog::from_records(
        vec![
            record("A", "Action", "X", "Movie", Some("2020")),
            record("B", "Action", "X", "Movie", Some("2010")),
            record("C", "Drama", "Y", "Movie", Some("2022")),
        ],
        &LoadOptions::default(),
    )
    .unwrap();
    let index = SimilarityIndex::build(&catalog);
    (catalog, index)
}

fn create_larger_setup() -> (Catalog, SimilarityIndex) {
    let catalog = Catalog::from_records(
        vec![
            record("Mindhunter", "Crime TV Shows, TV Thrillers", "David Fincher", "TV Show", Some("2019")),
            record("Zodiac", "Thrillers, Dramas", "David Fincher", "Movie", Some("2007")),
            record("Se7en", "Thrillers", "David Fincher", "Movie", Some("1995")),
            record("Gone Girl", "Thrillers, Dramas", "David Fincher", "Movie", None),
            record("Mank", "Dramas", "David Fincher", "Movie", Some("2020")),
            record("Okja", "Action & Adventure, Dramas", "Bong Joon Ho", "Movie", Some("2017")),
            record("Big Mouth", "TV Comedies", "Nick Kroll", "TV Show", Some("2017")),
            record("Bojack Horseman", "TV Comedies, TV Dramas", "Raphael Bob-Waksberg", "TV Show", Some("2014")),
            record("The Irishman", "Dramas", "Martin Scorsese", "Movie", Some("2019")),
            record("Roma", "Dramas, International Movies", "Alfonso Cuaron", "Movie", Some("2018")),
        ],
        &LoadOptions::default(),
    )
    .unwrap();
    let index = SimilarityIndex::build(&catalog);
    (catalog, index)
}

fn titles(recs: &[Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.item.title.as_str()).collect()
}

fn assert_recent_first(recs: &[Recommendation]) {
    for pair in recs.windows(2) {
        match (pair[0].item.release_year, pair[1].item.release_year) {
            (Some(a), Some(b)) => assert!(a >= b, "{a} before {b}"),
            (None, Some(_)) => panic!("unknown year sorted before a known year"),
            _ => {}
        }
    }
}

#[test]
fn test_title_match_scenario() {
    let (catalog, index) = create_abc_setup();
    let query = RecommendQuery::parse("A", "All", "Movie", 10).unwrap();

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();

    // Anchor excluded, display order by year
    assert_eq!(titles(&recs), vec!["C", "B"]);
    let score = |title: &str| recs.iter().find(|r| r.item.title == title).unwrap().score;
    assert!(score("B") > score("C"));
    assert!(recs.iter().all(|r| r.strategy == "title_match"));
}

#[test]
fn test_title_match_ranks_before_truncation() {
    let (catalog, index) = create_abc_setup();
    let query = RecommendQuery::parse("a", "All", "Both", 1).unwrap();

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    // B is the most similar even though C is more recent
    assert_eq!(titles(&recs), vec!["B"]);
}

#[test]
fn test_genre_fallback_scenario() {
    let (catalog, index) = create_abc_setup();
    let query = RecommendQuery::parse("", "Action", "Both", 10).unwrap();

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();

    assert_eq!(titles(&recs), vec!["A", "B"]);
    assert!(recs.iter().all(|r| r.strategy == "genre_fallback"));
}

#[test]
fn test_unknown_title_without_genre_is_empty() {
    let (catalog, index) = create_abc_setup();
    let query = RecommendQuery::parse("nonexistent", "All", "Both", 10).unwrap();

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_empty_filtered_set_is_empty() {
    let (catalog, index) = create_abc_setup();
    let query = RecommendQuery::parse("", "Action", "TV Show", 10).unwrap();

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_result_length_is_bounded_by_pool() {
    let (catalog, index) = create_larger_setup();
    let resolver = QueryResolver::default();

    let query = RecommendQuery::new("Zodiac").with_top_n(3);
    assert_eq!(resolver.resolve(&catalog, &index, &query).unwrap().len(), 3);

    // Nine other titles in the pool
    let query = RecommendQuery::new("Zodiac").with_top_n(50);
    assert_eq!(resolver.resolve(&catalog, &index, &query).unwrap().len(), 9);

    // Three TV shows, one of them the anchor
    let query = RecommendQuery::new("Big Mouth")
        .with_content_type(ContentTypeFilter::TvShow)
        .with_top_n(50);
    assert_eq!(resolver.resolve(&catalog, &index, &query).unwrap().len(), 2);
}

#[test]
fn test_anchor_never_returned() {
    let (catalog, index) = create_larger_setup();
    let resolver = QueryResolver::default();

    for item in catalog.items() {
        let query = RecommendQuery::new(item.title.to_uppercase()).with_top_n(50);
        let recs = resolver.resolve(&catalog, &index, &query).unwrap();
        assert!(recs.iter().all(|r| r.item.id != item.id));
    }
}

#[test]
fn test_results_sorted_by_year_unknown_last() {
    let (catalog, index) = create_larger_setup();
    let query = RecommendQuery::new("Se7en").with_top_n(50);

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    assert_recent_first(&recs);
    assert_eq!(recs.last().unwrap().item.title, "Gone Girl");
}

#[test]
fn test_same_director_ranks_high() {
    let (catalog, index) = create_larger_setup();
    let query = RecommendQuery::new("Zodiac").with_top_n(3);

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    assert!(recs.iter().all(|r| r.item.director == "David Fincher"));
}

#[test]
fn test_genre_filter_limits_title_match_pool() {
    let (catalog, index) = create_larger_setup();
    let query = RecommendQuery::new("Mank")
        .with_genre(GenreFilter::Genre("dramas".to_string()))
        .with_top_n(50);

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    assert!(!recs.is_empty());
    assert!(recs.iter().all(|r| r.item.genre_features.contains("dramas")));
    assert!(recs.iter().all(|r| r.strategy == "title_match"));
}

#[test]
fn test_genre_fallback_scores_follow_genre_matrix() {
    let (catalog, index) = create_larger_setup();
    let query = RecommendQuery::new("")
        .with_genre(GenreFilter::Genre("TV Comedies".to_string()));

    let recs = QueryResolver::default().resolve(&catalog, &index, &query).unwrap();
    // Big Mouth (id 6) is the first filtered title and so the anchor
    for rec in &recs {
        let expected = index.score(SimilarityKind::Genre, 6, rec.item.id).unwrap();
        assert_eq!(rec.score, expected);
    }
    assert_eq!(titles(&recs), vec!["Big Mouth", "Bojack Horseman"]);
}

#[test]
fn test_idempotent() {
    let (catalog, index) = create_larger_setup();
    let resolver = QueryResolver::default();
    let query = RecommendQuery::parse("okja", "Dramas", "Both", 10).unwrap();

    let first = resolver.resolve(&catalog, &index, &query).unwrap();
    let second = resolver.resolve(&catalog, &index, &query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_similarity_matrix_properties() {
    let (catalog, index) = create_larger_setup();
    for kind in [SimilarityKind::Content, SimilarityKind::Genre] {
        let matrix = index.matrix(kind);
        for i in 0..catalog.len() {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..catalog.len() {
                let s = matrix.get(i, j).unwrap();
                assert_eq!(s, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }
}
