mod common;

use common::{make_video, setup};
use videofeatures::domain::entities::video_features::VideoFeatures;
use videofeatures::domain::entities::video_summary::VideoSummary;
use videofeatures::domain::error::DomainError;
use videofeatures::domain::values::feature_array::{FeatureArray, FeatureData};
use videofeatures::domain::values::feature_vectors::FeatureVectors;

#[test]
fn test_insert_then_find_by_name() {
    let store = setup();
    let video = make_video("clip1", vec![vec![0.1, 0.2, 0.3], vec![-1.5, 2.0, 1e-300]], 95);
    store.insert(&video).unwrap();

    let found = store.find_by_name("clip1").unwrap();
    assert!(found.id.is_some());
    assert_eq!(found.original_video_url, "http://x/clip1.mp4");
    assert_eq!(found.duration, 95);
    assert_eq!(found.feature_vectors, video.feature_vectors);
}

#[test]
fn test_insert_returns_identity_and_leaves_caller_record_alone() {
    let store = setup();
    let video = make_video("clip1", vec![vec![1.0]], 10);
    let saved = store.insert(&video).unwrap();

    assert!(video.id.is_none());
    assert!(saved.id.is_some());
    assert_eq!(store.find_by_name("clip1").unwrap().id, saved.id);
}

#[test]
fn test_insert_rejects_persisted_record() {
    let store = setup();
    let saved = store.insert(&make_video("clip1", vec![vec![1.0]], 10)).unwrap();
    let err = store.insert(&saved).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn test_summaries_count_vectors_without_payload() {
    let store = setup();
    let vectors = (0..5).map(|i| vec![i as f64; 8]).collect();
    store.insert(&make_video("five", vectors, 300)).unwrap();

    let summaries = store.list_summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "five");
    assert_eq!(summaries[0].feature_vectors_count, 5);

    let json = serde_json::to_value(&summaries[0]).unwrap();
    assert!(json.get("feature_vectors").is_none());
    assert!(json.get("_id").is_none());
}

#[test]
fn test_summary_example_record() {
    let store = setup();
    store
        .insert(&make_video("v1", vec![vec![0.1, 0.2], vec![0.3, 0.4]], 120))
        .unwrap();

    let summaries = store.list_summaries().unwrap();
    assert!(summaries.contains(&VideoSummary {
        name: "v1".into(),
        original_video_url: "http://x/v1.mp4".into(),
        duration: 120,
        feature_vectors_count: 2,
    }));
}

#[test]
fn test_single_array_shape_counts_rows() {
    let store = setup();
    let matrix = FeatureArray::new(vec![4, 3], FeatureData::F32(vec![0.5; 12])).unwrap();
    let video = VideoFeatures::new(
        "stacked".into(),
        FeatureVectors::Single(matrix),
        "http://x/stacked.mp4".into(),
        42,
    );
    store.insert(&video).unwrap();

    assert_eq!(store.list_summaries().unwrap()[0].feature_vectors_count, 4);
    let found = store.find_by_name("stacked").unwrap();
    assert_eq!(found.feature_vectors, video.feature_vectors);
}

#[test]
fn test_find_missing_is_not_found() {
    let store = setup();
    store.insert(&make_video("clip1", vec![vec![1.0]], 10)).unwrap();
    let err = store.find_by_name("nonexistent").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn test_duplicate_names_return_earliest() {
    let store = setup();
    let first = store.insert(&make_video("dup", vec![vec![1.0]], 1)).unwrap();
    store.insert(&make_video("dup", vec![vec![2.0]], 2)).unwrap();

    let found = store.find_by_name("dup").unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.duration, 1);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn test_list_all_decodes_in_insertion_order() {
    let store = setup();
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        store
            .insert(&make_video(name, vec![vec![i as f64, f64::NAN]], i as i64))
            .unwrap();
    }

    let videos = store.list_all().unwrap();
    let names: Vec<&str> = videos.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(videos.iter().all(|v| v.id.is_some()));
    assert_eq!(
        videos[1].feature_vectors,
        FeatureVectors::Sequence(vec![FeatureArray::from_f64(vec![1.0, f64::NAN])])
    );
}

#[test]
fn test_list_empty_collection() {
    let store = setup();
    assert!(store.list_all().unwrap().is_empty());
    assert!(store.list_summaries().unwrap().is_empty());
}

#[test]
fn test_update_requires_identity() {
    let store = setup();
    let err = store.update(&make_video("clip1", vec![vec![1.0]], 10)).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn test_update_overwrites_by_identity() {
    let store = setup();
    let mut saved = store.insert(&make_video("clip1", vec![vec![1.0, 2.0]], 10)).unwrap();

    saved.duration = 99;
    saved.feature_vectors =
        FeatureVectors::Sequence(vec![FeatureArray::from_f64(vec![3.0]); 3]);
    store.update(&saved).unwrap();

    let found = store.find_by_name("clip1").unwrap();
    assert_eq!(found.duration, 99);
    assert_eq!(found.id, saved.id);
    assert_eq!(found.feature_vectors, saved.feature_vectors);
    assert_eq!(store.list_summaries().unwrap()[0].feature_vectors_count, 3);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn test_update_can_rename() {
    let store = setup();
    let mut saved = store.insert(&make_video("old", vec![vec![1.0]], 10)).unwrap();
    saved.name = "new".into();
    store.update(&saved).unwrap();

    assert!(matches!(store.find_by_name("old"), Err(DomainError::NotFound(_))));
    assert_eq!(store.find_by_name("new").unwrap().id, saved.id);
}

#[test]
fn test_update_unknown_identity_is_not_found() {
    let store = setup();
    let mut video = make_video("ghost", vec![vec![1.0]], 10);
    video.id = Some("no-such-id".into());
    let err = store.update(&video).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn test_shown_json_with_non_finite_values_feeds_back_into_update() {
    let store = setup();
    let saved = store
        .insert(&make_video(
            "edgy",
            vec![vec![f64::NAN, f64::INFINITY], vec![f64::NEG_INFINITY, 1.25]],
            30,
        ))
        .unwrap();

    let shown = serde_json::to_string(&store.find_by_name("edgy").unwrap()).unwrap();
    assert!(!shown.contains("null"));

    let mut edited: VideoFeatures = serde_json::from_str(&shown).unwrap();
    assert_eq!(edited.id, saved.id);
    assert_eq!(edited.feature_vectors, saved.feature_vectors);

    edited.duration = 31;
    store.update(&edited).unwrap();
    let found = store.find_by_name("edgy").unwrap();
    assert_eq!(found.duration, 31);
    assert_eq!(found.feature_vectors, saved.feature_vectors);
}
