//! Integration tests for the end-to-end dependency diff invocation

mod common;

use common::{added_with_repo, repo_url, FakeSource, FakeSuite};
use depdiff_core::{
    CancellationToken, ChangeType, DepDiffError, DependencyDiff, DiffFetchError, DiffRequest,
    RawDependency,
};

fn request() -> DiffRequest {
    DiffRequest::new("ossf/scorecard", "main", "feature")
}

#[tokio::test]
async fn test_added_dependency_scenario() {
    let source = FakeSource::with_records(vec![RawDependency::added("lodash")
        .with_ecosystem("npm")
        .with_version("4.17.21")]);
    let diff = DependencyDiff::new(source, FakeSuite::new());

    let results = diff.results(&request(), &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].change_type, ChangeType::Added);
    assert_eq!(results[0].ecosystem.as_deref(), Some("npm"));
    assert_eq!(results[0].version.as_deref(), Some("4.17.21"));
    // no source repository, so no checks
    assert!(results[0].outcome.is_empty());
}

#[tokio::test]
async fn test_updated_dependency_scenario() {
    let source = FakeSource::with_records(vec![
        RawDependency::added("foo").with_version("2.0"),
        RawDependency::removed("foo").with_version("1.0"),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new());

    let results = diff.results(&request(), &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].change_type, ChangeType::Updated);
    assert_eq!(results[0].previous_version.as_deref(), Some("1.0"));
    assert_eq!(results[0].version.as_deref(), Some("2.0"));
}

#[tokio::test]
async fn test_invalid_repository_skips_diff_source() {
    let diff = DependencyDiff::new(FakeSource::with_records(vec![]), FakeSuite::new());
    let request = DiffRequest::new("onlyonepart", "main", "feature");

    let err = diff.results(&request, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, DepDiffError::InvalidInput(_)));
    assert_eq!(diff.source().calls(), 0);
}

#[tokio::test]
async fn test_unknown_check_fails_before_fetch() {
    let diff = DependencyDiff::new(FakeSource::with_records(vec![]), FakeSuite::new());
    let request = request().with_checks(["Maintained", "Astrology"]);

    let err = diff.results(&request, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, DepDiffError::UnknownCheck(_)));
    assert_eq!(diff.source().calls(), 0);
}

#[tokio::test]
async fn test_diff_fetch_error_propagates() {
    let source = FakeSource::failing(DiffFetchError::RevisionNotFound("main...nope".to_string()));
    let diff = DependencyDiff::new(source, FakeSuite::new());

    let err = diff.results(&request(), &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(
        err,
        DepDiffError::DiffFetch(DiffFetchError::RevisionNotFound(_))
    ));
}

#[tokio::test]
async fn test_unknown_ecosystem_aborts_before_checks() {
    let source = FakeSource::with_records(vec![
        added_with_repo("good"),
        RawDependency::added("weird")
            .with_ecosystem("unknownpkgmgr")
            .with_source_repository(repo_url("weird")),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new());

    let err = diff.results(&request(), &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, DepDiffError::UnknownEcosystem(ref e) if e == "unknownpkgmgr"));
    assert!(diff.suite().acquired().is_empty());
}

#[tokio::test]
async fn test_ecosystems_are_normalized_in_results() {
    let source = FakeSource::with_records(vec![
        RawDependency::added("requests").with_ecosystem("pip"),
        RawDependency::added("golang.org/x/net").with_ecosystem("gomod"),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new());

    let results = diff.results(&request(), &CancellationToken::new()).await.unwrap();

    let ecosystems: Vec<&str> = results
        .iter()
        .filter_map(|r| r.ecosystem.as_deref())
        .collect();
    assert_eq!(ecosystems, vec!["Go", "PyPI"]);
}

#[tokio::test]
async fn test_execution_failure_on_second_of_three_keeps_all_results() {
    let source = FakeSource::with_records(vec![
        added_with_repo("a"),
        added_with_repo("b"),
        added_with_repo("c"),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new().failing_run(&repo_url("b")));

    let results = diff.results(&request(), &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].outcome.bundle().is_some());
    assert!(results[1].outcome.failure().is_some());
    assert!(results[2].outcome.bundle().is_some());
}

#[tokio::test]
async fn test_acquisition_failure_on_second_of_three_fails_invocation() {
    let source = FakeSource::with_records(vec![
        added_with_repo("a"),
        added_with_repo("b"),
        added_with_repo("c"),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new().failing_acquire(&repo_url("b")));

    let err = diff.results(&request(), &CancellationToken::new()).await.unwrap_err();

    assert_eq!(err.kind(), "client-acquisition");
}

#[tokio::test]
async fn test_cancelled_before_fetch() {
    let diff = DependencyDiff::new(
        FakeSource::with_records(vec![added_with_repo("a")]),
        FakeSuite::new(),
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = diff.results(&request(), &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(diff.suite().acquired().is_empty());
}

#[tokio::test]
async fn test_change_type_filter_keeps_cardinality() {
    let source = FakeSource::with_records(vec![
        added_with_repo("a"),
        RawDependency::removed("b").with_source_repository(repo_url("b")),
    ]);
    let diff = DependencyDiff::new(source, FakeSuite::new());
    let request = request().with_change_types([ChangeType::Removed]);

    let results = diff.results(&request, &CancellationToken::new()).await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].outcome.is_empty());
    assert!(results[1].outcome.bundle().is_some());
    assert_eq!(diff.suite().runs().len(), 1);
}
