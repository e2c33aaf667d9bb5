//! ステータス集計とレポート描画の統合テスト

mod common;

use common::scripted_runner::{Query, ScriptedRunner};
use gitfan::application::use_cases::{StatusCheckConfig, StatusCheckUseCase};
use gitfan::domain::entities::RepositoryDescriptor;
use gitfan::domain::value_objects::TagSelector;
use gitfan::presentation::ui::{DisplayHelper, ReportRenderer};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn registry() -> Vec<RepositoryDescriptor> {
    vec![
        RepositoryDescriptor::new("edge", "/work/edge"),
        RepositoryDescriptor::new("sdk", "/work/sdk").with_tag("api"),
        RepositoryDescriptor::new("gateway", "/work/gateway").with_tag("api"),
        RepositoryDescriptor::new("console", "/work/console").with_tag("web"),
    ]
}

#[tokio::test]
async fn test_failing_branch_query_is_reported_once() {
    // 1. ブランチ取得に失敗し、ステータスは取得できるリポジトリを用意
    let runner = ScriptedRunner::new()
        .fail("sdk", Query::Branch, "fatal: ambiguous argument 'HEAD': unknown revision")
        .succeed(
            "sdk",
            Query::Status,
            "# branch.oid (initial)\n\
             1 A. N... 000000 100644 100644 0000000 e69de29 one.rs\n\
             1 A. N... 000000 100644 100644 0000000 e69de29 two.rs\n\
             1 .D N... 100644 100644 000000 e69de29 e69de29 three.rs\n",
        )
        .succeed("gateway", Query::ExactTag, "v3.1.0\n");

    let repos = registry()[..3].to_vec();
    let use_case = StatusCheckUseCase::new(StatusCheckConfig::new(), Arc::new(runner));

    // 2. 集計
    let report = use_case.execute(&repos).await.unwrap();

    // 3. 結果の確認
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.rows[1].branch, "See Error: 1");
    assert_eq!(report.rows[1].staged, "+2 ~0 -0");
    assert_eq!(report.rows[1].unstaged, "+0 ~0 -1");
    assert_eq!(report.rows[2].ref_label, "v3.1.0");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].index, 1);

    // 4. 描画後もインデックスが一致すること
    let text = ReportRenderer::new(DisplayHelper::new(false)).render_text(&report);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[3].starts_with("sdk "));
    assert!(lines[3].contains("See Error: 1"));
    let error_row = lines.iter().rev().find(|l| l.starts_with("1 ")).unwrap();
    assert!(error_row.contains("unknown revision"));
}

#[tokio::test]
async fn test_tag_filter_selects_exact_matches_only() {
    let runner = ScriptedRunner::new();
    let config = StatusCheckConfig::new().with_selector(TagSelector::from_filter("api"));
    let report = StatusCheckUseCase::new(config, Arc::new(runner.clone()))
        .execute(&registry())
        .await
        .unwrap();

    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["sdk", "gateway"]);

    let inspected: Vec<String> = runner.call_history().into_iter().map(|(repo, _)| repo).collect();
    assert!(!inspected.contains(&"edge".to_string()));
    assert!(!inspected.contains(&"console".to_string()));

    let everything = StatusCheckUseCase::new(StatusCheckConfig::new(), Arc::new(ScriptedRunner::new()))
        .execute(&registry())
        .await
        .unwrap();
    assert_eq!(everything.rows.len(), 4);
}

#[tokio::test]
async fn test_ref_label_falls_back_to_short_commit() {
    let runner = ScriptedRunner::new();
    let report = StatusCheckUseCase::new(StatusCheckConfig::new(), Arc::new(runner.clone()))
        .execute(&registry()[..1])
        .await
        .unwrap();

    assert_eq!(report.rows[0].ref_label, "0c0ffee");
    // A missing tag is not an error
    assert!(report.errors.is_empty());

    let mut queries: Vec<Query> = runner.call_history().into_iter().map(|(_, q)| q).collect();
    queries.sort_by_key(|q| *q as u8);
    assert_eq!(
        queries,
        vec![Query::Branch, Query::ExactTag, Query::ShortCommit, Query::Status]
    );
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_reports() {
    let runner = ScriptedRunner::new()
        .fail("edge", Query::Status, "fatal: index file corrupt")
        .fail("console", Query::Branch, "fatal: not a git repository");
    let use_case = StatusCheckUseCase::new(
        StatusCheckConfig::new().with_max_parallel(4),
        Arc::new(runner),
    );

    let first = use_case.execute(&registry()).await.unwrap();
    let second = use_case.execute(&registry()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.rows[0].staged, "See Error: 1");
    assert_eq!(first.rows[3].branch, "See Error: 2");
}
