mod common;

use common::{fork, private_repo, repo, Call, RecordingExecutor};
use ghsync::{
    OperationKind, OperationStatus, ReconcileError, Reconciler, SyncConfig, UPSTREAM_REMOTE,
};
use std::fs;
use tempfile::TempDir;

fn reconciler(
    temp: &TempDir,
    link_upstream: bool,
) -> (Reconciler<RecordingExecutor>, RecordingExecutor) {
    let executor = RecordingExecutor::default();
    let config = SyncConfig::new(temp.path().to_path_buf()).with_link_upstream(link_upstream);
    (Reconciler::new(config, executor.clone()), executor)
}

#[tokio::test]
async fn public_repository_is_cloned_over_https() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    let results = reconciler.reconcile(&[repo("alice", "tool")]).await.unwrap();

    assert_eq!(
        executor.calls(),
        vec![Call::Clone {
            url: "https://github.com/alice/tool.git".to_string(),
            destination: temp.path().join("alice/tool"),
        }]
    );
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, OperationKind::Clone);
    assert_eq!(results[0].status, OperationStatus::Succeeded);
    assert_eq!(results[0].path, temp.path().join("alice").join("tool"));
    assert!(temp.path().join("alice").is_dir());
}

#[tokio::test]
async fn private_repository_is_cloned_over_ssh() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    reconciler
        .reconcile(&[private_repo("alice", "tool")])
        .await
        .unwrap();

    assert_eq!(
        executor.calls(),
        vec![Call::Clone {
            url: "git@github.com:alice/tool.git".to_string(),
            destination: temp.path().join("alice/tool"),
        }]
    );
}

#[tokio::test]
async fn fork_clone_links_upstream_inside_new_working_copy() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, true);

    let results = reconciler
        .reconcile(&[fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert_eq!(
        executor.calls(),
        vec![
            Call::Clone {
                url: "https://github.com/bob/fork1.git".to_string(),
                destination: temp.path().join("bob/fork1"),
            },
            Call::AddRemote {
                name: UPSTREAM_REMOTE.to_string(),
                url: "upstream-url".to_string(),
                working_copy: temp.path().join("bob/fork1"),
            },
        ]
    );
    assert_eq!(results[1].kind, OperationKind::AddUpstream);
    assert_eq!(results[1].url.as_deref(), Some("upstream-url"));
}

#[tokio::test]
async fn fork_clone_without_upstream_flag_only_clones() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    reconciler
        .reconcile(&[fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert_eq!(executor.calls().len(), 1);
    assert!(matches!(executor.calls()[0], Call::Clone { .. }));
}

#[tokio::test]
async fn existing_repository_is_pulled() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("alice/tool/.git")).unwrap();
    let (reconciler, executor) = reconciler(&temp, true);

    let results = reconciler.reconcile(&[repo("alice", "tool")]).await.unwrap();

    assert_eq!(
        executor.calls(),
        vec![Call::Pull {
            working_copy: temp.path().join("alice/tool"),
        }]
    );
    assert_eq!(results[0].kind, OperationKind::Pull);
}

#[tokio::test]
async fn existing_fork_is_pulled_then_linked() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("bob/fork1/.git")).unwrap();
    let (reconciler, executor) = reconciler(&temp, true);

    reconciler
        .reconcile(&[fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert_eq!(
        executor.calls(),
        vec![
            Call::Pull {
                working_copy: temp.path().join("bob/fork1"),
            },
            Call::AddRemote {
                name: UPSTREAM_REMOTE.to_string(),
                url: "upstream-url".to_string(),
                working_copy: temp.path().join("bob/fork1"),
            },
        ]
    );
}

#[tokio::test]
async fn second_run_issues_no_clones() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, true);
    let inventory = vec![
        repo("alice", "tool"),
        private_repo("alice", "secret"),
        fork("bob", "fork1", Some("upstream-url")),
    ];

    reconciler.reconcile(&inventory).await.unwrap();
    assert_eq!(executor.clone_count(), 3);

    let second = reconciler.reconcile(&inventory).await.unwrap();

    assert_eq!(executor.clone_count(), 3);
    assert!(second
        .iter()
        .all(|result| result.kind != OperationKind::Clone));
    assert_eq!(
        second
            .iter()
            .filter(|result| result.kind == OperationKind::Pull)
            .count(),
        3
    );
}

#[tokio::test]
async fn failed_clone_does_not_stop_the_run() {
    let temp = TempDir::new().unwrap();
    let executor = RecordingExecutor {
        fail_clones: true,
        ..Default::default()
    };
    let config = SyncConfig::new(temp.path().to_path_buf()).with_link_upstream(true);
    let reconciler = Reconciler::new(config, executor.clone());

    let results = reconciler
        .reconcile(&[
            fork("bob", "fork1", Some("upstream-url")),
            repo("alice", "tool"),
        ])
        .await
        .unwrap();

    assert_eq!(executor.clone_count(), 2);
    assert!(results[0].is_failure());
    assert_eq!(results[1].kind, OperationKind::AddUpstream);
    assert!(matches!(results[1].status, OperationStatus::Skipped { .. }));
    assert_eq!(results[2].repository, "alice/tool");
    assert!(results[2].is_failure());
}

#[tokio::test]
async fn failed_pull_still_links_upstream() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("bob/fork1/.git")).unwrap();
    let executor = RecordingExecutor {
        fail_pulls: true,
        ..Default::default()
    };
    let config = SyncConfig::new(temp.path().to_path_buf()).with_link_upstream(true);
    let reconciler = Reconciler::new(config, executor.clone());

    let results = reconciler
        .reconcile(&[fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert!(results[0].is_failure());
    assert_eq!(results[1].status, OperationStatus::Succeeded);
    assert_eq!(executor.calls().len(), 2);
}

#[tokio::test]
async fn fork_without_known_parent_skips_upstream() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, true);

    let results = reconciler
        .reconcile(&[fork("bob", "fork1", None)])
        .await
        .unwrap();

    assert_eq!(executor.calls().len(), 1);
    assert_eq!(results[1].kind, OperationKind::AddUpstream);
    assert!(matches!(results[1].status, OperationStatus::Skipped { .. }));
}

#[tokio::test]
async fn unsafe_names_are_skipped() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    let results = reconciler
        .reconcile(&[repo("..", "tool"), repo("alice", "tool")])
        .await
        .unwrap();

    assert_eq!(results[0].kind, OperationKind::Sync);
    assert!(matches!(results[0].status, OperationStatus::Skipped { .. }));
    assert_eq!(executor.calls().len(), 1);
    assert_eq!(results[1].status, OperationStatus::Succeeded);
}

#[tokio::test]
async fn plain_directory_is_pulled_by_default() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("alice/tool")).unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    reconciler.reconcile(&[repo("alice", "tool")]).await.unwrap();

    assert!(matches!(executor.calls()[0], Call::Pull { .. }));
}

#[tokio::test]
async fn plain_directory_is_skipped_when_verifying() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("alice/tool")).unwrap();
    let executor = RecordingExecutor::default();
    let config = SyncConfig::new(temp.path().to_path_buf()).with_verify_working_copies(true);
    let reconciler = Reconciler::new(config, executor.clone());

    let results = reconciler.reconcile(&[repo("alice", "tool")]).await.unwrap();

    assert!(executor.calls().is_empty());
    assert!(matches!(results[0].status, OperationStatus::Skipped { .. }));
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let executor = RecordingExecutor::default();
    let config = SyncConfig::new(temp.path().to_path_buf())
        .with_link_upstream(true)
        .with_dry_run(true);
    let reconciler = Reconciler::new(config, executor.clone());

    let results = reconciler
        .reconcile(&[fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert!(executor.calls().is_empty());
    assert!(!temp.path().join("bob").exists());
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|result| result.status == OperationStatus::Planned));
}

#[tokio::test]
async fn blocked_owner_directory_aborts_the_run() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bob"), "not a directory").unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    let result = reconciler
        .reconcile(&[repo("alice", "tool"), repo("bob", "lib"), repo("carol", "app")])
        .await;

    assert!(matches!(result, Err(ReconcileError::Tree(_))));
    assert_eq!(executor.calls().len(), 1);
    assert!(!temp.path().join("carol").exists());
}

#[tokio::test]
async fn current_directory_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let before = std::env::current_dir().unwrap();
    let (reconciler, _executor) = reconciler(&temp, true);

    reconciler
        .reconcile(&[repo("alice", "tool"), fork("bob", "fork1", Some("upstream-url"))])
        .await
        .unwrap();

    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[cfg(not(windows))]
#[tokio::test]
async fn windows_device_names_are_synced_on_other_hosts() {
    let temp = TempDir::new().unwrap();
    let (reconciler, executor) = reconciler(&temp, false);

    let results = reconciler
        .reconcile(&[repo("alice", "aux"), repo("alice", "con")])
        .await
        .unwrap();

    assert_eq!(executor.clone_count(), 2);
    assert_eq!(results[0].path, temp.path().join("alice/aux"));
    assert!(results
        .iter()
        .all(|result| result.status == OperationStatus::Succeeded));
}

#[tokio::test]
async fn working_copy_is_pulled_when_verifying() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("alice/tool/.git")).unwrap();
    let executor = RecordingExecutor::default();
    let config = SyncConfig::new(temp.path().to_path_buf()).with_verify_working_copies(true);
    let reconciler = Reconciler::new(config, executor.clone());

    reconciler
        .reconcile(&[repo("alice", "tool"), repo("alice", "fresh")])
        .await
        .unwrap();

    assert_eq!(
        executor.calls(),
        vec![
            Call::Pull {
                working_copy: temp.path().join("alice/tool"),
            },
            Call::Clone {
                url: "https://github.com/alice/fresh.git".to_string(),
                destination: temp.path().join("alice/fresh"),
            },
        ]
    );
}
