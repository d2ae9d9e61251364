// Workflow tests against real git repositories created in a temp dir
use git2::{Repository as Git2Repo, Signature};
use git_release::cli::{run_release_workflow, ReleaseKind, ReleaseWorkflowArgs, WorkflowOutcome};
use git_release::config::Config;
use git_release::domain::{NoReleaseReason, Series};
use git_release::git::{Git2Repository, Repository};
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    repo: Git2Repo,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        TestRepo { dir, repo }
    }

    fn commit(&self, message: &str) -> git2::Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn tag(&self, name: &str, oid: git2::Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    fn annotated_tag(&self, name: &str, oid: git2::Oid) {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag(name, &object, &sig, name, false).unwrap();
    }

    fn open(&self) -> Git2Repository {
        Git2Repository::open(self.dir.path()).unwrap()
    }
}

fn release_version(result: &git_release::cli::WorkflowResult) -> String {
    match &result.outcome {
        WorkflowOutcome::Release(release) => release.version.to_string(),
        other => panic!("expected a release, got {:?}", other),
    }
}

#[test]
fn test_log_reads_messages_and_tags() {
    let test_repo = TestRepo::new();
    let first = test_repo.commit("feat: first\n\nwith body");
    test_repo.tag("v0.1.0", first);
    test_repo.annotated_tag("deploy-1", first);
    test_repo.commit("fix: second");

    let repo = test_repo.open();
    let log: Vec<_> = repo
        .log("HEAD")
        .unwrap()
        .collect::<git_release::Result<_>>()
        .unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log[0].message, "fix: second");
    assert!(log[0].tags.is_empty());
    assert_eq!(log[1].sha, first.to_string());
    assert_eq!(log[1].message, "feat: first\n\nwith body");
    let mut tags = log[1].tags.clone();
    tags.sort();
    assert_eq!(tags, vec!["deploy-1".to_string(), "v0.1.0".to_string()]);
}

#[test]
fn test_series_from_real_repository() {
    let test_repo = TestRepo::new();
    let old = test_repo.commit("feat: ancient");
    test_repo.tag("v0.0.1", old);
    let base = test_repo.commit("feat: base");
    test_repo.tag("v0.2.0", base);
    let previewed = test_repo.commit("fix: previewed");
    test_repo.tag("v0.2.1-next.1", previewed);
    let head = test_repo.commit("feat: new");

    let repo = test_repo.open();
    let series = Series::from_log(repo.log("HEAD").unwrap()).unwrap();

    assert_eq!(series.previous_stable().unwrap().version.to_string(), "0.2.0");
    assert_eq!(series.previous_preview().unwrap().commit.sha, previewed.to_string());
    assert_eq!(series.commits_in_next_stable().len(), 2);
    assert_eq!(series.commits_in_next_preview().len(), 1);
    assert_eq!(series.current().sha, head.to_string());
    assert_eq!(repo.resolve("HEAD").unwrap(), head.to_string());
}

#[test]
fn test_stable_workflow() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit("feat: base");
    test_repo.tag("v1.2.3", base);
    test_repo.commit("fix: one");
    test_repo.commit("feat(cli): two");

    let result = run_release_workflow(
        &test_repo.open(),
        ReleaseKind::Stable,
        &ReleaseWorkflowArgs::default(),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(release_version(&result), "1.3.0");
    assert_eq!(result.tag.as_deref(), Some("v1.3.0"));
}

#[test]
fn test_preview_workflow() {
    let test_repo = TestRepo::new();
    let first = test_repo.commit("fix: 1");
    test_repo.tag("v0.0.1-next.1", first);
    test_repo.commit("fix: 2");
    test_repo.commit("fix: 3");

    let result = run_release_workflow(
        &test_repo.open(),
        ReleaseKind::Preview,
        &ReleaseWorkflowArgs::default(),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(release_version(&result), "0.0.1-next.2");
}

#[test]
fn test_workflow_at_older_revision() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit("feat: base");
    test_repo.tag("v1.0.0", base);
    let fix = test_repo.commit("fix: one");
    test_repo.commit("feat!: breaking");

    let args = ReleaseWorkflowArgs {
        revision: Some(fix.to_string()),
        ..ReleaseWorkflowArgs::default()
    };
    let result =
        run_release_workflow(&test_repo.open(), ReleaseKind::Stable, &args, &Config::default())
            .unwrap();

    assert_eq!(release_version(&result), "1.0.1");
}

#[test]
fn test_workflow_nothing_since_stable() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit("feat: base");
    test_repo.tag("v1.0.0", base);

    let result = run_release_workflow(
        &test_repo.open(),
        ReleaseKind::Preview,
        &ReleaseWorkflowArgs::default(),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(
        result.outcome,
        WorkflowOutcome::NoRelease(NoReleaseReason::EmptySeries)
    );
    assert_eq!(result.tag, None);
}

#[test]
fn test_workflow_on_repository_without_commits_fails() {
    let test_repo = TestRepo::new();
    let result = run_release_workflow(
        &test_repo.open(),
        ReleaseKind::Stable,
        &ReleaseWorkflowArgs::default(),
        &Config::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_pull_request_workflow() {
    let test_repo = TestRepo::new();
    let head = test_repo.commit("fix: pr change");

    let result = run_release_workflow(
        &test_repo.open(),
        ReleaseKind::PullRequest { pr_num: 42 },
        &ReleaseWorkflowArgs::default(),
        &Config::default(),
    )
    .unwrap();

    let expected = format!("0.0.0-pr.42.1.{}", &head.to_string()[..7]);
    match &result.outcome {
        WorkflowOutcome::PullRequest(version) => assert_eq!(version.to_string(), expected),
        other => panic!("expected a pull request version, got {:?}", other),
    }
}
