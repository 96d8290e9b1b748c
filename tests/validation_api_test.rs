//! Integration tests for structural validation.

use stagecheck::config::{parse_stage, Stage};
use stagecheck::validation::{validate, ViolationKind};
use std::path::Path;

fn stage(yaml: &str) -> Stage {
    parse_stage(yaml, Path::new("stage.yaml")).unwrap()
}

fn paths(stage: &Stage) -> Vec<String> {
    validate(stage).iter().map(|v| v.path.to_string()).collect()
}

#[test]
fn absent_spec_is_valid() {
    let stage = stage("metadata:\n  name: test\n");
    assert!(validate(&stage).is_empty());
}

#[test]
fn empty_spec_is_valid() {
    let stage = stage("metadata:\n  name: test\nspec: {}\n");
    assert!(validate(&stage).is_empty());
}

#[test]
fn neither_repos_nor_upstream_is_one_violation() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    upstreamStages: []
"#,
    );
    let errs = validate(&stage);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].path.to_string(), "spec.subscriptions");
    assert_eq!(errs[0].kind, ViolationKind::Structural);
    assert!(errs[0]
        .to_string()
        .contains("exactly one of spec.subscriptions.repos or spec.subscriptions.upstreamStages"));
}

#[test]
fn both_repos_and_upstream_hide_deeper_violations() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: not-a-range
    upstreamStages:
      - name: dev
"#,
    );
    assert_eq!(paths(&stage), vec!["spec.subscriptions"]);
}

#[test]
fn wildcard_with_operator_is_rejected() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: ^1.x
"#,
    );
    let errs = validate(&stage);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, ViolationKind::Parse);
    assert_eq!(
        errs[0].path.to_string(),
        "spec.subscriptions.repos.images[0].semverConstraint"
    );
    assert_eq!(errs[0].invalid_value, "^1.x");
    assert!(errs[0].detail.is_none());
}

#[test]
fn constraints_and_platforms_are_checked_per_element() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: ">=1.2.0, <2.0.0"
          platform: linux/amd64
        - repoURL: redis
          semverConstraint: not-a-range
          platform: bogus
      charts:
        - registryURL: oci://charts
          name: app
          semverConstraint: "1.x || >=2.1, <3"
        - registryURL: oci://charts
          name: other
          semverConstraint: "==="
"#,
    );
    assert_eq!(
        paths(&stage),
        vec![
            "spec.subscriptions.repos.images[1].semverConstraint",
            "spec.subscriptions.repos.images[1].platform",
            "spec.subscriptions.repos.charts[1].semverConstraint",
        ]
    );
}

#[test]
fn empty_repos_reported_alongside_nothing_else() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos: {}
"#,
    );
    let errs = validate(&stage);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].path.to_string(), "spec.subscriptions.repos");
}

#[test]
fn empty_promotion_mechanisms_is_one_violation() {
    let stage = stage(
        r#"
spec:
  promotionMechanisms:
    gitRepoUpdates: []
    argoCDAppUpdates: []
"#,
    );
    let errs = validate(&stage);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].path.to_string(), "spec.promotionMechanisms");
    assert!(errs[0].to_string().contains(
        "at least one of spec.promotionMechanisms.gitRepoUpdates or spec.promotionMechanisms.argoCDAppUpdates"
    ));
}

#[test]
fn ambiguous_strategy_skips_helm_check() {
    let stage = stage(
        r#"
spec:
  promotionMechanisms:
    gitRepoUpdates:
      - repoURL: https://github.com/example/repo
        kustomize:
          images: []
        helm: {}
"#,
    );
    assert_eq!(
        paths(&stage),
        vec!["spec.promotionMechanisms.gitRepoUpdates[0]"]
    );
}

#[test]
fn empty_helm_mechanism_is_one_violation() {
    let stage = stage(
        r#"
spec:
  promotionMechanisms:
    gitRepoUpdates:
      - repoURL: https://github.com/example/repo
        helm: {}
"#,
    );
    assert_eq!(
        paths(&stage),
        vec!["spec.promotionMechanisms.gitRepoUpdates[0].helm"]
    );
}

#[test]
fn violations_accumulate_across_sections() {
    let stage = stage(
        r#"
spec:
  subscriptions: {}
  promotionMechanisms:
    argoCDAppUpdates: []
    gitRepoUpdates:
      - repoURL: https://github.com/example/repo
        bookkeeper: {}
        helm:
          images:
            - image: nginx
              valuesFilePath: values.yaml
              key: image.tag
              value: Image
"#,
    );
    assert_eq!(
        paths(&stage),
        vec![
            "spec.subscriptions",
            "spec.promotionMechanisms.gitRepoUpdates[0]",
        ]
    );
}

#[test]
fn validation_is_idempotent() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: ^1.x
          platform: bogus
  promotionMechanisms: {}
"#,
    );
    let first = validate(&stage);
    let second = validate(&stage);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn validation_runs_concurrently() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    upstreamStages:
      - name: dev
"#,
    );
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| validate(&stage))).collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_empty());
        }
    });
}

#[test]
fn operator_aliases_and_loose_platforms_are_admitted() {
    let stage = stage(
        r#"
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: "~> 1.24"
          platform: linux/
        - repoURL: redis
          semverConstraint: "=>7.0.0, =<7.4.0, !=7.2.x"
          platform: linux/arm/
      charts:
        - registryURL: oci://charts
          name: app
          semverConstraint: "~>1.2"
"#,
    );
    assert!(validate(&stage).is_empty());
}
