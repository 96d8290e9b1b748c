//! Stage document schema definitions.
//!
//! This module contains the struct definitions that map to a Stage
//! manifest. Field names follow the camelCase wire format of the
//! Kubernetes resource; unknown fields are ignored so that manifests
//! carrying status or extra metadata still load.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// API group that Stage resources belong to.
pub const STAGE_GROUP: &str = "kargo.akuity.io";

/// Kind name of the Stage resource.
pub const STAGE_KIND: &str = "Stage";

/// Root of a Stage manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Stage {
    /// API version, e.g. `kargo.akuity.io/v1alpha1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Resource kind, normally `Stage`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Object metadata
    pub metadata: ObjectMeta,

    /// Desired configuration of the Stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<StageSpec>,
}

impl Stage {
    /// Name of the Stage, or an empty string when unset.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Namespace (project) of the Stage, or an empty string when unset.
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }
}

/// Subset of Kubernetes object metadata the validator cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// How a Stage is populated and how changes are promoted into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StageSpec {
    /// Sources the Stage tracks for new freight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Subscriptions>,

    /// Mechanisms used to promote freight into the Stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_mechanisms: Option<PromotionMechanisms>,
}

/// Upstream sources of a Stage: repositories XOR upstream Stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Subscriptions {
    /// Repository subscriptions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repos: Option<RepoSubscriptions>,

    /// Stages whose freight this Stage consumes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upstream_stages: Vec<StageSubscription>,
}

/// Subscriptions to git, image and chart repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RepoSubscriptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub git: Vec<GitSubscription>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageSubscription>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartSubscription>,
}

/// Subscription to a git repository branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GitSubscription {
    #[serde(rename = "repoURL")]
    pub repo_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,
}

/// Subscription to a container image repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSubscription {
    #[serde(rename = "repoURL")]
    pub repo_url: String,

    /// Git repository holding the image's source, if known
    #[serde(rename = "gitRepoURL", skip_serializing_if = "String::is_empty")]
    pub git_repo_url: String,

    /// How tags are selected (`SemVer`, `Lexical`, `Digest`, `NewestBuild`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag_selection_strategy: String,

    /// Acceptable version range; empty means unconstrained
    #[serde(skip_serializing_if = "String::is_empty")]
    pub semver_constraint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub allow_tags: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_tags: Vec<String>,

    /// `os/arch[/variant]`; empty means unconstrained
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform: String,
}

/// Subscription to a Helm chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartSubscription {
    #[serde(rename = "registryURL")]
    pub registry_url: String,

    pub name: String,

    /// Acceptable version range; empty means unconstrained
    #[serde(skip_serializing_if = "String::is_empty")]
    pub semver_constraint: String,
}

/// Reference to an upstream Stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StageSubscription {
    pub name: String,
}

/// Promotion mechanisms of a Stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PromotionMechanisms {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub git_repo_updates: Vec<GitRepoUpdate>,

    #[serde(rename = "argoCDAppUpdates", skip_serializing_if = "Vec::is_empty")]
    pub argocd_app_updates: Vec<ArgoCdAppUpdate>,
}

/// Update to be written to a git repository during promotion.
///
/// At most one of `bookkeeper`, `kustomize` and `helm` may be set; see
/// [`GitRepoUpdate::strategy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GitRepoUpdate {
    #[serde(rename = "repoURL")]
    pub repo_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub read_branch: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub write_branch: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookkeeper: Option<BookkeeperPromotionMechanism>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kustomize: Option<KustomizePromotionMechanism>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm: Option<HelmPromotionMechanism>,
}

/// The single update strategy selected by a [`GitRepoUpdate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateStrategy<'a> {
    Bookkeeper(&'a BookkeeperPromotionMechanism),
    Kustomize(&'a KustomizePromotionMechanism),
    Helm(&'a HelmPromotionMechanism),
}

impl UpdateStrategy<'_> {
    /// Wire name of the strategy field.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Bookkeeper(_) => "bookkeeper",
            Self::Kustomize(_) => "kustomize",
            Self::Helm(_) => "helm",
        }
    }
}

/// More than one update strategy was set on a [`GitRepoUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousStrategy {
    /// Wire names of every strategy that was set.
    pub set: Vec<&'static str>,
}

impl fmt::Display for AmbiguousStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "multiple update strategies set: {}", self.set.join(", "))
    }
}

impl std::error::Error for AmbiguousStrategy {}

impl GitRepoUpdate {
    /// Resolve the optional strategy fields into a single [`UpdateStrategy`].
    ///
    /// Returns `Ok(None)` when no strategy is set.
    pub fn strategy(&self) -> Result<Option<UpdateStrategy<'_>>, AmbiguousStrategy> {
        let set: Vec<UpdateStrategy<'_>> = [
            self.bookkeeper.as_ref().map(UpdateStrategy::Bookkeeper),
            self.kustomize.as_ref().map(UpdateStrategy::Kustomize),
            self.helm.as_ref().map(UpdateStrategy::Helm),
        ]
        .into_iter()
        .flatten()
        .collect();

        match set.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(AmbiguousStrategy {
                set: many.iter().map(UpdateStrategy::field_name).collect(),
            }),
        }
    }
}

/// Renders manifests with Kargo Render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BookkeeperPromotionMechanism {}

/// Updates image references in kustomization files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KustomizePromotionMechanism {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<KustomizeImageUpdate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KustomizeImageUpdate {
    pub image: String,
    pub path: String,
}

/// Updates image and chart versions in Helm values and Chart.yaml files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HelmPromotionMechanism {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<HelmImageUpdate>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<HelmChartDependencyUpdate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HelmImageUpdate {
    pub image: String,
    pub values_file_path: String,
    pub key: String,
    /// What to write: `Image`, `Tag`, `Digest` or `ImageAndTag`
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HelmChartDependencyUpdate {
    #[serde(rename = "registryURL")]
    pub registry_url: String,
    pub name: String,
    pub chart_path: String,
}

/// Sync of an Argo CD Application during promotion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ArgoCdAppUpdate {
    pub app_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub app_namespace: String,
}
