///
/// Options describing a single chart installation.
///
use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// `--set key=value` pairs handed to helm.
pub type Overrides = BTreeMap<String, String>;

const DEFAULT_NAMESPACE: &str = "default";

#[derive(Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("error with --set usage: {0:?} is not of the form key=value")]
    MalformedOverride(String),

    #[error("error with --set usage: {0:?} has an empty key")]
    EmptyOverrideKey(String),

    #[error("to override the {permitted:?} namespace, install the chart via helm directly (requested {requested:?})")]
    NamespaceNotPermitted { requested: String, permitted: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstallOptions {
    pub namespace: String,
    pub helm_path: PathBuf,
    pub helm_repo: String,
    pub helm_url: String,
    pub overrides: Overrides,
    pub update_repo: bool,
    pub kubeconfig: Option<PathBuf>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        InstallOptions {
            namespace: String::from(DEFAULT_NAMESPACE),
            helm_path: PathBuf::new(),
            helm_repo: String::new(),
            helm_url: String::new(),
            overrides: Overrides::new(),
            update_repo: true,
            kubeconfig: None,
        }
    }
}

impl InstallOptions {
    pub fn with_namespace(self, namespace: &str) -> Self {
        InstallOptions {
            namespace: String::from(namespace),
            ..self
        }
    }

    pub fn with_helm_path<P: Into<PathBuf>>(self, helm_path: P) -> Self {
        InstallOptions {
            helm_path: helm_path.into(),
            ..self
        }
    }

    pub fn with_helm_repo(self, helm_repo: &str) -> Self {
        InstallOptions {
            helm_repo: String::from(helm_repo),
            ..self
        }
    }

    pub fn with_helm_url(self, helm_url: &str) -> Self {
        InstallOptions {
            helm_url: String::from(helm_url),
            ..self
        }
    }

    pub fn with_overrides(self, overrides: Overrides) -> Self {
        InstallOptions { overrides, ..self }
    }

    pub fn with_update_repo(self, update_repo: bool) -> Self {
        InstallOptions {
            update_repo,
            ..self
        }
    }

    pub fn with_kubeconfig<P: Into<PathBuf>>(self, kubeconfig: P) -> Self {
        InstallOptions {
            kubeconfig: Some(kubeconfig.into()),
            ..self
        }
    }

    /// Name of the helm repository, the `org` in `org/chart`.
    pub fn repo_name(&self) -> &str {
        self.helm_repo
            .split('/')
            .next()
            .unwrap_or_default()
    }

    /// Chart name, also used as the release name.
    pub fn chart_name(&self) -> &str {
        match self.helm_repo.find('/') {
            Some(idx) => &self.helm_repo[idx + 1..],
            None => &self.helm_repo,
        }
    }
}

/// Parses repeated `key=value` flags, splitting each on the first `=`.
/// Later keys win over earlier ones.
pub fn parse_overrides(raw: &[String]) -> Result<Overrides, OptionsError> {
    let mut overrides = Overrides::new();

    for entry in raw {
        let idx = entry
            .find('=')
            .ok_or_else(|| OptionsError::MalformedOverride(entry.clone()))?;

        let (key, value) = (&entry[..idx], &entry[idx + 1..]);
        if key.is_empty() {
            return Err(OptionsError::EmptyOverrideKey(entry.clone()));
        }

        overrides.insert(String::from(key), String::from(value));
    }

    Ok(overrides)
}

pub fn guard_namespace<'a>(requested: &'a str, permitted: &str) -> Result<&'a str, OptionsError> {
    if requested != permitted {
        return Err(OptionsError::NamespaceNotPermitted {
            requested: String::from(requested),
            permitted: String::from(permitted),
        });
    }

    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = parse_overrides(&strings(&["a=1", "b=2", "url=http://x?y=z"])).unwrap();

        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides["a"], "1");
        assert_eq!(overrides["b"], "2");
        assert_eq!(overrides["url"], "http://x?y=z");
    }

    #[test]
    fn test_parse_overrides_last_wins() {
        let overrides = parse_overrides(&strings(&["replicas=2", "replicas=3"])).unwrap();

        let mut expected = Overrides::new();
        expected.insert(String::from("replicas"), String::from("3"));
        assert_eq!(overrides, expected);
    }

    #[test]
    fn test_parse_overrides_empty_value() {
        let overrides = parse_overrides(&strings(&["image="])).unwrap();
        assert_eq!(overrides["image"], "");
    }

    #[test]
    fn test_parse_overrides_malformed() {
        let err = parse_overrides(&strings(&["a=1", "replicas"])).unwrap_err();

        assert_eq!(err, OptionsError::MalformedOverride(String::from("replicas")));
        assert!(err.to_string().contains("replicas"));
    }

    #[test]
    fn test_parse_overrides_empty_key() {
        let err = parse_overrides(&strings(&["=3"])).unwrap_err();
        assert_eq!(err, OptionsError::EmptyOverrideKey(String::from("=3")));
    }

    #[test]
    fn test_guard_namespace() {
        assert_eq!(guard_namespace("openfaas", "openfaas"), Ok("openfaas"));

        let err = guard_namespace("prod", "openfaas").unwrap_err();
        assert!(err.to_string().contains("install the chart via helm directly"));
    }

    #[test]
    fn test_builder() {
        let mut overrides = Overrides::new();
        overrides.insert(String::from("k"), String::from("v"));

        let options = InstallOptions::default()
            .with_update_repo(false)
            .with_overrides(overrides.clone())
            .with_helm_url("https://openfaas.github.io/faas-netes/")
            .with_helm_repo("openfaas/cron-connector")
            .with_helm_path("/tmp/.helm")
            .with_namespace("openfaas");

        assert_eq!(options.namespace, "openfaas");
        assert_eq!(options.helm_path, PathBuf::from("/tmp/.helm"));
        assert_eq!(options.helm_url, "https://openfaas.github.io/faas-netes/");
        assert_eq!(options.overrides, overrides);
        assert!(!options.update_repo);
        assert_eq!(options.kubeconfig, None);
        assert_eq!(options.repo_name(), "openfaas");
        assert_eq!(options.chart_name(), "cron-connector");
    }

    #[test]
    fn test_defaults() {
        let options = InstallOptions::default();

        assert_eq!(options.namespace, "default");
        assert!(options.update_repo);
        assert!(options.overrides.is_empty());
    }
}
