// Read-only questions asked of the target cluster.
use anyhow::{anyhow, Context, Result};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ConfigError;

pub trait Cluster {
    fn node_architecture(&self, kubeconfig: &Path) -> Result<String>;
}

#[derive(Debug, Default)]
pub struct Kubectl;

#[derive(Deserialize, Debug)]
struct NodeList {
    items: Vec<Node>,
}

#[derive(Deserialize, Debug)]
struct Node {
    status: NodeStatus,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct NodeStatus {
    node_info: NodeInfo,
}

#[derive(Deserialize, Debug)]
struct NodeInfo {
    architecture: String,
}

impl Kubectl {
    fn run_kubectl(&self, kubeconfig: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new("kubectl")
            .arg("--kubeconfig")
            .arg(kubeconfig)
            .args(args)
            .output()
            .context("could not run kubectl")?;

        if !output.status.success() {
            return Err(anyhow!(
                "kubectl {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl Cluster for Kubectl {
    fn node_architecture(&self, kubeconfig: &Path) -> Result<String> {
        let nodes = self.run_kubectl(kubeconfig, &["get", "nodes", "-o", "json"])?;

        first_node_architecture(&nodes)
    }
}

fn first_node_architecture(nodes: &str) -> Result<String> {
    let nodes: NodeList = serde_json::from_str(nodes)?;

    nodes
        .items
        .into_iter()
        .next()
        .map(|node| node.status.node_info.architecture)
        .ok_or_else(|| anyhow!("cluster has no nodes"))
}

/// `~/.kube/config`, used when neither `--kubeconfig` nor `KUBECONFIG` is given.
pub fn default_kubeconfig() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;

    Ok(home.join(".kube").join("config"))
}

pub fn client_platform() -> (&'static str, &'static str) {
    (std::env::consts::ARCH, std::env::consts::OS)
}
