///
/// Installs charts by running the helm client.
///
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info, warn};
use thiserror::Error;

use crate::options::InstallOptions;

#[derive(Error, Debug)]
pub enum HelmError {
    #[error("helm was not found in {workspace} or on PATH")]
    NotFound { workspace: PathBuf },

    #[error("no helm workspace was configured for the install")]
    MissingWorkspace,

    #[error("could not run {binary}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`helm {command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Something that can install a chart described by `InstallOptions`.
pub trait ChartInstaller {
    fn install_chart(&self, options: &InstallOptions) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct HelmInstaller;

impl ChartInstaller for HelmInstaller {
    fn install_chart(&self, options: &InstallOptions) -> anyhow::Result<()> {
        if options.helm_path.as_os_str().is_empty() {
            return Err(HelmError::MissingWorkspace.into());
        }

        let helm = Helm::locate(&options.helm_path)?;
        info!("Using helm binary {}", helm.binary.display());

        if options.update_repo {
            helm.run(&repo_add_args(options))?;
            helm.run(&[OsString::from("repo"), OsString::from("update")])?;
        }

        helm.run(&upgrade_args(options))?;

        Ok(())
    }
}

struct Helm {
    binary: PathBuf,
    workspace: PathBuf,
}

impl Helm {
    /// Prefers `<workspace>/bin/helm`, then the first `helm` on PATH.
    fn locate(workspace: &Path) -> Result<Helm, HelmError> {
        Helm::locate_in(workspace, env::var_os("PATH"))
    }

    fn locate_in(workspace: &Path, search_path: Option<OsString>) -> Result<Helm, HelmError> {
        let binary = which::which_in("helm", Some(workspace.join("bin")), ".")
            .or_else(|_| which::which_in("helm", search_path, "."))
            .map_err(|_| HelmError::NotFound {
                workspace: workspace.to_path_buf(),
            })?;

        Ok(Helm {
            binary,
            workspace: workspace.to_path_buf(),
        })
    }

    fn run(&self, args: &[OsString]) -> Result<(), HelmError> {
        // helm reports progress on stdout; stderr is kept for the error
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        for (key, dir) in workspace_env(&self.workspace) {
            command.env(key, dir);
        }

        let printable = args
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("running helm {}", printable);

        let output = command.output().map_err(|source| HelmError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(HelmError::Failed {
                command: printable,
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!("helm {}: {}", printable, stderr);
        }

        Ok(())
    }
}

/// Environment that confines helm's state to the workspace. Set on the child
/// process only.
fn workspace_env(workspace: &Path) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("HELM_HOME", workspace.to_path_buf()),
        ("HELM_CACHE_HOME", workspace.join("cache")),
        ("HELM_CONFIG_HOME", workspace.join("config")),
        ("HELM_DATA_HOME", workspace.join("data")),
    ]
}

fn repo_add_args(options: &InstallOptions) -> Vec<OsString> {
    vec![
        "repo".into(),
        "add".into(),
        options.repo_name().into(),
        options.helm_url.as_str().into(),
    ]
}

fn upgrade_args(options: &InstallOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "upgrade".into(),
        "--install".into(),
        options.chart_name().into(),
        options.helm_repo.as_str().into(),
        "--namespace".into(),
        options.namespace.as_str().into(),
    ];

    if let Some(kubeconfig) = &options.kubeconfig {
        args.push("--kubeconfig".into());
        args.push(kubeconfig.into());
    }

    for (key, value) in &options.overrides {
        args.push("--set".into());
        args.push(format!("{}={}", key, value).into());
    }

    args
}
