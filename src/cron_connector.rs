// install cron-connector for OpenFaaS
use anyhow::Result;
use log::{info, warn};
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::apps::{AppDefinition, CRON_CONNECTOR};
use crate::config;
use crate::helm::ChartInstaller;
use crate::kube::{client_platform, default_kubeconfig, Cluster};
use crate::options::{guard_namespace, parse_overrides, InstallOptions};

#[derive(StructOpt, Debug)]
pub struct CronConnectorOpts {
    /// The namespace used for installation
    #[structopt(short, long, default_value = "openfaas")]
    pub namespace: String,

    /// Update the helm repo
    #[structopt(long, parse(try_from_str), default_value = "true")]
    pub update_repo: bool,

    /// Use custom flags or override existing flags (example --set key=value)
    #[structopt(long = "set", number_of_values = 1)]
    pub set: Vec<String>,
}

/// What the command needs to know about the machine it runs on. Anything
/// left as `None` is resolved from the home directory, after the flags have
/// been validated.
#[derive(Debug, Default)]
pub struct Context {
    pub kubeconfig: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl CronConnectorOpts {
    pub fn run(
        &self,
        ctx: &Context,
        cluster: &dyn Cluster,
        installer: &dyn ChartInstaller,
        out: &mut dyn Write,
    ) -> Result<()> {
        let app: &AppDefinition = &CRON_CONNECTOR;

        // nothing below may run if the flags are bad
        let overrides = parse_overrides(&self.set)?;
        let namespace = guard_namespace(&self.namespace, app.permitted_namespace)?;

        let kubeconfig = match &ctx.kubeconfig {
            Some(kubeconfig) => kubeconfig.clone(),
            None => default_kubeconfig()?,
        };
        writeln!(out, "Using kubeconfig: {}", kubeconfig.display())?;

        let user_dir = match &ctx.user_dir {
            Some(user_dir) => user_dir.clone(),
            None => config::get_config_dir()?,
        };
        let user_dir = config::init_user_dir(&user_dir)?;
        let (client_arch, client_os) = client_platform();
        writeln!(out, "Client: {}, {}", client_arch, client_os)?;
        info!("User dir established as: {}", user_dir.display());

        let arch = cluster.node_architecture(&kubeconfig).unwrap_or_else(|err| {
            warn!("could not detect node architecture: {}", err);
            String::new()
        });
        writeln!(out, "Node architecture: {:?}", arch)?;

        let options = InstallOptions::default()
            .with_namespace(namespace)
            .with_helm_path(config::helm_workspace(&user_dir))
            .with_helm_repo(app.chart)
            .with_helm_url(app.repo_url)
            .with_overrides(overrides)
            .with_update_repo(self.update_repo)
            .with_kubeconfig(kubeconfig);

        installer.install_chart(&options)?;

        writeln!(out, "{}", app.install_message())?;

        Ok(())
    }
}

/// Prints how to use cron-connector once it is running.
pub fn info(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", CRON_CONNECTOR.info)?;

    Ok(())
}
