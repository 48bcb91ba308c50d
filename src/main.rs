use anyhow::Result;
use console::Term;
use env_logger::Env;
use std::path::PathBuf;
use structopt::StructOpt;

mod apps;
mod config;
mod cron_connector;
mod helm;
mod kube;
mod options;

use crate::cron_connector::{Context, CronConnectorOpts};
use crate::helm::HelmInstaller;
use crate::kube::Kubectl;

#[derive(StructOpt, Debug)]
#[structopt(name = "faas-addons")]
/// Installs OpenFaaS add-ons into a Kubernetes cluster
struct Opt {
    /// Path to the kubeconfig file, defaults to ~/.kube/config
    #[structopt(long, global = true, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(StructOpt, Debug)]
enum Cmd {
    /// Installs an add-on
    Install(App),
    /// Shows how to use an installed add-on
    Info(AppInfo),
}

#[derive(StructOpt, Debug)]
enum App {
    /// Install cron-connector for OpenFaaS
    CronConnector(CronConnectorOpts),
}

#[derive(StructOpt, Debug)]
enum AppInfo {
    /// cron-connector for OpenFaaS
    CronConnector,
}

fn install(app: App, kubeconfig: Option<PathBuf>) -> Result<()> {
    let ctx = Context {
        kubeconfig,
        ..Context::default()
    };
    let mut term = Term::stdout();

    match app {
        App::CronConnector(opts) => opts.run(&ctx, &Kubectl, &HelmInstaller, &mut term),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    log::debug!("{:?}", opt);

    match opt.cmd {
        Cmd::Install(app) => install(app, opt.kubeconfig),
        Cmd::Info(AppInfo::CronConnector) => cron_connector::info(&mut Term::stdout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_cron_connector_args() {
        let opt = Opt::from_iter(&[
            "faas-addons",
            "install",
            "cron-connector",
            "--kubeconfig",
            "/tmp/kubeconfig",
            "--set",
            "schedule=*/1 * * * *",
        ]);

        assert_eq!(opt.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
        match opt.cmd {
            Cmd::Install(App::CronConnector(opts)) => {
                assert_eq!(opts.namespace, "openfaas");
                assert_eq!(opts.set, vec!["schedule=*/1 * * * *"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_info_args() {
        let opt = Opt::from_iter(&["faas-addons", "info", "cron-connector"]);

        match opt.cmd {
            Cmd::Info(AppInfo::CronConnector) => {}
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
