// Add-ons this tool knows how to install. The rules for each one, such as
// the namespace it may go to, are kept here as data.

pub struct AppDefinition {
    pub name: &'static str,
    pub chart: &'static str,
    pub repo_url: &'static str,
    pub permitted_namespace: &'static str,
    pub info: &'static str,
}

pub const THANKS_FOR_USING: &str = "Thanks for using faas-addons!";

pub const CRON_CONNECTOR: AppDefinition = AppDefinition {
    name: "cron-connector",
    chart: "openfaas/cron-connector",
    repo_url: "https://openfaas.github.io/faas-netes/",
    permitted_namespace: "openfaas",
    info: CRON_CONNECTOR_INFO,
};

const CRON_CONNECTOR_INFO: &str = r#"# Example usage to trigger nodeinfo every 5 minutes:

faas-cli store deploy nodeinfo \
  --annotation schedule="*/5 * * * *" \
  --annotation topic=cron-function

# View the connector's logs:

kubectl logs deploy/cron-connector -n openfaas -f

# Find out more on the project homepage:

# https://github.com/openfaas-incubator/cron-connector/"#;

impl AppDefinition {
    /// Banner printed once the chart is installed.
    pub fn install_message(&self) -> String {
        let rule = "=".repeat(71);
        let headline = format!("{} has been installed.", self.name);

        format!(
            "{rule}\n= {headline:<68}=\n{rule}\n\n{info}\n\n{thanks}",
            rule = rule,
            headline = headline,
            info = self.info,
            thanks = THANKS_FOR_USING,
        )
    }
}
