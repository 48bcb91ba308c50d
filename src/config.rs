use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use thiserror::Error;

const USER_DIR: &str = ".faas-addons";
const HELM_WORKSPACE: &str = ".helm";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("user does not have a home directory")]
    NoHome,

    #[error("could not create user directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where this tool keeps its state, `~/.faas-addons`.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;

    Ok(home.join(USER_DIR))
}

/// Makes sure the user directory and the helm workspace inside it exist.
pub fn init_user_dir(user_dir: &Path) -> Result<PathBuf, ConfigError> {
    for dir in &[user_dir.to_path_buf(), helm_workspace(user_dir)] {
        if !dir.exists() {
            create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
    }

    Ok(user_dir.to_path_buf())
}

pub fn helm_workspace(user_dir: &Path) -> PathBuf {
    user_dir.join(HELM_WORKSPACE)
}
