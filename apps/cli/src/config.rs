use std::fs;
use std::path::{Path, PathBuf};

use tracker_app::AppConfig;

const CONFIG_DIR_NAME: &str = "cal-tracker";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Loads `explicit` if given (it must exist), otherwise the per-user config,
/// writing defaults there on first run.
pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad, String> {
    if let Some(file) = explicit {
        let config = read_config(file)?;
        return Ok(ConfigLoad {
            config,
            file: file.to_path_buf(),
            created: false,
        });
    }

    let dir = config_dir()?;
    let file = dir.join(CONFIG_FILE_NAME);
    if file.exists() {
        let config = read_config(&file)?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    fs::create_dir_all(&dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let config = AppConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents).map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn read_config(file: &Path) -> Result<AppConfig, String> {
    let contents = fs::read_to_string(file)
        .map_err(|err| format!("read config {}: {}", file.display(), err))?;
    parse_config(&contents).map_err(|err| format!("parse config {}: {}", file.display(), err))
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn config_dir() -> Result<PathBuf, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join("Library")
        .join("Application Support")
        .join(CONFIG_DIR_NAME))
}
