//! Figment-based discovery and merging of config files.

use super::file_config::FileConfig;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use std::path::PathBuf;

const PROJECT_CONFIG_FILES: [&str; 2] = ["council.toml", ".council.toml"];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Merges every config source, lowest precedence first: built-in
    /// defaults, then the global file, then the project file, then
    /// `config_path` when given.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = Self::global_config_path()
            && global.exists()
        {
            figment = figment.merge(Toml::file(&global));
        }

        if let Some(project) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Built-in defaults only, for `--no-config`.
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/llm-council/config.toml`, or the platform
    /// equivalent reported by `dirs`. The file need not exist.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("llm-council").join("config.toml"))
    }

    /// First of `./council.toml`, `./.council.toml` that exists.
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Backs `--show-config`.
    pub fn print_config_sources() {
        println!("Config sources, highest precedence first:");

        match Self::project_config_path() {
            Some(path) => println!("  project  {} (found)", path.display()),
            None => println!("  project  ./council.toml or ./.council.toml (absent)"),
        }

        if let Some(path) = Self::global_config_path() {
            let state = if path.exists() { "found" } else { "absent" };
            println!("  global   {} ({state})", path.display());
        }

        println!("  defaults built in");
    }
}
