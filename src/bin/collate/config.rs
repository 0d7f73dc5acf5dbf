use std::fs;

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use clap::ValueEnum;
use itertools::Itertools;
use serde::Deserialize;

use file_clerk::organize::DEFAULT_DATE_FORMAT;
use file_clerk::print_error;

use crate::{CollateArgs, Group};

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) clean_dirs: bool,
    pub(crate) copy: bool,
    pub(crate) date_formats: Vec<String>,
    pub(crate) debug: bool,
    pub(crate) dryrun: bool,
    pub(crate) every: Option<u64>,
    pub(crate) extensions: Vec<String>,
    pub(crate) group: Option<Group>,
    pub(crate) overwrite: bool,
    pub(crate) recurse: bool,
    pub(crate) rename: bool,
    pub(crate) use_modified: bool,
    pub(crate) verbose: bool,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct CollateUserConfig {
    #[serde(default)]
    copy: bool,
    #[serde(default)]
    date_formats: Vec<String>,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    every: Option<u64>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    keep_dirs: bool,
    #[serde(default)]
    no_rename: bool,
    #[serde(default)]
    overwrite: bool,
    #[serde(default)]
    recurse: bool,
    #[serde(default)]
    use_modified: bool,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the user config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    collate: CollateUserConfig,
}

impl CollateUserConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    fn get_user_config() -> Self {
        file_clerk::config::CONFIG_PATH
            .as_deref()
            .and_then(|path| {
                fs::read_to_string(path)
                    .map_err(|e| {
                        print_error!("Error reading config file {}: {e}", path.display());
                    })
                    .ok()
            })
            .and_then(|config_string| Self::from_toml_str(&config_string).ok())
            .unwrap_or_default()
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.collate)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    pub fn from_args(args: CollateArgs) -> Self {
        let user_config = CollateUserConfig::get_user_config();

        let extensions: Vec<String> = user_config
            .extensions
            .into_iter()
            .chain(args.extension)
            .map(|extension| extension.trim_start_matches('.').to_lowercase())
            .unique()
            .collect();

        let mut date_formats: Vec<String> = user_config
            .date_formats
            .into_iter()
            .chain(args.date_format)
            .unique()
            .filter(|format| {
                let valid = is_valid_date_format(format);
                if !valid {
                    print_error!("Skipping invalid date format: '{format}'");
                }
                valid
            })
            .collect();
        if date_formats.is_empty() {
            date_formats.push(DEFAULT_DATE_FORMAT.to_string());
        }

        let group = args
            .group
            .or_else(|| user_config.group.as_deref().and_then(parse_group));

        Self {
            clean_dirs: !(args.keep || user_config.keep_dirs),
            copy: args.copy || user_config.copy,
            date_formats,
            debug: args.debug || user_config.debug,
            dryrun: args.print || user_config.dryrun,
            every: args.every.or(user_config.every),
            extensions,
            group,
            overwrite: args.force || user_config.overwrite,
            recurse: args.recurse || user_config.recurse,
            rename: !(args.no_rename || user_config.no_rename),
            use_modified: args.modified || user_config.use_modified,
            verbose: args.verbose || user_config.verbose,
        }
    }
}

/// Parse a grouping scheme name from the config file.
fn parse_group(name: &str) -> Option<Group> {
    Group::from_str(name, true).map_or_else(
        |_| {
            print_error!("Unknown group scheme in config file: '{name}'");
            None
        },
        Some,
    )
}

/// Check that a chrono date format string contains no invalid specifiers.
fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
