use shellexpand::tilde;
use clap::{self, ArgMatches};
use serde_yaml as yml;
use std::{fs, path};
use serde::{Serialize, Deserialize};

use crate::{settings::HighlightSettings, utils::CrayonError};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct Config {
    pub(crate) workplace: String,
    pub(crate) config_name: String,
    #[serde(default)]
    pub(crate) project: Option<String>,
    #[serde(default)]
    pub(crate) log_file: Option<String>,
    #[serde(default)]
    pub(crate) highlight: HighlightSettings
}

impl Default for Config {
    fn default() -> Self {
        let expanded_path = tilde("~/.crayon/").to_string();
        Config {
            workplace: expanded_path.clone(),
            config_name: format!("{}{}", &expanded_path, "config.yaml"),
            project: None,
            log_file: None,
            highlight: HighlightSettings::default()
        }
    }
}

impl Config {
    pub(crate) fn project_path(&self) -> Result<String, CrayonError> {
        match self.project.as_ref() {
            Some(path) => Ok(tilde(path).trim_end_matches('/').to_string()),
            None => Err(CrayonError::ConfigError(
                "Crayon cannot work without project specified, use '-p' flag or 'project' in config".to_string()
            ))
        }
    }

    pub(crate) fn http_data_path(&self) -> Result<String, CrayonError> {
        Ok(format!("{}/http.jsonl", self.project_path()?))
    }

    pub(crate) fn capture_path(&self) -> Result<String, CrayonError> {
        Ok(format!("{}/capture.jsonl", self.project_path()?))
    }
}

// -----------------------------------------------------------------------------------------------//

fn selection_args(command: clap::Command) -> clap::Command {
    command
        .arg(
            clap::Arg::new("RANGE")
                .default_value("a")
                .help("Records to work with: a -- all, n -- ids below n, n-m -- ids from n to m, n$ -- only id n")
        )
        .arg(
            clap::Arg::new("include")
                .short('i')
                .long("include")
                .value_name("REGEX")
                .action(clap::ArgAction::Append)
                .help("Only records with URL matching this regex, may be repeated")
        )
        .arg(
            clap::Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("REGEX")
                .action(clap::ArgAction::Append)
                .help("Skip records with URL matching this regex, may be repeated")
        )
}

fn reference_arg(command: clap::Command) -> clap::Command {
    command.arg(
        clap::Arg::new("ID")
            .required(true)
            .value_parser(clap::value_parser!(usize))
            .help("Id of the reference record, its URL prefix selects the records")
    )
}

pub(crate) fn build_cli() -> clap::Command {
    clap::Command::new("crayon")
        .about("Highlights intercepted HTTP and WebSocket traffic")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            clap::Arg::new("workplace")
                .short('P')
                .long("workplace")
                .default_value("~/.crayon/")
                .value_name("WORKPLACE_DIR")
                .help("Path to workplace, where data (configs, projects, logs) will be stored")
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .default_value("~/.crayon/config.yaml")
                .value_name("YAML_CONFIG")
                .help("Path to config with YAML format")
        )
        .arg(
            clap::Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PROJECT_DIR")
                .help("Path to project dir with http.jsonl and capture.jsonl (by default will try to get it from config)")
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("FILE-TO-WRITE")
                .help("A file to write log messages to instead of the terminal")
        )
        .arg(
            clap::Arg::new("debug")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue)
                .help("Enable debug messages, overrides 'debug-mode' of config")
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable informational messages, overrides 'logging-enabled' of config")
        )
        .subcommand(
            clap::Command::new("ingest")
                .about("Replay a capture log through the highlighting rules and store HTTP records")
                .arg(
                    clap::Arg::new("capture")
                        .short('f')
                        .long("capture")
                        .value_name("CAPTURE_JSONL")
                        .help("Capture log to replay, default: <PROJECT>/capture.jsonl")
                )
        )
        .subcommand(
            selection_args(clap::Command::new("show"))
                .about("Print stored records with their highlights")
                .alias("s")
                .arg(
                    clap::Arg::new("urls")
                        .short('u')
                        .long("urls")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print only ids, highlights and full URLs")
                )
        )
        .subcommand(
            selection_args(clap::Command::new("highlight"))
                .about("Apply highlighting rules to selected records")
        )
        .subcommand(
            selection_args(clap::Command::new("clear"))
                .about("Remove highlights from selected records")
        )
        .subcommand(
            reference_arg(clap::Command::new("prefix"))
                .about("Apply highlighting rules to every record sharing the URL prefix of a reference record")
        )
        .subcommand(
            reference_arg(clap::Command::new("prefix-clear"))
                .about("Remove highlights from every record sharing the URL prefix of a reference record")
        )
        .subcommand(
            clap::Command::new("settings")
                .about("Print rule slots and the colors they resolve to")
        )
}

/// Reads the config, writing a default one first when there is none
pub(crate) fn load_or_create(workplace: &str, config_name: &str) -> Result<Config, CrayonError> {
    let workplace_path = path::Path::new(workplace);
    if !workplace_path.exists() {
        fs::create_dir_all(workplace_path)?;
    }

    let config_path = path::Path::new(config_name);
    if config_path.exists() {
        let file = fs::File::open(config_name)?;
        let config_from_file: Config = yml::from_reader(file)?;
        Ok(config_from_file)
    }
    else {
        let default_config = Config {
            workplace: workplace.to_string(),
            config_name: config_name.to_string(),
            ..Default::default()
        };
        let file = fs::File::create(&default_config.config_name)?;
        yml::to_writer(file, &default_config)?;
        Ok(default_config)
    }
}

/// Command line values win over the config file
pub(crate) fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(project) = matches.get_one::<String>("project") {
        config.project = Some(project.to_string());
    }

    if let Some(log_file) = matches.get_one::<String>("log-file") {
        config.log_file = Some(tilde(log_file).to_string());
    }

    if matches.get_flag("debug") {
        config.highlight.debug_mode = true;
    }

    if matches.get_flag("verbose") {
        config.highlight.logging_enabled = true;
    }
}

pub(crate) fn handle_user_input() -> Result<(Config, ArgMatches), CrayonError> {
    let matches = build_cli().get_matches();

    let workplace = tilde(
        matches
            .get_one::<String>("workplace")
            .ok_or(CrayonError::ConfigError("'--workplace' arg not found".to_owned()))?
    ).to_string();

    let config_name = tilde(
        matches
            .get_one::<String>("config")
            .ok_or(CrayonError::ConfigError("'--config' arg not found".to_owned()))?
    ).to_string();

    let mut config = load_or_create(&workplace, &config_name)?;
    apply_overrides(&mut config, &matches);
    Ok((config, matches))
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_written_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let workplace = dir.path().join("workplace").to_string_lossy().to_string();
        let config_name = format!("{}/config.yaml", &workplace);

        let created = load_or_create(&workplace, &config_name).unwrap();
        assert!(path::Path::new(&config_name).exists());
        assert_eq!(created.highlight, HighlightSettings::default());

        let loaded = load_or_create(&workplace, &config_name).unwrap();
        assert_eq!(created, loaded);
    }

    #[test]
    fn overrides_from_command_line() {
        let matches = build_cli()
            .try_get_matches_from(["crayon", "-p", "/tmp/proj/", "-d", "-v", "--log-file", "/tmp/crayon.log", "settings"])
            .unwrap();
        let mut config = Config::default();
        apply_overrides(&mut config, &matches);

        assert!(config.highlight.debug_mode);
        assert!(config.highlight.logging_enabled);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/crayon.log"));
        assert_eq!(config.http_data_path().unwrap(), "/tmp/proj/http.jsonl");
        assert_eq!(config.capture_path().unwrap(), "/tmp/proj/capture.jsonl");
    }

    #[test]
    fn project_is_required_for_paths() {
        let config = Config::default();
        assert!(matches!(config.http_data_path(), Err(CrayonError::ConfigError(_))));
    }

    #[test]
    fn selection_and_reference_args() {
        let matches = build_cli()
            .try_get_matches_from(["crayon", "highlight", "2-5", "-i", "api", "-i", "v2", "-e", "static"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "highlight");
        assert_eq!(args.get_one::<String>("RANGE").unwrap(), "2-5");
        let include: Vec<&String> = args.get_many::<String>("include").unwrap().collect();
        assert_eq!(include.len(), 2);

        let matches = build_cli().try_get_matches_from(["crayon", "prefix", "12"]).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<usize>("ID"), Some(&12));

        assert!(build_cli().try_get_matches_from(["crayon", "prefix", "twelve"]).is_err());
    }

    #[test]
    fn partial_yaml_config() {
        let yaml = "workplace: /w/\nconfig_name: /w/config.yaml\nproject: /w/p\nhighlight:\n  logging-enabled: true\n  colors:\n    status-5xx-color: MAGENTA\n";
        let config: Config = yml::from_str(yaml).unwrap();
        assert_eq!(config.project.as_deref(), Some("/w/p"));
        assert!(config.log_file.is_none());
        assert!(config.highlight.logging_enabled);
        assert_eq!(config.highlight.colors.len(), 1);
    }
}
