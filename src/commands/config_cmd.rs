use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values and where each came from
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print!("{}", describe(config)),
                }
                Ok(())
            }
        }
    }
}

fn describe(config: &Config) -> String {
    let mut lines = vec!["Configuration".to_string(), "=============".to_string(), String::new()];

    match &config.config_file {
        Some(path) => lines.push(format!("Config file: {}", path.display())),
        None => lines.push(format!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        )),
    }

    for (key, value, source) in [
        (
            "database_path",
            config.database_path.value.display().to_string(),
            &config.database_path.source,
        ),
        ("user", config.user.value.clone(), &config.user.source),
        ("port", config.port.value.to_string(), &config.port.source),
    ] {
        lines.push(String::new());
        lines.push(format!("{}: {}", key, value));
        lines.push(format!("  source: {}", source));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, ConfigValue};
    use std::path::PathBuf;

    #[test]
    fn test_describe_lists_values_with_sources() {
        let config = Config {
            database_path: ConfigValue::new(PathBuf::from("/tmp/diary.db"), ConfigSource::File),
            user: ConfigValue::new("alice".to_string(), ConfigSource::Environment),
            port: ConfigValue::new(8080, ConfigSource::Default),
            config_file: Some(PathBuf::from("/etc/fooddiary/config.yaml")),
        };

        let text = describe(&config);
        assert!(text.contains("Config file: /etc/fooddiary/config.yaml"));
        assert!(text.contains("database_path: /tmp/diary.db\n  source: file"));
        assert!(text.contains("user: alice\n  source: environment"));
        assert!(text.contains("port: 8080\n  source: default"));
    }
}
