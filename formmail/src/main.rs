use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use formmail::commands::{email::EmailCommand, serve::serve, submit::SubmitCommand};
use formmail_config::DEFAULT_CONFIG_PATH;
use formmail_utils::formmail_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let paths = config_paths(cli.config);
    let config = formmail_config::load(&paths).context("Failed to load config")?;

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::Submit(command) => command.invoke(config).await?,
        Command::Email { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = formmail_version())]
struct Cli {
    /// Additional config files, loaded after the default config
    #[arg(long, short, global = true, env = "FORMMAIL_CONFIG", value_delimiter = ':')]
    config: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the http server handling contact form submissions
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    Submit(SubmitCommand),
    /// Test email deliverability
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn config_paths(extra: Vec<PathBuf>) -> Vec<PathBuf> {
    Some(Path::new(DEFAULT_CONFIG_PATH))
        .filter(|path| path.exists())
        .map(Path::to_path_buf)
        .into_iter()
        .chain(extra)
        .collect()
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_submit() {
        let cli = Cli::try_parse_from([
            "formmail",
            "submit",
            "--name",
            "Ann",
            "--endpoint",
            "http://localhost:8000/api/contact",
        ])
        .unwrap();

        let Command::Submit(command) = cli.command else {
            panic!("expected submit command");
        };
        assert!(format!("{command:?}").contains("Ann"));
    }

    #[test]
    fn extra_config_paths_come_last() {
        let paths = config_paths(vec!["/etc/formmail.toml".into()]);

        assert_eq!(paths.last(), Some(&PathBuf::from("/etc/formmail.toml")));
    }
}
