use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use speakit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Speakit",
    about = "Run the background survey service or walk through a scripted survey",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a scripted respondent through all four survey sections
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["speakit-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["speakit-api", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn parses_demo_json_flag() {
        let cli = Cli::try_parse_from(["speakit-api", "demo", "--json"]).expect("parses");
        assert!(matches!(cli.command, Some(Command::Demo(DemoArgs { json: true }))));
    }
}
