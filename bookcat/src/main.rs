use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use bookcat::cli::commands::execute_command;
use bookcat::cli::output;
use bookcat::cli::Cli;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    match execute_command(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookcat::util::testing;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        testing::init_test_setup();
        Cli::command().debug_assert();
    }

    #[test]
    fn given_find_args_when_parsing_then_title_and_author_captured() {
        let cli = Cli::try_parse_from(["bookcat", "find", "-t", "Beta", "-a", "Jones"]).unwrap();
        match cli.command {
            Some(bookcat::cli::Commands::Find { title, author }) => {
                assert_eq!(title, "Beta");
                assert_eq!(author, "Jones");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_tree_args_when_parsing_then_depth_defaults_and_overrides() {
        let cli = Cli::try_parse_from(["bookcat", "tree"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(bookcat::cli::Commands::Tree { depth }) if depth == bookcat::domain::tree::DEFAULT_RENDER_DEPTH
        ));

        let cli = Cli::try_parse_from(["bookcat", "tree", "--depth", "3"]).unwrap();
        assert!(matches!(cli.command, Some(bookcat::cli::Commands::Tree { depth: 3 })));
    }

    #[test]
    fn given_unknown_shape_when_parsing_then_rejected() {
        assert!(Cli::try_parse_from(["bookcat", "--shape", "avl", "tree"]).is_err());
    }
}
