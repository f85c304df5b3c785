use std::{fmt::Display, path::PathBuf, process};

use anyhow::Context;
use flagbind::{Binding, OptionInfo, Parser};
use joinery::JoinableIterator;
use lazy_format::lazy_format;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Auto,
    Always,
    Never,
}

struct Bindings {
    help: Binding<bool>,
    verbose: Binding<u32>,
    quiet: Binding<bool>,
    includes: Binding<Vec<PathBuf>>,
    defines: Binding<Vec<(String, String)>>,
    jobs: Binding<u32>,
    color: Binding<Color>,
    output: Binding<PathBuf>,
}

#[derive(Debug)]
#[allow(dead_code, reason = "only for Debug output")]
struct Arguments {
    verbose: u32,
    quiet: bool,
    includes: Vec<PathBuf>,
    defines: Vec<(String, String)>,
    jobs: u32,
    color: Color,
    output: Option<PathBuf>,
}

fn declare(parser: &Parser) -> Result<Bindings, flagbind::Error> {
    Ok(Bindings {
        help: parser.switch(["-h", "--help"], "print this message")?,
        verbose: parser.count(["-v", "--verbose"], "print more details (repeatable)")?,
        quiet: parser.switch(["-q", "--quiet"], "print nothing")?,
        includes: parser.list(["-I", "--include"], "add a search path")?,
        defines: parser
            .try_option(
                ["-D", "--define"],
                "define NAME=VALUE",
                |defines: Option<Vec<(String, String)>>, _, argument| {
                    let (name, value) = argument
                        .split_once('=')
                        .ok_or("expected NAME=VALUE")?;
                    let mut defines = defines.unwrap_or_default();
                    defines.push((name.to_owned(), value.to_owned()));
                    Ok::<_, &str>(defines)
                },
            )?
            .with_default(Vec::new()),
        jobs: parser
            .value(["-j", "--jobs"], "number of parallel jobs")?
            .with_default(8),
        color: parser
            .choice(
                ["--color"],
                "when to use colors",
                &[
                    ("auto", Color::Auto),
                    ("always", Color::Always),
                    ("never", Color::Never),
                ],
            )?
            .with_default(Color::Auto),
        output: parser.value(["-o", "--output"], "write results to this file")?,
    })
}

fn usage(options: &[OptionInfo]) -> impl Display + '_ {
    let lines = options.iter().map(|info| {
        let spellings = lazy_format!(match (info.takes_argument) {
            true => "{info} <VALUE>",
            false => "{info}",
        });
        let help = info.help.as_deref().unwrap_or("");

        lazy_format!("  {:<28}{help}", spellings.to_string())
    });
    let lines = lines.join_with("\n");

    lazy_format!("usage: flagbind-demo [OPTIONS]\n\noptions:\n{lines}")
}

/// Print a command-line error and exit with its suggested code.
fn or_exit<T>(result: Result<T, flagbind::Error>) -> T {
    result.unwrap_or_else(|error| {
        eprintln!("error: {error}");
        eprintln!("try `flagbind-demo --help` for more information");
        process::exit(error.exit_code())
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let parser = or_exit(Parser::from_env());
    let bindings = declare(&parser).context("failed to declare command-line options")?;

    if or_exit(bindings.help.get()) {
        println!("{}", usage(&or_exit(parser.options())));
        return Ok(());
    }

    let arguments = Arguments {
        verbose: or_exit(bindings.verbose.get()),
        quiet: or_exit(bindings.quiet.get()),
        includes: or_exit(bindings.includes.get()),
        defines: or_exit(bindings.defines.get()),
        jobs: or_exit(bindings.jobs.get()),
        color: or_exit(bindings.color.get()),
        output: or_exit(bindings.output.get_optional()),
    };

    tracing::info!(verbose = arguments.verbose, "parsed arguments");
    println!("{arguments:#?}");

    Ok(())
}
