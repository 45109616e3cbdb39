use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use gigview::cli::print_help;
use gigview::client::FeedClient;
use gigview::context::StandardContext;
use gigview::controller::{Controller, NullSink};
use gigview::model::{Concert, FilterCriteria};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

struct CliArgs {
    command: Option<String>,
    root: Option<PathBuf>,
    criteria: FilterCriteria,
}

fn parse_args() -> Result<Option<CliArgs>> {
    let mut parsed = CliArgs {
        command: None,
        root: None,
        criteria: FilterCriteria::default(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut take_value = |flag: &str| -> Result<String> {
            args.next()
                .with_context(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--help" | "-h" | "help" => return Ok(None),
            "--root" | "-r" => parsed.root = Some(PathBuf::from(take_value(&arg)?)),
            "--artist" => parsed.criteria.artist = take_value(&arg)?,
            "--genre" => parsed.criteria.genre = take_value(&arg)?,
            "--venue" => parsed.criteria.venue = take_value(&arg)?,
            "--promoter" => parsed.criteria.promoter = take_value(&arg)?,
            "--from" => parsed.criteria.date_from = Some(parse_iso_date(&take_value(&arg)?)?),
            "--to" => parsed.criteria.date_to = Some(parse_iso_date(&take_value(&arg)?)?),
            "add" | "remove" | "list" | "export" if parsed.command.is_none() => {
                parsed.command = Some(arg.clone());
            }
            other => bail!("unknown argument: {other} (try --help)"),
        }
    }

    Ok(Some(parsed))
}

fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

fn print_listing(concerts: &[Concert]) {
    let mut sorted = concerts.to_vec();
    gigview::model::item::sort_by_event_date(&mut sorted);
    for concert in &sorted {
        println!(
            "{:<14} {:<32} {:<18} {:<24} {}",
            concert.date, concert.artist, concert.genre, concert.venue, concert.promoter
        );
    }
    println!();
    println!("{} concert(s)", sorted.len());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Warn,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let Some(parsed) = parse_args()? else {
        print_help("gigview");
        return Ok(());
    };

    let ctx = Arc::new(StandardContext::new(parsed.root.clone()));
    let mut controller = Controller::new(ctx, Box::new(NullSink));

    match parsed.command.as_deref() {
        None => {
            let client = FeedClient::new();
            controller.reload(&client).await;
            if let Some(error) = controller.load_error() {
                eprintln!("{error}");
                std::process::exit(1);
            }
            controller.apply_criteria(parsed.criteria);
            print_listing(controller.store().filtered());
        }
        Some("add") => {
            let client = FeedClient::new();
            controller.reload(&client).await;
            if let Some(error) = controller.load_error() {
                eprintln!("{error}");
                std::process::exit(1);
            }
            let matches = parsed.criteria.apply(controller.store().all());
            for concert in &matches {
                controller.add_to_my_list(concert);
            }
            println!(
                "added {} event(s); My List now holds {}",
                matches.len(),
                controller.my_list().len()
            );
        }
        Some("remove") => {
            if parsed.criteria.is_empty() {
                bail!("refusing to remove every event; pass at least one filter");
            }
            let matches: Vec<Concert> = controller
                .my_list()
                .entries()
                .iter()
                .filter(|c| parsed.criteria.matches(c))
                .cloned()
                .collect();
            for concert in &matches {
                controller.remove_from_my_list(concert);
            }
            println!(
                "removed {} event(s); My List now holds {}",
                matches.len(),
                controller.my_list().len()
            );
        }
        Some("list") => {
            if controller.my_list().is_empty() {
                println!("My List is empty.");
            } else {
                print_listing(&controller.my_list().sorted());
            }
        }
        Some("export") => match controller.export_my_list() {
            Some(ics) => println!("{ics}"),
            None => eprintln!("My List is empty; nothing to export."),
        },
        Some(other) => bail!("unknown command: {other}"),
    }

    Ok(())
}
