use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bacon_number::{logger, menu, Config, Game, Route};

/// Bacon numbers: shortest chains of shared productions between performers.
///
/// The dataset is a text feed with one credit per line, in the form
/// 'PERFORMER|PRODUCTION'. For example, to find the shortest chain from Tom
/// Hanks to Kevin Bacon:
///  ./bacon --dataset=credits.txt path "Tom Hanks"
///
/// Note: 'top' runs one search per performer, so it is slow on large
///   datasets.
///
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Credits feed to load ('-' for stdin, with a query subcommand only)
    #[arg(short, long, value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Performer that distances are measured to
    #[arg(short = 'C', long, value_name = "NAME")]
    center: Option<String>,

    /// Field separator of the feed
    #[arg(short, long, value_name = "CHAR")]
    separator: Option<char>,

    /// Skip malformed lines, instead of stopping at the first one
    #[arg(long)]
    lenient: bool,

    /// Verbosity
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Echo all log messages to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bacon number of a performer
    Distance { name: String },
    /// Shortest path from a performer to the center
    Path { name: String },
    /// Average Bacon number, over the performers that reach the center
    Average,
    /// Number of performers at each distance
    Histogram,
    /// The best centers, by average distance to the performers each reaches.
    ///
    /// The reachable count is printed with each average: a performer with no
    /// co-stars reaches only itself, averages 0, and so ranks first.
    Top { n: Option<usize> },
    /// The performer with the most credits
    Credited,
    /// The reachable performer furthest from the center
    Longest,
    /// Productions a performer was credited in
    Credits { name: String },
    /// Performers credited in a production
    Cast { title: String },
    /// Distance and path of every performer
    All,
    /// Interactive game (the default)
    Play,
}

/// Command-line values override those from the config file.
fn settings(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dataset) = &args.dataset {
        config.dataset = Some(dataset.clone());
    }
    if let Some(center) = &args.center {
        config.center = center.clone();
    }
    if let Some(separator) = args.separator {
        config.separator = separator;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.lenient |= args.lenient;
    Ok(config)
}

fn report(
    game: &mut Game,
    command: Command,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let query = match command {
        Command::Distance { name } => menu::Command::Distance(name),
        Command::Path { name } => menu::Command::Path(name),
        Command::Average => menu::Command::Average,
        Command::Histogram => menu::Command::Histogram,
        Command::Top { n } => menu::Command::Top(n),
        Command::Credited => menu::Command::Credited,
        Command::Longest => menu::Command::Longest,
        Command::Credits { name } => menu::Command::Credits(name),
        Command::Cast { title } => menu::Command::Cast(title),
        Command::All => {
            for entry in game.all_distances()? {
                match &entry.route {
                    Route::Path(_) => writeln!(
                        out,
                        "{}\t{}\t{}",
                        entry.name, entry.distance, entry.route
                    )?,
                    Route::Unreachable => {
                        writeln!(out, "{}\t{}", entry.name, entry.distance)?
                    }
                }
            }
            return Ok(());
        }
        Command::Play => {
            let stdin = io::stdin();
            menu::play(game, stdin.lock(), &mut out, config.top)?;
            return Ok(());
        }
    };
    menu::execute(game, query, &mut out, config.top)?;
    Ok(())
}

/// The interactive game reads its commands from stdin, so stdin cannot also
/// carry the feed.
fn stdin_conflict(dataset: &Path, command: &Command) -> bool {
    dataset == Path::new("-") && matches!(command, Command::Play)
}

/**
 * Main entry-point: load the feed, build the graph, answer the query.
 */
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let config = settings(&args)?;
    let _logger = logger::configure(
        config.log_level.as_str(),
        args.verbose > 0,
        &config.log_dir,
    )?;

    let dataset = config
        .dataset
        .clone()
        .ok_or("no dataset given (use --dataset, or 'dataset:' in the config)")?;
    let command = args.command.unwrap_or(Command::Play);
    if stdin_conflict(&dataset, &command) {
        return Err("'--dataset -' reads the feed from stdin, which leaves \
                    nothing for the interactive game; pass a query \
                    subcommand, or a feed file"
            .into());
    }
    let feed = bacon_number::load_feed(&dataset, &config.feed_options())?;
    if feed.skipped > 0 {
        warn!("Skipped {} malformed lines", feed.skipped);
    }
    let mut game = Game::from_records(feed.records, &config.center)?;
    info!("{}", game);

    report(&mut game, command, &config)?;
    io::stdout().flush()?;
    Ok(())
}
