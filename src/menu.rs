use log::debug;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::game::Game;
use crate::search::Route;

const HELP: &str = "\
Commands:
    path NAME        shortest path from NAME to the center
    distance NAME    Bacon number of NAME
    center [NAME]    show, or change, the center
    average          average Bacon number, over reachable performers
    histogram        number of performers at each distance
    top [N]          the N best centers, by average distance to the
                     performers each one reaches; the reachable count is
                     shown, as a lone performer averages 0 (slow on large
                     datasets)
    credited         the performer with the most credits
    longest          the reachable performer furthest from the center
    credits NAME     productions NAME was credited in
    cast TITLE       performers credited in TITLE
    help             show this message
    quit             leave the game";

/// One parsed line of menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Path(String),
    Distance(String),
    Center(Option<String>),
    Average,
    Histogram,
    Top(Option<usize>),
    Credited,
    Longest,
    Credits(String),
    Cast(String),
    Help,
    Quit,
}

impl Command {
    /// Names may contain spaces: everything after the first word is the
    /// argument. Returns an explanation for bad input.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let arg = |what: &str| {
            if rest.is_empty() {
                Err(format!("'{}' needs a {}", word, what))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "path" => Command::Path(arg("performer name")?),
            "distance" => Command::Distance(arg("performer name")?),
            "center" | "recenter" => {
                Command::Center((!rest.is_empty()).then(|| rest.to_string()))
            }
            "average" => Command::Average,
            "histogram" => Command::Histogram,
            "top" => {
                if rest.is_empty() {
                    Command::Top(None)
                } else {
                    let n = rest
                        .parse::<usize>()
                        .map_err(|_| format!("not a count: '{}'", rest))?;
                    Command::Top(Some(n))
                }
            }
            "credited" => Command::Credited,
            "longest" => Command::Longest,
            "credits" => Command::Credits(arg("performer name")?),
            "cast" => Command::Cast(arg("production title")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(format!("unknown command: '{}' (try 'help')", word)),
        };
        Ok(Some(command))
    }
}

/**
 *  Run the interactive game, reading commands from `input` until "quit" or
 *  end of input. Unknown names and bad commands are reported and the loop
 *  carries on; any other error ends it.
 */
pub fn play<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    out: &mut W,
    default_top: usize,
) -> Result<()> {
    writeln!(out, "Bacon numbers, centered on '{}'.", game.center())?;
    writeln!(out, "Type 'help' for the list of commands.")?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                debug!("menu: {:?}", command);
                match execute(game, command, out, default_top) {
                    Err(err) if err.is_query_error() => {
                        writeln!(out, "{}", err)?
                    }
                    other => other?,
                }
            }
            Ok(None) => {}
            Err(msg) => writeln!(out, "{}", msg)?,
        }
        prompt(out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Run one command against the game, writing its answer to `out`.
pub fn execute<W: Write>(
    game: &mut Game,
    command: Command,
    out: &mut W,
    default_top: usize,
) -> Result<()> {
    match command {
        Command::Path(name) => match game.path_to(&name)? {
            Route::Path(names) => {
                for (i, hop) in names.iter().enumerate() {
                    if i % 2 == 0 {
                        writeln!(out, "{}", hop)?;
                    } else {
                        writeln!(out, "    was in \"{}\" with", hop)?;
                    }
                }
                writeln!(out, "Distance: {}", names.len() / 2)?;
            }
            Route::Unreachable => {
                writeln!(out, "{} cannot reach {}", name, game.center())?
            }
        },
        Command::Distance(name) => {
            let d = game.distance_to(&name)?;
            writeln!(out, "{}: {}", name, d)?;
        }
        Command::Center(None) => writeln!(out, "Center: {}", game.center())?,
        Command::Center(Some(name)) => {
            game.recenter(&name)?;
            writeln!(out, "New center: {}", name)?;
        }
        Command::Average => {
            let avg = game.average_distance()?;
            writeln!(out, "Average distance to {}: {}", game.center(), avg)?;
        }
        Command::Histogram => write!(out, "{}", game.histogram()?)?,
        Command::Top(n) => {
            let top = game.top_centers(n.unwrap_or(default_top));
            for (i, r) in top.iter().enumerate() {
                writeln!(out, "{:3}. {} {}", i + 1, r.name, r.average)?;
            }
        }
        Command::Credited => match game.most_credited() {
            Some(c) => {
                writeln!(out, "{} ({} credits):", c.name, c.count)?;
                for title in c.productions {
                    writeln!(out, "    {}", title)?;
                }
            }
            None => writeln!(out, "No performers.")?,
        },
        Command::Longest => {
            let l = game.longest_path()?;
            writeln!(out, "{} (distance {}): {}", l.name, l.distance, l.route)?;
        }
        Command::Credits(name) => {
            for title in game.credits_of(&name)? {
                writeln!(out, "{}", title)?;
            }
        }
        Command::Cast(title) => {
            for name in game.cast_of(&title)? {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}
