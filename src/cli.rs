// src/cli.rs
use std::{env, path::PathBuf};

use crate::params::Params;
use crate::runner;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;
    let report = runner::run(&params)?;

    println!(
        "{} tables ({} skipped), {} candidates, {} matches kept",
        report.tables, report.tables_skipped, report.candidates, report.matches
    );
    println!(
        "dropped: {} duplicate, {} bad score, {} inconsistent, {} over cap",
        report.drops.duplicates, report.drops.bad_scores,
        report.drops.inconsistent, report.drops.over_cap
    );
    println!("new players: {}", report.new_players);
    for path in &report.written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut params = Params::new();
    let mut args = env::args().skip(1);

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--html" => params.source = args.next().ok_or("Missing value for --html")?,
            "--tourney" => params.tourney_id = args.next().ok_or("Missing value for --tourney")?,
            "--date" => {
                let v = args.next().ok_or("Missing value for --date")?;
                if !looks_like_iso_date(&v) {
                    return Err(format!("Bad --date (want YYYY-MM-DD): {}", v).into());
                }
                params.tourney_date = v;}
            "--data-dir" => {
                params.data_dir = PathBuf::from(args.next().ok_or("Missing value for --data-dir")?);}
            "--countries" => {
                params.countries = Some(PathBuf::from(args.next().ok_or("Missing value for --countries")?));}
            "--draft" => params.draft = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if params.source.is_empty() { return Err("Missing required --html".into()); }
    if params.tourney_id.is_empty() { return Err("Missing required --tourney".into()); }
    if params.tourney_date.is_empty() { return Err("Missing required --date".into()); }

    Ok(params)
}

fn looks_like_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && s.char_indices().all(|(i, c)| {
            if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() }
        })
}
