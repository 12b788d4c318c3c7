use std::{env, path::PathBuf, process};

use jsonscout_core::config::{expand_path, Config};
use jsonscout_core::report::Target;
use jsonscout_core::searcher::{TreeSearcher, DEFAULT_EXTENSION};

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let args: Vec<String> = env::args().skip(1).collect();

    let mut root_dir = None;
    let mut raw_targets: Vec<String> = Vec::new();
    let mut extension = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--target" | "-t" => {
                if i + 1 < args.len() {
                    raw_targets.push(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: --target requires a string");
                    process::exit(1);
                }
            }
            "--ext" => {
                if i + 1 < args.len() {
                    extension = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: --ext requires an extension");
                    process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if !args[i].starts_with('-') => root_dir = Some(PathBuf::from(&args[i])),
            other => {
                eprintln!("Error: unknown flag '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let root_dir = match root_dir {
        Some(dir) => dir,
        None => {
            let dir: String = config.get("search.root_dir").map_err(|_| {
                anyhow::anyhow!(
                    "no root directory given; pass one as an argument or set search.root_dir"
                )
            })?;
            expand_path(dir)
        }
    };
    if raw_targets.is_empty() {
        raw_targets = config.get("search.targets").map_err(|_| {
            anyhow::anyhow!("no search targets given; pass --target or set search.targets")
        })?;
    }
    let extension = match extension {
        Some(ext) => ext,
        None => config
            .get("search.extension")
            .unwrap_or_else(|_| DEFAULT_EXTENSION.to_string()),
    };
    let targets = raw_targets
        .into_iter()
        .map(Target::new)
        .collect::<Result<Vec<_>, _>>()?;

    println!("JSON Tree Searcher\n==================");
    println!("Root directory: {}", root_dir.display());
    println!("Extension: .{}", extension);

    let searcher = TreeSearcher::with_extension(extension);
    let report = searcher.search(&root_dir, &targets)?;

    for record in &report.matches {
        println!("\nSearch string: {}", record.target);
        if record.is_empty() {
            println!("Not found in any file.");
        } else {
            println!("Found in the following files:");
            for path in &record.paths {
                println!("{}", path.display());
            }
        }
    }

    println!(
        "\n📊 Scanned {} files, {} failed to parse",
        report.files_scanned,
        report.failures.len()
    );
    Ok(())
}

fn print_usage() {
    println!("Usage: jsonscout [OPTIONS] [ROOT_DIR]");
    println!();
    println!("Options:");
    println!("  -t, --target <STRING>  Substring to search for (repeatable, ordered)");
    println!("      --ext <EXT>        File extension to scan (default: json)");
    println!("  -h, --help             Show this help");
    println!();
    println!("ROOT_DIR falls back to config key search.root_dir; targets fall");
    println!("back to search.targets.");
}
