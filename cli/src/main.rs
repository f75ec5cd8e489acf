use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context};
use clap::Parser;
use dummybsa::{archive_path_hash, ArchiveDescriptor, ArchiveVersion};

#[derive(Clone, Copy, clap::ValueEnum)]
enum Game {
    /// Oblivion (version 0x67)
    Oblivion,
    /// Fallout 3, Fallout: New Vegas and Skyrim (version 0x68)
    Fallout3,
    /// Skyrim Special Edition (version 0x69)
    SkyrimSe,
}

impl From<Game> for ArchiveVersion {
    fn from(game: Game) -> Self {
        match game {
            Game::Oblivion => ArchiveVersion::TES4,
            Game::Fallout3 => ArchiveVersion::FO3,
            Game::SkyrimSe => ArchiveVersion::SSE,
        }
    }
}

#[derive(clap::Args)]
/// Writes a placeholder archive
struct Create {
    archive: PathBuf,

    #[arg(short, long, conflicts_with = "game", value_parser = parse_version)]
    /// Raw archive version to write into the header, decimal or 0x-prefixed hex
    version: Option<u32>,

    #[arg(short, long, value_enum, default_value_t = Game::Fallout3)]
    /// Game to pick the archive version for
    game: Game,

    #[arg(long, default_value = dummybsa::DEFAULT_FOLDER_NAME)]
    /// Name of the single folder in the archive
    folder: String,

    #[arg(long, default_value = dummybsa::DEFAULT_FILE_NAME)]
    /// Name of the single file in the archive
    file: String,

    #[arg(short, long)]
    /// Replace the archive if it already exists.
    force: bool,
}

#[derive(clap::Args)]
/// Prints the archive hash of paths
struct Hash {
    paths: Vec<String>,

    #[arg(short, long)]
    /// Hash every file below this directory, relative to it
    dir: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Command {
    Create(Create),
    Hash(Hash),
}

#[derive(Parser)]
#[command(author, version, about)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

fn parse_version(value: &str) -> Result<u32, std::num::ParseIntError> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

fn print_hash(path: &str) {
    println!("0x{:016X}  {path}", archive_path_hash(path));
}

fn hash_dir(root: &Path) -> Result<(), anyhow::Error> {
    for r in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = r?;
        if entry.file_type().is_dir() {
            continue;
        } else if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(root)
                .context("Walked outside of the root directory")?;
            let Some(relative) = relative.to_str() else {
                log::warn!("Omitting {} as its path is not valid UTF-8", relative.display());
                continue;
            };
            print_hash(relative);
        } else {
            log::warn!(
                "Omitting {} as it is not a regular file or directory",
                entry.path().display()
            );
        }
    }

    Ok(())
}

fn real_main() -> Result<ExitCode, anyhow::Error> {
    let opts = Opts::parse();

    match opts.command {
        Command::Create(create_opts) => {
            if create_opts.archive.exists() && !create_opts.force {
                log::info!(
                    "{} already exists, pass --force to replace it",
                    create_opts.archive.display()
                );
                return Ok(ExitCode::SUCCESS);
            }

            let version = create_opts
                .version
                .map(ArchiveVersion)
                .unwrap_or_else(|| create_opts.game.into());

            ArchiveDescriptor::new(version)
                .with_folder_name(create_opts.folder)
                .with_file_name(create_opts.file)
                .write_file(&create_opts.archive)
                .with_context(|| {
                    format!("Could not write archive {}", create_opts.archive.display())
                })?;

            println!("{}", create_opts.archive.display());
        }
        Command::Hash(hash_opts) => {
            if hash_opts.paths.is_empty() && hash_opts.dir.is_none() {
                bail!("Nothing to hash, pass some paths or --dir");
            }

            for path in &hash_opts.paths {
                print_hash(path);
            }

            if let Some(dir) = hash_opts.dir {
                hash_dir(&dir)
                    .with_context(|| format!("Could not walk {}", dir.display()))?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::builder()
        .format(|f, record| {
            for line in record.args().to_string().split('\n') {
                write!(
                    f,
                    "{}",
                    match record.level() {
                        log::Level::Error => console::style("error").red(),
                        log::Level::Warn => console::style(" warn").yellow(),
                        log::Level::Info => console::style(" info").blue(),
                        log::Level::Debug => console::style("debug").magenta(),
                        log::Level::Trace => console::style("trace").white(),
                    }
                    .bold()
                )?;
                write!(f, "({})", record.target())?;
                writeln!(f, ": {line}")?;
            }

            Ok(())
        })
        .filter_level({
            #[cfg(debug_assertions)]
            let v = log::LevelFilter::Debug;
            #[cfg(not(debug_assertions))]
            let v = log::LevelFilter::Info;
            v
        })
        .parse_env("DUMMYBSA_LOG")
        .init();

    match real_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("\x1b[31;1merror\x1b[0m: {err}");
            for (i, cause) in err.chain().skip(1).enumerate() {
                eprintln!("         #{}: {cause}", i + 1);
            }

            ExitCode::FAILURE
        }
    }
}
