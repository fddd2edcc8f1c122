//! `rar-lock [-l] <archive.rar>`
//!
//! Without `-l` the archive is unlocked, with `-l` it is locked. `-l` may
//! come before or after the path. Exits with 0 when the archive ends up in
//! the requested state (including when it already was), 1 otherwise.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use rar_lock::{lock_file, LockState};

#[derive(Debug, Parser)]
#[command(
    name = "rar-lock",
    about = "Lock or unlock a RAR4/RAR5 archive",
    disable_version_flag = true
)]
struct Cli {
    /// Lock the archive instead of unlocking it.
    #[arg(short = 'l')]
    lock: bool,

    /// Archive to modify in place.
    archive: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{}", Cli::command().render_help());
            std::process::exit(1);
        }
    };

    match lock_file(&cli.archive, LockState::from(cli.lock)) {
        Ok(outcome) => println!("{outcome}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_lock_flag_either_side() {
        let cli = Cli::try_parse_from(["rar-lock", "-l", "a.rar"]).unwrap();
        assert!(cli.lock);
        assert_eq!(cli.archive, PathBuf::from("a.rar"));

        let cli = Cli::try_parse_from(["rar-lock", "a.rar", "-l"]).unwrap();
        assert!(cli.lock);
        assert_eq!(cli.archive, PathBuf::from("a.rar"));
    }

    #[test]
    fn test_defaults_to_unlock() {
        let cli = Cli::try_parse_from(["rar-lock", "a.rar"]).unwrap();
        assert!(!cli.lock);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(Cli::try_parse_from(["rar-lock"]).is_err());
        assert!(Cli::try_parse_from(["rar-lock", "-l"]).is_err());
        assert!(Cli::try_parse_from(["rar-lock", "a.rar", "b.rar"]).is_err());
        assert!(Cli::try_parse_from(["rar-lock", "-x", "a.rar"]).is_err());
    }
}
