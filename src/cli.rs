use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for cadenza.
#[derive(Parser, Debug)]
#[command(name = "cadenza")]
#[command(about = "A terminal MP3 player with folder browsing, search and drag-to-seek")]
#[command(version)]
pub struct Args {
    /// Music library root
    #[arg(value_name = "DIR")]
    pub dir_arg: Option<PathBuf>,

    /// Music library root (same as the positional argument)
    #[arg(short, long, conflicts_with = "dir_arg")]
    pub dir: Option<PathBuf>,

    /// Directory holding playlist documents
    #[arg(long, value_name = "DIR")]
    pub playlist_dir: Option<PathBuf>,

    /// Write logs here instead of the state directory
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Skip decoding embedded cover art during the scan
    #[arg(long)]
    pub no_cover_art: bool,
}

impl Args {
    pub const DEFAULT_MUSIC_DIR: &'static str = "./music";

    pub fn music_dir(&self) -> PathBuf {
        self.dir_arg
            .clone()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_MUSIC_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_dir_defaults_and_accepts_either_form() {
        let args = Args::try_parse_from(["cadenza"]).unwrap();
        assert_eq!(args.music_dir(), PathBuf::from("./music"));
        assert!(!args.no_cover_art);

        let args = Args::try_parse_from(["cadenza", "/srv/music"]).unwrap();
        assert_eq!(args.music_dir(), PathBuf::from("/srv/music"));

        let args = Args::try_parse_from(["cadenza", "--dir", "/srv/other", "--no-cover-art"]).unwrap();
        assert_eq!(args.music_dir(), PathBuf::from("/srv/other"));
        assert!(args.no_cover_art);
    }

    #[test]
    fn positional_and_flag_conflict() {
        assert!(Args::try_parse_from(["cadenza", "/a", "--dir", "/b"]).is_err());
    }
}
