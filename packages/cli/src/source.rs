//! Where the book document comes from: a file, stdin, or an HTTP URL.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    Url(String),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("source must not be empty".into()),
            "-" => Ok(Source::Stdin),
            s if s.starts_with("http://") || s.starts_with("https://") => Ok(Source::Url(s.into())),
            s => Ok(Source::File(s.into())),
        }
    }
}

impl Source {
    /// Read the whole document body.
    pub fn read(&self) -> Result<String, String> {
        tracing::debug!(source = ?self, "reading document");
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| format!("failed to read stdin: {}", e))?;
                Ok(buf)
            }
            Source::File(path) => fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e)),
            Source::Url(url) => reqwest::blocking::get(url)
                .and_then(|resp| resp.error_for_status())
                .and_then(|resp| resp.text())
                .map_err(|e| format!("failed to fetch {}: {}", url, e)),
        }
    }
}
