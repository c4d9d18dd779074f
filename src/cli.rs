//! Command line handling: a single positional file path.

use std::path::PathBuf;

pub const USAGE: &str = "Error: No file specified \n Format: <path> <file_name>";

/// The file named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Everything after the last path separator.
    pub file_name: String,
}

impl InputFile {
    /// Take the first argument after the program name. Extra arguments are ignored.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: String = args.into_iter().nth(1)?.into();
        Some(Self::new(raw))
    }

    pub fn new(raw: String) -> Self {
        let file_name = base_name(&raw).to_string();
        Self {
            path: PathBuf::from(raw),
            file_name,
        }
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_argument() {
        assert_eq!(InputFile::from_args(["cpg_plot"]), None);
        assert_eq!(InputFile::from_args(Vec::<String>::new()), None);
    }

    #[test]
    fn first_argument_is_the_path() {
        let input = InputFile::from_args(["cpg_plot", "runs/cpg/out.dat", "ignored"]).unwrap();

        assert_eq!(input.path, PathBuf::from("runs/cpg/out.dat"));
        assert_eq!(input.file_name, "out.dat");
    }

    #[test]
    fn bare_file_name_is_its_own_base_name() {
        let input = InputFile::from_args(["cpg_plot", "out.dat"]).unwrap();
        assert_eq!(input.file_name, "out.dat");
    }

    #[test]
    fn trailing_separator_gives_empty_base_name() {
        let input = InputFile::from_args(["cpg_plot", "runs/"]).unwrap();
        assert_eq!(input.file_name, "");
    }

    #[test]
    fn usage_spans_two_lines() {
        let lines: Vec<_> = USAGE.lines().collect();
        assert_eq!(
            lines,
            vec!["Error: No file specified ", " Format: <path> <file_name>"]
        );
    }
}
