use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tag_stats::{Format, DEFAULT_COLUMN};

mod io_pipe;
use io_pipe::IoPipe;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Count all tag records.
    Count(IoArgs),

    /// Count records with exactly the given tag name.
    CountTag {
        /// Tag name to count, case-sensitive.
        name: String,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Show the most frequent tags with their counts.
    Top {
        /// Number of tags to show.
        #[arg(short, default_value = "3")]
        n: usize,

        /// Show every tag instead of the top n.
        #[arg(long)]
        all: bool,

        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormat,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Print the total count, the count for one tag and the top tags.
    Report {
        /// Tag name to count separately.
        #[arg(long, default_value = "Adventure")]
        tag: String,

        /// Number of top tags to show.
        #[arg(short, default_value = "3")]
        n: usize,

        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormat,

        #[command(flatten)]
        io: IoArgs,
    },
}

use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Count(args) => count(args.try_into()?),

        CountTag { name, io } => count_tag(&name, io.try_into()?),

        Top {
            n,
            all,
            output_format,
            io,
        } => top::run(n, all, output_format, io.try_into()?),

        Report {
            tag,
            n,
            output_format,
            io,
        } => report::run(&tag, n, output_format, io.try_into()?),
    }
}

fn count(io: IoPipe) -> Result<()> {
    let records = io.read_records()?;
    io.write_text(format!("{}\n", tag_stats::count_all(&records)))
}

fn count_tag(name: &str, io: IoPipe) -> Result<()> {
    let records = io.read_records()?;
    io.write_text(format!("{}\n", tag_stats::count_by_name(&records, name)))
}

mod report;
mod top;

/// Standard input/output specification for subcommands.
///
/// By default the subcommand reads from stdin and writes to stdout, this
/// allows pointing to files instead.
#[derive(Debug, Args, Clone)]
pub struct IoArgs {
    /// Input file path, defaults to stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file path, defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input record format, guessed from the input file extension when not
    /// given.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// CSV column that holds the tag name. MovieLens exports call it `tag`.
    #[arg(long, default_value = DEFAULT_COLUMN)]
    column: String,
}

#[cfg(test)]
impl IoArgs {
    /// Read `input` with the default column, write to `output`.
    pub fn files(input: PathBuf, output: Option<PathBuf>) -> Self {
        IoArgs {
            input,
            output,
            format: None,
            column: DEFAULT_COLUMN.to_owned(),
        }
    }
}

/// How results are printed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text.
    #[default]
    Text,
    /// CSV with a header row.
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        let cli = Cli::try_parse_from(["tag-stats", "count-tag", "Drama"])
            .unwrap();
        let CountTag { name, io } = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(name, "Drama");
        assert_eq!(io.input, PathBuf::from("-"));
        assert_eq!(io.column, "tag_name");
        assert_eq!(io.format, None);

        let cli = Cli::try_parse_from([
            "tag-stats",
            "top",
            "-n",
            "5",
            "--output-format",
            "csv",
            "--column",
            "tag",
            "tags.csv",
        ])
        .unwrap();
        let Top {
            n,
            all,
            output_format,
            io,
        } = cli.command
        else {
            panic!("wrong subcommand");
        };
        assert_eq!(n, 5);
        assert!(!all);
        assert_eq!(output_format, OutputFormat::Csv);
        assert_eq!(io.input, PathBuf::from("tags.csv"));
        assert_eq!(io.column, "tag");
    }

    #[test]
    fn test_report_defaults() {
        let cli =
            Cli::try_parse_from(["tag-stats", "report", "--format", "lines"])
                .unwrap();
        let Report {
            tag,
            n,
            output_format,
            io,
        } = cli.command
        else {
            panic!("wrong subcommand");
        };
        assert_eq!(tag, "Adventure");
        assert_eq!(n, 3);
        assert_eq!(output_format, OutputFormat::Text);
        assert_eq!(io.format, Some(Format::Lines));
    }

    #[test]
    fn test_count_commands() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tags.csv");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "tag_name\nDrama\nAdventure\nDrama\n")
            .unwrap();

        let io = IoArgs::files(input.clone(), Some(output.clone()));
        count(io.try_into().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "3\n");

        let io = IoArgs::files(input.clone(), Some(output.clone()));
        count_tag("Drama", io.try_into().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "2\n");

        let io = IoArgs::files(input, Some(output.clone()));
        count_tag("drama", io.try_into().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "0\n");
    }

    #[test]
    fn test_count_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tags.csv");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "").unwrap();

        let io = IoArgs::files(input.clone(), Some(output.clone()));
        count(io.try_into().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "0\n");

        let io = IoArgs::files(input, Some(output.clone()));
        count_tag("Adventure", io.try_into().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "0\n");
    }

    #[test]
    fn test_negative_n_rejected() {
        assert!(Cli::try_parse_from(["tag-stats", "top", "-n", "-1"]).is_err());
    }
}
