use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use tag_stats::{Format, TagRecord};

use crate::IoArgs;

/// Structure that abstracts the input and output of subcommands.
///
/// Input is a record file or stdin, output is a file or stdout.
pub struct IoPipe {
    source: Source,
    dest: PathBuf,
    format: Format,
    column: String,
}

impl IoPipe {
    pub fn read_text(&self) -> &str {
        match &self.source {
            Source::Stdin(content) | Source::File { content, .. } => content,
        }
    }

    pub fn read_records(&self) -> Result<Vec<TagRecord>> {
        let records = tag_stats::read_records(
            self.read_text(),
            self.format,
            &self.column,
        )
        .with_context(|| format!("failed to read {}", self.origin()))?;
        log::info!(
            "Read {} tag records from {}",
            records.len(),
            self.origin()
        );
        Ok(records)
    }

    pub fn write_text(&self, output: impl AsRef<str>) -> Result<()> {
        if self.dest.to_str() == Some("-") {
            print!("{}", output.as_ref());
        } else if self.dest.is_dir() {
            bail!("Cannot write text to a directory");
        } else {
            std::fs::write(&self.dest, output.as_ref())?;
        }
        Ok(())
    }

    fn origin(&self) -> String {
        match &self.source {
            Source::Stdin(_) => "stdin".to_owned(),
            Source::File { path, .. } => format!("{path:?}"),
        }
    }
}

impl TryFrom<IoArgs> for IoPipe {
    type Error = anyhow::Error;

    fn try_from(value: IoArgs) -> Result<Self> {
        let source = if value.input.to_str() == Some("-") {
            // Read stdin to string.
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Source::Stdin(input)
        } else if value.input.is_file() {
            let content = std::fs::read_to_string(&value.input)?;
            Source::File {
                path: value.input.clone(),
                content,
            }
        } else {
            bail!("Input {:?} is not a file", value.input);
        };

        let format = value
            .format
            .unwrap_or_else(|| Format::detect(&value.input));
        log::debug!("Input format {format:?}, tag column {:?}", value.column);

        let dest = value.output.unwrap_or_else(|| PathBuf::from("-"));

        Ok(IoPipe {
            source,
            dest,
            format,
            column: value.column,
        })
    }
}

enum Source {
    Stdin(String),
    File { path: PathBuf, content: String },
}
