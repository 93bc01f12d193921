use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use crate::{IoPipe, OutputFormat};

pub fn run(
    n: usize,
    all: bool,
    output_format: OutputFormat,
    io: IoPipe,
) -> Result<()> {
    let records = io.read_records()?;

    let hist = if all {
        tag_stats::tag_counts(&records).ranked()
    } else {
        tag_stats::top_n(&records, n)
    };

    io.write_text(histogram(&hist, output_format)?)
}

#[derive(Serialize)]
struct Row<'a> {
    tag_name: &'a str,
    count: usize,
}

/// Format a tag histogram.
pub fn histogram(
    hist: &[(String, usize)],
    output_format: OutputFormat,
) -> Result<String> {
    match output_format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (tag, n) in hist {
                writeln!(out, "{tag:32} {n}")?;
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            {
                // Write the header by hand so that an empty histogram still
                // gets one.
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(&mut buf);
                wtr.write_record(["tag_name", "count"])?;
                for (tag, n) in hist {
                    wtr.serialize(Row {
                        tag_name: tag,
                        count: *n,
                    })?;
                }
                wtr.flush()?;
            }
            Ok(String::from_utf8(buf)?)
        }
    }
}
