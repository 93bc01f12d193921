use anyhow::Result;
use serde::Serialize;
use tag_stats::Report;

use crate::{IoPipe, OutputFormat};

pub fn run(
    tag: &str,
    n: usize,
    output_format: OutputFormat,
    io: IoPipe,
) -> Result<()> {
    let records = io.read_records()?;
    let report = Report::new(&records, tag, n);
    log::debug!("report: {report:?}");
    io.write_text(format(&report, output_format)?)
}

/// One line of CSV report output.
#[derive(Serialize)]
struct Row<'a> {
    query: &'a str,
    tag_name: &'a str,
    count: usize,
}

fn format(report: &Report, output_format: OutputFormat) -> Result<String> {
    match output_format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            {
                let mut wtr = csv::Writer::from_writer(&mut buf);
                wtr.serialize(Row {
                    query: "total",
                    tag_name: "",
                    count: report.total,
                })?;
                wtr.serialize(Row {
                    query: "tag",
                    tag_name: &report.tag_name,
                    count: report.tag_count,
                })?;
                for (tag, n) in &report.top {
                    wtr.serialize(Row {
                        query: "top",
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
