//! Rendering command results as tables, JSON or CSV.

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A titled block of rows.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Two-column label/value block.
    pub fn key_values(title: impl Into<String>, pairs: Vec<(&str, String)>) -> Self {
        let mut section = Self::new(title, &["Metric", "Value"]);
        for (key, value) in pairs {
            section.row(vec![key.to_string(), value]);
        }
        section
    }
}

/// Formats an amount with two decimals.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats a fraction as a percentage.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Writes sections in the chosen format; JSON output is `payload` instead.
pub fn emit<T: Serialize>(format: OutputFormat, sections: &[Section], payload: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, payload)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, sections)?,
        OutputFormat::Table => {
            for section in sections {
                write!(out, "{}", render_table(section))?;
            }
        }
    }
    Ok(())
}

fn write_csv<W: Write>(out: W, sections: &[Section]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            writer.write_record([""])?;
        }
        writer.write_record(&section.headers)?;
        for row in &section.rows {
            writer.write_record(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Box-drawn table with a title line.
pub fn render_table(section: &Section) -> String {
    let placeholder = vec!["(no data)".to_string()];
    let body = if section.rows.is_empty() {
        std::slice::from_ref(&placeholder)
    } else {
        section.rows.as_slice()
    };

    let mut widths: Vec<usize> = section.headers.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let line = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let cells = |values: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let value = values.get(i).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", value, width = w)
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = String::new();
    if !section.title.is_empty() {
        out.push_str(&format!("\n{}\n", section.title));
    }
    out.push_str(&line("┌", "┬", "┐"));
    out.push_str(&cells(&section.headers));
    out.push_str(&line("├", "┼", "┤"));
    for row in body {
        out.push_str(&cells(row));
    }
    out.push_str(&line("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Section {
        let mut section = Section::new("Trades", &["Trade ID", "MTM"]);
        section.row(vec!["T1".to_string(), money(500.0)]);
        section.row(vec!["LONG-ID".to_string(), money(-12.345)]);
        section
    }

    #[test]
    fn test_table_columns_are_aligned() {
        let rendered = render_table(&sample());
        let lines: Vec<&str> = rendered.lines().filter(|l| l.starts_with('│')).collect();
        assert_eq!(lines.len(), 3);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(rendered.contains("-12.35") || rendered.contains("-12.34"));
    }

    #[test]
    fn test_empty_table_placeholder() {
        let rendered = render_table(&Section::new("", &["Trade ID"]));
        assert!(rendered.contains("(no data)"));
        assert!(!rendered.starts_with('\n'));
    }

    #[test]
    fn test_csv_sections() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[sample(), Section::key_values("Totals", vec![("MTM", money(1.0))])])
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Trade ID,MTM");
        assert_eq!(lines[1], "T1,500.00");
        assert!(lines.contains(&"Metric,Value"));
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(money(1234.5), "1234.50");
        assert_eq!(percent(-0.2), "-20.00%");
    }
}
