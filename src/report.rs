use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::{OutputRow, Result};

const HEADER: &str = "title,link,email,phone,entity";

/// Serializes grouped records to the output CSV.
///
/// Batch runs truncate and write everything once at the end; indefinite runs
/// write the header up front and append the current snapshot after every
/// processed page, so an interrupt loses nothing. The mutex serializes file
/// access across engine tasks.
pub struct Reporter {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl Reporter {
    pub fn create(requested: &str, indefinite: bool) -> Result<Self> {
        let path = unique_path(requested);
        if indefinite {
            let mut file = File::create(&path)?;
            writeln!(file, "{}", HEADER)?;
        }
        Ok(Self {
            path,
            io_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncates the file and writes header plus all rows.
    pub fn write_batch(&self, rows: &[OutputRow]) -> Result<()> {
        let _guard = self.io_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = File::create(&self.path)?;
        writeln!(file, "{}", HEADER)?;
        write_rows(&mut file, rows)?;
        Ok(())
    }

    /// Appends the current snapshot; the header was written at creation.
    pub fn append_snapshot(&self, rows: &[OutputRow]) -> Result<()> {
        let _guard = self.io_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        write_rows(&mut file, rows)?;
        Ok(())
    }
}

fn write_rows<W: Write>(writer: &mut W, rows: &[OutputRow]) -> Result<()> {
    for row in rows {
        writeln!(writer, "{}", format_row(row))?;
    }
    Ok(())
}

fn format_row(row: &OutputRow) -> String {
    let entities: Vec<String> = row
        .entities
        .iter()
        .map(|hit| format!("{} ({})", hit.text, hit.label))
        .collect();
    [
        csv_field(&row.title),
        csv_field(&row.link),
        csv_field(&row.emails.join("; ")),
        csv_field(&row.phones.join("; ")),
        csv_field(&entities.join("; ")),
    ]
    .join(",")
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Never clobber an earlier run: an existing file gets a timestamp suffix.
fn unique_path(requested: &str) -> PathBuf {
    let path = PathBuf::from(requested);
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("leads");
    let stamped = format!(
        "{}_{}.csv",
        stem,
        chrono::Local::now().format("%Y%m%d%H%M%S")
    );
    path.with_file_name(stamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityHit;

    fn sample_row() -> OutputRow {
        OutputRow {
            title: "Widgets, Inc.".to_string(),
            link: "http://widgets.test/".to_string(),
            emails: vec!["a@widgets.test".to_string(), "b@widgets.test".to_string()],
            phones: vec!["(202) 555-0199".to_string()],
            entities: vec![EntityHit {
                text: "Bob Smith".to_string(),
                label: "PERSON".to_string(),
            }],
        }
    }

    #[test]
    fn rows_join_lists_with_semicolons() {
        let line = format_row(&sample_row());
        assert_eq!(
            line,
            r#""Widgets, Inc.",http://widgets.test/,a@widgets.test; b@widgets.test,(202) 555-0199,Bob Smith (PERSON)"#
        );
    }

    #[test]
    fn fields_with_quotes_are_escaped() {
        assert_eq!(csv_field(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn batch_write_then_reread() {
        let path = std::env::temp_dir().join(format!(
            "lead_harvester_report_{}.csv",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let reporter = Reporter::create(path.to_str().unwrap(), false).unwrap();
        reporter.write_batch(&[sample_row()]).unwrap();

        let content = std::fs::read_to_string(reporter.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert!(lines.next().unwrap().contains("a@widgets.test; b@widgets.test"));
        assert_eq!(lines.next(), None);

        let _ = std::fs::remove_file(reporter.path());
    }

    #[test]
    fn existing_output_gets_a_timestamped_name() {
        let path = std::env::temp_dir().join(format!(
            "lead_harvester_existing_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "old").unwrap();

        let fresh = unique_path(path.to_str().unwrap());
        assert_ne!(fresh, path);
        assert!(fresh.to_str().unwrap().ends_with(".csv"));

        let _ = std::fs::remove_file(&path);
    }
}
