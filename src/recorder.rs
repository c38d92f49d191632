use std::io::Write;

use crate::error::{SimError, SimResult};
use crate::models::spacecraft::Spacecraft;

/// Keyed time series of named observables for one spacecraft. One row is
/// appended per simulation step; "Datetime" is always the first column.
/// Consumed by visualization outside the core, so export goes through CSV.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    observables: Vec<String>,
    headers: Vec<String>,
    datetimes: Vec<String>,
    samples: Vec<Vec<f64>>,
}

impl Recorder {
    pub fn new(observables: &[&str]) -> Self {
        Recorder {
            observables: observables.iter().map(|s| s.to_string()).collect(),
            headers: Vec::new(),
            datetimes: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Append one row: the timestamp plus the current value of every tracked
    /// observable, resolved through the body's accessor. The flattened
    /// column layout is fixed by the first update.
    pub fn update(&mut self, datetime: &str, body: &Spacecraft) -> SimResult<()> {
        let mut headers = Vec::new();
        let mut row = Vec::new();

        for name in &self.observables {
            let parts = body
                .observable(name)
                .ok_or_else(|| SimError::UnknownObservable(name.clone()))?;
            for (column, value) in parts {
                headers.push(column);
                row.push(value);
            }
        }

        if self.headers.is_empty() {
            self.headers = headers;
        }
        self.datetimes.push(datetime.to_string());
        self.samples.push(row);
        Ok(())
    }

    /// Number of appended rows.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Column headers in write order, "Datetime" first.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec!["Datetime".to_string()];
        columns.extend(self.headers.iter().cloned());
        columns
    }

    pub fn datetimes(&self) -> &[String] {
        &self.datetimes
    }

    /// The recorded series for one flattened column header.
    pub fn series(&self, header: &str) -> Option<Vec<f64>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.samples.iter().map(|row| row[index]).collect())
    }

    /// Write the whole time series as CSV, "Datetime" first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.columns())?;
        for (datetime, row) in self.datetimes.iter().zip(self.samples.iter()) {
            let mut record = vec![datetime.clone()];
            record.extend(row.iter().map(|v| v.to_string()));
            out.write_record(&record)?;
        }
        out.flush()?;
        Ok(())
    }
}
