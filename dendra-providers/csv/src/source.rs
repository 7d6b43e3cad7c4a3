//! In-memory stat table loaded from CSV.
use std::{fs::File, io::Read, path::Path};

use dendra_core::{Point, project};
use tracing::{info, instrument};

use crate::errors::StatSourceError;
use crate::record::{StatRecord, offense_defense};

/// Stat records loaded from a CSV file with a header row.
#[derive(Clone, Debug)]
pub struct StatSource {
    name: String,
    records: Vec<StatRecord>,
}

impl StatSource {
    /// Wraps already-parsed records.
    ///
    /// # Errors
    /// Returns [`StatSourceError::EmptyInput`] when `records` is empty.
    pub fn try_new(
        name: impl Into<String>,
        records: Vec<StatRecord>,
    ) -> Result<Self, StatSourceError> {
        let name = name.into();
        if records.is_empty() {
            return Err(StatSourceError::EmptyInput { name });
        }
        Ok(Self { name, records })
    }

    /// Parses every record from `reader`.
    ///
    /// Surrounding whitespace in fields is ignored and an empty `Type 2`
    /// column is read as `None`.
    ///
    /// # Errors
    /// Returns [`StatSourceError::Csv`] for malformed rows and
    /// [`StatSourceError::EmptyInput`] when no records follow the header.
    ///
    /// # Examples
    /// ```
    /// use dendra_providers_csv::StatSource;
    ///
    /// let csv = "\
    /// #,Name,Type 1,Type 2,Total,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed
    /// 4,Charmander,Fire,,309,39,52,43,60,50,65
    /// ";
    /// let source = StatSource::try_from_reader("inline", csv.as_bytes())?;
    /// assert_eq!(source.len(), 1);
    /// assert_eq!(source.records()[0].secondary_type, None);
    /// # Ok::<(), dendra_providers_csv::StatSourceError>(())
    /// ```
    #[instrument(name = "providers.csv.load", err, skip(name, reader))]
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, StatSourceError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = csv
            .deserialize::<StatRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        let source = Self::try_new(name, records)?;
        info!(source = %source.name, records = source.len(), "stat records loaded");
        Ok(source)
    }

    /// Opens `path` and parses it with [`Self::try_from_reader`].
    ///
    /// # Errors
    /// Returns [`StatSourceError::Io`] when the file cannot be opened, plus
    /// the errors of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, StatSourceError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, file)
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; sources hold at least one record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns every record in file order.
    #[must_use]
    pub fn records(&self) -> &[StatRecord] {
        &self.records
    }

    /// Returns the `count` records starting at `base`.
    ///
    /// # Errors
    /// Returns [`StatSourceError::RangeOutOfBounds`] when the range extends
    /// past the last record.
    pub fn select(&self, base: usize, count: usize) -> Result<&[StatRecord], StatSourceError> {
        base.checked_add(count)
            .and_then(|end| self.records.get(base..end))
            .ok_or(StatSourceError::RangeOutOfBounds {
                base,
                count,
                len: self.records.len(),
            })
    }

    /// Reduces the selected records with [`offense_defense`].
    ///
    /// # Errors
    /// Same as [`Self::select`].
    pub fn points(&self, base: usize, count: usize) -> Result<Vec<Point>, StatSourceError> {
        let selected = self.select(base, count)?;
        Ok(project(selected, offense_defense))
    }
}
