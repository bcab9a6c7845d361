//! Category/series name to row/column index lookups.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DataError, LookupFailure};

/// Lookup from category label to data row and from series name to data column.
///
/// Both indices are 0-based within the data region, i.e. they do not count
/// the table's header row or category column. `None` is the not-found
/// sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMapping {
    rows: HashMap<String, usize>,
    columns: HashMap<String, usize>,
}

impl IndexMapping {
    /// Build the mapping from ordered category labels and series names.
    ///
    /// Fails on duplicates: a label that occurs twice would map two rows (or
    /// columns) to the same key.
    pub fn build<C, S>(categories: &[C], series_names: &[S]) -> Result<Self, DataError>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut rows = HashMap::with_capacity(categories.len());
        for (i, c) in categories.iter().enumerate() {
            if rows.insert(c.as_ref().to_string(), i).is_some() {
                return Err(DataError::DuplicateCategory(c.as_ref().to_string()));
            }
        }
        let mut columns = HashMap::with_capacity(series_names.len());
        for (i, s) in series_names.iter().enumerate() {
            if columns.insert(s.as_ref().to_string(), i).is_some() {
                return Err(DataError::DuplicateSeries(s.as_ref().to_string()));
            }
        }
        Ok(Self { rows, columns })
    }

    /// Like [`build`](Self::build), but a repeated label keeps its first index.
    pub fn first_wins<C, S>(categories: &[C], series_names: &[S]) -> Self
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut rows = HashMap::with_capacity(categories.len());
        for (i, c) in categories.iter().enumerate() {
            rows.entry(c.as_ref().to_string()).or_insert(i);
        }
        let mut columns = HashMap::with_capacity(series_names.len());
        for (i, s) in series_names.iter().enumerate() {
            columns.entry(s.as_ref().to_string()).or_insert(i);
        }
        Self { rows, columns }
    }

    pub fn row_index_of(&self, category: &str) -> Option<usize> {
        self.rows.get(category).copied()
    }

    pub fn column_index_of(&self, series_name: &str) -> Option<usize> {
        self.columns.get(series_name).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Lazily built [`IndexMapping`] tagged with the table generation it was read from.
///
/// The cache never rebuilds itself behind the caller's back. Once filled it
/// is reused until [`invalidate`](Self::invalidate) is called; a lookup
/// against a newer table generation is a [`LookupFailure::StaleMapping`].
#[derive(Debug, Default)]
pub struct MappingCache {
    entry: Option<(u64, Rc<IndexMapping>)>,
}

impl MappingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.entry.is_some()
    }

    /// Generation of the table the cached mapping was built from.
    pub fn generation(&self) -> Option<u64> {
        self.entry.as_ref().map(|(g, _)| *g)
    }

    /// Return the cached mapping, building it with `build` on first use.
    ///
    /// `current_generation` is the generation of the table being synced.
    pub fn get_or_build<F>(
        &mut self,
        current_generation: u64,
        build: F,
    ) -> Result<Rc<IndexMapping>, LookupFailure>
    where
        F: FnOnce() -> IndexMapping,
    {
        match &self.entry {
            Some((cached, mapping)) if *cached == current_generation => Ok(Rc::clone(mapping)),
            Some((cached, _)) => Err(LookupFailure::StaleMapping {
                cached: *cached,
                current: current_generation,
            }),
            None => {
                let mapping = Rc::new(build());
                self.entry = Some((current_generation, Rc::clone(&mapping)));
                Ok(mapping)
            }
        }
    }

    /// Drop the cached mapping. The next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
