//! Datasets: the categories and named series both the chart and the table are built from.
//!
//! Datasets can be saved to and loaded from JSON or YAML files. The format is
//! picked from the file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// One named series with one value per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub name: String,
    pub data: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Ordered categories (x axis / table rows) and series (chart lines / table columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
}

/// On-disk encoding of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl DataSet {
    /// Build and validate a dataset.
    pub fn new(categories: Vec<String>, series: Vec<SeriesData>) -> Result<Self> {
        let ds = Self {
            title: None,
            categories,
            series,
        };
        ds.validate()?;
        Ok(ds)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check the invariants the sync bridge relies on: unique categories,
    /// unique series names and exactly one value per category in every series.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(DataError::Empty("categories"));
        }
        if self.series.is_empty() {
            return Err(DataError::Empty("series"));
        }
        for (i, c) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(c) {
                return Err(DataError::DuplicateCategory(c.clone()));
            }
        }
        for (i, s) in self.series.iter().enumerate() {
            if self.series[..i].iter().any(|o| o.name == s.name) {
                return Err(DataError::DuplicateSeries(s.name.clone()));
            }
            if s.data.len() != self.categories.len() {
                return Err(DataError::RaggedSeries {
                    series: s.name.clone(),
                    expected: self.categories.len(),
                    found: s.data.len(),
                });
            }
        }
        Ok(())
    }

    pub fn series_names(&self) -> Vec<String> {
        self.series.iter().map(|s| s.name.clone()).collect()
    }

    pub fn value(&self, series: usize, index: usize) -> Option<f64> {
        self.series.get(series)?.data.get(index).copied()
    }

    /// Parse a dataset from a string in the given format and validate it.
    pub fn from_str_as(s: &str, format: DataFormat) -> Result<Self> {
        let ds: DataSet = match format {
            DataFormat::Json => serde_json::from_str(s)?,
            DataFormat::Yaml => serde_yaml::from_str(s)?,
        };
        ds.validate()?;
        Ok(ds)
    }

    /// Serialize the dataset in the given format.
    pub fn to_string_as(&self, format: DataFormat) -> Result<String> {
        Ok(match format {
            DataFormat::Json => serde_json::to_string_pretty(self)?,
            DataFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Load a dataset from a `.json`, `.yaml` or `.yml` file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path)?;
        let s = std::fs::read_to_string(path)?;
        let ds = Self::from_str_as(&s, format)?;
        log::info!(
            "loaded dataset {:?}: {} categories, {} series",
            path,
            ds.categories.len(),
            ds.series.len()
        );
        Ok(ds)
    }

    /// Save the dataset to a `.json`, `.yaml` or `.yml` file.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let format = DataFormat::from_path(path)?;
        std::fs::write(path, self.to_string_as(format)?)?;
        Ok(())
    }

    /// Solar employment by sector and country, 2010-2016.
    pub fn solar_employment() -> Self {
        let categories = ["NL", "ES", "DE", "BE", "NO", "UK", "IR", "CH"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let series = vec![
            SeriesData::new(
                "Installation",
                vec![
                    43934.0, 52503.0, 57177.0, 69658.0, 97031.0, 119931.0, 137133.0, 154175.0,
                ],
            ),
            SeriesData::new(
                "Manufacturing",
                vec![
                    24916.0, 24064.0, 150000.0, 175000.0, 132490.0, 30282.0, 38121.0, 40434.0,
                ],
            ),
            SeriesData::new(
                "Distribution",
                vec![
                    11744.0, 17722.0, 16005.0, 19771.0, 20185.0, 24377.0, 32147.0, 39387.0,
                ],
            ),
        ];
        Self {
            title: Some("Solar Employment Growth by Sector, 2010-2016".to_string()),
            categories,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_dataset_is_valid() {
        let ds = DataSet::solar_employment();
        ds.validate().unwrap();
        assert_eq!(ds.series_names(), ["Installation", "Manufacturing", "Distribution"]);
        assert_eq!(ds.value(1, 2), Some(150000.0));
        assert_eq!(ds.value(3, 0), None);
    }

    #[test]
    fn ragged_series_rejected() {
        let err = DataSet::new(
            vec!["a".into(), "b".into()],
            vec![SeriesData::new("s", vec![1.0])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DataError::RaggedSeries {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = DataSet::new(
            vec!["a".into(), "a".into()],
            vec![SeriesData::new("s", vec![1.0, 2.0])],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateCategory(_)));

        let err = DataSet::new(
            vec!["a".into()],
            vec![SeriesData::new("s", vec![1.0]), SeriesData::new("s", vec![2.0])],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateSeries(_)));
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            DataSet::new(vec![], vec![]).unwrap_err(),
            DataError::Empty("categories")
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.JSON")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a.yml")).unwrap(), DataFormat::Yaml);
        assert!(DataFormat::from_path(Path::new("a.csv")).is_err());
    }

    #[test]
    fn yaml_without_title_parses() {
        let s = "categories: [NL, ES]\nseries:\n  - name: A\n    data: [1, 2]\n";
        let ds = DataSet::from_str_as(s, DataFormat::Yaml).unwrap();
        assert_eq!(ds.title, None);
        assert_eq!(ds.value(0, 1), Some(2.0));
    }
}
