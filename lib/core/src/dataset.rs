//! Reference dataset
//!
//! Historical (or synthetic) student records, each with a profile laid out by
//! the feature schema, a course label and its career options. Built once at
//! startup and read-only afterwards.

use crate::{Error, FeatureSchema, Result, Vector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Column candidates probed, in order, when no career column is configured
pub const DEFAULT_CAREER_COLUMNS: [&str; 5] = [
    "Career Options",
    "Career Option",
    "Career_Options",
    "CareerOptions",
    "Career",
];

pub const DEFAULT_COURSE_COLUMN: &str = "Course";
pub const DEFAULT_CAREER_DELIMITER: &str = ",";

/// A single reference row
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord {
    pub features: Vector,
    pub course: String,
    pub careers: Vec<String>,
}

impl ReferenceRecord {
    pub fn new(features: Vector, course: impl Into<String>, careers: Vec<String>) -> Self {
        Self {
            features,
            course: course.into(),
            careers,
        }
    }
}

/// Career options as they appear in a dataset cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CareerOptions {
    /// A single delimited string, e.g. `"Doctor, Surgeon"`
    Delimited(String),
    /// Already a list of strings
    List(Vec<String>),
}

impl CareerOptions {
    /// Canonical ordered list: split, trimmed, non-empty, first-seen unique
    pub fn into_list(self, delimiter: &str) -> Vec<String> {
        let parts: Vec<String> = match self {
            CareerOptions::Delimited(text) => text.split(delimiter).map(str::to_string).collect(),
            CareerOptions::List(items) => items,
        };

        let mut out: Vec<String> = Vec::with_capacity(parts.len());
        for part in parts {
            let part = part.trim();
            if !part.is_empty() && !out.iter().any(|c| c == part) {
                out.push(part.to_string());
            }
        }
        out
    }

    /// Read a dataset cell; null, missing and empty values yield no careers
    pub fn from_cell(cell: Option<&Value>, delimiter: &str) -> Vec<String> {
        match cell {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => match CareerOptions::deserialize(value) {
                Ok(options) => options.into_list(delimiter),
                Err(_) => CareerOptions::Delimited(value.to_string()).into_list(delimiter),
            },
        }
    }
}

/// Column names used to read a tabular dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableLayout {
    #[serde(default = "default_course_column")]
    pub course_column: String,
    #[serde(default = "default_career_columns")]
    pub career_columns: Vec<String>,
    #[serde(default = "default_career_delimiter")]
    pub career_delimiter: String,
}

fn default_course_column() -> String {
    DEFAULT_COURSE_COLUMN.to_string()
}

fn default_career_columns() -> Vec<String> {
    DEFAULT_CAREER_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_career_delimiter() -> String {
    DEFAULT_CAREER_DELIMITER.to_string()
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            course_column: default_course_column(),
            career_columns: default_career_columns(),
            career_delimiter: default_career_delimiter(),
        }
    }
}

impl TableLayout {
    /// First configured career column present in any row
    pub fn resolve_career_column<'a>(&'a self, rows: &[Map<String, Value>]) -> Option<&'a str> {
        self.career_columns
            .iter()
            .find(|column| rows.iter().any(|row| row.contains_key(column.as_str())))
            .map(String::as_str)
    }
}

/// Numeric view of a JSON cell: numbers and numeric strings, finite only.
///
/// Values beyond the `f32` range saturate to `f32::MIN`/`f32::MAX`.
pub fn coerce_number(value: &Value) -> Option<f32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.clamp(f32::MIN as f64, f32::MAX as f64) as f32)
}

/// Rows belonging to one course, with values derived at load time
#[derive(Debug, Clone)]
pub struct CourseGroup {
    pub name: String,
    pub rows: Vec<usize>,
    /// Per-feature average of the raw (unscaled) rows
    pub centroid: Vector,
    /// Distinct non-empty careers across all rows, first-seen order
    pub careers: Vec<String>,
}

/// Immutable reference dataset with a per-course index
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    schema: FeatureSchema,
    records: Vec<ReferenceRecord>,
    courses: Vec<CourseGroup>,
    course_index: AHashMap<String, usize>,
}

impl ReferenceDataset {
    /// Build the dataset, checking every row against the schema
    pub fn new(schema: FeatureSchema, records: Vec<ReferenceRecord>) -> Result<Self> {
        for record in &records {
            schema.check(&record.features, "reference row")?;
        }

        let mut courses: Vec<CourseGroup> = Vec::new();
        let mut course_index: AHashMap<String, usize> = AHashMap::new();

        for (row, record) in records.iter().enumerate() {
            let slot = *course_index.entry(record.course.clone()).or_insert_with(|| {
                courses.push(CourseGroup {
                    name: record.course.clone(),
                    rows: Vec::new(),
                    centroid: Vector::zeros(schema.len()),
                    careers: Vec::new(),
                });
                courses.len() - 1
            });

            let group = &mut courses[slot];
            group.rows.push(row);
            for career in &record.careers {
                if !group.careers.iter().any(|c| c == career) {
                    group.careers.push(career.clone());
                }
            }
        }

        for group in &mut courses {
            if let Some(centroid) = Vector::mean_of(group.rows.iter().map(|&i| &records[i].features)) {
                group.centroid = centroid;
            }
        }

        debug!(
            rows = records.len(),
            courses = courses.len(),
            "Reference dataset indexed"
        );

        Ok(Self {
            schema,
            records,
            courses,
            course_index,
        })
    }

    /// Build the dataset from JSON records (one object per row)
    pub fn from_json_rows(
        schema: FeatureSchema,
        rows: &[Map<String, Value>],
        layout: &TableLayout,
    ) -> Result<Self> {
        let career_column = layout.resolve_career_column(rows);
        if career_column.is_none() {
            warn!(
                candidates = ?layout.career_columns,
                "No career column found in reference dataset"
            );
        }

        let mut coerced = 0usize;
        let mut records = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            let mut values = Vec::with_capacity(schema.len());
            for feature in schema.names() {
                let cell = row.get(feature).ok_or_else(|| Error::MissingFeature {
                    row: row_index,
                    feature: feature.clone(),
                })?;
                values.push(coerce_number(cell).unwrap_or_else(|| {
                    coerced += 1;
                    0.0
                }));
            }

            let course = match row.get(&layout.course_column) {
                Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(Error::MissingFeature {
                        row: row_index,
                        feature: layout.course_column.clone(),
                    })
                }
            };

            let careers = CareerOptions::from_cell(
                career_column.and_then(|column| row.get(column)),
                &layout.career_delimiter,
            );

            records.push(ReferenceRecord::new(Vector::new(values), course, careers));
        }

        if coerced > 0 {
            warn!(cells = coerced, "Non-numeric reference cells coerced to 0");
        }

        Self::new(schema, records)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Course groups in first-seen order
    pub fn courses(&self) -> &[CourseGroup] {
        &self.courses
    }

    pub fn course(&self, name: &str) -> Option<&CourseGroup> {
        self.course_index.get(name).map(|&i| &self.courses[i])
    }

    /// Position of the course in first-seen order
    pub fn course_position(&self, name: &str) -> Option<usize> {
        self.course_index.get(name).copied()
    }
}
