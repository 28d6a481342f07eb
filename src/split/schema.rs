use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use csv::StringRecord;
use log::{debug, warn};

use crate::error::{ColumnKind, Error, Result};

/// Accepted names for the id column, in priority order.
pub const ID_CANDIDATES: &[&str] = &["ID", "id", "image_id"];

/// Accepted names for the label column, in priority order.
pub const LABEL_CANDIDATES: &[&str] = &["label", "Label", "target"];

/// Positions of the id and label columns within a header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub id_name: &'static str,
    pub id_index: usize,
    pub label_name: &'static str,
    pub label_index: usize,
}

fn find_column(
    headers: &StringRecord,
    kind: ColumnKind,
    candidates: &'static [&'static str],
) -> Result<(&'static str, usize)> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name).map(|i| (*name, i)))
        .ok_or(Error::Schema { kind, candidates })
}

/// Find the id and label columns in a header row.
///
/// The first candidate present in the header wins, regardless of column order.
pub fn identify_columns(headers: &StringRecord) -> Result<ColumnMap> {
    let (id_name, id_index) = find_column(headers, ColumnKind::Id, ID_CANDIDATES)?;
    let (label_name, label_index) = find_column(headers, ColumnKind::Label, LABEL_CANDIDATES)?;
    debug!("Using '{id_name}' as id column and '{label_name}' as label column");
    Ok(ColumnMap {
        id_name,
        id_index,
        label_name,
        label_index,
    })
}

/// A row identifier.
///
/// The raw text is always kept so it can be written back unchanged. When
/// every id in a column is an integer the ids sort numerically, otherwise
/// they sort as strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowId {
    raw: String,
    numeric: Option<i64>,
}

impl RowId {
    /// Build the ids for a whole column, deciding once whether it is numeric.
    pub fn column(raw: Vec<String>) -> Vec<RowId> {
        let parsed: Vec<Option<i64>> = raw.iter().map(|r| r.trim().parse().ok()).collect();
        let numeric = parsed.iter().filter(|n| n.is_some()).count();
        if numeric == raw.len() {
            return raw
                .into_iter()
                .zip(parsed)
                .map(|(raw, numeric)| RowId { raw, numeric })
                .collect();
        }
        if numeric > 0 {
            warn!(
                "{} of {} ids are not integers, sorting all ids as text",
                raw.len() - numeric,
                raw.len()
            );
        }
        raw.into_iter()
            .map(|raw| RowId { raw, numeric: None })
            .collect()
    }

    /// The value two ids are compared on when looking for duplicates.
    fn key(&self) -> IdKey<'_> {
        match self.numeric {
            Some(n) => IdKey::Numeric(n),
            None => IdKey::Text(&self.raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }
}

#[derive(PartialEq, Eq, Hash)]
enum IdKey<'a> {
    Numeric(i64),
    Text(&'a str),
}

impl Ord for RowId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.raw.cmp(&other.raw)),
            _ => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for RowId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A ground truth label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    Real,
    Fake,
    Unknown(String),
}

impl Label {
    /// Parse a label, ignoring case.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "real" => Label::Real,
            "fake" => Label::Fake,
            _ => Label::Unknown(raw.to_string()),
        }
    }
}

/// A row in the canonical `id,real,fake` schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalRow {
    pub id: RowId,
    pub real: u8,
    pub fake: u8,
}

impl CanonicalRow {
    pub fn new(id: RowId, label: &Label) -> Self {
        CanonicalRow {
            id,
            real: u8::from(*label == Label::Real),
            fake: u8::from(*label == Label::Fake),
        }
    }
}

/// Convert raw records into canonical rows, one per record and in input order.
///
/// Labels other than `real` or `fake` become `real=0, fake=0` unless
/// `strict_labels` is set, in which case the first one is an error.
pub fn normalize<I>(records: I, columns: &ColumnMap, strict_labels: bool) -> Result<Vec<CanonicalRow>>
where
    I: IntoIterator<Item = csv::Result<StringRecord>>,
{
    let mut ids = Vec::new();
    let mut labels = Vec::new();
    let mut unknown = 0usize;
    for (i, record) in records.into_iter().enumerate() {
        let record = record?;
        // Header is line 1, so the first record is line 2.
        let line = record.position().map_or(i as u64 + 2, |p| p.line());
        let id = record.get(columns.id_index).unwrap_or_default();
        if id.trim().is_empty() {
            return Err(Error::EmptyId { line });
        }
        let raw_label = record.get(columns.label_index).unwrap_or_default();
        let label = Label::parse(raw_label);
        if let Label::Unknown(label) = &label {
            if strict_labels {
                return Err(Error::UnknownLabel {
                    line,
                    label: label.clone(),
                });
            }
            unknown += 1;
        }
        ids.push(id.to_string());
        labels.push(label);
    }

    if unknown > 0 {
        warn!(
            "{unknown} row(s) have a label other than 'real' or 'fake' and will be written with real=0, fake=0"
        );
    }

    let ids = RowId::column(ids);
    {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.key()) {
                return Err(Error::DuplicateId(id.raw.clone()));
            }
        }
    }

    Ok(ids
        .into_iter()
        .zip(labels.iter())
        .map(|(id, label)| CanonicalRow::new(id, label))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    fn records(rows: &[&[&str]]) -> Vec<csv::Result<StringRecord>> {
        rows.iter().map(|r| Ok(StringRecord::from(r.to_vec()))).collect()
    }

    fn id_label_columns() -> ColumnMap {
        identify_columns(&header(&["id", "label"])).unwrap()
    }

    #[test]
    fn id_priority() {
        let columns = identify_columns(&header(&["image_id", "id", "ID", "label"])).unwrap();
        assert_eq!(columns.id_name, "ID");
        assert_eq!(columns.id_index, 2);

        let columns = identify_columns(&header(&["image_id", "id", "label"])).unwrap();
        assert_eq!(columns.id_name, "id");
        assert_eq!(columns.id_index, 1);

        let columns = identify_columns(&header(&["label", "image_id"])).unwrap();
        assert_eq!(columns.id_name, "image_id");
    }

    #[test]
    fn label_priority() {
        let columns = identify_columns(&header(&["target", "Label", "label", "id"])).unwrap();
        assert_eq!(columns.label_name, "label");
        assert_eq!(columns.label_index, 2);

        let columns = identify_columns(&header(&["target", "Label", "id"])).unwrap();
        assert_eq!(columns.label_name, "Label");

        let columns = identify_columns(&header(&["id", "target"])).unwrap();
        assert_eq!(columns.label_name, "target");
        assert_eq!(columns.label_index, 1);
    }

    #[test]
    fn missing_columns() {
        let err = identify_columns(&header(&["name", "class"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema {
                kind: ColumnKind::Id,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "unable to find an ID column. Supported column names: ID, id, image_id"
        );

        let err = identify_columns(&header(&["id", "class"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to find a label column. Supported column names: label, Label, target"
        );

        assert!(identify_columns(&StringRecord::new()).is_err());
    }

    #[test]
    fn labels_ignore_case() {
        let rows = normalize(
            records(&[&["1", "REAL"], &["2", "Fake"], &["3", "real"], &["4", "fAkE"]]),
            &id_label_columns(),
            false,
        )
        .unwrap();
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.real + row.fake, 1);
        }
        assert_eq!((rows[0].real, rows[0].fake), (1, 0));
        assert_eq!((rows[1].real, rows[1].fake), (0, 1));
    }

    #[test]
    fn unknown_labels_pass_through() {
        let rows = normalize(
            records(&[&["1", "real"], &["2", "maybe"]]),
            &id_label_columns(),
            false,
        )
        .unwrap();
        assert_eq!((rows[1].real, rows[1].fake), (0, 0));
    }

    #[test]
    fn unknown_labels_strict() {
        let err = normalize(
            records(&[&["1", "real"], &["2", "maybe"]]),
            &id_label_columns(),
            true,
        )
        .unwrap_err();
        match err {
            Error::UnknownLabel { line, label } => {
                assert_eq!(line, 3);
                assert_eq!(label, "maybe");
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn duplicate_ids() {
        let err = normalize(
            records(&[&["a", "real"], &["b", "fake"], &["a", "fake"]]),
            &id_label_columns(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn padded_numeric_duplicates() {
        let err = normalize(
            records(&[&["7", "real"], &["8", "fake"], &["007", "fake"]]),
            &id_label_columns(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "007"));

        let err = normalize(
            records(&[&["7", "real"], &[" 7", "fake"]]),
            &id_label_columns(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateId(_)));
    }

    #[test]
    fn padded_text_ids_are_distinct() {
        let rows = normalize(
            records(&[&["a7", "real"], &["007", "fake"], &["7", "fake"]]),
            &id_label_columns(),
            false,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn empty_id_among_integers() {
        let mut rows: Vec<Vec<String>> = (1..=12)
            .map(|i| vec![i.to_string(), "real".to_string()])
            .collect();
        rows.push(vec![String::new(), "fake".to_string()]);
        let integer_records = rows.iter().map(|r| Ok(StringRecord::from(r.clone())));

        let err = normalize(integer_records, &id_label_columns(), false).unwrap_err();
        assert!(matches!(err, Error::EmptyId { line: 14 }));

        let err = normalize(
            records(&[&["1", "real"], &["  ", "fake"]]),
            &id_label_columns(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyId { line: 3 }));
    }

    #[test]
    fn keeps_input_order() {
        let rows = normalize(
            records(&[&["3", "real"], &["1", "fake"], &["2", "real"]]),
            &id_label_columns(),
            false,
        )
        .unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut ids = RowId::column(vec!["10".into(), "9".into(), "100".into()]);
        assert!(ids.iter().all(RowId::is_numeric));
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(RowId::as_str).collect();
        assert_eq!(ids, vec!["9", "10", "100"]);
    }

    #[test]
    fn mixed_ids_sort_as_text() {
        let mut ids = RowId::column(vec!["10".into(), "9".into(), "img_1".into()]);
        assert!(!ids.iter().any(RowId::is_numeric));
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(RowId::as_str).collect();
        assert_eq!(ids, vec!["10", "9", "img_1"]);
    }
}
