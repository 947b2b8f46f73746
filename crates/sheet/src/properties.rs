//! Core document properties (`docProps/core.xml`) of OOXML workbooks.
//!
//! calamine exposes cell data only, so the creation and modification
//! timestamps are read straight from the package. Anything that is not a zip
//! package with a parsable `core.xml` yields absent timestamps.

use crate::book::Metadata;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

#[derive(Clone, Copy)]
enum Field {
    Created,
    Modified,
}

/// Read the creation and modification timestamps of a workbook file.
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Metadata {
    let path = path.as_ref();
    match read_core_xml(path) {
        Some(xml) => parse_core_properties(&xml),
        None => {
            tracing::debug!("No core properties in {}", path.display());
            Metadata::default()
        }
    }
}

fn read_core_xml(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut archive = ZipArchive::new(file).ok()?;
    let mut part = archive.by_name(CORE_PROPERTIES_PART).ok()?;

    let mut content = String::new();
    part.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Parse `dcterms:created` / `dcterms:modified` out of a core properties part.
///
/// ```
/// let xml = r#"<cp:coreProperties xmlns:cp="c" xmlns:dcterms="d">
///   <dcterms:created>2024-01-15T10:30:00Z</dcterms:created>
/// </cp:coreProperties>"#;
/// let meta = xlsim_sheet::parse_core_properties(xml);
/// assert!(meta.created.is_some());
/// assert!(meta.modified.is_none());
/// ```
#[must_use]
pub fn parse_core_properties(xml: &str) -> Metadata {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<Field> = None;
    let mut metadata = Metadata::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = match e.local_name().as_ref() {
                    b"created" => Some(Field::Created),
                    b"modified" => Some(Field::Modified),
                    _ => None,
                };
            }
            Ok(Event::Text(e)) => {
                let Some(field) = current else { continue };
                let Ok(text) = e.unescape() else { continue };
                let parsed = parse_datetime(text.trim());
                match field {
                    Field::Created => metadata.created = parsed,
                    Field::Modified => metadata.modified = parsed,
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("Malformed core properties: {e}");
                break;
            }
            _ => {}
        }
    }

    metadata
}

/// W3CDTF timestamps, e.g. `2024-01-15T10:30:00Z`
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
