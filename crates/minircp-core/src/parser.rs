// Events file parser
//
// The badge system delivers a semicolon-delimited text file with no declared
// encoding; depending on the terminal firmware it shows up as cp1250, UTF-8
// or UTF-16. Decoding tries a fixed candidate list and accepts the first
// encoding that decodes the whole stream cleanly. Line parsing is defensive:
// malformed lines are dropped and counted, but a field that must carry a
// typed value (id_point, time, date) aborts the whole batch rather than
// letting a half-parsed file into the store.

use chrono::{NaiveDate, NaiveTime};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1250, WINDOWS_1252};

use crate::error::{RcpError, Result};
use crate::event::EventRecord;

/// Minimum fields per line: time; date; name; surname; id_point
const MIN_FIELDS: usize = 5;

/// Candidate encodings, tried in order: the locale default first, then
/// Unicode variants, then the Latin-family fallback.
fn encoding_candidates() -> [&'static Encoding; 5] {
    [WINDOWS_1250, UTF_8, UTF_16LE, UTF_16BE, WINDOWS_1252]
}

/// Decode the raw events file into text.
///
/// A recognized byte-order mark decides the encoding directly; otherwise the
/// first candidate that decodes the entire stream without error wins. Returns
/// [`RcpError::Decode`] if nothing matches.
pub fn decode_events_file(bytes: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return match encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..]) {
            Some(text) => {
                tracing::debug!(encoding = encoding.name(), "decoded events file via BOM");
                Ok(text.into_owned())
            }
            None => Err(RcpError::Decode),
        };
    }

    for encoding in encoding_candidates() {
        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                tracing::debug!(encoding = encoding.name(), "decoded events file");
                return Ok(text.into_owned());
            }
            None => {
                tracing::debug!(encoding = encoding.name(), "encoding rejected, trying next");
            }
        }
    }
    Err(RcpError::Decode)
}

/// Parse decoded text into event records.
///
/// Blank lines and `#` comments are skipped. Each remaining line is split on
/// `;` with trailing empty fields stripped; lines with fewer than five fields
/// are dropped and counted, extra fields beyond the fifth are ignored. A
/// non-numeric `id_point` or a malformed time/date is fatal for the whole
/// batch. Zero surviving rows is the explicit [`RcpError::EmptyBatch`] so a
/// garbage file is distinguishable from an absent one.
pub fn parse_records(text: &str) -> Result<Vec<EventRecord>> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields: Vec<&str> = line.split(';').collect();
        while fields.last().is_some_and(|f| f.trim().is_empty()) {
            fields.pop();
        }

        if fields.len() < MIN_FIELDS {
            dropped += 1;
            tracing::debug!(columns = fields.len(), "skipping line with insufficient columns");
            continue;
        }

        // time; date; name; surname; id_point — extra columns ignored
        let time_raw = fields[0].trim();
        let date_raw = fields[1].trim();
        let id_point_raw = fields[4].trim();

        let time = NaiveTime::parse_from_str(time_raw, "%H:%M:%S")
            .map_err(|_| RcpError::row_value("time", time_raw))?;
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| RcpError::row_value("date", date_raw))?;
        let id_point: i64 = id_point_raw
            .parse()
            .map_err(|_| RcpError::row_value("id_point", id_point_raw))?;

        records.push(EventRecord {
            time,
            date,
            name: fields[2].trim().to_string(),
            surname: fields[3].trim().to_string(),
            id_point,
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped lines with fewer than {MIN_FIELDS} columns");
    }

    if records.is_empty() {
        return Err(RcpError::EmptyBatch);
    }

    tracing::info!(rows = records.len(), "parsed events file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointClassifier;

    #[test]
    fn parses_well_formed_lines() {
        let text = "08:00:00;2024-05-01;Jan;Kowalski;1\n16:30:00;2024-05-01;Jan;Kowalski;2\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Jan");
        assert_eq!(records[0].id_point, 1);
        assert_eq!(records[1].time, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# exported 2024-05-01\n\n08:00:00;2024-05-01;Jan;Kowalski;1\n   \n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn strips_trailing_empty_fields() {
        let text = "08:00:00;2024-05-01;Jan;Kowalski;1;;;\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id_point, 1);
    }

    #[test]
    fn drops_short_lines_without_failing() {
        let text = "08:00:00;2024-05-01;Jan\n09:00:00;2024-05-01;Anna;Nowak;1\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].surname, "Nowak");
    }

    #[test]
    fn truncates_extra_columns() {
        let text = "08:00:00;2024-05-01;Jan;Kowalski;1;badge-07;extra\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id_point, 1);
    }

    #[test]
    fn non_numeric_id_point_fails_the_batch() {
        let text = "08:00:00;2024-05-01;Jan;Kowalski;1\n09:00:00;2024-05-01;Anna;Nowak;door\n";
        let err = parse_records(text).unwrap_err();
        assert!(matches!(err, RcpError::RowValue { field: "id_point", .. }));
    }

    #[test]
    fn malformed_time_fails_the_batch() {
        let text = "8 o'clock;2024-05-01;Jan;Kowalski;1\n";
        let err = parse_records(text).unwrap_err();
        assert!(matches!(err, RcpError::RowValue { field: "time", .. }));
    }

    #[test]
    fn zero_valid_rows_is_empty_batch() {
        let text = "# only comments\n\nJan;Kowalski\n";
        let err = parse_records(text).unwrap_err();
        assert!(matches!(err, RcpError::EmptyBatch));
    }

    #[test]
    fn decodes_cp1250_with_accented_characters() {
        // "Łukasz;Zając" in cp1250: Ł=0xA3, ą=0xB9 — invalid as UTF-8
        let bytes = b"08:00:00;2024-05-01;\xA3ukasz;Zaj\xB9c;1\r\n";
        let text = decode_events_file(bytes).unwrap();
        let records = parse_records(&text).unwrap();
        assert_eq!(records[0].name, "Łukasz");
        assert_eq!(records[0].surname, "Zając");
    }

    #[test]
    fn decodes_plain_utf8() {
        let bytes = "08:00:00;2024-05-01;Jan;Kowalski;1\n".as_bytes();
        let text = decode_events_file(bytes).unwrap();
        assert!(text.contains("Kowalski"));
    }

    #[test]
    fn decodes_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "08:00:00;2024-05-01;Jan;Kowalski;1\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let text = decode_events_file(&bytes).unwrap();
        let records = parse_records(&text).unwrap();
        assert_eq!(records[0].surname, "Kowalski");
    }

    #[test]
    fn undecodable_stream_is_a_decode_error() {
        // 0x81 is unmapped in cp1250/cp1252, the pair 0xDC00 is an unpaired
        // surrogate for UTF-16LE, the odd length breaks UTF-16BE, and 0xDC
        // starts an invalid UTF-8 sequence.
        let bytes = [0x00, 0xDC, 0x00, 0xDC, 0x81];
        let err = decode_events_file(&bytes).unwrap_err();
        assert!(matches!(err, RcpError::Decode));
    }

    #[test]
    fn filter_stage_keeps_only_configured_points() {
        let text = "08:00:00;2024-05-01;Jan;Kowalski;1\n08:05:00;2024-05-01;Jan;Kowalski;9\n";
        let records = parse_records(text).unwrap();
        let classifier = PointClassifier::new([1], [2]);
        let kept = classifier.filter_known(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id_point, 1);
    }
}
