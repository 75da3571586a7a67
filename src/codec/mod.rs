//! Hand-written CSV codec.
//!
//! Bidirectional conversion between raw CSV text and ordered rows of field
//! strings, covering the RFC-4180-like subset this tool actually handles:
//! comma-delimited fields, double-quoted fields that may contain embedded
//! commas and newlines, CRLF normalized to LF.
//!
//! Dialect limitation: the decoder treats every `"` inside a quoted field as
//! the closing quote, so there is no `""` escape for a literal quote, and the
//! encoder performs no quote escaping on the way out. Round-trips are
//! lossless as long as field values contain no `"` characters.

use crate::models::Row;

/// Decoder state: inside or outside a quoted field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

/// Decode CSV text into rows of unquoted field strings.
///
/// The scan is a single pass over the input. End of input always flushes the
/// current field and row, so a missing trailing newline loses nothing and an
/// unterminated quote is absorbed rather than signaled.
pub fn decode(text: &str) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut state = QuoteState::Unquoted;

    for c in text.chars() {
        match state {
            QuoteState::Quoted => {
                if c == '"' {
                    state = QuoteState::Unquoted;
                } else {
                    field.push(c);
                }
            }
            QuoteState::Unquoted => match c {
                ',' => row.push(std::mem::take(&mut field)),
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                '\r' => {}
                '"' => state = QuoteState::Quoted,
                _ => field.push(c),
            },
        }
    }
    row.push(field);
    rows.push(row);
    rows
}

/// Encode rows back to CSV text.
///
/// A field is wrapped in double quotes iff it contains a comma or a newline.
/// Rows are joined with `\n` and no trailing newline is appended.
pub fn encode(rows: &[Row]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| quote_field(field))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('\n') {
        format!("\"{}\"", field)
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_decode() {
        let rows = decode("a,b,c\n1,2,3");
        assert_eq!(rows, vec![row(&["a", "b", "c"]), row(&["1", "2", "3"])]);
    }

    #[test]
    fn test_decode_quoted_comma() {
        let rows = decode("name,title\nAlice,\"Engineer, Senior\"");
        assert_eq!(rows[1], row(&["Alice", "Engineer, Senior"]));
    }

    #[test]
    fn test_decode_quoted_newline() {
        let rows = decode("note\n\"line one\nline two\"");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&["line one\nline two"]));
    }

    #[test]
    fn test_decode_normalizes_crlf() {
        let rows = decode("a,b\r\n1,2\r\n3,4");
        assert_eq!(
            rows,
            vec![row(&["a", "b"]), row(&["1", "2"]), row(&["3", "4"])]
        );
    }

    #[test]
    fn test_decode_without_trailing_newline() {
        let rows = decode("a,b");
        assert_eq!(rows, vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_decode_trailing_newline_yields_empty_row() {
        // End of input flushes a field and a row even after a final `\n`.
        let rows = decode("a,b\n");
        assert_eq!(rows, vec![row(&["a", "b"]), row(&[""])]);
    }

    #[test]
    fn test_decode_empty_fields() {
        let rows = decode("a,,c\n,,");
        assert_eq!(rows, vec![row(&["a", "", "c"]), row(&["", "", ""])]);
    }

    #[test]
    fn test_lone_quote_closes_quoting() {
        // No `""` escape in this dialect: an internal quote ends the quoted
        // region and the remainder is scanned unquoted.
        let rows = decode("\"he said \"\"hi\"\"\"");
        assert_eq!(rows, vec![row(&["he said hi"])]);
    }

    #[test]
    fn test_unterminated_quote_absorbed() {
        let rows = decode("a,\"unclosed");
        assert_eq!(rows, vec![row(&["a", "unclosed"])]);
    }

    #[test]
    fn test_encode_plain() {
        let rows = vec![row(&["a", "b"]), row(&["1", "2"])];
        assert_eq!(encode(&rows), "a,b\n1,2");
    }

    #[test]
    fn test_encode_quotes_comma_and_newline() {
        let rows = vec![row(&["x,y", "two\nlines", "plain"])];
        assert_eq!(encode(&rows), "\"x,y\",\"two\nlines\",plain");
    }

    #[test]
    fn test_encode_empty_row_is_blank_line() {
        let rows = vec![row(&["a"]), row(&[]), row(&["b"])];
        assert_eq!(encode(&rows), "a\n\nb");
    }

    #[test]
    fn test_round_trip_plain() {
        let rows = vec![row(&["a", "b", "c"]), row(&["1", "", "3"])];
        assert_eq!(decode(&encode(&rows)), rows);
    }

    #[test]
    fn test_round_trip_quoted() {
        let rows = vec![row(&["a,b", "line\nbreak", "plain"])];
        assert_eq!(decode(&encode(&rows)), rows);
    }
}
