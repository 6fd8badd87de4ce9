// crates/hardness-storage/src/csv.rs
//! Minimal RFC 4180 reader/writer for the feedback file. Fields containing
//! commas, quotes, or line breaks are quoted, with inner quotes doubled.

use anyhow::{anyhow, Result};

pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a full CSV document into rows of fields. Quoted fields may span
/// lines; a lone CR before LF is consumed as part of the row terminator.
pub fn parse(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                if field.is_empty() {
                    in_quotes = true;
                } else {
                    return Err(anyhow!("stray quote inside unquoted field"));
                }
            }
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(anyhow!("unterminated quoted field"));
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_fields_pass_through() {
        assert_eq!(escape_field("hello"), "hello");
        assert_eq!(write_row(&strs(&["a", "b", "c"])), "a,b,c");
    }

    #[test]
    fn test_commas_quotes_and_newlines_are_quoted() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_round_trip_of_awkward_fields() {
        let original = strs(&["plain", "a,b", "say \"hi\"", "two\nlines", ""]);
        let rows = parse(&write_row(&original)).unwrap();
        assert_eq!(rows, vec![original]);
    }

    #[test]
    fn test_crlf_rows() {
        let rows = parse("a,b\r\nc,d\r\n").unwrap();
        assert_eq!(rows, vec![strs(&["a", "b"]), strs(&["c", "d"])]);
    }

    #[test]
    fn test_quoted_field_spanning_lines() {
        let rows = parse("\"a\nb\",c\n").unwrap();
        assert_eq!(rows, vec![strs(&["a\nb", "c"])]);
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        assert!(parse("\"oops,b\n").is_err());
    }
}
