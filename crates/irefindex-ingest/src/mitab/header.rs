//! Header line check

use super::{MitabError, Result, COLUMN_COUNT};

/// Validate the `#`-prefixed header line and return its column count.
///
/// Anything other than exactly 54 columns means the file is not the MITAB 2.6
/// layout the mapper indexes into, so the whole file is rejected.
pub fn validate_header(line: &str) -> Result<usize> {
    let line = line.trim();
    let line = line.strip_prefix('#').unwrap_or(line).trim();
    if line.is_empty() {
        return Err(MitabError::EmptyInput);
    }

    let found = line.split('\t').count();
    if found != COLUMN_COUNT {
        return Err(MitabError::HeaderColumnCount {
            expected: COLUMN_COUNT,
            found,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(columns: usize) -> String {
        let names: Vec<String> = (0..columns).map(|i| format!("col{}", i)).collect();
        format!("#{}\n", names.join("\t"))
    }

    #[test]
    fn test_valid_header() {
        assert_eq!(validate_header(&header(54)).unwrap(), 54);
    }

    #[test]
    fn test_header_without_marker() {
        let line = header(54);
        assert!(validate_header(line.trim_start_matches('#')).is_ok());
    }

    #[test]
    fn test_wrong_column_counts() {
        for columns in [53, 55] {
            match validate_header(&header(columns)) {
                Err(MitabError::HeaderColumnCount { expected, found }) => {
                    assert_eq!(expected, 54);
                    assert_eq!(found, columns);
                },
                other => panic!("unexpected result for {}: {:?}", columns, other),
            }
        }
    }

    #[test]
    fn test_empty_header() {
        assert!(matches!(validate_header("#\n"), Err(MitabError::EmptyInput)));
        assert!(matches!(validate_header(""), Err(MitabError::EmptyInput)));
    }
}
