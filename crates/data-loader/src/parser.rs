//! Parser for the rating and genre data files.
//!
//! - ratings.csv: `userId,movieId,rating,timestamp` with a header line
//! - genres.csv: `movieId,title,g1|g2|...|gN`, no header, titles may be
//!   double-quoted and contain commas

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::io::ErrorKind;
use std::path::Path;

const RATINGS_HEADER: &str = "userId";

/// Read a file as text, falling back to Latin-1 when it is not valid UTF-8.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        // Latin-1 maps every byte straight to a code point
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Split one CSV line into fields, honouring double quotes and `""` escapes.
pub(crate) fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    file: &str,
    line: usize,
    name: &str,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Parse the ratings file
///
/// Format: userId,movieId,rating,timestamp
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    const FILE: &str = "ratings.csv";
    let lines = read_lines(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || (line_no == 1 && line_trimmed.starts_with(RATINGS_HEADER)) {
            continue;
        }

        let parts: Vec<&str> = line_trimmed.split(',').collect();
        if parts.len() != 4 {
            return Err(DataLoadError::FieldCountMismatch {
                expected: 4,
                found: parts.len(),
                line: line_no,
            });
        }

        ratings.push(Rating {
            user_id: parse_field(parts[0], FILE, line_no, "userId")?,
            item_id: parse_field(parts[1], FILE, line_no, "movieId")?,
            rating: parse_field(parts[2], FILE, line_no, "rating")?,
            timestamp: parse_field(parts[3], FILE, line_no, "timestamp")?,
        });
    }

    Ok(ratings)
}

/// Parse the genre file
///
/// Format: movieId,title,g1|g2|...|gN
///
/// A missing or empty genre column leaves the item without genre data.
/// All genre vectors in the file must have the same length.
pub fn parse_genres(path: &Path) -> Result<Vec<Item>> {
    const FILE: &str = "genres.csv";
    let lines = read_lines(path)?;
    let mut items = Vec::with_capacity(lines.len());
    let mut dimensionality: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        if fields.len() < 2 || fields.len() > 3 {
            return Err(DataLoadError::FieldCountMismatch {
                expected: 3,
                found: fields.len(),
                line: line_no,
            });
        }

        let id: ItemId = parse_field(&fields[0], FILE, line_no, "movieId")?;
        let genres = match fields.get(2).map(|g| g.trim()) {
            Some(g) if !g.is_empty() => Some(parse_genre_vector(g, line_no)?),
            _ => None,
        };

        if let Some(vector) = &genres {
            let expected = *dimensionality.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(DataLoadError::InconsistentGenreLength {
                    item: id,
                    expected,
                    found: vector.len(),
                });
            }
        }

        items.push(Item {
            id,
            title: fields[1].clone(),
            genres,
        });
    }

    Ok(items)
}

/// Parse pipe-separated genre weights
///
/// Example: "0|1|0.5" -> vec![0.0, 1.0, 0.5]
fn parse_genre_vector(s: &str, line: usize) -> Result<Vec<f64>> {
    s.split('|')
        .map(|value| parse_field(value, "genres.csv", line, "genre weight"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("data-loader-parser-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_split_csv_line_quoted_title() {
        let fields = split_csv_line(r#"11,"American President, The (1995)",0|1|1"#);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], "American President, The (1995)");
        assert_eq!(fields[2], "0|1|1");
    }

    #[test]
    fn test_split_csv_line_escaped_quote() {
        let fields = split_csv_line(r#"1,"Say ""Hi""",1"#);
        assert_eq!(fields[1], r#"Say "Hi""#);
    }

    #[test]
    fn test_parse_genre_vector() {
        let genres = parse_genre_vector("0|1|0.5", 1).unwrap();
        assert_eq!(genres, vec![0.0, 1.0, 0.5]);
        assert!(parse_genre_vector("0|x", 1).is_err());
    }

    #[test]
    fn test_parse_ratings_skips_header() {
        let path = write_temp(
            "ratings_header.csv",
            "userId,movieId,rating,timestamp\n1,10,4.5,964982703\n2,10,3.0,964982224\n",
        );
        let ratings = parse_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].user_id, 1);
        assert_eq!(ratings[0].item_id, 10);
        assert_eq!(ratings[0].rating, 4.5);
    }

    #[test]
    fn test_parse_ratings_field_count() {
        let path = write_temp("ratings_short.csv", "1,10,4.5\n");
        let err = parse_ratings(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::FieldCountMismatch { expected: 4, found: 3, line: 1 }
        ));
    }

    #[test]
    fn test_parse_genres_missing_column_means_no_genres() {
        let path = write_temp("genres_missing.csv", "1,Toy Story (1995),1|0|1\n2,Unknown\n");
        let items = parse_genres(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].genres, Some(vec![1.0, 0.0, 1.0]));
        assert_eq!(items[1].genres, None);
    }

    #[test]
    fn test_parse_genres_inconsistent_length() {
        let path = write_temp("genres_bad.csv", "1,A,1|0|1\n2,B,1|0\n");
        let err = parse_genres(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InconsistentGenreLength { item: 2, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_ratings(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
