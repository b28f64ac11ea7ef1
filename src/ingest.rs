//! Reading whitespace-separated `.xyz` point clouds.

use std::io::BufRead;

use glam::DVec3;
use thiserror::Error;

/// Errors surfaced while reading a point cloud.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected three numeric coordinates, got {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Parses `x y z` records, one per line.
///
/// Blank lines and `#` comments are skipped; columns past the first three
/// (intensity, color) are ignored. Malformed lines abort the read and
/// report their 1-based line number.
pub fn parse_xyz<R: BufRead>(reader: R) -> Result<Vec<DVec3>, IngestError> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }
        let mut fields = record.split_whitespace().map(str::parse::<f64>);
        let (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(IngestError::MalformedLine {
                line: index + 1,
                content: record.to_string(),
            });
        };
        points.push(DVec3::new(x, y, z));
    }
    Ok(points)
}
