use std::{fs::File, io::BufReader, path::Path};

use crate::stops::{stop::Stop, IngestionError};

const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "lat", "lon"];

/// Read a CSV snapshot with a header row naming at least `id,name,lat,lon`.
/// Any other columns are ignored.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<Stop>, IngestionError> {
    let f = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(f));

    let headers = rdr.headers()?.clone();
    if !REQUIRED_COLUMNS
        .iter()
        .all(|col| headers.iter().any(|h| h == *col))
    {
        return Err(IngestionError::MissingColumns);
    }

    let mut stops = vec![];
    for record in rdr.deserialize() {
        let stop: Stop = record?;
        stops.push(stop);
    }

    Ok(stops)
}
