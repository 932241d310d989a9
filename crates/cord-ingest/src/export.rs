use std::path::Path;

use tracing::debug;

use cord_model::{Record, Result, Schema, Table};

/// Serialize records back to CSV with the column order preserved from the
/// original schema. Known fields are written from their cleaned values,
/// unknown columns from the opaque extras, and absent values as empty
/// cells. Derived columns are not exported.
pub fn write_records<'a, I>(path: &Path, schema: &Schema, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(schema.headers())?;
    let mut rows = 0usize;
    for record in records {
        let row: Vec<&str> = schema
            .headers()
            .iter()
            .enumerate()
            .map(|(index, header)| match schema.field_at(index) {
                Some(field) => record.get(field).unwrap_or(""),
                None => record.extra.get(header).map_or("", String::as_str),
            })
            .collect();
        writer.write_record(&row)?;
        rows += 1;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows, "table exported");
    Ok(())
}

/// Export a whole table. See [`write_records`].
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    write_records(path, table.schema(), table.records())
}
