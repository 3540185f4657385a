//! Projection of one record onto several candidate tables.
//!
//! A record such as a monitoring sample carries the fields of several tables
//! at once. Each table receives the subset of fields it declares, and only if
//! that subset holds something beyond the table's natural key.

use common::Fields;
use healthdb::Store;
use healthdb::Table;
use tracing::trace;

use crate::error::Result;

/// Non-null fields of `fields` that `table` declares, or `None` when the
/// table's key can't be formed or nothing but the key would be written.
pub fn project(table: &Table, fields: &Fields) -> Option<Fields> {
    let projected: Fields = fields
        .iter()
        .filter(|(name, value)| !value.is_null() && table.has_column(name))
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();

    if table.key.iter().any(|k| !projected.contains_key(*k)) {
        return None;
    }
    if projected.keys().all(|name| table.is_key(name)) {
        return None;
    }

    Some(projected)
}

/// Validates every row first and writes them only if all are valid, so a
/// malformed record leaves no partial writes behind.
pub fn write_all(store: &dyn Store, rows: &[(&Table, Fields)]) -> Result<()> {
    let mut checked = Vec::with_capacity(rows.len());
    for (table, fields) in rows {
        let fields = table.validate(fields)?;
        table.natural_key(&fields)?;
        checked.push((*table, fields));
    }

    for (table, fields) in checked {
        store.upsert_fields(table, &fields)?;
    }

    Ok(())
}

/// Writes the projection of `fields` onto each of `tables`. Returns the
/// tables that received a row.
pub fn write_projections<'t>(
    store: &dyn Store,
    tables: &[&'t Table],
    fields: &Fields,
) -> Result<Vec<&'t Table>> {
    let mut rows = vec![];
    for table in tables {
        match project(table, fields) {
            Some(projected) => rows.push((*table, projected)),
            None => trace!("nothing to project onto {}", table.name),
        }
    }

    write_all(store, &rows)?;

    Ok(rows.into_iter().map(|(table, _)| table).collect())
}
