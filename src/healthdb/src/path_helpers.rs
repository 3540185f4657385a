use crate::table::NaturalKey;
use crate::table::Table;
use crate::Result;

pub fn make_rows_key(table: &Table) -> Vec<u8> {
    [table.name.as_bytes(), b"/rows/"].concat()
}

pub fn make_row_key(table: &Table, key: &NaturalKey) -> Result<Vec<u8>> {
    Ok([make_rows_key(table), key.encode()?].concat())
}
