use common::Fields;

/// Merges sparse input fields into an existing row. Present non-null inputs
/// win, nulls and absent fields never clear stored data.
pub fn merge_row(existing: Option<&Fields>, key_fields: &Fields, fields: &Fields) -> Fields {
    let mut row = existing.cloned().unwrap_or_default();
    for (name, value) in key_fields.iter().chain(fields.iter()) {
        if !value.is_null() {
            row.insert(name.to_owned(), value.to_owned());
        }
    }

    row
}
