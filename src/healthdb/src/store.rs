use common::Fields;

use crate::table::NaturalKey;
use crate::table::Table;
use crate::Result;

/// Create-or-merge access to destination tables.
///
/// `upsert` is the only write primitive: it looks the row up by its natural
/// key, creates it from the supplied fields when absent, and otherwise
/// overwrites only the fields whose new value is non-null.
pub trait Store {
    fn find_by_key(&self, table: &Table, key: &NaturalKey) -> Result<Option<Fields>>;

    fn upsert(&self, table: &Table, key: &NaturalKey, fields: &Fields) -> Result<Fields>;

    fn rows(&self, table: &Table) -> Result<Vec<Fields>>;

    fn upsert_fields(&self, table: &Table, fields: &Fields) -> Result<Fields> {
        let key = table.natural_key(fields)?;
        self.upsert(table, &key, fields)
    }

    /// Like `upsert_fields`, but leaves `preserve` fields alone when the stored
    /// row already holds a value for them.
    fn upsert_preserving(
        &self,
        table: &Table,
        fields: &Fields,
        preserve: &[String],
    ) -> Result<Fields> {
        let key = table.natural_key(fields)?;
        let mut fields = fields.to_owned();
        if let Some(current) = self.find_by_key(table, &key)? {
            for name in preserve {
                if current.get(name).is_some_and(|v| !v.is_null()) {
                    fields.remove(name);
                }
            }
        }

        self.upsert(table, &key, &fields)
    }
}
