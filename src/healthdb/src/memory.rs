use std::cell::RefCell;
use std::collections::BTreeMap;

use common::Fields;

use crate::merge::merge_row;
use crate::path_helpers::make_row_key;
use crate::path_helpers::make_rows_key;
use crate::store::Store;
use crate::table::NaturalKey;
use crate::table::Table;
use crate::Result;

/// Non-persistent [`Store`] with the same merge semantics as a session.
#[derive(Default)]
pub struct MemoryStore {
    rows: RefCell<BTreeMap<Vec<u8>, Fields>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    /// Number of row writes issued so far. Upserts that leave a row unchanged
    /// are not counted.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Store for MemoryStore {
    fn find_by_key(&self, table: &Table, key: &NaturalKey) -> Result<Option<Fields>> {
        Ok(self.rows.borrow().get(&make_row_key(table, key)?).cloned())
    }

    fn upsert(&self, table: &Table, key: &NaturalKey, fields: &Fields) -> Result<Fields> {
        let fields = table.validate(fields)?;
        let key_fields = table.key_fields(key)?;
        let row_key = make_row_key(table, key)?;

        let mut rows = self.rows.borrow_mut();
        let row = merge_row(rows.get(&row_key), &key_fields, &fields);
        if rows.get(&row_key) != Some(&row) {
            rows.insert(row_key, row.clone());
            *self.writes.borrow_mut() += 1;
        }

        Ok(row)
    }

    fn rows(&self, table: &Table) -> Result<Vec<Fields>> {
        let prefix = make_rows_key(table);
        Ok(self
            .rows
            .borrow()
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v.to_owned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use common::fields;
    use common::Value;

    use super::*;
    use crate::tables::ACTIVITIES;
    use crate::tables::MONITORING_HR;

    #[test]
    fn test_upsert_merge() {
        let store = MemoryStore::default();
        store
            .upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "1", "calories" => 5i64})
            .unwrap();
        store
            .upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "1", "calories" => Value::Null})
            .unwrap();
        let row = store
            .find_by_key(&ACTIVITIES, &NaturalKey(vec![Value::from("1")]))
            .unwrap()
            .unwrap();
        assert_eq!(row["calories"], Value::Int(5));
        assert_eq!(store.writes(), 1);

        store
            .upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "1", "calories" => 7i64})
            .unwrap();
        assert_eq!(store.rows(&ACTIVITIES).unwrap()[0]["calories"], Value::Int(7));
        assert!(store.rows(&MONITORING_HR).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_preserving() {
        let store = MemoryStore::default();
        let preserve = vec!["sport".to_string()];
        store
            .upsert_preserving(
                &ACTIVITIES,
                &fields! {"activity_id" => "1", "sport" => "running"},
                &preserve,
            )
            .unwrap();
        let row = store
            .upsert_preserving(
                &ACTIVITIES,
                &fields! {"activity_id" => "1", "sport" => "walking", "calories" => 3i64},
                &preserve,
            )
            .unwrap();
        assert_eq!(row["sport"], Value::from("running"));
        assert_eq!(row["calories"], Value::Int(3));
    }
}
