use std::path::Path;

use bincode::deserialize;
use bincode::serialize;
use common::config::STORE_ACTIVITIES;
use common::config::STORE_GARMIN;
use common::config::STORE_MONITORING;
use common::Fields;
use rocksdb::Direction;
use rocksdb::IteratorMode;
use rocksdb::Options;
use rocksdb::Transaction;
use rocksdb::TransactionDB;
use rocksdb::TransactionDBOptions;
use tracing::debug;

use crate::merge::merge_row;
use crate::path_helpers::make_row_key;
use crate::path_helpers::make_rows_key;
use crate::store::Store;
use crate::table::NaturalKey;
use crate::table::StoreKind;
use crate::table::Table;
use crate::Result;

fn open_store<P: AsRef<Path>>(path: P) -> Result<TransactionDB> {
    let mut opts = Options::default();
    opts.create_if_missing(true);

    Ok(TransactionDB::open(
        &opts,
        &TransactionDBOptions::default(),
        path,
    )?)
}

/// The three stores a file is ingested into.
pub struct Databases {
    garmin: TransactionDB,
    monitoring: TransactionDB,
    activities: TransactionDB,
}

impl Databases {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening stores in {}", path.display());
        Ok(Databases {
            garmin: open_store(path.join(STORE_GARMIN))?,
            monitoring: open_store(path.join(STORE_MONITORING))?,
            activities: open_store(path.join(STORE_ACTIVITIES))?,
        })
    }

    /// Starts one transaction per store. Nothing is visible to other sessions
    /// until [`Session::commit`]; dropping the session rolls everything back.
    pub fn session(&self) -> Session<'_> {
        Session {
            garmin: self.garmin.transaction(),
            monitoring: self.monitoring.transaction(),
            activities: self.activities.transaction(),
        }
    }

    pub fn find_by_key(&self, table: &Table, key: &NaturalKey) -> Result<Option<Fields>> {
        self.session().find_by_key(table, key)
    }

    pub fn rows(&self, table: &Table) -> Result<Vec<Fields>> {
        self.session().rows(table)
    }
}

pub struct Session<'a> {
    garmin: Transaction<'a, TransactionDB>,
    monitoring: Transaction<'a, TransactionDB>,
    activities: Transaction<'a, TransactionDB>,
}

impl<'a> Session<'a> {
    fn tx(&self, store: StoreKind) -> &Transaction<'a, TransactionDB> {
        match store {
            StoreKind::Garmin => &self.garmin,
            StoreKind::Monitoring => &self.monitoring,
            StoreKind::Activities => &self.activities,
        }
    }

    pub fn commit(self) -> Result<()> {
        self.activities.commit()?;
        self.monitoring.commit()?;
        self.garmin.commit()?;
        Ok(())
    }

    pub fn rollback(self) -> Result<()> {
        self.activities.rollback()?;
        self.monitoring.rollback()?;
        self.garmin.rollback()?;
        Ok(())
    }
}

impl Store for Session<'_> {
    fn find_by_key(&self, table: &Table, key: &NaturalKey) -> Result<Option<Fields>> {
        let tx = self.tx(table.store);
        match tx.get(make_row_key(table, key)?)? {
            None => Ok(None),
            Some(value) => Ok(Some(deserialize(&value)?)),
        }
    }

    fn upsert(&self, table: &Table, key: &NaturalKey, fields: &Fields) -> Result<Fields> {
        let fields = table.validate(fields)?;
        let key_fields = table.key_fields(key)?;
        let tx = self.tx(table.store);
        let row_key = make_row_key(table, key)?;

        let existing: Option<Fields> = match tx.get(&row_key)? {
            None => None,
            Some(value) => Some(deserialize(&value)?),
        };
        let row = merge_row(existing.as_ref(), &key_fields, &fields);
        if existing.as_ref() != Some(&row) {
            tx.put(&row_key, serialize(&row)?)?;
        }

        Ok(row)
    }

    fn rows(&self, table: &Table) -> Result<Vec<Fields>> {
        let tx = self.tx(table.store);
        let prefix = make_rows_key(table);

        let mut out = Vec::new();
        for item in tx.iterator(IteratorMode::From(&prefix, Direction::Forward)) {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            out.push(deserialize(&value)?);
        }

        Ok(out)
    }
}
