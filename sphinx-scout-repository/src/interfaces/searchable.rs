//! Capability set of records that can be indexed.

use sphinx_scout_shared::FieldMap;

/// An application record that can be written to a search index.
///
/// The record is owned by the caller; the engine only reads it while building
/// statements.
pub trait Searchable {
    /// The document id of this record.
    fn search_key(&self) -> u64;

    /// The name of the index this record lives in.
    fn searchable_as(&self) -> String;

    /// The attribute and field values to index, in column order.
    ///
    /// Returning an empty map excludes the record from upserts.
    fn to_searchable_fields(&self) -> FieldMap;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_key(&self) -> u64 {
        (**self).search_key()
    }

    fn searchable_as(&self) -> String {
        (**self).searchable_as()
    }

    fn to_searchable_fields(&self) -> FieldMap {
        (**self).to_searchable_fields()
    }
}
