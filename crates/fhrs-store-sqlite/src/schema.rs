//! SQL schema for the establishment store.
//!
//! Executed at connection startup and again after the store is cleared.
//! Future migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- row_id is the stable rowid the FTS index points at; fhrs_id is the
-- external primary key and is what callers see.
CREATE TABLE IF NOT EXISTS establishments (
    row_id        INTEGER PRIMARY KEY,
    fhrs_id       TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    rating        TEXT NOT NULL,
    rating_date   TEXT NOT NULL,
    address_line1 TEXT,
    address_line2 TEXT,
    address_line3 TEXT,
    address_line4 TEXT,
    postcode      TEXT             -- normalized; NULL when the feed had none
);

CREATE INDEX IF NOT EXISTS establishments_postcode_idx ON establishments(postcode);

CREATE VIRTUAL TABLE IF NOT EXISTS establishments_fts USING fts5(
    name,
    content='establishments',
    content_rowid='row_id',
    tokenize='porter unicode61 remove_diacritics 2'
);

-- Rows are never updated or deleted individually, so insert is the only
-- trigger the external-content index needs.
CREATE TRIGGER IF NOT EXISTS establishments_fts_ai AFTER INSERT ON establishments
BEGIN
    INSERT INTO establishments_fts (rowid, name) VALUES (new.row_id, new.name);
END;

PRAGMA user_version = 1;
";

/// Removes every store object; [`SCHEMA`] must be re-applied afterwards.
pub const DROP: &str = "
DROP TRIGGER IF EXISTS establishments_fts_ai;
DROP TABLE   IF EXISTS establishments_fts;
DROP TABLE   IF EXISTS establishments;
";
