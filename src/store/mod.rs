//! Storage layer: thin, typed wrappers around the SQL each record type
//! needs. The user store is the authority for username uniqueness; the
//! task store keys every per-id mutation by `(id, user_id)` so the
//! ownership check and the operation are one atomic statement.

pub mod tasks;
pub mod users;
