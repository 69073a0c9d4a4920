pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_kind;

/// Length of a full hex-encoded object id.
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id, as shown in merge log lines.
pub const SHORT_OID_LENGTH: usize = 7;
