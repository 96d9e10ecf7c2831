//! Constants used throughout the catalog core crate.

/// Collection holding Disease Card documents.
pub const DISEASE_CARD_COLLECTION: &str = "disease_card";

/// Collection holding Professional Center documents.
pub const PROFESSIONAL_CENTER_COLLECTION: &str = "professional_center";

/// Database name used when none is configured.
pub const DEFAULT_DATABASE: &str = "rare_diseases";

/// Key under which document stores keep their native record identifier.
pub const NATIVE_ID_KEY: &str = "_id";

/// Key under which normalized records expose their text identifier.
pub const RECORD_ID_KEY: &str = "id";

/// Extended-JSON wrapper key for MongoDB object identifiers.
pub const OBJECT_ID_KEY: &str = "$oid";
