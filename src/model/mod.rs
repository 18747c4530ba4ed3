mod date;
mod payload;
mod validation;

pub use date::{format_date, today};
pub use payload::{CachedFields, CreateLogRequest, ExportRequest, FormPayload, PLACE_SEPARATOR};
pub use validation::{
    CODE_LENGTH, ValidationError, normalize_tag, validate_code, validate_date, validate_distance,
};
