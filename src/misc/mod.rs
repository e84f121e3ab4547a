//! Filesystem, cache and date/time helpers.
//!
//! Path listing and resolution fail when the path is missing; [`norm_path`]
//! is purely lexical and never touches the disk.

mod cache;
pub mod datetime;
mod fs;
mod path;

pub use self::cache::{cache_path, clean_cache, default_cache_dir, is_cached, Expiry};
pub use self::datetime::{
    convert_time_units, dtformat, format_datetime, from_timestamp, gt, gte, lt, lte,
    parse_datetime, since, span, time_stamp, to_timestamp, units_to, until, DateFormat,
    DateParts, Span, TimeUnit, ToDateTime,
};
pub use self::fs::{
    ensure_dir_exists, file_exists_ci, file_info, file_uuid, find_files, is_writable,
    mime_type, remove, require_dir_exists, sha256_file, FileInfo,
};
pub use self::path::{base_name, file_name, fill_path, norm_path, real_path, with_extension};
