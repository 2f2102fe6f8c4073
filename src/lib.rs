pub mod error;
pub mod format;
pub mod labels;
pub mod matcher;
pub mod package;
pub mod scan;

pub use error::FormatError;
pub use format::{format_record, tgi_text};
pub use labels::{GroupLabel, TypeLabel, TypeNameTable};
pub use matcher::MatchPattern;
pub use package::header::PackageHeader;
pub use package::index::{IndexLayout, TgiRecord};
pub use package::{read_index, Package};
pub use scan::{ScanEvent, ScanOptions, ScanSummary, Scanner};
