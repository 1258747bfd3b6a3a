//! Discovery and parsing of per-machine timing logs (`.dat` files).

pub mod parse;
pub mod row;
pub mod scan;

pub use parse::{ParseError, parse_log_file};
pub use row::{EventRow, MachineLog};
pub use scan::scan_directory;
