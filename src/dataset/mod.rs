pub mod reader;
pub mod writer;

pub use reader::{read_annotated, read_annotated_from_path, read_matches, read_matches_from_path};
pub use writer::{
    write_annotated, write_annotated_to_path, write_ledger, write_ledger_to_path,
};
