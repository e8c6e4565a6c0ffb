pub mod extract_cmd;
pub mod load_psl_cmd;
pub mod parse_cmd;
pub mod tld_cmd;

pub use extract_cmd::cmd_extract;
pub use load_psl_cmd::cmd_load_psl;
pub use parse_cmd::cmd_parse;
pub use tld_cmd::cmd_tld;
