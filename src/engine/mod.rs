//! Engine module: CLI surface and the leaf components used by the pipeline

pub mod arg_parser;
pub mod cli;
pub mod fetcher;
pub mod filter;
pub mod render;
pub mod wordlist;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::{handle_run, setup_opts};
pub use fetcher::{Fetch, HttpFetcher, declared_content_length, response_content_length};
pub use filter::{is_length_hidden, is_status_hidden};
pub use render::{ColorRenderer, JsonRenderer, PlainRenderer, Renderer, renderer_for};
pub use wordlist::{FileWordlist, WordSource, load_wordlist, read_lines};
