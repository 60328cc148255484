//! Console output helpers.
//!
//! * [`color`] renders inline `%H<code> text%H` tags into ANSI escapes.
//! * [`host`] turns a host and port into an `http`/`https` URL for banners.
//! * [`classify`] decides whether a payload deserves the fail label.
//! * [`terminal`] is the verbosity-gated log facade tying them together,
//!   and can take over an application's [`ErrorSlot`].
//!
//! ```
//! use tagterm::{Config, MemoryOutput, Terminal};
//!
//! let out = MemoryOutput::new();
//! let terminal = Terminal::with_output(Config::default(), out.clone());
//! terminal.log("server %H32 ready").unwrap();
//! assert!(out.contents().contains("INFO"));
//! ```

pub mod classify;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod manifest;
pub mod output;
pub mod payload;
pub mod sink;
pub mod terminal;

pub use classify::{is_error, ErrorClassifier};
pub use color::{colorize, colors_enabled};
pub use config::{Config, Verbosity};
pub use error::{Result, TerminalError};
pub use host::{format_url, format_url_value, HostInfo};
pub use logger::TerminalLogger;
pub use manifest::{load_project_info, read_project_info, ProjectInfo};
pub use output::{MemoryOutput, Output, StdoutOutput};
pub use payload::Payload;
pub use sink::{ErrorSink, ErrorSlot};
pub use terminal::{Labels, Terminal};
