//! The log facade.
//!
//! A [`Terminal`] is a cheap handle: clones share the same state, so the
//! copy installed as an error sink and the copy the application logs through
//! behave as one. Every write happens while the state lock is held, which
//! keeps lines in call order.
//!
//! Output policy by [`Verbosity`]:
//!
//! * `Silent` drops `log` and `pass`.
//! * `Ephemeral` clears the current line and overwrites it, when the output
//!   is a TTY. Otherwise it behaves like `Full`.
//! * `Full` appends a line per call.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use parking_lot::Mutex;

use crate::classify::ErrorClassifier;
use crate::color::render;
use crate::config::{Config, Verbosity};
use crate::error::{Result, TerminalError};
use crate::host::format_url;
use crate::manifest::{load_project_info, ProjectInfo};
use crate::output::{Output, StdoutOutput};
use crate::payload::Payload;
use crate::sink::{ErrorSink, ErrorSlot};

/// Pre-rendered level markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub info: String,
    pub fail: String,
    pub pass: String,
}

impl Labels {
    fn render(styled: bool) -> Self {
        Self {
            info: render("%H100  INFO:%H", styled),
            fail: render("%H41  FAIL:%H", styled),
            pass: render("%H42  PASS:%H", styled),
        }
    }
}

struct State {
    verbosity: Verbosity,
    color: bool,
    labels: Labels,
    project: Option<ProjectInfo>,
    manifest: Option<PathBuf>,
    classifier: ErrorClassifier,
    out: Box<dyn Output>,
}

impl State {
    fn paint(&self, text: &str) -> String {
        render(text, self.color)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn clear_line(&mut self) -> Result<bool> {
        if !self.out.is_tty() {
            return Ok(false);
        }
        execute!(self.out, Clear(ClearType::CurrentLine))?;
        Ok(true)
    }
}

#[derive(Clone)]
pub struct Terminal {
    state: Arc<Mutex<State>>,
}

impl Terminal {
    /// A terminal writing to standard output.
    pub fn new(config: Config) -> Self {
        Self::with_output(config, StdoutOutput::new())
    }

    pub fn with_output(config: Config, out: impl Output + 'static) -> Self {
        Self::with_classifier(config, out, ErrorClassifier::new())
    }

    /// Use a classifier with extra error type names.
    pub fn with_classifier(
        config: Config,
        out: impl Output + 'static,
        classifier: ErrorClassifier,
    ) -> Self {
        let state = State {
            verbosity: config.verbosity,
            color: config.color,
            labels: Labels::render(config.color),
            project: None,
            manifest: config.manifest,
            classifier,
            out: Box::new(out),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.state.lock().verbosity
    }

    /// Clamp `level` into `0..=2`; `NaN` is ignored.
    pub fn set_verbose(&self, level: f64) {
        if let Some(verbosity) = Verbosity::from_level(level) {
            self.state.lock().verbosity = verbosity;
        }
    }

    /// Like [`set_verbose`](Self::set_verbose) for text; non-numeric input
    /// leaves the level alone.
    pub fn set_verbose_str(&self, level: &str) {
        if let Some(verbosity) = Verbosity::parse(level) {
            self.state.lock().verbosity = verbosity;
        }
    }

    pub fn labels(&self) -> Labels {
        self.state.lock().labels.clone()
    }

    /// Current project metadata, `"unknown"` until loaded or set.
    pub fn project_info(&self) -> ProjectInfo {
        self.state.lock().project.clone().unwrap_or_default()
    }

    pub fn set_project_info(&self, info: ProjectInfo) {
        self.state.lock().project = Some(info);
    }

    /// Read project metadata from `path`, or from the configured/default
    /// manifest. Failures reset the metadata to `"unknown"`.
    pub fn load_project_info(&self, path: Option<&Path>) {
        let configured = self.state.lock().manifest.clone();
        let info = load_project_info(path.or(configured.as_deref()));
        self.set_project_info(info);
    }

    pub fn is_error(&self, data: &Payload) -> bool {
        self.state.lock().classifier.is_error(data)
    }

    /// Print the startup banner: project name and version, then the host URL
    /// and port when they resolve.
    pub fn start(&self, host: Option<&str>, port: Option<&str>) -> Result<()> {
        if self.state.lock().project.is_none() {
            self.load_project_info(None);
        }

        let host_info = host.and_then(|host| match format_url(host, port) {
            Ok(info) => Some(info),
            Err(err) => {
                log::debug!("banner host '{host}' omitted: {err}");
                None
            }
        });

        let mut state = self.state.lock();
        let project = state.project.clone().unwrap_or_default();

        let mut lines = vec![
            format!("\n%H46  name:%H%H44  {} ", project.name),
            format!("%H105  version:%H%H41  {} %H\n", project.version),
        ];
        if let Some(info) = host_info {
            if !info.url.is_empty() {
                lines.push(format!("%H43  host:%H95  {}\n", info.url));
            }
            if !info.port.is_empty() {
                lines.push(format!("%H45  port:%H94  {}\n", info.port));
            }
        }

        for line in lines {
            let painted = state.paint(&line);
            state.write(&painted)?;
        }
        Ok(())
    }

    /// Report success. Absent payloads and silent mode print nothing.
    pub fn pass(&self, data: impl Into<Payload>) -> Result<()> {
        let data = data.into();
        if data.is_absent() {
            return Ok(());
        }

        let mut state = self.state.lock();
        if state.verbosity == Verbosity::Silent {
            return Ok(());
        }

        let label = state.labels.pass.clone();
        if data.is_structured() {
            let head = state.paint(&format!("\r%H1 {label}%H"));
            state.write(&format!("{head} {}\n", data.structured_text()))
        } else {
            state.clear_line()?;
            let line = state.paint(&format!("\r%H1 {label}%H {}\n", data.display_text()));
            state.write(&line)
        }
    }

    /// Log a message with the info label, or the fail label when it looks
    /// like an error.
    pub fn log(&self, data: impl Into<Payload>) -> Result<()> {
        let data = data.into();
        let mut state = self.state.lock();
        if state.verbosity == Verbosity::Silent {
            return Ok(());
        }

        let failed = state.classifier.is_error(&data);
        let label = if failed {
            state.labels.fail.clone()
        } else {
            state.labels.info.clone()
        };

        if state.verbosity == Verbosity::Ephemeral && state.out.is_tty() {
            state.clear_line()?;
            let line = state.paint(&format!("\r%H1 {label}%H {}", data.display_text()));
            return state.write(&line);
        }

        if failed || data.is_structured() {
            // Only the label is colorized; the payload is printed as is.
            let head = state.paint(&format!("%H1 {label}%H "));
            state.write(&format!("{head} {}\n", data.structured_text()))
        } else {
            let line = state.paint(&format!("%H1 {label}%H {}\n", data.display_text()));
            state.write(&line)
        }
    }

    /// Clear the current line when the output is a TTY.
    pub fn clear(&self) -> bool {
        let cleared = self.state.lock().clear_line();
        match cleared {
            Ok(cleared) => cleared,
            Err(err) => {
                log::debug!("clearing the line failed: {err}");
                false
            }
        }
    }

    /// An error sink that logs through this terminal.
    pub fn sink(&self) -> ErrorSink {
        let terminal = self.clone();
        Box::new(move |data: Payload| {
            if let Err(err) = terminal.log(data) {
                log::warn!("error sink write failed: {err}");
            }
        })
    }

    /// Route `slot` through this terminal, keeping the previous sink as a
    /// backup. Returns `false` when a backup already exists.
    ///
    /// A slot without any sink is an environment this crate cannot work
    /// in and yields [`TerminalError::NoErrorSink`].
    pub fn setup(&self, slot: &mut ErrorSlot) -> Result<bool> {
        if !slot.has_sink() {
            return Err(TerminalError::NoErrorSink);
        }
        if slot.is_patched() {
            log::debug!("error sink already patched");
            return Ok(false);
        }
        Ok(slot.patch(self.sink()))
    }

    /// Put the backed-up sink back. Returns `false` when nothing was backed up.
    pub fn teardown(&self, slot: &mut ErrorSlot) -> bool {
        slot.restore()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(Config::from_env())
    }
}
