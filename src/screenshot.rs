use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, error};

use crate::error::WaitResult;
use crate::session::BrowserSession;

/// Writes failure-diagnostic screenshots for a session.
///
/// The wait layer itself never captures diagnostics; it is the calling
/// page object or test that decides to, typically from its failure path.
/// Files are named `{name}_{status}_{timestamp}.png` under the directory
/// supplied at construction.
#[derive(Debug)]
pub struct ScreenshotCapture<'a> {
    session: &'a dyn BrowserSession,
    dir: PathBuf,
}

impl<'a> ScreenshotCapture<'a> {
    /// Create a capturer writing into `dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(session: &'a dyn BrowserSession, dir: P) -> WaitResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        create_dir_all(&dir)?;
        Ok(Self { session, dir })
    }

    /// Capture the current page and write it as a PNG file.
    pub fn capture(&self, name: &str, status: &str) -> WaitResult<PathBuf> {
        let encoded = self.session.screenshot_as_base64()?;
        let png = base64::decode(&encoded)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("{}_{}_{}.png", name, status, timestamp));
        let mut file = File::create(&path)?;
        file.write_all(&png)?;
        debug!("screenshot captured: {}", path.display());
        Ok(path)
    }

    /// Capture a screenshot from a failure path.
    ///
    /// Never fails: a broken session must not mask the original test
    /// failure, so capture errors are logged and `None` is returned.
    pub fn capture_on_failure(&self, name: &str) -> Option<PathBuf> {
        match self.capture(name, "failed") {
            Ok(path) => {
                error!("test {} failed, screenshot saved: {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                error!("failed to capture failure screenshot for {}: {}", name, e);
                None
            }
        }
    }
}
