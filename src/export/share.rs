// src/export/share.rs

use crate::errors::AppResult;
use crate::ui::messages::info;
use std::path::Path;

/// Hands a finished export to whatever the platform uses for sharing.
pub trait Sharer {
    fn share_file(&self, path: &Path, mime_type: &str) -> AppResult<()>;
    fn share_text(&self, text: &str) -> AppResult<()>;
}

/// Terminal sharing: files stay where they were written, text goes to stdout.
pub struct ConsoleSharer;

impl Sharer for ConsoleSharer {
    fn share_file(&self, path: &Path, mime_type: &str) -> AppResult<()> {
        info(format!("Ready to share: {} ({})", path.display(), mime_type));
        Ok(())
    }

    fn share_text(&self, text: &str) -> AppResult<()> {
        println!("{}", text);
        Ok(())
    }
}
