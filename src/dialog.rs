//! Native file dialogs

use std::path::{Path, PathBuf};

/// Asks the user for a scenario file to open
pub trait FilePicker {
    /// Blocks until the user picks a file or cancels (`None`)
    fn pick_scenario(&mut self, start_dir: &Path) -> Option<PathBuf>;
}

/// Open-file dialog provided by the operating system
pub struct NativeFilePicker;

#[cfg(not(target_arch = "wasm32"))]
impl FilePicker for NativeFilePicker {
    fn pick_scenario(&mut self, start_dir: &Path) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(start_dir) {
            log::warn!("Could not create {}: {}", start_dir.display(), e);
        }

        rfd::FileDialog::new()
            .set_title("Load Scenario")
            .add_filter("Scenario", &["ron"])
            .set_directory(start_dir)
            .pick_file()
    }
}

#[cfg(target_arch = "wasm32")]
impl FilePicker for NativeFilePicker {
    fn pick_scenario(&mut self, _start_dir: &Path) -> Option<PathBuf> {
        log::warn!("File dialogs are not available in the browser");
        None
    }
}
