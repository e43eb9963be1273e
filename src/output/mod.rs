pub mod files;

use crate::error::GenResult;
use crate::generator::Scenario;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writes a scenario into a directory.
///
/// Each file goes to `<name>.partial` first; the partials are renamed into
/// place only once every file has been written and flushed. If anything fails
/// the partials are removed and previous outputs in the directory stay as they
/// were. An interruption during the final renames can still leave a mix.
pub struct OutputWriter {
    dir: PathBuf,
    write_membership: bool,
}

impl OutputWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            write_membership: false,
        }
    }

    pub fn with_membership(mut self, enabled: bool) -> Self {
        self.write_membership = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the final paths, in write order.
    pub fn write(&self, scenario: &Scenario) -> GenResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)?;

        let mut staged = Vec::new();
        let result = self.stage_all(scenario, &mut staged);

        if let Err(e) = result {
            discard(&staged);
            return Err(e);
        }

        let mut written = Vec::with_capacity(staged.len());
        for (i, (partial, target)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(partial, target) {
                discard(&staged[i..]);
                return Err(e.into());
            }
            info!("Wrote {}", target.display());
            written.push(target.clone());
        }

        // a membership file from an earlier run would no longer match
        if !self.write_membership {
            let stale = self.dir.join(files::MEMBERSHIP);
            if stale.exists() {
                fs::remove_file(&stale)?;
                debug!("removed stale {}", stale.display());
            }
        }

        Ok(written)
    }

    fn stage_all(&self, scenario: &Scenario, staged: &mut Vec<(PathBuf, PathBuf)>) -> GenResult<()> {
        let network = &scenario.network;

        self.stage(files::POSITIONS, staged, |f| files::write_positions(f, network))?;
        self.stage(files::ROUTES, staged, |f| files::write_routes(f, network))?;
        self.stage(files::CATEGORIES, staged, |f| files::write_categories(f, &scenario.packets))?;
        self.stage(files::DUMP, staged, |f| files::write_dump(f, scenario))?;
        if self.write_membership {
            self.stage(files::MEMBERSHIP, staged, |f| files::write_membership(f, network))?;
        }
        Ok(())
    }

    fn stage<F>(&self, name: &str, staged: &mut Vec<(PathBuf, PathBuf)>, encode: F) -> GenResult<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> GenResult<()>,
    {
        let target = self.dir.join(name);
        let partial = self.dir.join(format!("{}.partial", name));

        let file = File::create(&partial)?;
        // registered before writing so a failed encode still gets cleaned up
        staged.push((partial.clone(), target));

        let mut out = BufWriter::new(file);
        encode(&mut out)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;

        debug!("staged {}", partial.display());
        Ok(())
    }
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (partial, _) in staged {
        if let Err(rm) = fs::remove_file(partial) {
            warn!("Could not remove {}: {}", partial.display(), rm);
        }
    }
}
