use std::path::Path;

use lofty::file::AudioFile;
use tracing::debug;

/// Best-effort duration lookup. Implementations never fail; they answer `None`.
pub trait MetadataReader {
    fn duration_ms(&self, location: &Path) -> Option<u64>;
}

/// Reads the embedded duration with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyMetadata;

impl MetadataReader for LoftyMetadata {
    fn duration_ms(&self, location: &Path) -> Option<u64> {
        match lofty::read_from_path(location) {
            Ok(tagged) => {
                let ms = tagged.properties().duration().as_millis();
                u64::try_from(ms).ok().filter(|ms| *ms > 0)
            }
            Err(e) => {
                debug!(path = %location.display(), error = %e, "no readable duration");
                None
            }
        }
    }
}
