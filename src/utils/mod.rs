pub mod logger;

use crate::client::ExtractionResult;

/// Suggested file name for a saved video, e.g. `instagram_ABC123.mp4`
pub fn suggested_filename(result: &ExtractionResult) -> String {
    format!("{}_{}.mp4", result.platform, result.id)
}
