use crate::{
    assets::{host::AssetHost, sequence::FrameSequence},
    foundation::error::{FlipbookError, FlipbookResult},
};

/// Base path chosen by [`detect_base`], fixed for the rest of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBase {
    /// The base path every frame is fetched from.
    pub base: String,
    /// Position of `base` in the candidate list.
    pub candidate: usize,
}

/// Probe `candidates` in order by loading the sequence's probe frame from each.
///
/// The first candidate whose probe loads wins. Each candidate is tried exactly once; if all
/// fail the error lists every base that was tried.
#[tracing::instrument(skip(host, sequence))]
pub fn detect_base<H: AssetHost + ?Sized>(
    host: &H,
    sequence: &FrameSequence,
    candidates: &[String],
) -> FlipbookResult<ResolvedBase> {
    let probe = sequence.probe_number();
    for (candidate, base) in candidates.iter().enumerate() {
        let url = sequence.url(base, probe);
        match host.load(&url) {
            Ok(_) => {
                tracing::info!(base = %base, "path detection: frames served from '{base}/'");
                return Ok(ResolvedBase {
                    base: base.clone(),
                    candidate,
                });
            }
            Err(err) => {
                tracing::info!(url = %url, error = %err, "path detection: candidate failed");
            }
        }
    }

    tracing::error!(
        tried = ?candidates,
        "path detection: could not load frames from any candidate"
    );
    Err(FlipbookError::PathDetection {
        tried: candidates.to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/player/detect.rs"]
mod tests;
