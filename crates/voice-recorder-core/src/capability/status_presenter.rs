use crate::{ElapsedTime, SessionError, StatusPayload};

use tracing::{error, info};

/// The always-present status surface.
///
/// Invoked from the tick task as well as from command handlers, with the
/// session lock held. Implementations should hand the payload off (e.g. to
/// a UI thread) and return quickly.
pub trait StatusPresenter: Send + Sync {
    /// Shows the latest progress.
    fn render(&self, payload: &StatusPayload);

    /// The session stopped; the surface may be withdrawn.
    fn finished(&self, elapsed: ElapsedTime) {
        info!(elapsed = %elapsed, "Recording finished");
    }

    /// The session failed to acquire or keep the capture device.
    fn failed(&self, error: &SessionError) {
        error!(error = %error, "Recording failed");
    }
}
