use tracing::info;

use crate::config;
use crate::media::MediaResource;
use crate::session::PlaybackController;
use crate::track::Track;

/// Build a bound controller from settings and start the first item when
/// `playback.autoplay` is on.
pub fn build_controller<M: MediaResource>(
    settings: &config::Settings,
    media: M,
    tracks: Vec<Track>,
) -> PlaybackController<M> {
    let mut controller =
        PlaybackController::new(settings.playback.volume, settings.playback.mode.into());
    controller.bind(media);
    controller.set_playlist(tracks);

    if settings.playback.autoplay {
        if let Some(first) = controller.playlist().first().cloned() {
            info!(track = first.identity_key(), "autoplay first playlist item");
            controller.load_track(first, true);
        }
    }

    controller
}
