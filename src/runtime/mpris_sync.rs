use crate::app::App;
use crate::mpris::MprisHandle;

/// Publish the app's view of playback. The queue position doubles as the
/// track id.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let song = app.now_playing();
    let index = song.map(|_| app.queue.index());
    mpris.set_track_metadata(index, song);
    mpris.set_playback(app.playback.phase);
    mpris.set_repeat(app.playback.repeat_mode);
    mpris.set_volume(app.playback.volume);
}
