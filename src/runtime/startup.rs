use crate::config::{RepeatModeSetting, Settings};
use crate::playback::{PlaybackEngine, RepeatMode};

pub fn repeat_mode(setting: RepeatModeSetting) -> RepeatMode {
    match setting {
        RepeatModeSetting::None => RepeatMode::None,
        RepeatModeSetting::Single => RepeatMode::Single,
        RepeatModeSetting::All => RepeatMode::All,
    }
}

pub fn repeat_setting(mode: RepeatMode) -> RepeatModeSetting {
    match mode {
        RepeatMode::None => RepeatModeSetting::None,
        RepeatMode::Single => RepeatModeSetting::Single,
        RepeatMode::All => RepeatModeSetting::All,
    }
}

/// Restore the saved volume and repeat mode into a fresh engine.
pub fn apply_playback_defaults(engine: &PlaybackEngine, settings: &Settings) {
    engine.set_volume(settings.volume);
    engine.set_repeat_mode(repeat_mode(settings.repeat_mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::fake::FakeBackend;

    #[test]
    fn settings_repeat_modes_map_across() {
        assert_eq!(repeat_mode(RepeatModeSetting::None), RepeatMode::None);
        assert_eq!(repeat_mode(RepeatModeSetting::Single), RepeatMode::Single);
        assert_eq!(repeat_mode(RepeatModeSetting::All), RepeatMode::All);
        for mode in [RepeatMode::None, RepeatMode::Single, RepeatMode::All] {
            assert_eq!(repeat_mode(repeat_setting(mode)), mode);
        }
    }

    #[test]
    fn defaults_reach_the_engine() {
        let engine = PlaybackEngine::new(Box::new(FakeBackend::new()));
        let settings = Settings {
            volume: 0.3,
            repeat_mode: RepeatModeSetting::All,
            ..Settings::default()
        };
        apply_playback_defaults(&engine, &settings);
        assert_eq!(engine.volume(), 0.3);
        assert_eq!(engine.repeat_mode(), RepeatMode::All);
    }
}
