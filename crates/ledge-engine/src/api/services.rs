use crate::api::types::SoundId;

/// Screen transitions, audio and diagnostics provided by the host.
///
/// All calls are synchronous: a fade returns once the transition is done.
pub trait ServiceProvider {
    fn fade_out_screen(&mut self);
    fn fade_in_screen(&mut self);
    fn play_music(&mut self, name: &str);
    fn play_sound(&mut self, sound: SoundId);
    fn show_debug_text(&mut self, text: &str);
}

/// Everything a `RecordingServices` was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    FadeOut,
    FadeIn,
    PlayMusic(String),
    PlaySound(SoundId),
    DebugText(String),
}

/// Service provider that records calls instead of performing them.
/// Used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingServices {
    pub calls: Vec<ServiceCall>,
}

impl RecordingServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Names of all music tracks started so far.
    pub fn music(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::PlayMusic(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> Vec<SoundId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::PlaySound(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn last_debug_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ServiceCall::DebugText(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl ServiceProvider for RecordingServices {
    fn fade_out_screen(&mut self) {
        self.calls.push(ServiceCall::FadeOut);
    }

    fn fade_in_screen(&mut self) {
        self.calls.push(ServiceCall::FadeIn);
    }

    fn play_music(&mut self, name: &str) {
        self.calls.push(ServiceCall::PlayMusic(name.to_string()));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.calls.push(ServiceCall::PlaySound(sound));
    }

    fn show_debug_text(&mut self, text: &str) {
        self.calls.push(ServiceCall::DebugText(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut services = RecordingServices::new();
        services.fade_out_screen();
        services.play_music("KICKBUTT.IMF");
        services.play_sound(SoundId::ITEM_PICKUP);
        services.fade_in_screen();

        assert_eq!(
            services.calls,
            vec![
                ServiceCall::FadeOut,
                ServiceCall::PlayMusic("KICKBUTT.IMF".into()),
                ServiceCall::PlaySound(SoundId::ITEM_PICKUP),
                ServiceCall::FadeIn,
            ]
        );
        assert_eq!(services.music(), vec!["KICKBUTT.IMF"]);
        assert_eq!(services.sounds(), vec![SoundId::ITEM_PICKUP]);
    }

    #[test]
    fn last_debug_text_wins() {
        let mut services = RecordingServices::new();
        assert!(services.last_debug_text().is_none());
        services.show_debug_text("a");
        services.show_debug_text("b");
        assert_eq!(services.last_debug_text(), Some("b"));
    }
}
