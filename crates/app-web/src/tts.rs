//! Text-to-speech narration for the annotation dialog.

use web_sys as web;

fn synthesis() -> Option<web::SpeechSynthesis> {
    web::window().and_then(|w| w.speech_synthesis().ok())
}

/// Speak `text`, cancelling anything already in progress.
pub fn speak(text: &str) {
    if let Some(synth) = synthesis() {
        synth.cancel();
        match web::SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_rate(0.9);
                utterance.set_pitch(1.0);
                utterance.set_volume(1.0);
                synth.speak(&utterance);
            }
            Err(e) => log::warn!("[tts] utterance error: {:?}", e),
        }
    }
}

/// Stop any narration in progress (dialog closed, scene torn down).
pub fn cancel() {
    if let Some(synth) = synthesis() {
        synth.cancel();
    }
}

/// Whether narration is currently playing, used to toggle the listen button.
pub fn speaking() -> bool {
    synthesis().map(|s| s.speaking()).unwrap_or(false)
}
