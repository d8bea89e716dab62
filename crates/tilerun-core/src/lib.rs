pub mod audio;
pub mod geometry;
pub mod input;
pub mod progress;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::audio::{AudioSink, Sound};

    /// Audio double that records every played sound in order.
    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub played: Vec<Sound>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, sound: Sound) {
            self.played.push(sound);
        }
    }

    impl RecordingAudio {
        /// How many times a given sound has been played.
        pub fn count(&self, sound: Sound) -> usize {
            self.played.iter().filter(|&&s| s == sound).count()
        }
    }

}
