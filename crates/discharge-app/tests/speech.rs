use std::sync::Mutex;

use discharge_app::speech::ReadAloud;
use discharge_client::credential::Credential;
use discharge_client::error::ClientError;
use discharge_client::source::SpeechSynthesizer;

struct FakeSynthesizer {
    fail: bool,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeSynthesizer {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize_speech(
        &self,
        _credential: &Credential,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<u8>, ClientError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), language_code.to_string()));
        if self.fail {
            Err(ClientError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(b"ID3fake-audio".to_vec())
        }
    }
}

fn credential() -> Credential {
    Credential::new("test-token").unwrap()
}

#[tokio::test]
async fn synthesis_failure_reverts_silently() {
    let synth = FakeSynthesizer::new(true);
    let mut read_aloud = ReadAloud::new(Some("true".to_string()));

    read_aloud
        .speak(&synth, Some(&credential()), "Rest today.", "en-US")
        .await;

    assert!(!read_aloud.is_speaking());
    assert_eq!(
        synth.requests.lock().unwrap().as_slice(),
        &[("Rest today.".to_string(), "en-US".to_string())]
    );
}

#[tokio::test]
async fn missing_player_reverts_silently() {
    let synth = FakeSynthesizer::new(false);
    let mut read_aloud = ReadAloud::new(None);

    read_aloud
        .speak(&synth, Some(&credential()), "Rest today.", "en-US")
        .await;

    assert!(!read_aloud.is_speaking());
}

#[tokio::test]
async fn no_credential_makes_no_request() {
    let synth = FakeSynthesizer::new(false);
    let mut read_aloud = ReadAloud::new(Some("true".to_string()));

    read_aloud.speak(&synth, None, "Rest today.", "en-US").await;

    assert!(!read_aloud.is_speaking());
    assert!(synth.requests.lock().unwrap().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn playback_runs_until_player_exits() {
    let synth = FakeSynthesizer::new(false);
    let mut read_aloud = ReadAloud::new(Some("true".to_string()));

    read_aloud
        .speak(&synth, Some(&credential()), "Rest today.", "es-ES")
        .await;
    assert!(read_aloud.is_speaking());

    read_aloud.wait().await;
    assert!(!read_aloud.is_speaking());
}

#[cfg(unix)]
#[tokio::test]
async fn stop_cuts_playback_short() {
    let synth = FakeSynthesizer::new(false);
    // Follows the audio file until killed.
    let mut read_aloud = ReadAloud::new(Some("tail -n 0 -f".to_string()));

    read_aloud
        .speak(&synth, Some(&credential()), "Rest today.", "en-US")
        .await;
    assert!(read_aloud.is_speaking());

    read_aloud.stop().await;
    assert!(!read_aloud.is_speaking());
}
