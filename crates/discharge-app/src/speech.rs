//! Read-aloud: synthesize speech for a piece of text and play it through an
//! external player.
//!
//! Failures are logged and otherwise swallowed; the only visible effect is
//! that `speaking` drops back to `false`.

use std::io;

use discharge_client::credential::Credential;
use discharge_client::source::SpeechSynthesizer;
use tempfile::NamedTempFile;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct Playback {
    child: Child,
    // Deleted once playback is over.
    _audio: NamedTempFile,
}

#[derive(Debug, Default)]
pub struct ReadAloud {
    player: Option<String>,
    speaking: bool,
    playback: Option<Playback>,
}

impl ReadAloud {
    /// `player` is a command line; the audio file path is appended to it.
    pub fn new(player: Option<String>) -> Self {
        Self {
            player,
            speaking: false,
            playback: None,
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Start reading `text` aloud, replacing any playback in progress.
    pub async fn speak<S: SpeechSynthesizer>(
        &mut self,
        synthesizer: &S,
        credential: Option<&Credential>,
        text: &str,
        language_code: &str,
    ) {
        self.stop().await;

        let Some(credential) = credential else {
            warn!("read-aloud skipped, no credential");
            return;
        };

        self.speaking = true;
        let audio = match synthesizer
            .synthesize_speech(credential, text, language_code)
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                warn!(error = %e, "speech synthesis failed");
                self.speaking = false;
                return;
            }
        };

        match self.start_player(&audio).await {
            Ok(playback) => {
                info!(bytes = audio.len(), "playing synthesized speech");
                self.playback = Some(playback);
            }
            Err(e) => {
                warn!(error = %e, "audio playback failed");
                self.speaking = false;
            }
        }
    }

    async fn start_player(&self, audio: &[u8]) -> io::Result<Playback> {
        let mut words = self
            .player
            .as_deref()
            .unwrap_or_default()
            .split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no audio player configured"))?;

        let file = tempfile::Builder::new()
            .prefix("discharge-speech-")
            .suffix(".mp3")
            .tempfile()?;
        tokio::fs::write(file.path(), audio).await?;

        let child = Command::new(program)
            .args(words)
            .arg(file.path())
            .kill_on_drop(true)
            .spawn()?;
        debug!(program, path = %file.path().display(), "started audio player");

        Ok(Playback {
            child,
            _audio: file,
        })
    }

    /// Wait for playback to end on its own.
    pub async fn wait(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            match playback.child.wait().await {
                Ok(status) if !status.success() => {
                    warn!(%status, "audio player exited with failure");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "failed to wait for audio player"),
            }
        }
        self.speaking = false;
    }

    /// Cut playback short.
    pub async fn stop(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            if let Err(e) = playback.child.kill().await {
                debug!(error = %e, "audio player already gone");
            }
            info!("read-aloud stopped");
        }
        self.speaking = false;
    }
}
