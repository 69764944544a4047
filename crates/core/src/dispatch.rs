//! Handing a resolved link to whatever opens it.

use crate::resolver::Resolution;

/// Opens resolved targets. Implementations own their failure reporting;
/// nothing propagates back to the resolver.
pub trait Launcher {
    /// `path` is the vault root joined with the note's relative path.
    fn open_note(&mut self, path: &str);

    /// `path` is relative to the current working directory (`./...`).
    fn view_image(&mut self, path: &str);

    fn play_audio(&mut self, path: &str);
}

/// Route `resolution` to the matching launcher call. Returns `false` when
/// there was nothing to launch.
pub fn dispatch(resolution: &Resolution, launcher: &mut dyn Launcher) -> bool {
    match resolution {
        Resolution::OpenNote { path } => launcher.open_note(path),
        Resolution::ShowImage { path } => launcher.view_image(path),
        Resolution::PlayAudio { path } => launcher.play_audio(path),
        Resolution::Unresolved { reason } => {
            tracing::debug!("nothing to launch: {}", reason);
            return false;
        }
    }
    true
}
