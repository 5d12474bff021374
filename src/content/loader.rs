//! Loader for the RON tuning override file.

use ron::Options;
use ron::extensions::Extensions;
use std::fs;
use std::path::Path;

use super::FightTuning;

/// Error raised when the tuning file exists but cannot be used.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load {}: {}", self.file, self.message)
    }
}

/// Load [`FightTuning`] from a RON file. Any field left out of the file
/// falls back to its default value.
pub fn load_tuning(path: &Path) -> Result<FightTuning, TuningLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file.clone(),
        message: format!("IO error: {e}"),
    })?;

    Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file,
            message: format!("parse error: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults_for_omitted_fields() {
        let tuning: FightTuning = Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str("(arena: (gravity: 0.8), player: (barrage_damage: 12.0))")
            .unwrap();

        assert_eq!(tuning.arena.gravity, 0.8);
        assert_eq!(tuning.player.barrage_damage, 12.0);
        // Untouched fields fall back to defaults.
        assert_eq!(tuning.arena.move_speed, 6.0);
        assert_eq!(tuning.rival.max_health, 6000.0);
    }
}
