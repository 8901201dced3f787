//! Canned input for headless runs. A script is a list of segments, each
//! holding a set of keys (and optional look/zoom activity) for a number of
//! ticks.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{InputSnapshot, KEY_ACTIVATE, KEY_BACK, KEY_FORWARD, KEY_RIGHT};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("reading input script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing input script {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("input script has no segments")]
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSegment {
    pub label: Option<String>,
    pub ticks: u32,
    /// Keys held for the whole segment, e.g. `"wd"`.
    pub keys: String,
    /// Mouse delta added on every tick of the segment.
    pub mouse_delta: [f32; 2],
    /// Zoom notches added on every tick; positive pulls the camera back.
    pub zoom: i32,
    pub look: bool,
    /// Queue an overlay dismissal once the segment's last tick has been fed.
    pub dismiss_after: bool,
}

impl ScriptSegment {
    fn hold(label: &str, ticks: u32, keys: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ticks,
            keys: keys.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn from_json_file(path: &Path) -> Result<Self, ScriptError> {
        let data = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script: InputScript =
            serde_json::from_str(&data).map_err(|source| ScriptError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if script.segments.is_empty() {
            return Err(ScriptError::Empty);
        }
        log::debug!(
            "loaded input script {} ({} segments, {} ticks)",
            path.display(),
            script.segments.len(),
            script.total_ticks()
        );
        Ok(script)
    }

    /// Walk from the default spawn (facing +z) to the first cabinet in the
    /// back-left corner, open it, close it again, then look around.
    pub fn demo() -> Self {
        let back_right = format!("{KEY_BACK}{KEY_RIGHT}");
        let mut play = ScriptSegment::hold("play", 30, "");
        play.dismiss_after = true;
        let mut look = ScriptSegment::hold("look around", 60, &KEY_FORWARD.to_string());
        look.look = true;
        look.mouse_delta = [12.0, 0.0];
        look.zoom = 1;

        Self {
            segments: vec![
                ScriptSegment::hold("diagonal", 50, &back_right),
                ScriptSegment::hold("approach", 28, &KEY_BACK.to_string()),
                ScriptSegment::hold("activate", 4, &KEY_ACTIVATE.to_string()),
                play,
                ScriptSegment::hold("settle", 2, ""),
                look,
            ],
        }
    }

    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|segment| u64::from(segment.ticks)).sum()
    }
}

/// What the replay did on one tick beyond touching the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCue {
    /// The caller should queue an overlay dismissal before the next tick.
    pub dismiss: bool,
    /// The script has no segments left; input stays idle from here on.
    pub finished: bool,
}

/// Replays an [`InputScript`] into an [`InputSnapshot`], one call per tick.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: InputScript,
    segment: usize,
    fed: u32,
}

impl ScriptedInput {
    pub fn new(script: InputScript) -> Self {
        Self {
            script,
            segment: 0,
            fed: 0,
        }
    }

    pub fn current_label(&self) -> Option<&str> {
        self.script
            .segments
            .get(self.segment)
            .and_then(|segment| segment.label.as_deref())
    }

    /// Prepare `input` for the next tick.
    pub fn feed(&mut self, input: &mut InputSnapshot) -> ScriptCue {
        while let Some(segment) = self.script.segments.get(self.segment) {
            if self.fed < segment.ticks {
                break;
            }
            self.segment += 1;
            self.fed = 0;
        }

        let Some(segment) = self.script.segments.get(self.segment) else {
            input.clear_keys();
            input.set_look_engaged(false);
            return ScriptCue {
                dismiss: false,
                finished: true,
            };
        };

        if self.fed == 0 {
            log::debug!(
                "script segment {} ({}) for {} ticks",
                self.segment,
                segment.label.as_deref().unwrap_or("unnamed"),
                segment.ticks
            );
            input.clear_keys();
            for key in segment.keys.chars() {
                input.press(key);
            }
            input.set_look_engaged(segment.look);
        }

        input.add_mouse_delta(segment.mouse_delta[0], segment.mouse_delta[1]);
        input.add_zoom_notches(segment.zoom);
        self.fed += 1;

        ScriptCue {
            dismiss: segment.dismiss_after && self.fed == segment.ticks,
            finished: false,
        }
    }
}
