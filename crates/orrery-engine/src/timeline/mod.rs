// timeline/mod.rs
//
// From stored series to moving bodies: window selection, paths, playback.

pub mod path;
pub mod playback;
pub mod window;

pub use path::{Pacing, PathCursor, PlaybackPath};
pub use playback::{BodyTrack, Playback, PlaybackState};
pub use window::{select_window, window_path, Window, WindowSelection};
