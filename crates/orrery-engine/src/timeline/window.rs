//! Per-body playback paths for a selected date range.

use crate::api::error::EngineError;
use crate::catalog::bodies::BodyCatalog;
use crate::ephemeris::date::canonical_date;
use crate::ephemeris::store::{EphemerisSeries, EphemerisStore};
use crate::timeline::path::PlaybackPath;

/// Inclusive `[start, end]` range of canonical `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start: String,
    pub end: String,
}

impl Window {
    /// Bounds may be canonical dates or store-form keys; both are canonicalized.
    pub fn new(start: &str, end: &str) -> Result<Self, EngineError> {
        let window = Self {
            start: canonical_date(start)?,
            end: canonical_date(end)?,
        };
        if window.start > window.end {
            log::warn!("window start {} is after end {}; every path will be empty", window.start, window.end);
        }
        Ok(window)
    }

    /// Lexical comparison on canonical dates.
    pub fn contains(&self, canonical: &str) -> bool {
        self.start.as_str() <= canonical && canonical <= self.end.as_str()
    }
}

/// Date-sorted positions of `series` that fall inside `window`.
/// Keys without a canonical date never match.
pub fn window_path(series: &EphemerisSeries, window: &Window) -> PlaybackPath {
    // Series entries are already in canonical order.
    let positions = series
        .entries()
        .iter()
        .filter(|e| e.canonical.as_deref().is_some_and(|c| window.contains(c)))
        .map(|e| e.position)
        .collect();
    PlaybackPath::new(positions)
}

/// Paths for every catalog body, indexed by dense body index.
#[derive(Debug)]
pub struct WindowSelection {
    pub window: Window,
    pub paths: Vec<PlaybackPath>,
    /// One `EmptyWindow` per body left out of playback.
    pub empty: Vec<EngineError>,
}

impl WindowSelection {
    /// Bodies with at least one sample in the window.
    pub fn non_empty(&self) -> usize {
        self.paths.iter().filter(|p| !p.is_empty()).count()
    }
}

/// Build a fresh path for every body. Never incremental: the result replaces
/// whatever was selected before.
pub fn select_window(
    store: &EphemerisStore,
    catalog: &BodyCatalog,
    start: &str,
    end: &str,
) -> Result<WindowSelection, EngineError> {
    let window = Window::new(start, end)?;
    let mut paths = Vec::with_capacity(catalog.len());
    let mut empty = Vec::new();

    for (_, body) in catalog.iter() {
        let path = store
            .series(&body.id)
            .map(|s| window_path(s, &window))
            .unwrap_or_default();
        if path.is_empty() {
            log::info!("body {} has no samples in [{}, {}]", body.id, window.start, window.end);
            empty.push(EngineError::EmptyWindow {
                body: body.id.clone(),
                start: window.start.clone(),
                end: window.end.clone(),
            });
        }
        paths.push(path);
    }

    Ok(WindowSelection { window, paths, empty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::Sample;
    use crate::catalog::bodies::BodyDesc;

    fn key(month: &str, day: u32) -> String {
        format!("A.D. 2023-{month}-{day:02} 00:00:00.0000 TDB")
    }

    fn store() -> EphemerisStore {
        let mut store = EphemerisStore::new();
        store.load(
            "399",
            vec![
                Sample::new(key("Mar", 1), Vec3::new(3.0, 0.0, 0.0)),
                Sample::new(key("Jan", 1), Vec3::new(1.0, 0.0, 0.0)),
                Sample::new(key("Dec", 31), Vec3::new(12.0, 0.0, 0.0)),
                Sample::new(key("Feb", 1), Vec3::new(2.0, 0.0, 0.0)),
            ],
        );
        store.load("499", vec![Sample::new(key("Jul", 4), Vec3::Y)]);
        store
    }

    fn catalog() -> BodyCatalog {
        BodyCatalog::new(vec![
            BodyDesc::new("399", "Earth", 23.44),
            BodyDesc::new("499", "Mars", 25.19),
        ])
        .unwrap()
    }

    #[test]
    fn filters_inclusive_and_sorts() {
        let sel = select_window(&store(), &catalog(), "2023-01-01", "2023-03-01").unwrap();
        let xs: Vec<f32> = sel.paths[0].positions().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_window_is_reported_per_body() {
        let sel = select_window(&store(), &catalog(), "2023-01-01", "2023-03-01").unwrap();
        assert!(sel.paths[1].is_empty());
        assert_eq!(sel.non_empty(), 1);
        assert_eq!(
            sel.empty,
            vec![EngineError::EmptyWindow {
                body: "499".into(),
                start: "2023-01-01".into(),
                end: "2023-03-01".into(),
            }]
        );
    }

    #[test]
    fn selection_is_idempotent() {
        let store = store();
        let catalog = catalog();
        let a = select_window(&store, &catalog, "2023-01-15", "2023-12-31").unwrap();
        let b = select_window(&store, &catalog, "2023-01-15", "2023-12-31").unwrap();
        assert_eq!(a.paths, b.paths);
        assert_eq!(a.paths[0].len(), 3);
    }

    #[test]
    fn store_form_bounds_are_accepted() {
        let sel = select_window(&store(), &catalog(), &key("Jul", 4), &key("Jul", 4)).unwrap();
        assert_eq!(sel.window.start, "2023-07-04");
        assert_eq!(sel.paths[1].positions(), &[Vec3::Y]);
    }

    #[test]
    fn reversed_window_selects_nothing() {
        let sel = select_window(&store(), &catalog(), "2023-12-31", "2023-01-01").unwrap();
        assert_eq!(sel.non_empty(), 0);
        assert_eq!(sel.empty.len(), 2);
    }

    #[test]
    fn bad_bounds_are_rejected() {
        let err = select_window(&store(), &catalog(), "yesterday", "2023-01-01").unwrap_err();
        assert_eq!(err, EngineError::InvalidDate("yesterday".into()));
    }

    #[test]
    fn unloaded_body_yields_empty_path() {
        let catalog = BodyCatalog::solar_system();
        let sel = select_window(&store(), &catalog, "2023-01-01", "2023-12-31").unwrap();
        assert_eq!(sel.paths.len(), 9);
        assert_eq!(sel.paths[3].len(), 4);
        assert!(sel.paths[0].is_empty());
    }
}
