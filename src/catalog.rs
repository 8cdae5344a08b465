//! Scene catalog: which ambience and recorded asset belong to each photo.
//!
//! Custom audio overrides live only as long as the catalog does.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AmbienceError, Result};
use crate::synth::AmbienceCategory;

/// One photo scene and its ambient sound
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: AmbienceCategory,
    /// Recorded asset tried before synthesis
    pub asset: Option<PathBuf>,
    pub audio_description: String,
}

impl Scene {
    pub fn new(
        id: u32,
        title: &str,
        description: &str,
        category: AmbienceCategory,
        audio_description: &str,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category,
            asset: Some(PathBuf::from(format!("audio/{}.wav", category.tag()))),
            audio_description: audio_description.to_string(),
        }
    }
}

/// The built-in six scenes
pub fn default_scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            1,
            "Forest Dawn",
            "The first light of morning slips through a dense forest",
            AmbienceCategory::Forest,
            "Birdsong and a light breeze",
        ),
        Scene::new(
            2,
            "Snowy Peaks",
            "Snow-covered summits standing still under a blue sky",
            AmbienceCategory::Snow,
            "Mountain wind and falling snow",
        ),
        Scene::new(
            3,
            "Ocean Caress",
            "Gentle waves brushing a golden beach",
            AmbienceCategory::Ocean,
            "Waves breaking on the sand",
        ),
        Scene::new(
            4,
            "Wandering Deer",
            "A young deer running through the woods",
            AmbienceCategory::Birds,
            "Birds singing over a grassy meadow",
        ),
        Scene::new(
            5,
            "Babbling Brook",
            "Clear water tumbling between the stones",
            AmbienceCategory::Stream,
            "Running water",
        ),
        Scene::new(
            6,
            "Starry Night",
            "A sky full of stars over a quiet landscape",
            AmbienceCategory::Night,
            "Crickets and night wind",
        ),
    ]
}

/// Ordered scenes with a wrap-around cursor and per-session custom audio
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<Scene>,
    index: usize,
    custom_audio: HashMap<u32, PathBuf>,
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::new(default_scenes())
    }
}

impl SceneCatalog {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            index: 0,
            custom_audio: HashMap::new(),
        }
    }

    /// Resolve every relative asset path against `root`
    pub fn with_asset_root(mut self, root: &Path) -> Self {
        for scene in &mut self.scenes {
            if let Some(asset) = scene.asset.take() {
                scene.asset = Some(if asset.is_absolute() {
                    asset
                } else {
                    root.join(asset)
                });
            }
        }
        self
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Scene> {
        self.scenes.get(self.index)
    }

    pub fn next(&mut self) -> Option<&Scene> {
        if !self.scenes.is_empty() {
            self.index = (self.index + 1) % self.scenes.len();
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<&Scene> {
        if !self.scenes.is_empty() {
            self.index = (self.index + self.scenes.len() - 1) % self.scenes.len();
        }
        self.current()
    }

    /// Jump to `index`; out-of-range indices leave the cursor unchanged
    pub fn go_to(&mut self, index: usize) -> Option<&Scene> {
        if index < self.scenes.len() {
            self.index = index;
            self.current()
        } else {
            None
        }
    }

    pub fn find(&self, id: u32) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    /// Attach user-supplied audio to a scene for this session
    pub fn set_custom_audio(&mut self, id: u32, path: PathBuf) -> Result<()> {
        if self.find(id).is_none() {
            return Err(AmbienceError::UnknownScene(id));
        }
        self.custom_audio.insert(id, path);
        Ok(())
    }

    pub fn custom_audio(&self, id: u32) -> Option<&Path> {
        self.custom_audio.get(&id).map(PathBuf::as_path)
    }

    pub fn clear_custom_audio(&mut self, id: u32) -> Option<PathBuf> {
        self.custom_audio.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_every_category() {
        let catalog = SceneCatalog::default();
        assert_eq!(catalog.len(), 6);
        for category in AmbienceCategory::ALL {
            assert!(catalog.scenes().iter().any(|s| s.category == category));
        }
        assert_eq!(
            catalog.find(2).unwrap().asset.as_deref(),
            Some(Path::new("audio/snow.wav"))
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let mut catalog = SceneCatalog::default();
        assert_eq!(catalog.prev().unwrap().id, 6);
        assert_eq!(catalog.next().unwrap().id, 1);
        assert_eq!(catalog.go_to(4).unwrap().id, 5);
        assert!(catalog.go_to(99).is_none());
        assert_eq!(catalog.index(), 4);
    }

    #[test]
    fn test_empty_catalog_navigation() {
        let mut catalog = SceneCatalog::new(Vec::new());
        assert!(catalog.next().is_none());
        assert!(catalog.prev().is_none());
        assert!(catalog.current().is_none());
    }

    #[test]
    fn test_custom_audio_is_per_scene() {
        let mut catalog = SceneCatalog::default();
        catalog
            .set_custom_audio(3, PathBuf::from("mine.wav"))
            .unwrap();
        assert_eq!(catalog.custom_audio(3), Some(Path::new("mine.wav")));
        assert!(catalog.custom_audio(1).is_none());
        assert!(matches!(
            catalog.set_custom_audio(42, PathBuf::from("x.wav")),
            Err(AmbienceError::UnknownScene(42))
        ));
        assert!(catalog.clear_custom_audio(3).is_some());
        assert!(catalog.custom_audio(3).is_none());
    }

    #[test]
    fn test_asset_root_joins_relative_paths() {
        let catalog = SceneCatalog::default().with_asset_root(Path::new("/srv/media"));
        assert_eq!(
            catalog.find(1).unwrap().asset.as_deref(),
            Some(Path::new("/srv/media/audio/forest.wav"))
        );
    }
}
