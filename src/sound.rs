use std::{borrow::Cow, io::Cursor};

use crate::prelude::*;
use assets_manager::{loader::Loader, Asset, AssetCache, BoxedError};
use bevy_ecs::system::Resource;
use kira::{
    manager::{backend::cpal::CpalBackend, AudioManager},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
};

/// Sounds requested by systems during one schedule run.
#[derive(Resource, Default)]
pub struct SoundQueue(pub(crate) Vec<SoundInfo>);

impl SoundQueue {
    pub fn push(&mut self, snd_info: SoundInfo) {
        self.0.push(snd_info);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SoundInfo> + '_ {
        self.0.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SoundInfo {
    pub name: &'static str,
    pub panning: f64,
    pub volume: f64,
}

impl SoundInfo {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            panning: 0.5,
            volume: 1.,
        }
    }

    /// Pans the sound towards the side of the arena it happened on
    pub fn at_position(name: &'static str, x: f32, arena_width: f32) -> Self {
        let mut pan = (x / arena_width) as f64;
        if pan.is_nan() {
            pan = 0.5;
        }

        Self {
            panning: pan.clamp(0., 1.),
            ..Self::new(name)
        }
    }
}

/// A decoded sound effect, loaded through the asset cache as `sounds.<name>`.
pub struct Sound(StaticSoundData);

pub struct SoundLoader;

impl Loader<Sound> for SoundLoader {
    fn load(content: Cow<[u8]>, _ext: &str) -> Result<Sound, BoxedError> {
        let cursor = Cursor::new(content.into_owned());
        let data = StaticSoundData::from_cursor(cursor, StaticSoundSettings::default())?;
        Ok(Sound(data))
    }
}

impl Asset for Sound {
    const EXTENSIONS: &'static [&'static str] = &["wav"];
    type Loader = SoundLoader;
}

pub fn play(
    manager: &mut AudioManager<CpalBackend>,
    assets: &AssetCache,
    info: &SoundInfo,
    volume: f64,
) {
    let id = format!("sounds.{}", info.name);
    let sound = match assets.load::<Sound>(&id) {
        Ok(sound) => sound,
        Err(err) => {
            warn!("Could not load sound {id}: {err}");
            return;
        }
    };

    let settings = StaticSoundSettings::new()
        .panning(info.panning)
        .volume(kira::Volume::Amplitude(info.volume * volume));
    let data = sound.read().0.clone().with_settings(settings);

    if let Err(err) = manager.play(data) {
        warn!("Could not play sound {id}: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panning_follows_position() {
        assert_eq!(SoundInfo::at_position("hit", 0., 320.).panning, 0.);
        assert_eq!(SoundInfo::at_position("hit", 160., 320.).panning, 0.5);
        assert_eq!(SoundInfo::at_position("hit", 400., 320.).panning, 1.);
        assert_eq!(SoundInfo::at_position("hit", 0., 0.).panning, 0.5);
    }

    #[test]
    fn queue_drains() {
        let mut queue = SoundQueue::default();
        queue.push(SoundInfo::new("wall"));
        queue.push(SoundInfo::new("score"));

        let names: Vec<_> = queue.drain().map(|s| s.name).collect();
        assert_eq!(names, ["wall", "score"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn bundled_sounds_load_from_the_cache() {
        let assets = AssetCache::new(crate::ASSETS_FOLDER).unwrap();
        for name in ["hit", "wall", "score"] {
            assert!(assets.load::<Sound>(&format!("sounds.{name}")).is_ok(), "{name}");
        }
    }

    #[test]
    fn garbage_bytes_are_not_a_sound() {
        let loaded = SoundLoader::load(Cow::Borrowed(b"not a wav file"), "wav");
        assert!(loaded.is_err());
    }
}
