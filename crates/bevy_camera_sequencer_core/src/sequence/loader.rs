use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    reflect::TypePath,
};

use super::{CameraSequence, serial::CameraSequenceSerial};
use crate::errors::AssetLoaderError;

#[derive(Default, TypePath)]
pub struct CameraSequenceLoader;

impl AssetLoader for CameraSequenceLoader {
    type Asset = CameraSequence;
    type Settings = ();
    type Error = AssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        let serial: CameraSequenceSerial = ron::de::from_bytes(&bytes)?;
        Ok(CameraSequence::from(serial))
    }

    fn extensions(&self) -> &[&str] {
        &["camseq.ron"]
    }
}
