use std::collections::HashMap;

use eframe::egui;
use flume::{Receiver, Sender};
use image::GenericImageView;

use crate::api::ApiClient;

enum MediaState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

/// Background fetch + decode cache for listing photos, keyed by resolved
/// URL. Fetches run on the UI's tokio runtime; finished bodies come back
/// over a flume channel and are decoded into textures on the UI thread.
pub struct MediaCache {
    api: ApiClient,
    runtime: tokio::runtime::Handle,
    entries: HashMap<String, MediaState>,
    done_tx: Sender<(String, Option<Vec<u8>>)>,
    done_rx: Receiver<(String, Option<Vec<u8>>)>,
}

impl MediaCache {
    pub fn new(api: ApiClient, runtime: tokio::runtime::Handle) -> Self {
        let (done_tx, done_rx) = flume::unbounded();
        Self {
            api,
            runtime,
            entries: HashMap::new(),
            done_tx,
            done_rx,
        }
    }

    /// Drain finished fetches and turn them into textures. Call once per
    /// frame before rendering cards.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((url, bytes)) = self.done_rx.try_recv() {
            let state = match bytes.and_then(|bytes| decode_texture(ctx, &url, &bytes)) {
                Some(texture) => MediaState::Ready(texture),
                None => MediaState::Failed,
            };
            self.entries.insert(url, state);
        }
    }

    /// Texture for a photo URL, kicking off a background fetch on first
    /// sight. Returns `None` while loading or after a failed fetch; the
    /// caller renders a placeholder either way.
    pub fn texture_for(&mut self, url: &str) -> Option<&egui::TextureHandle> {
        if !self.entries.contains_key(url) {
            self.entries.insert(url.to_string(), MediaState::Loading);

            let api = self.api.clone();
            let tx = self.done_tx.clone();
            let fetch_url = url.to_string();
            self.runtime.spawn(async move {
                let bytes = match api.fetch_bytes(&fetch_url).await {
                    Ok(bytes) => Some(bytes),
                    Err(error) => {
                        tracing::debug!("Failed to fetch listing photo {fetch_url}: {error}");
                        None
                    }
                };
                let _ = tx.send((fetch_url, bytes));
            });
        }

        match self.entries.get(url) {
            Some(MediaState::Ready(texture)) => Some(texture),
            _ => None,
        }
    }
}

fn decode_texture(ctx: &egui::Context, name: &str, bytes: &[u8]) -> Option<egui::TextureHandle> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(error) => {
            tracing::debug!("Failed to decode listing photo {name}: {error}");
            return None;
        }
    };

    let size = [decoded.width() as usize, decoded.height() as usize];
    let pixels = decoded.to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}
