use eframe::egui;
use flume::{Receiver, Sender};

use super::media::MediaCache;
use crate::api::{ApiClient, ApiError, ChatReply};
use crate::channel::ConversationChannel;
use crate::listing::Listing;
use crate::store::ResultStore;

/// Completion events for the two outstanding-request types, delivered from
/// the tokio runtime back to the UI thread. Each carries the generation
/// ticket its request was dispatched with so the store can drop stale ones.
pub enum UiEvent {
    ChatFinished {
        generation: u64,
        outcome: Result<ChatReply, ApiError>,
    },
    CatalogFinished {
        generation: u64,
        outcome: Result<Vec<Listing>, ApiError>,
    },
}

pub struct EstateApp {
    api_client: ApiClient,
    runtime: tokio::runtime::Runtime,
    event_tx: Sender<UiEvent>,
    event_rx: Receiver<UiEvent>,
    channel: ConversationChannel,
    store: ResultStore,
    media: MediaCache,
    user_input: String,
    filter_input: String,
    catalog_loading: bool,
}

impl EstateApp {
    pub fn new(api_client: ApiClient) -> Self {
        let runtime = tokio::runtime::Runtime::new().expect("UI tokio runtime");
        let (event_tx, event_rx) = flume::unbounded();
        let media = MediaCache::new(api_client.clone(), runtime.handle().clone());

        Self {
            api_client,
            runtime,
            event_tx,
            event_rx,
            channel: ConversationChannel::new(),
            store: ResultStore::new(),
            media,
            user_input: String::new(),
            filter_input: String::new(),
            catalog_loading: false,
        }
    }

    fn send_current_input(&mut self) {
        let input = self.user_input.clone();
        let Some(utterance) = self.channel.begin_send(&input) else {
            return;
        };
        self.user_input.clear();

        let generation = self.store.begin_request();
        let api = self.api_client.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let outcome = api.chat(&utterance).await;
            let _ = tx.send(UiEvent::ChatFinished {
                generation,
                outcome,
            });
        });
    }

    fn load_catalog(&mut self) {
        if self.catalog_loading {
            return;
        }
        self.catalog_loading = true;

        let generation = self.store.begin_request();
        let api = self.api_client.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let outcome = api.listings().await;
            let _ = tx.send(UiEvent::CatalogFinished {
                generation,
                outcome,
            });
        });
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ChatFinished {
                generation,
                outcome,
            } => match outcome {
                Ok(ChatReply {
                    response,
                    properties,
                }) => {
                    tracing::info!(
                        properties = properties.len(),
                        "Chat turn completed"
                    );
                    self.channel.complete(response);
                    if !properties.is_empty()
                        && self.store.apply_search_results(generation, properties)
                    {
                        self.filter_input.clear();
                    }
                }
                Err(error) => {
                    tracing::error!("Chat request failed: {error}");
                    self.channel.complete(error.user_message());
                }
            },
            UiEvent::CatalogFinished {
                generation,
                outcome,
            } => {
                self.catalog_loading = false;
                match outcome {
                    Ok(listings) if listings.is_empty() => {
                        tracing::warn!("Catalog returned no listings; keeping current view");
                    }
                    Ok(listings) => {
                        if self.store.apply_catalog(generation, listings) {
                            self.filter_input.clear();
                        }
                    }
                    Err(error) => {
                        tracing::warn!("Failed to load catalog: {error}; keeping current view");
                    }
                }
            }
        }
    }
}

impl eframe::App for EstateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
        self.media.poll(ctx);

        let origin = self.api_client.base_url().to_string();

        egui::SidePanel::right("listings_panel")
            .resizable(true)
            .default_width(480.0)
            .show(ctx, |ui| {
                let load_all = super::listings::render_listings_panel(
                    ui,
                    &self.store,
                    &mut self.filter_input,
                    self.catalog_loading,
                    &origin,
                    &mut self.media,
                );
                if load_all {
                    self.load_catalog();
                }
            });

        if self.filter_input != self.store.filter_text() {
            self.store.set_filter(self.filter_input.clone());
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Estate Scout");
            ui.label(
                egui::RichText::new("Chat with the property-search agent")
                    .weak()
                    .italics(),
            );
            ui.add_space(6.0);
            ui.separator();

            let composer_reserved = 96.0_f32;
            let chat_height = (ui.available_height() - composer_reserved).max(0.0);
            ui.allocate_ui_with_layout(
                egui::vec2(ui.available_width(), chat_height),
                egui::Layout::top_down(egui::Align::Min),
                |ui| {
                    super::chat::render_transcript(
                        ui,
                        self.channel.history(),
                        self.channel.is_sending(),
                    );
                },
            );

            ui.separator();
            ui.label(
                egui::RichText::new("Press Enter to send. Shift+Enter inserts a newline.")
                    .small()
                    .weak(),
            );
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let sending = self.channel.is_sending();
                let response = ui.add_enabled(
                    !sending,
                    egui::TextEdit::multiline(&mut self.user_input)
                        .hint_text("Describe the place you're looking for...")
                        .desired_rows(2)
                        .desired_width(ui.available_width() - 80.0),
                );

                let send_shortcut = response.has_focus()
                    && ui.input(|i| {
                        i.key_pressed(egui::Key::Enter)
                            && !i.modifiers.shift
                            && !i.modifiers.ctrl
                            && !i.modifiers.command
                            && !i.modifiers.alt
                    });
                let send_clicked = ui
                    .add_enabled(!sending, egui::Button::new("Send"))
                    .clicked();

                if send_shortcut || send_clicked {
                    self.send_current_input();
                }
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
