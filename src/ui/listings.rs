use eframe::egui::{self, Color32, RichText, ScrollArea};

use super::media::MediaCache;
use crate::store::{ResultStore, ViewMode};

const PHOTO_SIZE: egui::Vec2 = egui::Vec2::new(150.0, 100.0);

/// Render the listings side of the app: heading, filter box, load-all
/// control, and the card list. Returns true when "Load all" was clicked.
pub fn render_listings_panel(
    ui: &mut egui::Ui,
    store: &ResultStore,
    filter_input: &mut String,
    catalog_loading: bool,
    origin: &str,
    media: &mut MediaCache,
) -> bool {
    let heading = match store.mode() {
        ViewMode::FreshSearch => "Search Results",
        ViewMode::FullCatalog => "All Properties",
    };

    let mut load_all_clicked = false;
    ui.horizontal(|ui| {
        ui.heading(heading);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if catalog_loading {
                ui.spinner();
            } else if ui.button("Load all properties").clicked() {
                load_all_clicked = true;
            }
        });
    });

    ui.add_space(4.0);
    ui.add(
        egui::TextEdit::singleline(filter_input)
            .hint_text("Filter by title, address, price...")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    ui.separator();

    if store.is_empty() {
        let copy = match store.mode() {
            ViewMode::FreshSearch => {
                "No results yet. Ask Scout for a search and matching properties will show up here."
            }
            ViewMode::FullCatalog => "No saved listings yet.",
        };
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(copy).weak().italics());
        });
        return load_all_clicked;
    }

    let displayed = store.displayed();
    ui.label(
        RichText::new(format!(
            "{} of {} properties",
            displayed.len(),
            store.listings().len()
        ))
        .small()
        .weak(),
    );
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if displayed.is_empty() {
                ui.label(
                    RichText::new("No properties match the current filter.")
                        .weak()
                        .italics(),
                );
                return;
            }

            for (idx, listing) in displayed.iter().enumerate() {
                // Card ids can collide when `_id` is absent; the index keeps
                // egui widget state unique either way.
                ui.push_id(idx, |ui| {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            render_photo(ui, media, listing.image_source().resolve(origin));

                            ui.vertical(|ui| {
                                ui.label(RichText::new(&listing.title).strong());
                                ui.label(RichText::new(&listing.address).weak());
                                ui.add_space(2.0);

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(listing.display_price())
                                            .color(Color32::from_rgb(144, 238, 144))
                                            .strong(),
                                    );
                                    ui.label(
                                        RichText::new(format!(
                                            "{} bd · {} ba",
                                            listing.bedrooms, listing.bathrooms
                                        ))
                                        .small(),
                                    );
                                    if listing.pet_friendly == Some(true) {
                                        ui.label(
                                            RichText::new("Pets OK")
                                                .small()
                                                .color(Color32::from_rgb(230, 179, 90)),
                                        );
                                    }
                                });

                                if !listing.description.is_empty() {
                                    ui.add_space(2.0);
                                    ui.label(RichText::new(&listing.description).small());
                                }

                                let lease = listing.lease_url(origin);
                                let info = listing.info_url(origin);
                                if lease.is_some() || info.is_some() {
                                    ui.add_space(2.0);
                                    ui.horizontal(|ui| {
                                        if let Some(url) = lease {
                                            ui.hyperlink_to(
                                                RichText::new("Draft lease").small(),
                                                url,
                                            );
                                        }
                                        if let Some(url) = info {
                                            ui.hyperlink_to(
                                                RichText::new("Info sheet").small(),
                                                url,
                                            );
                                        }
                                    });
                                }
                            });
                        });
                    });
                });
                ui.add_space(6.0);
            }
        });

    load_all_clicked
}

fn render_photo(ui: &mut egui::Ui, media: &mut MediaCache, url: Option<String>) {
    match url.and_then(|url| media.texture_for(&url).cloned()) {
        Some(texture) => {
            ui.add(
                egui::Image::new(&texture)
                    .fit_to_exact_size(PHOTO_SIZE)
                    .rounding(4.0),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(PHOTO_SIZE, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 4.0, Color32::from_gray(40));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No photo",
                egui::TextStyle::Small.resolve(ui.style()),
                Color32::from_gray(120),
            );
        }
    }
}
