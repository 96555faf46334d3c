use eframe::egui::{self, Color32, RichText, ScrollArea};

use crate::channel::{ChatMessage, Role};

/// Render the conversation transcript between the user and the search agent.
pub fn render_transcript(ui: &mut egui::Ui, messages: &[ChatMessage], sending: bool) {
    ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for msg in messages {
                let is_user = msg.role == Role::User;
                let time_str = msg.sent_at.format("%H:%M").to_string();

                ui.horizontal(|ui| {
                    if is_user {
                        ui.add_space(ui.available_width() * 0.25);
                    }

                    ui.group(|ui| {
                        ui.set_max_width(ui.available_width() * 0.75);

                        let (role_label, role_color, bg_color) = if is_user {
                            ("You", Color32::from_rgb(100, 149, 237), Color32::from_rgb(30, 40, 60))
                        } else {
                            ("Scout", Color32::from_rgb(144, 238, 144), Color32::from_rgb(30, 50, 40))
                        };

                        ui.visuals_mut().widgets.noninteractive.bg_fill = bg_color;

                        ui.horizontal(|ui| {
                            ui.label(RichText::new(role_label).color(role_color).strong());
                            ui.label(RichText::new(time_str).weak().small());
                        });

                        ui.label(&msg.content);
                    });

                    if !is_user {
                        ui.add_space(ui.available_width());
                    }
                });

                ui.add_space(8.0);
            }

            if sending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("Searching listings... this can take a while.")
                            .weak()
                            .italics(),
                    );
                });
                ui.add_space(8.0);
            }
        });
}
