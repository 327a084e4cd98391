//! Drawing for the list area, signup form, message area and confirmation
//! dialog. Panels never talk to the backend; they report [`UiAction`]s.

use client_core::{
    view::{
        ActivityCard, ActivityListView, ActivitySelector, ParticipantList, SignupForm,
        LOADING_TEXT, NO_PARTICIPANTS_TEXT, SELECTOR_PLACEHOLDER,
    },
    StatusMessage, StatusSeverity,
};
use shared::protocol::UnregisterIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Reload,
    SubmitSignup,
    RequestUnregister(UnregisterIntent),
    ResolveUnregister { confirmed: bool },
}

const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);

pub fn message_area(ui: &mut egui::Ui, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let color = match status.severity {
        StatusSeverity::Success => SUCCESS_COLOR,
        StatusSeverity::Error => ERROR_COLOR,
    };
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.colored_label(color, &status.text);
        });
}

pub fn activity_list(ui: &mut egui::Ui, list: &ActivityListView, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.heading("Available Activities");
        if ui.small_button("Reload").clicked() {
            actions.push(UiAction::Reload);
        }
    });
    ui.separator();

    match list {
        ActivityListView::Loading => {
            ui.label(LOADING_TEXT);
        }
        ActivityListView::Failed(text) => {
            ui.colored_label(ERROR_COLOR, text);
        }
        ActivityListView::Loaded(cards) => {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for card in cards {
                        activity_card(ui, card, actions);
                        ui.add_space(8.0);
                    }
                });
        }
    }
}

fn activity_card(ui: &mut egui::Ui, card: &ActivityCard, actions: &mut Vec<UiAction>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(card.name.as_str()).strong().size(18.0));
        ui.label(&card.description);
        ui.label(&card.schedule_line);
        ui.label(&card.availability_line);
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&card.participants_heading).strong());
        match &card.participants {
            ParticipantList::Empty => {
                ui.label(egui::RichText::new(NO_PARTICIPANTS_TEXT).italics());
            }
            ParticipantList::Entries(entries) => {
                for entry in entries {
                    ui.horizontal(|ui| {
                        ui.label(entry.email.as_str());
                        if ui
                            .small_button("✖")
                            .on_hover_text("Unregister")
                            .clicked()
                        {
                            actions.push(UiAction::RequestUnregister(entry.unregister.clone()));
                        }
                    });
                }
            }
        }
    });
}

pub fn signup_form(
    ui: &mut egui::Ui,
    form: &mut SignupForm,
    selector: &ActivitySelector,
    actions: &mut Vec<UiAction>,
) {
    ui.heading("Sign Up for an Activity");
    ui.separator();

    ui.label("Student Email:");
    let email = ui.add(
        egui::TextEdit::singleline(&mut form.email).hint_text("your-email@mergington.edu"),
    );
    let submitted_with_enter = email.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.label("Select Activity:");
    let selected_text = form
        .selected_activity
        .as_ref()
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| SELECTOR_PLACEHOLDER.to_string());
    egui::ComboBox::from_id_salt("activity_selector")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut form.selected_activity, None, SELECTOR_PLACEHOLDER);
            for name in selector.options() {
                ui.selectable_value(
                    &mut form.selected_activity,
                    Some(name.clone()),
                    name.as_str(),
                );
            }
        });

    ui.add_space(6.0);
    if ui.button("Sign Up").clicked() || submitted_with_enter {
        actions.push(UiAction::SubmitSignup);
    }
}

/// Modal prompt for a pending unregister.
pub fn unregister_confirmation(
    ctx: &egui::Context,
    intent: &UnregisterIntent,
    actions: &mut Vec<UiAction>,
) {
    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(intent.confirmation_prompt());
            ui.horizontal(|ui| {
                if ui.button("Unregister").clicked() {
                    actions.push(UiAction::ResolveUnregister { confirmed: true });
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::ResolveUnregister { confirmed: false });
                }
            });
        });
}
