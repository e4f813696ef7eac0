use iced::widget::{
    button, column, container, horizontal_space, image as image_widget, row, text, Column,
};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::Arc;

mod filter;
mod photo;
mod state;
mod ui;

use filter::kind::{FilterKind, ParamKey};
use filter::FilterError;
use image::RgbaImage;
use photo::export::{ExportRequest, SHARE_BASENAME};
use state::library::{review_due, Library};
use state::session::{Session, SessionPhase};

/// Main application state
struct InstaFilter {
    /// The persisted usage database
    library: Library,
    /// The in-memory editing session
    session: Session,
    /// Render handle for the processed preview
    preview: Option<image_widget::Handle>,
    /// Whether the filter picker is showing instead of the main screen
    showing_filters: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Pick Photo" button
    PickPhoto,
    /// A photo load finished; the token ties it to the load that started it
    PhotoLoaded(u64, Result<Arc<RgbaImage>, FilterError>),
    /// Intensity slider moved
    IntensityChanged(f32),
    /// Scale slider moved
    ScaleChanged(f32),
    /// Radius slider moved
    RadiusChanged(f32),
    /// User clicked the "Change Filter" button
    ChangeFilter,
    /// User picked a filter from the picker
    FilterSelected(FilterKind),
    /// User dismissed the picker without choosing
    CancelFilterPicker,
    /// User clicked the "Share" button
    SharePhoto,
    /// Background export completed
    ExportComplete(Result<String, FilterError>),
}

impl InstaFilter {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Initialize the database
        // If this fails, we panic because the app cannot function without its database
        let library = Library::new()
            .expect("Failed to initialize database. Check permissions and disk space.");

        let filter_count = library.filter_count().unwrap_or(0);
        let share_count = library.share_count().unwrap_or(0);
        println!(
            "🎨 InstaFilter initialized with {} filter changes and {} exports on record",
            filter_count, share_count
        );

        let status = match library.most_used_filter() {
            Ok(Some((favourite, uses))) => format!(
                "Ready. {} filter changes so far, favourite: {} ({}x).",
                filter_count, favourite, uses
            ),
            _ => String::from("Ready. Pick a photo to get started."),
        };

        (
            InstaFilter {
                library,
                session: Session::new(),
                preview: None,
                showing_filters: false,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickPhoto => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select a Photo")
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
                    .pick_file();

                if let Some(path) = picked {
                    self.status = format!("Loading {}...", path.display());
                    return self.start_load(path);
                }

                Task::none()
            }
            Message::PhotoLoaded(token, Ok(pixels)) => {
                if !self.session.finish_load(token, pixels) {
                    // A newer pick or filter change superseded this load
                    println!("⏭️  Dropping stale photo load (token {})", token);
                    return Task::none();
                }
                self.apply_processing();
                Task::none()
            }
            Message::PhotoLoaded(_, Err(e)) => {
                // Fail silent: whatever was on screen stays on screen
                eprintln!("⚠️  Photo load failed: {e}");
                self.status = String::from("Could not load that photo.");
                Task::none()
            }
            Message::IntensityChanged(value) => self.slider_changed(ParamKey::Intensity, value),
            Message::ScaleChanged(value) => self.slider_changed(ParamKey::Scale, value),
            Message::RadiusChanged(value) => self.slider_changed(ParamKey::Radius, value),
            Message::ChangeFilter => {
                if self.session.has_output() {
                    self.showing_filters = true;
                }
                Task::none()
            }
            Message::FilterSelected(kind) => {
                self.showing_filters = false;
                self.record_filter_change(kind);

                // Changing filter always reloads the source before applying
                if let Some(token) = self.session.select_filter(kind) {
                    let path = self.session.photo_path().map(PathBuf::from);
                    if let Some(path) = path {
                        self.status = format!("Applying {}...", kind);
                        return Task::perform(photo::loader::load_photo(path), move |result| {
                            Message::PhotoLoaded(token, result.map(Arc::new))
                        });
                    }
                }
                Task::none()
            }
            Message::CancelFilterPicker => {
                self.showing_filters = false;
                Task::none()
            }
            Message::SharePhoto => {
                let Some(processed) = self.session.processed().cloned() else {
                    return Task::none();
                };

                // Show the native save dialog, pre-filled with the fixed
                // artifact name
                let dest = FileDialog::new()
                    .set_title("Share Filtered Photo")
                    .set_file_name(SHARE_BASENAME)
                    .add_filter("PNG image", &["png"])
                    .save_file();

                if let Some(dest) = dest {
                    let request = ExportRequest {
                        pixels: processed,
                        dest,
                        filter: self.session.filter,
                        params: self.session.params,
                        db_path: self.library.path().clone(),
                    };
                    self.status = String::from("Sharing...");
                    return Task::perform(
                        photo::export::export_photo(request),
                        Message::ExportComplete,
                    );
                }

                Task::none()
            }
            Message::ExportComplete(Ok(path)) => {
                self.status = format!("✅ Shared to {}", path);
                Task::none()
            }
            Message::ExportComplete(Err(e)) => {
                eprintln!("⚠️  Export failed: {e}");
                self.status = String::from("Could not share the photo.");
                Task::none()
            }
        }
    }

    /// Kick off an asynchronous photo load and tag it with a fresh token.
    fn start_load(&mut self, path: PathBuf) -> Task<Message> {
        let token = self.session.begin_load(path.clone());
        Task::perform(photo::loader::load_photo(path), move |result| {
            Message::PhotoLoaded(token, result.map(Arc::new))
        })
    }

    /// Route a slider move to the session, then recompute.
    ///
    /// A slider the current filter does not support is a no-op: it must not
    /// alter the filter's inputs or recompute the output.
    fn slider_changed(&mut self, key: ParamKey, value: f32) -> Task<Message> {
        // Sliders are inert until output is on screen, and a slider the
        // current filter does not support stays inert after that too.
        if !self.session.has_output() || !self.session.filter.supports(key) {
            return Task::none();
        }

        match key {
            ParamKey::Intensity => self.session.params.set_intensity(value),
            ParamKey::Scale => self.session.params.set_scale(value),
            ParamKey::Radius => self.session.params.set_radius(value),
            ParamKey::Image => {}
        }

        self.apply_processing();
        Task::none()
    }

    /// Recompute the preview from (filter, source, params).
    ///
    /// The output is always derived from scratch; on failure the previous
    /// preview stays untouched.
    fn apply_processing(&mut self) {
        let Some(source) = self.session.source() else {
            return;
        };

        match filter::binder::apply(self.session.filter, source, &self.session.params) {
            Ok(output) => {
                let handle = image_widget::Handle::from_rgba(
                    output.width(),
                    output.height(),
                    output.to_vec(),
                );
                self.session.set_processed(Arc::new(output));
                self.preview = Some(handle);
                self.status = format!("{} applied.", self.session.filter);
            }
            Err(e) => {
                eprintln!("⚠️  Filter failed: {e}");
            }
        }
    }

    /// Persist the filter change and fire the one-time review ask when the
    /// counter lands exactly on the threshold.
    fn record_filter_change(&mut self, kind: FilterKind) {
        match self.library.record_filter_change(kind.slug()) {
            Ok(count) => {
                if review_due(count) {
                    request_review();
                }
            }
            Err(e) => {
                eprintln!("⚠️  Could not persist filter change: {e:?}");
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if self.showing_filters {
            return container(ui::picker::filter_picker())
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        }

        let photo_area: Element<Message> = match &self.preview {
            Some(handle) => image_widget(handle.clone()).into(),
            None => {
                let hint = match self.session.phase() {
                    SessionPhase::NoImage => "No picture available. Pick a photo to get started.",
                    _ => "Loading photo...",
                };
                text(hint).size(18).into()
            }
        };

        let content: Column<Message> = column![
            text("InstaFilter").size(40),
            container(photo_area)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            button("Pick Photo").on_press(Message::PickPhoto).padding(10),
            ui::controls::parameter_sliders(self.session.filter, &self.session.params),
            row![
                button("Change Filter")
                    .on_press_maybe(self.session.has_output().then_some(Message::ChangeFilter))
                    .padding(10),
                text(self.session.filter.display_name()),
                horizontal_space(),
                button("Share")
                    .on_press_maybe(self.session.has_output().then_some(Message::SharePhoto))
                    .padding(10),
            ]
            .spacing(20)
            .align_y(Alignment::Center),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// One-time review ask, shown as a native dialog.
fn request_review() {
    println!("🌟 Review threshold reached, asking for a rating");
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Enjoying InstaFilter?")
        .set_description(
            "You have changed filters 20 times! If the app is useful to you, \
             please consider leaving a review.",
        )
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn main() -> iced::Result {
    iced::application("InstaFilter", InstaFilter::update, InstaFilter::view)
        .theme(InstaFilter::theme)
        .centered()
        .run_with(InstaFilter::new)
}
