use dioxus::prelude::*;
use photo_picker::{
    CameraHandle, DirectoryLibrary, ImagePickerView, LibraryHandle, PickedImage, PickerConfig,
    SystemCamera,
};

mod components;
mod filesystem;

use components::HomeScreen;

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("photo-picker"),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Screen navigation
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Home,
    Picker,
}

/// What the last picker session returned
#[derive(Clone, PartialEq, Debug, Default)]
pub enum PickOutcome {
    #[default]
    None,
    Finished(Vec<PickedImage>),
    Cancelled,
}

/// Library, camera and settings shared by every picker session
#[derive(Clone, PartialEq)]
struct PickerSetup {
    config: PickerConfig,
    library: LibraryHandle,
    camera: CameraHandle,
}

impl PickerSetup {
    fn load() -> Self {
        let data_dir = filesystem::get_app_data_dir();
        let config = filesystem::load_config(&data_dir);
        let library = DirectoryLibrary::open(filesystem::prepare_library_root());

        Self {
            config,
            library: LibraryHandle::new(library),
            camera: CameraHandle::new(SystemCamera::default()),
        }
    }
}

#[component]
fn App() -> Element {
    let mut current_screen = use_signal(|| Screen::Home);
    let mut outcome = use_signal(PickOutcome::default);
    let setup = use_hook(PickerSetup::load);

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            match current_screen() {
                Screen::Home => rsx! {
                    HomeScreen {
                        outcome: outcome(),
                        library: setup.library.clone(),
                        on_open_picker: move |_| current_screen.set(Screen::Picker),
                    }
                },
                Screen::Picker => rsx! {
                    ImagePickerView {
                        config: setup.config.clone(),
                        library: setup.library.clone(),
                        camera: setup.camera.clone(),
                        on_finish: move |images: Vec<PickedImage>| {
                            log::info!("Received {} images", images.len());
                            outcome.set(PickOutcome::Finished(images));
                            current_screen.set(Screen::Home);
                        },
                        on_cancel: move |_| {
                            outcome.set(PickOutcome::Cancelled);
                            current_screen.set(Screen::Home);
                        },
                    }
                },
            }
        }
    }
}
