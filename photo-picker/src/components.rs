//! Dioxus rendering of the picker.
//!
//! [`ImagePickerView`] owns an [`ImagePicker`] in a signal and renders its
//! navigation bar, album carousel and grid. Library and camera calls run on
//! blocking tasks; their results are applied back on the UI task.

use dioxus::prelude::*;

use crate::camera::{capture_photo, CameraHandle};
use crate::config::{Color, PickerConfig};
use crate::layout::CellAnimation;
use crate::library::{fetch_albums, fetch_assets, fetch_thumbnail_url, LibraryHandle};
use crate::list::{AssetRequest, GridCell, ListState, TapOutcome};
use crate::models::PickedImage;
use crate::picker::{
    BarButtonItem, ImagePicker, PickerDelegate, ACCESS_DENIED_MESSAGE, NO_CAMERA_DISMISS,
    NO_CAMERA_MESSAGE, NO_CAMERA_TITLE,
};

const CELL_KEYFRAMES: &str =
    "@keyframes photo-picker-cell-in { from { transform: scale(0); } to { transform: scale(1); } }";

/// Forwards picker outcomes to component event handlers
struct CallbackDelegate {
    on_finish: EventHandler<Vec<PickedImage>>,
    on_cancel: EventHandler<()>,
}

impl PickerDelegate for CallbackDelegate {
    fn did_finish_selection(&mut self, images: Vec<PickedImage>) {
        self.on_finish.call(images);
    }

    fn did_cancel(&mut self) {
        self.on_cancel.call(());
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ThumbnailState {
    Loading,
    Loaded(String),
    Failed,
}

#[derive(Clone, PartialEq)]
enum CellView {
    TakePhoto,
    Photo { item: PickedImage, selected: bool },
}

async fn load_album_assets(mut picker: Signal<ImagePicker>, request: AssetRequest) {
    let library = picker.peek().library();
    let result = fetch_assets(library, request.album.clone()).await;
    picker.write().apply_assets(&request, result);
}

/// Full-screen photo picker
#[component]
pub fn ImagePickerView(
    config: PickerConfig,
    library: LibraryHandle,
    camera: CameraHandle,
    on_finish: EventHandler<Vec<PickedImage>>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut picker = use_signal(|| {
        let mut picker = ImagePicker::new(config.clone(), library.0.clone(), camera.0.clone());
        picker.set_delegate(CallbackDelegate {
            on_finish,
            on_cancel,
        });
        picker
    });
    let mut viewport = use_signal(|| (0.0f32, 0.0f32));
    let mut show_no_camera = use_signal(|| false);

    // Albums load once per picker
    use_hook(|| {
        spawn(async move {
            let library = picker.peek().library();
            let result = fetch_albums(library).await;
            let request = picker.write().apply_albums(result);
            if let Some(request) = request {
                load_album_assets(picker, request).await;
            }
        });
    });

    let mut on_select_album = move |index: usize| {
        let request = picker.write().select_album(index);
        if let Some(request) = request {
            spawn(load_album_assets(picker, request));
        }
    };

    let on_tap = move |index: usize| {
        let outcome = picker.write().tap(index);
        match outcome {
            TapOutcome::LaunchCamera => {
                let camera = picker.peek().camera();
                spawn(async move {
                    match capture_photo(camera).await {
                        Ok(photo) => picker.write().camera_did_capture(photo),
                        Err(e) => {
                            log::warn!("Camera capture ended without photo: {}", e);
                            picker.write().camera_did_cancel();
                        }
                    }
                });
            }
            TapOutcome::CameraUnavailable => show_no_camera.set(true),
            _ => {}
        }
    };

    let state = picker.read();
    let (width, height) = viewport();
    let side = state.cell_side(width, height);
    let selection_color = state.config().selection_color;
    let add = state.bar_button(BarButtonItem::Add);
    let cancel = state.bar_button(BarButtonItem::Cancel);
    let list_state = state.list().state();
    let titles = state.list().carousel().titles().to_vec();
    let selected_album = state.list().carousel().selected_item();

    let cells: Vec<CellView> = (0..state.list().item_count())
        .filter_map(|index| match state.list().cell(index)? {
            GridCell::TakePhoto => Some(CellView::TakePhoto),
            GridCell::Photo(item) => Some(CellView::Photo {
                item: item.clone(),
                selected: state.list().is_selected(index, state.selection()),
            }),
        })
        .collect();
    drop(state);

    rsx! {
        style { {CELL_KEYFRAMES} }
        div { style: "display: flex; flex-direction: column; width: 100%; height: 100vh; background: #fff;",
            // Navigation bar
            div { style: "display: flex; align-items: center; gap: 8px; padding: 8px 12px; border-bottom: 1px solid #ddd; background: #f8f8f8;",
                button {
                    style: "padding: 8px 12px; background: none; border: none; color: #0066cc; font-size: 16px; cursor: pointer;",
                    disabled: !cancel.enabled,
                    onclick: move |_| picker.write().cancel_action(),
                    "{cancel.title}"
                }
                div { style: "flex: 1; min-width: 0;",
                    AlbumCarouselView {
                        titles,
                        selected: selected_album,
                        on_select: move |index| on_select_album(index),
                    }
                }
                button {
                    style: "padding: 8px 12px; background: none; border: none; color: #0066cc; font-size: 16px; font-weight: 600; cursor: pointer;",
                    disabled: !add.enabled,
                    onclick: move |_| picker.write().add_action(),
                    "{add.title}"
                }
            }

            // Grid
            div {
                style: "flex: 1; overflow-y: auto; position: relative;",
                onresize: move |evt| {
                    if let Ok(size) = evt.get_content_box_size() {
                        viewport.set((size.width as f32, size.height as f32));
                    }
                },
                match list_state {
                    ListState::AccessDenied => rsx! { AccessDeniedView {} },
                    ListState::Loading if cells.is_empty() => rsx! {
                        div { style: "padding: 40px; text-align: center; color: #999;", "⏳" }
                    },
                    _ => rsx! {
                        div { style: "display: flex; flex-wrap: wrap; gap: 1px;",
                            for (index, cell) in cells.into_iter().enumerate() {
                                match cell {
                                    CellView::TakePhoto => {
                                        let key = "take-photo";
                                        rsx! {
                                            TakePhotoCell {
                                                key: "{key}",
                                                index,
                                                side,
                                                on_tap,
                                            }
                                        }
                                    }
                                    CellView::Photo { item, selected } => {
                                        let key = item.url().to_string();
                                        rsx! {
                                            ImageCell {
                                                key: "{key}",
                                                item,
                                                library: library.clone(),
                                                index,
                                                side,
                                                selected,
                                                selection_color,
                                                on_tap,
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }

        if show_no_camera() {
            NoCameraAlert { on_dismiss: move |_| show_no_camera.set(false) }
        }
    }
}

/// Horizontal strip of album titles
#[component]
pub fn AlbumCarouselView(
    titles: Vec<String>,
    selected: Option<usize>,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        div { style: "display: flex; gap: 10px; overflow-x: auto; white-space: nowrap; justify-content: center;",
            for (index, title) in titles.into_iter().enumerate() {
                button {
                    key: "{index}",
                    style: if selected == Some(index) {
                        "padding: 6px 10px; background: none; border: none; font-size: 20px; color: #000; font-weight: 400; cursor: pointer;"
                    } else {
                        "padding: 6px 10px; background: none; border: none; font-size: 20px; color: #999; font-weight: 300; cursor: pointer;"
                    },
                    onclick: move |_| on_select.call(index),
                    "{title}"
                }
            }
        }
    }
}

fn cell_style(side: f32, index: usize) -> String {
    let animation = CellAnimation::entrance(index);
    format!(
        "position: relative; width: {side}px; height: {side}px; overflow: hidden; cursor: pointer; background: #eee; animation: photo-picker-cell-in {}ms ease-in-out {}ms both;",
        animation.duration.as_millis(),
        animation.delay.as_millis(),
    )
}

/// One photo of the grid
#[component]
pub fn ImageCell(
    item: PickedImage,
    library: LibraryHandle,
    index: usize,
    side: f32,
    selected: bool,
    selection_color: Color,
    on_tap: EventHandler<usize>,
) -> Element {
    let check_side = side / 4.0;
    let check_font = check_side * 0.6;
    let color = selection_color.to_css();
    let mut thumbnail = use_signal(|| ThumbnailState::Loading);

    // Tiles render on first display, off the UI task
    use_hook(|| {
        let library = library.0.clone();
        let item = item.clone();
        spawn(async move {
            match fetch_thumbnail_url(library, item).await {
                Some(url) => thumbnail.set(ThumbnailState::Loaded(url)),
                None => thumbnail.set(ThumbnailState::Failed),
            }
        });
    });

    rsx! {
        div { style: cell_style(side, index), onclick: move |_| on_tap.call(index),
            match thumbnail() {
                ThumbnailState::Loading => rsx! {},
                ThumbnailState::Loaded(url) => rsx! {
                    img { src: "{url}", style: "width: 100%; height: 100%; object-fit: cover; display: block;" }
                },
                ThumbnailState::Failed => rsx! {
                    div { style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #999;",
                        "📷"
                    }
                },
            }
            if selected {
                div { style: "position: absolute; inset: 0; background: rgba(255, 255, 255, 0.2); border: 0.6px solid {color}; box-sizing: border-box;" }
                div {
                    style: "position: absolute; right: 4px; bottom: 4px; width: {check_side}px; height: {check_side}px; border-radius: 50%; background: {color}; color: white; display: flex; align-items: center; justify-content: center; font-size: {check_font}px;",
                    "✓"
                }
            }
        }
    }
}

/// The camera tile at grid position 0
#[component]
pub fn TakePhotoCell(index: usize, side: f32, on_tap: EventHandler<usize>) -> Element {
    let icon_font = side / 3.0;

    rsx! {
        div { style: cell_style(side, index), onclick: move |_| on_tap.call(index),
            div { style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; font-size: {icon_font}px; background: #222; color: white;",
                "📷"
            }
        }
    }
}

#[component]
pub fn AccessDeniedView() -> Element {
    rsx! {
        div { style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; padding: 24px; text-align: center; color: #666; font-size: 16px;",
            "{ACCESS_DENIED_MESSAGE}"
        }
    }
}

#[component]
pub fn NoCameraAlert(on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 1000;",
            onclick: move |_| on_dismiss.call(()),
            div {
                style: "background: white; border-radius: 12px; padding: 20px; min-width: 260px; text-align: center;",
                onclick: move |e| e.stop_propagation(),
                h3 { style: "margin: 0 0 8px 0;", "{NO_CAMERA_TITLE}" }
                p { style: "margin: 0 0 16px 0; color: #333;", "{NO_CAMERA_MESSAGE}" }
                button {
                    style: "padding: 8px 24px; background: #0066cc; color: white; border: none; border-radius: 8px; font-size: 16px;",
                    onclick: move |_| on_dismiss.call(()),
                    "{NO_CAMERA_DISMISS}"
                }
            }
        }
    }
}
