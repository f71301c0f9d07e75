use crate::PickOutcome;
use dioxus::prelude::*;
use photo_picker::{LibraryHandle, PickedImage};

#[component]
pub fn HomeScreen(
    outcome: PickOutcome,
    library: LibraryHandle,
    on_open_picker: EventHandler<()>,
) -> Element {
    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #0066cc; text-align: center; margin-bottom: 24px; margin-top: 48px; font-size: 28px; font-weight: 700;",
                "📷 Photo Picker"
            }

            button {
                style: "width: 100%; padding: 16px; font-size: 16px; background: #0066cc; color: white; border: none; border-radius: 8px;",
                onclick: move |_| on_open_picker.call(()),
                "Pick photos"
            }

            div { style: "margin-top: 24px;",
                match outcome {
                    PickOutcome::None => rsx! {
                        p { style: "color: #999; text-align: center;", "No photos picked yet" }
                    },
                    PickOutcome::Cancelled => rsx! {
                        p { style: "color: #c33; text-align: center;", "Picker cancelled" }
                    },
                    PickOutcome::Finished(images) => rsx! {
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px; color: #333;",
                            "{images.len()} photos picked"
                        }
                        for (index, image) in images.into_iter().enumerate() {
                            PickedRow { key: "{index}", image, library: library.clone() }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn PickedRow(image: PickedImage, library: LibraryHandle) -> Element {
    let url = image.url().to_string();
    let label = if image.is_capture() { "Camera" } else { "Library" };
    // Clones share the grid's cache, so the tile is normally rendered already
    let thumbnail = image
        .thumbnail_data_url(library.0.as_ref())
        .map(str::to_owned);

    rsx! {
        div { style: "display: flex; align-items: center; gap: 12px; padding: 8px; margin-bottom: 8px; background: white; border-radius: 8px;",
            match thumbnail {
                Some(src) => rsx! {
                    img { src: "{src}", style: "width: 64px; height: 64px; object-fit: cover; border-radius: 4px;" }
                },
                None => rsx! {
                    div { style: "width: 64px; height: 64px; display: flex; align-items: center; justify-content: center; background: #f0f0f0; color: #999; border-radius: 4px;",
                        "📷"
                    }
                },
            }
            div { style: "min-width: 0; flex: 1;",
                div { style: "font-size: 12px; color: #999;", "{label}" }
                div { style: "font-size: 14px; color: #333; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{url}"
                }
            }
        }
    }
}
