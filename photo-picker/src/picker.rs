//! The picker shell: navigation stack, bar buttons and delegate delivery.
//!
//! `ImagePicker` owns the selection and the list controller. A host drives it
//! from its UI task and receives the outcome through a [`PickerDelegate`].

use std::sync::Arc;

use crate::camera::{CameraCapture, CapturedPhoto};
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::layout::{CellAnimation, GridLayout};
use crate::library::PhotoLibrary;
use crate::list::{AssetRequest, GridCell, PickerList, TapOutcome};
use crate::models::{Album, Asset, PickedImage};
use crate::selection::Selection;

pub const ACCESS_DENIED_MESSAGE: &str = "This application doesn't have access to your photos";
pub const NO_CAMERA_TITLE: &str = "Error";
pub const NO_CAMERA_MESSAGE: &str = "This device has no camera";
pub const NO_CAMERA_DISMISS: &str = "Ok";

/// Resolved title and state of a navigation bar button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarButton {
    pub title: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarButtonItem {
    Add,
    Cancel,
}

/// Navigation bar contents of one screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationItem {
    pub title: String,
    pub left_button: Option<BarButtonItem>,
    pub right_button: Option<BarButtonItem>,
}

impl NavigationItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Receiver of the picker outcome
pub trait PickerDelegate {
    fn did_finish_selection(&mut self, images: Vec<PickedImage>);
    fn did_cancel(&mut self);
}

pub struct ImagePicker {
    config: PickerConfig,
    library: Arc<dyn PhotoLibrary>,
    camera: Arc<dyn CameraCapture>,
    selection: Selection,
    list: PickerList,
    layout: GridLayout,
    screens: Vec<NavigationItem>,
    delegate: Option<Box<dyn PickerDelegate>>,
    finished: bool,
}

impl ImagePicker {
    pub fn new(
        config: PickerConfig,
        library: Arc<dyn PhotoLibrary>,
        camera: Arc<dyn CameraCapture>,
    ) -> Self {
        let mut picker = Self {
            selection: Selection::new(config.maximum_selection),
            list: PickerList::new(config.show_take_photo, config.allows_multiple_selection),
            layout: GridLayout::default(),
            screens: Vec::new(),
            delegate: None,
            finished: false,
            config,
            library,
            camera,
        };
        picker.push_screen(NavigationItem::default());
        picker
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn library(&self) -> Arc<dyn PhotoLibrary> {
        self.library.clone()
    }

    pub fn camera(&self) -> Arc<dyn CameraCapture> {
        self.camera.clone()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn list(&self) -> &PickerList {
        &self.list
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // Navigation

    /// Push a screen. The new top screen always carries the Add button; the
    /// root screen also gets Cancel unless it brings its own left button.
    pub fn push_screen(&mut self, mut item: NavigationItem) {
        item.right_button = Some(BarButtonItem::Add);
        if self.screens.is_empty() && item.left_button.is_none() {
            item.left_button = Some(BarButtonItem::Cancel);
        }
        self.screens.push(item);
    }

    /// Pop the top screen. The root screen stays.
    pub fn pop_screen(&mut self) -> Option<NavigationItem> {
        if self.screens.len() <= 1 {
            return None;
        }
        self.screens.pop()
    }

    pub fn top_item(&self) -> Option<&NavigationItem> {
        self.screens.last()
    }

    pub fn screens(&self) -> &[NavigationItem] {
        &self.screens
    }

    pub fn bar_button(&self, item: BarButtonItem) -> BarButton {
        match item {
            BarButtonItem::Add => self.selection.add_button(),
            BarButtonItem::Cancel => BarButton {
                title: "Cancel".to_string(),
                enabled: !self.finished,
            },
        }
    }

    // Delegate

    pub fn set_delegate(&mut self, delegate: impl PickerDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Hand the selection to the delegate. Only the first outcome is delivered.
    pub fn add_action(&mut self) {
        if self.finished {
            log::debug!("Picker already finished, ignoring add");
            return;
        }
        self.finished = true;

        let images = self.selection.to_vec();
        log::info!("Picker finished with {} images", images.len());
        match self.delegate.as_mut() {
            Some(delegate) => delegate.did_finish_selection(images),
            None => log::warn!("No picker delegate set, selection dropped"),
        }
    }

    pub fn cancel_action(&mut self) {
        if self.finished {
            log::debug!("Picker already finished, ignoring cancel");
            return;
        }
        self.finished = true;

        log::info!("Picker cancelled");
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_cancel();
        }
    }

    // Album and asset loading

    /// Enumerate albums and the first album synchronously
    pub fn load_albums(&mut self) {
        let library = self.library.clone();
        self.list.load_albums(library.as_ref());
    }

    pub fn apply_albums(&mut self, result: Result<Vec<Album>, PickerError>) -> Option<AssetRequest> {
        self.list.apply_albums(result)
    }

    pub fn select_album(&mut self, index: usize) -> Option<AssetRequest> {
        self.list.select_album(index)
    }

    /// Select an album and load it synchronously
    pub fn load_album(&mut self, index: usize) {
        if let Some(request) = self.list.select_album(index) {
            let library = self.library.clone();
            self.list.load_assets(library.as_ref(), &request);
        }
    }

    pub fn apply_assets(
        &mut self,
        request: &AssetRequest,
        result: Result<Vec<Asset>, PickerError>,
    ) -> bool {
        self.list.apply_assets(request, result)
    }

    // Grid interaction

    pub fn tap(&mut self, index: usize) -> TapOutcome {
        let camera_available = matches!(self.list.cell(index), Some(GridCell::TakePhoto))
            && self.camera.is_available();
        let outcome = self.list.tap(index, &mut self.selection, camera_available);
        log::debug!("Tap on cell {}: {:?}", index, outcome);
        outcome
    }

    /// A captured photo becomes the whole selection and finishes the picker
    pub fn camera_did_capture(&mut self, photo: CapturedPhoto) {
        let item = PickedImage::from_capture(photo);
        if let Err(e) = self.selection.replace(vec![item]) {
            log::error!("Failed to select captured photo: {}", e);
            return;
        }
        self.add_action();
    }

    /// The camera was dismissed without a photo. The picker stays open.
    pub fn camera_did_cancel(&mut self) {
        log::info!("Camera dismissed without a photo");
    }

    pub fn cell_side(&self, width: f32, height: f32) -> f32 {
        self.layout.cell_side_for(width, height, &self.config)
    }

    pub fn cell_animation(&self, index: usize) -> CellAnimation {
        CellAnimation::entrance(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::InMemoryLibrary;
    use crate::models::{AssetId, ImageData, MediaKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Outcomes {
        finished: Vec<Vec<String>>,
        cancelled: usize,
    }

    #[derive(Clone, Default)]
    struct RecordingDelegate(Rc<RefCell<Outcomes>>);

    impl PickerDelegate for RecordingDelegate {
        fn did_finish_selection(&mut self, images: Vec<PickedImage>) {
            let urls = images.iter().map(|i| i.url().to_string()).collect();
            self.0.borrow_mut().finished.push(urls);
        }

        fn did_cancel(&mut self) {
            self.0.borrow_mut().cancelled += 1;
        }
    }

    struct FakeCamera {
        available: bool,
        checks: AtomicUsize,
    }

    impl FakeCamera {
        fn new(available: bool) -> Self {
            Self {
                available,
                checks: AtomicUsize::new(0),
            }
        }
    }

    impl CameraCapture for FakeCamera {
        fn is_available(&self) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        fn capture(&self) -> Result<CapturedPhoto, PickerError> {
            Err(PickerError::Cancelled("fake".to_string()))
        }
    }

    fn photos(urls: &[&str]) -> Vec<(Asset, ImageData)> {
        urls.iter()
            .map(|url| {
                (
                    Asset {
                        id: AssetId::new(*url),
                        url: url.to_string(),
                        kind: MediaKind::Photo,
                        thumbnail: None,
                    },
                    ImageData::new(vec![0], "image/png", 1, 1),
                )
            })
            .collect()
    }

    fn picker_with(config: PickerConfig, library: InMemoryLibrary, camera: bool) -> ImagePicker {
        ImagePicker::new(config, Arc::new(library), Arc::new(FakeCamera::new(camera)))
    }

    fn captured(url: &str) -> CapturedPhoto {
        CapturedPhoto {
            edited_image: ImageData::new(vec![1, 2, 3], "image/jpeg", 3, 1),
            reference_url: url.to_string(),
        }
    }

    #[test]
    fn test_root_screen_gets_cancel_and_add() {
        let picker = picker_with(PickerConfig::default(), InMemoryLibrary::new(), false);
        let root = picker.top_item().unwrap();
        assert_eq!(root.left_button, Some(BarButtonItem::Cancel));
        assert_eq!(root.right_button, Some(BarButtonItem::Add));

        let add = picker.bar_button(BarButtonItem::Add);
        assert_eq!(add.title, "Add");
        assert!(!add.enabled);
    }

    #[test]
    fn test_pushed_screens_get_add_only() {
        let mut picker = picker_with(PickerConfig::default(), InMemoryLibrary::new(), false);
        picker.push_screen(NavigationItem::new("Detail"));

        let top = picker.top_item().unwrap();
        assert_eq!(top.title, "Detail");
        assert_eq!(top.right_button, Some(BarButtonItem::Add));
        assert_eq!(top.left_button, None);

        assert!(picker.pop_screen().is_some());
        assert!(picker.pop_screen().is_none());
        assert_eq!(picker.screens().len(), 1);
    }

    #[test]
    fn test_selection_and_add_delivers_once() {
        let library = InMemoryLibrary::new().with_album("A", photos(&["3", "2", "1"]));
        let config = PickerConfig {
            maximum_selection: 2,
            ..PickerConfig::default()
        };
        let mut picker = picker_with(config, library, false);
        let delegate = RecordingDelegate::default();
        picker.set_delegate(delegate.clone());
        picker.load_albums();

        assert_eq!(picker.tap(1), TapOutcome::Selected);
        assert_eq!(picker.tap(2), TapOutcome::Selected);
        assert_eq!(picker.tap(3), TapOutcome::Rejected);
        assert_eq!(picker.bar_button(BarButtonItem::Add).title, "Add (2)");

        picker.add_action();
        picker.add_action();
        picker.cancel_action();

        let outcomes = delegate.0.borrow();
        assert_eq!(outcomes.finished, vec![vec!["1".to_string(), "2".to_string()]]);
        assert_eq!(outcomes.cancelled, 0);
        assert!(picker.is_finished());
    }

    #[test]
    fn test_cancel_delivers_once() {
        let mut picker = picker_with(PickerConfig::default(), InMemoryLibrary::new(), false);
        let delegate = RecordingDelegate::default();
        picker.set_delegate(delegate.clone());

        picker.cancel_action();
        picker.cancel_action();
        picker.add_action();

        let outcomes = delegate.0.borrow();
        assert_eq!(outcomes.cancelled, 1);
        assert!(outcomes.finished.is_empty());
        assert!(!picker.bar_button(BarButtonItem::Cancel).enabled);
    }

    #[test]
    fn test_capture_replaces_selection_and_finishes() {
        let library = InMemoryLibrary::new().with_album("A", photos(&["a", "b"]));
        let mut picker = picker_with(PickerConfig::default(), library, true);
        let delegate = RecordingDelegate::default();
        picker.set_delegate(delegate.clone());
        picker.load_albums();

        picker.tap(1);
        picker.tap(2);
        assert_eq!(picker.selection().len(), 2);

        picker.camera_did_capture(captured("file:///capture.jpg"));

        assert_eq!(picker.selection().len(), 1);
        assert!(picker.selection().items()[0].is_capture());
        assert_eq!(
            delegate.0.borrow().finished,
            vec![vec!["file:///capture.jpg".to_string()]]
        );
    }

    #[test]
    fn test_camera_cancel_keeps_picker_open() {
        let mut picker = picker_with(PickerConfig::default(), InMemoryLibrary::new(), true);
        let delegate = RecordingDelegate::default();
        picker.set_delegate(delegate.clone());

        picker.camera_did_cancel();
        assert!(!picker.is_finished());
        assert_eq!(delegate.0.borrow().cancelled, 0);
    }

    #[test]
    fn test_camera_tile_outcomes() {
        let library = InMemoryLibrary::new().with_album("A", photos(&["a"]));
        let mut picker = picker_with(PickerConfig::default(), library, false);
        picker.load_albums();
        assert_eq!(picker.tap(0), TapOutcome::CameraUnavailable);
        assert!(picker.selection().is_empty());

        let library = InMemoryLibrary::new().with_album("A", photos(&["a"]));
        let mut picker = picker_with(PickerConfig::default(), library, true);
        picker.load_albums();
        assert_eq!(picker.tap(0), TapOutcome::LaunchCamera);
    }

    #[test]
    fn test_camera_checked_only_for_camera_tile() {
        let library = InMemoryLibrary::new().with_album("A", photos(&["a"]));
        let camera = Arc::new(FakeCamera::new(true));
        let mut picker = ImagePicker::new(PickerConfig::default(), Arc::new(library), camera.clone());
        picker.load_albums();

        picker.tap(1);
        assert_eq!(camera.checks.load(Ordering::SeqCst), 0);
        picker.tap(0);
        assert_eq!(camera.checks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_access_denied() {
        let mut picker = picker_with(PickerConfig::default(), InMemoryLibrary::denied(), true);
        picker.load_albums();
        assert_eq!(picker.list().state(), crate::list::ListState::AccessDenied);
        assert_eq!(picker.list().item_count(), 0);
    }

    #[test]
    fn test_load_album_switches_grid() {
        let library = InMemoryLibrary::new()
            .with_album("Older", photos(&["o1", "o2", "o3"]))
            .with_album("Newer", photos(&["n1"]));
        let mut picker = picker_with(PickerConfig::default(), library, false);
        picker.load_albums();
        assert_eq!(picker.list().item_count(), 2);

        picker.load_album(1);
        assert_eq!(picker.list().item_count(), 4);
        assert_eq!(picker.list().carousel().selected_item(), Some(1));
    }

    #[test]
    fn test_cell_side_and_animation() {
        let picker = picker_with(PickerConfig::default(), InMemoryLibrary::new(), false);
        assert_eq!(picker.cell_side(323.0, 600.0), 80.0);
        assert_eq!(
            picker.cell_animation(5).delay,
            std::time::Duration::from_millis(50)
        );
    }
}
