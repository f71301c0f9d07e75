use crate::error::PickerError;
use crate::models::PickedImage;
use crate::picker::BarButton;

/// The picked images, in pick order.
///
/// All mutations go through this type so the maximum is enforced in one
/// place. URLs are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    items: Vec<PickedImage>,
    /// 0 means unlimited
    maximum: usize,
}

impl Selection {
    pub fn new(maximum: usize) -> Self {
        Self {
            items: Vec::new(),
            maximum,
        }
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    /// Whether one more image fits under the maximum
    pub fn can_add(&self) -> bool {
        self.maximum == 0 || self.items.len() < self.maximum
    }

    /// Append an image. Returns `Ok(false)` if its URL is already selected.
    pub fn add(&mut self, item: PickedImage) -> Result<bool, PickerError> {
        if self.contains(&item) {
            return Ok(false);
        }
        if !self.can_add() {
            return Err(PickerError::SelectionLimit {
                maximum: self.maximum,
            });
        }

        self.items.push(item);
        log::debug!("Selection count = {}", self.items.len());
        Ok(true)
    }

    /// Remove the image with the same URL
    pub fn remove(&mut self, item: &PickedImage) -> Option<PickedImage> {
        let index = self.items.iter().position(|i| i == item)?;
        let removed = self.items.remove(index);
        log::debug!("Selection count = {}", self.items.len());
        Some(removed)
    }

    /// Replace the whole selection. Duplicate URLs keep their first position.
    pub fn replace(&mut self, items: Vec<PickedImage>) -> Result<(), PickerError> {
        let mut unique: Vec<PickedImage> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }

        if self.maximum > 0 && unique.len() > self.maximum {
            return Err(PickerError::SelectionLimit {
                maximum: self.maximum,
            });
        }

        self.items = unique;
        log::debug!("Selection count = {}", self.items.len());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &PickedImage) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PickedImage] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<PickedImage> {
        self.items.clone()
    }

    /// "Add" while empty (disabled), "Add (n)" otherwise
    pub fn add_button(&self) -> BarButton {
        if self.items.is_empty() {
            BarButton {
                title: "Add".to_string(),
                enabled: false,
            }
        } else {
            BarButton {
                title: format!("Add ({})", self.items.len()),
                enabled: true,
            }
        }
    }
}
